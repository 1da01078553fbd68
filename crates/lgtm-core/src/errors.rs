//! Logic errors.

use thiserror::Error;

use crate::{approvals::ApprovalError, versions::VersionStrategyError};

/// Logic error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Unknown repository '{repository_path}'")]
    UnknownRepository { repository_path: String },

    #[error("Unknown owner for repository '{repository_path}'")]
    UnknownOwner { repository_path: String },

    #[error("No maintainers file and no team '{team}' for repository '{repository_path}'")]
    RosterUnavailable {
        repository_path: String,
        team: String,
    },

    /// Wraps [`lgtm_models::RepoConfigError`].
    #[error("Invalid repository configuration: {source}")]
    RepoConfigError {
        source: lgtm_models::RepoConfigError,
    },

    /// Wraps [`lgtm_models::RosterError`].
    #[error("Invalid maintainers file: {source}")]
    RosterError { source: lgtm_models::RosterError },

    /// Wraps [`ApprovalError`].
    #[error("Approval error: {source}")]
    ApprovalError { source: ApprovalError },

    /// Wraps [`VersionStrategyError`].
    #[error("Version error: {source}")]
    VersionStrategyError { source: VersionStrategyError },

    /// Wraps [`lgtm_ghapi_interface::ApiError`].
    #[error("API error: {source}")]
    ApiError {
        source: lgtm_ghapi_interface::ApiError,
    },

    /// Wraps [`lgtm_database_interface::DatabaseError`].
    #[error("Database error: {source}")]
    DatabaseError {
        source: lgtm_database_interface::DatabaseError,
    },
}

impl DomainError {
    /// Resolution failure, the targeted resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UnknownRepository { .. }
                | Self::UnknownOwner { .. }
                | Self::RosterUnavailable { .. }
        )
    }
}

impl From<lgtm_models::RepoConfigError> for DomainError {
    fn from(e: lgtm_models::RepoConfigError) -> Self {
        Self::RepoConfigError { source: e }
    }
}

impl From<lgtm_models::RosterError> for DomainError {
    fn from(e: lgtm_models::RosterError) -> Self {
        Self::RosterError { source: e }
    }
}

impl From<ApprovalError> for DomainError {
    fn from(e: ApprovalError) -> Self {
        Self::ApprovalError { source: e }
    }
}

impl From<VersionStrategyError> for DomainError {
    fn from(e: VersionStrategyError) -> Self {
        Self::VersionStrategyError { source: e }
    }
}

impl From<lgtm_ghapi_interface::ApiError> for DomainError {
    fn from(e: lgtm_ghapi_interface::ApiError) -> Self {
        Self::ApiError { source: e }
    }
}

impl From<lgtm_database_interface::DatabaseError> for DomainError {
    fn from(e: lgtm_database_interface::DatabaseError) -> Self {
        Self::DatabaseError { source: e }
    }
}

/// Result alias for `DomainError`.
pub type Result<T, E = DomainError> = core::result::Result<T, E>;
