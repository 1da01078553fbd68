//! Server errors.

use actix_http::StatusCode;
use actix_web::ResponseError;
use thiserror::Error;

use crate::event_type::EventType;

/// Server error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Error while parsing webhook event for type {event_type}: {source}")]
    EventParseError {
        event_type: EventType,
        source: serde_json::Error,
    },

    #[error("Bad payload for event '{event_type}'")]
    BadPayload { event_type: EventType },

    #[error("I/O error: {source}")]
    IoError { source: std::io::Error },

    #[error("Could not import seed file '{path}': {source}")]
    SeedError {
        path: String,
        source: lgtm_database_interface::DatabaseError,
    },

    #[error("{source}")]
    DomainError { source: lgtm_core::DomainError },
}

impl From<lgtm_core::DomainError> for ServerError {
    fn from(e: lgtm_core::DomainError) -> Self {
        Self::DomainError { source: e }
    }
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match &self {
            Self::EventParseError { .. } | Self::BadPayload { .. } => StatusCode::BAD_REQUEST,
            Self::DomainError { source } if source.is_not_found() => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Result alias for `ServerError`.
pub type Result<T, E = ServerError> = core::result::Result<T, E>;
