//! Approval algorithms.

mod org;
mod registry;
mod simple;

use lgtm_models::{Comment, Issue, Person, RepoConfig, Roster};
use serde::Serialize;
use thiserror::Error;

pub use org::OrgAlgorithm;
pub use registry::{ApprovalRegistry, ApprovalRegistryBuilder};
pub use simple::SimpleAlgorithm;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApprovalError {
    #[error("Approval algorithm '{name}' is already registered")]
    AlreadyRegistered { name: String },

    #[error("Unknown approval algorithm '{name}'")]
    UnknownAlgorithm { name: String },
}

/// Comment recognized as an approval, with its author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Approval {
    pub person: Person,
    pub comment: Comment,
}

impl Approval {
    pub fn new(person: Person, comment: Comment) -> Self {
        Self { person, comment }
    }
}

/// Strategy turning a comment stream into approvals.
///
/// Implementations never fail, an unusable pattern yields no approval.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
pub trait ApprovalAlgorithm: Send + Sync {
    fn approvals(
        &self,
        config: &RepoConfig,
        roster: &Roster,
        issue: &Issue,
        comments: &[Comment],
    ) -> Vec<Approval>;
}
