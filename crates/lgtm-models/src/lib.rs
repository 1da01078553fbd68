//! Domain models.

mod hooks;
mod issue;
mod person;
mod pull_request;
mod repo_config;
mod repository;
pub mod roster;
mod version;

pub use hooks::{
    CommentHook, Hook, PullRequestOpenedHook, PushHook, RepositoryRef, StatusHook,
};
pub use issue::{Comment, Issue};
pub use person::Person;
pub use pull_request::{CheckState, PullRequestSnapshot};
pub use repo_config::{ApprovalMatcher, RepoConfig, RepoConfigError};
pub use repository::{Repository, User};
pub use roster::{Organization, Roster, RosterError};
pub use version::{Version, VersionError};
