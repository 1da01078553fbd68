//! GitHub types.

mod common;
mod issues;
mod pulls;
mod push;
mod statuses;

pub use common::{GhBranch, GhRepository, GhUser};
pub use issues::{GhIssue, GhIssueComment, GhIssueCommentEvent, GhIssuePullRequestLinks};
pub use pulls::{GhPullRequest, GhPullRequestAction, GhPullRequestEvent};
pub use push::GhPushEvent;
pub use statuses::{GhCombinedStatus, GhCommitStatusItem, GhCommitStatusState, GhStatusEvent};
