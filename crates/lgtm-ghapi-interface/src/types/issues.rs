use serde::{Deserialize, Serialize};

use super::{GhRepository, GhUser};

/// Links present when an issue is a pull request.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GhIssuePullRequestLinks {
    /// HTML URL.
    #[serde(default)]
    pub html_url: String,
}

/// GitHub Issue.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GhIssue {
    /// Number.
    pub number: u64,
    /// Title.
    pub title: String,
    /// User.
    pub user: GhUser,
    /// Pull request links.
    pub pull_request: Option<GhIssuePullRequestLinks>,
}

/// GitHub Issue comment.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GhIssueComment {
    /// ID.
    pub id: u64,
    /// User.
    pub user: GhUser,
    /// Body.
    #[serde(default)]
    pub body: String,
}

/// GitHub Issue comment event.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GhIssueCommentEvent {
    /// Action.
    #[serde(default)]
    pub action: String,
    /// Issue.
    pub issue: GhIssue,
    /// Comment.
    pub comment: GhIssueComment,
    /// Repository.
    pub repository: GhRepository,
}
