use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

use super::{GhBranch, GhRepository, GhUser};

/// GitHub Pull request.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GhPullRequest {
    /// Number.
    pub number: u64,
    /// Title.
    pub title: String,
    /// User.
    pub user: GhUser,
    /// Head branch.
    pub head: GhBranch,
    /// Base branch.
    pub base: GhBranch,
    /// Merged?
    pub merged: Option<bool>,
    /// Mergeable?
    pub mergeable: Option<bool>,
}

/// GitHub Pull request action.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, SmartDefault, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GhPullRequestAction {
    /// Opened.
    #[default]
    Opened,
    /// Synchronize.
    Synchronize,
    /// Anything else.
    #[serde(other)]
    Unsupported,
}

/// GitHub Pull request event.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GhPullRequestEvent {
    /// Action.
    pub action: GhPullRequestAction,
    /// Number.
    pub number: u64,
    /// Pull request.
    pub pull_request: GhPullRequest,
    /// Repository.
    pub repository: GhRepository,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn unknown_actions_are_unsupported() {
        let action: GhPullRequestAction = serde_json::from_str(r#""labeled""#).unwrap();
        assert_eq!(action, GhPullRequestAction::Unsupported);

        let action: GhPullRequestAction = serde_json::from_str(r#""synchronize""#).unwrap();
        assert_eq!(action, GhPullRequestAction::Synchronize);
    }
}
