use serde::{Deserialize, Serialize};

use crate::Issue;

/// Combined state of the checks of a commit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckState {
    Error,
    Failure,
    #[default]
    Pending,
    Success,
}

/// Pull request candidate for a release, fetched for a single pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PullRequestSnapshot {
    pub issue: Issue,
    pub branch: String,
    pub check_state: CheckState,
    pub mergeable: bool,
}

impl PullRequestSnapshot {
    pub fn is_ready_to_merge(&self) -> bool {
        self.check_state == CheckState::Success && self.mergeable
    }
}
