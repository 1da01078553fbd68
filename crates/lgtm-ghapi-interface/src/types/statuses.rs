use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

use super::GhRepository;

/// GitHub commit status state
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone, Copy, SmartDefault)]
#[serde(rename_all = "snake_case")]
pub enum GhCommitStatusState {
    /// Error.
    Error,
    /// Failure.
    Failure,
    /// Pending.
    #[default]
    Pending,
    /// Success.
    Success,
}

impl GhCommitStatusState {
    /// Convert status state to static str.
    pub fn to_str(self) -> &'static str {
        self.into()
    }
}

impl From<GhCommitStatusState> for &'static str {
    fn from(status_state: GhCommitStatusState) -> Self {
        match status_state {
            GhCommitStatusState::Error => "error",
            GhCommitStatusState::Failure => "failure",
            GhCommitStatusState::Pending => "pending",
            GhCommitStatusState::Success => "success",
        }
    }
}

/// GitHub commit status item
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone, Default)]
pub struct GhCommitStatusItem {
    pub state: GhCommitStatusState,
    pub context: String,
}

/// GitHub combined commit status
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone, Default)]
pub struct GhCombinedStatus {
    pub state: GhCommitStatusState,
    pub statuses: Vec<GhCommitStatusItem>,
}

impl GhCombinedStatus {
    /// Combined state, downgraded to the first individual state that is not a success.
    pub fn effective_state(&self) -> GhCommitStatusState {
        if self.state != GhCommitStatusState::Success {
            return self.state;
        }

        self.statuses
            .iter()
            .map(|s| s.state)
            .find(|s| *s != GhCommitStatusState::Success)
            .unwrap_or(GhCommitStatusState::Success)
    }
}

/// GitHub status event
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone, Default)]
pub struct GhStatusEvent {
    /// Commit SHA.
    pub sha: String,
    /// State.
    pub state: GhCommitStatusState,
    /// Context.
    #[serde(default)]
    pub context: String,
    /// Repository.
    pub repository: GhRepository,
}
