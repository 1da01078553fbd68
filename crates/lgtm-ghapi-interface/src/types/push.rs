use serde::{Deserialize, Serialize};

use super::GhRepository;

/// GitHub Push event.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GhPushEvent {
    /// Pushed reference.
    #[serde(rename = "ref")]
    pub reference: String,
    /// SHA after the push.
    pub after: String,
    /// Branch deleted?
    #[serde(default)]
    pub deleted: bool,
    /// Repository.
    pub repository: GhRepository,
}
