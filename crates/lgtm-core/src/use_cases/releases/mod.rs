pub(crate) mod compute_next_version;
pub(crate) mod handle_status_hook;

use std::collections::BTreeMap;

use serde::Serialize;

pub use compute_next_version::ComputeNextVersionInterface;
pub use handle_status_hook::HandleStatusHookInterface;

#[cfg(any(test, feature = "testkit"))]
pub use self::{
    compute_next_version::MockComputeNextVersionInterface,
    handle_status_hook::MockHandleStatusHookInterface,
};

/// Message of the annotated release tags.
pub const TAG_MESSAGE: &str = "Tagged by LGTM";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergedPullRequest {
    pub sha: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Outcome of a release pass.
///
/// Merged pull requests are keyed by title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReleaseReport {
    pub merged: BTreeMap<String, MergedPullRequest>,
    pub failures: Vec<String>,
}
