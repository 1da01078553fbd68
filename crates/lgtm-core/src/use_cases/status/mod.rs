pub(crate) mod report_approval_status;

use std::collections::BTreeMap;

use lgtm_models::{Person, RepoConfig};
use serde::Serialize;

pub use report_approval_status::ReportApprovalStatusInterface;

#[cfg(any(test, feature = "testkit"))]
pub use self::report_approval_status::MockReportApprovalStatusInterface;

/// Context of the commit statuses written by the bot.
pub const STATUS_CONTEXT: &str = "approvals/lgtm";

/// Description of the pending status set on pushed commits.
pub const PENDING_APPROVAL_DESCRIPTION: &str = "this commit is pending approval";

/// Outcome of an approval pass.
#[derive(Debug, Clone, Serialize)]
pub struct ApprovalReport {
    /// Everyone allowed to approve.
    pub approvers: BTreeMap<String, Person>,
    pub settings: RepoConfig,
    pub approved: bool,
    pub approved_by: Vec<Person>,
}

pub fn approval_status_description(granted: usize, required: u64) -> String {
    format!("{granted} of {required} required approvals granted")
}
