pub(crate) mod compute_approvals;

pub use compute_approvals::ComputeApprovalsInterface;

#[cfg(any(test, feature = "testkit"))]
pub use self::compute_approvals::MockComputeApprovalsInterface;
