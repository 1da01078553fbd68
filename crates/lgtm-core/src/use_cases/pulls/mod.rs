pub(crate) mod handle_pull_request_hook;
pub(crate) mod list_commit_pull_requests;
pub(crate) mod merge_pull_request;

pub use handle_pull_request_hook::HandlePullRequestHookInterface;
pub use list_commit_pull_requests::ListCommitPullRequestsInterface;
pub use merge_pull_request::{merge_message, MergePullRequestInterface};

#[cfg(any(test, feature = "testkit"))]
pub use self::{
    handle_pull_request_hook::MockHandlePullRequestHookInterface,
    list_commit_pull_requests::MockListCommitPullRequestsInterface,
    merge_pull_request::MockMergePullRequestInterface,
};
