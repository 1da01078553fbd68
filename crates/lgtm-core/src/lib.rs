//! Core module.

#![warn(clippy::all)]
#![allow(clippy::new_without_default)]

pub mod approvals;
mod context;
pub mod errors;
pub mod use_cases;
pub mod versions;

pub use context::CoreContext;
pub use errors::{DomainError, Result};
use shaku::module;
use use_cases::{
    approvals::compute_approvals::ComputeApprovals,
    comments::handle_comment_hook::HandleCommentHook,
    pulls::{
        handle_pull_request_hook::HandlePullRequestHook,
        list_commit_pull_requests::ListCommitPullRequests, merge_pull_request::MergePullRequest,
    },
    push::handle_push_hook::HandlePushHook,
    releases::{
        compute_next_version::ComputeNextVersion, handle_status_hook::HandleStatusHook,
    },
    repositories::{
        fetch_team_members::FetchTeamMembers, resolve_repository::ResolveRepository,
        resolve_repository_config::ResolveRepositoryConfig,
        resolve_repository_context::ResolveRepositoryContext, resolve_roster::ResolveRoster,
    },
    status::report_approval_status::ReportApprovalStatus,
};

module! {
    pub CoreModule {
        components = [
            ResolveRepository, ResolveRepositoryConfig, FetchTeamMembers,
            ResolveRoster, ResolveRepositoryContext, ComputeApprovals,
            ReportApprovalStatus, HandleCommentHook, HandlePullRequestHook,
            ListCommitPullRequests, MergePullRequest, HandlePushHook,
            ComputeNextVersion, HandleStatusHook
        ],
        providers = []
    }
}
