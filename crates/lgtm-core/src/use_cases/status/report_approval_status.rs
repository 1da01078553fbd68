use async_trait::async_trait;
use lgtm_ghapi_interface::types::GhCommitStatusState;
use lgtm_models::Issue;
use shaku::{Component, HasComponent, Interface};
use tracing::info;

use super::{approval_status_description, ApprovalReport, STATUS_CONTEXT};
use crate::{
    use_cases::{approvals::ComputeApprovalsInterface, repositories::RepositoryContext},
    CoreContext, Result,
};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ReportApprovalStatusInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        repo_ctx: &RepositoryContext,
        issue: &Issue,
    ) -> Result<ApprovalReport>;
}

/// Count the approvals of a pull request and report them as a commit status on its head.
#[derive(Component)]
#[shaku(interface = ReportApprovalStatusInterface)]
pub(crate) struct ReportApprovalStatus;

#[async_trait]
impl ReportApprovalStatusInterface for ReportApprovalStatus {
    #[tracing::instrument(
        skip_all,
        fields(repository_path = %repo_ctx.repository.slug(), pr_number = issue.number)
    )]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        repo_ctx: &RepositoryContext,
        issue: &Issue,
    ) -> Result<ApprovalReport> {
        let compute_approvals: &dyn ComputeApprovalsInterface = ctx.core_module.resolve_ref();
        let approvals = compute_approvals.run(ctx, repo_ctx, issue).await?;

        let required = repo_ctx.config.approvals;
        let approved = approvals.len() as u64 >= required;

        let upstream_pr = ctx
            .api_service
            .pulls_get(
                repo_ctx.token(),
                repo_ctx.repo_owner(),
                repo_ctx.repo_name(),
                issue.number,
            )
            .await?;

        let state = if approved {
            GhCommitStatusState::Success
        } else {
            GhCommitStatusState::Pending
        };
        ctx.api_service
            .commit_statuses_update(
                repo_ctx.token(),
                repo_ctx.repo_owner(),
                repo_ctx.repo_name(),
                &upstream_pr.head.sha,
                state,
                STATUS_CONTEXT,
                &approval_status_description(approvals.len(), required),
            )
            .await?;

        info!(
            repository_path = %repo_ctx.repository.slug(),
            pr_number = issue.number,
            granted = approvals.len(),
            required = required,
            approved = approved,
            message = "Reported approval status"
        );

        Ok(ApprovalReport {
            approvers: repo_ctx.roster.people.clone(),
            settings: repo_ctx.config.clone(),
            approved,
            approved_by: approvals.into_iter().map(|a| a.person).collect(),
        })
    }
}
