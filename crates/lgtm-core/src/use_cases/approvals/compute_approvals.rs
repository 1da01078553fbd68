use async_trait::async_trait;
use lgtm_models::{Comment, Issue};
use shaku::{Component, Interface};
use tracing::debug;

use crate::{approvals::Approval, use_cases::repositories::RepositoryContext, CoreContext, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ComputeApprovalsInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        repo_ctx: &RepositoryContext,
        issue: &Issue,
    ) -> Result<Vec<Approval>>;
}

/// Run the configured approval algorithm over the comments of an issue.
#[derive(Component)]
#[shaku(interface = ComputeApprovalsInterface)]
pub(crate) struct ComputeApprovals;

#[async_trait]
impl ComputeApprovalsInterface for ComputeApprovals {
    #[tracing::instrument(
        skip_all,
        fields(
            repository_path = %repo_ctx.repository.slug(),
            pr_number = issue.number,
            algorithm = %repo_ctx.config.approval_algorithm
        )
    )]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        repo_ctx: &RepositoryContext,
        issue: &Issue,
    ) -> Result<Vec<Approval>> {
        let algorithm = ctx
            .approval_registry
            .lookup(&repo_ctx.config.approval_algorithm)?;

        let comments: Vec<Comment> = ctx
            .api_service
            .comments_list(
                repo_ctx.token(),
                repo_ctx.repo_owner(),
                repo_ctx.repo_name(),
                issue.number,
            )
            .await?
            .into_iter()
            .map(|c| Comment::new(c.user.login, c.body))
            .collect();

        let approvals = algorithm.approvals(&repo_ctx.config, &repo_ctx.roster, issue, &comments);
        debug!(
            pr_number = issue.number,
            comments = comments.len(),
            approvals = approvals.len(),
            message = "Computed approvals"
        );

        Ok(approvals)
    }
}
