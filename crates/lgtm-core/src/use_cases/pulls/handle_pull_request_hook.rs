use async_trait::async_trait;
use lgtm_models::PullRequestOpenedHook;
use shaku::{Component, HasComponent, Interface};

use crate::{
    use_cases::{
        repositories::ResolveRepositoryContextInterface,
        status::{ApprovalReport, ReportApprovalStatusInterface},
    },
    CoreContext, Result,
};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait HandlePullRequestHookInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        hook: &PullRequestOpenedHook,
    ) -> Result<ApprovalReport>;
}

/// Refresh the approval status of an opened or updated pull request.
#[derive(Component)]
#[shaku(interface = HandlePullRequestHookInterface)]
pub(crate) struct HandlePullRequestHook;

#[async_trait]
impl HandlePullRequestHookInterface for HandlePullRequestHook {
    #[tracing::instrument(
        skip_all,
        fields(repository_path = %hook.repo.slug, pr_number = hook.number)
    )]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        hook: &PullRequestOpenedHook,
    ) -> Result<ApprovalReport> {
        let resolve_context: &dyn ResolveRepositoryContextInterface =
            ctx.core_module.resolve_ref();
        let repo_ctx = resolve_context.run(ctx, &hook.repo).await?;

        let report_status: &dyn ReportApprovalStatusInterface = ctx.core_module.resolve_ref();
        report_status.run(ctx, &repo_ctx, &hook.issue()).await
    }
}
