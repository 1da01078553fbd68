use async_trait::async_trait;
use lgtm_models::CommentHook;
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
pub trait HandleCommentHookInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, hook: &CommentHook) -> Result<ApprovalReport>;
}

#[derive(Component)]
#[shaku(interface = HandleCommentHookInterface)]
pub(crate) struct HandleCommentHook;

#[async_trait]
impl HandleCommentHookInterface for HandleCommentHook {
    #[tracing::instrument(
        skip_all,
        fields(
            repository_path = %hook.repo.slug,
            pr_number = hook.issue.number,
            comment_author = %hook.comment.author
        )
    )]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, hook: &CommentHook) -> Result<ApprovalReport> {
        let resolve_context: &dyn ResolveRepositoryContextInterface =
            ctx.core_module.resolve_ref();
        let repo_ctx = resolve_context.run(ctx, &hook.repo).await?;

        let report_status: &dyn ReportApprovalStatusInterface = ctx.core_module.resolve_ref();
        report_status.run(ctx, &repo_ctx, &hook.issue).await
    }
}
