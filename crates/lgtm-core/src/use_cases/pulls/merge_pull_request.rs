use async_trait::async_trait;
use lgtm_models::Issue;
use shaku::{Component, Interface};
use tracing::info;

use crate::{
    approvals::Approval, use_cases::repositories::RepositoryContext, CoreContext, Result,
};

/// Commit message of a merge, listing who approved it.
pub fn merge_message(approvals: &[Approval]) -> String {
    let mut message = String::from("Merged by LGTM\n");
    if !approvals.is_empty() {
        message.push_str("Approved by:\n");
        for approval in approvals {
            message.push_str(&approval.person.signature());
            message.push('\n');
        }
    }

    message
}

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait MergePullRequestInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        repo_ctx: &RepositoryContext,
        issue: &Issue,
        approvals: &[Approval],
    ) -> Result<String>;
}

/// Merge a pull request and return the merge commit SHA.
#[derive(Component)]
#[shaku(interface = MergePullRequestInterface)]
pub(crate) struct MergePullRequest;

#[async_trait]
impl MergePullRequestInterface for MergePullRequest {
    #[tracing::instrument(
        skip_all,
        fields(repository_path = %repo_ctx.repository.slug(), pr_number = issue.number)
    )]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        repo_ctx: &RepositoryContext,
        issue: &Issue,
        approvals: &[Approval],
    ) -> Result<String> {
        let sha = ctx
            .api_service
            .pulls_merge(
                repo_ctx.token(),
                repo_ctx.repo_owner(),
                repo_ctx.repo_name(),
                issue.number,
                &merge_message(approvals),
            )
            .await?;

        info!(
            repository_path = %repo_ctx.repository.slug(),
            pr_number = issue.number,
            sha = %sha,
            message = "Merged pull request"
        );

        Ok(sha)
    }
}
