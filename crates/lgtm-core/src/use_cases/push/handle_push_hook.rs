use async_trait::async_trait;
use lgtm_ghapi_interface::types::GhCommitStatusState;
use lgtm_models::PushHook;
use serde::Serialize;
use shaku::{Component, HasComponent, Interface};
use tracing::info;

use crate::{
    use_cases::{
        repositories::ResolveRepositoryInterface,
        status::{PENDING_APPROVAL_DESCRIPTION, STATUS_CONTEXT},
    },
    CoreContext, Result,
};

/// Outcome of a push, empty when no pull request contains the commit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PushReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait HandlePushHookInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, hook: &PushHook) -> Result<PushReport>;
}

/// Reset the approval status of pull requests receiving new commits.
#[derive(Component)]
#[shaku(interface = HandlePushHookInterface)]
pub(crate) struct HandlePushHook;

#[async_trait]
impl HandlePushHookInterface for HandlePushHook {
    #[tracing::instrument(skip_all, fields(repository_path = %hook.repo.slug, sha = %hook.sha))]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, hook: &PushHook) -> Result<PushReport> {
        let resolve_repository: &dyn ResolveRepositoryInterface = ctx.core_module.resolve_ref();
        let (repository, owner) = resolve_repository.run(ctx, &hook.repo).await?;

        let pulls = ctx
            .api_service
            .commits_pulls_list(&owner.token, &repository.owner, &repository.name, &hook.sha)
            .await?;
        if pulls.is_empty() {
            return Ok(PushReport::default());
        }

        for pull in &pulls {
            ctx.api_service
                .commit_statuses_update(
                    &owner.token,
                    &repository.owner,
                    &repository.name,
                    &pull.head.sha,
                    GhCommitStatusState::Pending,
                    STATUS_CONTEXT,
                    PENDING_APPROVAL_DESCRIPTION,
                )
                .await?;
        }

        info!(
            repository_path = %repository.slug(),
            sha = %hook.sha,
            pull_requests = pulls.len(),
            message = "Marked pushed commit as pending approval"
        );

        Ok(PushReport {
            commit: Some(hook.sha.clone()),
            status: Some(GhCommitStatusState::Pending.to_str().into()),
        })
    }
}
