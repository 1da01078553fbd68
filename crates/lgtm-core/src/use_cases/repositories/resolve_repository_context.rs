use async_trait::async_trait;
use lgtm_models::RepositoryRef;
use shaku::{Component, HasComponent, Interface};

use super::{
    RepositoryContext, ResolveRepositoryConfigInterface, ResolveRepositoryInterface,
    ResolveRosterInterface,
};
use crate::{CoreContext, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ResolveRepositoryContextInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        repo: &RepositoryRef,
    ) -> Result<RepositoryContext>;
}

/// Resolve repository, owner, settings and roster, in that order.
#[derive(Component)]
#[shaku(interface = ResolveRepositoryContextInterface)]
pub(crate) struct ResolveRepositoryContext;

#[async_trait]
impl ResolveRepositoryContextInterface for ResolveRepositoryContext {
    #[tracing::instrument(skip(self, ctx), fields(repository_path = %repo.slug))]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        repo: &RepositoryRef,
    ) -> Result<RepositoryContext> {
        let resolve_repository: &dyn ResolveRepositoryInterface = ctx.core_module.resolve_ref();
        let (repository, owner) = resolve_repository.run(ctx, repo).await?;

        let resolve_config: &dyn ResolveRepositoryConfigInterface = ctx.core_module.resolve_ref();
        let config = resolve_config.run(ctx, &repository, &owner).await?;

        let resolve_roster: &dyn ResolveRosterInterface = ctx.core_module.resolve_ref();
        let roster = resolve_roster.run(ctx, &repository, &owner, &config).await?;

        Ok(RepositoryContext {
            repository,
            owner,
            config,
            roster,
        })
    }
}
