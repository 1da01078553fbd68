use async_trait::async_trait;
use lgtm_models::{Repository, RepositoryRef, User};
use shaku::{Component, Interface};

use crate::{CoreContext, DomainError, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ResolveRepositoryInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        repo: &RepositoryRef,
    ) -> Result<(Repository, User)>;
}

/// Find an activated repository and the account owning it.
#[derive(Component)]
#[shaku(interface = ResolveRepositoryInterface)]
pub(crate) struct ResolveRepository;

#[async_trait]
impl ResolveRepositoryInterface for ResolveRepository {
    #[tracing::instrument(skip(self, ctx), fields(repository_path = %repo.slug))]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        repo: &RepositoryRef,
    ) -> Result<(Repository, User)> {
        let repository = ctx
            .db_service
            .repositories_get(&repo.owner, &repo.name)
            .await?
            .ok_or_else(|| DomainError::UnknownRepository {
                repository_path: repo.slug.clone(),
            })?;

        let owner = ctx
            .db_service
            .users_get_from_id(repository.user_id)
            .await?
            .ok_or_else(|| DomainError::UnknownOwner {
                repository_path: repo.slug.clone(),
            })?;

        Ok((repository, owner))
    }
}
