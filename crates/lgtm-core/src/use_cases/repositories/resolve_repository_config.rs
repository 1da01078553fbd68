use async_trait::async_trait;
use lgtm_models::{RepoConfig, Repository, User};
use shaku::{Component, Interface};
use tracing::{debug, warn};

use crate::{CoreContext, Result};

/// Path of the repository settings file.
pub const CONFIG_FILE_PATH: &str = ".lgtm";

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ResolveRepositoryConfigInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        repository: &Repository,
        owner: &User,
    ) -> Result<RepoConfig>;
}

/// Read the `.lgtm` settings of a repository.
///
/// A missing or unreachable file gives the defaults. An invalid file is an error.
#[derive(Component)]
#[shaku(interface = ResolveRepositoryConfigInterface)]
pub(crate) struct ResolveRepositoryConfig;

#[async_trait]
impl ResolveRepositoryConfigInterface for ResolveRepositoryConfig {
    #[tracing::instrument(skip_all, fields(repository_path = %repository.slug()))]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        repository: &Repository,
        owner: &User,
    ) -> Result<RepoConfig> {
        let document = ctx
            .api_service
            .contents_get(
                &owner.token,
                &repository.owner,
                &repository.name,
                CONFIG_FILE_PATH,
            )
            .await;

        match document {
            Ok(Some(document)) => Ok(RepoConfig::parse(&document, &ctx.config.defaults)?),
            Ok(None) => {
                debug!(
                    repository_path = %repository.slug(),
                    message = "No settings file, using defaults"
                );
                Ok(RepoConfig::from_defaults(&ctx.config.defaults))
            }
            Err(e) => {
                warn!(
                    repository_path = %repository.slug(),
                    error = %e,
                    message = "Could not fetch settings file, using defaults"
                );
                Ok(RepoConfig::from_defaults(&ctx.config.defaults))
            }
        }
    }
}
