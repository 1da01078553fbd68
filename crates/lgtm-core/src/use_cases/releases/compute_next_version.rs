use async_trait::async_trait;
use lgtm_models::Version;
use shaku::{Component, Interface};
use time::OffsetDateTime;
use tracing::debug;

use crate::{
    approvals::Approval,
    use_cases::repositories::RepositoryContext,
    versions::{max_requested_version, next_semver, timestamp_version, VersionStrategy},
    CoreContext, Result,
};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ComputeNextVersionInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        repo_ctx: &RepositoryContext,
        strategy: VersionStrategy,
        approvals: &[Approval],
    ) -> Result<String>;
}

/// Name the release tag of a merged pull request.
#[derive(Component)]
#[shaku(interface = ComputeNextVersionInterface)]
pub(crate) struct ComputeNextVersion;

#[async_trait]
impl ComputeNextVersionInterface for ComputeNextVersion {
    #[tracing::instrument(
        skip(self, ctx, repo_ctx, approvals),
        fields(repository_path = %repo_ctx.repository.slug())
    )]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        repo_ctx: &RepositoryContext,
        strategy: VersionStrategy,
        approvals: &[Approval],
    ) -> Result<String> {
        match strategy {
            VersionStrategy::Semver => {
                let tags = ctx
                    .api_service
                    .tags_list(repo_ctx.token(), repo_ctx.repo_owner(), repo_ctx.repo_name())
                    .await?;
                let existing = Version::max_of_tags(&tags);
                let requested = max_requested_version(repo_ctx.config.matcher(), approvals);

                debug!(
                    existing = %existing,
                    requested = ?requested.map(|v| v.to_string()),
                    message = "Computing next semantic version"
                );

                Ok(next_semver(existing, requested)?.to_string())
            }
            VersionStrategy::Timestamp => Ok(timestamp_version(
                &repo_ctx.config.version_format,
                OffsetDateTime::now_utc(),
            )?),
        }
    }
}
