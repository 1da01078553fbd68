use async_trait::async_trait;
use lgtm_models::{RepoConfig, Repository, Roster, User};
use shaku::{Component, HasComponent, Interface};
use tracing::{debug, warn};

use super::FetchTeamMembersInterface;
use crate::{CoreContext, DomainError, Result};

/// Path of the roster document.
pub const ROSTER_FILE_PATH: &str = "MAINTAINERS";

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ResolveRosterInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        repository: &Repository,
        owner: &User,
        config: &RepoConfig,
    ) -> Result<Roster>;
}

/// Read the roster of a repository.
///
/// Without a readable `MAINTAINERS` file, the members of the configured team
/// are used instead.
#[derive(Component)]
#[shaku(interface = ResolveRosterInterface)]
pub(crate) struct ResolveRoster;

#[async_trait]
impl ResolveRosterInterface for ResolveRoster {
    #[tracing::instrument(
        skip_all,
        fields(repository_path = %repository.slug(), team = %config.team)
    )]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        repository: &Repository,
        owner: &User,
        config: &RepoConfig,
    ) -> Result<Roster> {
        let document = ctx
            .api_service
            .contents_get(
                &owner.token,
                &repository.owner,
                &repository.name,
                ROSTER_FILE_PATH,
            )
            .await;

        match document {
            Ok(Some(document)) => return Ok(Roster::parse(&document)?),
            Ok(None) => {
                debug!(
                    repository_path = %repository.slug(),
                    message = "No maintainers file, using team members"
                );
            }
            Err(e) => {
                warn!(
                    repository_path = %repository.slug(),
                    error = %e,
                    message = "Could not fetch maintainers file, using team members"
                );
            }
        }

        let fetch_team_members: &dyn FetchTeamMembersInterface = ctx.core_module.resolve_ref();
        match fetch_team_members
            .run(ctx, &owner.token, &repository.owner, &config.team)
            .await
        {
            Ok(members) => Ok(Roster::from_logins(members)),
            Err(e) => {
                warn!(
                    repository_path = %repository.slug(),
                    team = %config.team,
                    error = %e,
                    message = "Could not list team members"
                );
                Err(DomainError::RosterUnavailable {
                    repository_path: repository.slug(),
                    team: config.team.clone(),
                })
            }
        }
    }
}
