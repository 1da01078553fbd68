use std::time::Duration;

use async_trait::async_trait;
use shaku::{Component, Interface};
use tracing::warn;

use crate::{CoreContext, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait FetchTeamMembersInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        token: &str,
        organization: &str,
        team: &str,
    ) -> Result<Vec<String>>;
}

/// List the logins of a team, through the cache.
#[derive(Component)]
#[shaku(interface = FetchTeamMembersInterface)]
pub(crate) struct FetchTeamMembers;

impl FetchTeamMembers {
    fn cache_key(organization: &str, team: &str) -> String {
        format!("members:{organization}:{team}")
    }

    async fn read_cache<'a>(ctx: &CoreContext<'a>, key: &str) -> Option<Vec<String>> {
        let value = match ctx.cache_service.get_resource(key).await {
            Ok(value) => value?,
            Err(e) => {
                warn!(key = key, error = %e, message = "Could not read team members from cache");
                return None;
            }
        };

        match serde_json::from_str(&value) {
            Ok(members) => Some(members),
            Err(e) => {
                warn!(key = key, error = %e, message = "Invalid cached team members, ignoring");
                None
            }
        }
    }

    async fn write_cache<'a>(ctx: &CoreContext<'a>, key: &str, members: &[String]) {
        let value = match serde_json::to_string(members) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = key, error = %e, message = "Could not serialize team members");
                return;
            }
        };

        let ttl = Duration::from_secs(ctx.config.cache.ttl_seconds);
        if let Err(e) = ctx.cache_service.set_resource(key, &value, ttl).await {
            warn!(key = key, error = %e, message = "Could not write team members to cache");
        }
    }
}

#[async_trait]
impl FetchTeamMembersInterface for FetchTeamMembers {
    #[tracing::instrument(skip(self, ctx, token))]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        token: &str,
        organization: &str,
        team: &str,
    ) -> Result<Vec<String>> {
        let key = Self::cache_key(organization, team);
        if let Some(members) = Self::read_cache(ctx, &key).await {
            return Ok(members);
        }

        let members = ctx
            .api_service
            .teams_members_list(token, organization, team)
            .await?;
        Self::write_cache(ctx, &key, &members).await;

        Ok(members)
    }
}

#[cfg(test)]
mod tests {
    use lgtm_cache_interface::CacheError;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::context::tests::CoreContextTest;

    #[tokio::test]
    async fn cache_hit() {
        let mut ctx = CoreContextTest::new();
        ctx.cache_service
            .expect_get_resource()
            .once()
            .withf(|key| key == "members:owner:MAINTAINERS")
            .return_once(|_| Ok(Some(r#"["alice","bob"]"#.into())));

        let members = FetchTeamMembers
            .run(&ctx.as_context(), "token", "owner", "MAINTAINERS")
            .await
            .unwrap();

        assert_eq!(members, vec!["alice".to_string(), "bob".to_string()]);
    }

    #[tokio::test]
    async fn cache_miss() {
        let mut ctx = CoreContextTest::new();
        ctx.config.cache.ttl_seconds = 60;
        ctx.cache_service
            .expect_get_resource()
            .once()
            .return_once(|_| Ok(None));
        ctx.api_service
            .expect_teams_members_list()
            .once()
            .withf(|token, organization, team| {
                token == "token" && organization == "owner" && team == "MAINTAINERS"
            })
            .return_once(|_, _, _| Ok(vec!["alice".into()]));
        ctx.cache_service
            .expect_set_resource()
            .once()
            .withf(|key, value, ttl| {
                key == "members:owner:MAINTAINERS"
                    && value == r#"["alice"]"#
                    && *ttl == Duration::from_secs(60)
            })
            .return_once(|_, _, _| Ok(()));

        let members = FetchTeamMembers
            .run(&ctx.as_context(), "token", "owner", "MAINTAINERS")
            .await
            .unwrap();

        assert_eq!(members, vec!["alice".to_string()]);
    }

    #[tokio::test]
    async fn cache_failures_are_misses() {
        let mut ctx = CoreContextTest::new();
        ctx.cache_service
            .expect_get_resource()
            .once()
            .return_once(|_| {
                Err(CacheError::ImplementationError {
                    source: "down".into(),
                })
            });
        ctx.api_service
            .expect_teams_members_list()
            .once()
            .return_once(|_, _, _| Ok(vec!["alice".into()]));
        ctx.cache_service
            .expect_set_resource()
            .once()
            .return_once(|_, _, _| {
                Err(CacheError::ImplementationError {
                    source: "down".into(),
                })
            });

        let members = FetchTeamMembers
            .run(&ctx.as_context(), "token", "owner", "MAINTAINERS")
            .await
            .unwrap();

        assert_eq!(members, vec!["alice".to_string()]);
    }
}
