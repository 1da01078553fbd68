use async_trait::async_trait;
use lgtm_ghapi_interface::types::GhCommitStatusState;
use lgtm_models::{CheckState, Issue, PullRequestSnapshot};
use shaku::{Component, Interface};
use tracing::debug;

use crate::{use_cases::repositories::RepositoryContext, CoreContext, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ListCommitPullRequestsInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        repo_ctx: &RepositoryContext,
        sha: &str,
    ) -> Result<Vec<PullRequestSnapshot>>;
}

/// Snapshot the pull requests containing a commit, with their check state
/// and mergeability.
#[derive(Component)]
#[shaku(interface = ListCommitPullRequestsInterface)]
pub(crate) struct ListCommitPullRequests;

fn check_state(state: GhCommitStatusState) -> CheckState {
    match state {
        GhCommitStatusState::Error => CheckState::Error,
        GhCommitStatusState::Failure => CheckState::Failure,
        GhCommitStatusState::Pending => CheckState::Pending,
        GhCommitStatusState::Success => CheckState::Success,
    }
}

#[async_trait]
impl ListCommitPullRequestsInterface for ListCommitPullRequests {
    #[tracing::instrument(
        skip(self, ctx, repo_ctx),
        fields(repository_path = %repo_ctx.repository.slug())
    )]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        repo_ctx: &RepositoryContext,
        sha: &str,
    ) -> Result<Vec<PullRequestSnapshot>> {
        let (token, owner, name) = (repo_ctx.token(), repo_ctx.repo_owner(), repo_ctx.repo_name());

        let pulls = ctx
            .api_service
            .commits_pulls_list(token, owner, name, sha)
            .await?;
        if pulls.is_empty() {
            return Ok(vec![]);
        }

        let combined = ctx
            .api_service
            .commit_statuses_combined(token, owner, name, sha)
            .await?;
        let state = check_state(combined.effective_state());

        let mut snapshots = Vec::with_capacity(pulls.len());
        for pull in pulls {
            // Listing by commit leaves mergeability unset.
            let upstream_pr = ctx
                .api_service
                .pulls_get(token, owner, name, pull.number)
                .await?;

            snapshots.push(PullRequestSnapshot {
                issue: Issue {
                    number: upstream_pr.number,
                    title: upstream_pr.title,
                    author: upstream_pr.user.login,
                },
                branch: upstream_pr.head.reference,
                check_state: state,
                mergeable: upstream_pr.mergeable.unwrap_or(true),
            });
        }

        debug!(
            sha = sha,
            count = snapshots.len(),
            check_state = ?state,
            message = "Listed pull requests for commit"
        );

        Ok(snapshots)
    }
}

#[cfg(test)]
mod tests {
    use lgtm_config::RepositoryDefaultsConfig;
    use lgtm_ghapi_interface::types::{
        GhBranch, GhCombinedStatus, GhCommitStatusItem, GhPullRequest, GhUser,
    };
    use lgtm_models::{RepoConfig, Roster};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        context::tests::CoreContextTest, use_cases::approvals::compute_approvals::tests::repo_ctx,
    };

    fn upstream_pr(number: u64, mergeable: Option<bool>) -> GhPullRequest {
        GhPullRequest {
            number,
            title: format!("PR {number}"),
            user: GhUser {
                login: "carol".into(),
            },
            head: GhBranch {
                reference: format!("branch-{number}"),
                sha: "abcdef".into(),
            },
            mergeable,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn snapshots() {
        let mut ctx = CoreContextTest::new();
        ctx.api_service
            .expect_commits_pulls_list()
            .once()
            .withf(|_, _, _, sha| sha == "abcdef")
            .return_once(|_, _, _, _| Ok(vec![upstream_pr(1, None), upstream_pr(2, None)]));
        ctx.api_service
            .expect_commit_statuses_combined()
            .once()
            .withf(|_, _, _, git_ref| git_ref == "abcdef")
            .return_once(|_, _, _, _| {
                Ok(GhCombinedStatus {
                    state: GhCommitStatusState::Success,
                    statuses: vec![GhCommitStatusItem {
                        state: GhCommitStatusState::Success,
                        context: "ci".into(),
                    }],
                })
            });
        ctx.api_service
            .expect_pulls_get()
            .once()
            .withf(|_, _, _, number| *number == 1)
            .return_once(|_, _, _, _| Ok(upstream_pr(1, None)));
        ctx.api_service
            .expect_pulls_get()
            .once()
            .withf(|_, _, _, number| *number == 2)
            .return_once(|_, _, _, _| Ok(upstream_pr(2, Some(false))));

        let repo_ctx = repo_ctx(
            RepoConfig::from_defaults(&RepositoryDefaultsConfig::default()),
            Roster::default(),
        );
        let snapshots = ListCommitPullRequests
            .run(&ctx.as_context(), &repo_ctx, "abcdef")
            .await
            .unwrap();

        assert_eq!(
            snapshots,
            vec![
                PullRequestSnapshot {
                    issue: Issue {
                        number: 1,
                        title: "PR 1".into(),
                        author: "carol".into(),
                    },
                    branch: "branch-1".into(),
                    check_state: CheckState::Success,
                    mergeable: true,
                },
                PullRequestSnapshot {
                    issue: Issue {
                        number: 2,
                        title: "PR 2".into(),
                        author: "carol".into(),
                    },
                    branch: "branch-2".into(),
                    check_state: CheckState::Success,
                    mergeable: false,
                },
            ]
        );
    }

    #[tokio::test]
    async fn downgraded_check_state() {
        let mut ctx = CoreContextTest::new();
        ctx.api_service
            .expect_commits_pulls_list()
            .once()
            .return_once(|_, _, _, _| Ok(vec![upstream_pr(1, Some(true))]));
        ctx.api_service
            .expect_commit_statuses_combined()
            .once()
            .return_once(|_, _, _, _| {
                Ok(GhCombinedStatus {
                    state: GhCommitStatusState::Success,
                    statuses: vec![GhCommitStatusItem {
                        state: GhCommitStatusState::Pending,
                        context: "approvals/lgtm".into(),
                    }],
                })
            });
        ctx.api_service
            .expect_pulls_get()
            .once()
            .return_once(|_, _, _, _| Ok(upstream_pr(1, Some(true))));

        let repo_ctx = repo_ctx(
            RepoConfig::from_defaults(&RepositoryDefaultsConfig::default()),
            Roster::default(),
        );
        let snapshots = ListCommitPullRequests
            .run(&ctx.as_context(), &repo_ctx, "abcdef")
            .await
            .unwrap();

        assert_eq!(snapshots[0].check_state, CheckState::Pending);
        assert!(!snapshots[0].is_ready_to_merge());
    }

    #[tokio::test]
    async fn no_pull_request() {
        let mut ctx = CoreContextTest::new();
        ctx.api_service
            .expect_commits_pulls_list()
            .once()
            .return_once(|_, _, _, _| Ok(vec![]));

        let repo_ctx = repo_ctx(
            RepoConfig::from_defaults(&RepositoryDefaultsConfig::default()),
            Roster::default(),
        );
        let snapshots = ListCommitPullRequests
            .run(&ctx.as_context(), &repo_ctx, "abcdef")
            .await
            .unwrap();

        assert!(snapshots.is_empty());
    }
}
