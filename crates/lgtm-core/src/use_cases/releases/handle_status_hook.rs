use async_trait::async_trait;
use lgtm_models::{PullRequestSnapshot, StatusHook};
use shaku::{Component, HasComponent, Interface};
use tracing::{debug, info, warn};

use super::{ComputeNextVersionInterface, MergedPullRequest, ReleaseReport, TAG_MESSAGE};
use crate::{
    use_cases::{
        approvals::ComputeApprovalsInterface,
        pulls::{ListCommitPullRequestsInterface, MergePullRequestInterface},
        repositories::{RepositoryContext, ResolveRepositoryContextInterface},
    },
    versions::VersionStrategy,
    CoreContext, DomainError, Result,
};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait HandleStatusHookInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, hook: &StatusHook) -> Result<ReleaseReport>;
}

/// Merge, then optionally tag, every ready pull request containing a
/// successful commit.
///
/// Per pull request failures are collected and do not stop the batch.
#[derive(Component)]
#[shaku(interface = HandleStatusHookInterface)]
pub(crate) struct HandleStatusHook;

fn failure(snapshot: &PullRequestSnapshot, step: &str, error: &DomainError) -> String {
    warn!(
        pr_number = snapshot.issue.number,
        title = %snapshot.issue.title,
        step = step,
        error = %error,
        message = "Release step failed"
    );

    format!(
        "#{} '{}': could not {}: {}",
        snapshot.issue.number, snapshot.issue.title, step, error
    )
}

impl HandleStatusHook {
    async fn tag<'a>(
        ctx: &CoreContext<'a>,
        repo_ctx: &RepositoryContext,
        version: &str,
        sha: &str,
    ) -> Result<()> {
        ctx.api_service
            .tags_create(
                repo_ctx.token(),
                repo_ctx.repo_owner(),
                repo_ctx.repo_name(),
                version,
                sha,
                TAG_MESSAGE,
            )
            .await?;

        Ok(())
    }
}

#[async_trait]
impl HandleStatusHookInterface for HandleStatusHook {
    #[tracing::instrument(skip_all, fields(repository_path = %hook.repo.slug, sha = %hook.sha))]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, hook: &StatusHook) -> Result<ReleaseReport> {
        let resolve_context: &dyn ResolveRepositoryContextInterface =
            ctx.core_module.resolve_ref();
        let repo_ctx = resolve_context.run(ctx, &hook.repo).await?;

        let mut report = ReleaseReport::default();
        if !repo_ctx.config.do_merge {
            debug!(
                repository_path = %hook.repo.slug,
                message = "Merging disabled, nothing to do"
            );
            return Ok(report);
        }

        // Strategies are checked before anything gets merged.
        ctx.approval_registry
            .lookup(&repo_ctx.config.approval_algorithm)?;
        let strategy = if repo_ctx.config.do_version {
            Some(
                repo_ctx
                    .config
                    .version_algorithm
                    .parse::<VersionStrategy>()?,
            )
        } else {
            None
        };

        let list_pulls: &dyn ListCommitPullRequestsInterface = ctx.core_module.resolve_ref();
        let snapshots = list_pulls.run(ctx, &repo_ctx, &hook.sha).await?;

        let compute_approvals: &dyn ComputeApprovalsInterface = ctx.core_module.resolve_ref();
        let merge_pull_request: &dyn MergePullRequestInterface = ctx.core_module.resolve_ref();
        let compute_version: &dyn ComputeNextVersionInterface = ctx.core_module.resolve_ref();

        for snapshot in snapshots.iter().filter(|s| s.is_ready_to_merge()) {
            let approvals = match compute_approvals.run(ctx, &repo_ctx, &snapshot.issue).await {
                Ok(approvals) => approvals,
                Err(e) => {
                    report
                        .failures
                        .push(failure(snapshot, "fetch comments", &e));
                    continue;
                }
            };

            let sha = match merge_pull_request
                .run(ctx, &repo_ctx, &snapshot.issue, &approvals)
                .await
            {
                Ok(sha) => sha,
                Err(e) => {
                    report.failures.push(failure(snapshot, "merge", &e));
                    continue;
                }
            };

            let title = snapshot.issue.title.clone();
            let first_under_title = !report.merged.contains_key(&title);
            if first_under_title {
                report.merged.insert(
                    title.clone(),
                    MergedPullRequest {
                        sha: sha.clone(),
                        version: None,
                    },
                );
            } else {
                warn!(
                    pr_number = snapshot.issue.number,
                    title = %title,
                    sha = %sha,
                    message = "Title already reported, keeping the first merge"
                );
            }

            let Some(strategy) = strategy else {
                continue;
            };

            let version = match compute_version
                .run(ctx, &repo_ctx, strategy, &approvals)
                .await
            {
                Ok(version) => version,
                Err(e) => {
                    report
                        .failures
                        .push(failure(snapshot, "compute version", &e));
                    continue;
                }
            };

            match Self::tag(ctx, &repo_ctx, &version, &sha).await {
                Ok(()) => {
                    info!(
                        pr_number = snapshot.issue.number,
                        version = %version,
                        sha = %sha,
                        message = "Tagged release"
                    );
                    if first_under_title {
                        if let Some(merged) = report.merged.get_mut(&title) {
                            merged.version = Some(version);
                        }
                    }
                }
                Err(e) => report.failures.push(failure(snapshot, "tag", &e)),
            }
        }

        info!(
            repository_path = %hook.repo.slug,
            merged = report.merged.len(),
            failures = report.failures.len(),
            message = "Processed release pass"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use lgtm_config::RepositoryDefaultsConfig;
    use lgtm_ghapi_interface::ApiError;
    use lgtm_models::{CheckState, Comment, Issue, Person, RepoConfig, RepositoryRef, Roster};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        approvals::Approval,
        context::tests::CoreContextTest,
        use_cases::{
            approvals::{compute_approvals::tests::repo_ctx, MockComputeApprovalsInterface},
            pulls::MockListCommitPullRequestsInterface,
            repositories::MockResolveRepositoryContextInterface,
        },
        versions::VersionStrategyError,
        CoreModule,
    };

    fn hook() -> StatusHook {
        StatusHook {
            repo: RepositoryRef {
                owner: "owner".into(),
                name: "name".into(),
                slug: "owner/name".into(),
            },
            sha: "abcdef".into(),
        }
    }

    fn snapshot(number: u64, check_state: CheckState) -> PullRequestSnapshot {
        PullRequestSnapshot {
            issue: Issue {
                number,
                title: format!("PR {number}"),
                author: "carol".into(),
            },
            branch: format!("branch-{number}"),
            check_state,
            mergeable: true,
        }
    }

    fn config(document: &str) -> RepoConfig {
        RepoConfig::parse(document, &RepositoryDefaultsConfig::default()).unwrap()
    }

    /// Mock resolution, listing and approvals around the real merge and
    /// version use cases.
    fn arrange(ctx: &mut CoreContextTest, config: RepoConfig, snapshots: Vec<PullRequestSnapshot>) {
        let mut resolve_context = MockResolveRepositoryContextInterface::new();
        resolve_context
            .expect_run()
            .return_once(move |_, _| Ok(repo_ctx(config, Roster::from_logins(["alice"]))));

        let mut list_pulls = MockListCommitPullRequestsInterface::new();
        list_pulls
            .expect_run()
            .withf(|_, _, sha| sha == "abcdef")
            .return_once(move |_, _, _| Ok(snapshots));

        let mut compute_approvals = MockComputeApprovalsInterface::new();
        compute_approvals.expect_run().returning(|_, _, _| {
            Ok(vec![Approval::new(
                Person::from_login("alice"),
                Comment::new("alice", "LGTM 0.1.0"),
            )])
        });

        ctx.core_module = CoreModule::builder()
            .with_component_override::<dyn ResolveRepositoryContextInterface>(Box::new(
                resolve_context,
            ))
            .with_component_override::<dyn ListCommitPullRequestsInterface>(Box::new(list_pulls))
            .with_component_override::<dyn ComputeApprovalsInterface>(Box::new(compute_approvals))
            .build();
    }

    #[tokio::test]
    async fn merge_without_version() {
        let mut ctx = CoreContextTest::new();
        arrange(
            &mut ctx,
            config("do_merge = true"),
            vec![snapshot(1, CheckState::Success)],
        );
        ctx.api_service
            .expect_pulls_merge()
            .once()
            .withf(|_, _, _, number, message| {
                *number == 1 && message == "Merged by LGTM\nApproved by:\n(@alice)\n"
            })
            .return_once(|_, _, _, _, _| Ok("merged-sha".into()));
        ctx.api_service.expect_tags_list().never();
        ctx.api_service.expect_tags_create().never();

        let report = HandleStatusHook
            .run(&ctx.as_context(), &hook())
            .await
            .unwrap();

        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            serde_json::json!({
                "merged": {"PR 1": {"sha": "merged-sha"}},
                "failures": []
            })
        );
    }

    #[tokio::test]
    async fn merging_disabled() {
        let mut ctx = CoreContextTest::new();
        arrange(&mut ctx, config(""), vec![snapshot(1, CheckState::Success)]);
        ctx.api_service.expect_pulls_merge().never();

        let report = HandleStatusHook
            .run(&ctx.as_context(), &hook())
            .await
            .unwrap();

        assert_eq!(report, ReleaseReport::default());
    }

    #[tokio::test]
    async fn only_ready_pull_requests_are_merged() {
        let mut ctx = CoreContextTest::new();
        let mut conflicting = snapshot(3, CheckState::Success);
        conflicting.mergeable = false;
        arrange(
            &mut ctx,
            config("do_merge = true"),
            vec![
                snapshot(1, CheckState::Pending),
                snapshot(2, CheckState::Success),
                conflicting,
            ],
        );
        ctx.api_service
            .expect_pulls_merge()
            .once()
            .withf(|_, _, _, number, _| *number == 2)
            .return_once(|_, _, _, _, _| Ok("sha-2".into()));

        let report = HandleStatusHook
            .run(&ctx.as_context(), &hook())
            .await
            .unwrap();

        assert_eq!(report.merged.keys().collect::<Vec<_>>(), vec!["PR 2"]);
    }

    #[tokio::test]
    async fn merge_failure_does_not_stop_the_batch() {
        let mut ctx = CoreContextTest::new();
        arrange(
            &mut ctx,
            config("do_merge = true"),
            vec![snapshot(1, CheckState::Success), snapshot(2, CheckState::Success)],
        );
        ctx.api_service
            .expect_pulls_merge()
            .once()
            .withf(|_, _, _, number, _| *number == 1)
            .return_once(|_, _, _, _, _| {
                Err(ApiError::MergeError {
                    pr_number: 1,
                    repository_path: "owner/name".into(),
                    message: "Head branch was modified".into(),
                })
            });
        ctx.api_service
            .expect_pulls_merge()
            .once()
            .withf(|_, _, _, number, _| *number == 2)
            .return_once(|_, _, _, _, _| Ok("sha-2".into()));

        let report = HandleStatusHook
            .run(&ctx.as_context(), &hook())
            .await
            .unwrap();

        assert_eq!(
            report.merged.get("PR 2"),
            Some(&MergedPullRequest {
                sha: "sha-2".into(),
                version: None
            })
        );
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].starts_with("#1 'PR 1': could not merge"));
    }

    #[tokio::test]
    async fn merge_and_tag_semver() {
        let mut ctx = CoreContextTest::new();
        arrange(
            &mut ctx,
            config("do_merge = true\ndo_version = true"),
            vec![snapshot(1, CheckState::Success)],
        );
        ctx.api_service
            .expect_pulls_merge()
            .once()
            .return_once(|_, _, _, _, _| Ok("merged-sha".into()));
        ctx.api_service
            .expect_tags_list()
            .once()
            .return_once(|_, _, _| Ok(vec!["0.0.1".into()]));
        ctx.api_service
            .expect_tags_create()
            .once()
            .withf(|token, _, _, tag, sha, message| {
                token == "token"
                    && tag == "0.1.0"
                    && sha == "merged-sha"
                    && message == "Tagged by LGTM"
            })
            .return_once(|_, _, _, _, _, _| Ok(()));

        let report = HandleStatusHook
            .run(&ctx.as_context(), &hook())
            .await
            .unwrap();

        assert_eq!(
            report.merged.get("PR 1"),
            Some(&MergedPullRequest {
                sha: "merged-sha".into(),
                version: Some("0.1.0".into())
            })
        );
        assert!(report.failures.is_empty());
    }

    #[tokio::test]
    async fn list_tags_failure_is_recorded() {
        let mut ctx = CoreContextTest::new();
        arrange(
            &mut ctx,
            config("do_merge = true\ndo_version = true"),
            vec![snapshot(1, CheckState::Success)],
        );
        ctx.api_service
            .expect_pulls_merge()
            .once()
            .return_once(|_, _, _, _, _| Ok("merged-sha".into()));
        ctx.api_service
            .expect_tags_list()
            .once()
            .return_once(|_, _, _| {
                Err(ApiError::ImplementationError {
                    source: "boom".into(),
                })
            });

        let report = HandleStatusHook
            .run(&ctx.as_context(), &hook())
            .await
            .unwrap();

        assert_eq!(report.merged["PR 1"].version, None);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].starts_with("#1 'PR 1': could not compute version"));
    }

    fn expect_merges(ctx: &mut CoreContextTest) {
        ctx.api_service
            .expect_pulls_merge()
            .once()
            .withf(|_, _, _, number, _| *number == 1)
            .return_once(|_, _, _, _, _| Ok("sha-1".into()));
        ctx.api_service
            .expect_pulls_merge()
            .once()
            .withf(|_, _, _, number, _| *number == 2)
            .return_once(|_, _, _, _, _| Ok("sha-2".into()));
        ctx.api_service
            .expect_tags_list()
            .times(2)
            .returning(|_, _, _| Ok(vec!["0.0.1".into()]));
    }

    fn expect_tag_failure_then_success(ctx: &mut CoreContextTest) {
        ctx.api_service
            .expect_tags_create()
            .once()
            .withf(|_, _, _, _, sha, _| sha == "sha-1")
            .return_once(|_, _, _, _, _, _| {
                Err(ApiError::ImplementationError {
                    source: "Reference already exists".into(),
                })
            });
        ctx.api_service
            .expect_tags_create()
            .once()
            .withf(|_, _, _, tag, sha, _| tag == "0.1.0" && sha == "sha-2")
            .return_once(|_, _, _, _, _, _| Ok(()));
    }

    #[tokio::test]
    async fn tag_failure_does_not_stop_the_batch() {
        let mut ctx = CoreContextTest::new();
        arrange(
            &mut ctx,
            config("do_merge = true\ndo_version = true"),
            vec![snapshot(1, CheckState::Success), snapshot(2, CheckState::Success)],
        );
        expect_merges(&mut ctx);
        expect_tag_failure_then_success(&mut ctx);

        let report = HandleStatusHook
            .run(&ctx.as_context(), &hook())
            .await
            .unwrap();

        assert_eq!(
            report.merged.get("PR 1"),
            Some(&MergedPullRequest {
                sha: "sha-1".into(),
                version: None
            })
        );
        assert_eq!(
            report.merged.get("PR 2"),
            Some(&MergedPullRequest {
                sha: "sha-2".into(),
                version: Some("0.1.0".into())
            })
        );
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].starts_with("#1 'PR 1': could not tag"));
    }

    #[tokio::test]
    async fn duplicate_titles_keep_the_first_merge() {
        let mut ctx = CoreContextTest::new();
        let mut second = snapshot(2, CheckState::Success);
        second.issue.title = "PR 1".into();
        arrange(
            &mut ctx,
            config("do_merge = true\ndo_version = true"),
            vec![snapshot(1, CheckState::Success), second],
        );
        expect_merges(&mut ctx);
        expect_tag_failure_then_success(&mut ctx);

        let report = HandleStatusHook
            .run(&ctx.as_context(), &hook())
            .await
            .unwrap();

        assert_eq!(report.merged.len(), 1);
        assert_eq!(
            report.merged.get("PR 1"),
            Some(&MergedPullRequest {
                sha: "sha-1".into(),
                version: None
            })
        );
    }

    #[tokio::test]
    async fn unknown_version_algorithm_aborts_before_merging() {
        let mut ctx = CoreContextTest::new();
        arrange(
            &mut ctx,
            config("do_merge = true\ndo_version = true\nversion_algorithm = \"calver\""),
            vec![snapshot(1, CheckState::Success)],
        );
        ctx.api_service.expect_pulls_merge().never();

        let result = HandleStatusHook.run(&ctx.as_context(), &hook()).await;

        assert!(matches!(
            result,
            Err(DomainError::VersionStrategyError {
                source: VersionStrategyError::UnknownAlgorithm { name }
            }) if name == "calver"
        ));
    }
}
