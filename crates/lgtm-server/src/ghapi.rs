//! GitHub Api wrappers.

use async_trait::async_trait;
use lgtm_config::Config;
use lgtm_ghapi_github::GithubApiService;
use lgtm_ghapi_interface::{
    types::{GhCombinedStatus, GhCommitStatusState, GhIssueComment, GhPullRequest},
    ApiService, Result,
};

use crate::metrics::record_api_call;

/// GitHub Api Service with metrics.
pub struct MetricsApiService {
    inner: GithubApiService,
}

impl MetricsApiService {
    /// Creates a new service.
    pub fn new(config: Config) -> Self {
        Self {
            inner: GithubApiService::new(config),
        }
    }
}

#[async_trait]
impl ApiService for MetricsApiService {
    async fn contents_get(
        &self,
        token: &str,
        owner: &str,
        name: &str,
        path: &str,
    ) -> Result<Option<String>> {
        record_api_call("contents_get");
        self.inner.contents_get(token, owner, name, path).await
    }

    async fn comments_list(
        &self,
        token: &str,
        owner: &str,
        name: &str,
        issue_number: u64,
    ) -> Result<Vec<GhIssueComment>> {
        record_api_call("comments_list");
        self.inner
            .comments_list(token, owner, name, issue_number)
            .await
    }

    async fn pulls_get(
        &self,
        token: &str,
        owner: &str,
        name: &str,
        issue_number: u64,
    ) -> Result<GhPullRequest> {
        record_api_call("pulls_get");
        self.inner.pulls_get(token, owner, name, issue_number).await
    }

    async fn pulls_merge(
        &self,
        token: &str,
        owner: &str,
        name: &str,
        issue_number: u64,
        commit_message: &str,
    ) -> Result<String> {
        record_api_call("pulls_merge");
        self.inner
            .pulls_merge(token, owner, name, issue_number, commit_message)
            .await
    }

    async fn commits_pulls_list(
        &self,
        token: &str,
        owner: &str,
        name: &str,
        sha: &str,
    ) -> Result<Vec<GhPullRequest>> {
        record_api_call("commits_pulls_list");
        self.inner.commits_pulls_list(token, owner, name, sha).await
    }

    async fn commit_statuses_update(
        &self,
        token: &str,
        owner: &str,
        name: &str,
        git_ref: &str,
        state: GhCommitStatusState,
        context: &str,
        description: &str,
    ) -> Result<()> {
        record_api_call("commit_statuses_update");
        self.inner
            .commit_statuses_update(token, owner, name, git_ref, state, context, description)
            .await
    }

    async fn commit_statuses_combined(
        &self,
        token: &str,
        owner: &str,
        name: &str,
        git_ref: &str,
    ) -> Result<GhCombinedStatus> {
        record_api_call("commit_statuses_combined");
        self.inner
            .commit_statuses_combined(token, owner, name, git_ref)
            .await
    }

    async fn tags_list(&self, token: &str, owner: &str, name: &str) -> Result<Vec<String>> {
        record_api_call("tags_list");
        self.inner.tags_list(token, owner, name).await
    }

    async fn tags_create(
        &self,
        token: &str,
        owner: &str,
        name: &str,
        tag: &str,
        sha: &str,
        message: &str,
    ) -> Result<()> {
        record_api_call("tags_create");
        self.inner
            .tags_create(token, owner, name, tag, sha, message)
            .await
    }

    async fn branches_merge(
        &self,
        token: &str,
        owner: &str,
        name: &str,
        base: &str,
        head: &str,
        commit_message: &str,
    ) -> Result<Option<String>> {
        record_api_call("branches_merge");
        self.inner
            .branches_merge(token, owner, name, base, head, commit_message)
            .await
    }

    async fn teams_members_list(
        &self,
        token: &str,
        organization: &str,
        team: &str,
    ) -> Result<Vec<String>> {
        record_api_call("teams_members_list");
        self.inner
            .teams_members_list(token, organization, team)
            .await
    }
}
