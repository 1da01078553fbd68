//! Null driver for GH API.

#![warn(missing_docs)]
#![warn(clippy::all)]

use async_trait::async_trait;
use lgtm_ghapi_interface::{
    types::{GhCombinedStatus, GhCommitStatusState, GhIssueComment, GhPullRequest, GhUser},
    ApiService, Result,
};

/// Null API service.
#[derive(Clone, Default)]
pub struct NullApiService {
    _private: (),
}

impl NullApiService {
    /// Build a null API service.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

#[async_trait]
impl ApiService for NullApiService {
    #[tracing::instrument(skip(self, _token), ret)]
    async fn contents_get(
        &self,
        _token: &str,
        owner: &str,
        name: &str,
        path: &str,
    ) -> Result<Option<String>> {
        Ok(None)
    }

    #[tracing::instrument(skip(self, _token))]
    async fn comments_list(
        &self,
        _token: &str,
        owner: &str,
        name: &str,
        issue_number: u64,
    ) -> Result<Vec<GhIssueComment>> {
        Ok(vec![])
    }

    #[tracing::instrument(skip(self, _token))]
    async fn pulls_get(
        &self,
        _token: &str,
        owner: &str,
        name: &str,
        issue_number: u64,
    ) -> Result<GhPullRequest> {
        Ok(GhPullRequest {
            number: issue_number,
            user: GhUser {
                login: owner.into(),
            },
            mergeable: Some(true),
            ..Default::default()
        })
    }

    #[tracing::instrument(skip(self, _token), ret)]
    async fn pulls_merge(
        &self,
        _token: &str,
        owner: &str,
        name: &str,
        issue_number: u64,
        commit_message: &str,
    ) -> Result<String> {
        Ok(String::new())
    }

    #[tracing::instrument(skip(self, _token))]
    async fn commits_pulls_list(
        &self,
        _token: &str,
        owner: &str,
        name: &str,
        sha: &str,
    ) -> Result<Vec<GhPullRequest>> {
        Ok(vec![])
    }

    #[tracing::instrument(skip(self, _token))]
    async fn commit_statuses_update(
        &self,
        _token: &str,
        owner: &str,
        name: &str,
        git_ref: &str,
        state: GhCommitStatusState,
        context: &str,
        description: &str,
    ) -> Result<()> {
        Ok(())
    }

    #[tracing::instrument(skip(self, _token))]
    async fn commit_statuses_combined(
        &self,
        _token: &str,
        owner: &str,
        name: &str,
        git_ref: &str,
    ) -> Result<GhCombinedStatus> {
        Ok(GhCombinedStatus {
            state: GhCommitStatusState::Success,
            statuses: vec![],
        })
    }

    #[tracing::instrument(skip(self, _token), ret)]
    async fn tags_list(&self, _token: &str, owner: &str, name: &str) -> Result<Vec<String>> {
        Ok(vec![])
    }

    #[tracing::instrument(skip(self, _token))]
    async fn tags_create(
        &self,
        _token: &str,
        owner: &str,
        name: &str,
        tag: &str,
        sha: &str,
        message: &str,
    ) -> Result<()> {
        Ok(())
    }

    #[tracing::instrument(skip(self, _token), ret)]
    async fn branches_merge(
        &self,
        _token: &str,
        owner: &str,
        name: &str,
        base: &str,
        head: &str,
        commit_message: &str,
    ) -> Result<Option<String>> {
        Ok(None)
    }

    #[tracing::instrument(skip(self, _token), ret)]
    async fn teams_members_list(
        &self,
        _token: &str,
        organization: &str,
        team: &str,
    ) -> Result<Vec<String>> {
        Ok(vec![])
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn null_pull_request_is_mergeable() {
        let api = NullApiService::new();
        let pr = api.pulls_get("", "owner", "name", 3).await.unwrap();
        assert_eq!(pr.number, 3);
        assert_eq!(pr.user.login, "owner");
        assert_eq!(pr.mergeable, Some(true));
        assert_eq!(api.contents_get("", "owner", "name", ".lgtm").await.unwrap(), None);
    }
}
