use async_trait::async_trait;

use crate::{
    types::{GhCombinedStatus, GhCommitStatusState, GhIssueComment, GhPullRequest},
    Result,
};

/// GitHub API Adapter interface.
///
/// Every call is authenticated with the token of the repository owner.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ApiService: Send + Sync {
    /// Get a file content from the default branch, `None` when it does not exist.
    async fn contents_get(
        &self,
        token: &str,
        owner: &str,
        name: &str,
        path: &str,
    ) -> Result<Option<String>>;
    /// List comments of an issue, oldest first.
    async fn comments_list(
        &self,
        token: &str,
        owner: &str,
        name: &str,
        issue_number: u64,
    ) -> Result<Vec<GhIssueComment>>;
    /// Get a pull request from its number.
    async fn pulls_get(
        &self,
        token: &str,
        owner: &str,
        name: &str,
        issue_number: u64,
    ) -> Result<GhPullRequest>;
    /// Merge a pull request, returning the merge commit SHA.
    async fn pulls_merge(
        &self,
        token: &str,
        owner: &str,
        name: &str,
        issue_number: u64,
        commit_message: &str,
    ) -> Result<String>;
    /// List pull requests associated with a commit.
    async fn commits_pulls_list(
        &self,
        token: &str,
        owner: &str,
        name: &str,
        sha: &str,
    ) -> Result<Vec<GhPullRequest>>;
    /// Update commit status.
    async fn commit_statuses_update(
        &self,
        token: &str,
        owner: &str,
        name: &str,
        git_ref: &str,
        state: GhCommitStatusState,
        context: &str,
        description: &str,
    ) -> Result<()>;
    /// Get the combined commit status of a reference.
    async fn commit_statuses_combined(
        &self,
        token: &str,
        owner: &str,
        name: &str,
        git_ref: &str,
    ) -> Result<GhCombinedStatus>;
    /// List tag names of a repository.
    async fn tags_list(&self, token: &str, owner: &str, name: &str) -> Result<Vec<String>>;
    /// Create an annotated tag pointing to a commit.
    async fn tags_create(
        &self,
        token: &str,
        owner: &str,
        name: &str,
        tag: &str,
        sha: &str,
        message: &str,
    ) -> Result<()>;
    /// Merge a branch into another, returning the merge commit SHA if anything was merged.
    async fn branches_merge(
        &self,
        token: &str,
        owner: &str,
        name: &str,
        base: &str,
        head: &str,
        commit_message: &str,
    ) -> Result<Option<String>>;
    /// List member logins of an organization team, matched by name.
    async fn teams_members_list(
        &self,
        token: &str,
        organization: &str,
        team: &str,
    ) -> Result<Vec<String>>;
}
