pub(crate) mod fetch_team_members;
pub(crate) mod resolve_repository;
pub(crate) mod resolve_repository_config;
pub(crate) mod resolve_repository_context;
pub(crate) mod resolve_roster;

use lgtm_models::{RepoConfig, Repository, Roster, User};

pub use fetch_team_members::FetchTeamMembersInterface;
pub use resolve_repository::ResolveRepositoryInterface;
pub use resolve_repository_config::ResolveRepositoryConfigInterface;
pub use resolve_repository_context::ResolveRepositoryContextInterface;
pub use resolve_roster::ResolveRosterInterface;

#[cfg(any(test, feature = "testkit"))]
pub use self::{
    fetch_team_members::MockFetchTeamMembersInterface,
    resolve_repository::MockResolveRepositoryInterface,
    resolve_repository_config::MockResolveRepositoryConfigInterface,
    resolve_repository_context::MockResolveRepositoryContextInterface,
    resolve_roster::MockResolveRosterInterface,
};

/// Everything needed to process an event on an activated repository.
#[derive(Debug, Clone)]
pub struct RepositoryContext {
    pub repository: Repository,
    pub owner: User,
    pub config: RepoConfig,
    pub roster: Roster,
}

impl RepositoryContext {
    /// Token used for every API call on this repository.
    pub fn token(&self) -> &str {
        &self.owner.token
    }

    pub fn repo_owner(&self) -> &str {
        &self.repository.owner
    }

    pub fn repo_name(&self) -> &str {
        &self.repository.name
    }
}
