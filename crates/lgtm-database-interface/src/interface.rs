use async_trait::async_trait;
use lgtm_models::{Repository, User};

use crate::{DatabaseError, Result};

#[async_trait]
pub trait DbService: Send + Sync {
    async fn health_check(&self) -> Result<()>;
    async fn repositories_create(&self, instance: Repository) -> Result<Repository>;
    async fn repositories_update(&self, instance: Repository) -> Result<Repository>;
    async fn repositories_all(&self) -> Result<Vec<Repository>>;
    async fn repositories_get(&self, owner: &str, name: &str) -> Result<Option<Repository>>;
    async fn repositories_get_expect(&self, owner: &str, name: &str) -> Result<Repository> {
        self.repositories_get(owner, name)
            .await?
            .ok_or_else(|| DatabaseError::UnknownRepository(format!("{owner}/{name}")))
    }
    async fn users_create(&self, instance: User) -> Result<User>;
    async fn users_update(&self, instance: User) -> Result<User>;
    async fn users_all(&self) -> Result<Vec<User>>;
    async fn users_get(&self, login: &str) -> Result<Option<User>>;
    async fn users_get_from_id(&self, id: u64) -> Result<Option<User>>;
    async fn users_get_from_id_expect(&self, id: u64) -> Result<User> {
        self.users_get_from_id(id)
            .await?
            .ok_or(DatabaseError::UnknownUserId(id))
    }
}
