use std::{collections::HashMap, sync::RwLock};

use async_trait::async_trait;
use lgtm_database_interface::{DbService, Result};
use lgtm_models::{Repository, User};

#[derive(Debug, Default)]
pub struct MemoryDb {
    repositories: RwLock<HashMap<u64, Repository>>,
    users: RwLock<HashMap<u64, User>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Default::default()
    }

    fn get_last_repository_id(&self) -> u64 {
        self.repositories
            .read()
            .unwrap()
            .keys()
            .max()
            .copied()
            .unwrap_or(0)
            + 1
    }

    fn get_last_user_id(&self) -> u64 {
        self.users
            .read()
            .unwrap()
            .keys()
            .max()
            .copied()
            .unwrap_or(0)
            + 1
    }
}

#[async_trait]
impl DbService for MemoryDb {
    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    ///////////////
    // Repositories

    async fn repositories_create(&self, mut instance: Repository) -> Result<Repository> {
        self.users_get_from_id_expect(instance.user_id).await?;

        let id = self.get_last_repository_id();
        instance.id = id;
        self.repositories
            .write()
            .unwrap()
            .insert(instance.id, instance.clone());
        Ok(instance)
    }

    async fn repositories_update(&self, instance: Repository) -> Result<Repository> {
        assert!(instance.id != 0);
        self.repositories
            .write()
            .unwrap()
            .insert(instance.id, instance.clone());
        Ok(instance)
    }

    async fn repositories_all(&self) -> Result<Vec<Repository>> {
        let mut values: Vec<_> = self
            .repositories
            .read()
            .unwrap()
            .values()
            .cloned()
            .collect();
        values.sort_by_key(|r| r.id);
        Ok(values)
    }

    async fn repositories_get(&self, owner: &str, name: &str) -> Result<Option<Repository>> {
        Ok(self
            .repositories
            .read()
            .unwrap()
            .values()
            .find(|v| v.owner == owner && v.name == name)
            .cloned())
    }

    ////////
    // Users

    async fn users_create(&self, mut instance: User) -> Result<User> {
        let id = self.get_last_user_id();
        instance.id = id;
        self.users
            .write()
            .unwrap()
            .insert(instance.id, instance.clone());
        Ok(instance)
    }

    async fn users_update(&self, instance: User) -> Result<User> {
        assert!(instance.id != 0);
        self.users
            .write()
            .unwrap()
            .insert(instance.id, instance.clone());
        Ok(instance)
    }

    async fn users_all(&self) -> Result<Vec<User>> {
        let mut values: Vec<_> = self.users.read().unwrap().values().cloned().collect();
        values.sort_by_key(|u| u.id);
        Ok(values)
    }

    async fn users_get(&self, login: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .read()
            .unwrap()
            .values()
            .find(|u| u.login == login)
            .cloned())
    }

    async fn users_get_from_id(&self, id: u64) -> Result<Option<User>> {
        Ok(self.users.read().unwrap().get(&id).cloned())
    }
}
