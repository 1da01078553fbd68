use std::{
    collections::HashMap,
    io::{Read, Write},
};

use lgtm_models::{Repository, User};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{DatabaseError, DbService, Result};

#[derive(Debug, Default, Serialize, Deserialize)]
struct ExchangeData {
    #[serde(default)]
    users: Vec<User>,
    #[serde(default)]
    repositories: Vec<Repository>,
}

pub struct Exchanger;

impl Exchanger {
    pub async fn export_to_json<W: Write>(
        db_service: &dyn DbService,
        writer: &mut W,
    ) -> Result<()> {
        let data = ExchangeData {
            users: db_service.users_all().await?,
            repositories: db_service.repositories_all().await?,
        };

        serde_json::to_writer_pretty(writer, &data)
            .map_err(|e| DatabaseError::ExchangeJsonError { source: e })?;

        Ok(())
    }

    /// Import users then repositories, remapping repository owners to the new user IDs.
    pub async fn import_from_json<R: Read>(db_service: &dyn DbService, reader: R) -> Result<()> {
        let data: ExchangeData = serde_json::from_reader(reader)
            .map_err(|e| DatabaseError::ExchangeJsonError { source: e })?;

        let mut user_id_map = HashMap::new();

        for user in data.users {
            info!(login = %user.login, message = "Importing user");

            let user_id = user.id;
            let new_user = Self::create_or_update_user(db_service, user).await?;
            user_id_map.insert(user_id, new_user.id);
        }

        for mut repository in data.repositories {
            info!(
                repository_path = %repository.slug(),
                message = "Importing repository"
            );

            repository.user_id = *user_id_map
                .get(&repository.user_id)
                .ok_or(DatabaseError::UnknownUserId(repository.user_id))?;
            Self::create_or_update_repository(db_service, repository).await?;
        }

        Ok(())
    }

    async fn create_or_update_user(db_service: &dyn DbService, mut user: User) -> Result<User> {
        match db_service.users_get(&user.login).await? {
            Some(existing) => {
                user.id = existing.id;
                db_service.users_update(user).await
            }
            None => db_service.users_create(user).await,
        }
    }

    async fn create_or_update_repository(
        db_service: &dyn DbService,
        mut repository: Repository,
    ) -> Result<Repository> {
        match db_service
            .repositories_get(&repository.owner, &repository.name)
            .await?
        {
            Some(existing) => {
                repository.id = existing.id;
                db_service.repositories_update(repository).await
            }
            None => db_service.repositories_create(repository).await,
        }
    }
}
