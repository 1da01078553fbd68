use std::{
    collections::HashMap,
    sync::RwLock,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use lgtm_cache_interface::{CacheError, CacheService};

#[derive(Debug)]
struct CacheEntry {
    value: String,
    expires_at: Instant,
}

/// In-memory cache service, with per-entry expiration.
#[derive(Debug, Default)]
pub struct MemoryCacheService {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryCacheService {
    /// Creates an empty in-memory cache.
    pub fn new() -> Self {
        Default::default()
    }
}

#[async_trait]
impl CacheService for MemoryCacheService {
    #[tracing::instrument(skip(self), ret)]
    async fn get_resource(&self, name: &str) -> Result<Option<String>, CacheError> {
        let now = Instant::now();
        let value = self
            .entries
            .read()
            .unwrap()
            .get(name)
            .filter(|e| e.expires_at > now)
            .map(|e| e.value.clone());

        if value.is_none() {
            // Expired entries are removed lazily.
            self.entries
                .write()
                .unwrap()
                .retain(|_, e| e.expires_at > now);
        }

        Ok(value)
    }

    #[tracing::instrument(skip(self, value))]
    async fn set_resource(
        &self,
        name: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        self.entries.write().unwrap().insert(
            name.into(),
            CacheEntry {
                value: value.into(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn del_resource(&self, name: &str) -> Result<(), CacheError> {
        self.entries.write().unwrap().remove(name);
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn health_check(&self) -> Result<(), CacheError> {
        Ok(())
    }
}
