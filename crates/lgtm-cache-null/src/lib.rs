use std::time::Duration;

use async_trait::async_trait;
use lgtm_cache_interface::{CacheError, CacheService};

/// Null cache service, never storing anything.
#[derive(Clone, Default)]
pub struct NullCacheService {
    _private: (),
}

impl NullCacheService {
    /// Creates a null cache service.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

#[async_trait]
impl CacheService for NullCacheService {
    #[tracing::instrument(skip(self), ret)]
    async fn get_resource(&self, name: &str) -> Result<Option<String>, CacheError> {
        Ok(None)
    }

    #[tracing::instrument(skip(self, _value))]
    async fn set_resource(
        &self,
        name: &str,
        _value: &str,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn del_resource(&self, name: &str) -> Result<(), CacheError> {
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn health_check(&self) -> Result<(), CacheError> {
        Ok(())
    }
}
