//! Cache interfaces.

use std::time::Duration;

use async_trait::async_trait;

use crate::CacheError;

/// Cache adapter trait.
///
/// Entries may be served stale until their time to live expires.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Gets a resource, `None` when missing or expired.
    async fn get_resource(&self, name: &str) -> Result<Option<String>, CacheError>;
    /// Sets a resource for a duration.
    async fn set_resource(&self, name: &str, value: &str, ttl: Duration)
        -> Result<(), CacheError>;
    /// Deletes a resource if it exists.
    async fn del_resource(&self, name: &str) -> Result<(), CacheError>;
    /// Health check
    async fn health_check(&self) -> Result<(), CacheError>;
}
