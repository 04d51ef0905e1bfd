//! Cache interface trait for abstracted caching operations.

use async_trait::async_trait;
use roster_core::RosterResult;
use shaku::Interface;
use std::time::Duration;

/// Cache interface for storing and retrieving cached data.
///
/// Values are JSON strings so the trait stays dyn-compatible. Every entry
/// carries its own TTL; an expired entry reads as a miss whether or not it
/// has been purged yet.
#[async_trait]
pub trait CacheInterface: Interface + Send + Sync {
    /// Get a raw JSON value from the cache.
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get_raw(&self, key: &str) -> RosterResult<Option<String>>;

    /// Set a raw JSON value, overwriting any entry at the key.
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> RosterResult<()>;

    /// Delete a value from the cache.
    ///
    /// Returns `true` if a live entry was removed. Deleting a missing key is
    /// not an error.
    async fn delete(&self, key: &str) -> RosterResult<bool>;

    /// Removes every expired entry, returning how many were dropped.
    async fn purge_expired(&self) -> RosterResult<usize>;

    /// Check if caching is enabled.
    fn is_enabled(&self) -> bool;
}

/// Extension trait with typed methods for convenience.
#[async_trait]
pub trait CacheExt: CacheInterface {
    /// Get a typed value from the cache.
    async fn get<T: serde::de::DeserializeOwned + Send>(&self, key: &str) -> RosterResult<Option<T>> {
        match self.get_raw(key).await? {
            Some(json) => {
                let value: T = serde_json::from_str(&json)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a typed value in the cache.
    async fn set<T: serde::Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> RosterResult<()> {
        let json = serde_json::to_string(value)?;
        self.set_raw(key, &json, ttl).await
    }
}

impl<T: CacheInterface + ?Sized> CacheExt for T {}
