//! In-process TTL cache.

use super::CacheInterface;
use async_trait::async_trait;
use parking_lot::RwLock;
use roster_core::{RosterError, RosterResult};
use shaku::Component;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Default TTL for cached items (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// A stored value and its deadline.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    value: String,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Key/value cache with per-entry expiry, held in process memory.
///
/// Expired entries are removed lazily on `get_raw` and in bulk by
/// [`purge_expired`](CacheInterface::purge_expired). Deadlines use the tokio
/// clock, so paused-time tests can advance past a TTL.
#[derive(Component)]
#[shaku(interface = CacheInterface)]
pub struct InMemoryCacheService {
    /// When false every operation is a no-op and every read misses.
    #[shaku(default = true)]
    enabled: bool,
    #[shaku(default)]
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl InMemoryCacheService {
    /// Creates an enabled, empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            enabled: true,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a no-op cache service.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored entries, expired ones included until purged.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Default for InMemoryCacheService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheInterface for InMemoryCacheService {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    async fn get_raw(&self, key: &str) -> RosterResult<Option<String>> {
        if !self.is_enabled() {
            return Ok(None);
        }

        let now = Instant::now();
        {
            let entries = self.entries.read();
            match entries.get(key) {
                Some(entry) if !entry.is_expired(now) => {
                    debug!("Cache hit for key '{}'", key);
                    return Ok(Some(entry.value.clone()));
                }
                Some(_) => {}
                None => {
                    debug!("Cache miss for key '{}'", key);
                    return Ok(None);
                }
            }
        }

        // A writer may have refreshed the entry since the read guard dropped.
        let mut entries = self.entries.write();
        if entries.get(key).is_some_and(|entry| entry.is_expired(now)) {
            entries.remove(key);
        }
        debug!("Cache miss for expired key '{}'", key);
        Ok(None)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> RosterResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let expires_at = Instant::now().checked_add(ttl).ok_or_else(|| {
            RosterError::Cache(format!("TTL of {}s for key '{}' is out of range", ttl.as_secs(), key))
        })?;
        let entry = CacheEntry {
            value: value.to_string(),
            expires_at,
        };
        self.entries.write().insert(key.to_string(), entry);

        debug!("Cached key '{}' with TTL {}s", key, ttl.as_secs());
        Ok(())
    }

    async fn delete(&self, key: &str) -> RosterResult<bool> {
        if !self.is_enabled() {
            return Ok(false);
        }

        let now = Instant::now();
        let deleted = self
            .entries
            .write()
            .remove(key)
            .is_some_and(|entry| !entry.is_expired(now));

        debug!("Deleted key '{}': {}", key, deleted);
        Ok(deleted)
    }

    async fn purge_expired(&self) -> RosterResult<usize> {
        if !self.is_enabled() {
            return Ok(0);
        }

        let now = Instant::now();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        let purged = before - entries.len();

        if purged > 0 {
            debug!("Purged {} expired cache entries", purged);
        }
        Ok(purged)
    }
}

impl std::fmt::Debug for InMemoryCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryCacheService")
            .field("enabled", &self.enabled)
            .field("entries", &self.len())
            .finish()
    }
}
