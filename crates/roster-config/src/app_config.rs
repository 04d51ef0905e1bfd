//! Application configuration structures.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Application name and metadata.
    #[serde(default)]
    pub app: AppMetadata,

    /// Cache-aside layer configuration.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Credential hashing configuration.
    #[serde(default)]
    pub security: SecurityConfig,

    /// Logging configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Application metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppMetadata {
    /// Application name.
    pub name: String,
    /// Application version.
    pub version: String,
    /// Environment (development, staging, production).
    pub environment: String,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: "roster".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Enable the cache. When disabled every read goes to the record store.
    pub enabled: bool,
    /// TTL applied to entries populated on a read miss, in seconds.
    pub default_ttl_secs: u64,
    /// Interval between background sweeps of expired entries, in seconds.
    pub cleanup_interval_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default_ttl_secs: 300,       // 5 minutes
            cleanup_interval_secs: 600, // 10 minutes
        }
    }
}

impl CacheConfig {
    /// Returns the entry TTL as a Duration.
    #[must_use]
    pub const fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_secs)
    }

    /// Returns the sweep interval as a Duration.
    #[must_use]
    pub const fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs)
    }
}

/// Security configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Argon2 memory cost in MiB.
    pub password_hash_cost: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            password_hash_cost: 19,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Emit logs as JSON lines instead of the human-readable format.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cache_config() {
        let config = CacheConfig::default();
        assert!(config.enabled);
        assert_eq!(config.default_ttl(), Duration::from_secs(300));
        assert_eq!(config.cleanup_interval(), Duration::from_secs(600));
    }

    #[test]
    fn test_partial_section_falls_back_to_defaults() {
        let config: RosterConfig =
            serde_json::from_str(r#"{"cache": {"enabled": false}}"#).unwrap();
        assert!(!config.cache.enabled);
        assert_eq!(config.cache.default_ttl_secs, 300);
        assert_eq!(config.app.environment, "development");
        assert_eq!(config.observability.log_level, "info");
    }
}
