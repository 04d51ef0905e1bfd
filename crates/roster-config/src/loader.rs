//! Configuration loader with layered sources.

use crate::{format_validation_errors, ConfigValidator, RosterConfig};
use config::{Config, ConfigError, Environment, File};
use roster_core::RosterError;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Prefix for environment variable overrides, e.g. `ROSTER__CACHE__DEFAULT_TTL_SECS`.
pub const ENV_PREFIX: &str = "ROSTER";

/// Configuration loader with runtime refresh support.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<RosterConfig>>,
    config_dir: String,
    env_prefix: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `{config_dir}/default.toml` - Default values
    /// 2. `{config_dir}/{environment}.toml` - Environment-specific overrides
    /// 3. `{config_dir}/local.toml` - Local overrides
    /// 4. Environment variables with the `ROSTER__` prefix
    ///
    /// Missing files are skipped. The environment name comes from
    /// `ROSTER_ENVIRONMENT` and defaults to `development`.
    pub fn new(config_dir: impl Into<String>) -> Result<Self, RosterError> {
        Self::with_env_prefix(config_dir, ENV_PREFIX)
    }

    /// Creates a loader that reads environment overrides under a custom prefix.
    pub fn with_env_prefix(
        config_dir: impl Into<String>,
        env_prefix: impl Into<String>,
    ) -> Result<Self, RosterError> {
        let config_dir = config_dir.into();
        let env_prefix = env_prefix.into();
        let config = Self::load_config(&config_dir, &env_prefix)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_dir,
            env_prefix,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, RosterError> {
        Self::new("./config")
    }

    /// Returns the current configuration.
    pub async fn get(&self) -> RosterConfig {
        self.config.read().await.clone()
    }

    /// Reloads the configuration from disk.
    ///
    /// On failure the previously loaded configuration stays in place.
    pub async fn reload(&self) -> Result<(), RosterError> {
        let new_config = Self::load_config(&self.config_dir, &self.env_prefix)?;
        let mut config = self.config.write().await;
        *config = new_config;
        info!("Configuration reloaded successfully");
        Ok(())
    }

    fn load_config(config_dir: &str, env_prefix: &str) -> Result<RosterConfig, RosterError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment = std::env::var(format!("{env_prefix}_ENVIRONMENT"))
            .unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for layer in ["default", environment.as_str(), "local"] {
            let path = format!("{}/{}.toml", config_dir, layer);
            if Path::new(&path).exists() {
                debug!("Loading {} config from: {}", layer, path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(env_prefix)
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_error_to_roster_error)?;

        let roster_config: RosterConfig = config
            .try_deserialize()
            .map_err(config_error_to_roster_error)?;

        Self::validate_config(&roster_config)?;

        Ok(roster_config)
    }

    fn validate_config(config: &RosterConfig) -> Result<(), RosterError> {
        if !config.cache.enabled {
            warn!("Cache is disabled; every read will hit the record store");
        }

        ConfigValidator::validate(config)
            .map_err(|errors| RosterError::Configuration(format_validation_errors(&errors)))
    }
}

fn config_error_to_roster_error(err: ConfigError) -> RosterError {
    RosterError::Configuration(err.to_string())
}
