//! Configuration validation module.
//!
//! Fails fast on invalid configuration rather than at runtime.

use crate::RosterConfig;
use std::fmt;

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// Duration value must be positive.
    NonPositiveDuration { name: String },
    /// Duration value exceeds the allowed maximum.
    DurationTooLong { name: String, value: u64, maximum: u64 },
    /// Password hash cost is out of range.
    InvalidHashCost { value: u32, minimum: u32, maximum: u32 },
    /// Log level is invalid.
    InvalidLogLevel { value: String },
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveDuration { name } => {
                write!(f, "'{}' must be positive", name)
            }
            Self::DurationTooLong {
                name,
                value,
                maximum,
            } => {
                write!(f, "'{}' is {}s (maximum {}s)", name, value, maximum)
            }
            Self::InvalidHashCost {
                value,
                minimum,
                maximum,
            } => {
                write!(
                    f,
                    "Invalid password hash cost: {} (must be between {} and {})",
                    value, minimum, maximum
                )
            }
            Self::InvalidLogLevel { value } => {
                write!(
                    f,
                    "Invalid log level: '{}' (valid: trace, debug, info, warn, error)",
                    value
                )
            }
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Minimum Argon2 memory cost in MiB.
    const MIN_HASH_COST: u32 = 1;
    /// Maximum Argon2 memory cost in MiB.
    const MAX_HASH_COST: u32 = 256;
    /// Longest accepted cache TTL or sweep interval (30 days).
    const MAX_DURATION_SECS: u64 = 30 * 24 * 60 * 60;
    /// Valid log levels.
    const VALID_LOG_LEVELS: &'static [&'static str] = &["trace", "debug", "info", "warn", "error"];

    /// Validates the entire application configuration.
    ///
    /// Returns Ok(()) if valid, or Err with all validation errors found.
    pub fn validate(config: &RosterConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        Self::validate_cache(&config.cache, &mut errors);
        Self::validate_security(&config.security, &mut errors);
        Self::validate_observability(&config.observability, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_cache(config: &crate::CacheConfig, errors: &mut Vec<ConfigValidationError>) {
        // A disabled cache never reads its TTL or sweep interval.
        if !config.enabled {
            return;
        }

        for (name, secs) in [
            ("cache.default_ttl_secs", config.default_ttl_secs),
            ("cache.cleanup_interval_secs", config.cleanup_interval_secs),
        ] {
            if secs == 0 {
                errors.push(ConfigValidationError::NonPositiveDuration {
                    name: name.to_string(),
                });
            } else if secs > Self::MAX_DURATION_SECS {
                errors.push(ConfigValidationError::DurationTooLong {
                    name: name.to_string(),
                    value: secs,
                    maximum: Self::MAX_DURATION_SECS,
                });
            }
        }
    }

    fn validate_security(config: &crate::SecurityConfig, errors: &mut Vec<ConfigValidationError>) {
        if !(Self::MIN_HASH_COST..=Self::MAX_HASH_COST).contains(&config.password_hash_cost) {
            errors.push(ConfigValidationError::InvalidHashCost {
                value: config.password_hash_cost,
                minimum: Self::MIN_HASH_COST,
                maximum: Self::MAX_HASH_COST,
            });
        }
    }

    fn validate_observability(
        config: &crate::ObservabilityConfig,
        errors: &mut Vec<ConfigValidationError>,
    ) {
        let level = config.log_level.to_lowercase();
        if !Self::VALID_LOG_LEVELS.contains(&level.as_str()) {
            errors.push(ConfigValidationError::InvalidLogLevel {
                value: config.log_level.clone(),
            });
        }
    }
}

/// Formats validation errors for display.
#[must_use]
pub fn format_validation_errors(errors: &[ConfigValidationError]) -> String {
    let mut output = String::from("Configuration validation failed:");
    for (i, error) in errors.iter().enumerate() {
        output.push_str(&format!("\n  {}. {}", i + 1, error));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes() {
        assert!(ConfigValidator::validate(&RosterConfig::default()).is_ok());
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let mut config = RosterConfig::default();
        config.cache.default_ttl_secs = 0;

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ConfigValidationError::NonPositiveDuration {
                name: "cache.default_ttl_secs".to_string()
            }]
        );
    }

    #[test]
    fn test_oversized_durations_rejected() {
        let mut config = RosterConfig::default();
        config.cache.default_ttl_secs = u64::MAX;
        config.cache.cleanup_interval_secs = 31 * 24 * 60 * 60;

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(matches!(
            &errors[0],
            ConfigValidationError::DurationTooLong { name, value: u64::MAX, .. }
                if name == "cache.default_ttl_secs"
        ));
        assert!(errors[1].to_string().contains("cache.cleanup_interval_secs"));
    }

    #[test]
    fn test_thirty_day_ttl_accepted() {
        let mut config = RosterConfig::default();
        config.cache.default_ttl_secs = 30 * 24 * 60 * 60;
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_zero_durations_ignored_when_cache_disabled() {
        let mut config = RosterConfig::default();
        config.cache.enabled = false;
        config.cache.default_ttl_secs = 0;
        config.cache.cleanup_interval_secs = 0;

        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_invalid_hash_cost() {
        let mut config = RosterConfig::default();
        config.security.password_hash_cost = 0;

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(matches!(
            errors[0],
            ConfigValidationError::InvalidHashCost { value: 0, .. }
        ));
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = RosterConfig::default();
        config.observability.log_level = "verbose".to_string();

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("verbose"));
    }

    #[test]
    fn test_log_level_is_case_insensitive() {
        let mut config = RosterConfig::default();
        config.observability.log_level = "DEBUG".to_string();
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_multiple_errors_are_collected() {
        let mut config = RosterConfig::default();
        config.cache.cleanup_interval_secs = 0;
        config.security.password_hash_cost = 1_000;
        config.observability.log_level = "loud".to_string();

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(errors.len(), 3);

        let formatted = format_validation_errors(&errors);
        assert!(formatted.starts_with("Configuration validation failed:"));
        assert!(formatted.contains("  3. "));
    }
}
