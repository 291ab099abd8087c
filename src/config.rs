//! Configuration Module
//!
//! Handles loading cache configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::error::ConfigError;

/// Default expiration window: five minutes.
pub const DEFAULT_TTL_MS: u64 = 5 * 60 * 1000;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum age of an entry in milliseconds
    pub ttl_ms: u64,
    /// Reaper sweep period in milliseconds, None = same as the TTL
    pub reap_interval_ms: Option<u64>,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL_MS` - Entry TTL in milliseconds (default: 300000)
    /// - `CACHE_REAP_INTERVAL_MS` - Sweep period in milliseconds (default: the TTL)
    pub fn from_env() -> Self {
        Self {
            ttl_ms: env::var("CACHE_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TTL_MS),
            reap_interval_ms: env::var("CACHE_REAP_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok()),
        }
    }

    /// Rejects a zero TTL, which would make every entry stale on arrival.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ttl_ms == 0 {
            return Err(ConfigError::InvalidTtl(
                "ttl_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }

    /// Sweep period, falling back to the TTL.
    pub fn reap_interval(&self) -> Duration {
        Duration::from_millis(self.reap_interval_ms.unwrap_or(self.ttl_ms))
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_ms: DEFAULT_TTL_MS,
            reap_interval_ms: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl(), Duration::from_secs(300));
        assert_eq!(config.reap_interval(), Duration::from_secs(300));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_reap_interval_override() {
        let config = CacheConfig {
            ttl_ms: 1000,
            reap_interval_ms: Some(250),
        };
        assert_eq!(config.ttl(), Duration::from_secs(1));
        assert_eq!(config.reap_interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let config = CacheConfig {
            ttl_ms: 0,
            reap_interval_ms: None,
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidTtl(_))));
    }

    #[test]
    fn test_config_from_env() {
        // Single test touches the env to avoid races between parallel tests
        env::remove_var("CACHE_TTL_MS");
        env::remove_var("CACHE_REAP_INTERVAL_MS");
        assert_eq!(CacheConfig::from_env(), CacheConfig::default());

        env::set_var("CACHE_TTL_MS", "1500");
        env::set_var("CACHE_REAP_INTERVAL_MS", "not-a-number");
        let config = CacheConfig::from_env();
        assert_eq!(config.ttl_ms, 1500);
        assert_eq!(config.reap_interval_ms, None);
        assert_eq!(config.reap_interval(), Duration::from_millis(1500));

        env::remove_var("CACHE_TTL_MS");
        env::remove_var("CACHE_REAP_INTERVAL_MS");
    }
}
