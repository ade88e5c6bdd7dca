//! Configuration Module
//!
//! Handles loading and validating server configuration from environment
//! variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::cache::DEFAULT_SWEEP_INTERVAL;

// == Config Error ==
/// Configuration values the server refuses to start with.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("MAX_ENTRIES must be at least 1")]
    ZeroCapacity,

    #[error("SWEEP_INTERVAL_MS must be at least 1")]
    ZeroSweepInterval,
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// Idle time after which an entry expires
    pub entry_ttl: Duration,
    /// HTTP server port
    pub server_port: u16,
    /// Interval between background sweep passes
    pub sweep_interval: Duration,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// Absent or unparsable values fall back to the defaults.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Maximum cache entries (default: 1024)
    /// - `ENTRY_TTL` - Idle TTL in seconds (default: 5)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `SWEEP_INTERVAL_MS` - Sweep frequency in milliseconds (default: 1000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_entries: env_or("MAX_ENTRIES", defaults.max_entries),
            entry_ttl: Duration::from_secs(env_or("ENTRY_TTL", defaults.entry_ttl.as_secs())),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            sweep_interval: Duration::from_millis(env_or(
                "SWEEP_INTERVAL_MS",
                defaults.sweep_interval.as_millis() as u64,
            )),
        }
    }

    /// Rejects values the cache cannot run with. A zero TTL is allowed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_entries == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.sweep_interval.is_zero() {
            return Err(ConfigError::ZeroSweepInterval);
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 1024,
            entry_ttl: Duration::from_secs(5),
            server_port: 8080,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_entries, 1024);
        assert_eq!(config.entry_ttl, Duration::from_secs(5));
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.sweep_interval, Duration::from_secs(1));
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_config_from_env() {
        // Single test touches the environment to avoid races between tests
        env::remove_var("MAX_ENTRIES");
        env::remove_var("ENTRY_TTL");
        env::remove_var("SERVER_PORT");
        env::remove_var("SWEEP_INTERVAL_MS");
        assert_eq!(Config::from_env(), Config::default());

        env::set_var("MAX_ENTRIES", "16");
        env::set_var("ENTRY_TTL", "30");
        env::set_var("SERVER_PORT", "not-a-port");
        env::set_var("SWEEP_INTERVAL_MS", "250");

        let config = Config::from_env();
        assert_eq!(config.max_entries, 16);
        assert_eq!(config.entry_ttl, Duration::from_secs(30));
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.sweep_interval, Duration::from_millis(250));

        env::remove_var("MAX_ENTRIES");
        env::remove_var("ENTRY_TTL");
        env::remove_var("SERVER_PORT");
        env::remove_var("SWEEP_INTERVAL_MS");
    }

    #[test]
    fn test_config_validate() {
        let zero_capacity = Config {
            max_entries: 0,
            ..Config::default()
        };
        assert_eq!(zero_capacity.validate(), Err(ConfigError::ZeroCapacity));

        let zero_interval = Config {
            sweep_interval: Duration::ZERO,
            ..Config::default()
        };
        assert_eq!(zero_interval.validate(), Err(ConfigError::ZeroSweepInterval));

        let zero_ttl = Config {
            entry_ttl: Duration::ZERO,
            ..Config::default()
        };
        assert_eq!(zero_ttl.validate(), Ok(()));
    }
}
