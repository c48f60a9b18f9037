use std::path::PathBuf;
use thiserror::Error;

use crate::store::Latency;

// ============================================================================
// Configuration
// ============================================================================
//
// Environment variables:
// - `THERAFLOW_LATENCY_MIN_MS`: lower bound of the simulated delay (default 200)
// - `THERAFLOW_LATENCY_MAX_MS`: upper bound of the simulated delay (default 500)
//   Both set to 0 disables the delay.
// - `THERAFLOW_FIXTURE_DIR`: directory replacing the bundled fixtures
//
// ============================================================================

pub const LATENCY_MIN_VAR: &str = "THERAFLOW_LATENCY_MIN_MS";
pub const LATENCY_MAX_VAR: &str = "THERAFLOW_LATENCY_MAX_MS";
pub const FIXTURE_DIR_VAR: &str = "THERAFLOW_FIXTURE_DIR";

pub const DEFAULT_LATENCY_MIN_MS: u64 = 200;
pub const DEFAULT_LATENCY_MAX_MS: u64 = 500;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var} must be a whole number of milliseconds, got {value:?}")]
    InvalidMillis { var: &'static str, value: String },

    #[error("Latency minimum ({min} ms) exceeds maximum ({max} ms)")]
    InvertedLatency { min: u64, max: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub latency_min_ms: u64,
    pub latency_max_ms: u64,
    pub fixture_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            latency_min_ms: DEFAULT_LATENCY_MIN_MS,
            latency_max_ms: DEFAULT_LATENCY_MAX_MS,
            fixture_dir: None,
        }
    }
}

impl AppConfig {
    /// Read the process environment. Call `dotenvy::dotenv()` first to pick
    /// up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable source; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |var: &str| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let latency_min_ms =
            parse_millis(LATENCY_MIN_VAR, value(LATENCY_MIN_VAR), DEFAULT_LATENCY_MIN_MS)?;
        let latency_max_ms =
            parse_millis(LATENCY_MAX_VAR, value(LATENCY_MAX_VAR), DEFAULT_LATENCY_MAX_MS)?;

        if latency_min_ms > latency_max_ms {
            return Err(ConfigError::InvertedLatency {
                min: latency_min_ms,
                max: latency_max_ms,
            });
        }

        Ok(Self {
            latency_min_ms,
            latency_max_ms,
            fixture_dir: value(FIXTURE_DIR_VAR).map(PathBuf::from),
        })
    }

    pub fn latency(&self) -> Latency {
        Latency::from_millis(self.latency_min_ms, self.latency_max_ms)
    }
}

fn parse_millis(
    var: &'static str,
    value: Option<String>,
    default: u64,
) -> Result<u64, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidMillis { var, value: raw }),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.latency(), Latency::network());
    }

    #[test]
    fn test_zero_latency_disables_delay() {
        let config = config_from(&[(LATENCY_MIN_VAR, "0"), (LATENCY_MAX_VAR, "0")]).unwrap();

        assert_eq!(config.latency(), Latency::None);
    }

    #[test]
    fn test_equal_bounds_give_fixed_latency() {
        let config = config_from(&[(LATENCY_MIN_VAR, "50"), (LATENCY_MAX_VAR, "50")]).unwrap();

        assert_eq!(config.latency(), Latency::Fixed(Duration::from_millis(50)));
    }

    #[test]
    fn test_inverted_bounds_are_rejected() {
        let err = config_from(&[(LATENCY_MIN_VAR, "600")]).unwrap_err();

        assert_eq!(err, ConfigError::InvertedLatency { min: 600, max: 500 });
    }

    #[test]
    fn test_non_numeric_value_is_rejected() {
        let err = config_from(&[(LATENCY_MAX_VAR, "fast")]).unwrap_err();

        assert_eq!(
            err,
            ConfigError::InvalidMillis {
                var: LATENCY_MAX_VAR,
                value: "fast".to_string(),
            }
        );
    }

    #[test]
    fn test_fixture_dir_blank_counts_as_unset() {
        assert_eq!(config_from(&[(FIXTURE_DIR_VAR, "  ")]).unwrap().fixture_dir, None);

        let config = config_from(&[(FIXTURE_DIR_VAR, "/srv/fixtures")]).unwrap();
        assert_eq!(config.fixture_dir, Some(PathBuf::from("/srv/fixtures")));
    }
}
