//! Check configuration
//!
//! Loaded from an optional TOML file. Every field falls back to the built-in
//! blink expectations, so an empty file is a valid configuration.

use crate::period::PeriodCriteria;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors while loading or validating a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML in {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {reason}")]
    Invalid { reason: String },
}

/// How register accesses are recognized in monitor logs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorSettings {
    /// Case-insensitive substrings marking a GPIO peripheral access
    #[serde(default = "default_gpio_markers")]
    pub gpio_markers: Vec<String>,

    /// Register name whose written value carries the pin state
    #[serde(default = "default_register_marker")]
    pub register_marker: String,

    /// Bit of the register driving the LED
    #[serde(default = "default_bit")]
    pub bit: u32,
}

fn default_gpio_markers() -> Vec<String> {
    vec!["gpio".to_string()]
}

fn default_register_marker() -> String {
    "ODR".to_string()
}

fn default_bit() -> u32 {
    5
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            gpio_markers: default_gpio_markers(),
            register_marker: default_register_marker(),
            bit: default_bit(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckConfig {
    #[serde(default)]
    pub criteria: PeriodCriteria,

    #[serde(default)]
    pub monitor: MonitorSettings,
}

impl CheckConfig {
    /// Load and validate a TOML configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;

        tracing::debug!(path = %path.display(), ?config, "loaded check config");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| Err(ConfigError::Invalid { reason });
        let c = &self.criteria;

        if c.target_half_period_ms.is_nan() || c.target_half_period_ms <= 0.0 {
            return invalid(format!(
                "target_half_period_ms must be positive, got {}",
                c.target_half_period_ms
            ));
        }
        if c.tolerance_ms.is_nan() || c.tolerance_ms < 0.0 {
            return invalid(format!(
                "tolerance_ms must not be negative, got {}",
                c.tolerance_ms
            ));
        }
        if c.min_edges < 2 {
            return invalid(format!(
                "min_edges must be at least 2 to measure a half-period, got {}",
                c.min_edges
            ));
        }
        if c.min_edges > c.max_edges {
            return invalid(format!(
                "min_edges ({}) exceeds max_edges ({})",
                c.min_edges, c.max_edges
            ));
        }

        let m = &self.monitor;
        if m.bit > 63 {
            return invalid(format!("monitor bit must be 0..=63, got {}", m.bit));
        }
        if m.register_marker.is_empty() {
            return invalid("monitor register_marker is empty".to_string());
        }
        if m.gpio_markers.is_empty() || m.gpio_markers.iter().any(|s| s.is_empty()) {
            return invalid("monitor gpio_markers must hold non-empty strings".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = CheckConfig::from_toml("").unwrap();
        assert_eq!(config, CheckConfig::default());
        assert_eq!(config.criteria.target_half_period_ms, 500.0);
        assert_eq!(config.criteria.tolerance_ms, 50.0);
        assert_eq!((config.criteria.min_edges, config.criteria.max_edges), (16, 26));
        assert_eq!(config.monitor.bit, 5);
        assert_eq!(config.monitor.register_marker, "ODR");
    }

    #[test]
    fn test_partial_override() {
        let config = CheckConfig::from_toml(
            r#"
            [criteria]
            target_half_period_ms = 250.0
            max_edges = 50

            [monitor]
            bit = 13
            "#,
        )
        .unwrap();

        assert_eq!(config.criteria.target_half_period_ms, 250.0);
        assert_eq!(config.criteria.max_edges, 50);
        assert_eq!(config.criteria.min_edges, 16);
        assert_eq!(config.monitor.bit, 13);
        assert_eq!(config.monitor.gpio_markers, vec!["gpio".to_string()]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_ranges() {
        let mut config = CheckConfig::default();
        config.criteria.min_edges = 30;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));

        let mut config = CheckConfig::default();
        config.criteria.min_edges = 1;
        assert!(config.validate().is_err());

        let mut config = CheckConfig::default();
        config.criteria.tolerance_ms = -1.0;
        assert!(config.validate().is_err());

        let mut config = CheckConfig::default();
        config.monitor.bit = 64;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[criteria]\ntolerance_ms = 25.0").unwrap();

        let config = CheckConfig::load(file.path()).unwrap();
        assert_eq!(config.criteria.tolerance_ms, 25.0);
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[criteria\nbroken").unwrap();

        let err = CheckConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[criteria]\nmin_edges = 0").unwrap();

        let err = CheckConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("min_edges"));
    }
}
