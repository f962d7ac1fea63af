//! Configuration Schema
//!
//! Defines the structure of the editor's configuration file.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub limits: LimitsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            limits: LimitsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Line-length and capacity limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum byte length of a single line, matching `edx_core::MAX_LINE`.
    #[serde(default = "default_max_line_bytes")]
    pub max_line_bytes: usize,

    /// Initial document/stack capacity hint.
    #[serde(default = "default_initial_capacity")]
    pub initial_capacity: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_line_bytes: default_max_line_bytes(),
            initial_capacity: default_initial_capacity(),
        }
    }
}

/// Logging destination and verbosity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `"error"`, `"warn"`, `"info"`, `"debug"`, or `"trace"`.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Optional path for a daily-rolling log file, in addition to stderr.
    #[serde(default)]
    pub file: Option<std::path::PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_max_line_bytes() -> usize {
    1024
}

fn default_initial_capacity() -> usize {
    16
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_documented_defaults() {
        let config = Config::default();
        assert_eq!(config.limits.max_line_bytes, 1024);
        assert_eq!(config.limits.initial_capacity, 16);
        assert_eq!(config.logging.level, "warn");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn serializes_round_trip() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.limits.max_line_bytes, config.limits.max_line_bytes);
    }

    #[test]
    fn deserializes_partial_overrides() {
        let toml = r#"
[limits]
max_line_bytes = 2048

[logging]
level = "debug"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.limits.max_line_bytes, 2048);
        assert_eq!(config.limits.initial_capacity, 16);
        assert_eq!(config.logging.level, "debug");
    }
}
