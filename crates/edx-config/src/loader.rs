//! Configuration Loader
//!
//! Loads the TOML configuration file, layered over built-in defaults.
//! Synchronous: the editor is a one-shot batch process, not a long-lived
//! service, so there is no runtime to hand blocking file reads to.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{default_config, Config, ConfigError, Result};

/// Loads configuration from a fixed path, falling back to defaults when the
/// file is absent.
pub struct ConfigLoader {
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Config loader for the platform's default config directory.
    ///
    /// `~/.config/edx/config.toml` on Unix, `%APPDATA%\edx\config.toml` on
    /// Windows.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: Self::default_config_path()?,
        })
    }

    /// Config loader for an explicit path, e.g. from `--config`.
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    pub fn default_config_dir() -> Result<PathBuf> {
        directories::ProjectDirs::from("com", "edx", "edx")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or_else(|| ConfigError::ParseError("cannot determine config directory".to_string()))
    }

    pub fn default_config_path() -> Result<PathBuf> {
        Ok(Self::default_config_dir()?.join("config.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    pub fn exists(&self) -> bool {
        self.config_path.is_file()
    }

    /// Loads configuration, returning built-in defaults silently if no file
    /// is present at `self.path()`.
    pub fn load(&self) -> Result<Config> {
        if !self.exists() {
            info!(path = %self.config_path.display(), "config file not found, using defaults");
            return Ok(default_config());
        }

        debug!(path = %self.config_path.display(), "loading config");
        let content = std::fs::read_to_string(&self.config_path)?;
        let config: Config = toml::from_str(&content)?;
        self.validate(&config)?;

        info!("configuration loaded");
        Ok(config)
    }

    /// Rejects configurations the core can't run with.
    pub fn validate(&self, config: &Config) -> Result<()> {
        if config.limits.max_line_bytes == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_line_bytes must be nonzero".to_string(),
            ));
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "invalid logging.level: {} (must be one of: {})",
                config.logging.level,
                valid_levels.join(", ")
            )));
        }

        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new().expect("failed to determine default config path")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_returns_defaults_when_file_absent() {
        let temp = TempDir::new().unwrap();
        let loader = ConfigLoader::with_path(temp.path().join("config.toml"));
        let config = loader.load().unwrap();
        assert_eq!(config.limits.max_line_bytes, 1024);
    }

    #[test]
    fn load_reads_overrides_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[limits]\nmax_line_bytes = 2048\n").unwrap();

        let loader = ConfigLoader::with_path(path);
        let config = loader.load().unwrap();
        assert_eq!(config.limits.max_line_bytes, 2048);
    }

    #[test]
    fn validate_rejects_zero_max_line_bytes() {
        let loader = ConfigLoader::with_path(PathBuf::from("/tmp/unused-edx-config.toml"));
        let mut config = Config::default();
        config.limits.max_line_bytes = 0;
        assert!(loader.validate(&config).is_err());
    }

    #[test]
    fn validate_rejects_unknown_log_level() {
        let loader = ConfigLoader::with_path(PathBuf::from("/tmp/unused-edx-config.toml"));
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(loader.validate(&config).is_err());
    }

    #[test]
    fn default_paths_resolve() {
        assert!(ConfigLoader::default_config_dir().is_ok());
        assert!(ConfigLoader::default_config_path().is_ok());
    }
}
