//! edx-config — Configuration Loading
//!
//! Loads line-length/capacity limits and logging settings from an optional
//! TOML file, layered over built-in defaults.

pub mod defaults;
pub mod loader;
pub mod schema;

pub use defaults::default_config;
pub use loader::ConfigLoader;
pub use schema::{Config, LimitsConfig, LoggingConfig};

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to resolve configuration path: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialization error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerError(#[from] toml::ser::Error),

    #[error("invalid configuration: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
