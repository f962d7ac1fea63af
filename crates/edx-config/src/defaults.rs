//! Default Configuration
//!
//! Provides default configuration values.

use crate::schema::Config;

/// Get the built-in default configuration (no file present).
pub fn default_config() -> Config {
    Config::default()
}
