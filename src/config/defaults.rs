//! Default category seeding from config.toml.
//!
//! New profiles start with a small set of transaction categories so the
//! record-transaction form is usable before the user creates their own.
//! The list lives in `config.toml`; a missing file means no seeding.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Category names to seed for every new profile
    #[serde(default)]
    pub default_categories: Vec<String>,
}

/// Loads the seed configuration from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads the seed configuration from the default location (./config.toml),
/// returning an empty list when the file does not exist.
#[must_use]
pub fn load_default_config() -> Config {
    load_config("config.toml").unwrap_or(Config {
        default_categories: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_default_categories() {
        let toml_str = r#"
            default_categories = ["Food", "Transport", "Housing"]
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.default_categories,
            vec!["Food", "Transport", "Housing"]
        );
    }

    #[test]
    fn test_missing_list_defaults_to_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.default_categories.is_empty());
    }
}
