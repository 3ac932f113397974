//! Environment-driven configuration
//!
//! Every setting has a default; an unset variable is logged and the default used.

use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
#[error("Invalid {key} value {value:?}: {reason}")]
pub struct ConfigError {
    key: &'static str,
    value: String,
    reason: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// SQLite file, or ":memory:"
    pub database_path: PathBuf,
    /// Insert the demo catalog when the database is empty
    pub seed_database: bool,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            port: try_load("PORT", "3001")?,
            database_path: try_load("DATABASE_PATH", "ecommerce.db")?,
            seed_database: try_load("SEED_DATABASE", "false")?,
        })
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = var(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    value.parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError {
            key,
            value,
            reason: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_parsed() {
        let port: u16 = try_load("CATALOG_TEST_UNSET_PORT", "3001").unwrap();
        assert_eq!(port, 3001);
    }

    #[test]
    fn test_bad_value_is_reported() {
        let err = try_load::<u16>("CATALOG_TEST_UNSET_PORT", "not-a-port").unwrap_err();
        assert!(err.to_string().contains("CATALOG_TEST_UNSET_PORT"));
    }
}
