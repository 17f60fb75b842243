//! Store connection settings.
//!
//! # Responsibility
//! - Resolve the MongoDB connection string, database and collection names.
//! - Resolve the per-call store timeout.
//!
//! # Invariants
//! - Required values are present and non-blank after loading.
//! - The timeout is strictly positive.

use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::time::Duration;

pub const MONGO_URI_KEY: &str = "MONGO_URI";
pub const DB_NAME_KEY: &str = "DB_NAME";
pub const COLLECTION_NAME_KEY: &str = "COLLECTION_NAME";
pub const STORE_TIMEOUT_MS_KEY: &str = "STORE_TIMEOUT_MS";

pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing(key) => write!(f, "missing required setting `{key}`"),
            Self::Invalid { key, value } => {
                write!(f, "invalid value `{value}` for setting `{key}`")
            }
        }
    }
}

impl Error for ConfigError {}

/// Where the OCR collection lives and how long a store call may take.
#[derive(Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
    pub timeout: Duration,
}

impl StoreConfig {
    /// Loads settings from the process environment.
    ///
    /// A `.env` file in the working directory is applied first when present;
    /// variables already set in the environment take precedence over it.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads settings through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_ms = match lookup(STORE_TIMEOUT_MS_KEY) {
            None => DEFAULT_STORE_TIMEOUT_MS,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(value) if value > 0 => value,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: STORE_TIMEOUT_MS_KEY,
                        value: raw,
                    })
                }
            },
        };

        Ok(Self {
            uri: required(&lookup, MONGO_URI_KEY)?,
            database: required(&lookup, DB_NAME_KEY)?,
            collection: required(&lookup, COLLECTION_NAME_KEY)?,
            timeout: Duration::from_millis(timeout_ms),
        })
    }
}

// Connection strings may embed credentials.
impl Debug for StoreConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("uri", &"<redacted>")
            .field("database", &self.database)
            .field("collection", &self.collection)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(ConfigError::Missing(key)),
    }
}
