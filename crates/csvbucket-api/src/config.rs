//! Service Configuration
//!
//! Read once at startup from the environment.
//!
//! ## Environment Variables
//!
//! - `S3_BUCKET`: bucket holding the document (required)
//! - `S3_KEY`: object key of the document (default: `datos.csv`)
//! - `AWS_REGION`: AWS region (optional)
//! - `AWS_ENDPOINT_URL`: MinIO/S3 endpoint (optional)
//! - `API_PORT`: HTTP port (default: 8000)
//!
//! Startup must fail when `S3_BUCKET` is missing, so `from_env` returns an
//! error instead of falling back to a default bucket.

use csvbucket_storage::config::DEFAULT_OBJECT_KEY;
use csvbucket_storage::StoreConfig;
use thiserror::Error;

pub const DEFAULT_API_PORT: u16 = 8000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} is not defined")]
    Missing(&'static str),

    #[error("environment variable {name} has invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub store: StoreConfig,
    pub port: u16,
}

impl ServiceConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let bucket = var("S3_BUCKET").ok_or(ConfigError::Missing("S3_BUCKET"))?;
        let mut store = StoreConfig::new(bucket)
            .with_key(var("S3_KEY").unwrap_or_else(|| DEFAULT_OBJECT_KEY.to_string()));
        if let Some(region) = var("AWS_REGION") {
            store = store.with_region(region);
        }
        if let Some(endpoint) = var("AWS_ENDPOINT_URL") {
            store = store.with_endpoint(endpoint);
        }

        let port = match var("API_PORT") {
            Some(value) => value.parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "API_PORT",
                value,
            })?,
            None => DEFAULT_API_PORT,
        };

        Ok(Self { store, port })
    }
}
