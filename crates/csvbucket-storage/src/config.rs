//! Store Configuration
//!
//! Where the document lives and how to reach it:
//!
//! - **bucket**: S3 bucket holding the document (required)
//! - **key**: object key of the document (default: `datos.csv`)
//! - **region**: AWS region (optional; resolved from the environment otherwise)
//! - **endpoint**: custom S3 endpoint for MinIO/localstack (optional)
//!
//! Credentials are never part of this struct. `AmazonS3Builder::from_env()`
//! picks them up from the ambient environment: access key variables, web
//! identity tokens, ECS task roles or the EC2 instance profile.
//!
//! ## Usage
//!
//! ```ignore
//! use csvbucket_storage::StoreConfig;
//!
//! let config = StoreConfig::new("my-bucket").with_region("eu-west-1");
//! let store = config.open()?;
//! ```

use object_store::aws::AmazonS3Builder;
use object_store::{ClientOptions, ObjectStore};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::store::ObjectRecordStore;

/// Object key used when none is configured.
pub const DEFAULT_OBJECT_KEY: &str = "datos.csv";

/// `Content-Type` sent with every upload of the document.
pub const CONTENT_TYPE: &str = "text/csv";

fn client_options() -> ClientOptions {
    ClientOptions::new().with_default_content_type(CONTENT_TYPE)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub bucket: String,
    pub key: String,
    pub region: Option<String>,
    pub endpoint: Option<String>,
}

impl StoreConfig {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: DEFAULT_OBJECT_KEY.to_string(),
            region: None,
            endpoint: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Build the S3 client for the configured bucket.
    pub fn build_object_store(&self) -> Result<Arc<dyn ObjectStore>> {
        if self.bucket.is_empty() {
            return Err(Error::Config("bucket name must not be empty".to_string()));
        }

        let mut builder = AmazonS3Builder::from_env()
            .with_bucket_name(&self.bucket)
            .with_client_options(client_options());
        if let Some(region) = &self.region {
            builder = builder.with_region(region);
        }
        if let Some(endpoint) = &self.endpoint {
            // MinIO and localstack usually listen on plain HTTP
            builder = builder.with_endpoint(endpoint).with_allow_http(true);
        }

        let store = builder
            .build()
            .map_err(|e| Error::Config(format!("failed to build S3 client: {}", e)))?;
        Ok(Arc::new(store))
    }

    /// Build the S3 client and bind it to the configured key.
    pub fn open(&self) -> Result<ObjectRecordStore> {
        let store = self.build_object_store()?;
        ObjectRecordStore::new(store, &self.key)
    }
}
