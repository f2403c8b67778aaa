//! Record Store
//!
//! `RecordStore` is the seam between the HTTP handlers and object storage.
//! Handlers receive it as an injected `Arc<dyn RecordStore>`, so any backend
//! (or a test fake) can sit behind the same contract.
//!
//! ## Contract
//!
//! - `fetch()` classifies the read as `Found(document)` or `NotFound`; every
//!   other failure is an `Err` carrying the underlying cause.
//! - `store()` overwrites the whole object unconditionally.
//!
//! ## Concurrency
//!
//! There is no locking, versioning or conditional put. Two writers that fetch
//! the same state and both store will race, and the last write wins.

use async_trait::async_trait;
use bytes::Bytes;
use csvbucket_core::Document;
use object_store::path::Path;
use object_store::ObjectStore;
use std::sync::Arc;

use crate::error::{Error, Result};

/// Classified result of reading the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The object exists and decoded into a document
    Found(Document),
    /// The object (or its bucket) does not exist yet
    NotFound,
}

impl FetchOutcome {
    /// Collapse into a document, with `NotFound` as an empty one.
    pub fn into_document(self) -> Document {
        match self {
            FetchOutcome::Found(document) => document,
            FetchOutcome::NotFound => Document::new(),
        }
    }
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Read and decode the whole document.
    async fn fetch(&self) -> Result<FetchOutcome>;

    /// Overwrite the whole document.
    async fn store(&self, document: &Document) -> Result<()>;

    /// Check that the backend is reachable without downloading the document.
    ///
    /// A missing object still counts as reachable.
    async fn probe(&self) -> Result<()> {
        self.fetch().await.map(|_| ())
    }
}

/// `RecordStore` over any `object_store` backend (S3 in production,
/// `InMemory` in tests).
#[derive(Debug, Clone)]
pub struct ObjectRecordStore {
    store: Arc<dyn ObjectStore>,
    path: Path,
}

impl ObjectRecordStore {
    /// Bind the document to `key` inside `store`.
    pub fn new(store: Arc<dyn ObjectStore>, key: &str) -> Result<Self> {
        let path = Path::parse(key)
            .map_err(|e| Error::Config(format!("invalid object key '{}': {}", key, e)))?;
        if path.as_ref().is_empty() {
            return Err(Error::Config("object key must not be empty".to_string()));
        }
        Ok(Self { store, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn key(&self) -> String {
        self.path.to_string()
    }

    fn read_error(&self, source: object_store::Error) -> Error {
        Error::Read {
            key: self.key(),
            source,
        }
    }
}

#[async_trait]
impl RecordStore for ObjectRecordStore {
    async fn fetch(&self) -> Result<FetchOutcome> {
        tracing::debug!(key = %self.path, "Fetching document");

        let result = match self.store.get(&self.path).await {
            Ok(result) => result,
            Err(object_store::Error::NotFound { .. }) => {
                tracing::debug!(key = %self.path, "Document does not exist yet");
                return Ok(FetchOutcome::NotFound);
            }
            Err(e) => return Err(self.read_error(e)),
        };

        let bytes = match result.bytes().await {
            Ok(bytes) => bytes,
            // Deleted between the GET response and reading its body
            Err(object_store::Error::NotFound { .. }) => return Ok(FetchOutcome::NotFound),
            Err(e) => return Err(self.read_error(e)),
        };

        let text = std::str::from_utf8(&bytes).map_err(|source| Error::Encoding {
            key: self.key(),
            source,
        })?;

        let decoded = Document::decode(text);
        if decoded.skipped > 0 {
            tracing::warn!(
                key = %self.path,
                skipped = decoded.skipped,
                "Skipped malformed rows in document"
            );
        }
        tracing::debug!(
            key = %self.path,
            bytes = bytes.len(),
            rows = decoded.document.len(),
            "Document fetched"
        );

        Ok(FetchOutcome::Found(decoded.document))
    }

    async fn store(&self, document: &Document) -> Result<()> {
        let payload = Bytes::from(document.encode());
        let size = payload.len();

        self.store
            .put(&self.path, payload)
            .await
            .map_err(|source| Error::Write {
                key: self.key(),
                source,
            })?;

        tracing::debug!(
            key = %self.path,
            bytes = size,
            rows = document.len(),
            "Document stored"
        );
        Ok(())
    }

    async fn probe(&self) -> Result<()> {
        match self.store.head(&self.path).await {
            Ok(_) | Err(object_store::Error::NotFound { .. }) => Ok(()),
            Err(e) => Err(self.read_error(e)),
        }
    }
}
