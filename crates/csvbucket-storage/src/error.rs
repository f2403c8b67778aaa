//! Storage Error Types
//!
//! ## Error Categories
//!
//! - `Read`: the object store failed while fetching the document
//! - `Encoding`: the fetched document is not valid UTF-8
//! - `Write`: the object store failed while overwriting the document
//! - `Config`: the store could not be built from its configuration
//!
//! A missing object is deliberately absent from this list; see
//! `FetchOutcome::NotFound`.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {key}: {source}")]
    Read {
        key: String,
        #[source]
        source: object_store::Error,
    },

    #[error("{key} is not valid UTF-8: {source}")]
    Encoding {
        key: String,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("failed to write {key}: {source}")]
    Write {
        key: String,
        #[source]
        source: object_store::Error,
    },

    #[error("Invalid store configuration: {0}")]
    Config(String),
}
