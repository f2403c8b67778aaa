//! Record store adapter
//!
//! Reads and writes the single CSV document held in an object-storage bucket.
//! A missing object is not an error: it is reported as
//! [`FetchOutcome::NotFound`] and callers treat it as an empty document.

pub mod config;
pub mod error;
pub mod store;

pub use config::StoreConfig;
pub use error::{Error, Result};
pub use store::{FetchOutcome, ObjectRecordStore, RecordStore};
