pub mod csv;
pub mod document;
pub mod error;
pub mod record;

pub use document::{Decoded, Document, Row, HEADER};
pub use error::{FieldError, ValidationError};
pub use record::Record;
