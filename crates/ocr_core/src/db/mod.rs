//! MongoDB connection bootstrap and store error types.
//!
//! # Responsibility
//! - Open and verify the MongoDB collection backing OCR records.
//! - Define the error type shared by every `OcrStore` implementation.
//!
//! # Invariants
//! - A collection handle is only returned after the database answered a ping.
//! - Store errors are reported as-is and never retried here.

use crate::model::ocr::OcrId;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;

pub use open::open_collection;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    /// Connectivity, timeout or server-side failure from the MongoDB driver.
    Driver(mongodb::error::Error),
    /// A document could not be converted to or from `PersistedOcr`.
    Serialization(String),
    /// Filter or update uses something the store cannot evaluate.
    UnsupportedQuery(String),
    /// Insert produced an id that is not an ObjectId.
    MissingId,
    /// Insert reused an id that is already stored.
    DuplicateId(OcrId),
    /// An in-process store lock was poisoned by a panicking writer.
    Poisoned,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Driver(err) => write!(f, "{err}"),
            Self::Serialization(message) => write!(f, "invalid ocr document: {message}"),
            Self::UnsupportedQuery(message) => write!(f, "unsupported store query: {message}"),
            Self::MissingId => write!(f, "store did not return an ObjectId for the insert"),
            Self::DuplicateId(id) => write!(f, "duplicate ocr id: {id}"),
            Self::Poisoned => write!(f, "store lock poisoned"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Driver(err) => Some(err),
            _ => None,
        }
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(value: mongodb::error::Error) -> Self {
        Self::Driver(value)
    }
}
