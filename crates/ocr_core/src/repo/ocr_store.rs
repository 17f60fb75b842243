//! OCR store contract and MongoDB implementation.
//!
//! # Responsibility
//! - Execute document-level filters and updates built by the service layer.
//! - Keep driver details behind one trait so a substitute store can be used.
//!
//! # Invariants
//! - Each call is a single store operation with single-document atomicity.
//! - "Nothing matched" is reported through counts, never as an error.

use crate::config::StoreConfig;
use crate::db::{open_collection, StoreError, StoreResult};
use crate::model::ocr::{OcrId, PersistedOcr};
use mongodb::bson::Document;
use mongodb::sync::Collection;

/// Counts reported by a single-document update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
}

/// Document-level access to the OCR collection.
pub trait OcrStore {
    /// Returns matching records in the store's natural order.
    fn find(&self, filter: Document) -> StoreResult<Vec<PersistedOcr>>;
    /// Inserts one record and returns the id the store assigned.
    fn insert_one(&self, record: &PersistedOcr) -> StoreResult<OcrId>;
    /// Applies `update` to the first record matching `filter`.
    fn update_one(&self, filter: Document, update: Document) -> StoreResult<UpdateOutcome>;
    /// Deletes the first record matching `filter`; returns the deleted count.
    fn delete_one(&self, filter: Document) -> StoreResult<u64>;
    /// Deletes every record matching `filter`; returns the deleted count.
    fn delete_many(&self, filter: Document) -> StoreResult<u64>;
}

/// MongoDB-backed OCR store over one collection.
#[derive(Clone)]
pub struct MongoOcrStore {
    collection: Collection<PersistedOcr>,
}

impl MongoOcrStore {
    pub fn new(collection: Collection<PersistedOcr>) -> Self {
        Self { collection }
    }

    /// Connects with `config` and verifies the database is reachable.
    pub fn open(config: &StoreConfig) -> StoreResult<Self> {
        open_collection(config).map(Self::new)
    }
}

impl OcrStore for MongoOcrStore {
    fn find(&self, filter: Document) -> StoreResult<Vec<PersistedOcr>> {
        let cursor = self.collection.find(filter).run()?;
        let records = cursor.collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    fn insert_one(&self, record: &PersistedOcr) -> StoreResult<OcrId> {
        let result = self.collection.insert_one(record).run()?;
        result.inserted_id.as_object_id().ok_or(StoreError::MissingId)
    }

    fn update_one(&self, filter: Document, update: Document) -> StoreResult<UpdateOutcome> {
        let result = self.collection.update_one(filter, update).run()?;
        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    fn delete_one(&self, filter: Document) -> StoreResult<u64> {
        let result = self.collection.delete_one(filter).run()?;
        Ok(result.deleted_count)
    }

    fn delete_many(&self, filter: Document) -> StoreResult<u64> {
        let result = self.collection.delete_many(filter).run()?;
        Ok(result.deleted_count)
    }
}
