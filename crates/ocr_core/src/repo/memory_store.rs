//! In-process OCR store.
//!
//! # Responsibility
//! - Stand in for MongoDB in tests and offline runs.
//! - Evaluate the subset of the MongoDB query language the service emits.
//!
//! # Invariants
//! - Documents keep insertion order; `find` returns them in that order.
//! - Filters support field equality and the `$eq` operator.
//! - Updates support `$set` only and may not touch `_id`.
//! - Anything else is rejected with `StoreError::UnsupportedQuery`.

use crate::db::{StoreError, StoreResult};
use crate::model::ocr::{OcrId, PersistedOcr};
use crate::repo::ocr_store::{OcrStore, UpdateOutcome};
use mongodb::bson::{self, Bson, Document};
use std::sync::{Mutex, MutexGuard};

const ID_FIELD: &str = "_id";

/// OCR store holding raw documents in memory.
#[derive(Debug, Default)]
pub struct InMemoryOcrStore {
    documents: Mutex<Vec<Document>>,
}

impl InMemoryOcrStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with raw documents, e.g. ones written by older clients.
    ///
    /// Documents without `_id` get a fresh one.
    pub fn with_documents(documents: impl IntoIterator<Item = Document>) -> Self {
        let documents = documents.into_iter().map(with_id_first).collect();
        Self {
            documents: Mutex::new(documents),
        }
    }

    /// Number of stored documents.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Vec<Document>>> {
        self.documents.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl OcrStore for InMemoryOcrStore {
    fn find(&self, filter: Document) -> StoreResult<Vec<PersistedOcr>> {
        let documents = self.lock()?;
        let mut records = Vec::new();
        for document in documents.iter() {
            if matches_filter(document, &filter)? {
                let record = bson::from_document::<PersistedOcr>(document.clone())
                    .map_err(|err| StoreError::Serialization(err.to_string()))?;
                records.push(record);
            }
        }
        Ok(records)
    }

    fn insert_one(&self, record: &PersistedOcr) -> StoreResult<OcrId> {
        let document = bson::to_document(record)
            .map_err(|err| StoreError::Serialization(err.to_string()))?;
        let document = with_id_first(document);
        let id = document.get_object_id(ID_FIELD).map_err(|_| StoreError::MissingId)?;

        let mut documents = self.lock()?;
        if documents
            .iter()
            .any(|existing| existing.get(ID_FIELD) == Some(&Bson::ObjectId(id)))
        {
            return Err(StoreError::DuplicateId(id));
        }
        documents.push(document);
        Ok(id)
    }

    fn update_one(&self, filter: Document, update: Document) -> StoreResult<UpdateOutcome> {
        let assignments = set_assignments(&update)?;
        let mut documents = self.lock()?;

        let Some(index) = position_of_first_match(&documents, &filter)? else {
            return Ok(UpdateOutcome::default());
        };

        let document = &mut documents[index];
        let before = document.clone();
        for (field, value) in assignments {
            document.insert(field.clone(), value.clone());
        }

        Ok(UpdateOutcome {
            matched: 1,
            modified: u64::from(*document != before),
        })
    }

    fn delete_one(&self, filter: Document) -> StoreResult<u64> {
        let mut documents = self.lock()?;
        match position_of_first_match(&documents, &filter)? {
            Some(index) => {
                documents.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn delete_many(&self, filter: Document) -> StoreResult<u64> {
        let mut documents = self.lock()?;
        let mut keep = Vec::with_capacity(documents.len());
        for document in documents.iter() {
            keep.push(!matches_filter(document, &filter)?);
        }

        let before = documents.len();
        let mut flags = keep.into_iter();
        documents.retain(|_| flags.next().unwrap_or(true));
        Ok((before - documents.len()) as u64)
    }
}

fn with_id_first(document: Document) -> Document {
    let id = match document.get(ID_FIELD) {
        Some(existing) => existing.clone(),
        None => Bson::ObjectId(OcrId::new()),
    };

    let mut ordered = Document::new();
    ordered.insert(ID_FIELD, id);
    for (field, value) in document {
        if field != ID_FIELD {
            ordered.insert(field, value);
        }
    }
    ordered
}

fn position_of_first_match(
    documents: &[Document],
    filter: &Document,
) -> StoreResult<Option<usize>> {
    for (index, document) in documents.iter().enumerate() {
        if matches_filter(document, filter)? {
            return Ok(Some(index));
        }
    }
    Ok(None)
}

fn matches_filter(document: &Document, filter: &Document) -> StoreResult<bool> {
    for (field, condition) in filter {
        if field.starts_with('$') {
            return Err(StoreError::UnsupportedQuery(format!(
                "top-level operator `{field}`"
            )));
        }

        let actual = document.get(field);
        let matched = match condition {
            Bson::Document(operators) if is_operator_document(operators) => {
                matches_operators(actual, operators)?
            }
            expected => actual == Some(expected),
        };

        if !matched {
            return Ok(false);
        }
    }
    Ok(true)
}

fn matches_operators(actual: Option<&Bson>, operators: &Document) -> StoreResult<bool> {
    let mut matched = true;
    for (operator, operand) in operators {
        matched &= match operator.as_str() {
            "$eq" => actual == Some(operand),
            other => {
                return Err(StoreError::UnsupportedQuery(format!(
                    "filter operator `{other}`"
                )))
            }
        };
    }
    Ok(matched)
}

fn is_operator_document(document: &Document) -> bool {
    document.keys().next().is_some_and(|key| key.starts_with('$'))
}

fn set_assignments(update: &Document) -> StoreResult<&Document> {
    if update.len() != 1 {
        return Err(StoreError::UnsupportedQuery(
            "update must contain exactly one `$set` operator".to_string(),
        ));
    }

    let assignments = match update.get("$set") {
        Some(Bson::Document(assignments)) => assignments,
        _ => {
            return Err(StoreError::UnsupportedQuery(
                "update must contain exactly one `$set` operator".to_string(),
            ))
        }
    };

    if assignments.contains_key(ID_FIELD) {
        return Err(StoreError::UnsupportedQuery("`_id` is immutable".to_string()));
    }
    Ok(assignments)
}
