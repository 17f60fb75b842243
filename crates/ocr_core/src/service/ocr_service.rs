//! OCR record gateway.
//!
//! # Responsibility
//! - Validate candidates and identifiers before any store call.
//! - Build the filter/update document for each operation.
//! - Re-read the full collection after every mutation.
//!
//! # Invariants
//! - Validation and id parsing never reach the store on failure.
//! - Updates only `$set` `title` and `completed`.
//! - An update or delete that matches nothing still succeeds.
//! - A failed refresh is reported separately from a failed write.

use crate::db::{StoreError, StoreResult};
use crate::model::mapper::{parse_ocr_id, to_external, to_persisted, InvalidOcrId};
use crate::model::ocr::{Ocr, OcrValidationError};
use crate::repo::ocr_store::OcrStore;
use log::{error, info, warn};
use mongodb::bson::{doc, Document};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type OcrServiceResult<T> = Result<T, OcrServiceError>;

/// Failure of one gateway operation.
#[derive(Debug)]
pub enum OcrServiceError {
    /// Candidate failed validation; the store was not called.
    Validation(OcrValidationError),
    /// Identifier text is not a valid store id; the store was not called.
    InvalidIdentifier(InvalidOcrId),
    /// The store call itself failed.
    StoreUnavailable(StoreError),
    /// The write went through but the follow-up list read failed.
    RefreshFailure(StoreError),
}

impl Display for OcrServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidIdentifier(err) => write!(f, "{err}"),
            Self::StoreUnavailable(err) => write!(f, "store unavailable: {err}"),
            Self::RefreshFailure(err) => write!(f, "failed to refresh ocr list: {err}"),
        }
    }
}

impl Error for OcrServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::InvalidIdentifier(err) => Some(err),
            Self::StoreUnavailable(err) | Self::RefreshFailure(err) => Some(err),
        }
    }
}

impl From<OcrValidationError> for OcrServiceError {
    fn from(value: OcrValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<InvalidOcrId> for OcrServiceError {
    fn from(value: InvalidOcrId) -> Self {
        Self::InvalidIdentifier(value)
    }
}

/// Gateway over one OCR collection.
///
/// Construct once with the store and share by reference.
pub struct OcrService<S: OcrStore> {
    store: S,
}

impl<S: OcrStore> OcrService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Lists every record in store order.
    pub fn list(&self) -> OcrServiceResult<Vec<Ocr>> {
        let started_at = Instant::now();
        match self.scan() {
            Ok(ocrs) => {
                info!(
                    "event=ocr_list module=service status=ok count={} duration_ms={}",
                    ocrs.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(ocrs)
            }
            Err(err) => Err(store_failure("ocr_list", started_at, err)),
        }
    }

    /// Inserts a new record built from `candidate` and returns the refreshed list.
    ///
    /// # Errors
    /// - `Validation` when `candidate.title` is empty.
    /// - `StoreUnavailable` when the insert fails.
    /// - `RefreshFailure` when the insert succeeded but the re-read failed.
    pub fn create(&self, candidate: &Ocr) -> OcrServiceResult<Vec<Ocr>> {
        let started_at = Instant::now();
        candidate
            .validate()
            .map_err(|err| rejected("ocr_create", err.into()))?;

        let id = self
            .store
            .insert_one(&to_persisted(candidate))
            .map_err(|err| store_failure("ocr_create", started_at, err))?;
        info!(
            "event=ocr_create module=service status=ok id={} duration_ms={}",
            id,
            started_at.elapsed().as_millis()
        );

        self.refresh("ocr_create")
    }

    /// Sets `title` and `completed` on the record with `id`.
    ///
    /// An id that is well formed but unknown is not an error; the unchanged
    /// list is returned.
    ///
    /// # Errors
    /// - `InvalidIdentifier` when `id` is malformed (checked first).
    /// - `Validation` when `candidate.title` is empty.
    /// - `StoreUnavailable` / `RefreshFailure` as for `create`.
    pub fn update(&self, id: &str, candidate: &Ocr) -> OcrServiceResult<Vec<Ocr>> {
        let started_at = Instant::now();
        let ocr_id = parse_ocr_id(id).map_err(|err| rejected("ocr_update", err.into()))?;
        candidate
            .validate()
            .map_err(|err| rejected("ocr_update", err.into()))?;

        let filter = doc! { "_id": ocr_id };
        let update = doc! {
            "$set": {
                "title": candidate.title.as_str(),
                "completed": candidate.completed,
            }
        };
        let outcome = self
            .store
            .update_one(filter, update)
            .map_err(|err| store_failure("ocr_update", started_at, err))?;

        if outcome.matched == 0 {
            warn!(
                "event=ocr_update module=service status=no_match id={} duration_ms={}",
                ocr_id,
                started_at.elapsed().as_millis()
            );
        } else {
            info!(
                "event=ocr_update module=service status=ok id={} modified={} duration_ms={}",
                ocr_id,
                outcome.modified,
                started_at.elapsed().as_millis()
            );
        }

        self.refresh("ocr_update")
    }

    /// Deletes the record with `id`, if any, and returns the refreshed list.
    pub fn delete_one(&self, id: &str) -> OcrServiceResult<Vec<Ocr>> {
        let started_at = Instant::now();
        let ocr_id = parse_ocr_id(id).map_err(|err| rejected("ocr_delete", err.into()))?;

        let deleted = self
            .store
            .delete_one(doc! { "_id": ocr_id })
            .map_err(|err| store_failure("ocr_delete", started_at, err))?;
        info!(
            "event=ocr_delete module=service status=ok id={} deleted={} duration_ms={}",
            ocr_id,
            deleted,
            started_at.elapsed().as_millis()
        );

        self.refresh("ocr_delete")
    }

    /// Deletes every completed record and returns the refreshed list.
    pub fn delete_completed(&self) -> OcrServiceResult<Vec<Ocr>> {
        let started_at = Instant::now();
        let filter = doc! { "completed": { "$eq": true } };

        let deleted = self
            .store
            .delete_many(filter)
            .map_err(|err| store_failure("ocr_delete_completed", started_at, err))?;
        info!(
            "event=ocr_delete_completed module=service status=ok deleted={} duration_ms={}",
            deleted,
            started_at.elapsed().as_millis()
        );

        self.refresh("ocr_delete_completed")
    }

    fn refresh(&self, event: &str) -> OcrServiceResult<Vec<Ocr>> {
        self.scan().map_err(|err| {
            error!(
                "event={} module=service status=error error_code=refresh_failed error={}",
                event, err
            );
            OcrServiceError::RefreshFailure(err)
        })
    }

    fn scan(&self) -> StoreResult<Vec<Ocr>> {
        let records = self.store.find(Document::new())?;
        Ok(records.iter().map(to_external).collect())
    }
}

fn rejected(event: &str, err: OcrServiceError) -> OcrServiceError {
    let code = match &err {
        OcrServiceError::InvalidIdentifier(_) => "invalid_id",
        _ => "validation_failed",
    };
    warn!(
        "event={} module=service status=rejected error_code={}",
        event, code
    );
    err
}

fn store_failure(event: &str, started_at: Instant, err: StoreError) -> OcrServiceError {
    error!(
        "event={} module=service status=error duration_ms={} error_code=store_unavailable error={}",
        event,
        started_at.elapsed().as_millis(),
        err
    );
    OcrServiceError::StoreUnavailable(err)
}
