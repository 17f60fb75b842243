//! Core record lifecycle for OCR entries.
//! This crate owns validation, store mapping and the list/create/update/delete
//! contract; HTTP routing and page rendering live in callers.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, StoreConfig};
pub use db::{StoreError, StoreResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::mapper::{parse_ocr_id, to_external, to_persisted, InvalidOcrId};
pub use model::ocr::{Ocr, OcrId, OcrValidationError, PersistedOcr};
pub use repo::memory_store::InMemoryOcrStore;
pub use repo::ocr_store::{MongoOcrStore, OcrStore, UpdateOutcome};
pub use service::ocr_service::{OcrService, OcrServiceError, OcrServiceResult};
pub use service::response::{OcrOperation, OcrPageData, OcrResponse};

/// Minimal health-check API for caller wiring.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
