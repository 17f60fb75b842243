//! OCR use-case services.
//!
//! # Responsibility
//! - Expose the list/create/update/delete operations to callers.
//! - Keep callers decoupled from the store backend in use.

pub mod ocr_service;
pub mod response;
