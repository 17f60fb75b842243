//! Store contract and implementations for the OCR collection.
//!
//! # Responsibility
//! - Define the document-level operations the service layer relies on.
//! - Provide MongoDB and in-memory implementations of that contract.
//!
//! # Invariants
//! - Stores execute filters and updates; they never build them.
//! - Zero matches are reported through counts, not errors.

pub mod memory_store;
pub mod ocr_store;
