//! OCR record shapes and the mapping between them.
//!
//! # Responsibility
//! - Define the persisted document shape and the caller-facing shape.
//! - Convert explicitly between the two, one function per direction.
//!
//! # Invariants
//! - Identifiers are assigned by the store and never taken from callers.
//! - Only the identifier differs in encoding between the two shapes.

pub mod mapper;
pub mod ocr;
