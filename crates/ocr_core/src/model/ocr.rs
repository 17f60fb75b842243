//! OCR record model.
//!
//! # Responsibility
//! - Define the document stored in the OCR collection (`PersistedOcr`).
//! - Define the record exchanged with callers (`Ocr`).
//! - Validate caller candidates before any write reaches the store.
//!
//! # Invariants
//! - `PersistedOcr::id` is `None` only before the store assigns it.
//! - A record is never written with an empty `title`.
//! - Updates never touch `id`, `company_name` or `model_name`.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-native identifier of an OCR record.
pub type OcrId = ObjectId;

/// Document shape of one OCR record in the backing collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedOcr {
    /// Omitted on insert so the store assigns it.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<OcrId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Empty string means absent.
    #[serde(default, deserialize_with = "null_as_default")]
    pub company_name: String,
    #[serde(rename = "model", default, deserialize_with = "null_as_default")]
    pub model_name: String,
    /// Documents written without the flag read back as not completed.
    #[serde(default, deserialize_with = "null_as_default")]
    pub completed: bool,
}

// Other clients may store explicit nulls; read them like missing fields.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Caller-facing OCR record.
///
/// Also used as the candidate for create/update. Fields missing from caller
/// JSON fall back to their defaults, and any `id` on a candidate is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ocr {
    /// 24-character hex form of the store identifier.
    pub id: String,
    pub title: String,
    pub company_name: String,
    #[serde(rename = "model")]
    pub model_name: String,
    pub completed: bool,
}

impl Ocr {
    /// Builds a candidate for `create`, with no id and `completed = false`.
    pub fn new(
        title: impl Into<String>,
        company_name: impl Into<String>,
        model_name: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            title: title.into(),
            company_name: company_name.into(),
            model_name: model_name.into(),
            completed: false,
        }
    }

    /// Builds a candidate for `update`. Only `title` and `completed` are applied.
    pub fn patch(title: impl Into<String>, completed: bool) -> Self {
        Self {
            title: title.into(),
            completed,
            ..Self::default()
        }
    }

    /// Checks the write-side invariants of a candidate.
    ///
    /// # Errors
    /// - `EmptyTitle` when `title` is the empty string.
    pub fn validate(&self) -> Result<(), OcrValidationError> {
        if self.title.is_empty() {
            return Err(OcrValidationError::EmptyTitle);
        }
        Ok(())
    }
}

/// Candidate rejected before reaching the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OcrValidationError {
    EmptyTitle,
}

impl Display for OcrValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "the title is required"),
        }
    }
}

impl Error for OcrValidationError {}
