//! Caller-facing envelopes around gateway results.
//!
//! # Responsibility
//! - Attach the fixed per-operation message to a successful result.
//! - Map failures to the short message shown next to the error detail.
//! - Carry the anti-forgery token and list into page templates.

use crate::model::ocr::Ocr;
use crate::service::ocr_service::OcrServiceError;
use serde::Serialize;

/// The five gateway operations, for messages and logging context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OcrOperation {
    List,
    Create,
    Update,
    DeleteOne,
    DeleteCompleted,
}

impl OcrOperation {
    /// Message for a successful run; `List` has none.
    pub fn success_message(self) -> Option<&'static str> {
        match self {
            Self::List => None,
            Self::Create => Some("OCR is created successfully"),
            Self::Update => Some("OCR updated successfully"),
            Self::DeleteOne | Self::DeleteCompleted => Some("OCR is successfully deleted"),
        }
    }

    /// Short message describing `err` for this operation.
    pub fn failure_message(self, err: &OcrServiceError) -> &'static str {
        match err {
            OcrServiceError::Validation(_) => "The title is required",
            OcrServiceError::InvalidIdentifier(_) => "The id is invalid",
            OcrServiceError::RefreshFailure(_) => "Failed to fetch OCR",
            OcrServiceError::StoreUnavailable(_) => match self {
                Self::List => "Failed to fetch OCR",
                Self::Create => "Failed to save",
                Self::Update => "Failed to update OCR",
                Self::DeleteOne => "Failed to delete OCR",
                Self::DeleteCompleted => "Failed to delete completed OCR",
            },
        }
    }
}

/// JSON body returned for a successful operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OcrResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub ocrs: Vec<Ocr>,
}

impl OcrResponse {
    pub fn new(operation: OcrOperation, ocrs: Vec<Ocr>) -> Self {
        Self {
            message: operation.success_message(),
            ocrs,
        }
    }
}

/// Values bound into the server-rendered OCR page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OcrPageData {
    /// Issued by the caller's anti-forgery layer; passed through untouched.
    pub csrf_token: String,
    pub ocrs: Vec<Ocr>,
}

impl OcrPageData {
    pub fn new(csrf_token: impl Into<String>, ocrs: Vec<Ocr>) -> Self {
        Self {
            csrf_token: csrf_token.into(),
            ocrs,
        }
    }
}
