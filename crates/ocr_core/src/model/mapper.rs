//! Conversions between `PersistedOcr` and `Ocr`.
//!
//! # Invariants
//! - `to_persisted` never copies a caller-supplied id.
//! - `parse_ocr_id` accepts a full identifier or nothing; there is no
//!   prefix or partial matching.

use crate::model::ocr::{Ocr, OcrId, PersistedOcr};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Caller-supplied identifier text that is not a valid store identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidOcrId(pub String);

impl Display for InvalidOcrId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid ocr id `{}`", self.0)
    }
}

impl Error for InvalidOcrId {}

/// Projects a stored document into the caller-facing shape.
pub fn to_external(record: &PersistedOcr) -> Ocr {
    Ocr {
        id: record.id.map(|id| id.to_hex()).unwrap_or_default(),
        title: record.title.clone(),
        company_name: record.company_name.clone(),
        model_name: record.model_name.clone(),
        completed: record.completed,
    }
}

/// Builds the document inserted on create.
///
/// The store assigns the id and `completed` starts at `false`.
pub fn to_persisted(candidate: &Ocr) -> PersistedOcr {
    PersistedOcr {
        id: None,
        title: candidate.title.clone(),
        company_name: candidate.company_name.clone(),
        model_name: candidate.model_name.clone(),
        completed: false,
    }
}

/// Parses caller identifier text, ignoring surrounding whitespace.
pub fn parse_ocr_id(value: &str) -> Result<OcrId, InvalidOcrId> {
    OcrId::parse_str(value.trim()).map_err(|_| InvalidOcrId(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{parse_ocr_id, to_external, to_persisted, InvalidOcrId};
    use crate::model::ocr::{Ocr, OcrId, PersistedOcr};

    #[test]
    fn to_persisted_drops_caller_id_and_completion() {
        let mut candidate = Ocr::new("Invoice OCR", "Acme", "v2");
        candidate.id = OcrId::new().to_hex();
        candidate.completed = true;

        let record = to_persisted(&candidate);
        assert!(record.id.is_none());
        assert!(!record.completed);
        assert_eq!(record.title, "Invoice OCR");
        assert_eq!(record.company_name, "Acme");
        assert_eq!(record.model_name, "v2");
    }

    #[test]
    fn to_external_only_changes_id_encoding() {
        let id = OcrId::new();
        let record = PersistedOcr {
            id: Some(id),
            title: "Receipt".to_string(),
            company_name: String::new(),
            model_name: "layout-3".to_string(),
            completed: true,
        };

        let external = to_external(&record);
        assert_eq!(external.id, id.to_hex());
        assert_eq!(external.title, record.title);
        assert_eq!(external.company_name, "");
        assert_eq!(external.model_name, record.model_name);
        assert!(external.completed);
    }

    #[test]
    fn parse_ocr_id_trims_and_round_trips() {
        let id = OcrId::new();
        let padded = format!("  {}\n", id.to_hex());
        assert_eq!(parse_ocr_id(&padded).unwrap(), id);
    }

    #[test]
    fn parse_ocr_id_rejects_malformed_text() {
        for bad in ["", "123", "zzzzzzzzzzzzzzzzzzzzzzzz", "64b7f0c2e13a4d5f6a7b8c9d0"] {
            assert_eq!(parse_ocr_id(bad), Err(InvalidOcrId(bad.to_string())));
        }
    }
}
