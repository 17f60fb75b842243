use ocr_core::{to_external, to_persisted, Ocr, OcrId, OcrPageData, OcrResponse, OcrOperation};
use serde_json::json;

#[test]
fn external_record_serializes_with_api_field_names() {
    let ocr = Ocr {
        id: "64b7f0c2e13a4d5f6a7b8c9d".to_string(),
        title: "Invoice OCR".to_string(),
        company_name: "Acme".to_string(),
        model_name: "v2".to_string(),
        completed: false,
    };

    assert_eq!(
        serde_json::to_value(&ocr).unwrap(),
        json!({
            "id": "64b7f0c2e13a4d5f6a7b8c9d",
            "title": "Invoice OCR",
            "company_name": "Acme",
            "model": "v2",
            "completed": false
        })
    );
}

#[test]
fn candidate_json_may_omit_optional_fields() {
    let candidate: Ocr = serde_json::from_value(json!({ "title": "Receipt" })).unwrap();
    assert_eq!(candidate, Ocr::new("Receipt", "", ""));
    assert!(candidate.validate().is_ok());

    let empty: Ocr = serde_json::from_value(json!({})).unwrap();
    assert!(empty.validate().is_err());
}

#[test]
fn stored_record_maps_back_to_candidate_fields() {
    let candidate = Ocr::new("Invoice OCR", "Acme", "v2");
    let mut stored = to_persisted(&candidate);
    let id = OcrId::new();
    stored.id = Some(id);

    let external = to_external(&stored);
    assert_eq!(
        external,
        Ocr {
            id: id.to_hex(),
            ..candidate
        }
    );
}

#[test]
fn response_envelopes_serialize_message_and_list() {
    let ocrs = vec![Ocr::new("Receipt", "", "")];

    assert_eq!(
        serde_json::to_value(OcrResponse::new(OcrOperation::Create, ocrs.clone())).unwrap(),
        json!({
            "message": "OCR is created successfully",
            "ocrs": [{ "id": "", "title": "Receipt", "company_name": "", "model": "", "completed": false }]
        })
    );
    assert_eq!(
        serde_json::to_value(OcrResponse::new(OcrOperation::List, Vec::new())).unwrap(),
        json!({ "ocrs": [] })
    );

    let page = OcrPageData::new("token-123", ocrs);
    let value = serde_json::to_value(&page).unwrap();
    assert_eq!(value["csrf_token"], "token-123");
    assert_eq!(value["ocrs"][0]["title"], "Receipt");
}
