//! Runs against a live MongoDB when `OCR_TEST_MONGO_URI` is set; otherwise
//! every test returns early.

use ocr_core::{MongoOcrStore, Ocr, OcrId, OcrService, OcrStore, StoreConfig};
use std::time::Duration;

const TEST_URI_KEY: &str = "OCR_TEST_MONGO_URI";

fn live_service(collection: &str) -> Option<OcrService<MongoOcrStore>> {
    let uri = std::env::var(TEST_URI_KEY).ok()?;
    let config = StoreConfig {
        uri,
        database: "ocr_core_test".to_string(),
        collection: format!("{collection}_{}", OcrId::new().to_hex()),
        timeout: Duration::from_secs(5),
    };
    let store = MongoOcrStore::open(&config).unwrap();
    Some(OcrService::new(store))
}

fn clear(service: &OcrService<MongoOcrStore>) {
    service
        .store()
        .delete_many(mongodb::bson::Document::new())
        .unwrap();
}

#[test]
fn lifecycle_against_live_mongodb() {
    let Some(service) = live_service("lifecycle") else {
        return;
    };

    let ocrs = service.create(&Ocr::new("Invoice OCR", "Acme", "v2")).unwrap();
    assert_eq!(ocrs.len(), 1);
    let id = ocrs[0].id.clone();

    let ocrs = service
        .update(&id, &Ocr::patch("Invoice OCR v2", true))
        .unwrap();
    assert_eq!(ocrs[0].title, "Invoice OCR v2");
    assert_eq!(ocrs[0].company_name, "Acme");
    assert!(ocrs[0].completed);

    let unknown = service
        .update(&OcrId::new().to_hex(), &Ocr::patch("ghost", false))
        .unwrap();
    assert_eq!(unknown, ocrs);

    assert!(service.delete_completed().unwrap().is_empty());
    clear(&service);
}

#[test]
fn unreachable_server_fails_to_open() {
    if std::env::var(TEST_URI_KEY).is_err() {
        return;
    }

    let config = StoreConfig {
        uri: "mongodb://127.0.0.1:1/?directConnection=true".to_string(),
        database: "ocr_core_test".to_string(),
        collection: "unreachable".to_string(),
        timeout: Duration::from_millis(200),
    };
    assert!(MongoOcrStore::open(&config).is_err());
}
