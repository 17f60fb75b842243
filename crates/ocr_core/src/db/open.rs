//! Connection bootstrap for MongoDB.
//!
//! # Responsibility
//! - Build a sync client from `StoreConfig`, applying the store timeout.
//! - Ping the configured database before handing out the collection.
//!
//! # Invariants
//! - Connection strings are never written to logs.

use super::StoreResult;
use crate::config::StoreConfig;
use crate::model::ocr::PersistedOcr;
use log::{error, info};
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::sync::{Client, Collection};
use std::time::Instant;

/// Connects to MongoDB and returns the typed OCR collection.
///
/// # Side effects
/// - Performs a `ping` round trip against the configured database.
/// - Emits `store_open` logging events with duration and status.
pub fn open_collection(config: &StoreConfig) -> StoreResult<Collection<PersistedOcr>> {
    let started_at = Instant::now();
    info!(
        "event=store_open module=db status=start database={} collection={} timeout_ms={}",
        config.database,
        config.collection,
        config.timeout.as_millis()
    );

    match connect(config) {
        Ok(collection) => {
            info!(
                "event=store_open module=db status=ok duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(collection)
        }
        Err(err) => {
            error!(
                "event=store_open module=db status=error duration_ms={} error_code=store_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn connect(config: &StoreConfig) -> StoreResult<Collection<PersistedOcr>> {
    let mut options = ClientOptions::parse(config.uri.as_str()).run()?;
    options.server_selection_timeout = Some(config.timeout);
    options.connect_timeout = Some(config.timeout);

    let client = Client::with_options(options)?;
    let database = client.database(&config.database);
    database.run_command(doc! { "ping": 1 }).run()?;

    Ok(database.collection::<PersistedOcr>(&config.collection))
}
