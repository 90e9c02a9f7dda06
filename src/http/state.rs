use std::sync::Arc;
use tokio::sync::Mutex;

use crate::core::data::Database;
use crate::core::services::EnrichmentClient;

/// Shared application state handed to every handler via axum's `State`
/// extractor. The database connection is serialized behind an async mutex;
/// the enrichment client is cheaply cloneable.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Mutex<Database>>,
    pub enrichment: EnrichmentClient,
}

impl AppState {
    pub fn new(db: Database, enrichment: EnrichmentClient) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
            enrichment,
        }
    }
}
