pub mod config;
pub mod db;
pub mod error;
pub mod extractor;
pub mod models;
pub mod parser;
pub mod quiz;
pub mod server;
pub mod service;

use std::sync::Arc;

use crate::config::Settings;
use crate::db::Store;
use crate::extractor::Extractor;

pub use error::{QuizError, Result};

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub extractor: Extractor,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Build the shared state and make sure the schema exists.
    pub fn new(settings: Settings) -> Result<Self> {
        let store = Store::new(settings.database_path.clone());
        store.init()?;
        tracing::info!("Using database {}", store.path().display());
        let extractor = Extractor::new(&settings)?;
        Ok(Self {
            store,
            extractor,
            settings: Arc::new(settings),
        })
    }
}

pub fn router(state: AppState) -> axum::Router {
    server::create_routes(state)
}
