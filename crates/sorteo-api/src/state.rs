//! Application state shared across handlers

use std::sync::Arc;

use sorteo_db::Database;

use crate::i18n::MessageCatalog;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Database connections
    pub db: Arc<Database>,
    /// Client-facing message catalog
    pub catalog: MessageCatalog,
}

impl AppState {
    /// Create a new application state
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            db,
            catalog: MessageCatalog::new(),
        }
    }
}
