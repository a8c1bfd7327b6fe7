use std::sync::Arc;

use crate::store::ProfileStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Tiered in production; tests plug in a local adapter directly.
    pub store: Arc<dyn ProfileStore>,
}
