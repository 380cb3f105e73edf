//! Shared application state for all routes.

use crate::store::RecordStore;
use std::sync::Arc;

/// Holds the one record store opened at startup. Cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        AppState { store }
    }
}
