//! Application state shared across handlers

use std::sync::Arc;

use crate::store::ProductStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn ProductStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn ProductStore {
        self.store.as_ref()
    }
}
