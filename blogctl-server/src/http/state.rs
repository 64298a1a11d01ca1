//! Application state shared across handlers

use std::sync::Arc;

use crate::db::BlogStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn BlogStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn BlogStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn BlogStore {
        self.store.as_ref()
    }
}
