//! Application state for the web layer.

use std::sync::Arc;

use crate::autocomplete::Autocomplete;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Station autocompletion engine
    pub autocomplete: Arc<Autocomplete>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(autocomplete: Autocomplete) -> Self {
        Self {
            autocomplete: Arc::new(autocomplete),
        }
    }
}
