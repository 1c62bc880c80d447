//! Application state for the eligible revenue engine API.

use std::sync::Arc;

use crate::config::ConfigLoader;

/// Shared application state.
///
/// Holds the status catalogue used to attach document checklists and
/// advisor notes to evaluations. The engine itself is stateless.
#[derive(Clone)]
pub struct AppState {
    catalogue: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state around a loaded catalogue.
    pub fn new(catalogue: ConfigLoader) -> Self {
        Self {
            catalogue: Arc::new(catalogue),
        }
    }

    /// Returns the status catalogue.
    pub fn catalogue(&self) -> &ConfigLoader {
        &self.catalogue
    }
}
