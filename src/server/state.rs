//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::items::ItemService;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// All fields are wrapped in Arc for cheap cloning into worker threads.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    /// Item business operations
    pub items: Arc<ItemService>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(config: Config, items: ItemService) -> Self {
        Self {
            config: Arc::new(config),
            items: Arc::new(items),
        }
    }
}
