//! # itemflow
//!
//! A small REST service managing "Item" records with validated fields,
//! DNS-backed email deliverability checks, and a best-effort parallel batch
//! operation that marks every item as processed.
//!
//! ## Features
//!
//! - **CRUD API**: create, read, update and delete items over HTTP
//! - **Deliverable emails**: format check plus a live DNS MX lookup
//! - **Batch processing**: concurrent per-item fan-out that isolates
//!   failures and returns only the successfully processed items
//! - **Consistent errors**: every failure renders the same JSON envelope
//! - **Pluggable storage**: SeaORM database backend or in-memory store
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use itemflow::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/itemflow.yaml").await?;
//!     let app = Application::new(config).await?;
//!     app.run().await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

// Re-export main types
pub use crate::config::Config;
pub use crate::core::items::{Item, ItemRequest, ItemService, ItemStatus, NewItem};
pub use crate::core::validation::{EmailValidator, HickoryMxResolver, MxResolver};
pub use crate::storage::ItemStore;
pub use crate::utils::error::{Result, ServiceError};

use tracing::info;

/// The service: configuration plus a ready-to-run HTTP server
pub struct Application {
    config: Config,
    server: server::HttpServer,
}

impl Application {
    /// Create a new application instance
    pub async fn new(config: Config) -> Result<Self> {
        info!("Creating application instance");

        let server = server::HttpServer::new(&config).await?;

        Ok(Self { config, server })
    }

    /// Run the HTTP server until it stops
    pub async fn run(self) -> Result<()> {
        info!("Starting itemflow");
        info!("Configuration: {:#?}", self.config);

        self.server.start().await
    }
}

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
