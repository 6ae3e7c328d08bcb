//! Configuration management for the service
//!
//! This module handles loading, validation, and merging of all service
//! configuration.

pub mod models;

pub use models::*;

use crate::utils::error::{Result, ServiceError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Batch processing configuration
    #[serde(default)]
    pub processing: ProcessingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ServiceError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ServiceError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration overrides from environment variables
    pub fn from_env() -> Result<Self> {
        debug!("Loading configuration from environment variables");

        let mut config = Self::default();

        if let Ok(host) = std::env::var("ITEMFLOW_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("ITEMFLOW_PORT") {
            config.server.port = port
                .parse()
                .map_err(|e| ServiceError::Config(format!("Invalid port: {}", e)))?;
        }
        if let Ok(db_url) = std::env::var("DATABASE_URL") {
            config.storage.database.url = db_url;
            config.storage.database.enabled = true;
        }
        if let Ok(concurrency) = std::env::var("ITEMFLOW_CONCURRENCY") {
            config.processing.concurrency = concurrency
                .parse()
                .map_err(|e| ServiceError::Config(format!("Invalid concurrency: {}", e)))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    /// Get storage configuration
    pub fn storage(&self) -> &StorageConfig {
        &self.storage
    }

    /// Get processing configuration
    pub fn processing(&self) -> &ProcessingConfig {
        &self.processing
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.server
            .validate()
            .map_err(|e| ServiceError::Config(format!("Server config error: {}", e)))?;

        self.storage
            .validate()
            .map_err(|e| ServiceError::Config(format!("Storage config error: {}", e)))?;

        self.processing
            .validate()
            .map_err(|e| ServiceError::Config(format!("Processing config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        self.server = self.server.merge(other.server);
        self.storage = self.storage.merge(other.storage);
        self.processing = self.processing.merge(other.processing);
        self
    }
}
