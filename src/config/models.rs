//! Configuration data models
//!
//! This module defines all configuration structures used throughout the
//! service.

use serde::{Deserialize, Serialize};

/// Default server host
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8080
}

/// Default database URL
pub fn default_database_url() -> String {
    "sqlite::memory:".to_string()
}

/// Default maximum database connections
pub fn default_max_connections() -> u32 {
    10
}

/// Default connection timeout in seconds
pub fn default_connection_timeout() -> u64 {
    5
}

/// Default batch fan-out width
pub fn default_concurrency() -> usize {
    8
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Merge server configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.host != default_host() {
            self.host = other.host;
        }
        if other.port != default_port() {
            self.port = other.port;
        }
        self.cors = self.cors.merge(other.cors);
        self
    }

    /// Get the server bind address
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validate server configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("Port cannot be 0".to_string());
        }
        Ok(())
    }
}

/// CORS configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Enable CORS handling
    #[serde(default)]
    pub enabled: bool,
    /// Allowed origins; empty or "*" allows any origin
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    /// Merge CORS configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.enabled {
            self.enabled = true;
        }
        if !other.allowed_origins.is_empty() {
            self.allowed_origins = other.allowed_origins;
        }
        self
    }

    /// Whether any origin is accepted
    pub fn allows_all_origins(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }
}

/// Storage configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl StorageConfig {
    /// Merge storage configurations
    pub fn merge(mut self, other: Self) -> Self {
        self.database = self.database.merge(other.database);
        self
    }

    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.database.enabled && self.database.url.is_empty() {
            return Err("Database URL cannot be empty when the database is enabled".to_string());
        }
        Ok(())
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    #[serde(default = "default_database_url")]
    pub url: String,
    /// Enable the database (if false, use in-memory storage)
    #[serde(default)]
    pub enabled: bool,
    /// Maximum connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            enabled: false,
            max_connections: default_max_connections(),
            connection_timeout: default_connection_timeout(),
        }
    }
}

impl DatabaseConfig {
    /// Merge database configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.url != default_database_url() {
            self.url = other.url;
        }
        if other.enabled {
            self.enabled = true;
        }
        if other.max_connections != default_max_connections() {
            self.max_connections = other.max_connections;
        }
        if other.connection_timeout != default_connection_timeout() {
            self.connection_timeout = other.connection_timeout;
        }
        self
    }
}

/// Batch processing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Maximum number of item tasks in flight at once
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
        }
    }
}

impl ProcessingConfig {
    /// Merge processing configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.concurrency != default_concurrency() {
            self.concurrency = other.concurrency;
        }
        self
    }

    /// Validate processing configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.concurrency == 0 {
            return Err("Concurrency must be at least 1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_address() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8081,
            cors: CorsConfig::default(),
        };
        assert_eq!(config.address(), "127.0.0.1:8081");
    }

    #[test]
    fn test_cors_allows_all_when_unset() {
        let cors = CorsConfig::default();
        assert!(cors.allows_all_origins());

        let cors = CorsConfig {
            enabled: true,
            allowed_origins: vec!["https://example.org".to_string()],
        };
        assert!(!cors.allows_all_origins());
    }

    #[test]
    fn test_database_merge_keeps_defaults() {
        let base = DatabaseConfig::default();
        let merged = base.merge(DatabaseConfig {
            url: "postgres://localhost/items".to_string(),
            enabled: true,
            ..DatabaseConfig::default()
        });

        assert_eq!(merged.url, "postgres://localhost/items");
        assert!(merged.enabled);
        assert_eq!(merged.max_connections, default_max_connections());
    }
}
