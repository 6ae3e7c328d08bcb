//! Error handling for the item service
//!
//! This module defines the service-wide error type and the JSON envelope
//! every failing request is translated into.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use thiserror::Error;

/// Result type alias for the service
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Main error type for the service
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Request body validation errors, one message per failing constraint
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Path or query parameter constraint violations
    #[error("Constraint violation: {0}")]
    InvalidParameter(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Store-level constraint conflicts (e.g. duplicate email)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// HTTP status this error translates to
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) | ServiceError::InvalidParameter(_) => {
                StatusCode::BAD_REQUEST
            }
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Config(_)
            | ServiceError::Database(_)
            | ServiceError::Io(_)
            | ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short error category string used in the envelope
    pub fn category(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "Validation Failed",
            ServiceError::InvalidParameter(_) => "Constraint Violation",
            ServiceError::NotFound(_) => "Not Found",
            ServiceError::Conflict(_) => "Data Conflict",
            ServiceError::Config(_)
            | ServiceError::Database(_)
            | ServiceError::Io(_)
            | ServiceError::Internal(_) => "Internal Server Error",
        }
    }

    /// Human-readable detail messages, without the category prefix
    pub fn messages(&self) -> Vec<String> {
        match self {
            ServiceError::Validation(msgs) => msgs.clone(),
            ServiceError::Config(m)
            | ServiceError::InvalidParameter(m)
            | ServiceError::NotFound(m)
            | ServiceError::Conflict(m)
            | ServiceError::Internal(m) => vec![m.clone()],
            ServiceError::Database(e) => vec![e.to_string()],
            ServiceError::Io(e) => vec![e.to_string()],
        }
    }
}

/// Helper constructors
impl ServiceError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict<S: Into<String>>(message: S) -> Self {
        Self::Conflict(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    pub fn invalid_parameter<S: Into<String>>(message: S) -> Self {
        Self::InvalidParameter(message.into())
    }
}

/// Envelope for all error responses returned by the API
///
/// `timestamp` is ISO-8601 with offset, `status` the numeric HTTP status,
/// `error` a short category, `messages` the ordered detail list and `path`
/// the request URI that triggered the error.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEnvelope {
    pub timestamp: String,
    pub status: u16,
    pub error: String,
    pub messages: Vec<String>,
    pub path: String,
}

impl ErrorEnvelope {
    /// Build an envelope stamped with the current time
    pub fn new(status: u16, error: &str, messages: Vec<String>, path: &str) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            status,
            error: error.to_string(),
            messages,
            path: path.to_string(),
        }
    }
}

/// A [`ServiceError`] bound to the request path it occurred on
///
/// Handlers wrap service failures in this type so the rendered envelope can
/// carry the originating URI. The translation to HTTP happens once, here,
/// through actix's [`ResponseError`].
#[derive(Debug)]
pub struct ApiError {
    inner: ServiceError,
    path: String,
    category: Option<&'static str>,
}

impl ApiError {
    /// Attach a request path to a service error
    pub fn new(inner: ServiceError, path: impl Into<String>) -> Self {
        Self {
            inner,
            path: path.into(),
            category: None,
        }
    }

    /// Same, with an explicit envelope category replacing the default one
    pub fn with_category(
        inner: ServiceError,
        path: impl Into<String>,
        category: &'static str,
    ) -> Self {
        Self {
            inner,
            path: path.into(),
            category: Some(category),
        }
    }

    /// The underlying service error
    pub fn inner(&self) -> &ServiceError {
        &self.inner
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.inner.status_code()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.inner.status_code();

        if status.is_server_error() {
            tracing::error!(path = %self.path, error = %self.inner, "request failed");
        }

        let envelope = ErrorEnvelope::new(
            status.as_u16(),
            self.category.unwrap_or_else(|| self.inner.category()),
            self.inner.messages(),
            &self.path,
        );
        HttpResponse::build(status).json(envelope)
    }
}
