//! Shared utilities
//!
//! Cross-cutting helpers used by every layer of the service.

pub mod error;
