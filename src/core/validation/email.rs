//! Email deliverability validation
//!
//! An address passes only if it is well-formed and its domain publishes at
//! least one DNS MX record. Resolution failure and absence of a record are
//! indistinguishable to callers: both reject, neither raises.

use async_trait::async_trait;
use hickory_resolver::TokioAsyncResolver;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use tracing::{debug, warn};

/// Basic email format pattern.
///
/// Slightly stricter than a plain `local@domain` split: the local part is
/// limited to letters, digits and `. _ % + -`, domain labels to letters,
/// digits and hyphens, and the top-level label must be at least two letters.
static EMAIL_FORMAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("email format regex")
});

/// DNS mail-exchange lookup abstraction.
///
/// Production code resolves against real DNS; tests substitute a mock to
/// assert on call counts and to script record sets.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MxResolver: Send + Sync {
    /// Return the MX exchange host names for `domain`.
    ///
    /// # Errors
    /// Any resolution failure (timeout, NXDOMAIN, malformed response).
    async fn lookup_mx(&self, domain: &str) -> anyhow::Result<Vec<String>>;
}

/// Production resolver backed by hickory-dns
pub struct HickoryMxResolver {
    resolver: TokioAsyncResolver,
}

impl HickoryMxResolver {
    /// Build a resolver from the system configuration, falling back to the
    /// default public resolver set when the system config is unreadable.
    pub fn from_system() -> Self {
        let resolver = match TokioAsyncResolver::tokio_from_system_conf() {
            Ok(resolver) => resolver,
            Err(e) => {
                warn!(
                    "Failed to read system resolver configuration, using defaults: {}",
                    e
                );
                TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default())
            }
        };
        Self { resolver }
    }
}

#[async_trait]
impl MxResolver for HickoryMxResolver {
    async fn lookup_mx(&self, domain: &str) -> anyhow::Result<Vec<String>> {
        let lookup = self.resolver.mx_lookup(domain).await?;
        Ok(lookup.iter().map(|mx| mx.exchange().to_utf8()).collect())
    }
}

/// Validator deciding whether an address is deliverable
#[derive(Clone)]
pub struct EmailValidator {
    resolver: Arc<dyn MxResolver>,
}

impl EmailValidator {
    /// Create a validator over the given resolver
    pub fn new(resolver: Arc<dyn MxResolver>) -> Self {
        Self { resolver }
    }

    /// Check format, then deliverability.
    ///
    /// The format gate runs first and short-circuits: no DNS query is issued
    /// for blank or malformed input. One MX lookup per call, no caching.
    pub async fn is_deliverable(&self, value: &str) -> bool {
        if value.trim().is_empty() {
            return false;
        }
        if !EMAIL_FORMAT.is_match(value) {
            return false;
        }

        // Domain is everything after the first '@'; the local part cannot
        // contain '@' per the format pattern.
        let domain = match value.split_once('@') {
            Some((_, domain)) => domain,
            None => return false,
        };

        match self.resolver.lookup_mx(domain).await {
            Ok(records) => !records.is_empty(),
            Err(e) => {
                debug!(domain, error = %e, "MX lookup failed");
                false
            }
        }
    }
}
