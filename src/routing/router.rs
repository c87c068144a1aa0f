//! Path resolution.
//!
//! # Responsibilities
//! - Extract the service key from the first path segment
//! - Gate every upstream call on a registry hit
//! - Compute the upstream path with the service prefix removed
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - A `Route` borrows its registry entry, so an unknown key cannot reach the dispatcher
//! - Query strings are left to the caller and forwarded untouched

use std::sync::Arc;

use crate::routing::registry::{ServiceEntry, ServiceRegistry};

/// Outcome of resolving a request path.
#[derive(Debug, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// No path segments: serve the landing page.
    Root,
    /// First segment is not a registered service.
    Invalid { service: String },
    /// Known service with the remaining upstream path.
    Service(Route<'a>),
}

/// A request resolved to a registered upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route<'a> {
    entry: &'a ServiceEntry,
    remainder: String,
}

impl<'a> Route<'a> {
    pub fn entry(&self) -> &'a ServiceEntry {
        self.entry
    }

    pub fn service(&self) -> &'a str {
        &self.entry.key
    }

    /// Path below the service prefix, as received (may be empty).
    pub fn remainder(&self) -> &str {
        &self.remainder
    }

    /// True for `/{service}` and `/{service}/`.
    pub fn is_bare(&self) -> bool {
        self.remainder.is_empty() || self.remainder == "/"
    }

    /// Path sent upstream; never empty.
    pub fn upstream_path(&self) -> &str {
        if self.remainder.is_empty() {
            "/"
        } else {
            &self.remainder
        }
    }
}

/// Resolves request paths against the service registry.
#[derive(Debug)]
pub struct Router {
    registry: Arc<ServiceRegistry>,
}

impl Router {
    pub fn new(registry: Arc<ServiceRegistry>) -> Self {
        Self { registry }
    }

    /// Resolve a request path (without query string).
    pub fn resolve(&self, path: &str) -> Resolution<'_> {
        let Some(key) = path.split('/').find(|segment| !segment.is_empty()) else {
            return Resolution::Root;
        };

        let Some(entry) = self.registry.lookup(key) else {
            tracing::debug!(service = %key, "Unknown service");
            return Resolution::Invalid {
                service: key.to_string(),
            };
        };

        let prefix = format!("/{}", key);
        let remainder = match path.find(&prefix) {
            Some(at) => format!("{}{}", &path[..at], &path[at + prefix.len()..]),
            None => path.to_string(),
        };

        Resolution::Service(Route { entry, remainder })
    }
}
