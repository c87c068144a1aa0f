//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Service keys are unique, non-empty, single path segments
//! - Service hosts are valid URI authorities
//! - Timeouts are non-zero
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::str::FromStr;

use axum::http::uri::Authority;

use crate::config::schema::ProxyConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("service key must not be empty")]
    EmptyServiceKey,
    #[error("service key '{0}' must be a single path segment")]
    InvalidServiceKey(String),
    #[error("duplicate service key '{0}'")]
    DuplicateServiceKey(String),
    #[error("service '{key}' has invalid host '{host}'")]
    InvalidHost { key: String, host: String },
    #[error("unsupported upstream scheme '{0}' (expected https or http)")]
    UnsupportedScheme(String),
    #[error("timeout '{0}' must be greater than zero")]
    ZeroTimeout(&'static str),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for service in &config.services {
        if service.key.is_empty() {
            errors.push(ValidationError::EmptyServiceKey);
        } else if service.key.contains('/') {
            errors.push(ValidationError::InvalidServiceKey(service.key.clone()));
        } else if !seen.insert(service.key.as_str()) {
            errors.push(ValidationError::DuplicateServiceKey(service.key.clone()));
        }

        if service.host.is_empty() || Authority::from_str(&service.host).is_err() {
            errors.push(ValidationError::InvalidHost {
                key: service.key.clone(),
                host: service.host.clone(),
            });
        }
    }

    match config.upstream.scheme.as_str() {
        "https" => {}
        "http" => tracing::warn!("Upstream scheme is plain http; traffic leaves unencrypted"),
        other => errors.push(ValidationError::UnsupportedScheme(other.to_string())),
    }

    let timeouts = [
        ("connect_secs", config.timeouts.connect_secs),
        ("idle_secs", config.timeouts.idle_secs),
    ];
    for (name, value) in timeouts {
        if value == 0 {
            errors.push(ValidationError::ZeroTimeout(name));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
