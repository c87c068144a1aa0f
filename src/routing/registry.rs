//! Service registry.
//!
//! # Responsibilities
//! - Store the upstream services known to the hub
//! - Look up a service by its key
//! - Preserve declaration order for the landing page
//!
//! # Design Decisions
//! - Immutable after construction (shared via Arc, no locks)
//! - O(1) key lookup via HashMap into a declaration-ordered Vec

use std::collections::HashMap;

use serde::Serialize;

use crate::config::ServiceConfig;

/// An upstream service reachable under `/{key}/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceEntry {
    pub key: String,
    /// Upstream authority; requests go to `https://{host}`.
    pub host: String,
    /// Landing page advertises `https://{host}` instead of the proxied path.
    pub direct_url: bool,
    pub description: String,
    pub logo: String,
    pub paths: Vec<String>,
}

impl From<&ServiceConfig> for ServiceEntry {
    fn from(config: &ServiceConfig) -> Self {
        Self {
            key: config.key.clone(),
            host: config.host.clone(),
            direct_url: config.direct_url,
            description: config.description.clone(),
            logo: config.logo.clone(),
            paths: config.paths.clone(),
        }
    }
}

/// Read-only lookup table from service key to upstream.
#[derive(Debug, Default)]
pub struct ServiceRegistry {
    entries: Vec<ServiceEntry>,
    index: HashMap<String, usize>,
}

impl ServiceRegistry {
    /// Build the registry from validated configuration.
    ///
    /// Later duplicates are ignored; validation rejects them before this point.
    pub fn from_config(services: &[ServiceConfig]) -> Self {
        let mut registry = Self::default();
        for service in services {
            if registry.index.contains_key(&service.key) {
                continue;
            }
            registry
                .index
                .insert(service.key.clone(), registry.entries.len());
            registry.entries.push(ServiceEntry::from(service));
        }
        registry
    }

    /// Look up a service by key. Absence is a normal outcome.
    pub fn lookup(&self, key: &str) -> Option<&ServiceEntry> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ServiceEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::default_services;

    #[test]
    fn test_builtin_lookup() {
        let registry = ServiceRegistry::from_config(&default_services());

        let openai = registry.lookup("openai").unwrap();
        assert_eq!(openai.host, "api.openai.com");
        assert!(!openai.direct_url);

        assert!(registry.lookup("docker").unwrap().direct_url);
        assert!(registry.lookup("unknownservice").is_none());
        assert!(registry.lookup("OpenAI").is_none()); // Keys are case-sensitive
    }

    #[test]
    fn test_declaration_order() {
        let registry = ServiceRegistry::from_config(&default_services());
        let keys: Vec<_> = registry.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(
            keys,
            ["openai", "gemini", "claude", "grok", "docker", "github", "telegram"]
        );
    }

    #[test]
    fn test_first_duplicate_wins() {
        let mut services = default_services();
        let mut shadow = services[0].clone();
        shadow.host = "shadow.example.com".into();
        services.push(shadow);

        let registry = ServiceRegistry::from_config(&services);
        assert_eq!(registry.iter().count(), 7);
        assert_eq!(registry.lookup("openai").unwrap().host, "api.openai.com");
    }
}
