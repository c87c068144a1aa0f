//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the hub.
//! All types derive Serde traits for deserialization from config files.

use serde::Deserialize;

/// Root configuration for the API hub.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address, port).
    pub listener: ListenerConfig,

    /// Upstream connection settings.
    pub upstream: UpstreamConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Service registry entries, in landing page order.
    pub services: Vec<ServiceConfig>,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            upstream: UpstreamConfig::default(),
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
            services: default_services(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address without port (e.g., "0.0.0.0").
    pub bind_address: String,

    /// Listening port. Overridden by `--port` / `PORT`.
    pub port: u16,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl ListenerConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn socket_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

/// Upstream connection settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// URI scheme used for every upstream. Always "https" in production;
    /// "http" is accepted so local test upstreams can stand in.
    pub scheme: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            scheme: "https".to_string(),
        }
    }
}

/// Timeout configuration for the two proxy legs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Upstream connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Maximum silence between body frames on either leg, in seconds.
    pub idle_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 10,
            idle_secs: 300,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// A single upstream service exposed under `/{key}/`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ServiceConfig {
    /// First path segment that selects this service.
    pub key: String,

    /// Upstream authority (`host` or `host:port`).
    pub host: String,

    /// Paths advertised on the landing page.
    #[serde(default)]
    pub paths: Vec<String>,

    /// Human readable description for the landing page.
    #[serde(default)]
    pub description: String,

    /// Emoji shown on the landing page card.
    #[serde(default)]
    pub logo: String,

    /// Advertise the upstream URL itself instead of the proxied path.
    #[serde(default)]
    pub direct_url: bool,
}

impl ServiceConfig {
    fn builtin(key: &str, host: &str, path: &str, description: &str, logo: &str) -> Self {
        Self {
            key: key.to_string(),
            host: host.to_string(),
            paths: vec![path.to_string()],
            description: description.to_string(),
            logo: logo.to_string(),
            direct_url: false,
        }
    }
}

/// The compiled-in service registry.
pub fn default_services() -> Vec<ServiceConfig> {
    vec![
        ServiceConfig::builtin("openai", "api.openai.com", "/v1/", "OpenAI API proxy", "🤖"),
        ServiceConfig::builtin(
            "gemini",
            "generativelanguage.googleapis.com",
            "/v1beta/models/",
            "Google Gemini API proxy",
            "🌟",
        ),
        ServiceConfig::builtin("claude", "api.anthropic.com", "/v1/", "Claude API proxy", "🧠"),
        ServiceConfig::builtin("grok", "api.x.ai", "/v1/", "Grok API proxy", "⚡"),
        ServiceConfig {
            direct_url: true,
            ..ServiceConfig::builtin("docker", "docker.ixu.cc", "/", "Docker Registry", "🐳")
        },
        ServiceConfig::builtin("github", "github.com", "/", "GitHub proxy", "📦"),
        ServiceConfig::builtin(
            "telegram",
            "api.telegram.org",
            "/bot",
            "Telegram Bot API proxy",
            "📱",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProxyConfig::default();
        assert_eq!(config.listener.port, 3000);
        assert_eq!(config.listener.socket_address(), "0.0.0.0:3000");
        assert_eq!(config.upstream.scheme, "https");
        assert_eq!(config.services.len(), 7);

        let docker = config.services.iter().find(|s| s.key == "docker").unwrap();
        assert!(docker.direct_url);
        assert_eq!(docker.host, "docker.ixu.cc");
    }

    #[test]
    fn test_services_section_replaces_builtins() {
        let config: ProxyConfig = toml::from_str(
            r#"
            [listener]
            port = 8080

            [[services]]
            key = "openai"
            host = "api.openai.com"
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.port, 8080);
        assert_eq!(config.listener.bind_address, "0.0.0.0");
        assert_eq!(config.services.len(), 1);
        assert!(!config.services[0].direct_url);
        assert!(config.services[0].paths.is_empty());
    }
}
