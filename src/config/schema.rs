//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// In-cluster address of the authentication service.
pub const DEFAULT_AUTH_URL: &str = "http://auth-service.auth.svc.cluster.local:3001";

/// In-cluster address of the image storage service.
pub const DEFAULT_IMAGE_URL: &str =
    "http://image-storage-service.image-storage.svc.cluster.local:3003";

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (host, port).
    pub listener: ListenerConfig,

    /// Backend service base URLs.
    pub services: ServicesConfig,

    /// Outbound proxy behaviour.
    pub proxy: ProxyConfig,

    /// Message catalog settings.
    pub localization: LocalizationConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind.
    pub host: String,

    /// TCP port, overridable through `PORT`.
    pub port: u16,
}

impl ListenerConfig {
    /// Socket address string handed to the TCP listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3002,
        }
    }
}

/// Base URLs of the two backends behind the gateway.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServicesConfig {
    /// Authentication service (register, login, verify).
    pub auth_url: String,

    /// Image storage service (upload, images, stats).
    pub image_url: String,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            auth_url: DEFAULT_AUTH_URL.to_string(),
            image_url: DEFAULT_IMAGE_URL.to_string(),
        }
    }
}

/// Outbound request settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Upper bound for a backend call, in seconds.
    pub timeout_secs: u64,

    /// Maximum buffered request body. `None` buffers without limit.
    pub max_body_bytes: Option<usize>,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_body_bytes: None,
        }
    }
}

/// Localization of response messages.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LocalizationConfig {
    /// Negotiate the locale from `Accept-Language`. When false every
    /// response uses `default_locale`.
    pub enabled: bool,

    /// Locale used when negotiation finds nothing better.
    pub default_locale: String,

    /// Extra or overriding messages, keyed by locale then message key.
    pub messages: HashMap<String, HashMap<String, String>>,
}

impl Default for LocalizationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            default_locale: "en".to_string(),
            messages: HashMap::new(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Enable the Prometheus scrape endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
