//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Names an optional TOML configuration file.
pub const CONFIG_PATH_ENV: &str = "GATEWAY_CONFIG";

/// Overrides `listener.port`.
pub const PORT_ENV: &str = "PORT";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid PORT value {0:?}")]
    InvalidPort(String),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<GatewayConfig, ConfigError> {
    let config: GatewayConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Resolve the process configuration.
///
/// Reads the file named by `GATEWAY_CONFIG` when set, defaults otherwise,
/// then applies `PORT`.
pub fn load_from_env() -> Result<GatewayConfig, ConfigError> {
    let config = match std::env::var_os(CONFIG_PATH_ENV) {
        Some(path) => load_config(Path::new(&path))?,
        None => GatewayConfig::default(),
    };
    apply_port_override(config, std::env::var(PORT_ENV).ok().as_deref())
}

/// Apply a `PORT` value on top of a configuration. Empty means unset.
pub fn apply_port_override(
    mut config: GatewayConfig,
    port: Option<&str>,
) -> Result<GatewayConfig, ConfigError> {
    if let Some(raw) = port.filter(|p| !p.is_empty()) {
        config.listener.port = raw
            .parse()
            .map_err(|_| ConfigError::InvalidPort(raw.to_string()))?;
    }
    Ok(config)
}
