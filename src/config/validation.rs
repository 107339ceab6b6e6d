//! Configuration validation.
//!
//! Serde handles the syntax; this module checks values. All problems are
//! collected so a bad file is reported in one pass.

use std::net::SocketAddr;
use std::str::FromStr;

use crate::config::schema::GatewayConfig;
use crate::localization::{MessageCatalog, MessageKey};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("services.{field}: invalid URL {value:?}: {reason}")]
    InvalidServiceUrl {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("proxy.timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("proxy.max_body_bytes must be greater than zero when set")]
    ZeroBodyLimit,

    #[error("localization.default_locale {0:?} has no messages")]
    UnknownDefaultLocale(String),

    #[error("localization.messages.{locale}: unknown message key {key:?}")]
    UnknownMessageKey { locale: String, key: String },

    #[error("observability.metrics_address {0:?} is not a socket address")]
    InvalidMetricsAddress(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_service_url("auth_url", &config.services.auth_url, &mut errors);
    check_service_url("image_url", &config.services.image_url, &mut errors);

    if config.proxy.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    if config.proxy.max_body_bytes == Some(0) {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    let localization = &config.localization;
    let builtin = MessageCatalog::builtin();
    if !builtin.has_locale(&localization.default_locale)
        && !localization.messages.contains_key(&localization.default_locale)
    {
        errors.push(ValidationError::UnknownDefaultLocale(
            localization.default_locale.clone(),
        ));
    }
    for (locale, messages) in &localization.messages {
        for key in messages.keys() {
            if MessageKey::from_str(key).is_err() {
                errors.push(ValidationError::UnknownMessageKey {
                    locale: locale.clone(),
                    key: key.clone(),
                });
            }
        }
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_service_url(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    let reason = match url::Url::parse(value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => return,
        Ok(parsed) => format!("unsupported scheme {}", parsed.scheme()),
        Err(e) => e.to_string(),
    };
    errors.push(ValidationError::InvalidServiceUrl {
        field,
        value: value.to_string(),
        reason,
    });
}
