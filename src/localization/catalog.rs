//! Message keys and the `(locale, key) → text` table.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use axum::http::HeaderMap;

use crate::config::LocalizationConfig;
use crate::localization::negotiate::preferred_language;

/// Every user-visible string the gateway produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    ApiRunning,
    Healthy,
    ApiService,
    MethodNotAllowed,
    ServiceUnavailable,
    FailedRequest,
    FilenameRequired,
    PayloadTooLarge,
    NotFound,
}

impl MessageKey {
    pub const ALL: [MessageKey; 9] = [
        MessageKey::ApiRunning,
        MessageKey::Healthy,
        MessageKey::ApiService,
        MessageKey::MethodNotAllowed,
        MessageKey::ServiceUnavailable,
        MessageKey::FailedRequest,
        MessageKey::FilenameRequired,
        MessageKey::PayloadTooLarge,
        MessageKey::NotFound,
    ];

    /// Key name as written in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKey::ApiRunning => "api_running",
            MessageKey::Healthy => "healthy",
            MessageKey::ApiService => "api_service",
            MessageKey::MethodNotAllowed => "method_not_allowed",
            MessageKey::ServiceUnavailable => "service_unavailable",
            MessageKey::FailedRequest => "failed_request",
            MessageKey::FilenameRequired => "filename_required",
            MessageKey::PayloadTooLarge => "payload_too_large",
            MessageKey::NotFound => "not_found",
        }
    }

    /// Built-in English text, the last fallback of every lookup.
    pub fn default_text(self) -> &'static str {
        match self {
            MessageKey::ApiRunning => "API Service is running",
            MessageKey::Healthy => "healthy",
            MessageKey::ApiService => "api-service",
            MessageKey::MethodNotAllowed => "Method not allowed",
            MessageKey::ServiceUnavailable => "Service unavailable",
            MessageKey::FailedRequest => "Failed to create request",
            MessageKey::FilenameRequired => "Filename required",
            MessageKey::PayloadTooLarge => "Payload too large",
            MessageKey::NotFound => "Not found",
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing a key name that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown message key {0:?}")]
pub struct UnknownMessageKey(pub String);

impl FromStr for MessageKey {
    type Err = UnknownMessageKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MessageKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownMessageKey(s.to_string()))
    }
}

const ARABIC: [(MessageKey, &str); 7] = [
    (MessageKey::ApiRunning, "خدمة API تعمل"),
    (MessageKey::Healthy, "صحي"),
    (MessageKey::ApiService, "خدمة-API"),
    (MessageKey::MethodNotAllowed, "الطريقة غير مسموح بها"),
    (MessageKey::ServiceUnavailable, "الخدمة غير متاحة"),
    (MessageKey::FailedRequest, "فشل في إنشاء الطلب"),
    (MessageKey::FilenameRequired, "اسم الملف مطلوب"),
];

/// Localized messages with default-locale fallback.
///
/// Lookups never fail: a key missing in the requested locale falls back to
/// the default locale, then to [`MessageKey::default_text`].
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    enabled: bool,
    default_locale: String,
    tables: HashMap<String, HashMap<MessageKey, String>>,
}

impl MessageCatalog {
    /// English and Arabic tables, negotiation disabled.
    pub fn builtin() -> Self {
        let english: HashMap<MessageKey, String> = MessageKey::ALL
            .into_iter()
            .map(|key| (key, key.default_text().to_string()))
            .collect();
        let arabic: HashMap<MessageKey, String> = ARABIC
            .into_iter()
            .map(|(key, text)| (key, text.to_string()))
            .collect();

        Self {
            enabled: false,
            default_locale: "en".to_string(),
            tables: HashMap::from([("en".to_string(), english), ("ar".to_string(), arabic)]),
        }
    }

    /// Built-in tables merged with configured messages.
    ///
    /// Keys are expected to have passed validation; unknown ones are skipped.
    pub fn from_config(config: &LocalizationConfig) -> Self {
        let mut catalog = Self::builtin();
        catalog.enabled = config.enabled;
        catalog.default_locale = config.default_locale.clone();

        for (locale, messages) in &config.messages {
            let table = catalog.tables.entry(locale.clone()).or_default();
            for (name, text) in messages {
                match name.parse::<MessageKey>() {
                    Ok(key) => {
                        table.insert(key, text.clone());
                    }
                    Err(e) => tracing::warn!(locale = %locale, error = %e, "Skipping message"),
                }
            }
        }
        catalog
    }

    pub fn has_locale(&self, locale: &str) -> bool {
        self.tables.contains_key(locale)
    }

    /// Pick the locale for a request.
    pub fn negotiate(&self, headers: &HeaderMap) -> &str {
        if !self.enabled {
            return &self.default_locale;
        }
        preferred_language(headers)
            .and_then(|lang| self.tables.get_key_value(lang.as_str()))
            .map(|(locale, _)| locale.as_str())
            .unwrap_or(self.default_locale.as_str())
    }

    /// Text for `key` in `locale`.
    pub fn message(&self, locale: &str, key: MessageKey) -> &str {
        self.tables
            .get(locale)
            .and_then(|table| table.get(&key))
            .or_else(|| {
                self.tables
                    .get(&self.default_locale)
                    .and_then(|table| table.get(&key))
            })
            .map(String::as_str)
            .unwrap_or_else(|| key.default_text())
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header::ACCEPT_LANGUAGE, HeaderValue};

    fn headers(accept_language: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(accept_language));
        headers
    }

    #[test]
    fn test_key_names_round_trip() {
        for key in MessageKey::ALL {
            assert_eq!(key.as_str().parse::<MessageKey>(), Ok(key));
        }
        assert_eq!(
            "greeting".parse::<MessageKey>(),
            Err(UnknownMessageKey("greeting".into()))
        );
    }

    #[test]
    fn test_negotiation_disabled_uses_default() {
        let catalog = MessageCatalog::builtin();
        assert_eq!(catalog.negotiate(&headers("ar")), "en");
        assert_eq!(
            catalog.message(catalog.negotiate(&headers("ar")), MessageKey::MethodNotAllowed),
            "Method not allowed"
        );
    }

    #[test]
    fn test_negotiation_enabled() {
        let catalog = MessageCatalog::from_config(&LocalizationConfig {
            enabled: true,
            ..LocalizationConfig::default()
        });
        assert_eq!(catalog.negotiate(&headers("ar")), "ar");
        assert_eq!(catalog.negotiate(&headers("ar-EG,en;q=0.5")), "ar");
        assert_eq!(catalog.negotiate(&headers("en-US,ar;q=0.9")), "en");
        assert_eq!(catalog.negotiate(&headers("de")), "en");
        assert_eq!(catalog.negotiate(&HeaderMap::new()), "en");
    }

    #[test]
    fn test_missing_key_falls_back_to_default_locale() {
        let catalog = MessageCatalog::builtin();
        assert_eq!(catalog.message("ar", MessageKey::FilenameRequired), "اسم الملف مطلوب");
        assert_eq!(catalog.message("ar", MessageKey::NotFound), "Not found");
        assert_eq!(catalog.message("xx", MessageKey::Healthy), "healthy");
    }

    #[test]
    fn test_configured_messages_override_and_extend() {
        let mut config = LocalizationConfig::default();
        config.enabled = true;
        config.messages.insert(
            "fr".into(),
            HashMap::from([
                ("method_not_allowed".to_string(), "Méthode non autorisée".to_string()),
                ("bogus".to_string(), "ignored".to_string()),
            ]),
        );
        config.messages.insert(
            "en".into(),
            HashMap::from([("healthy".to_string(), "ok".to_string())]),
        );

        let catalog = MessageCatalog::from_config(&config);
        assert_eq!(catalog.negotiate(&headers("fr-CA")), "fr");
        assert_eq!(catalog.message("fr", MessageKey::MethodNotAllowed), "Méthode non autorisée");
        assert_eq!(catalog.message("fr", MessageKey::FilenameRequired), "Filename required");
        assert_eq!(catalog.message("en", MessageKey::Healthy), "ok");
    }
}
