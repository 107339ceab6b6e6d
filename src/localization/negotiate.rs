//! `Accept-Language` parsing.

use axum::http::{header::ACCEPT_LANGUAGE, HeaderMap};

/// Primary subtag of the first language range, lowercased.
///
/// Quality values are not weighed: `"en;q=0.1, ar"` yields `"en"`.
pub fn preferred_language(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(ACCEPT_LANGUAGE)?.to_str().ok()?;
    let range = value.split(',').next()?.split(';').next()?.trim();
    let primary = range.split(['-', '_']).next()?.trim();

    if primary.is_empty() || primary == "*" {
        return None;
    }
    Some(primary.to_ascii_lowercase())
}
