//! Request-level error types.
//!
//! Every variant is terminal for the request that raised it and renders as
//! `{"error": "<message>"}` with the message taken from the catalog.

use std::time::Duration;

use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::localization::{MessageCatalog, MessageKey};

/// Failure talking to a backend.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("transport error: {0}")]
    Transport(#[from] hyper_util::client::legacy::Error),

    #[error("no complete response within {0:?}")]
    Timeout(Duration),

    #[error("response body failed: {0}")]
    Body(#[source] hyper::Error),

    #[error("upstream task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Errors a gateway handler can return.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("method {0} not allowed")]
    MethodNotAllowed(Method),

    #[error("filename required")]
    FilenameRequired,

    #[error("no route for {0}")]
    NotFound(String),

    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("failed to read request body: {0}")]
    BodyRead(#[source] axum::Error),

    #[error("failed to build upstream request: {0}")]
    RequestBuild(#[from] axum::http::Error),

    #[error("upstream unavailable: {0}")]
    Upstream(#[from] UpstreamError),
}

/// Wire shape of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub error: &'a str,
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            GatewayError::FilenameRequired => StatusCode::BAD_REQUEST,
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            GatewayError::BodyRead(_) | GatewayError::RequestBuild(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            GatewayError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn message_key(&self) -> MessageKey {
        match self {
            GatewayError::MethodNotAllowed(_) => MessageKey::MethodNotAllowed,
            GatewayError::FilenameRequired => MessageKey::FilenameRequired,
            GatewayError::NotFound(_) => MessageKey::NotFound,
            GatewayError::PayloadTooLarge { .. } => MessageKey::PayloadTooLarge,
            GatewayError::BodyRead(_) | GatewayError::RequestBuild(_) => MessageKey::FailedRequest,
            GatewayError::Upstream(_) => MessageKey::ServiceUnavailable,
        }
    }

    /// Render with the catalog text for `locale`.
    pub fn localized_response(&self, catalog: &MessageCatalog, locale: &str) -> Response {
        error_response(self.status(), catalog.message(locale, self.message_key()))
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        error_response(self.status(), self.message_key().default_text())
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorBody { error: message })).into_response()
}
