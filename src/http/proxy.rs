//! Forward a request to a backend and relay its answer.
//!
//! # Responsibilities
//! - Buffer the inbound body
//! - Rebuild the request against `base_url + path`, headers copied verbatim
//! - Bound the whole backend exchange, body included, with one deadline
//! - Relay status and body stream unchanged
//!
//! # Design Decisions
//! - No retries: every failure is terminal for the request
//! - The inbound query string is not forwarded
//! - The backend call runs on its own task, so a client that hangs up does
//!   not cancel it

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, HeaderValue, Request},
    response::{IntoResponse, Response},
};
use http_body_util::LengthLimitError;
use hyper::body::{Bytes, Frame, Incoming, SizeHint};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::time::{Instant, Sleep};

use crate::config::ProxyConfig;
use crate::error::{GatewayError, UpstreamError};

/// Outbound half of the gateway.
#[derive(Clone)]
pub struct Proxy {
    client: Client<HttpConnector, Body>,
    timeout: Duration,
    max_body_bytes: Option<usize>,
}

impl Proxy {
    pub fn new(config: &ProxyConfig) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self {
            client,
            timeout: Duration::from_secs(config.timeout_secs),
            max_body_bytes: config.max_body_bytes,
        }
    }

    /// Forward `request` to `base_url` followed by `path`.
    pub async fn forward(
        &self,
        request: Request<Body>,
        base_url: &str,
        path: &str,
    ) -> Result<Response, GatewayError> {
        let (parts, body) = request.into_parts();

        let limit = self.max_body_bytes.unwrap_or(usize::MAX);
        let body = axum::body::to_bytes(body, limit)
            .await
            .map_err(|e| match self.max_body_bytes {
                Some(limit) if exceeds_limit(&e) => GatewayError::PayloadTooLarge { limit },
                _ => GatewayError::BodyRead(e),
            })?;

        let mut builder = Request::builder()
            .method(parts.method)
            .uri(format!("{base_url}{path}"));
        if let Some(headers) = builder.headers_mut() {
            for (name, value) in parts.headers.iter() {
                headers.append(name.clone(), value.clone());
            }
        }
        let outbound = builder.body(Body::from(body))?;

        let client = self.client.clone();
        let timeout = self.timeout;
        let deadline = Instant::now() + timeout;
        let upstream = tokio::spawn(async move {
            match tokio::time::timeout_at(deadline, client.request(outbound)).await {
                Ok(result) => result.map_err(UpstreamError::from),
                Err(_) => Err(UpstreamError::Timeout(timeout)),
            }
        });
        let response: hyper::Response<Incoming> = upstream.await.map_err(UpstreamError::from)??;

        let (parts, body) = response.into_parts();
        Ok((
            parts.status,
            [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
            Body::new(DeadlineBody::new(body, deadline, timeout)),
        )
            .into_response())
    }
}

/// True when `to_bytes` stopped because the body exceeded its limit.
fn exceeds_limit(err: &axum::Error) -> bool {
    let mut source = std::error::Error::source(err);
    while let Some(e) = source {
        if e.is::<LengthLimitError>() {
            return true;
        }
        source = e.source();
    }
    false
}

/// Backend body that fails once the exchange deadline has passed.
struct DeadlineBody {
    inner: Incoming,
    deadline: Pin<Box<Sleep>>,
    timeout: Duration,
}

impl DeadlineBody {
    fn new(inner: Incoming, deadline: Instant, timeout: Duration) -> Self {
        Self {
            inner,
            deadline: Box::pin(tokio::time::sleep_until(deadline)),
            timeout,
        }
    }
}

impl hyper::body::Body for DeadlineBody {
    type Data = Bytes;
    type Error = UpstreamError;

    fn poll_frame(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        if self.deadline.as_mut().poll(cx).is_ready() {
            return Poll::Ready(Some(Err(UpstreamError::Timeout(self.timeout))));
        }
        Pin::new(&mut self.inner)
            .poll_frame(cx)
            .map(|frame| frame.map(|r| r.map_err(UpstreamError::Body)))
    }

    fn is_end_stream(&self) -> bool {
        self.inner.is_end_stream()
    }

    fn size_hint(&self) -> SizeHint {
        self.inner.size_hint()
    }
}
