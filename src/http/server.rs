//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum Router and wire up middleware (tracing, request ID)
//! - Resolve each request against the route table
//! - Answer local endpoints, forward the rest through the proxy
//! - Render errors in the negotiated locale
//! - Record per-route metrics

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::http::local::{self, LocalContext};
use crate::http::proxy::Proxy;
use crate::lifecycle::ShutdownSignal;
use crate::localization::MessageCatalog;
use crate::observability::metrics;
use crate::routing::{RouteAction, RouteMatch, RouteTable};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub catalog: Arc<MessageCatalog>,
    pub proxy: Proxy,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a server exposing the standard route table.
    pub fn new(config: GatewayConfig) -> Self {
        let routes = RouteTable::standard(&config.services);
        Self::with_routes(config, routes)
    }

    /// Create a server over an explicit route table.
    pub fn with_routes(config: GatewayConfig, routes: RouteTable) -> Self {
        let state = AppState {
            routes: Arc::new(routes),
            catalog: Arc::new(MessageCatalog::from_config(&config.localization)),
            proxy: Proxy::new(&config.proxy),
        };

        Self {
            router: Self::build_router(state),
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", any(gateway_handler))
            .route("/{*path}", any(gateway_handler))
            .with_state(state)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered router, for serving or in-process tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown.wait())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Single entry point for every path.
async fn gateway_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let locale = state.catalog.negotiate(request.headers());

    let Some(matched) = state.routes.resolve(&path) else {
        tracing::debug!(path = %path, "No route matched");
        metrics::record_request("none", method.as_str(), 404, start);
        return GatewayError::NotFound(path.clone()).localized_response(&state.catalog, locale);
    };
    let route_name = matched.route.name;

    let response = match handle_route(&state, matched, locale, request).await {
        Ok(response) => response,
        Err(err) => {
            if let GatewayError::Upstream(ref e) = err {
                tracing::warn!(route = route_name, error = %e, "Upstream request failed");
            }
            err.localized_response(&state.catalog, locale)
        }
    };

    metrics::record_request(route_name, method.as_str(), response.status().as_u16(), start);
    response
}

async fn handle_route(
    state: &AppState,
    matched: RouteMatch<'_, '_>,
    locale: &str,
    request: Request<Body>,
) -> Result<Response, GatewayError> {
    let route = matched.route;
    match &route.action {
        RouteAction::Local(endpoint) => {
            route.check_method(request.method())?;
            let ctx = LocalContext {
                routes: &state.routes,
                catalog: &state.catalog,
                locale,
                suffix: matched.suffix,
            };
            Ok(local::respond(*endpoint, &ctx))
        }
        RouteAction::Proxy { upstream, path } => {
            // Filename presence is checked before the method.
            let backend_path = path.resolve(matched.suffix)?;
            route.check_method(request.method())?;

            let request_id = request
                .headers()
                .get("x-request-id")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("unknown")
                .to_string();
            tracing::debug!(
                request_id = %request_id,
                route = route.name,
                upstream = upstream.name,
                method = %request.method(),
                backend_path = %backend_path,
                "Proxying request"
            );

            state
                .proxy
                .forward(request, &upstream.base_url, &backend_path)
                .await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, Method, StatusCode};
    use tower::ServiceExt;

    use crate::routing::{LocalEndpoint, PathPattern, Route};

    async fn call(router: Router, method: Method, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn router() -> Router {
        HttpServer::new(GatewayConfig::default()).router()
    }

    #[tokio::test]
    async fn test_index_document() {
        let (status, json) = call(router(), Method::GET, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            serde_json::json!({
                "message": "API Service is running",
                "version": "1.0.0",
                "endpoints": [
                    "/health", "/api/posts", "/register", "/login", "/verify",
                    "/upload", "/images", "/images/{filename}", "/stats"
                ]
            })
        );

        // The root pattern also catches unknown paths.
        let (status, unknown) = call(router(), Method::POST, "/does-not-exist").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(unknown, json);
    }

    #[tokio::test]
    async fn test_health_document() {
        let (status, json) = call(router(), Method::GET, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["service"], "api-service");
        assert!(json["timestamp"].as_i64().unwrap() > 1_600_000_000);
    }

    #[tokio::test]
    async fn test_posts() {
        let (status, json) = call(router(), Method::GET, "/api/posts").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["posts"].as_array().unwrap().len(), 2);
        assert_eq!(json["posts"][1]["title"], "Second Post");

        for id in ["42", "abc"] {
            let (status, json) = call(router(), Method::GET, &format!("/api/posts/{id}")).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(json["id"], 1);
            assert_eq!(json["title"], format!("Post {id}"));
            assert_eq!(json["content"], format!("This is post number {id}"));
        }
    }

    #[tokio::test]
    async fn test_post_label_is_percent_decoded() {
        let cases = [
            ("/api/posts/hello%20world", "hello world"),
            ("/api/posts/caf%C3%A9", "café"),
            ("/api/posts/50%25", "50%"),
        ];
        for (uri, label) in cases {
            let (status, json) = call(router(), Method::GET, uri).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(json["title"], format!("Post {label}"), "{uri}");
            assert_eq!(json["content"], format!("This is post number {label}"));
        }
    }

    #[tokio::test]
    async fn test_disallowed_methods() {
        let cases = [
            (Method::GET, "/register"),
            (Method::PUT, "/login"),
            (Method::GET, "/verify"),
            (Method::GET, "/upload"),
            (Method::POST, "/images"),
            (Method::POST, "/images/cat.png"),
            (Method::PUT, "/images/cat.png"),
            (Method::DELETE, "/stats"),
        ];
        for (method, uri) in cases {
            let (status, json) = call(router(), method.clone(), uri).await;
            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{method} {uri}");
            assert_eq!(json, serde_json::json!({"error": "Method not allowed"}));
        }
    }

    #[tokio::test]
    async fn test_missing_filename() {
        for method in [Method::GET, Method::DELETE, Method::POST] {
            let (status, json) = call(router(), method, "/images/").await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json, serde_json::json!({"error": "Filename required"}));
        }
    }

    #[tokio::test]
    async fn test_localized_responses() {
        let mut config = GatewayConfig::default();
        config.localization.enabled = true;
        let router = HttpServer::new(config).router();

        let request = Request::builder()
            .method(Method::GET)
            .uri("/register")
            .header(header::ACCEPT_LANGUAGE, "ar-SA")
            .body(Body::empty())
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "الطريقة غير مسموح بها");

        let request = Request::builder()
            .uri("/health")
            .header(header::ACCEPT_LANGUAGE, "ar")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "صحي");
        assert_eq!(json["service"], "خدمة-API");
    }

    #[tokio::test]
    async fn test_explicit_route_table_without_catch_all() {
        let routes = RouteTable::new(vec![Route::local(
            "health",
            PathPattern::exact("/health"),
            LocalEndpoint::Health,
        )]);
        let router = HttpServer::with_routes(GatewayConfig::default(), routes).router();

        let (status, json) = call(router.clone(), Method::GET, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "healthy");

        let (status, json) = call(router, Method::GET, "/").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json, serde_json::json!({"error": "Not found"}));
    }

    #[tokio::test]
    async fn test_request_id_is_echoed() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = router().oneshot(request).await.unwrap();
        assert!(response.headers().contains_key("x-request-id"));
    }
}
