//! Route table and lookup.
//!
//! # Design Decisions
//! - Immutable after construction (shared via Arc without locks)
//! - An exact pattern beats every prefix; the longest prefix wins otherwise
//! - Explicit `None` rather than a silent default when nothing matches

use axum::http::Method;

use crate::config::ServicesConfig;
use crate::error::GatewayError;
use crate::routing::matcher::{MethodFilter, PathPattern};

/// Endpoints answered inside the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalEndpoint {
    Index,
    Health,
    Posts,
    Post,
}

/// A backend service addressed by base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upstream {
    /// Short name used in logs and metrics.
    pub name: &'static str,
    pub base_url: String,
}

impl Upstream {
    pub fn new(name: &'static str, base_url: impl Into<String>) -> Self {
        Self {
            name,
            base_url: base_url.into(),
        }
    }
}

/// Path requested from the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendPath {
    /// Always this path.
    Fixed(String),
    /// This base followed by the captured suffix, which must be non-empty.
    Suffixed(String),
}

impl BackendPath {
    pub fn resolve(&self, suffix: &str) -> Result<String, GatewayError> {
        match self {
            BackendPath::Fixed(path) => Ok(path.clone()),
            BackendPath::Suffixed(_) if suffix.is_empty() => Err(GatewayError::FilenameRequired),
            BackendPath::Suffixed(base) => Ok(format!("{base}{suffix}")),
        }
    }
}

/// What a matched route does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAction {
    Local(LocalEndpoint),
    Proxy {
        upstream: Upstream,
        path: BackendPath,
    },
}

/// A single route table entry.
#[derive(Debug, Clone)]
pub struct Route {
    /// Route identifier for logging/metrics.
    pub name: &'static str,
    pub pattern: PathPattern,
    pub methods: MethodFilter,
    pub action: RouteAction,
    /// Label advertised by the index document, if any.
    pub listed_as: Option<&'static str>,
}

impl Route {
    pub fn local(name: &'static str, pattern: PathPattern, endpoint: LocalEndpoint) -> Self {
        Self {
            name,
            pattern,
            methods: MethodFilter::Any,
            action: RouteAction::Local(endpoint),
            listed_as: None,
        }
    }

    pub fn proxy(
        name: &'static str,
        pattern: PathPattern,
        methods: MethodFilter,
        upstream: &Upstream,
        path: BackendPath,
    ) -> Self {
        Self {
            name,
            pattern,
            methods,
            action: RouteAction::Proxy {
                upstream: upstream.clone(),
                path,
            },
            listed_as: None,
        }
    }

    /// Advertise this route in the index document under `label`.
    pub fn listed(mut self, label: &'static str) -> Self {
        self.listed_as = Some(label);
        self
    }

    /// Reject methods this route does not accept.
    pub fn check_method(&self, method: &Method) -> Result<(), GatewayError> {
        if self.methods.allows(method) {
            Ok(())
        } else {
            Err(GatewayError::MethodNotAllowed(method.clone()))
        }
    }
}

/// Result of a successful lookup.
#[derive(Debug, Clone, Copy)]
pub struct RouteMatch<'r, 'p> {
    pub route: &'r Route,
    /// Path remainder after a prefix pattern; empty for exact matches.
    pub suffix: &'p str,
}

/// Fixed mapping from public path to route.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// The gateway's public surface in front of the auth and image services.
    pub fn standard(services: &ServicesConfig) -> Self {
        let auth = Upstream::new("auth", services.auth_url.as_str());
        let image = Upstream::new("image", services.image_url.as_str());
        let post = || MethodFilter::only([Method::POST]);
        let get = || MethodFilter::only([Method::GET]);

        Self::new(vec![
            Route::local("index", PathPattern::prefix("/"), LocalEndpoint::Index),
            Route::local("health", PathPattern::exact("/health"), LocalEndpoint::Health)
                .listed("/health"),
            Route::local("posts", PathPattern::exact("/api/posts"), LocalEndpoint::Posts)
                .listed("/api/posts"),
            Route::local("post", PathPattern::prefix("/api/posts/"), LocalEndpoint::Post),
            Route::proxy(
                "register",
                PathPattern::exact("/register"),
                post(),
                &auth,
                BackendPath::Fixed("/register".into()),
            )
            .listed("/register"),
            Route::proxy(
                "login",
                PathPattern::exact("/login"),
                post(),
                &auth,
                BackendPath::Fixed("/login".into()),
            )
            .listed("/login"),
            Route::proxy(
                "verify",
                PathPattern::exact("/verify"),
                post(),
                &auth,
                BackendPath::Fixed("/verify".into()),
            )
            .listed("/verify"),
            Route::proxy(
                "upload",
                PathPattern::exact("/upload"),
                post(),
                &image,
                BackendPath::Fixed("/api/upload".into()),
            )
            .listed("/upload"),
            Route::proxy(
                "images",
                PathPattern::exact("/images"),
                get(),
                &image,
                BackendPath::Fixed("/api/images".into()),
            )
            .listed("/images"),
            Route::proxy(
                "image",
                PathPattern::prefix("/images/"),
                MethodFilter::only([Method::GET, Method::DELETE]),
                &image,
                BackendPath::Suffixed("/api/images/".into()),
            )
            .listed("/images/{filename}"),
            Route::proxy(
                "stats",
                PathPattern::exact("/stats"),
                get(),
                &image,
                BackendPath::Fixed("/api/stats".into()),
            )
            .listed("/stats"),
        ])
    }

    /// Find the route for `path`.
    pub fn resolve<'r, 'p>(&'r self, path: &'p str) -> Option<RouteMatch<'r, 'p>> {
        self.routes
            .iter()
            .filter_map(|route| route.pattern.matches(path).map(|suffix| RouteMatch { route, suffix }))
            .max_by_key(|m| (m.route.pattern.is_exact(), m.route.pattern.specificity()))
    }

    /// Labels for the index document, in table order.
    pub fn listed_endpoints(&self) -> Vec<&'static str> {
        self.routes.iter().filter_map(|r| r.listed_as).collect()
    }
}
