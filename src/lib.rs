//! API gateway in front of the auth and image-storage services.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod localization;
pub mod observability;
pub mod routing;

pub use config::GatewayConfig;
pub use error::{GatewayError, UpstreamError};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::RouteTable;
