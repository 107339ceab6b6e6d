//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, route lookup)
//!     → local.rs (index, health, posts)      ┐
//!     → proxy.rs (forward to auth / image)   ┘ one of the two
//!     → Send to client
//! ```

pub mod local;
pub mod proxy;
pub mod server;

pub use proxy::Proxy;
pub use server::{AppState, HttpServer};
