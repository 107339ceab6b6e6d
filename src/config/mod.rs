//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! GATEWAY_CONFIG file (TOML, optional)
//!     → loader.rs (parse & deserialize, apply PORT)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → handed to HttpServer at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults so no file is needed
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_from_env, ConfigError};
pub use schema::GatewayConfig;
pub use schema::ListenerConfig;
pub use schema::LocalizationConfig;
pub use schema::ObservabilityConfig;
pub use schema::ProxyConfig;
pub use schema::ServicesConfig;
