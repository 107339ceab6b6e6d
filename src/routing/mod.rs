//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path, method)
//!     → router.rs (route lookup)
//!     → matcher.rs (exact / prefix patterns, method filters)
//!     → Return: matched Route plus captured suffix, or no match
//!
//! Route Construction (at startup):
//!     ServicesConfig
//!     → RouteTable::standard (or an explicit table)
//!     → Frozen behind Arc in the server state
//! ```

pub mod matcher;
pub mod router;

pub use matcher::{MethodFilter, PathPattern};
pub use router::{BackendPath, LocalEndpoint, Route, RouteAction, RouteMatch, RouteTable, Upstream};
