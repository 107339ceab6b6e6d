//! Localized response messages.
//!
//! # Data Flow
//! ```text
//! Request headers
//!     → negotiate.rs (first Accept-Language range → primary subtag)
//!     → catalog.rs (locale known and negotiation enabled? else default)
//!     → message text for (locale, key)
//! ```

pub mod catalog;
pub mod negotiate;

pub use catalog::{MessageCatalog, MessageKey, UnknownMessageKey};
