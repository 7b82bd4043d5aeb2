//! Domain models for storefront.
//!
//! The cart value and catalog live in `apple-store-core`; this module only
//! holds what is specific to the web layer.

pub mod session;

pub use session::keys as session_keys;
