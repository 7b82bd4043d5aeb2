//! Apple Store Core - Shared domain types.
//!
//! This crate provides the domain types used by the storefront:
//! - [`ProductId`] - Unvalidated product identifier
//! - [`Product`] - The fixed, read-only product catalog
//! - [`Cart`] - Per-session quantity map with counter semantics
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no session access,
//! no HTTP. Session storage and rendering live in the storefront crate.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
