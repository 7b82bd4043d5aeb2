//! Core types for the Apple Store demo.
//!
//! This module provides the catalog, the cart value and the id wrapper
//! they share.

pub mod cart;
pub mod id;
pub mod product;

pub use cart::Cart;
pub use id::ProductId;
pub use product::Product;
