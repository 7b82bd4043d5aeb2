//! Session-related types.
//!
//! Keys under which state is stored in the session.

/// Session keys for storefront data.
pub mod keys {
    /// Key for the shopping cart (`{product_id: quantity}`).
    pub const CART: &str = "cart";
}
