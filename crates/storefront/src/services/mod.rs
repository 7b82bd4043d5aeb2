//! Business logic services for storefront.
//!
//! # Services
//!
//! - `cart` - Session-backed cart aggregate (add, remove, read)
//! - `session_store` - Bounded in-memory session store with expiry purging

pub mod cart;
pub mod session_store;

pub use cart::SessionCart;
pub use session_store::CartSessionStore;
