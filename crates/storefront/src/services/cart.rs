//! Session-backed cart aggregate.
//!
//! Wraps the request's session and applies cart mutations to the value
//! stored under [`session_keys::CART`]. Each operation is a read, a
//! mutation of the in-memory [`Cart`], and a write back.
//!
//! # Concurrency
//!
//! There is no locking between the read and the write. Two requests on
//! the same session that overlap (two rapid add clicks) can both read the
//! same cart and the later write wins, losing one increment. Requests on a
//! session are expected to run one at a time.

use apple_store_core::{Cart, ProductId};
use tower_sessions::Session;

use crate::error::Result;
use crate::models::session_keys;

/// The cart belonging to one session.
///
/// Obtain one per request, either through the axum extractor or with
/// [`SessionCart::new`].
#[derive(Clone)]
pub struct SessionCart {
    session: Session,
}

impl SessionCart {
    /// Bind a cart to a session.
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }

    /// Read the cart, empty when the session holds none.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read or the stored
    /// value is not a cart.
    pub async fn get_cart(&self) -> Result<Cart> {
        let cart = self
            .session
            .get::<Cart>(session_keys::CART)
            .await?
            .unwrap_or_default();
        Ok(cart)
    }

    /// Add one unit of `id`. Returns the new quantity.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read or written.
    pub async fn add_item(&self, id: ProductId) -> Result<u32> {
        let mut cart = self.get_cart().await?;
        let quantity = cart.add_item(id);
        self.save(&cart).await?;
        Ok(quantity)
    }

    /// Remove one unit of `id`. Returns the remaining quantity.
    ///
    /// The cart is written back even when `id` was absent and nothing
    /// changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read or written.
    pub async fn remove_item(&self, id: &str) -> Result<u32> {
        let mut cart = self.get_cart().await?;
        let remaining = cart.remove_item(id);
        self.save(&cart).await?;
        Ok(remaining)
    }

    async fn save(&self, cart: &Cart) -> Result<()> {
        self.session.insert(session_keys::CART, cart).await?;
        Ok(())
    }
}
