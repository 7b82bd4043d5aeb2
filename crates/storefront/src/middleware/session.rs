//! Session middleware configuration.
//!
//! Sets up in-memory sessions using tower-sessions and resolves the
//! per-request [`SessionCart`] from them. Session contents live only as
//! long as the process; nothing is persisted. Expired records are purged
//! by the sweeper `main` spawns on [`CartSessionStore`].

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::{Expiry, Session, SessionManagerLayer};

use crate::config::StorefrontConfig;
use crate::error::AppError;
use crate::services::{CartSessionStore, SessionCart};

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "apple_store_session";

/// Create the session layer with an in-memory store.
///
/// # Arguments
///
/// * `store` - Session store shared by all requests
/// * `config` - Storefront configuration (cookie security, expiry)
#[must_use]
pub fn create_session_layer(
    store: CartSessionStore,
    config: &StorefrontConfig,
) -> SessionManagerLayer<CartSessionStore> {
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(config.session_ttl_secs),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// Resolve the cart from the session set by `SessionManagerLayer`.
///
/// A missing session means the layer was not installed, which is a
/// server misconfiguration rather than a client error.
impl<S> FromRequestParts<S> for SessionCart
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts.extensions.get::<Session>().cloned().ok_or_else(|| {
            AppError::Internal("session layer is not installed".to_string())
        })?;

        Ok(Self::new(session))
    }
}
