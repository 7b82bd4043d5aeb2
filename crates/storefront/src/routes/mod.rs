//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET       /                    - Redirect to the cart page
//! GET       /health              - Health check
//!
//! # Cart (fragment for XHR/htmx, redirect otherwise)
//! GET       /cart                - Cart page (product grid + cart)
//! GET|POST  /cart/add/{id}       - Add one unit of a product
//! GET|POST  /cart/remove/{id}    - Remove one unit of a product
//!
//! # Static
//! GET       /static/*            - CSS, JS, product images
//! ```

pub mod cart;

use axum::{
    Router,
    http::Uri,
    response::Redirect,
    routing::get,
};

use crate::error::AppError;
use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::index))
        .route("/add/{id}", get(cart::add).post(cart::add))
        .route("/remove/{id}", get(cart::remove).post(cart::remove))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .nest(cart::CART_PATH, cart_routes())
}

/// The cart page is the home page.
async fn home() -> Redirect {
    Redirect::to(cart::CART_PATH)
}

/// Fallback for unmatched routes.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
