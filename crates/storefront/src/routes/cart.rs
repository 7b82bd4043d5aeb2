//! Cart route handlers.
//!
//! Each request resolves the cart from its session, applies at most one
//! mutation and renders. Mutations answer asynchronous calls (see
//! [`RequestKind`]) with the cart fragment so `cart.js` can swap it in
//! place, and regular navigation with a redirect back to the cart page.

use apple_store_core::{Cart, Product, ProductId};
use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use tracing::instrument;

use crate::assets::{ASSET_VERSION, product_image_url};
use crate::error::{Result, add_breadcrumb};
use crate::middleware::RequestKind;
use crate::services::SessionCart;
use crate::state::AppState;

/// Canonical URL of the cart page.
pub const CART_PATH: &str = "/cart";

/// URL that adds one unit of `id`.
#[must_use]
pub fn add_url(id: &str) -> String {
    format!("{CART_PATH}/add/{}", urlencoding::encode(id))
}

/// URL that removes one unit of `id`.
#[must_use]
pub fn remove_url(id: &str) -> String {
    format!("{CART_PATH}/remove/{}", urlencoding::encode(id))
}

// =============================================================================
// View Models
// =============================================================================

/// Product display data for the product grid.
#[derive(Clone, Debug)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub add_url: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.to_string(),
            image_url: product_image_url(product.id),
            add_url: add_url(product.id),
        }
    }
}

/// One cart entry.
#[derive(Clone, Debug)]
pub struct CartLineView {
    pub product_id: String,
    pub name: String,
    pub quantity: u32,
    /// `1..=quantity`, one remove link is rendered per unit.
    pub units: Vec<u32>,
    pub image_url: String,
    pub remove_url: String,
}

/// Cart display data for templates.
#[derive(Clone, Debug)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub item_count: u64,
}

impl CartView {
    /// Build the view for `cart`, naming products from `catalog`.
    ///
    /// Ids the catalog does not know are shown by id.
    #[must_use]
    pub fn new(cart: &Cart, catalog: &[Product]) -> Self {
        let lines = cart
            .iter()
            .map(|(id, &quantity)| {
                let id = id.as_str();

                CartLineView {
                    product_id: id.to_string(),
                    name: Product::display_name(catalog, id).to_string(),
                    quantity,
                    units: (1..=quantity).collect(),
                    image_url: product_image_url(id),
                    remove_url: remove_url(id),
                }
            })
            .collect();

        Self {
            lines,
            item_count: cart.total_quantity(),
        }
    }

    /// Whether there is nothing in the cart.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template: product grid plus the cart fragment.
#[derive(Template, WebTemplate)]
#[template(path = "cart/index.html")]
pub struct CartIndexTemplate {
    pub products: Vec<ProductView>,
    pub cart: CartView,
    pub asset_version: &'static str,
}

impl CartIndexTemplate {
    fn new(catalog: &[Product], cart: &Cart) -> Self {
        Self {
            products: catalog.iter().map(ProductView::from).collect(),
            cart: CartView::new(cart, catalog),
            asset_version: ASSET_VERSION,
        }
    }
}

/// Cart items fragment template (for asynchronous requests).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the cart page.
#[instrument(skip(state, cart))]
pub async fn index(
    State(state): State<AppState>,
    cart: SessionCart,
) -> Result<CartIndexTemplate> {
    let cart = cart.get_cart().await?;
    Ok(CartIndexTemplate::new(state.catalog(), &cart))
}

/// Add one unit of a product to the cart.
#[instrument(skip(state, cart))]
pub async fn add(
    State(state): State<AppState>,
    cart: SessionCart,
    kind: RequestKind,
    Path(id): Path<String>,
) -> Result<Response> {
    let quantity = cart.add_item(ProductId::from(id.as_str())).await?;

    tracing::info!(product_id = %id, quantity, "Added item to cart");
    add_breadcrumb("cart", "Added item", Some(&[("product_id", id.as_str())]));

    respond(&state, &cart, kind).await
}

/// Remove one unit of a product from the cart.
///
/// Removing a product that is not in the cart is not an error.
#[instrument(skip(state, cart))]
pub async fn remove(
    State(state): State<AppState>,
    cart: SessionCart,
    kind: RequestKind,
    Path(id): Path<String>,
) -> Result<Response> {
    let remaining = cart.remove_item(&id).await?;

    tracing::info!(product_id = %id, quantity = remaining, "Removed item from cart");
    add_breadcrumb("cart", "Removed item", Some(&[("product_id", id.as_str())]));

    respond(&state, &cart, kind).await
}

/// Fragment with the refreshed cart, or a redirect to the cart page.
async fn respond(state: &AppState, cart: &SessionCart, kind: RequestKind) -> Result<Response> {
    if !kind.is_fragment() {
        return Ok(Redirect::to(CART_PATH).into_response());
    }

    let cart = cart.get_cart().await?;
    Ok(CartItemsTemplate {
        cart: CartView::new(&cart, state.catalog()),
    }
    .into_response())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::app::build_app;
    use crate::config::StorefrontConfig;
    use crate::middleware::session::SESSION_COOKIE_NAME;
    use crate::services::CartSessionStore;

    fn cart_of(pairs: &[(&str, u32)]) -> Cart {
        pairs
            .iter()
            .map(|&(id, q)| (ProductId::from(id), q))
            .collect()
    }

    fn app() -> Router {
        build_app(
            AppState::new(StorefrontConfig::default()),
            CartSessionStore::default(),
        )
    }

    fn request(method: &str, uri: &str, xhr: bool, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if xhr {
            builder = builder.header("x-requested-with", "XMLHttpRequest");
        }
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    /// `name=value` part of the session cookie set by a response.
    fn session_cookie(response: &Response) -> String {
        response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with(SESSION_COOKIE_NAME))
            .and_then(|v| v.split(';').next())
            .unwrap()
            .to_string()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_cart_view_lines_follow_cart_order() {
        let cart = cart_of(&[("mac-book", 2), ("iphone", 1)]);
        let view = CartView::new(&cart, Product::find_all());

        assert_eq!(view.lines.len(), 2);
        assert_eq!(view.lines[0].name, "Mac Book");
        assert_eq!(view.lines[0].units, vec![1, 2]);
        assert_eq!(view.lines[0].remove_url, "/cart/remove/mac-book");
        assert_eq!(view.lines[1].name, "iphone");
        assert_eq!(view.item_count, 3);
    }

    #[test]
    fn test_cart_view_unknown_product_uses_id() {
        let cart = cart_of(&[("newton", 1)]);
        let view = CartView::new(&cart, Product::find_all());
        assert_eq!(view.lines[0].name, "newton");
    }

    #[test]
    fn test_urls_are_percent_encoded() {
        assert_eq!(add_url("iphone"), "/cart/add/iphone");
        assert_eq!(remove_url("a b/c"), "/cart/remove/a%20b%2Fc");
    }

    #[test]
    fn test_fragment_renders_summary_row() {
        let cart = cart_of(&[("imac", 2)]);
        let html = CartItemsTemplate {
            cart: CartView::new(&cart, Product::find_all()),
        }
        .render()
        .unwrap();

        assert!(html.contains("(2 iMac)"));
        assert_eq!(html.matches("/cart/remove/imac").count(), 2);
        assert!(!html.contains("nothing yet in your shopping cart"));
    }

    #[test]
    fn test_fragment_renders_empty_message() {
        let html = CartItemsTemplate {
            cart: CartView::new(&Cart::new(), Product::find_all()),
        }
        .render()
        .unwrap();

        assert!(html.contains("nothing yet in your shopping cart."));
    }

    #[tokio::test]
    async fn test_index_lists_catalog_in_order() {
        let response = app()
            .oneshot(request("GET", "/cart", false, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        let positions: Vec<usize> = [
            "/cart/add/iphone",
            "/cart/add/imac",
            "/cart/add/ipad",
            "/cart/add/mac-book",
        ]
        .iter()
        .map(|url| html.find(url).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(html.contains("nothing yet in your shopping cart."));
    }

    #[tokio::test]
    async fn test_page_and_fragment_follow_state_catalog() {
        static CATALOG: [Product; 2] = [
            Product {
                id: "ipad",
                name: "iPad Air",
            },
            Product {
                id: "imac",
                name: "iMac",
            },
        ];
        let state = AppState::with_catalog(StorefrontConfig::default(), &CATALOG);
        let app = build_app(state, CartSessionStore::default());

        let response = app
            .clone()
            .oneshot(request("GET", "/cart", false, None))
            .await
            .unwrap();
        let html = body_text(response).await;
        assert!(html.find("/cart/add/ipad").unwrap() < html.find("/cart/add/imac").unwrap());
        assert!(!html.contains("/cart/add/iphone"));

        let response = app
            .oneshot(request("POST", "/cart/add/ipad", true, None))
            .await
            .unwrap();
        assert!(body_text(response).await.contains("(1 iPad Air)"));
    }

    #[tokio::test]
    async fn test_async_add_returns_fragment() {
        let response = app()
            .oneshot(request("POST", "/cart/add/imac", true, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("(1 iMac)"));
        assert!(!html.contains("<html"));
    }

    #[tokio::test]
    async fn test_plain_add_redirects_to_cart() {
        let response = app()
            .oneshot(request("POST", "/cart/add/imac", false, None))
            .await
            .unwrap();

        assert!(response.status().is_redirection());
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), CART_PATH);
        assert!(body_text(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_get_add_is_accepted() {
        let response = app()
            .oneshot(request("GET", "/cart/add/ipad", true, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("(1 iPad)"));
    }

    #[tokio::test]
    async fn test_cart_persists_across_requests_in_session() {
        let app = app();

        let response = app
            .clone()
            .oneshot(request("POST", "/cart/add/iphone", true, None))
            .await
            .unwrap();
        let cookie = session_cookie(&response);

        let response = app
            .clone()
            .oneshot(request("POST", "/cart/add/iphone", true, Some(&cookie)))
            .await
            .unwrap();
        assert!(body_text(response).await.contains("(2 iphone)"));

        let response = app
            .clone()
            .oneshot(request("POST", "/cart/remove/iphone", true, Some(&cookie)))
            .await
            .unwrap();
        assert!(body_text(response).await.contains("(1 iphone)"));

        let response = app
            .oneshot(request("POST", "/cart/remove/iphone", true, Some(&cookie)))
            .await
            .unwrap();
        assert!(
            body_text(response)
                .await
                .contains("nothing yet in your shopping cart.")
        );
    }

    #[tokio::test]
    async fn test_remove_absent_product_is_not_an_error() {
        let response = app()
            .oneshot(request("POST", "/cart/remove/ipad", true, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            body_text(response)
                .await
                .contains("nothing yet in your shopping cart.")
        );
    }

    #[tokio::test]
    async fn test_plain_remove_redirects_to_cart() {
        let response = app()
            .oneshot(request("GET", "/cart/remove/ipad", false, None))
            .await
            .unwrap();
        assert!(response.status().is_redirection());
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), CART_PATH);
    }
}
