//! Static asset URLs.

/// Content hash of the CSS and JS bundles, computed by `build.rs`.
pub const ASSET_VERSION: &str = env!("ASSET_HASH");

/// Mount point for the static file service.
pub const STATIC_PREFIX: &str = "/static";

/// Image URL for a product id.
///
/// Ids come straight from the cart and may not be in the catalog, so
/// they are percent-encoded before landing in the path.
#[must_use]
pub fn product_image_url(id: &str) -> String {
    format!("{STATIC_PREFIX}/images/{}.svg", urlencoding::encode(id))
}
