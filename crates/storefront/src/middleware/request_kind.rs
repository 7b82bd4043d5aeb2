//! Page vs. fragment request detection.
//!
//! Cart mutations answer asynchronous calls with just the cart fragment and
//! everything else with a redirect back to the cart page. A request counts
//! as asynchronous when it carries either:
//! - `X-Requested-With: XMLHttpRequest` (what `cart.js` and jQuery send)
//! - `HX-Request: true` (htmx)

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};

/// Header set by XHR libraries on asynchronous requests.
pub const X_REQUESTED_WITH: &str = "x-requested-with";

/// Header set by htmx on every request it issues.
pub const HX_REQUEST: &str = "hx-request";

/// What shape of response the caller expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Regular navigation; expects a full page or a redirect.
    Page,
    /// Asynchronous call; expects a fragment to splice into the page.
    Fragment,
}

impl RequestKind {
    /// Classify a request from its headers.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let header_is = |name: &str, expected: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .is_some_and(|v| v.trim().eq_ignore_ascii_case(expected))
        };

        if header_is(X_REQUESTED_WITH, "XMLHttpRequest") || header_is(HX_REQUEST, "true") {
            Self::Fragment
        } else {
            Self::Page
        }
    }

    /// Whether a fragment response is expected.
    #[must_use]
    pub const fn is_fragment(self) -> bool {
        matches!(self, Self::Fragment)
    }
}

impl<S> FromRequestParts<S> for RequestKind
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}
