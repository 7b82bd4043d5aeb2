//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. Request ID (add unique ID to each request)
//! 3. `TraceLayer` (request span carrying the request ID)
//! 4. Security headers (CSP, frame options, etc.)
//! 5. Session layer (tower-sessions with in-memory store)
//!
//! Extractors for handlers live here too: [`RequestKind`] decides between
//! page and fragment responses, and [`SessionCart`](crate::services::SessionCart)
//! is resolved from the session placed by the session layer.

pub mod request_id;
pub mod request_kind;
pub mod security_headers;
pub mod session;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use request_kind::RequestKind;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
