//! Integration tests for the Apple Store demo.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p apple-store-integration-tests
//! ```
//!
//! Each test boots the real storefront router on an ephemeral port and
//! talks to it over HTTP with a cookie-keeping client, so the session
//! cookie carries the cart between requests exactly as a browser would.

use std::net::SocketAddr;
use std::path::PathBuf;

use apple_store_storefront::app::build_app;
use apple_store_storefront::config::StorefrontConfig;
use apple_store_storefront::state::AppState;
use apple_store_storefront::services::CartSessionStore;
use reqwest::{Client, redirect};

/// A running storefront plus a client bound to one browser session.
pub struct TestContext {
    pub addr: SocketAddr,
    pub client: Client,
}

impl TestContext {
    /// Start a storefront on `127.0.0.1:0`.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound or the client cannot be built.
    pub async fn new() -> Self {
        let config = StorefrontConfig {
            static_dir: static_dir(),
            ..StorefrontConfig::default()
        };
        let app = build_app(AppState::new(config), CartSessionStore::default());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind listener");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });

        Self {
            addr,
            client: new_client(),
        }
    }

    /// A second client with its own cookie jar, i.e. another visitor.
    #[must_use]
    pub fn other_visitor(&self) -> Client {
        new_client()
    }

    /// Absolute URL for a path on the test server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }
}

/// Client with a cookie store that does not follow redirects.
fn new_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(redirect::Policy::none())
        .build()
        .expect("build client")
}

/// The storefront's static directory, independent of the test's cwd.
fn static_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../storefront/static")
}
