//! Integration tests for the BlogStack edge server.
//!
//! These tests require a running server at `localhost:8080` serving the
//! fixture site in `tests/integration/site`. They are marked `#[ignore]` so
//! they don't run during normal `cargo test`.
//!
//! Run them with:
//! ```text
//! ORIGIN_ROOT=tests/integration/site GATEWAY_LISTEN=127.0.0.1:8080 cargo run -p blogstack-server &
//! cargo test -p blogstack-integration -- --ignored
//! ```

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Endpoint URL for the server.
fn endpoint_url() -> String {
    std::env::var("EDGE_ENDPOINT_URL").unwrap_or_else(|_| "http://localhost:8080".to_owned())
}

/// Absolute URL for a path on the server.
#[must_use]
pub fn url(path: &str) -> String {
    format!("{}{path}", endpoint_url())
}

/// Create an HTTP client for talking to the local server.
#[must_use]
pub fn edge_client() -> reqwest::Client {
    init_tracing();
    reqwest::Client::new()
}

/// GET a path and return status and body text.
pub async fn get_text(client: &reqwest::Client, path: &str) -> (reqwest::StatusCode, String) {
    let resp = client
        .get(url(path))
        .send()
        .await
        .unwrap_or_else(|e| panic!("GET {path} failed: {e}"));
    let status = resp.status();
    let body = resp
        .text()
        .await
        .unwrap_or_else(|e| panic!("reading body of {path} failed: {e}"));
    tracing::debug!(path, %status, "fetched");
    (status, body)
}

mod test_error;
mod test_health;
mod test_precondition;
mod test_routing;
