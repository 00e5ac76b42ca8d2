//! Edge configuration.
//!
//! Provides [`EdgeConfig`] for configuring the BlogStack edge server.
//! Configuration values are loaded from environment variables so the same
//! binary runs unchanged in a container, in CI, and on a laptop.

use std::net::SocketAddr;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::error::{BlogStackError, BlogStackResult};

/// Edge server configuration.
///
/// All fields have defaults suitable for previewing a freshly built site
/// from `./public`. Configuration can be loaded from environment variables
/// via [`EdgeConfig::from_env`].
///
/// # Examples
///
/// ```
/// use blogstack_core::EdgeConfig;
///
/// let config = EdgeConfig::default();
/// assert_eq!(config.gateway_listen, "0.0.0.0:8080");
/// assert!(config.rewrite_enabled);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct EdgeConfig {
    /// Bind address for the edge server (e.g. `"0.0.0.0:8080"`).
    #[builder(default = String::from("0.0.0.0:8080"))]
    pub gateway_listen: String,

    /// Directory holding the built site; stands in for the origin bucket.
    #[builder(default = PathBuf::from("public"))]
    pub origin_root: PathBuf,

    /// Object name appended to keys that end in `/`.
    #[builder(default = String::from("index.html"))]
    pub index_document: String,

    /// Object served alongside 404 responses. `None` disables it.
    #[builder(default = Some(String::from("404.html")))]
    pub error_document: Option<String>,

    /// `Cache-Control` value attached to successful object responses.
    #[builder(default = String::from("public, max-age=300"))]
    pub cache_control: String,

    /// Whether the viewer-request function runs before origin lookup.
    #[builder(default = true)]
    pub rewrite_enabled: bool,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            gateway_listen: String::from("0.0.0.0:8080"),
            origin_root: PathBuf::from("public"),
            index_document: String::from("index.html"),
            error_document: Some(String::from("404.html")),
            cache_control: String::from("public, max-age=300"),
            rewrite_enabled: true,
            log_level: String::from("info"),
        }
    }
}

impl EdgeConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `GATEWAY_LISTEN` | `0.0.0.0:8080` |
    /// | `ORIGIN_ROOT` | `public` |
    /// | `INDEX_DOCUMENT` | `index.html` |
    /// | `ERROR_DOCUMENT` | `404.html` (empty disables) |
    /// | `CACHE_CONTROL` | `public, max-age=300` |
    /// | `EDGE_REWRITE_ENABLED` | `true` |
    /// | `LOG_LEVEL` | `info` |
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// Unset variables keep their defaults. An empty `ERROR_DOCUMENT`
    /// disables the error document; an empty `INDEX_DOCUMENT` is ignored.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(v) = lookup("GATEWAY_LISTEN") {
            config.gateway_listen = v;
        }
        if let Some(v) = lookup("ORIGIN_ROOT") {
            config.origin_root = PathBuf::from(v);
        }
        if let Some(v) = lookup("INDEX_DOCUMENT") {
            if !v.is_empty() {
                config.index_document = v;
            }
        }
        if let Some(v) = lookup("ERROR_DOCUMENT") {
            config.error_document = if v.is_empty() { None } else { Some(v) };
        }
        if let Some(v) = lookup("CACHE_CONTROL") {
            config.cache_control = v;
        }
        if let Some(v) = lookup("EDGE_REWRITE_ENABLED") {
            config.rewrite_enabled = parse_bool(&v);
        }
        if let Some(v) = lookup("LOG_LEVEL") {
            config.log_level = v;
        }

        config
    }

    /// Check the settings that cannot be caught by their types.
    ///
    /// The index document is a suffix appended to a key prefix, so like an
    /// object-store website index suffix it must be non-empty and slash-free.
    pub fn validate(&self) -> BlogStackResult<()> {
        if self.index_document.is_empty() || self.index_document.contains('/') {
            return Err(BlogStackError::Config(format!(
                "index document must be a non-empty name without '/': {:?}",
                self.index_document
            )));
        }
        if let Some(doc) = &self.error_document {
            if doc.starts_with('/') {
                return Err(BlogStackError::Config(format!(
                    "error document must be an object key, not a path: {doc:?}"
                )));
            }
        }
        self.listen_addr().map(|_| ())
    }

    /// Parse [`gateway_listen`](Self::gateway_listen) into a socket address.
    pub fn listen_addr(&self) -> BlogStackResult<SocketAddr> {
        self.gateway_listen
            .parse()
            .map_err(|_| BlogStackError::InvalidListenAddress(self.gateway_listen.clone()))
    }

    /// Address a local client should dial to reach this server.
    ///
    /// A wildcard bind address is replaced with loopback.
    #[must_use]
    pub fn local_addr(&self) -> String {
        self.gateway_listen.replace("0.0.0.0", "127.0.0.1")
    }
}

/// Parse a string as a boolean, accepting `"1"` and `"true"` (case-insensitive).
fn parse_bool(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}
