//! BlogStack edge server.
//!
//! Serves a built BlogStack site from a local directory the way the CDN
//! serves it from the bucket: every viewer request runs through the
//! path-resolution function before the origin lookup, so `/about` is
//! answered from `about.html` and `/blog/` from `blog/index.html`.
//!
//! # Usage
//!
//! ```text
//! ORIGIN_ROOT=./public GATEWAY_LISTEN=127.0.0.1:8080 blogstack-server
//! blogstack-server --test-function event.json
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `GATEWAY_LISTEN` | `0.0.0.0:8080` | Bind address |
//! | `ORIGIN_ROOT` | `public` | Directory holding the built site |
//! | `INDEX_DOCUMENT` | `index.html` | Object served for folder paths |
//! | `ERROR_DOCUMENT` | `404.html` | Object served with 404s (empty disables) |
//! | `CACHE_CONTROL` | `public, max-age=300` | `Cache-Control` for objects |
//! | `EDGE_REWRITE_ENABLED` | `true` | Run the viewer-request function |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

mod test_function;

use std::path::Path;

use anyhow::{Context, Result};
use bytes::Bytes;
use http_body_util::{BodyExt, Empty};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as HttpConnBuilder;
use tokio::net::{TcpListener, TcpStream};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use blogstack_core::EdgeConfig;
use blogstack_http::HEALTH_PATH;
use blogstack_http::service::{EdgeHttpConfig, EdgeHttpService};
use blogstack_origin::{DirectoryOrigin, Origin};

/// Server version reported at startup.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    Ok(())
}

/// Build the origin from the edge configuration.
fn build_origin(config: &EdgeConfig) -> DirectoryOrigin {
    DirectoryOrigin::new(config.origin_root.clone(), config.index_document.clone())
}

/// Run the accept loop, serving connections until a shutdown signal is received.
async fn serve<O: Origin>(listener: TcpListener, service: EdgeHttpService<O>) -> Result<()> {
    let graceful = hyper_util::server::graceful::GracefulShutdown::new();
    let http = HttpConnBuilder::new(TokioExecutor::new());

    let shutdown = async {
        tokio::signal::ctrl_c().await.ok();
        info!("received shutdown signal, draining connections");
    };

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = listener.accept() => {
                let (stream, peer_addr) = match result {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!(error = %e, "failed to accept connection");
                        continue;
                    }
                };

                let svc = service.clone();
                let conn = http.serve_connection(TokioIo::new(stream), svc);
                let conn = graceful.watch(conn.into_owned());

                tokio::spawn(async move {
                    if let Err(e) = conn.await {
                        error!(peer_addr = %peer_addr, error = %e, "connection error");
                    }
                });
            }

            () = &mut shutdown => {
                info!("shutting down gracefully");
                break;
            }
        }
    }

    // Wait for in-flight requests to complete.
    graceful.shutdown().await;
    info!("all connections drained, exiting");

    Ok(())
}

/// Perform a health check by requesting the health endpoint over HTTP/1.
///
/// Exits with code 0 if healthy, 1 otherwise.
async fn run_health_check(addr: &str) -> Result<()> {
    let stream = TcpStream::connect(addr)
        .await
        .with_context(|| format!("cannot connect to {addr}"))?;

    let (mut sender, conn) = hyper::client::conn::http1::handshake(TokioIo::new(stream))
        .await
        .context("health check handshake failed")?;
    tokio::spawn(async move {
        if let Err(e) = conn.await {
            warn!(error = %e, "health check connection error");
        }
    });

    let request = http::Request::builder()
        .method(http::Method::GET)
        .uri(HEALTH_PATH)
        .header(http::header::HOST, addr)
        .body(Empty::<Bytes>::new())
        .context("cannot build health check request")?;

    let response = sender
        .send_request(request)
        .await
        .with_context(|| format!("health check request to {addr} failed"))?;
    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .context("cannot read health check body")?
        .to_bytes();

    if is_healthy(status, &body) {
        Ok(())
    } else {
        anyhow::bail!("unhealthy response from {addr}: {status}")
    }
}

/// A healthy server answers `200` with `"status": "running"`.
fn is_healthy(status: http::StatusCode, body: &[u8]) -> bool {
    status == http::StatusCode::OK
        && serde_json::from_slice::<serde_json::Value>(body)
            .is_ok_and(|health| health["status"] == "running")
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    // Evaluate the function on an event file and exit.
    if let Some(path) = test_function::event_path_from_args(&args) {
        let output = test_function::run(Path::new(path?))?;
        println!("{output}");
        return Ok(());
    }

    let config = EdgeConfig::from_env();

    // Handle --health-check flag for Docker HEALTHCHECK.
    if args.iter().any(|a| a == "--health-check") {
        let healthy = run_health_check(&config.local_addr()).await.is_ok();
        std::process::exit(i32::from(!healthy));
    }

    init_tracing(&config.log_level)?;
    config.validate().context("invalid edge configuration")?;

    info!(
        gateway_listen = %config.gateway_listen,
        origin_root = %config.origin_root.display(),
        index_document = %config.index_document,
        error_document = ?config.error_document,
        rewrite_enabled = config.rewrite_enabled,
        version = VERSION,
        "starting BlogStack edge server",
    );

    if !config.origin_root.is_dir() {
        warn!(
            origin_root = %config.origin_root.display(),
            "origin root is not a directory; every object request will fail"
        );
    }

    let origin = build_origin(&config);
    let service = EdgeHttpService::new(origin, EdgeHttpConfig::from(&config));

    let addr = config.listen_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(%addr, "listening for connections");

    serve(listener, service).await
}
