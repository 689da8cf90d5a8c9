use crate::error::Error;
use crate::request::Request;
use crate::response::Response;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tracing::debug;

/// The capability that performs a single request/response exchange.
///
/// This is the library's sole abstraction boundary: everything above it only
/// assembles requests and unwraps responses. A transport error means the
/// exchange itself failed (connection, DNS, protocol); an HTTP response with
/// any status code is a success at this level.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs one blocking exchange and returns the raw response.
    async fn perform(&self, request: Request) -> Result<Response, Error>;

    /// Configures a timeout applied to subsequent `perform` calls.
    fn set_timeout(&self, timeout: Duration);
}

/// Default transport backed by `reqwest` with zero special configuration.
#[derive(Debug)]
pub struct DefaultTransport {
    client: reqwest::Client,
    // 0 means no timeout configured.
    timeout_ms: AtomicU64,
}

impl DefaultTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout_ms: AtomicU64::new(0),
        }
    }
}

impl Default for DefaultTransport {
    fn default() -> Self { Self::new() }
}

#[async_trait]
impl Transport for DefaultTransport {
    async fn perform(&self, request: Request) -> Result<Response, Error> {
        debug!(method = %request.method, url = %request.url, "performing exchange");
        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers)
            .body(request.body);
        let timeout_ms = self.timeout_ms.load(Ordering::Relaxed);
        if timeout_ms > 0 {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        let response = builder.send().await.map_err(|e| Error::Transport(Box::new(e)))?;
        Ok(Response::from_reqwest(response))
    }

    fn set_timeout(&self, timeout: Duration) {
        self.timeout_ms.store(timeout.as_millis() as u64, Ordering::Relaxed);
    }
}

static DEFAULT_TRANSPORT: OnceLock<Arc<DefaultTransport>> = OnceLock::new();

/// The process-wide shared default transport, initialized on first use. It
/// backs the module-level convenience functions; clients built without an
/// explicit transport get a fresh instance of their own instead, so timeouts
/// stay per client.
pub fn default_transport() -> Arc<DefaultTransport> {
    Arc::clone(DEFAULT_TRANSPORT.get_or_init(|| Arc::new(DefaultTransport::new())))
}
