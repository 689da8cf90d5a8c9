//! An ergonomic request/response wrapper around a pluggable HTTP transport.
//!
//! A [`Client`] holds a base URL, default headers, and a [`Transport`]; each
//! call merges per-call headers and query parameters on top of the defaults,
//! encodes an optional [`Payload`] (JSON or `multipart/form-data`), and hands
//! a single assembled [`Request`] to the transport. Responses expose a
//! destructive body read and an optional typed JSON decode.
//!
//! The library performs no network I/O of its own: retries, pooling, TLS, and
//! cancellation belong to the transport. The default transport is backed by
//! `reqwest` with no special configuration.
//!
//! ```no_run
//! use roxios::{Client, Config, RequestConfig};
//!
//! # async fn run() -> Result<(), roxios::Error> {
//! let client = Client::new(Config {
//!     base_url: "https://httpbin.org".to_string(),
//!     ..Config::default()
//! });
//! let mut resp = client
//!     .get("/get", Some(RequestConfig::new().query("a", "1")))
//!     .await?;
//! let body = resp.read_body().await?;
//! # let _ = body;
//! # Ok(())
//! # }
//! ```

pub use reqwest;
pub use serde;

pub mod client;
pub mod config;
pub mod error;
pub mod payload;
pub mod request;
pub mod response;
pub mod transport;
pub mod util;

pub use client::Client;
pub use config::{Config, RequestConfig};
pub use error::{BoxError, Error};
pub use payload::{EncodedBody, FormData, JsonPayload, Payload, PayloadError};
pub use request::{Request, RequestBuilder};
pub use response::{JsonResponse, Response};
pub use transport::{DefaultTransport, Transport, default_transport};
pub use util::query::{QueryParams, QueryValue};

use std::sync::OnceLock;

static DEFAULT_CLIENT: OnceLock<Client> = OnceLock::new();

fn default_client() -> &'static Client {
    DEFAULT_CLIENT.get_or_init(|| {
        Client::new(Config {
            transport: Some(default_transport()),
            ..Config::default()
        })
    })
}

/// Sends a GET request with the shared no-config client. `url` must be
/// absolute.
pub async fn get(url: &str, config: Option<RequestConfig>) -> Result<Response, Error> {
    default_client().get(url, config).await
}

/// Sends a POST request with the shared no-config client.
pub async fn post(
    url: &str,
    payload: Option<&dyn Payload>,
    config: Option<RequestConfig>,
) -> Result<Response, Error> {
    default_client().post(url, payload, config).await
}

/// Sends a PUT request with the shared no-config client.
pub async fn put(
    url: &str,
    payload: Option<&dyn Payload>,
    config: Option<RequestConfig>,
) -> Result<Response, Error> {
    default_client().put(url, payload, config).await
}

/// Sends a PATCH request with the shared no-config client.
pub async fn patch(
    url: &str,
    payload: Option<&dyn Payload>,
    config: Option<RequestConfig>,
) -> Result<Response, Error> {
    default_client().patch(url, payload, config).await
}

/// Sends a DELETE request with the shared no-config client.
pub async fn delete(
    url: &str,
    payload: Option<&dyn Payload>,
    config: Option<RequestConfig>,
) -> Result<Response, Error> {
    default_client().delete(url, payload, config).await
}
