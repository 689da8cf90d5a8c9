use crate::transport::Transport;
use crate::util::query::{QueryParams, QueryValue};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::sync::Arc;

/// Construction-time configuration for a [`Client`](crate::Client).
///
/// An empty base URL means "no prefix": paths are used as absolute URLs. A
/// missing transport falls back to the shared default transport.
#[derive(Default)]
pub struct Config {
    pub base_url: String,
    pub headers: HeaderMap,
    pub transport: Option<Arc<dyn Transport>>,
}

/// Per-call configuration: headers merged additively on top of the client's
/// defaults, and query parameters appended to the URL. Created per call and
/// discarded afterwards.
#[derive(Default)]
pub struct RequestConfig {
    pub headers: HeaderMap,
    pub query_params: QueryParams,
}

impl RequestConfig {
    pub fn new() -> Self { Self::default() }

    /// Adds one query parameter.
    #[must_use]
    pub fn query<V: Into<QueryValue>>(mut self, key: &str, value: V) -> Self {
        self.query_params.insert(key.to_string(), value.into());
        self
    }

    /// Adds one header value. Repeated keys accumulate.
    #[must_use]
    pub fn header(mut self, key: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(key, value);
        self
    }
}
