use crate::config::{Config, RequestConfig};
use crate::error::Error;
use crate::payload::Payload;
use crate::request::RequestBuilder;
use crate::response::Response;
use crate::transport::{DefaultTransport, Transport};
use crate::util::url::join_url;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// A configured aggregate of base URL, default headers, and transport, reused
/// across calls.
///
/// Mutators take effect on all subsequent calls. The client holds plain
/// mutable state with no internal locking; for concurrent use, finish
/// configuration first and treat the instance as immutable afterwards.
pub struct Client {
    base_url: String,
    headers: HeaderMap,
    transport: Arc<dyn Transport>,
}

impl Client {
    /// Constructs a client from its configuration. A missing transport is
    /// replaced with a fresh default transport owned by this client alone, so
    /// timeout passthrough never leaks to other instances.
    pub fn new(config: Config) -> Self {
        Self {
            base_url: config.base_url,
            headers: config.headers,
            transport: config
                .transport
                .unwrap_or_else(|| Arc::new(DefaultTransport::new())),
        }
    }

    pub fn set_base_url(&mut self, base_url: &str) {
        self.base_url = base_url.to_string();
    }

    pub fn set_headers(&mut self, headers: HeaderMap) {
        self.headers = headers;
    }

    /// Sets a default header, replacing any existing values under the key.
    pub fn set_header(&mut self, key: HeaderName, value: HeaderValue) {
        self.headers.insert(key, value);
    }

    /// Adds a default header value, keeping existing values under the key.
    pub fn add_header(&mut self, key: HeaderName, value: HeaderValue) {
        self.headers.append(key, value);
    }

    pub fn header(&self, key: &HeaderName) -> Option<&HeaderValue> {
        self.headers.get(key)
    }

    pub fn headers(&self) -> &HeaderMap { &self.headers }

    /// Replaces the transport used by subsequent calls.
    pub fn set_transport(&mut self, transport: Arc<dyn Transport>) {
        self.transport = transport;
    }

    /// A shared handle to the transport this client performs exchanges on.
    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.transport)
    }

    /// Passes a timeout through to the transport; applies to subsequent calls.
    pub fn set_request_timeout(&self, timeout: Duration) {
        self.transport.set_timeout(timeout);
    }

    // Client defaults first, then every per-call value appended on top, so
    // both value sets are present under a shared key.
    fn merge_headers(&self, per_call: &HeaderMap) -> HeaderMap {
        let mut merged = self.headers.clone();
        for (name, value) in per_call {
            merged.append(name, value.clone());
        }
        merged
    }

    /// Resolves the absolute URL, merges configuration layers, and performs
    /// the exchange on the client's transport.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        payload: Option<&dyn Payload>,
        config: Option<RequestConfig>,
    ) -> Result<Response, Error> {
        let url = join_url(&self.base_url, path)?;
        let config = config.unwrap_or_default();
        let headers = self.merge_headers(&config.headers);
        debug!(method, url = %url, "dispatching request");
        let mut builder = RequestBuilder::new()
            .method(method)
            .url(&url)
            .headers(headers)
            .query_params(config.query_params);
        if let Some(payload) = payload {
            builder = builder.payload(payload);
        }
        builder.send(self.transport.as_ref()).await
    }

    pub async fn get(
        &self,
        path: &str,
        config: Option<RequestConfig>,
    ) -> Result<Response, Error> {
        self.request("GET", path, None, config).await
    }

    pub async fn post(
        &self,
        path: &str,
        payload: Option<&dyn Payload>,
        config: Option<RequestConfig>,
    ) -> Result<Response, Error> {
        self.request("POST", path, payload, config).await
    }

    pub async fn put(
        &self,
        path: &str,
        payload: Option<&dyn Payload>,
        config: Option<RequestConfig>,
    ) -> Result<Response, Error> {
        self.request("PUT", path, payload, config).await
    }

    pub async fn patch(
        &self,
        path: &str,
        payload: Option<&dyn Payload>,
        config: Option<RequestConfig>,
    ) -> Result<Response, Error> {
        self.request("PATCH", path, payload, config).await
    }

    pub async fn delete(
        &self,
        path: &str,
        payload: Option<&dyn Payload>,
        config: Option<RequestConfig>,
    ) -> Result<Response, Error> {
        self.request("DELETE", path, payload, config).await
    }
}

impl Default for Client {
    /// A client with no base URL and its own default transport.
    fn default() -> Self {
        Self::new(Config::default())
    }
}
