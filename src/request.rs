use crate::error::Error;
use crate::payload::{EncodedBody, Payload};
use crate::response::Response;
use crate::transport::Transport;
use crate::util::query::{QueryParams, query_string};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, Url};

/// A fully assembled transport-level request.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// Composes method, URL, query parameters, headers, and an encoded payload
/// into a [`Request`].
///
/// Setters never fail: an empty method or URL, or a payload that fails to
/// encode, is remembered and surfaced by [`build`](Self::build), so chains run
/// to completion and report the first fault at the end.
pub struct RequestBuilder {
    method: String,
    url: String,
    query_params: QueryParams,
    body: Option<EncodedBody>,
    headers: HeaderMap,
    error: Option<Error>,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: String::new(),
            url: String::new(),
            query_params: QueryParams::new(),
            body: None,
            headers: HeaderMap::new(),
            error: None,
        }
    }

    #[must_use]
    pub fn method(mut self, method: &str) -> Self {
        if method.is_empty() {
            self.record(Error::EmptyMethod);
        }
        self.method = method.to_string();
        self
    }

    #[must_use]
    pub fn url(mut self, url: &str) -> Self {
        if url.is_empty() {
            self.record(Error::EmptyUrl);
        }
        self.url = url.to_string();
        self
    }

    #[must_use]
    pub fn query_params(mut self, params: QueryParams) -> Self {
        self.query_params = params;
        self
    }

    /// Encodes the payload immediately; both the body buffer and the declared
    /// content type come out of the same encode call.
    #[must_use]
    pub fn payload(mut self, payload: &dyn Payload) -> Self {
        match payload.encode() {
            Ok(encoded) => self.body = Some(encoded),
            Err(e) => self.record(Error::Payload(e)),
        }
        self
    }

    #[must_use]
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    fn record(&mut self, error: Error) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    /// Assembles the request, surfacing any fault recorded by a setter.
    ///
    /// The payload's declared content type always wins over a `Content-Type`
    /// supplied through arbitrary headers. Without a payload the body is empty
    /// and no content type is forced.
    pub fn build(self) -> Result<Request, Error> {
        if let Some(error) = self.error {
            return Err(error);
        }
        if self.method.is_empty() {
            return Err(Error::EmptyMethod);
        }
        if self.url.is_empty() {
            return Err(Error::EmptyUrl);
        }
        let method = Method::from_bytes(self.method.as_bytes())
            .map_err(|_| Error::InvalidMethod(self.method.clone()))?;
        let target = if self.query_params.is_empty() {
            self.url
        } else {
            // The URL may already carry a query (caller baked one into the
            // path); extend it instead of emitting a second `?`.
            let separator = if self.url.contains('?') { '&' } else { '?' };
            format!("{}{}{}", self.url, separator, query_string(&self.query_params))
        };
        let url = Url::parse(&target).map_err(|e| Error::InvalidUrl(e.to_string()))?;

        let mut headers = self.headers;
        let body = match self.body {
            Some(encoded) => {
                let declared = HeaderValue::from_str(&encoded.content_type)
                    .map_err(|e| Error::InvalidHeader(e.to_string()))?;
                headers.insert(CONTENT_TYPE, declared);
                encoded.bytes
            }
            None => Vec::new(),
        };
        Ok(Request { method, url, headers, body })
    }

    /// Builds the request and performs it on the given transport. Transport
    /// failures come back unmodified; non-2xx responses are not failures.
    pub async fn send(self, transport: &dyn Transport) -> Result<Response, Error> {
        let request = self.build()?;
        transport.perform(request).await
    }
}

impl Default for RequestBuilder {
    fn default() -> Self { Self::new() }
}
