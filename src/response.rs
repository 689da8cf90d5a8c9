use crate::error::Error;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use std::mem;

#[derive(Debug)]
enum Body {
    Empty,
    Buffered(Vec<u8>),
    Streaming(Box<reqwest::Response>),
}

/// A raw response: status, headers, and a body readable at most once.
#[derive(Debug)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Body,
}

impl Response {
    /// Constructs a response from an in-memory body. Intended for transport
    /// implementations that do not stream.
    pub fn new(status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self { status, headers, body: Body::Buffered(body) }
    }

    pub(crate) fn from_reqwest(response: reqwest::Response) -> Self {
        Self {
            status: response.status(),
            headers: response.headers().clone(),
            body: Body::Streaming(Box::new(response)),
        }
    }

    pub fn status(&self) -> StatusCode { self.status }

    pub fn headers(&self) -> &HeaderMap { &self.headers }

    /// Drains the body fully into a byte buffer.
    ///
    /// The read is destructive: the first call yields the full content, any
    /// further call yields an empty buffer.
    pub async fn read_body(&mut self) -> Result<Vec<u8>, Error> {
        match mem::replace(&mut self.body, Body::Empty) {
            Body::Empty => Ok(Vec::new()),
            Body::Buffered(bytes) => Ok(bytes),
            Body::Streaming(response) => response
                .bytes()
                .await
                .map(|b| b.to_vec())
                .map_err(|e| Error::BodyRead(Box::new(e))),
        }
    }

    /// Drains the body and decodes it as JSON into `T` with the default
    /// deserializer.
    pub async fn json<T: DeserializeOwned>(self) -> Result<JsonResponse<T>, Error> {
        self.json_with(default_deserializer).await
    }

    /// Drains the body and decodes it with a caller-supplied deserialization
    /// function. Decode errors are returned verbatim.
    pub async fn json_with<T>(
        mut self,
        deserialize: fn(&[u8]) -> serde_json::Result<T>,
    ) -> Result<JsonResponse<T>, Error> {
        let body = self.read_body().await?;
        let value = deserialize(&body).map_err(Error::Decode)?;
        Ok(JsonResponse { response: self, value })
    }
}

fn default_deserializer<T: DeserializeOwned>(bytes: &[u8]) -> serde_json::Result<T> {
    serde_json::from_slice(bytes)
}

/// A response whose body has been decoded into a typed value.
#[derive(Debug)]
pub struct JsonResponse<T> {
    response: Response,
    value: T,
}

impl<T> JsonResponse<T> {
    pub fn value(&self) -> &T { &self.value }

    pub fn into_value(self) -> T { self.value }

    pub fn status(&self) -> StatusCode { self.response.status() }

    pub fn headers(&self) -> &HeaderMap { self.response.headers() }
}
