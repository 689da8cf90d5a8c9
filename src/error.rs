use crate::payload::PayloadError;
use strum_macros::Display;

/// Errors surfaced by transports and body readers whose concrete type is
/// owned by the transport implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure of a single request/response exchange.
///
/// Configuration faults (`EmptyMethod`, `EmptyUrl`, `InvalidMethod`,
/// `InvalidUrl`, `InvalidHeader`) are detected before any transport call is
/// attempted. `Transport` carries the underlying transport error unmodified.
/// A response with a non-2xx status is *not* an error; callers inspect the
/// status themselves.
#[derive(Debug, Display)]
pub enum Error {
    /// The request method was set to an empty string.
    EmptyMethod,
    /// The request URL was set to an empty string.
    EmptyUrl,
    /// The request method is not a valid HTTP method token.
    InvalidMethod(String),
    /// The assembled URL did not parse.
    InvalidUrl(String),
    /// A header value could not be constructed.
    InvalidHeader(String),
    /// Payload encoding failed before the request was built.
    Payload(PayloadError),
    /// The transport failed to complete the exchange.
    Transport(BoxError),
    /// Draining the response body failed.
    BodyRead(BoxError),
    /// The response body did not decode into the requested shape.
    Decode(serde_json::Error),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Payload(e) => Some(e),
            Error::Transport(e) | Error::BodyRead(e) => Some(e.as_ref()),
            Error::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PayloadError> for Error {
    fn from(value: PayloadError) -> Self { Error::Payload(value) }
}
