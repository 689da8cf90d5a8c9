pub mod form;
pub mod json;

pub use form::FormData;
pub use json::JsonPayload;

use strum_macros::Display;

/// The product of encoding a payload: the entity body and the content type
/// that describes it.
///
/// For multipart payloads the boundary only exists once encoding has run, so
/// the content type is produced strictly as part of the encode call rather
/// than being readable beforehand.
#[derive(Debug, Clone)]
pub struct EncodedBody {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// A request payload: anything that can produce an entity body together with
/// its declared content type.
pub trait Payload {
    fn encode(&self) -> Result<EncodedBody, PayloadError>;
}

#[derive(Debug, Display)]
pub enum PayloadError {
    /// JSON serialization of the payload value failed.
    Serialize(serde_json::Error),
    /// A file-backed form field could not be read.
    FileRead(std::io::Error),
}

impl std::error::Error for PayloadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PayloadError::Serialize(e) => Some(e),
            PayloadError::FileRead(e) => Some(e),
        }
    }
}
