use super::{EncodedBody, Payload, PayloadError};
use serde::Serialize;

/// A JSON request payload wrapping a serializable value.
///
/// The serializer is pluggable; by default `serde_json::to_vec` is used.
pub struct JsonPayload<T: Serialize> {
    data: T,
    serializer: fn(&T) -> serde_json::Result<Vec<u8>>,
}

impl<T: Serialize> JsonPayload<T> {
    pub fn new(data: T) -> Self {
        Self { data, serializer: default_serializer }
    }

    /// Replaces the default serializer for this payload.
    #[must_use]
    pub fn with_serializer(mut self, serializer: fn(&T) -> serde_json::Result<Vec<u8>>) -> Self {
        self.serializer = serializer;
        self
    }
}

fn default_serializer<T: Serialize>(data: &T) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(data)
}

impl<T: Serialize> Payload for JsonPayload<T> {
    fn encode(&self) -> Result<EncodedBody, PayloadError> {
        let bytes = (self.serializer)(&self.data).map_err(PayloadError::Serialize)?;
        Ok(EncodedBody {
            content_type: "application/json".to_string(),
            bytes,
        })
    }
}
