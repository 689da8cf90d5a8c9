use super::{EncodedBody, Payload, PayloadError};
use rand::{Rng, distr::Alphanumeric, rng};
use std::fs;
use std::io;
use std::path::PathBuf;

const BOUNDARY_LEN: usize = 30;

/// A `multipart/form-data` request payload.
///
/// Fields are serialized in insertion order, one part per added value. A key
/// may carry several values; each becomes its own part under the same name.
pub struct FormData {
    fields: Vec<(String, FormValue)>,
}

enum FormValue {
    Text(String),
    Bytes(Vec<u8>),
    File(PathBuf),
}

impl FormData {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Appends a plain text field.
    pub fn add_text(&mut self, name: &str, value: &str) {
        self.fields.push((name.to_string(), FormValue::Text(value.to_string())));
    }

    /// Appends a raw byte field.
    pub fn add_bytes(&mut self, name: &str, value: Vec<u8>) {
        self.fields.push((name.to_string(), FormValue::Bytes(value)));
    }

    /// Appends a file-backed field. The file is read at encode time and the
    /// part's filename is derived from the path.
    pub fn add_file<P: Into<PathBuf>>(&mut self, name: &str, path: P) {
        self.fields.push((name.to_string(), FormValue::File(path.into())));
    }
}

impl Default for FormData {
    fn default() -> Self { Self::new() }
}

impl Payload for FormData {
    fn encode(&self) -> Result<EncodedBody, PayloadError> {
        let boundary = random_boundary();
        let mut body: Vec<u8> = Vec::new();
        for (name, value) in &self.fields {
            body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
            match value {
                FormValue::Text(text) => {
                    write_field_header(&mut body, name);
                    body.extend_from_slice(text.as_bytes());
                }
                FormValue::Bytes(bytes) => {
                    write_field_header(&mut body, name);
                    body.extend_from_slice(bytes);
                }
                FormValue::File(path) => {
                    let filename = path
                        .file_name()
                        .map(|f| f.to_string_lossy().into_owned())
                        .ok_or_else(|| {
                            PayloadError::FileRead(io::Error::new(
                                io::ErrorKind::InvalidInput,
                                "path carries no file name",
                            ))
                        })?;
                    let contents = fs::read(path).map_err(PayloadError::FileRead)?;
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                            escape_quotes(name),
                            escape_quotes(&filename)
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
                    body.extend_from_slice(&contents);
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
        Ok(EncodedBody {
            content_type: format!("multipart/form-data; boundary={boundary}"),
            bytes: body,
        })
    }
}

fn write_field_header(body: &mut Vec<u8>, name: &str) {
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
            escape_quotes(name)
        )
        .as_bytes(),
    );
}

fn escape_quotes(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn random_boundary() -> String {
    rng()
        .sample_iter(&Alphanumeric)
        .take(BOUNDARY_LEN)
        .map(char::from)
        .collect()
}
