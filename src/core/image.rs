//! Encoded image payloads held by the session.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use crate::utils::ValidationError;

/// An encoded image (bytes + MIME type).
///
/// The bytes are never decoded locally; they travel to the generation
/// service and back as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    mime_type: String,
    bytes: Vec<u8>,
}

impl ImageAsset {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Accepts a user-supplied file, rejecting anything whose declared
    /// content type is not in the `image/` category.
    pub fn from_upload(declared_mime: &str, bytes: Vec<u8>) -> Result<Self, ValidationError> {
        let mime = declared_mime.trim();
        if !mime.starts_with("image/") {
            return Err(ValidationError::not_an_image(mime));
        }
        if bytes.is_empty() {
            return Err(ValidationError::invalid_payload("file is empty"));
        }
        Ok(Self::new(mime, bytes))
    }

    /// Accepts a browser `FileReader` result: either a full data URI or a
    /// bare base64 payload.
    pub fn from_encoded_upload(declared_mime: &str, payload: &str) -> Result<Self, ValidationError> {
        let encoded = match payload.split_once(";base64,") {
            Some((_, data)) if payload.starts_with("data:") => data,
            _ => payload,
        };
        let bytes = BASE64
            .decode(encoded.trim())
            .map_err(|e| ValidationError::invalid_payload(e.to_string()))?;
        Self::from_upload(declared_mime, bytes)
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Base64 payload as sent in an inline image part.
    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.bytes)
    }

    /// Directly renderable embedded image URI.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }
}
