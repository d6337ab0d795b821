//! Error types for the depth & light editor.
//!
//! Provides a hierarchy of error types using `thiserror` for ergonomic error handling.

use std::io;
use std::path::PathBuf;
use thiserror::Error;
use serde::Serialize;

/// Validation errors for user-supplied images and payloads.
#[derive(Error, Debug, Serialize)]
pub enum ValidationError {
    /// Declared content type is not an image
    #[error("Please select an image file (got '{0}')")]
    NotAnImage(String),
    /// Payload could not be decoded
    #[error("Invalid image payload: {0}")]
    InvalidPayload(String),
    /// File extension does not map to a known image type
    #[error("Unsupported image file: {0}")]
    UnsupportedExtension(PathBuf),
    /// IO error reading a picked file
    #[error("IO error: {0}")]
    Io(String),
}

/// Failures of a single round trip to the image generation service.
///
/// The frontend never sees these directly: the session collapses them into
/// one fixed message per operation.
#[derive(Error, Debug, Serialize)]
pub enum GenerationError {
    /// The service answered but returned no inline image part
    #[error("The service did not return an image")]
    NoImage,
    /// Non-success HTTP status
    #[error("Service error {status}: {body}")]
    Service { status: u16, body: String },
    /// Connect, timeout, or other transport failure
    #[error("Transport error: {0}")]
    Transport(String),
    /// Response body could not be parsed or decoded
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Startup configuration errors. Any of these is fatal and surfaces through
/// `anyhow` before a window opens.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No service credential in the environment
    #[error("{0} environment variable is not set")]
    MissingCredential(String),
    /// A variable is present but unusable
    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: String, reason: String },
}

/// Main error type for the editor backend.
///
/// All errors in the application are converted to this type before being
/// returned to the frontend.
#[derive(Error, Debug, Serialize)]
pub enum EditorError {
    /// Upload or input validation failed
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Image generation failed
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    /// Session state could not be accessed
    #[error("State error: {0}")]
    State(String),
}

/// Convenience result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// Result type for generation client calls.
pub type GenerationResult<T> = Result<T, GenerationError>;

// Helper methods for validation error creation
impl ValidationError {
    pub fn not_an_image(mime_type: impl Into<String>) -> Self {
        Self::NotAnImage(mime_type.into())
    }

    pub fn invalid_payload(msg: impl Into<String>) -> Self {
        Self::InvalidPayload(msg.into())
    }

    pub fn unsupported_extension(path: impl Into<PathBuf>) -> Self {
        Self::UnsupportedExtension(path.into())
    }
}

impl GenerationError {
    pub fn malformed<T: Into<String>>(msg: T) -> Self {
        Self::MalformedResponse(msg.into())
    }
}

// Convert io::Error to ValidationError
impl From<io::Error> for ValidationError {
    fn from(err: io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

// Convert io::Error to EditorError
impl From<io::Error> for EditorError {
    fn from(err: io::Error) -> Self {
        Self::Validation(ValidationError::from(err))
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::MalformedResponse(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<base64::DecodeError> for GenerationError {
    fn from(err: base64::DecodeError) -> Self {
        Self::MalformedResponse(format!("base64 decode failed: {err}"))
    }
}

impl<T> From<std::sync::PoisonError<T>> for EditorError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        EditorError::State("Session state is corrupted".to_string())
    }
}
