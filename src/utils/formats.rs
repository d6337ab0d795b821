use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use crate::utils::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    JPEG,
    PNG,
    WebP,
    AVIF,
    GIF,
}

impl ImageFormat {
    /// MIME type sent to the generation service
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::JPEG => "image/jpeg",
            Self::PNG => "image/png",
            Self::WebP => "image/webp",
            Self::AVIF => "image/avif",
            Self::GIF => "image/gif",
        }
    }
}

impl FromStr for ImageFormat {
    type Err = ValidationError;

    fn from_str(ext: &str) -> Result<Self, Self::Err> {
        let ext = ext.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Ok(Self::JPEG),
            "png" => Ok(Self::PNG),
            "webp" => Ok(Self::WebP),
            "avif" => Ok(Self::AVIF),
            "gif" => Ok(Self::GIF),
            _ => Err(ValidationError::not_an_image(format!("unknown extension .{ext}"))),
        }
    }
}

/// Get format from file extension
pub fn format_from_path(path: &Path) -> Result<ImageFormat, ValidationError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| ValidationError::unsupported_extension(path))?;

    ImageFormat::from_str(ext)
}
