use std::path::Path;
use tokio::fs;
use tracing::debug;
use crate::utils::{ValidationError, format_from_path};
use crate::core::ImageAsset;

/// Reads a picked file into an [`ImageAsset`], inferring its MIME type from the extension.
pub async fn read_image_file(path: impl AsRef<Path>) -> Result<ImageAsset, ValidationError> {
    let path = path.as_ref();

    if !fs::metadata(path).await?.is_file() {
        return Err(ValidationError::Io(format!("Not a file: {}", path.display())));
    }

    let format = format_from_path(path)?;
    let bytes = fs::read(path).await?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());

    ImageAsset::from_upload(format.mime_type(), bytes)
}

/// Get the file name portion of a path for log and status messages
pub fn extract_filename(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_png_from_disk() {
        let path = std::env::temp_dir().join(format!("depth-light-fx-{}.png", std::process::id()));
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let asset = read_image_file(&path).await.unwrap();
        assert_eq!(asset.mime_type(), "image/png");
        assert_eq!(asset.bytes(), &[0x89, b'P', b'N', b'G']);

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn missing_file_is_rejected() {
        let result = read_image_file("/nonexistent/photo.jpg").await;
        assert!(matches!(result, Err(ValidationError::Io(_))));
    }

    #[tokio::test]
    async fn directory_is_rejected() {
        let dir = std::env::temp_dir().join(format!("depth-light-fx-dir-{}.png", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let result = read_image_file(&dir).await;
        assert!(matches!(result, Err(ValidationError::Io(ref m)) if m.starts_with("Not a file")));

        let _ = std::fs::remove_dir(&dir);
    }

    #[test]
    fn filename_is_extracted() {
        assert_eq!(extract_filename("/a/b/beach.webp"), "beach.webp");
    }
}
