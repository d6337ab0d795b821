pub mod error;
pub mod formats;
pub mod fs;

pub use error::{
    ConfigError,
    EditorError,
    EditorResult,
    GenerationError,
    GenerationResult,
    ValidationError,
};
pub use formats::{ImageFormat, format_from_path};
pub use fs::{extract_filename, read_image_file};
