//! Error Handling Module
//!
//! Defines custom error types for the evoaug library.
//! Uses thiserror for ergonomic error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for evoaug operations
#[derive(Error, Debug)]
pub enum EvoAugError {
    /// Error loading or processing an image
    #[error("Failed to load image at '{0}': {1}")]
    ImageLoad(PathBuf, String),

    /// Error with dataset operations
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Error constructing or applying an augmentation
    #[error("Augmentation error: {0}")]
    Augmentation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image encode/decode error
    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Path not found
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),
}

impl From<serde_json::Error> for EvoAugError {
    fn from(err: serde_json::Error) -> Self {
        EvoAugError::Serialization(err.to_string())
    }
}

/// Convenience Result type for evoaug operations
pub type Result<T> = std::result::Result<T, EvoAugError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EvoAugError::Dataset("no images found".to_string());
        assert_eq!(err.to_string(), "Dataset error: no images found");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: EvoAugError = io_err.into();
        assert!(matches!(err, EvoAugError::Io(_)));
    }

    #[test]
    fn test_image_load_error_contains_path() {
        let path = PathBuf::from("/data/leaf.jpg");
        let err = EvoAugError::ImageLoad(path, "truncated".to_string());
        assert!(err.to_string().contains("leaf.jpg"));
    }
}
