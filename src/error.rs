//! Error types for preview and import operations

use std::fmt;

/// Errors that can occur while preparing an upload preview
#[derive(Debug)]
pub enum PreviewError {
    /// Reading a local image file failed
    ImageRead(String),
    /// Registering image bytes with the blob registry failed
    BlobRegistration(String),
}

impl fmt::Display for PreviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreviewError::ImageRead(msg) => write!(f, "Image read error: {}", msg),
            PreviewError::BlobRegistration(msg) => write!(f, "Blob registration error: {}", msg),
        }
    }
}

impl std::error::Error for PreviewError {}
