//! Local image files attached to an article import
//!
//! When an author imports an exported HTML article, the images referenced
//! by the document come along as plain files picked in the browser or read
//! from a directory. This module models those files and the small amount of
//! classification the import flow needs: is this actually an image, what is
//! its MIME type, and how do we embed it inline when the article is saved.

use crate::error::PreviewError;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use std::path::Path;

/// Known image file extensions and their MIME types
const IMAGE_MIME_TYPES: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("svg", "image/svg+xml"),
    ("bmp", "image/bmp"),
];

/// MIME type used when a file's extension is not recognized
const UNKNOWN_MIME: &str = "application/octet-stream";

/// An image file selected for an article import
///
/// `filename` is the bare name as the author picked it, with no directory
/// components; the preview rewriter matches document references against it
/// case-tolerantly, so it is stored here exactly as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    /// Create an image file from in-memory parts
    pub fn new(
        filename: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        ImageFile {
            filename: filename.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Load an image file from disk
    ///
    /// The stored filename is the path's final component; the MIME type is
    /// derived from the extension via [`mime_for_extension`], falling back
    /// to `application/octet-stream`.
    ///
    /// # Errors
    ///
    /// Returns [`PreviewError::ImageRead`] when the file cannot be read.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PreviewError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|err| PreviewError::ImageRead(format!("{}: {}", path.display(), err)))?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime_type = path
            .extension()
            .and_then(|ext| mime_for_extension(&ext.to_string_lossy()))
            .unwrap_or(UNKNOWN_MIME)
            .to_string();
        Ok(ImageFile {
            filename,
            mime_type,
            bytes,
        })
    }

    /// Whether this file claims to be an image at all
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    /// Encode the file as a `data:` URL for inline embedding
    ///
    /// Saved articles embed their images this way, so the stored document
    /// has no dependency on upload-session state.
    ///
    /// # Examples
    ///
    /// ```
    /// use cms_richtext_converter::image::ImageFile;
    ///
    /// let file = ImageFile::new("dot.gif", "image/gif", b"GIF89a".to_vec());
    /// assert_eq!(file.to_data_url(), "data:image/gif;base64,R0lGODlh");
    /// ```
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }
}

/// Look up the MIME type for an image file extension (case-insensitive)
///
/// # Examples
///
/// ```
/// use cms_richtext_converter::image::mime_for_extension;
///
/// assert_eq!(mime_for_extension("PNG"), Some("image/png"));
/// assert_eq!(mime_for_extension("exe"), None);
/// ```
pub fn mime_for_extension(extension: &str) -> Option<&'static str> {
    let extension = extension.to_ascii_lowercase();
    IMAGE_MIME_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| *mime)
}

/// Split a selection of files into images and everything else
///
/// The import flow only registers files whose MIME type says `image/`; the
/// rejected remainder is returned so the caller can tell the author what
/// was skipped rather than dropping files silently.
pub fn partition_images(files: Vec<ImageFile>) -> (Vec<ImageFile>, Vec<ImageFile>) {
    files.into_iter().partition(ImageFile::is_image)
}
