//! CMS Richtext Converter - article authoring core
//!
//! This library backs the CMS admin dashboard's two document workflows:
//! opening articles written in the retired rich-text editor inside the
//! current one, and previewing imported HTML articles together with their
//! image files before anything is saved.
//!
//! # Architecture
//!
//! The library is structured into several modules:
//! - `slate`: tolerant model of the legacy editor's stored documents
//! - `tiptap`: typed model of the current editor's document schema
//! - `converter`: legacy-to-current document conversion and content
//!   normalization
//! - `charset`: encoding detection and lossy decoding of uploaded HTML
//! - `image`: local image files, MIME classification, data-URL embedding
//! - `blob`: session-local blob registry behind the preview rewrites
//! - `filename_index`: fuzzy matching of document references to filenames
//! - `preview`: `<base>` stripping and `<img>` src rewriting over raw text
//!
//! # Guarantees
//!
//! Document conversion is total and never fails; see
//! [`converter::DocumentConverter`]. Preview rewriting touches only the
//! bytes it must (removed `<base>` tags and matched src values) and returns
//! the rest of the document unchanged; see [`preview::PreviewRewriter`].

// Module declarations
pub mod blob;
pub mod charset;
pub mod converter;
pub mod error;
pub mod filename_index;
pub mod image;
pub mod preview;
pub mod slate;
pub mod tiptap;

// Re-export main types for convenience
pub use blob::{BlobHandle, BlobRegistry, MemoryBlobRegistry};
pub use converter::DocumentConverter;
pub use error::PreviewError;
pub use filename_index::FilenameIndex;
pub use image::ImageFile;
pub use preview::{PreviewRewriter, RewrittenPreview, strip_base_tags};
pub use slate::{SlateKind, SlateNode};
pub use tiptap::{HeadingAttrs, ImageAttrs, Mark, TiptapNode};
