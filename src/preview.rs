//! Upload preview rewriting
//!
//! Before an imported HTML article is saved, the author gets a preview
//! rendered inside the dashboard. The exported document cannot be shown
//! as-is for two reasons:
//!
//! 1. Exports often carry a `<base>` tag pointing at the export host, which
//!    silently redirects every relative URL in the preview
//! 2. `<img>` references point at files that only exist next to the export,
//!    not at anything the dashboard can serve
//!
//! [`PreviewRewriter::rewrite`] fixes both over the raw document text:
//! every `<base>` tag is removed, the picked image files are registered
//! with a [`BlobRegistry`], and each `<img>` src that fuzzily matches a
//! registered filename is pointed at the blob handle instead. Everything
//! else in the document is left byte-for-byte untouched; there is no HTML
//! parsing and no re-serialization involved, so broken markup stays exactly
//! as broken as it arrived.
//!
//! Src values that already resolve on their own (`data:`, `http://`,
//! `https://`) are never rewritten. Unmatched references are also left
//! alone, which makes a missing file visible in the preview instead of
//! papering over it.

use crate::blob::{BlobHandle, BlobRegistry};
use crate::error::PreviewError;
use crate::filename_index::FilenameIndex;
use crate::image::ImageFile;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::OnceLock;

/// Src schemes that the preview pane can already display
const PASSTHROUGH_SRC_PREFIXES: &[&str] = &["data:", "http://", "https://"];

fn base_tag_regex() -> Option<&'static Regex> {
    static BASE_TAG_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    BASE_TAG_REGEX
        .get_or_init(|| Regex::new(r"(?i)<base[^>]*>").ok())
        .as_ref()
}

fn img_tag_regex() -> Option<&'static Regex> {
    // the src token is either quoted (and may then contain spaces) or runs
    // to the next whitespace or tag end
    static IMG_TAG_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    IMG_TAG_REGEX
        .get_or_init(|| Regex::new(r#"(?i)<img[^>]+src=("[^"]*"|'[^']*'|[^\s>]+)[^>]*>"#).ok())
        .as_ref()
}

/// Remove every `<base ...>` tag from a document
///
/// Single pass, case-insensitive, attributes and all. The rest of the text
/// is returned unchanged, borrowed when nothing had to be removed.
///
/// # Examples
///
/// ```
/// use cms_richtext_converter::preview::strip_base_tags;
///
/// let html = r#"<head><base href="https://export.example/doc/"></head><p>hi</p>"#;
/// assert_eq!(strip_base_tags(html), "<head></head><p>hi</p>");
/// ```
pub fn strip_base_tags(html: &str) -> Cow<'_, str> {
    match base_tag_regex() {
        Some(regex) => regex.replace_all(html, ""),
        None => Cow::Borrowed(html),
    }
}

/// Result of rewriting a document for preview
///
/// `handles` lists one live blob handle per supplied image, in supply
/// order, whether or not the document referenced that image. The caller
/// must release them when the preview is dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenPreview {
    pub html: String,
    pub handles: Vec<BlobHandle>,
}

/// Rewrites imported documents so they render inside the dashboard
///
/// The rewriter is stateless; blob lifetime lives in the registry passed to
/// [`PreviewRewriter::rewrite`] and in the handles it returns.
pub struct PreviewRewriter;

impl PreviewRewriter {
    /// Create a new preview rewriter
    pub fn new() -> Self {
        PreviewRewriter
    }

    /// Prepare an imported document for in-dashboard preview
    ///
    /// Strips `<base>` tags, registers every supplied image with the
    /// registry, and rewrites each `<img>` src that matches a registered
    /// filename (see [`FilenameIndex`] for the matching rules). With no
    /// images supplied, only the base strip runs and no handles are
    /// allocated.
    ///
    /// # Errors
    ///
    /// Returns [`PreviewError::BlobRegistration`] when the registry refuses
    /// a payload. Handles allocated earlier in the same call are released
    /// first, so a failed rewrite leaves nothing behind.
    pub fn rewrite<R: BlobRegistry>(
        &self,
        html: &str,
        images: &[ImageFile],
        registry: &mut R,
    ) -> Result<RewrittenPreview, PreviewError> {
        let stripped = strip_base_tags(html);

        if images.is_empty() {
            return Ok(RewrittenPreview {
                html: stripped.into_owned(),
                handles: Vec::new(),
            });
        }

        let handles = register_all(images, registry)?;

        let mut index = FilenameIndex::new();
        for (image, handle) in images.iter().zip(&handles) {
            index.insert(&image.filename, handle);
        }

        Ok(RewrittenPreview {
            html: rewrite_img_tags(&stripped, &index),
            handles,
        })
    }
}

impl Default for PreviewRewriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Register every image, releasing the partial batch on failure
fn register_all<R: BlobRegistry>(
    images: &[ImageFile],
    registry: &mut R,
) -> Result<Vec<BlobHandle>, PreviewError> {
    let mut handles = Vec::with_capacity(images.len());
    for image in images {
        match registry.register(&image.bytes, &image.mime_type) {
            Ok(handle) => handles.push(handle),
            Err(err) => {
                for handle in &handles {
                    registry.release(handle);
                }
                return Err(err);
            }
        }
    }
    Ok(handles)
}

fn rewrite_img_tags(html: &str, index: &FilenameIndex) -> String {
    let Some(regex) = img_tag_regex() else {
        return html.to_string();
    };
    regex
        .replace_all(html, |caps: &Captures<'_>| rewrite_img_tag(caps, index))
        .into_owned()
}

/// Rewrite one matched `<img>` tag, or return it verbatim
///
/// Only the src token's value is ever replaced; quoting and every other
/// attribute byte stay where they were.
fn rewrite_img_tag(caps: &Captures<'_>, index: &FilenameIndex) -> String {
    let tag = &caps[0];
    let (Some(whole), Some(token)) = (caps.get(0), caps.get(1)) else {
        return tag.to_string();
    };

    let start = token.start() - whole.start();
    let end = start + token.as_str().len();
    let (open_quote, value, close_quote) = split_quotes(token.as_str());

    if is_passthrough_src(value) {
        return tag.to_string();
    }

    match index.resolve(value) {
        Some(handle) => format!(
            "{}{open_quote}{handle}{close_quote}{}",
            &tag[..start],
            &tag[end..]
        ),
        None => tag.to_string(),
    }
}

/// Split one leading and one trailing quote off a src token
fn split_quotes(token: &str) -> (&str, &str, &str) {
    let (open, rest) = match token.strip_prefix(['"', '\'']) {
        Some(rest) => (&token[..1], rest),
        None => ("", token),
    };
    let (value, close) = match rest.strip_suffix(['"', '\'']) {
        Some(value) => (value, &rest[value.len()..]),
        None => (rest, ""),
    };
    (open, value, close)
}

fn is_passthrough_src(src: &str) -> bool {
    PASSTHROUGH_SRC_PREFIXES
        .iter()
        .any(|prefix| src.starts_with(prefix))
}
