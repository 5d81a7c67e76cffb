//! Fuzzy filename matching between document references and picked files
//!
//! Exported articles (Google Docs, Word, wikis) reference their images by
//! relative paths like `images/image3.png`, while the author picks files
//! whose names rarely agree exactly: casing differs, directories are gone,
//! extensions were changed by a screenshot tool. Exact matching would make
//! almost every import preview appear broken.
//!
//! The index bridges the gap from both sides. Registering a file stores a
//! set of name variants (exact, lowercased, stem, and the stem with common
//! image extensions); resolving a document reference probes a candidate
//! list derived the same way (full path first, then the final path segment
//! and its variants). The first candidate found wins.

use crate::blob::BlobHandle;
use std::collections::HashMap;

/// Extensions tried when matching by stem
const PROBE_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".gif"];

/// Everything before the first `.`, like the original name without its
/// extension chain
fn stem(name: &str) -> &str {
    match name.find('.') {
        Some(index) => &name[..index],
        None => name,
    }
}

/// The final `/`-separated segment of a path, which may be empty when the
/// path ends in a slash
fn last_segment(path: &str) -> &str {
    match path.rfind('/') {
        Some(index) => &path[index + 1..],
        None => path,
    }
}

/// Name variants stored when a file is registered
fn name_variants(filename: &str) -> Vec<String> {
    let stem = stem(filename);
    let mut variants = vec![
        filename.to_string(),
        filename.to_lowercase(),
        stem.to_string(),
        stem.to_lowercase(),
    ];
    for extension in PROBE_EXTENSIONS {
        variants.push(format!("{stem}{extension}"));
    }
    variants
}

/// Candidates probed, in order, when resolving a document reference
fn src_candidates(src: &str) -> Vec<String> {
    let name = last_segment(src);
    let stem = stem(name);
    let mut candidates = vec![
        src.to_string(),
        name.to_string(),
        name.to_lowercase(),
        stem.to_string(),
        stem.to_lowercase(),
    ];
    for extension in PROBE_EXTENSIONS {
        candidates.push(format!("{stem}{extension}"));
    }
    candidates
}

/// Maps filename variants of registered images to their blob handles
///
/// # Examples
///
/// ```
/// use cms_richtext_converter::filename_index::FilenameIndex;
///
/// let mut index = FilenameIndex::new();
/// index.insert("Pic 1.PNG", "blob:mem-0001-aa");
///
/// // a subdirectory path with different casing still resolves
/// assert_eq!(
///     index.resolve("images/Pic 1.png").map(String::as_str),
///     Some("blob:mem-0001-aa")
/// );
/// assert_eq!(index.resolve("images/other.png"), None);
/// ```
#[derive(Debug, Default)]
pub struct FilenameIndex {
    entries: HashMap<String, BlobHandle>,
}

impl FilenameIndex {
    /// Create an empty index
    pub fn new() -> Self {
        FilenameIndex {
            entries: HashMap::new(),
        }
    }

    /// Register a filename under all of its variants
    ///
    /// Variants are inserted individually, so when two registered files
    /// share a variant (same name in different cases, same stem with
    /// different extensions) the last registration wins for that variant.
    pub fn insert(&mut self, filename: &str, handle: &str) {
        for variant in name_variants(filename) {
            self.entries.insert(variant, handle.to_string());
        }
    }

    /// Resolve a document's image reference to a registered handle
    ///
    /// Probes the candidate list in order and returns the first hit, or
    /// `None` when no variant of any registered file matches.
    pub fn resolve(&self, src: &str) -> Option<&BlobHandle> {
        src_candidates(src)
            .into_iter()
            .find_map(|candidate| self.entries.get(&candidate))
    }

    /// Number of distinct variants currently stored
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
