//! Session-local blob storage for preview images
//!
//! Rewritten previews must not point at anything that outlives the editing
//! session, so image bytes are parked in a registry that hands out opaque
//! handles. The contract mirrors object-URL allocation in a browser:
//!
//! - `register` stores the bytes and returns a fresh handle
//! - every registration gets a distinct handle, identical bytes included
//! - `release` frees one handle; releasing an unknown handle is a no-op
//!
//! The caller owns the lifecycle: whoever triggered a preview is expected
//! to release the handles it received once the preview is dismissed.
//! [`MemoryBlobRegistry`] is the in-process implementation used by the
//! dashboard and by tests; the trait seam exists so a host can substitute
//! real object-URL allocation without touching the rewriter.

use crate::error::PreviewError;
use std::collections::HashMap;

/// Opaque reference to a registered blob
pub type BlobHandle = String;

/// Allocation and release of session-local blobs
pub trait BlobRegistry {
    /// Store a payload and return a fresh handle for it
    ///
    /// # Errors
    ///
    /// Implementations that talk to a real allocator may fail; the
    /// in-memory registry never does.
    fn register(&mut self, bytes: &[u8], mime_type: &str) -> Result<BlobHandle, PreviewError>;

    /// Free one handle. Unknown handles are ignored.
    fn release(&mut self, handle: &str);
}

/// A payload held by [`MemoryBlobRegistry`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// In-memory blob registry
///
/// Handles have the form `blob:mem-<seq>-<fingerprint>`: a monotonically
/// increasing registration counter plus the first 64 bits of the payload's
/// BLAKE3 hash. The counter keeps handles unique when the same bytes are
/// registered twice; the fingerprint makes a handle traceable back to its
/// content when debugging a preview.
///
/// # Examples
///
/// ```
/// use cms_richtext_converter::blob::{BlobRegistry, MemoryBlobRegistry};
///
/// let mut registry = MemoryBlobRegistry::new();
/// let handle = registry.register(b"pixels", "image/png").unwrap();
/// assert!(handle.starts_with("blob:mem-"));
/// assert!(registry.contains(&handle));
///
/// registry.release(&handle);
/// assert!(registry.is_empty());
/// ```
#[derive(Debug)]
pub struct MemoryBlobRegistry {
    blobs: HashMap<BlobHandle, StoredBlob>,
    next_id: u64,
}

impl MemoryBlobRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        MemoryBlobRegistry {
            blobs: HashMap::new(),
            next_id: 1,
        }
    }

    /// Number of live registrations
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }

    /// Whether a handle is currently live
    pub fn contains(&self, handle: &str) -> bool {
        self.blobs.contains_key(handle)
    }

    /// Look up the payload behind a live handle
    pub fn get(&self, handle: &str) -> Option<&StoredBlob> {
        self.blobs.get(handle)
    }
}

impl Default for MemoryBlobRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BlobRegistry for MemoryBlobRegistry {
    fn register(&mut self, bytes: &[u8], mime_type: &str) -> Result<BlobHandle, PreviewError> {
        let hash = blake3::hash(bytes);
        // First 8 bytes (64 bits) are plenty for a debugging fingerprint
        let handle = format!(
            "blob:mem-{:04x}-{}",
            self.next_id,
            hex::encode(&hash.as_bytes()[..8])
        );
        self.next_id += 1;
        self.blobs.insert(
            handle.clone(),
            StoredBlob {
                mime_type: mime_type.to_string(),
                bytes: bytes.to_vec(),
            },
        );
        Ok(handle)
    }

    fn release(&mut self, handle: &str) {
        self.blobs.remove(handle);
    }
}
