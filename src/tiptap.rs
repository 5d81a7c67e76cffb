//! Current editor document model
//!
//! The migrated editor persists one JSON object per article: a `doc` root
//! whose `content` is a tree of typed nodes. Unlike the legacy model every
//! node here carries a `type` tag, text leaves included, and styling lives
//! in a `marks` array instead of boolean flags.
//!
//! The vocabulary is the subset of editor nodes the dashboard actually
//! produces. It is a closed union on purpose: content that does not parse
//! as this schema is replaced wholesale rather than patched node by node
//! (see [`crate::converter::DocumentConverter::normalize_content`]).

use serde::{Deserialize, Serialize};

/// Inline styling mark on a text leaf
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Mark {
    Bold,
    Italic,
    Underline,
}

/// Attributes of a `heading` node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingAttrs {
    /// Heading depth, 1 through 3
    pub level: u8,
}

/// Attributes of an `image` node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAttrs {
    pub src: String,
}

/// One node of a current-editor document
///
/// # Examples
///
/// ```
/// use cms_richtext_converter::tiptap::TiptapNode;
///
/// let doc: TiptapNode = serde_json::from_str(
///     r#"{"type":"doc","content":[{"type":"paragraph","content":[
///         {"type":"text","text":"Hello","marks":[{"type":"bold"}]}]}]}"#,
/// )
/// .unwrap();
/// assert!(matches!(doc, TiptapNode::Doc { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TiptapNode {
    Doc {
        #[serde(default)]
        content: Vec<TiptapNode>,
    },
    Paragraph {
        #[serde(default)]
        content: Vec<TiptapNode>,
    },
    Heading {
        attrs: HeadingAttrs,
        #[serde(default)]
        content: Vec<TiptapNode>,
    },
    BulletList {
        #[serde(default)]
        content: Vec<TiptapNode>,
    },
    OrderedList {
        #[serde(default)]
        content: Vec<TiptapNode>,
    },
    ListItem {
        #[serde(default)]
        content: Vec<TiptapNode>,
    },
    Image {
        attrs: ImageAttrs,
    },
    Text {
        text: String,
        /// `Some` serializes a `marks` key (possibly an empty array), `None`
        /// omits the key entirely. The editor accepts both, but converted
        /// documents keep the distinction stable across round trips.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        marks: Option<Vec<Mark>>,
    },
}

impl TiptapNode {
    /// The document the editor opens with before any content is loaded
    ///
    /// A `doc` containing one empty paragraph. Used as the replacement value
    /// whenever stored content cannot be interpreted at all.
    pub fn empty_doc() -> Self {
        TiptapNode::Doc {
            content: vec![TiptapNode::Paragraph {
                content: Vec::new(),
            }],
        }
    }
}
