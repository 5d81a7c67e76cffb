//! Document converter - transforms legacy editor trees to the current schema
//!
//! Articles written before the editor migration store a flat array of legacy
//! block nodes; the migrated editor wants a single `doc` tree. This module
//! performs that conversion at read time, so stored legacy content keeps
//! working without a bulk database migration.
//!
//! # Conversion Rules
//!
//! Each legacy block maps to exactly one current node:
//!
//! - `paragraph` becomes a paragraph whose children are text leaves with a
//!   `marks` array built from the legacy boolean flags (always present, in
//!   bold / italic / underline order, empty when unstyled)
//! - `heading-one` / `heading-two` / `heading-three` become `heading` nodes
//!   with levels 1-3 and bare text leaves (no `marks` key)
//! - `bulleted-list` / `numbered-list` become `bulletList` / `orderedList`
//!   and convert their children recursively
//! - `list-item` becomes a `listItem` holding a single paragraph; each child
//!   contributes its own children, which become bare text leaves in that
//!   paragraph. A childless leaf directly under the item contributes
//!   nothing, and structure nested deeper than one level is dropped; the
//!   dashboard has always rendered old lists this way
//! - `image` becomes an `image` node, `src` taken from the legacy `url`
//! - anything else, including nodes with no tag at all, degrades to a
//!   paragraph holding the node's raw text (or the empty string)
//!
//! # Guarantees
//!
//! Conversion is a total function: it never fails, never panics, and never
//! drops a top-level node. The output root is always a `doc` whose content
//! length equals the input length. Identical input produces identical
//! output, so converted documents are safe to cache and diff.
//!
//! # Examples
//!
//! ```
//! use cms_richtext_converter::converter::DocumentConverter;
//! use cms_richtext_converter::slate::SlateNode;
//!
//! let legacy: Vec<SlateNode> = serde_json::from_str(
//!     r#"[{"type":"heading-one","children":[{"text":"Launch notes"}]}]"#,
//! )
//! .unwrap();
//!
//! let converter = DocumentConverter::new();
//! let doc = serde_json::to_value(converter.convert(&legacy)).unwrap();
//! assert_eq!(doc["type"], "doc");
//! assert_eq!(doc["content"][0]["type"], "heading");
//! assert_eq!(doc["content"][0]["attrs"]["level"], 1);
//! ```

use crate::slate::{SlateKind, SlateNode};
use crate::tiptap::{HeadingAttrs, ImageAttrs, Mark, TiptapNode};
use serde_json::Value;

/// Converts legacy editor documents into the current editor schema
///
/// The converter is stateless; one instance can be shared freely and
/// conversion has no side effects.
pub struct DocumentConverter;

impl DocumentConverter {
    /// Create a new document converter
    pub fn new() -> Self {
        DocumentConverter
    }

    /// Convert a legacy node array into a current-schema document
    ///
    /// The returned root is always [`TiptapNode::Doc`] and its content has
    /// one entry per input node, in input order.
    pub fn convert(&self, nodes: &[SlateNode]) -> TiptapNode {
        TiptapNode::Doc {
            content: nodes.iter().map(|node| self.convert_node(node)).collect(),
        }
    }

    /// Interpret stored article content of unknown vintage
    ///
    /// Storage holds three generations of content side by side, so loading
    /// an article goes through this single entry point:
    ///
    /// - a JSON array is treated as a legacy document and converted
    /// - a JSON object is passed through untouched when it parses as a
    ///   current-schema document, and replaced by [`TiptapNode::empty_doc`]
    ///   when it does not
    /// - anything else (null, strings, numbers, booleans) is replaced by
    ///   [`TiptapNode::empty_doc`]
    ///
    /// Array elements that fail to parse as legacy nodes degrade to empty
    /// fallback paragraphs instead of aborting the whole document, so the
    /// content-length guarantee of [`DocumentConverter::convert`] holds here
    /// too.
    pub fn normalize_content(&self, content: Value) -> TiptapNode {
        match content {
            Value::Array(items) => {
                let nodes: Vec<SlateNode> = items
                    .into_iter()
                    .map(|item| serde_json::from_value(item).unwrap_or_default())
                    .collect();
                self.convert(&nodes)
            }
            object @ Value::Object(_) => {
                serde_json::from_value(object).unwrap_or_else(|_| TiptapNode::empty_doc())
            }
            _ => TiptapNode::empty_doc(),
        }
    }

    fn convert_node(&self, node: &SlateNode) -> TiptapNode {
        match node.kind {
            Some(SlateKind::Paragraph) => TiptapNode::Paragraph {
                content: node.children.iter().map(marked_text).collect(),
            },
            Some(SlateKind::HeadingOne) => heading(1, &node.children),
            Some(SlateKind::HeadingTwo) => heading(2, &node.children),
            Some(SlateKind::HeadingThree) => heading(3, &node.children),
            Some(SlateKind::BulletedList) => TiptapNode::BulletList {
                content: self.convert_list_children(node),
            },
            Some(SlateKind::NumberedList) => TiptapNode::OrderedList {
                content: self.convert_list_children(node),
            },
            Some(SlateKind::ListItem) => TiptapNode::ListItem {
                content: vec![TiptapNode::Paragraph {
                    content: flattened_item_text(node),
                }],
            },
            Some(SlateKind::Image) => TiptapNode::Image {
                attrs: ImageAttrs {
                    src: node.url.clone().unwrap_or_default(),
                },
            },
            Some(SlateKind::Other) | None => fallback_paragraph(node),
        }
    }

    fn convert_list_children(&self, node: &SlateNode) -> Vec<TiptapNode> {
        node.children
            .iter()
            .map(|child| self.convert_node(child))
            .collect()
    }
}

impl Default for DocumentConverter {
    fn default() -> Self {
        Self::new()
    }
}

/// Text leaf with an explicit marks array built from the legacy style flags
fn marked_text(leaf: &SlateNode) -> TiptapNode {
    let mut marks = Vec::new();
    if leaf.bold {
        marks.push(Mark::Bold);
    }
    if leaf.italic {
        marks.push(Mark::Italic);
    }
    if leaf.underline {
        marks.push(Mark::Underline);
    }
    TiptapNode::Text {
        text: leaf.text_or_empty().to_string(),
        marks: Some(marks),
    }
}

/// Text leaf without a marks key, used wherever the legacy editor could not
/// attach styling (headings, list items, fallback paragraphs)
fn bare_text(leaf: &SlateNode) -> TiptapNode {
    TiptapNode::Text {
        text: leaf.text_or_empty().to_string(),
        marks: None,
    }
}

fn heading(level: u8, children: &[SlateNode]) -> TiptapNode {
    TiptapNode::Heading {
        attrs: HeadingAttrs { level },
        content: children.iter().map(bare_text).collect(),
    }
}

/// One-level flattening of a list item's children into text leaves
///
/// Each child contributes its own children as bare text nodes. A child
/// without children contributes nothing, and anything nested deeper than
/// the grandchild level is dropped.
fn flattened_item_text(node: &SlateNode) -> Vec<TiptapNode> {
    node.children
        .iter()
        .flat_map(|child| child.children.iter().map(bare_text))
        .collect()
}

fn fallback_paragraph(node: &SlateNode) -> TiptapNode {
    TiptapNode::Paragraph {
        content: vec![bare_text(node)],
    }
}
