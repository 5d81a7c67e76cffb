//! Legacy editor document model
//!
//! Articles written before the editor migration store their content as a
//! flat JSON array of block nodes. Blocks carry a `type` tag and a
//! `children` array; leaves carry `text` plus optional boolean styling
//! flags (`bold`, `italic`, `underline`) and no `type` tag at all.
//!
//! Stored documents are not validated anywhere upstream, so this model is
//! deliberately tolerant: every field is optional or defaulted, unknown
//! `type` tags map to [`SlateKind::Other`], and unknown fields are ignored.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Block tags used by the legacy editor
///
/// The tag vocabulary is closed: anything outside it deserializes to
/// [`SlateKind::Other`], which converts like an untagged paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlateKind {
    Paragraph,
    HeadingOne,
    HeadingTwo,
    HeadingThree,
    BulletedList,
    NumberedList,
    ListItem,
    Image,
    /// Catch-all for tags this crate does not recognize
    Other,
}

impl SlateKind {
    /// Parse a legacy `type` tag, mapping unknown tags to [`SlateKind::Other`]
    ///
    /// # Examples
    ///
    /// ```
    /// use cms_richtext_converter::slate::SlateKind;
    ///
    /// assert_eq!(SlateKind::from_label("heading-one"), SlateKind::HeadingOne);
    /// assert_eq!(SlateKind::from_label("block-quote"), SlateKind::Other);
    /// ```
    pub fn from_label(label: &str) -> Self {
        match label {
            "paragraph" => SlateKind::Paragraph,
            "heading-one" => SlateKind::HeadingOne,
            "heading-two" => SlateKind::HeadingTwo,
            "heading-three" => SlateKind::HeadingThree,
            "bulleted-list" => SlateKind::BulletedList,
            "numbered-list" => SlateKind::NumberedList,
            "list-item" => SlateKind::ListItem,
            "image" => SlateKind::Image,
            _ => SlateKind::Other,
        }
    }

    /// The tag string the legacy editor writes for this kind
    pub fn as_label(&self) -> &'static str {
        match self {
            SlateKind::Paragraph => "paragraph",
            SlateKind::HeadingOne => "heading-one",
            SlateKind::HeadingTwo => "heading-two",
            SlateKind::HeadingThree => "heading-three",
            SlateKind::BulletedList => "bulleted-list",
            SlateKind::NumberedList => "numbered-list",
            SlateKind::ListItem => "list-item",
            SlateKind::Image => "image",
            SlateKind::Other => "other",
        }
    }
}

impl Serialize for SlateKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_label())
    }
}

impl<'de> Deserialize<'de> for SlateKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Ok(SlateKind::from_label(&label))
    }
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

/// A single node in a legacy document
///
/// Blocks and leaves share this shape. A block has `kind` and `children`;
/// a text leaf has `text` and styling flags and no `kind`. Image blocks
/// carry their source in `url`.
///
/// # Examples
///
/// ```
/// use cms_richtext_converter::slate::{SlateKind, SlateNode};
///
/// let node: SlateNode = serde_json::from_str(
///     r#"{"type":"paragraph","children":[{"text":"Hi","bold":true}]}"#,
/// )
/// .unwrap();
/// assert_eq!(node.kind, Some(SlateKind::Paragraph));
/// assert!(node.children[0].bold);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlateNode {
    /// Block tag; absent on text leaves
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<SlateKind>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SlateNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub underline: bool,
    /// Image source; only meaningful on `image` blocks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl SlateNode {
    /// Leaf text, or the empty string when the node has none
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}
