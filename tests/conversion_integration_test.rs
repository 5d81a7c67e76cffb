//! Integration tests for legacy article conversion
//!
//! These tests run whole stored articles through the converter the way the
//! dashboard does when an author opens an old post: parse the stored JSON,
//! convert, and hand the resulting document to the editor.

use cms_richtext_converter::converter::DocumentConverter;
use cms_richtext_converter::slate::SlateNode;
use cms_richtext_converter::tiptap::TiptapNode;
use serde_json::json;

/// A stored legacy article touching every block kind, plus the junk that
/// real storage accumulates (an unknown widget and a stray text leaf).
fn legacy_article() -> serde_json::Value {
    json!([
        {"type": "heading-one", "children": [{"text": "Quarterly Update"}]},
        {"type": "paragraph", "children": [
            {"text": "Welcome to the "},
            {"text": "Q3", "bold": true},
            {"text": " report covering "},
            {"text": "all regions", "italic": true, "underline": true},
            {"text": "."},
        ]},
        {"type": "heading-two", "children": [{"text": "Highlights"}]},
        {"type": "bulleted-list", "children": [
            {"type": "list-item", "children": [
                {"type": "paragraph", "children": [{"text": "Revenue up 12%"}]},
            ]},
            {"type": "list-item", "children": [
                {"type": "paragraph", "children": [{"text": "Churn down"}]},
            ]},
        ]},
        {"type": "numbered-list", "children": [
            {"type": "list-item", "children": [
                {"type": "paragraph", "children": [{"text": "Ship the v2 editor"}]},
            ]},
            {"type": "list-item", "children": [
                {"type": "paragraph", "children": [{"text": "Archive old drafts"}]},
            ]},
        ]},
        {"type": "image", "url": "uploads/chart-q3.png"},
        {"type": "callout", "text": "legacy widget nobody remembers"},
        {"text": "stray leaf outside any block"},
    ])
}

fn expected_document() -> serde_json::Value {
    json!({
        "type": "doc",
        "content": [
            {"type": "heading", "attrs": {"level": 1}, "content": [
                {"type": "text", "text": "Quarterly Update"},
            ]},
            {"type": "paragraph", "content": [
                {"type": "text", "text": "Welcome to the ", "marks": []},
                {"type": "text", "text": "Q3", "marks": [{"type": "bold"}]},
                {"type": "text", "text": " report covering ", "marks": []},
                {"type": "text", "text": "all regions", "marks": [{"type": "italic"}, {"type": "underline"}]},
                {"type": "text", "text": ".", "marks": []},
            ]},
            {"type": "heading", "attrs": {"level": 2}, "content": [
                {"type": "text", "text": "Highlights"},
            ]},
            {"type": "bulletList", "content": [
                {"type": "listItem", "content": [
                    {"type": "paragraph", "content": [{"type": "text", "text": "Revenue up 12%"}]},
                ]},
                {"type": "listItem", "content": [
                    {"type": "paragraph", "content": [{"type": "text", "text": "Churn down"}]},
                ]},
            ]},
            {"type": "orderedList", "content": [
                {"type": "listItem", "content": [
                    {"type": "paragraph", "content": [{"type": "text", "text": "Ship the v2 editor"}]},
                ]},
                {"type": "listItem", "content": [
                    {"type": "paragraph", "content": [{"type": "text", "text": "Archive old drafts"}]},
                ]},
            ]},
            {"type": "image", "attrs": {"src": "uploads/chart-q3.png"}},
            {"type": "paragraph", "content": [
                {"type": "text", "text": "legacy widget nobody remembers"},
            ]},
            {"type": "paragraph", "content": [
                {"type": "text", "text": "stray leaf outside any block"},
            ]},
        ],
    })
}

#[test]
fn test_full_article_conversion() {
    let nodes: Vec<SlateNode> =
        serde_json::from_value(legacy_article()).expect("legacy article should parse");

    let converter = DocumentConverter::new();
    let document = converter.convert(&nodes);

    assert_eq!(
        serde_json::to_value(&document).expect("document should serialize"),
        expected_document()
    );
}

#[test]
fn test_converted_document_round_trips_through_schema() {
    let nodes: Vec<SlateNode> =
        serde_json::from_value(legacy_article()).expect("legacy article should parse");
    let document = DocumentConverter::new().convert(&nodes);

    // what the converter emits must be readable as a current document
    let serialized = serde_json::to_string(&document).expect("document should serialize");
    let reparsed: TiptapNode =
        serde_json::from_str(&serialized).expect("converted output must parse as current schema");
    assert_eq!(reparsed, document);
}

#[test]
fn test_normalize_content_matches_direct_conversion() {
    let converter = DocumentConverter::new();

    let nodes: Vec<SlateNode> =
        serde_json::from_value(legacy_article()).expect("legacy article should parse");
    let direct = converter.convert(&nodes);
    let normalized = converter.normalize_content(legacy_article());

    assert_eq!(
        normalized, direct,
        "loading through normalize_content must equal typed conversion"
    );
}

#[test]
fn test_normalize_content_passes_through_migrated_article() {
    let converter = DocumentConverter::new();
    let stored = expected_document();

    let document = converter.normalize_content(stored.clone());
    assert_eq!(
        serde_json::to_value(&document).expect("document should serialize"),
        stored,
        "already-migrated articles must load unchanged"
    );
}

#[test]
fn test_normalize_content_replaces_unusable_content() {
    let converter = DocumentConverter::new();
    let empty = serde_json::to_value(TiptapNode::empty_doc()).expect("serialize");

    for stored in [
        json!(null),
        json!("<p>an article from the HTML era</p>"),
        json!(12345),
        json!({"not": "a document"}),
    ] {
        let document = converter.normalize_content(stored);
        assert_eq!(
            serde_json::to_value(&document).expect("serialize"),
            empty,
            "unusable stored content must become the editor's default document"
        );
    }
}

#[test]
fn test_conversion_is_deterministic_across_instances() {
    let nodes: Vec<SlateNode> =
        serde_json::from_value(legacy_article()).expect("legacy article should parse");

    let first = DocumentConverter::new().convert(&nodes);
    let second = DocumentConverter::new().convert(&nodes);
    assert_eq!(first, second, "conversion must be deterministic");
}

#[test]
fn test_top_level_count_survives_conversion() {
    let stored = legacy_article();
    let input_len = stored.as_array().expect("fixture is an array").len();

    let document = DocumentConverter::new().normalize_content(stored);
    match document {
        TiptapNode::Doc { content } => assert_eq!(
            content.len(),
            input_len,
            "every top-level legacy node must produce exactly one output node"
        ),
        other => panic!("expected doc root, got {:?}", other),
    }
}

#[test]
fn test_large_article_converts_completely() {
    let mut nodes = Vec::new();
    for index in 0..2_000 {
        nodes.push(SlateNode {
            kind: Some(cms_richtext_converter::slate::SlateKind::Paragraph),
            children: vec![SlateNode {
                text: Some(format!("paragraph number {index}")),
                bold: index % 2 == 0,
                ..SlateNode::default()
            }],
            ..SlateNode::default()
        });
    }

    let document = DocumentConverter::new().convert(&nodes);
    match document {
        TiptapNode::Doc { content } => assert_eq!(content.len(), 2_000),
        other => panic!("expected doc root, got {:?}", other),
    }
}
