//! Conversion examples: opening legacy articles in the current editor

use cms_richtext_converter::converter::DocumentConverter;
use cms_richtext_converter::slate::SlateNode;
use serde_json::json;

fn main() {
    println!("=== CMS Richtext Converter - Conversion Examples ===\n");

    // Example 1: Styled paragraph with marks
    example_1();

    // Example 2: Headings and lists
    example_2();

    // Example 3: Degrading unknown content
    example_3();

    // Example 4: Loading stored content of any vintage
    example_4();
}

fn print_conversion(legacy: serde_json::Value) {
    println!("Stored legacy content:");
    println!("{}\n", serde_json::to_string_pretty(&legacy).expect("serialize input"));

    let nodes: Vec<SlateNode> = serde_json::from_value(legacy).expect("parse legacy nodes");
    let document = DocumentConverter::new().convert(&nodes);

    println!("Editor document:");
    println!(
        "{}",
        serde_json::to_string_pretty(&document).expect("serialize output")
    );
    println!("---\n");
}

fn example_1() {
    println!("Example 1: Styled paragraph with marks");
    print_conversion(json!([
        {"type": "paragraph", "children": [
            {"text": "Mostly plain with some "},
            {"text": "bold", "bold": true},
            {"text": " and "},
            {"text": "emphasis", "italic": true, "underline": true},
        ]}
    ]));
}

fn example_2() {
    println!("Example 2: Headings and lists");
    print_conversion(json!([
        {"type": "heading-one", "children": [{"text": "Release checklist"}]},
        {"type": "bulleted-list", "children": [
            {"type": "list-item", "children": [
                {"type": "paragraph", "children": [{"text": "Tag the build"}]},
            ]},
            {"type": "list-item", "children": [
                {"type": "paragraph", "children": [{"text": "Update the changelog"}]},
            ]},
        ]},
        {"type": "image", "url": "uploads/release-flow.png"},
    ]));
}

fn example_3() {
    println!("Example 3: Degrading unknown content");
    print_conversion(json!([
        {"type": "poll", "text": "widget from a plugin we removed in 2021"},
        {"text": "a bare text leaf"},
        {},
    ]));
}

fn example_4() {
    println!("Example 4: Loading stored content of any vintage");
    let converter = DocumentConverter::new();

    for (label, stored) in [
        ("legacy array", json!([{"type": "paragraph", "children": [{"text": "old"}]}])),
        ("current document", json!({"type": "doc", "content": [{"type": "paragraph", "content": []}]})),
        ("unusable value", json!("<p>from the raw-HTML era</p>")),
    ] {
        let document = converter.normalize_content(stored);
        println!(
            "{label}: {}",
            serde_json::to_string(&document).expect("serialize")
        );
    }
    println!("---\n");
}
