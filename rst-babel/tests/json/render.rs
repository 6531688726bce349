//! Rendering trees that arrive as JSON.

use rst_babel::format::Format;
use rst_babel::formats::json::{to_json, JsonFormat};
use rst_babel::formats::markdown::parser::parse_from_markdown;
use rst_babel::{render, FormatError, FormatRegistry, RenderError};

use crate::common::fixture_pair;

#[test]
fn test_json_tree_renders_like_markdown_tree() {
    for name in ["heading", "ordered_list_with_multi_line_items", "kitchensink"] {
        let (markdown, expected) = fixture_pair(name);
        let tree = parse_from_markdown(&markdown).unwrap();
        let json = to_json(&tree).unwrap();

        let reparsed = JsonFormat.parse(&json).unwrap();
        assert_eq!(render(&reparsed).unwrap(), expected, "fixture `{name}`");
    }
}

#[test]
fn test_hand_written_tree() {
    let json = r#"{
        "kind": "document",
        "children": [
            {"kind": "heading", "level": 2, "children": [{"kind": "text", "literal": "API"}]},
            {"kind": "list", "ordered": false, "items": [
                {"kind": "item", "children": [
                    {"kind": "paragraph", "children": [
                        {"kind": "code", "literal": "render()"},
                        {"kind": "text", "literal": " returns a string"}
                    ]}
                ]}
            ]}
        ]
    }"#;
    let registry = FormatRegistry::default();
    let doc = registry.parse(json, "json").unwrap();
    assert_eq!(
        registry.serialize(&doc, "rst").unwrap(),
        "\nAPI\n***\n\n* ``render()`` returns a string\n"
    );
}

#[test]
fn test_block_in_inline_position_fails_at_render() {
    let json = r#"{"kind": "document", "children": [
        {"kind": "paragraph", "children": [{"kind": "block_quote", "children": []}]}
    ]}"#;
    let doc = JsonFormat.parse(json).unwrap();
    assert_eq!(
        render(&doc).unwrap_err(),
        RenderError::unsupported("block_quote", "paragraph")
    );
}

#[test]
fn test_unknown_kind_fails_at_load() {
    let json = r#"{"kind": "document", "children": [{"kind": "footnote"}]}"#;
    let err = FormatRegistry::default().parse(json, "json").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Render error: unsupported node `footnote` inside `document`"
    );
    assert!(matches!(err, FormatError::Render(_)));
}
