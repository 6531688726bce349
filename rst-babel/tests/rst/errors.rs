//! Trees the renderer must refuse.

use rst_babel::ir::nodes::{List, Node};
use rst_babel::{render, FormatError, RenderError};

#[test]
fn test_item_outside_list() {
    let doc = Node::document(vec![Node::item(vec![])]);
    assert_eq!(
        render(&doc).unwrap_err(),
        RenderError::unsupported("item", "document")
    );
}

#[test]
fn test_paragraph_inside_heading() {
    let doc = Node::document(vec![Node::heading(
        1,
        vec![Node::paragraph(vec![Node::text("nested")])],
    )]);
    assert_eq!(
        render(&doc).unwrap_err(),
        RenderError::unsupported("paragraph", "heading")
    );
}

#[test]
fn test_nested_links() {
    let doc = Node::document(vec![Node::paragraph(vec![Node::link(
        "http://outer",
        vec![Node::link("http://inner", vec![Node::text("x")])],
    )])]);
    assert_eq!(
        render(&doc).unwrap_err(),
        RenderError::unsupported("link", "link")
    );
}

#[test]
fn test_image_without_url() {
    let doc = Node::document(vec![Node::paragraph(vec![Node::image("", "alt")])]);
    assert_eq!(
        render(&doc).unwrap_err(),
        RenderError::missing("image", "url")
    );
}

#[test]
fn test_error_deep_in_list_aborts_render() {
    let doc = Node::document(vec![
        Node::paragraph(vec![Node::text("before")]),
        Node::List(List {
            ordered: true,
            start: 1,
            tight: true,
            items: vec![Node::item(vec![Node::paragraph(vec![Node::link(
                "",
                vec![Node::text("broken")],
            )])])],
        }),
    ]);
    assert_eq!(render(&doc).unwrap_err(), RenderError::missing("link", "url"));
}

#[test]
fn test_unsupported_markdown_surfaces_as_format_error() {
    let err = rst_babel::markdown_to_rst("Hello <span>inline html</span>").unwrap_err();
    assert!(matches!(
        err,
        FormatError::Render(RenderError::UnsupportedNode { ref kind, .. }) if kind == "html_inline"
    ));
}
