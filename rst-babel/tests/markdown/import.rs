//! Import tests for the Markdown format (Markdown → node tree)

use insta::assert_snapshot;
use rst_babel::format::Format;
use rst_babel::formats::markdown::{MarkdownFormat, MarkdownOptions};
use rst_babel::formats::treeviz::to_treeviz_str;
use rst_babel::ir::nodes::Node;
use rst_babel::{markdown_to_rst, render};

use crate::common::read_fixture;

#[test]
fn test_kitchensink_tree() {
    let doc = MarkdownFormat::default()
        .parse(&read_fixture("kitchensink.md"))
        .expect("Failed to parse markdown");

    assert_snapshot!(to_treeviz_str(&doc).trim_end(), @r###"
⧉ Document (10 blocks)
├─ § Heading 1: Release notes
│ └─ ◦ Release notes
├─ ¶ Paragraph
│ ├─ ◦ Version 
│ ├─ 𝐁 Strong
│ │ └─ ◦ 2.0
│ ├─ ◦  brings 
│ ├─ 𝐼 Emphasis
│ │ └─ ◦ many
│ ├─ ◦  changes, see 
│ ├─ ⊕ Link → https://docs.example.com
│ │ └─ ◦ the docs
│ └─ ◦ .
├─ § Heading 2: Install
│ └─ ◦ Install
├─ ¶ Paragraph
│ ├─ ◦ Run 
│ ├─ ƒ pip install tool
│ └─ ◦ :
├─ 𝒱 CodeBlock [sh] 1 lines
├─ ❝ BlockQuote
│ └─ ¶ Paragraph
│   ├─ ◦ Upgrading from 1.x? Read the
│   ├─ ↵ SoftBreak
│   └─ ◦ migration guide first.
├─ ☰ 2 items (ordered, tight)
│ ├─ • Item
│ │ └─ ¶ Paragraph
│ │   └─ ◦ Download
│ └─ • Item
│   └─ ¶ Paragraph
│     ├─ ◦ Unpack
│     ├─ ↵ SoftBreak
│     └─ ◦ the archive
├─ ☰ 2 items (bullet, tight)
│ ├─ • Item
│ │ └─ ¶ Paragraph
│ │   └─ ◦ one
│ └─ • Item
│   ├─ ¶ Paragraph
│   │ └─ ◦ two
│   └─ ☰ 1 items (bullet, tight)
│     └─ • Item
│       └─ ¶ Paragraph
│         └─ ◦ nested
├─ ― ThematicBreak
└─ ¶ Paragraph
  └─ ▣ Image shot.png (Screenshot)
"###);
}

#[test]
fn test_lazy_continuation_matches_indented() {
    let lazy = MarkdownFormat::default()
        .parse("1. First item,\nwith lazy indentation.\n")
        .unwrap();
    let indented = MarkdownFormat::default()
        .parse("1. First item,\n   with lazy indentation.\n")
        .unwrap();
    assert_eq!(lazy, indented);
}

#[test]
fn test_setext_heading() {
    let doc = MarkdownFormat::default().parse("Title\n=====\n").unwrap();
    assert_eq!(doc, Node::document(vec![Node::heading(1, vec![Node::text("Title")])]));
}

#[test]
fn test_hard_break_renders_as_new_line() {
    let rendered = markdown_to_rst("first\\\nsecond\n").unwrap();
    assert_eq!(rendered, "\nfirst\nsecond\n");
}

#[test]
fn test_smart_punctuation_is_opt_in() {
    let source = "It's \"quoted\"";

    let plain = MarkdownFormat::default().parse(source).unwrap();
    assert_eq!(render(&plain).unwrap(), "\nIt's \"quoted\"\n");

    let smart = MarkdownFormat::new(MarkdownOptions { smart: true })
        .parse(source)
        .unwrap();
    assert_eq!(
        render(&smart).unwrap(),
        "\nIt\u{2019}s \u{201c}quoted\u{201d}\n"
    );
}

#[test]
fn test_tables_are_plain_paragraphs_without_extension() {
    let rendered = markdown_to_rst("| a | b |\n|---|---|\n| 1 | 2 |\n").unwrap();
    assert_eq!(rendered, "\n\\| a \\| b \\|\n\\|---\\|---\\|\n\\| 1 \\| 2 \\|\n");
}
