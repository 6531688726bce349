//! Markdown → RST conversion checked against the fixture pairs.

use crate::common::fixture_pair;
use insta::assert_snapshot;
use rst_babel::{markdown_to_rst, markdown_to_rst_with_rules, RstRules};

fn assert_fixture(name: &str) {
    let (markdown, expected) = fixture_pair(name);
    let rendered = markdown_to_rst(&markdown).expect("conversion to succeed");
    assert_eq!(rendered, expected, "fixture `{name}` differs");
}

#[test]
fn test_strong() {
    assert_fixture("strong");
}

#[test]
fn test_emphasis() {
    assert_fixture("emphasis");
}

#[test]
fn test_paragraph() {
    assert_fixture("paragraph");
}

#[test]
fn test_link() {
    assert_fixture("link");
}

#[test]
fn test_image() {
    assert_fixture("image");
}

#[test]
fn test_code() {
    assert_fixture("code");
}

#[test]
fn test_code_block() {
    assert_fixture("code_block");
}

#[test]
fn test_unordered_list() {
    assert_fixture("unordered_list");
}

#[test]
fn test_ordered_list() {
    assert_fixture("ordered_list");
}

#[test]
fn test_ordered_list_with_multi_line_items() {
    assert_fixture("ordered_list_with_multi_line_items");
}

#[test]
fn test_block_quote() {
    assert_fixture("block_quote");
}

#[test]
fn test_heading() {
    assert_fixture("heading");
}

#[test]
fn test_multiple_paragraphs() {
    assert_fixture("multiple_paragraphs");
}

#[test]
fn test_kitchensink() {
    assert_fixture("kitchensink");
}

#[test]
fn test_kitchensink_with_custom_rules() {
    let (markdown, _) = fixture_pair("kitchensink");
    let rules = RstRules {
        heading_chars: "=-~^'`".to_string(),
        bullet_marker: '-',
        anonymous_links: true,
        ..RstRules::default()
    };
    let rendered = markdown_to_rst_with_rules(&markdown, &rules).unwrap();

    assert_snapshot!(rendered.trim(), @r###"
Release notes
=============

Version **2.0** brings *many* changes, see `the docs <https://docs.example.com>`__.

Install
-------

Run ``pip install tool``:

.. code:: sh

    pip install tool

    Upgrading from 1.x? Read the
    migration guide first.

#. Download
#. Unpack
   the archive

- one
- two

  - nested

----

.. image:: shot.png
    :alt: Screenshot
"###);
}

#[test]
fn test_escaping_in_markdown_text() {
    let rendered = markdown_to_rst("Use snake_case and a \\* star, or `a_b` in code.").unwrap();
    assert_eq!(
        rendered,
        "\nUse snake\\_case and a \\* star, or ``a_b`` in code.\n"
    );
}

#[test]
fn test_linked_badge_and_inline_image() {
    let markdown = "[![build](https://ci.example.com/badge.svg)](https://ci.example.com)\n\n\
                    Click ![the icon](icon.png) to start.\n";
    let rendered = markdown_to_rst(markdown).unwrap();
    assert_eq!(
        rendered,
        "\n.. image:: https://ci.example.com/badge.svg\n    :alt: build\n    :target: https://ci.example.com\n\
         \nClick |the icon| to start.\n\
         \n.. |the icon| image:: icon.png\n    :alt: the icon\n"
    );
}

#[test]
fn test_nested_block_quote_in_list() {
    let markdown = "- item\n\n  > quoted\n";
    let rendered = markdown_to_rst(markdown).unwrap();
    assert_eq!(rendered, "\n* item\n\n      quoted\n");
}

#[test]
fn test_wide_heading_underline() {
    assert_eq!(markdown_to_rst("# 日本語").unwrap(), "\n日本語\n######\n");
}

#[test]
fn test_escaped_markdown_enumerator_stays_a_paragraph() {
    let rendered = markdown_to_rst("1\\. Not a list\n\n\\- nor a bullet\n").unwrap();
    assert_eq!(rendered, "\n1\\. Not a list\n\n\\- nor a bullet\n");
}

#[test]
fn test_intraword_strong_is_closed_with_escaped_space() {
    assert_eq!(
        markdown_to_rst("Foo **bar**baz").unwrap(),
        "\nFoo **bar**\\ baz\n"
    );
}

#[test]
fn test_code_span_with_backticks() {
    assert_eq!(
        markdown_to_rst("Use `` `tick` `` here").unwrap(),
        "\nUse :literal:`\\`tick\\`` here\n"
    );
}
