//! Property tests for the RST renderer.

use proptest::prelude::*;
use rst_babel::ir::nodes::Node;
use rst_babel::{markdown_to_rst, render, RstRules};
use unicode_width::UnicodeWidthStr;

fn word() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

fn line() -> impl Strategy<Value = String> {
    prop::collection::vec(word(), 1..5).prop_map(|words| words.join(" "))
}

fn inline() -> impl Strategy<Value = Node> {
    prop_oneof![
        line().prop_map(Node::text),
        line().prop_map(|t| Node::strong(vec![Node::text(t)])),
        line().prop_map(|t| Node::emphasis(vec![Node::text(t)])),
        word().prop_map(Node::code),
        (word(), line()).prop_map(|(host, label)| Node::link(
            format!("https://{host}.example.com"),
            vec![Node::text(label)]
        )),
        (word(), word()).prop_map(|(file, alt)| Node::image(format!("{file}.png"), alt)),
    ]
}

fn block() -> impl Strategy<Value = Node> {
    let paragraph = prop::collection::vec(inline(), 1..4).prop_map(Node::paragraph);
    let leaf = prop_oneof![
        paragraph,
        (1u8..=6, line()).prop_map(|(level, t)| Node::heading(level, vec![Node::text(t)])),
        (prop::option::of(word()), line()).prop_map(|(lang, body)| Node::code_block(
            lang.as_deref(),
            format!("{body}\n")
        )),
    ];
    leaf.prop_recursive(3, 24, 4, move |inner| {
        prop_oneof![
            (any::<bool>(), prop::collection::vec(inner.clone(), 1..3)).prop_map(
                |(ordered, children)| Node::list(ordered, vec![Node::item(children)])
            ),
            prop::collection::vec(inner, 1..3).prop_map(Node::block_quote),
        ]
    })
}

proptest! {
    #[test]
    fn heading_underline_matches_title(level in 1u8..=6, title in "[A-Za-z0-9見出し日本]([A-Za-z0-9 見出し日本]{0,30}[A-Za-z0-9見出し日本])?") {
        let doc = Node::document(vec![Node::heading(level, vec![Node::text(title.clone())])]);
        let rendered = render(&doc).unwrap();

        let underline_char = RstRules::default().heading_char(level).unwrap();
        let underline: String = std::iter::repeat(underline_char).take(title.width()).collect();
        prop_assert_eq!(rendered, format!("\n{title}\n{underline}\n"));
    }

    #[test]
    fn rendering_is_deterministic(blocks in prop::collection::vec(block(), 0..6)) {
        let doc = Node::document(blocks);
        let first = render(&doc).unwrap();
        let second = render(&doc).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn output_has_no_trailing_whitespace(blocks in prop::collection::vec(block(), 1..6)) {
        let rendered = render(&Node::document(blocks)).unwrap();
        for line in rendered.lines() {
            prop_assert_eq!(line, line.trim_end());
        }
        prop_assert!(rendered.starts_with('\n'));
        prop_assert!(rendered.ends_with('\n'));
        prop_assert!(!rendered.contains("\n\n\n"));
    }

    #[test]
    fn top_level_paragraphs_are_separated_by_one_blank_line(lines in prop::collection::vec(line(), 1..8)) {
        let doc = Node::document(
            lines.iter().map(|l| Node::paragraph(vec![Node::text(l.clone())])).collect(),
        );
        let expected = format!("\n{}\n", lines.join("\n\n"));
        prop_assert_eq!(render(&doc).unwrap(), expected);
    }

    #[test]
    fn lazy_and_indented_continuations_render_alike(items in prop::collection::vec((line(), line()), 1..5)) {
        let mut lazy = String::from("Items:\n");
        let mut indented = String::from("Items:\n");
        for (index, (first, second)) in items.iter().enumerate() {
            let number = index + 1;
            lazy.push_str(&format!("{number}. {first}\n{second}\n"));
            indented.push_str(&format!("{number}. {first}\n   {second}\n"));
        }
        prop_assert_eq!(markdown_to_rst(&lazy).unwrap(), markdown_to_rst(&indented).unwrap());
    }
}
