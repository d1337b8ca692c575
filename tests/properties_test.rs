//! Property tests for escaping, collapse and alignment inheritance.

use proptest::prelude::*;
use storypdf::dom::parse_html;
use storypdf::markup::{
    Align, Block, escape_text, render_chapter_html, render_children, render_inline,
};

/// Text that may contain markup-significant characters.
fn raw_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just('<'),
            Just('>'),
            Just('&'),
            Just('"'),
            Just(' '),
            prop::char::range('a', 'z'),
        ],
        1..40,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

fn align_style() -> impl Strategy<Value = Option<&'static str>> {
    prop_oneof![
        Just(None),
        Just(Some("left")),
        Just(Some("center")),
        Just(Some("right")),
        Just(Some("justify")),
    ]
}

/// Markup with every tag removed; entities left as they are.
fn strip_tags(markup: &str) -> String {
    let mut out = String::new();
    let mut in_tag = false;
    for c in markup.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

proptest! {
    #[test]
    fn prop_text_is_escaped_exactly_once(text in raw_text()) {
        let source = format!("<p><b>{}</b></p>", escape_text(&text));
        let dom = parse_html(&source);
        let p = dom.find_by_tag("p").unwrap();
        let rendered = render_children(&dom, p);

        let expected = escape_text(&text);
        prop_assert_eq!(strip_tags(&rendered), expected.clone());
        prop_assert!(!strip_tags(&rendered).contains(['<', '>']));
        prop_assert_eq!(rendered, format!("<b>{}</b>", expected));
    }

    #[test]
    fn prop_rendering_is_idempotent(text in raw_text()) {
        let first: Vec<String> = render_chapter_html(&format!("<p><i>{}</i></p>", escape_text(&text)))
            .iter()
            .map(Block::to_markup)
            .collect();
        let again: Vec<String> = render_chapter_html(&first.join(""))
            .iter()
            .map(Block::to_markup)
            .collect();
        prop_assert_eq!(first, again);
    }

    #[test]
    fn prop_whitespace_only_content_yields_nothing(
        spaces in prop::collection::vec(prop_oneof![Just(" "), Just("\n"), Just("\u{a0}"), Just("\t")], 0..8),
        tag in prop_oneof![Just("p"), Just("h2"), Just("blockquote"), Just("div"), Just("ul")],
        wrapper in prop_oneof![Just("b"), Just("i"), Just("span"), Just("li")],
    ) {
        let ws = spaces.concat();
        let html = format!("<{tag}><{wrapper}>{ws}</{wrapper}>{ws}</{tag}>");
        prop_assert!(render_chapter_html(&html).is_empty());

        let dom = parse_html(&format!("<p><{wrapper}></{wrapper}></p>"));
        let node = dom.find_by_tag(wrapper).unwrap();
        prop_assert_eq!(render_inline(&dom, node), "");
    }

    #[test]
    fn prop_alignment_inherits_through_unaligned_containers(
        outer in align_style(),
        depth in 0usize..5,
        inner in align_style(),
    ) {
        let mut html = String::new();
        if let Some(a) = outer {
            html.push_str(&format!(r#"<div style="text-align: {a}">"#));
        } else {
            html.push_str("<div>");
        }
        html.push_str(&"<div>".repeat(depth));
        match inner {
            Some(a) => html.push_str(&format!(r#"<p align="{a}">x</p>"#)),
            None => html.push_str("<p>x</p>"),
        }
        html.push_str(&"</div>".repeat(depth + 1));

        let resolve = |v: Option<&str>| match v.and_then(Align::parse) {
            Some(Align::Left) | None => None,
            other => other,
        };
        let expected = resolve(inner).or(resolve(outer)).unwrap_or(Align::Left);

        let blocks = render_chapter_html(&html);
        prop_assert_eq!(blocks.len(), 1);
        prop_assert_eq!(blocks[0].align, expected);
        // At most one container: only the outer div can change alignment.
        prop_assert!(blocks[0].containers.len() <= 1);
    }
}
