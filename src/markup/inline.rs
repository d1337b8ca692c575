//! Character-level rendering: formatting tags around escaped text.

use super::escape::{escape_attr, render_text};
use super::style;
use crate::dom::{Dom, NodeData, NodeId};

/// Render a node and its descendants as inline markup.
///
/// Children are rendered first; wrappers are then applied in a fixed order
/// regardless of how the source nested them: bold innermost, then italic,
/// underline, sup/sub, link, font face and font color outermost. A node with
/// no rendered content collapses to `""` (images excepted).
pub fn render_inline(dom: &Dom, node: NodeId) -> String {
    let Some(data) = dom.get(node).map(|n| &n.data) else {
        return String::new();
    };

    let tag = match data {
        NodeData::Text(text) => return render_text(text),
        NodeData::Element { name, .. } => name.local.as_ref(),
        NodeData::Document | NodeData::Comment(_) | NodeData::Doctype(_) => {
            return String::new();
        }
    };

    match tag {
        "br" => return "<br/>".to_string(),
        "hr" => return "<hr/>".to_string(),
        _ => {}
    }

    let inner = render_children(dom, node);
    if inner.is_empty() && tag != "img" {
        return inner;
    }

    apply_wrappers(dom, node, tag, inner)
}

/// Concatenated inline rendering of every child of `node`.
pub fn render_children(dom: &Dom, node: NodeId) -> String {
    dom.children(node)
        .map(|child| render_inline(dom, child))
        .collect()
}

fn wrap(content: String, tag: &str) -> String {
    format!("<{tag}>{content}</{tag}>")
}

fn class_contains(dom: &Dom, node: NodeId, needle: &str) -> bool {
    dom.classes(node)
        .iter()
        .any(|c| c.to_ascii_lowercase().contains(needle))
}

fn apply_wrappers(dom: &Dom, node: NodeId, tag: &str, mut inner: String) -> String {
    let style_attr = dom.attr(node, "style").unwrap_or_default();

    if matches!(tag, "b" | "strong")
        || style::is_bold(style_attr)
        || class_contains(dom, node, "bold")
    {
        inner = wrap(inner, "b");
    }

    if matches!(tag, "i" | "em")
        || style::is_italic(style_attr)
        || class_contains(dom, node, "italic")
    {
        inner = wrap(inner, "i");
    }

    if tag == "u" || style::is_underline(style_attr) || class_contains(dom, node, "underline") {
        inner = wrap(inner, "u");
    }

    if matches!(tag, "sup" | "sub") {
        inner = wrap(inner, tag);
    }

    if tag == "a"
        && let Some(href) = dom.non_empty_attr(node, "href")
    {
        inner = format!("<a href=\"{}\">{inner}</a>", escape_attr(href));
    }

    if let Some(face) = dom
        .non_empty_attr(node, "face")
        .or_else(|| dom.non_empty_attr(node, "data-font"))
    {
        inner = format!("<font face=\"{}\">{inner}</font>", escape_attr(face));
    }

    if tag == "font"
        && let Some(color) = dom.non_empty_attr(node, "color")
    {
        inner = format!("<font color=\"{}\">{inner}</font>", escape_attr(color));
    }

    inner
}
