//! Horizontal alignment of blocks.

use std::fmt;

use super::style;
use crate::dom::{Dom, NodeId};

/// One of the four alignments the renderer understands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl Align {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "left" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" => Some(Self::Right),
            "justify" => Some(Self::Justify),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Justify => "justify",
        }
    }

    /// Attribute text for a tag: empty for `left`, ` align="…"` otherwise.
    pub fn attr(self) -> String {
        match self {
            Self::Left => String::new(),
            other => format!(" align=\"{}\"", other.as_str()),
        }
    }
}

impl fmt::Display for Align {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alignment stated on the node itself: `text-align` style, then the legacy
/// `align` attribute, then class-name hints.
pub fn explicit_alignment(dom: &Dom, node: NodeId) -> Option<Align> {
    if let Some(align) = dom.attr(node, "style").and_then(|s| {
        let decls = style::declarations(s);
        style::values(&decls, "text-align").find_map(Align::parse)
    }) {
        return Some(align);
    }

    if let Some(align) = dom.attr(node, "align").and_then(Align::parse) {
        return Some(align);
    }

    dom.classes(node).iter().find_map(|class| {
        let class = class.to_ascii_lowercase();
        if class.contains("center") {
            Some(Align::Center)
        } else if class.contains("right") {
            Some(Align::Right)
        } else if class.contains("justify") {
            Some(Align::Justify)
        } else {
            None
        }
    })
}

/// Alignment of `node` given its ancestors' resolved alignment.
///
/// An explicit `left` cannot be told apart from no alignment at all, so it
/// yields `inherited` as well.
pub fn resolve_alignment(dom: &Dom, node: NodeId, inherited: Align) -> Align {
    match explicit_alignment(dom, node) {
        Some(Align::Left) | None => inherited,
        Some(align) => align,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    fn first(html: &str, tag: &str) -> (Dom, NodeId) {
        let dom = parse_html(html);
        let id = dom.find_by_tag(tag).unwrap();
        (dom, id)
    }

    #[test]
    fn test_style_beats_attribute_and_class() {
        let (dom, p) = first(
            r#"<p style="color:red; TEXT-ALIGN: Right" align="center" class="justify">x</p>"#,
            "p",
        );
        assert_eq!(resolve_alignment(&dom, p, Align::Left), Align::Right);
    }

    #[test]
    fn test_unrecognized_style_falls_through_to_attribute() {
        let (dom, p) = first(r#"<p style="text-align: start" align="CENTER">x</p>"#, "p");
        assert_eq!(resolve_alignment(&dom, p, Align::Left), Align::Center);
    }

    #[test]
    fn test_first_recognized_style_value_wins() {
        let (dom, p) = first(
            r#"<p style="text-align: start; text-align: center" align="right">x</p>"#,
            "p",
        );
        assert_eq!(explicit_alignment(&dom, p), Some(Align::Center));

        let (dom, p) = first(
            r#"<p style="/* editor */ text-align: justify" align="right">x</p>"#,
            "p",
        );
        assert_eq!(explicit_alignment(&dom, p), Some(Align::Justify));
    }

    #[test]
    fn test_class_priority_within_token() {
        let (dom, p) = first(r#"<p class="note right-center">x</p>"#, "p");
        assert_eq!(explicit_alignment(&dom, p), Some(Align::Center));

        let (dom, p) = first(r#"<p class="pull-right text-center">x</p>"#, "p");
        assert_eq!(explicit_alignment(&dom, p), Some(Align::Right));

        let (dom, p) = first(r#"<p class="Justify-Text">x</p>"#, "p");
        assert_eq!(explicit_alignment(&dom, p), Some(Align::Justify));
    }

    #[test]
    fn test_inherits_when_unset() {
        let (dom, p) = first("<p>x</p>", "p");
        assert_eq!(explicit_alignment(&dom, p), None);
        assert_eq!(resolve_alignment(&dom, p, Align::Justify), Align::Justify);
    }

    #[test]
    fn test_explicit_left_is_treated_as_unset() {
        let (dom, p) = first(r#"<p style="text-align:left">x</p>"#, "p");
        assert_eq!(explicit_alignment(&dom, p), Some(Align::Left));
        assert_eq!(resolve_alignment(&dom, p, Align::Center), Align::Center);
    }

    #[test]
    fn test_attr_rendering() {
        assert_eq!(Align::Left.attr(), "");
        assert_eq!(Align::Justify.attr(), r#" align="justify""#);
        assert_eq!(Align::parse(" Center "), Some(Align::Center));
        assert_eq!(Align::parse("middle"), None);
    }
}
