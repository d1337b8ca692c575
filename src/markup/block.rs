//! Block-level rendering: paragraphs, headings, quotes, lists, dividers.

use std::fmt::Write;

use super::align::{Align, resolve_alignment};
use super::inline::{render_children, render_inline};
use crate::dom::{Dom, NodeData, NodeId, parse_html};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Ordered,
    Unordered,
}

impl ListKind {
    fn tag(self) -> &'static str {
        match self {
            Self::Ordered => "ol",
            Self::Unordered => "ul",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Paragraph,
    /// Heading level, 1 through 4.
    Heading(u8),
    Quote,
    List(ListKind),
    Divider,
}

/// One rendered unit of output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub align: Align,
    /// Inline markup; for lists, the concatenated `<li>` items.
    pub content: String,
    /// Alignment containers around the block, innermost first.
    pub containers: Vec<Align>,
}

impl Block {
    pub fn new(kind: BlockKind, align: Align, content: impl Into<String>) -> Self {
        Self {
            kind,
            align,
            content: content.into(),
            containers: Vec::new(),
        }
    }

    pub fn divider() -> Self {
        Self::new(BlockKind::Divider, Align::Left, "")
    }

    /// Wrap the block in one more `<div align>` container.
    pub fn contained(mut self, align: Align) -> Self {
        self.containers.push(align);
        self
    }

    /// The markup fragment handed to the renderer.
    pub fn to_markup(&self) -> String {
        let attr = self.align.attr();
        let mut out = match self.kind {
            BlockKind::Paragraph => format!("<p{attr}>{}</p>", self.content),
            BlockKind::Heading(level) => format!("<h{level}{attr}>{}</h{level}>", self.content),
            BlockKind::Quote => format!("<blockquote{attr}>{}</blockquote>", self.content),
            BlockKind::List(kind) => {
                let tag = kind.tag();
                format!("<{tag}>{}</{tag}>", self.content)
            }
            BlockKind::Divider => "<hr/>".to_string(),
        };
        for align in &self.containers {
            out = format!("<div align=\"{align}\">{out}</div>");
        }
        out
    }
}

fn heading_level(tag: &str) -> Option<u8> {
    match tag {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        _ => None,
    }
}

/// Convert a node into zero or more blocks under the `inherited` alignment.
pub fn render_blocks(dom: &Dom, node: NodeId, inherited: Align) -> Vec<Block> {
    let Some(data) = dom.get(node).map(|n| &n.data) else {
        return Vec::new();
    };

    let tag = match data {
        NodeData::Text(_) => {
            let content = render_inline(dom, node);
            let content = content.trim();
            if content.is_empty() {
                return Vec::new();
            }
            return vec![Block::new(BlockKind::Paragraph, inherited, content)];
        }
        NodeData::Element { name, .. } => name.local.as_ref(),
        NodeData::Document | NodeData::Comment(_) | NodeData::Doctype(_) => {
            return Vec::new();
        }
    };

    let align = resolve_alignment(dom, node, inherited);

    match tag {
        "div" | "main" | "body" => render_container(dom, node, align, inherited),
        "p" | "section" | "article" => leaf_block(dom, node, BlockKind::Paragraph, align),
        "blockquote" => leaf_block(dom, node, BlockKind::Quote, align),
        "ul" => render_list(dom, node, ListKind::Unordered, align),
        "ol" => render_list(dom, node, ListKind::Ordered, align),
        "hr" => vec![Block::divider()],
        other => match heading_level(other) {
            Some(level) => leaf_block(dom, node, BlockKind::Heading(level), align),
            None => leaf_block(dom, node, BlockKind::Paragraph, align),
        },
    }
}

fn render_container(dom: &Dom, node: NodeId, align: Align, inherited: Align) -> Vec<Block> {
    let blocks: Vec<Block> = dom
        .children(node)
        .flat_map(|child| render_blocks(dom, child, align))
        .collect();

    if align == inherited {
        return blocks;
    }
    blocks.into_iter().map(|b| b.contained(align)).collect()
}

/// Whether any text below `node` is more than whitespace.
fn has_visible_text(dom: &Dom, node: NodeId) -> bool {
    dom.descendants(node)
        .into_iter()
        .any(|d| dom.text(d).is_some_and(|t| !t.trim().is_empty()))
}

fn leaf_block(dom: &Dom, node: NodeId, kind: BlockKind, align: Align) -> Vec<Block> {
    if !has_visible_text(dom, node) {
        return Vec::new();
    }
    let content = render_children(dom, node);
    let content = content.trim();
    if content.is_empty() {
        return Vec::new();
    }
    vec![Block::new(kind, align, content)]
}

fn render_list(dom: &Dom, node: NodeId, kind: ListKind, align: Align) -> Vec<Block> {
    let mut items = String::new();
    for li in dom
        .children(node)
        .filter(|&c| dom.tag(c) == Some("li") && has_visible_text(dom, c))
    {
        let item = render_children(dom, li);
        let item = item.trim();
        if !item.is_empty() {
            let _ = write!(items, "<li>{item}</li>");
        }
    }

    if items.is_empty() {
        return Vec::new();
    }

    let block = Block::new(BlockKind::List(kind), align, items);
    if align == Align::Left {
        vec![block]
    } else {
        vec![block.contained(align)]
    }
}

/// Render a chapter body: every top-level node under `<body>`, starting from
/// left alignment.
pub fn render_chapter_html(html: &str) -> Vec<Block> {
    let dom = parse_html(html);
    let body = dom.body();
    dom.children(body)
        .flat_map(|child| render_blocks(&dom, child, Align::Left))
        .collect()
}
