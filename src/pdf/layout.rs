//! Mapping the markup vocabulary onto `genpdf` elements.

use std::collections::HashMap;

use genpdf::Alignment;
use genpdf::Element as _;
use genpdf::Margins;
use genpdf::elements::{Break, LinearLayout, OrderedList, Paragraph, UnorderedList};
use genpdf::fonts::{Font, FontFamily};
use genpdf::style::{Color, Style};

use crate::dom::{Dom, NodeData, NodeId, parse_html};
use crate::markup::Align;

const LINK_COLOR: Color = Color::Rgb(0, 0, 238);
const DIVIDER: &str = "* * *";

/// Registered font families addressable by `<font face>`, matched
/// case-insensitively.
#[derive(Default)]
pub struct FontFaces {
    families: HashMap<String, FontFamily<Font>>,
}

impl FontFaces {
    pub fn insert(&mut self, name: &str, family: FontFamily<Font>) {
        self.families.insert(name.to_ascii_lowercase(), family);
    }

    pub fn get(&self, name: &str) -> Option<FontFamily<Font>> {
        self.families.get(&name.trim().to_ascii_lowercase()).cloned()
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}

/// genpdf has no justification; justified text is set flush left.
pub fn to_alignment(align: Align) -> Alignment {
    match align {
        Align::Left | Align::Justify => Alignment::Left,
        Align::Center => Alignment::Center,
        Align::Right => Alignment::Right,
    }
}

/// Parse `#rgb`, `#rrggbb` or a basic color name.
pub fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim().to_ascii_lowercase();
    if let Some(hex) = value.strip_prefix('#') {
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        return match hex.len() {
            3 => {
                let mut digits = hex.chars().map(|c| channel(&c.to_string().repeat(2)));
                Some(Color::Rgb(digits.next()??, digits.next()??, digits.next()??))
            }
            6 => Some(Color::Rgb(
                channel(hex.get(0..2)?)?,
                channel(hex.get(2..4)?)?,
                channel(hex.get(4..6)?)?,
            )),
            _ => None,
        };
    }

    let rgb = match value.as_str() {
        "black" => (0, 0, 0),
        "white" => (255, 255, 255),
        "red" => (255, 0, 0),
        "green" => (0, 128, 0),
        "blue" => (0, 0, 255),
        "yellow" => (255, 255, 0),
        "orange" => (255, 165, 0),
        "purple" => (128, 0, 128),
        "gray" | "grey" => (128, 128, 128),
        "silver" => (192, 192, 192),
        "maroon" => (128, 0, 0),
        "navy" => (0, 0, 128),
        "teal" => (0, 128, 128),
        "pink" => (255, 192, 203),
        _ => return None,
    };
    Some(Color::Rgb(rgb.0, rgb.1, rgb.2))
}

fn scaled(size: u8, factor: f64) -> u8 {
    (f64::from(size) * factor).round().clamp(1.0, 255.0) as u8
}

fn heading_scale(level: u8) -> f64 {
    match level {
        1 => 1.6,
        2 => 1.35,
        3 => 1.2,
        _ => 1.1,
    }
}

/// Text style in effect while walking inline content.
#[derive(Clone, Copy)]
struct RunStyle {
    style: Style,
    size: u8,
}

impl RunStyle {
    fn new(size: u8) -> Self {
        Self {
            style: Style::new().with_font_size(size),
            size,
        }
    }

    fn bold(mut self) -> Self {
        self.style.set_bold();
        self
    }

    fn italic(mut self) -> Self {
        self.style.set_italic();
        self
    }

    fn sized(mut self, size: u8) -> Self {
        self.size = size;
        self.style.set_font_size(size);
        self
    }

    fn colored(mut self, color: Color) -> Self {
        self.style.set_color(color);
        self
    }

    fn family(mut self, family: FontFamily<Font>) -> Self {
        self.style.set_font_family(family);
        self
    }
}

type Line = Vec<(String, Style)>;

/// Lays out parsed markup into a vertical stack of genpdf elements.
pub struct Layouter<'a> {
    dom: Dom,
    faces: &'a FontFaces,
    base_size: u8,
}

impl<'a> Layouter<'a> {
    pub fn new(markup: &str, faces: &'a FontFaces, base_size: u8) -> Self {
        Self {
            dom: parse_html(markup),
            faces,
            base_size,
        }
    }

    pub fn layout(&self) -> LinearLayout {
        let mut out = LinearLayout::vertical();
        let body = self.dom.body();
        for child in self.dom.children(body) {
            self.block(child, Align::Left, &mut out);
        }
        out
    }

    fn block(&self, node: NodeId, align: Align, out: &mut LinearLayout) {
        let dom = &self.dom;
        let Some(data) = dom.get(node).map(|n| &n.data) else {
            return;
        };
        let tag = match data {
            NodeData::Element { name, .. } => name.local.as_ref(),
            NodeData::Text(text) => {
                if !text.trim().is_empty() {
                    let lines = self.lines_of(node, RunStyle::new(self.base_size));
                    self.push_lines(lines, align, out);
                }
                return;
            }
            _ => return,
        };

        let own_align = dom
            .attr(node, "align")
            .and_then(Align::parse)
            .unwrap_or(align);
        let base = RunStyle::new(self.base_size);

        match tag {
            "div" => {
                for child in dom.children(node) {
                    self.block(child, own_align, out);
                }
            }
            "h1" | "h2" | "h3" | "h4" => {
                let level = tag.as_bytes()[1] - b'0';
                let style = base.sized(scaled(self.base_size, heading_scale(level))).bold();
                out.push(Break::new(0.5));
                let lines = self.children_lines(node, style);
                self.push_lines(lines, own_align, out);
                out.push(Break::new(0.5));
            }
            "blockquote" => {
                let mut quote = LinearLayout::vertical();
                let lines = self.children_lines(node, base.italic());
                self.push_lines(lines, own_align, &mut quote);
                out.push(quote.padded(Margins::trbl(0, 0, 0, 10)));
                out.push(Break::new(0.5));
            }
            "ul" => {
                let mut list = UnorderedList::new();
                for item in self.list_items(node, own_align) {
                    list.push(item);
                }
                out.push(list);
                out.push(Break::new(0.5));
            }
            "ol" => {
                let mut list = OrderedList::new();
                for item in self.list_items(node, own_align) {
                    list.push(item);
                }
                out.push(list);
                out.push(Break::new(0.5));
            }
            "hr" => {
                out.push(Paragraph::new(DIVIDER).aligned(Alignment::Center));
                out.push(Break::new(0.5));
            }
            "br" => out.push(Break::new(1)),
            _ => {
                let lines = self.children_lines(node, base);
                self.push_lines(lines, own_align, out);
                out.push(Break::new(0.5));
            }
        }
    }

    fn list_items(&self, list: NodeId, align: Align) -> Vec<LinearLayout> {
        self.list_entries(list, align)
            .into_iter()
            .map(|(lines, align)| {
                let mut item = LinearLayout::vertical();
                self.push_lines(lines, align, &mut item);
                item
            })
            .collect()
    }

    /// Lines of each `<li>` with its alignment; an item's own `align` beats
    /// the list's.
    fn list_entries(&self, list: NodeId, align: Align) -> Vec<(Vec<Line>, Align)> {
        self.dom
            .children(list)
            .filter(|&c| self.dom.tag(c) == Some("li"))
            .map(|li| {
                let align = self
                    .dom
                    .attr(li, "align")
                    .and_then(Align::parse)
                    .unwrap_or(align);
                (self.children_lines(li, RunStyle::new(self.base_size)), align)
            })
            .collect()
    }

    fn push_lines(&self, lines: Vec<Line>, align: Align, out: &mut LinearLayout) {
        let alignment = to_alignment(align);
        for line in lines {
            if line.is_empty() {
                out.push(Break::new(1));
                continue;
            }
            let mut paragraph = Paragraph::default();
            for (text, style) in line {
                paragraph.push_styled(text, style);
            }
            paragraph.set_alignment(alignment);
            out.push(paragraph);
        }
    }

    fn lines_of(&self, node: NodeId, style: RunStyle) -> Vec<Line> {
        let mut lines = vec![Line::new()];
        self.inline(node, style, &mut lines);
        finish_lines(lines)
    }

    fn children_lines(&self, node: NodeId, style: RunStyle) -> Vec<Line> {
        let mut lines = vec![Line::new()];
        for child in self.dom.children(node) {
            self.inline(child, style, &mut lines);
        }
        finish_lines(lines)
    }

    fn inline(&self, node: NodeId, style: RunStyle, lines: &mut Vec<Line>) {
        let dom = &self.dom;
        let Some(data) = dom.get(node).map(|n| &n.data) else {
            return;
        };
        let tag = match data {
            NodeData::Text(text) => {
                let Some(line) = lines.last_mut() else {
                    return;
                };
                let mut text = collapse_whitespace(text);
                if line.last().is_some_and(|(prev, _)| prev.ends_with(' ')) {
                    text = text.trim_start_matches(' ').to_string();
                }
                if !text.is_empty() {
                    line.push((text, style.style));
                }
                return;
            }
            NodeData::Element { name, .. } => name.local.as_ref(),
            _ => return,
        };

        let style = match tag {
            "br" | "hr" => {
                lines.push(Line::new());
                return;
            }
            "b" | "strong" => style.bold(),
            "i" | "em" => style.italic(),
            "sup" | "sub" => style.sized(scaled(style.size, 0.7)),
            "a" => style.colored(LINK_COLOR),
            "font" => {
                let mut style = style;
                if let Some(family) = dom.attr(node, "face").and_then(|f| self.faces.get(f)) {
                    style = style.family(family);
                }
                if let Some(color) = dom.attr(node, "color").and_then(parse_color) {
                    style = style.colored(color);
                }
                style
            }
            _ => style,
        };

        for child in dom.children(node) {
            self.inline(child, style, lines);
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for c in text.chars() {
        if c.is_whitespace() && c != '\u{a0}' {
            pending_space = true;
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(c);
    }
    if pending_space {
        out.push(' ');
    }
    out
}

/// Trim each line's outer whitespace and drop leading and trailing empty
/// lines. Interior empty lines stay as vertical space.
fn finish_lines(lines: Vec<Line>) -> Vec<Line> {
    let mut lines: Vec<Line> = lines.into_iter().map(trim_line).collect();
    while lines.last().is_some_and(Vec::is_empty) {
        lines.pop();
    }
    let leading = lines.iter().take_while(|l| l.is_empty()).count();
    lines.drain(..leading);
    lines
}

fn trim_line(mut line: Line) -> Line {
    if let Some((text, _)) = line.first_mut() {
        *text = text.trim_start().to_string();
    }
    if let Some((text, _)) = line.last_mut() {
        *text = text.trim_end().to_string();
    }
    line.retain(|(text, _)| !text.is_empty());
    line
}
