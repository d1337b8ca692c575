//! HTML parsing into an arena tree.
//!
//! Both the overview page and every chapter body go through [`parse_html`];
//! the PDF layer re-parses the assembled markup with it as well.

mod arena;
mod select;
mod tree_sink;

pub use arena::{Attribute, Children, Dom, Node, NodeData, NodeId};
pub use select::{ElementRef, Selector, StorySelectors};
pub use tree_sink::DomSink;

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

/// Parse a document or fragment. Fragments end up under `<body>`.
pub fn parse_html(html: &str) -> Dom {
    parse_document(DomSink::new(), ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes())
        .into_dom()
}
