//! Conversion of chapter HTML into the restricted markup vocabulary the PDF
//! renderer consumes.
//!
//! The pipeline is bottom-up: [`render_inline`] turns formatting into a fixed
//! nesting of wrapper tags, [`render_blocks`] groups inline content into
//! aligned blocks, and [`assemble`] concatenates chapters into a [`Document`].
//!
//! ```
//! use storypdf::markup::{Chapter, assemble, render_chapter_html};
//!
//! let blocks = render_chapter_html(r#"<div align="center"><p>Hi <b>there</b></p></div>"#);
//! let doc = assemble("Story", &[Chapter::new("One", blocks)]);
//! assert!(doc.to_markup().contains(r#"<p align="center">Hi <b>there</b></p>"#));
//! ```

mod align;
mod block;
mod document;
mod escape;
mod inline;
pub mod style;

pub use align::{Align, explicit_alignment, resolve_alignment};
pub use block::{Block, BlockKind, ListKind, render_blocks, render_chapter_html};
pub use document::{Chapter, Document, assemble};
pub use escape::{YI_FONT_FACE, escape_attr, escape_text, is_yi, render_text, wrap_yi_runs};
pub use inline::{render_children, render_inline};
