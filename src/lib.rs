//! # storypdf
//!
//! Download a serialized story from Wattpad and typeset it into one PDF.
//!
//! The conversion runs in stages:
//!
//! - [`source`] fetches the overview page and each part's text
//! - [`markup`] turns chapter HTML into a small, fixed markup vocabulary
//!   (paragraphs, headings, lists, alignment containers, formatting tags)
//! - [`pdf`] lays that markup out with `genpdf`
//!
//! ## Quick Start
//!
//! ```no_run
//! use storypdf::{Config, convert};
//!
//! let config = Config::default();
//! let (story, path) = convert(&config, "https://www.wattpad.com/story/123456-a-story").unwrap();
//! println!("{} -> {}", story.title, path.display());
//! ```
//!
//! ## Rendering chapter HTML
//!
//! ```
//! use storypdf::markup::render_chapter_html;
//!
//! let blocks = render_chapter_html("<p>A &amp; B</p><p></p>");
//! assert_eq!(blocks.len(), 1);
//! assert_eq!(blocks[0].to_markup(), "<p>A &amp; B</p>");
//! ```

pub mod config;
pub mod dom;
pub mod error;
pub mod markup;
pub mod pdf;
pub mod source;
pub mod story;
pub mod util;

pub use config::Config;
pub use error::{Error, Result};
pub use markup::{Block, Chapter, Document, assemble, render_chapter_html};
pub use source::{Overview, Part, StoryClient, StorySource};
pub use story::{Story, convert, download_story, write_story};
