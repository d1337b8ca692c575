//! Whole-story assembly.

use super::align::Align;
use super::block::Block;
use super::escape::escape_text;

/// A rendered chapter ready for assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    pub title: String,
    pub blocks: Vec<Block>,
}

impl Chapter {
    pub fn new(title: impl Into<String>, blocks: Vec<Block>) -> Self {
        Self {
            title: title.into(),
            blocks,
        }
    }
}

/// Ordered markup fragments for the whole story.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    pub fragments: Vec<String>,
}

impl Document {
    /// Fragments joined with newlines.
    pub fn to_markup(&self) -> String {
        self.fragments.join("\n")
    }
}

fn centered_heading(level: u8, text: &str) -> String {
    format!(
        "<h{level}{}>{}</h{level}>",
        Align::Center.attr(),
        escape_text(text)
    )
}

/// Story title, then each chapter's heading, blocks and a trailing break, in
/// the order given.
pub fn assemble(story_title: &str, chapters: &[Chapter]) -> Document {
    let mut fragments = vec![centered_heading(1, story_title)];

    for chapter in chapters {
        if !chapter.title.trim().is_empty() {
            fragments.push(centered_heading(2, chapter.title.trim()));
        }
        fragments.extend(chapter.blocks.iter().map(Block::to_markup));
        fragments.push("<br/>".to_string());
    }

    Document {
        title: story_title.to_string(),
        fragments,
    }
}
