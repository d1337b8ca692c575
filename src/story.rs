//! The download pipeline: overview, chapters, assembly, output.

use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::markup::{Document, assemble};
use crate::pdf::render_pdf;
use crate::source::{Part, StoryClient, StorySource};
use crate::util::{extract_story_id, sanitize_filename};

/// A fully fetched and assembled story.
#[derive(Debug, Clone)]
pub struct Story {
    pub id: String,
    pub title: String,
    pub parts: Vec<Part>,
    pub document: Document,
}

impl Story {
    /// `"<sanitized title>.pdf"`, falling back to the first part's id when the
    /// title has nothing usable.
    pub fn default_file_name(&self) -> PathBuf {
        let fallback = match self.parts.first() {
            Some(part) => format!("Wattpad Story {}", part.id),
            None => "Wattpad Story".to_string(),
        };
        PathBuf::from(format!("{}.pdf", sanitize_filename(&self.title, &fallback)))
    }
}

/// Fetch every part of the story at `url` in table-of-contents order and
/// assemble them. The first failure aborts the whole download.
pub fn download_story<S: StorySource + ?Sized>(source: &S, url: &str) -> Result<Story> {
    let id = extract_story_id(url)?;
    let overview = source.fetch_overview(url)?;

    let chapters = overview
        .parts
        .iter()
        .map(|part| source.fetch_chapter(part))
        .collect::<Result<Vec<_>>>()?;

    let document = assemble(&overview.title, &chapters);
    info!(
        story = %id,
        chapters = chapters.len(),
        fragments = document.fragments.len(),
        "Assembled story"
    );

    Ok(Story {
        id,
        title: overview.title,
        parts: overview.parts,
        document,
    })
}

/// Write the optional markup dump and the PDF. Returns the PDF path.
pub fn write_story(story: &Story, config: &Config) -> Result<PathBuf> {
    if let Some(path) = &config.emit_markup {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, story.document.to_markup())?;
        info!(path = %path.display(), "Wrote markup");
    }

    let output = config
        .output
        .clone()
        .unwrap_or_else(|| story.default_file_name());
    render_pdf(&story.document, &config.fonts_dir, config.font_size, &output)?;
    Ok(output)
}

/// Download the story at `url` over HTTP and write it out.
pub fn convert(config: &Config, url: &str) -> Result<(Story, PathBuf)> {
    let client = StoryClient::new(config);
    let story = download_story(&client, url)?;
    let output = write_story(&story, config)?;
    Ok((story, output))
}
