//! Download pipeline tests against an in-memory story source.

use std::cell::RefCell;
use std::collections::HashMap;

use storypdf::{Config, Error, Overview, Part, Result, StorySource, download_story, write_story};
use tempfile::TempDir;

const STORY_URL: &str = "https://www.wattpad.com/story/4242-night-train";

/// Serves a fixed overview and chapter bodies, recording every request.
struct FakeSite {
    overview: Overview,
    chapters: HashMap<String, String>,
    requests: RefCell<Vec<String>>,
}

impl FakeSite {
    fn new(parts: &[(&str, &str, &str)]) -> Self {
        let overview = Overview {
            title: "Night Train".to_string(),
            parts: parts
                .iter()
                .map(|(id, title, _)| Part {
                    id: id.to_string(),
                    title: title.to_string(),
                    url: format!("https://www.wattpad.com/{id}-part"),
                })
                .collect(),
        };
        let chapters = parts
            .iter()
            .map(|(id, _, html)| (id.to_string(), html.to_string()))
            .collect();
        Self {
            overview,
            chapters,
            requests: RefCell::default(),
        }
    }
}

impl StorySource for FakeSite {
    fn fetch_overview(&self, url: &str) -> Result<Overview> {
        self.requests.borrow_mut().push(format!("overview {url}"));
        Ok(self.overview.clone())
    }

    fn fetch_part_html(&self, part_id: &str) -> Result<String> {
        self.requests.borrow_mut().push(format!("part {part_id}"));
        match self.chapters.get(part_id) {
            Some(html) if !html.trim().is_empty() => Ok(html.clone()),
            _ => Err(Error::EmptyChapter(part_id.to_string())),
        }
    }
}

// ============================================================================
// Ordering and Assembly
// ============================================================================

#[test]
fn test_chapters_follow_table_of_contents() {
    let site = FakeSite::new(&[
        ("3", "Departure Mon, Jan 1, 2024", "<p>Whistle.</p>"),
        ("1", "", "<p>Tracks.</p>"),
    ]);

    let story = download_story(&site, STORY_URL).unwrap();

    assert_eq!(story.id, "4242");
    assert_eq!(story.title, "Night Train");
    assert_eq!(
        *site.requests.borrow(),
        vec![format!("overview {STORY_URL}"), "part 3".into(), "part 1".into()]
    );
    assert_eq!(
        story.document.fragments,
        vec![
            r#"<h1 align="center">Night Train</h1>"#,
            r#"<h2 align="center">Departure</h2>"#,
            "<p>Whistle.</p>",
            "<br/>",
            r#"<h2 align="center">Part 1</h2>"#,
            "<p>Tracks.</p>",
            "<br/>",
        ]
    );
}

#[test]
fn test_default_file_name() {
    let site = FakeSite::new(&[("9", "One", "<p>x</p>")]);
    let mut story = download_story(&site, STORY_URL).unwrap();
    assert_eq!(story.default_file_name().to_str(), Some("Night Train.pdf"));

    story.title = "???".to_string();
    assert_eq!(story.default_file_name().to_str(), Some("___.pdf"));

    story.title = " ... ".to_string();
    assert_eq!(story.default_file_name().to_str(), Some("Wattpad Story 9.pdf"));
}

// ============================================================================
// Failure Policy
// ============================================================================

#[test]
fn test_missing_story_id_fails_before_any_request() {
    let site = FakeSite::new(&[("1", "One", "<p>x</p>")]);
    let err = download_story(&site, "https://www.wattpad.com/user/reader").unwrap_err();
    assert!(matches!(err, Error::MissingStoryId(_)));
    assert!(site.requests.borrow().is_empty());
}

#[test]
fn test_empty_chapter_aborts_the_run() {
    let site = FakeSite::new(&[
        ("1", "One", "<p>x</p>"),
        ("2", "Two", "   "),
        ("3", "Three", "<p>never fetched</p>"),
    ]);
    let err = download_story(&site, STORY_URL).unwrap_err();
    assert!(matches!(err, Error::EmptyChapter(ref id) if id == "2"));
    assert!(!site.requests.borrow().contains(&"part 3".to_string()));
}

// ============================================================================
// Output
// ============================================================================

#[test]
fn test_markup_is_written_before_pdf_rendering() {
    let tmp = TempDir::new().unwrap();
    let site = FakeSite::new(&[("1", "One", r#"<p align="center">Hi</p>"#)]);
    let story = download_story(&site, STORY_URL).unwrap();

    let config = Config {
        fonts_dir: tmp.path().join("no-fonts"),
        output: Some(tmp.path().join("out/story.pdf")),
        emit_markup: Some(tmp.path().join("debug/story.html")),
        ..Config::default()
    };

    let err = write_story(&story, &config).unwrap_err();
    assert!(matches!(err, Error::NoFonts(_)));

    let written = std::fs::read_to_string(tmp.path().join("debug/story.html")).unwrap();
    assert_eq!(written, story.document.to_markup());
    assert!(written.contains(r#"<p align="center">Hi</p>"#));
    assert!(!tmp.path().join("out/story.pdf").exists());
}
