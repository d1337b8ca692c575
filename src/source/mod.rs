//! Fetching story pages and chapter text.
//!
//! [`StorySource`] is the seam between the network and the conversion
//! pipeline; [`StoryClient`] is the blocking HTTP implementation.

mod overview;

use serde::Deserialize;
use tracing::{debug, info};
use ureq::Agent;

pub use overview::{Overview, Part, join_url, parse_overview};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::markup::{Chapter, render_chapter_html};
use crate::util::{charset_from_content_type, clean_part_title, decode_text};

/// Where overview pages and chapter bodies come from.
pub trait StorySource {
    /// Title and table of contents for the story at `url`.
    fn fetch_overview(&self, url: &str) -> Result<Overview>;

    /// Raw chapter HTML for one part. Never blank.
    fn fetch_part_html(&self, part_id: &str) -> Result<String>;

    /// Fetch and render one part into a chapter.
    fn fetch_chapter(&self, part: &Part) -> Result<Chapter> {
        let html = self.fetch_part_html(&part.id)?;
        let title = if part.title.trim().is_empty() {
            format!("Part {}", part.id)
        } else {
            clean_part_title(&part.title)
        };
        let blocks = render_chapter_html(&html);
        debug!(part = %part.id, blocks = blocks.len(), "Rendered chapter");
        Ok(Chapter::new(title, blocks))
    }
}

#[derive(Deserialize)]
struct StoryText {
    #[serde(default)]
    text: String,
}

/// Chapter HTML from a storytext response: the `text` field of a JSON
/// payload, otherwise the decoded body as is.
pub(crate) fn chapter_body(content_type: &str, bytes: &[u8], part_id: &str) -> Result<String> {
    let text = decode_text(bytes, charset_from_content_type(content_type));
    let body = if content_type.contains("json") {
        serde_json::from_str::<StoryText>(&text)?.text
    } else {
        text.into_owned()
    };

    if body.trim().is_empty() {
        return Err(Error::EmptyChapter(part_id.to_string()));
    }
    Ok(body)
}

/// Blocking client for the story site.
pub struct StoryClient {
    agent: Agent,
    base_url: String,
    user_agent: String,
}

struct Fetched {
    status: u16,
    content_type: String,
    body: Vec<u8>,
}

impl StoryClient {
    pub fn new(config: &Config) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            user_agent: config.user_agent.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn storytext_url(&self) -> String {
        format!("{}/apiv2/storytext", self.base_url)
    }

    fn get(&self, url: &str, query: Option<(&str, &str)>) -> Result<Fetched> {
        let mut request = self.agent.get(url).header("User-Agent", &self.user_agent);
        if let Some((key, value)) = query {
            request = request.query(key, value);
        }

        debug!(url, "GET");
        let response = request.call()?;

        let status = response.status().as_u16();
        if status >= 400 {
            return Err(Error::HttpStatus {
                status,
                url: url.to_string(),
            });
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let body = response.into_body().read_to_vec()?;

        Ok(Fetched {
            status,
            content_type,
            body,
        })
    }
}

impl StorySource for StoryClient {
    fn fetch_overview(&self, url: &str) -> Result<Overview> {
        info!(url, "Fetching story overview");
        let fetched = self.get(url, None)?;
        let html = decode_text(
            &fetched.body,
            charset_from_content_type(&fetched.content_type),
        );
        let overview = parse_overview(&html, url)?;
        info!(
            title = %overview.title,
            parts = overview.parts.len(),
            "Found story"
        );
        Ok(overview)
    }

    fn fetch_part_html(&self, part_id: &str) -> Result<String> {
        let url = self.storytext_url();
        let fetched = self.get(&url, Some(("id", part_id)))?;
        let body = chapter_body(&fetched.content_type, &fetched.body, part_id)?;

        info!(
            part = part_id,
            status = fetched.status,
            bytes = body.len(),
            "Fetched chapter"
        );
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    struct Canned {
        html: &'static str,
        requested: RefCell<Vec<String>>,
    }

    impl StorySource for Canned {
        fn fetch_overview(&self, _url: &str) -> Result<Overview> {
            Err(Error::NoChapters)
        }

        fn fetch_part_html(&self, part_id: &str) -> Result<String> {
            self.requested.borrow_mut().push(part_id.to_string());
            Ok(self.html.to_string())
        }
    }

    fn part(id: &str, title: &str) -> Part {
        Part {
            id: id.into(),
            title: title.into(),
            url: format!("https://www.wattpad.com/{id}"),
        }
    }

    #[test]
    fn test_fetch_chapter_title_fallback() {
        let source = Canned {
            html: "<p>Body</p>",
            requested: RefCell::default(),
        };
        let chapter = source.fetch_chapter(&part("77", "  ")).unwrap();
        assert_eq!(chapter.title, "Part 77");
        assert_eq!(chapter.blocks.len(), 1);
        assert_eq!(*source.requested.borrow(), vec!["77"]);
    }

    #[test]
    fn test_fetch_chapter_cleans_title() {
        let source = Canned {
            html: "<p>Body</p>",
            requested: RefCell::default(),
        };
        let chapter = source
            .fetch_chapter(&part("1", "One Tue, Mar 5, 2024"))
            .unwrap();
        assert_eq!(chapter.title, "One");
    }

    #[test]
    fn test_chapter_body_reads_json_text() {
        let body = chapter_body(
            "application/json; charset=utf-8",
            br#"{"text": "<p>caf\u00e9</p>", "id": 5}"#,
            "5",
        )
        .unwrap();
        assert_eq!(body, "<p>caf\u{e9}</p>");
    }

    #[test]
    fn test_chapter_body_passes_html_through() {
        let body = chapter_body("text/html; charset=utf-8", b"<p>One</p>\n", "5").unwrap();
        assert_eq!(body, "<p>One</p>\n");
    }

    #[test]
    fn test_chapter_body_blank_is_an_error() {
        assert!(matches!(
            chapter_body("application/json", br#"{"id": 5}"#, "5"),
            Err(Error::EmptyChapter(id)) if id == "5"
        ));
        assert!(matches!(
            chapter_body("text/html", b" \n\t ", "9"),
            Err(Error::EmptyChapter(id)) if id == "9"
        ));
        assert!(matches!(
            chapter_body("application/json", br#"{"text": "   "}"#, "3"),
            Err(Error::EmptyChapter(_))
        ));
    }

    #[test]
    fn test_chapter_body_rejects_malformed_json() {
        assert!(matches!(
            chapter_body("application/json", b"<html>oops</html>", "5"),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_client_trims_base_url() {
        let config = Config {
            base_url: "http://localhost:9/".into(),
            ..Config::default()
        };
        let client = StoryClient::new(&config);
        assert_eq!(client.base_url(), "http://localhost:9");
        assert_eq!(client.storytext_url(), "http://localhost:9/apiv2/storytext");
    }
}
