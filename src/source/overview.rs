//! Scraping the story landing page: title and table of contents.

use ureq::http::Uri;

use crate::dom::{Selector, parse_html};
use crate::error::{Error, Result};
use crate::util::{clean_part_title, extract_story_id, strip_site_suffix};

const PARTS_SELECTOR: &str = r#"ul[aria-label="story-parts"] a[href]"#;

/// One entry of the table of contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub id: String,
    pub title: String,
    pub url: String,
}

/// Story title plus its parts in table-of-contents order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overview {
    pub title: String,
    pub parts: Vec<Part>,
}

/// Extract the story title and the ordered part list from an overview page.
///
/// The title comes from the `og:title` meta tag, then the first `h1`/`h2`,
/// then `<title>`; a trailing `" - Wattpad"` is removed. Part links are
/// resolved against `page_url`.
pub fn parse_overview(html: &str, page_url: &str) -> Result<Overview> {
    let dom = parse_html(html);

    let og_title = Selector::parse(r#"meta[property="og:title"]"#)?;
    let heading = Selector::parse("h1, h2")?;

    let title = [
        dom.select_first(&og_title)
            .and_then(|meta| dom.attr(meta, "content"))
            .map(strip_site_suffix),
        dom.select_first(&heading)
            .map(|h| strip_site_suffix(&dom.joined_text(h, " "))),
        dom.find_by_tag("title")
            .map(|t| strip_site_suffix(&dom.joined_text(t, " "))),
    ]
    .into_iter()
    .flatten()
    .find(|t| !t.is_empty())
    .ok_or(Error::MissingTitle)?;

    let parts_selector = Selector::parse(PARTS_SELECTOR)?;
    let mut parts = Vec::new();
    for link in dom.select(&parts_selector) {
        let Some(href) = dom.attr(link, "href") else {
            continue;
        };
        let url = join_url(page_url, href);
        let id = extract_story_id(&url)?;
        let title = clean_part_title(&dom.joined_text(link, " "));
        parts.push(Part { id, title, url });
    }

    if parts.is_empty() {
        return Err(Error::NoChapters);
    }

    Ok(Overview { title, parts })
}

/// Resolve `href` against `base` the way a browser would: absolute,
/// scheme-relative, root-relative, path-relative, query-only and
/// fragment-only references, with `.` and `..` segments removed.
pub fn join_url(base: &str, href: &str) -> String {
    let href = href.trim();
    if href.contains("://") {
        return href.to_string();
    }

    let base = base.split_once('#').map_or(base, |(before, _)| before);
    let Ok(uri) = base.parse::<Uri>() else {
        return href.to_string();
    };
    let scheme = uri.scheme_str().unwrap_or("https");
    let Some(authority) = uri.authority() else {
        return href.to_string();
    };

    if let Some(rest) = href.strip_prefix("//") {
        return format!("{scheme}://{rest}");
    }

    let base_path = match uri.path() {
        "" => "/",
        path => path,
    };
    if href.is_empty() || href.starts_with('#') {
        let query = uri.query().map(|q| format!("?{q}")).unwrap_or_default();
        return format!("{scheme}://{authority}{base_path}{query}{href}");
    }
    if href.starts_with('?') {
        return format!("{scheme}://{authority}{base_path}{href}");
    }

    let (path, suffix) = href.find(['?', '#']).map_or((href, ""), |i| href.split_at(i));
    let merged = if path.starts_with('/') {
        path.to_string()
    } else {
        let dir = &base_path[..base_path.rfind('/').map_or(0, |i| i + 1)];
        format!("{dir}{path}")
    };
    format!(
        "{scheme}://{authority}{}{suffix}",
        remove_dot_segments(&merged)
    )
}

fn remove_dot_segments(path: &str) -> String {
    let mut stack: Vec<&str> = Vec::new();
    let mut ends_in_dir = false;
    for segment in path.strip_prefix('/').unwrap_or(path).split('/') {
        ends_in_dir = matches!(segment, "." | "..");
        match segment {
            "." => {}
            ".." => {
                stack.pop();
            }
            other => stack.push(other),
        }
    }

    let mut out = format!("/{}", stack.join("/"));
    if ends_in_dir && !out.ends_with('/') {
        out.push('/');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "https://www.wattpad.com/story/555-the-tale";

    fn page(head: &str, body: &str) -> String {
        format!("<html><head>{head}</head><body>{body}</body></html>")
    }

    const PARTS: &str = r#"
        <ul aria-label="story-parts">
            <li><a href="/1001-prologue"><div>Prologue</div><div>Mon, Jan 1, 2024</div></a></li>
            <li><a href="https://www.wattpad.com/1002-one">Chapter   One</a></li>
        </ul>
    "#;

    #[test]
    fn test_og_title_wins() {
        let html = page(
            r#"<meta property="og:title" content="The Tale - Wattpad"><title>Other</title>"#,
            &format!("<h1>Heading</h1>{PARTS}"),
        );
        let overview = parse_overview(&html, PAGE).unwrap();
        assert_eq!(overview.title, "The Tale");
    }

    #[test]
    fn test_title_fallbacks() {
        let html = page("<title>Tab Title - Wattpad</title>", &format!("<h2> Big <b>Name</b> </h2>{PARTS}"));
        assert_eq!(parse_overview(&html, PAGE).unwrap().title, "Big Name");

        let html = page("<title>Tab Title - Wattpad</title>", PARTS);
        assert_eq!(parse_overview(&html, PAGE).unwrap().title, "Tab Title");
    }

    #[test]
    fn test_parts_in_order_with_clean_titles() {
        let html = page("<title>T</title>", PARTS);
        let overview = parse_overview(&html, PAGE).unwrap();
        assert_eq!(
            overview.parts,
            vec![
                Part {
                    id: "1001".into(),
                    title: "Prologue".into(),
                    url: "https://www.wattpad.com/1001-prologue".into(),
                },
                Part {
                    id: "1002".into(),
                    title: "Chapter One".into(),
                    url: "https://www.wattpad.com/1002-one".into(),
                },
            ]
        );
    }

    #[test]
    fn test_missing_title() {
        let html = page(r#"<meta property="og:title" content=" - Wattpad">"#, PARTS);
        assert!(matches!(parse_overview(&html, PAGE), Err(Error::MissingTitle)));
    }

    #[test]
    fn test_no_chapters() {
        let html = page("<title>T</title>", r#"<ul><li><a href="/1-x">x</a></li></ul>"#);
        assert!(matches!(parse_overview(&html, PAGE), Err(Error::NoChapters)));
    }

    #[test]
    fn test_join_url() {
        assert_eq!(join_url(PAGE, "/9-x"), "https://www.wattpad.com/9-x");
        assert_eq!(join_url(PAGE, "//cdn.test/a"), "https://cdn.test/a");
        assert_eq!(join_url(PAGE, "http://o.test/b"), "http://o.test/b");
        assert_eq!(join_url(PAGE, "parts"), "https://www.wattpad.com/story/parts");
        assert_eq!(join_url("http://h.test", "x"), "http://h.test/x");
    }

    #[test]
    fn test_join_url_dot_segments() {
        let base = "https://h.test/a/b/c";
        assert_eq!(join_url(base, "../d"), "https://h.test/a/d");
        assert_eq!(join_url(base, "./e"), "https://h.test/a/b/e");
        assert_eq!(join_url(base, ".."), "https://h.test/a/");
        assert_eq!(join_url(base, "../../../../up"), "https://h.test/up");
        assert_eq!(join_url(base, "/x/./y/../z?q=1#f"), "https://h.test/x/z?q=1#f");
    }

    #[test]
    fn test_join_url_query_and_fragment_only() {
        let base = "https://h.test/a/b/c?page=1#old";
        assert_eq!(join_url(base, "?page=2"), "https://h.test/a/b/c?page=2");
        assert_eq!(join_url(base, "#top"), "https://h.test/a/b/c?page=1#top");
        assert_eq!(join_url(base, ""), "https://h.test/a/b/c?page=1");
        assert_eq!(join_url(base, "d?x#y"), "https://h.test/a/b/d?x#y");
    }
}
