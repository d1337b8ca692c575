//! Small text helpers shared by the fetch and output stages.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

/// Trailing posting date the site appends to part titles, e.g.
/// `"Mon, Jan 1, 2024"`.
static PART_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:Mon|Tue|Wed|Thu|Fri|Sat|Sun),?\s+[A-Z][a-z]{2}\s+\d{1,2},\s+\d{4}$")
        .expect("valid date pattern")
});

static TRAILING_PUNCT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s,:-]+$").expect("valid punctuation pattern"));

static MULTI_SPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("valid whitespace pattern"));

const SITE_SUFFIX: &str = " - Wattpad";

const MAX_FILENAME_CHARS: usize = 120;

/// Decode a response body.
///
/// UTF-8 is tried first (a BOM is honoured). If that is malformed, the
/// `charset` hint is used when it names a known encoding, and Windows-1252
/// otherwise. Valid UTF-8 input is borrowed.
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// The `charset` parameter of a `Content-Type` header value.
pub fn charset_from_content_type(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        name.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"'))
            .filter(|v| !v.is_empty())
    })
}

/// Numeric story or part id embedded in a URL.
///
/// Path segments are scanned from the end; the first one that starts with a
/// digit contributes its leading run of digits.
///
/// ```
/// use storypdf::util::extract_story_id;
///
/// let id = extract_story_id("https://www.wattpad.com/story/12345-a-title").unwrap();
/// assert_eq!(id, "12345");
/// assert!(extract_story_id("https://www.wattpad.com/user/someone").is_err());
/// ```
pub fn extract_story_id(url: &str) -> Result<String> {
    url.split('/')
        .filter(|segment| !segment.is_empty())
        .rev()
        .find(|segment| segment.starts_with(|c: char| c.is_ascii_digit()))
        .map(|segment| {
            segment
                .chars()
                .take_while(char::is_ascii_digit)
                .collect::<String>()
        })
        .ok_or_else(|| Error::MissingStoryId(url.to_string()))
}

/// Drop a trailing `" - Wattpad"` and surrounding whitespace.
pub fn strip_site_suffix(value: &str) -> String {
    value
        .strip_suffix(SITE_SUFFIX)
        .unwrap_or(value)
        .trim()
        .to_string()
}

/// Remove the posting date and trailing separators from a part title.
pub fn clean_part_title(raw: &str) -> String {
    let cleaned = PART_DATE_RE.replace(raw, "");
    let cleaned = TRAILING_PUNCT_RE.replace(cleaned.trim(), "");
    MULTI_SPACE_RE.replace_all(cleaned.trim(), " ").into_owned()
}

/// Make a story title usable as a file name, or return `fallback` when
/// nothing usable is left.
pub fn sanitize_filename(value: &str, fallback: &str) -> String {
    let replaced: String = value
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' | '\0' => '_',
            other => other,
        })
        .collect();

    let mut cleaned = trim_name(&replaced).to_string();
    if cleaned.chars().count() > MAX_FILENAME_CHARS {
        let truncated: String = cleaned.chars().take(MAX_FILENAME_CHARS).collect();
        cleaned = truncated.trim_end_matches(['.', ' ']).to_string();
    }

    if cleaned.is_empty() {
        fallback.to_string()
    } else {
        cleaned
    }
}

fn trim_name(s: &str) -> &str {
    s.trim().trim_end_matches(['.', ' '])
}
