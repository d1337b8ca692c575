//! Escaping for the restricted markup vocabulary.
//!
//! Text is escaped exactly once, at the text leaf, before any formatting tag
//! is wrapped around it.

/// Typeface used for Yi syllables, which the default font lacks.
pub const YI_FONT_FACE: &str = "NotoSansYi";

/// Escape `&`, `<` and `>`. Quotes are left alone.
///
/// ```
/// use storypdf::markup::escape_text;
///
/// assert_eq!(escape_text("A & B <c>"), "A &amp; B &lt;c&gt;");
/// assert_eq!(escape_text(r#"say "hi""#), r#"say "hi""#);
/// ```
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + s.len() / 8);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape a value for use inside a double-quoted attribute.
pub fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + s.len() / 8);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn is_yi(c: char) -> bool {
    ('\u{A000}'..='\u{A48F}').contains(&c)
}

/// Wrap every maximal run of Yi syllables in a font override.
pub fn wrap_yi_runs(s: &str) -> String {
    if !s.chars().any(is_yi) {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len() + 32);
    let mut in_run = false;
    for c in s.chars() {
        let yi = is_yi(c);
        if yi && !in_run {
            out.push_str("<font face=\"");
            out.push_str(YI_FONT_FACE);
            out.push_str("\">");
        } else if !yi && in_run {
            out.push_str("</font>");
        }
        in_run = yi;
        out.push(c);
    }
    if in_run {
        out.push_str("</font>");
    }
    out
}

/// Full text-leaf treatment: NBSP to space, escape, Yi font tagging.
pub fn render_text(raw: &str) -> String {
    wrap_yi_runs(&escape_text(&raw.replace('\u{a0}', " ")))
}
