//! Text helper functions

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref HTML_TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
    static ref NON_SLUG_CHARS: Regex = Regex::new(r"[^a-z0-9_\s-]").unwrap();
    static ref SLUG_SEPARATORS: Regex = Regex::new(r"[\s_-]+").unwrap();
}

/// Slug for a category or tag label
///
/// Lowercases the label and collapses every whitespace run into a single
/// hyphen. Non-ASCII characters are kept as they are.
///
/// # Examples
/// ```ignore
/// label_slug("Machine  Learning") // -> "machine-learning"
/// ```
pub fn label_slug(name: &str) -> String {
    WHITESPACE.replace_all(&name.to_lowercase(), "-").into_owned()
}

/// URL-safe ASCII slug for free text
///
/// Characters outside `a-z0-9`, whitespace, `_`, and `-` are dropped, so a
/// title written only in CJK comes back empty. `blog new` uses this for
/// filenames and falls back to a timestamp in that case.
///
/// # Examples
/// ```ignore
/// slugify("Hello, World!") // -> "hello-world"
/// ```
pub fn slugify(text: &str) -> String {
    let lower = text.to_lowercase();
    let cleaned = NON_SLUG_CHARS.replace_all(&lower, "");
    let joined = SLUG_SEPARATORS.replace_all(&cleaned, "-");
    joined.trim_matches('-').to_string()
}

/// Truncate text to `length` characters, appending `...` when cut
pub fn truncate(text: &str, length: usize) -> String {
    if text.chars().count() <= length {
        return text.to_string();
    }

    let truncated: String = text.chars().take(length).collect();
    format!("{}...", truncated.trim())
}

/// Plain text of an HTML fragment with whitespace normalized
pub fn extract_text_from_html(html: &str) -> String {
    let stripped = HTML_TAG.replace_all(html, "");
    WHITESPACE.replace_all(&stripped, " ").trim().to_string()
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
