//! Input filters for free-text user fields
//!
//! Applied to `username` and `name` before validation, in this order:
//! strip markup tags, trim surrounding whitespace, remove line breaks.

use regex::Regex;
use std::sync::LazyLock;

static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    // comments first, then any element or processing instruction
    Regex::new(r"(?s)<!--.*?-->|<[^>]*>").expect("tag pattern is a valid regex")
});

/// Remove markup tags
pub fn strip_tags(input: &str) -> String {
    TAG_PATTERN.replace_all(input, "").into_owned()
}

/// Remove carriage returns and line feeds
pub fn strip_newlines(input: &str) -> String {
    input.chars().filter(|c| !matches!(c, '\r' | '\n')).collect()
}

/// Apply every filter to a free-text value
pub fn sanitize(input: &str) -> String {
    strip_newlines(strip_tags(input).trim())
}

/// Apply every filter to an optional value
pub fn sanitize_opt(input: Option<&str>) -> Option<String> {
    input.map(sanitize)
}
