//! Text normalization helpers shared by the extractors and the renderer.

use regex::Regex;
use std::sync::LazyLock;

static LEADING_NUMERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+\s*").expect("BUG: hardcoded leading numeral regex is statically valid")
});

static ORDERED_ITEM_NUMERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(\d+)\.(.*)").expect("BUG: hardcoded ordered item regex is statically valid")
});

/// Collapse every run of whitespace into a single space and trim both ends.
///
/// Text nodes are concatenated verbatim during extraction, so source
/// indentation and line breaks show up as whitespace runs here.
///
/// # Examples
/// ```
/// # use lemma_extract::utils::string_utils::normalize_whitespace;
/// assert_eq!(normalize_whitespace("  a\n   b\tc  "), "a b c");
/// assert_eq!(normalize_whitespace("\u{a0}x\u{a0}"), "x");
/// ```
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Remove a leading run of digits and the whitespace after it.
///
/// # Examples
/// ```
/// # use lemma_extract::utils::string_utils::strip_leading_numeral;
/// assert_eq!(strip_leading_numeral("12 History"), "History");
/// assert_eq!(strip_leading_numeral("3发展历程"), "发展历程");
/// assert_eq!(strip_leading_numeral("History"), "History");
/// ```
#[must_use]
pub fn strip_leading_numeral(text: &str) -> &str {
    match LEADING_NUMERAL.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    }
}

/// Split an ordered item's text into its leading number and the rest.
///
/// Returns `None` when the text does not start with `N.`.
///
/// # Examples
/// ```
/// # use lemma_extract::utils::string_utils::split_ordered_numeral;
/// assert_eq!(split_ordered_numeral("2. Second"), Some(("2", "Second")));
/// assert_eq!(split_ordered_numeral("2.Second"), Some(("2", "Second")));
/// assert_eq!(split_ordered_numeral("Second"), None);
/// ```
#[must_use]
pub fn split_ordered_numeral(text: &str) -> Option<(&str, &str)> {
    let caps = ORDERED_ITEM_NUMERAL.captures(text)?;
    let number = caps.get(1)?.as_str();
    let rest = caps.get(2).map_or("", |m| m.as_str());
    Some((number, rest.trim_start()))
}
