//! Fixed page sections: title, short description, abstract, info box and TOC.

use regex::Regex;
use std::sync::LazyLock;

use super::citation::CitationNormalizer;
use super::html_node::HtmlNode;
use super::node_locator::{locate, locate_all, locate_or_report};
use super::schema::{DualMap, DualText, TocEntry};
use crate::config::ExtractConfig;
use crate::extract_events::ExtractionObserver;
use crate::utils::{MAX_TOC_LEVEL, normalize_whitespace, strip_leading_numeral};

static TOC_LEVEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"level(\d+)").expect("BUG: hardcoded TOC level regex is statically valid")
});

fn plain_text<'a, N: HtmlNode<'a>>(node: N) -> String {
    normalize_whitespace(&node.text_content())
}

/// Page title, empty when absent
pub fn extract_title<'a, N: HtmlNode<'a>>(
    root: N,
    config: &ExtractConfig,
    observer: &dyn ExtractionObserver,
) -> String {
    locate_or_report(root, &config.anchors().title, observer).map(plain_text).unwrap_or_default()
}

/// One-line description under the title, empty when absent
pub fn extract_short_description<'a, N: HtmlNode<'a>>(
    root: N,
    config: &ExtractConfig,
    observer: &dyn ExtractionObserver,
) -> String {
    locate_or_report(root, &config.anchors().short_description, observer)
        .map(plain_text)
        .unwrap_or_default()
}

/// Summary paragraph in both variants
pub fn extract_abstract<'a, N: HtmlNode<'a>>(
    root: N,
    config: &ExtractConfig,
    normalizer: &CitationNormalizer<'_>,
    observer: &dyn ExtractionObserver,
) -> DualText {
    locate_or_report(root, &config.anchors().abstract_text, observer)
        .map(|node| normalizer.normalize_node(node))
        .unwrap_or_default()
}

/// Attribute panel as name → value.
///
/// Items missing either the name or the value element are skipped. Names
/// are plain text; values keep their citations in the annotated variant.
pub fn extract_info_box<'a, N: HtmlNode<'a>>(
    root: N,
    config: &ExtractConfig,
    normalizer: &CitationNormalizer<'_>,
    observer: &dyn ExtractionObserver,
) -> DualMap {
    let anchors = config.anchors();
    let mut info = DualMap::new();
    let Some(panel) = locate_or_report(root, &anchors.info_panel, observer) else {
        return info;
    };

    for item in locate_all(panel, &anchors.info_item) {
        let name = locate(item, &anchors.info_name);
        let value = locate(item, &anchors.info_value);
        if let (Some(name), Some(value)) = (name, value) {
            info.insert(plain_text(name), normalizer.normalize_node(value));
        }
    }
    info
}

/// Level from the entry's first class (`level1`, `level2`, ...), else 0.
/// Capped at [`MAX_TOC_LEVEL`].
fn toc_level<'a, N: HtmlNode<'a>>(entry: &N) -> u32 {
    entry
        .class_list()
        .first()
        .filter(|class| class.starts_with("level"))
        .and_then(|class| TOC_LEVEL.captures(class))
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse::<u32>().ok())
        .map_or(0, |level| level.min(MAX_TOC_LEVEL))
}

/// Outline entries in source order
pub fn extract_toc<'a, N: HtmlNode<'a>>(
    root: N,
    config: &ExtractConfig,
    observer: &dyn ExtractionObserver,
) -> Vec<TocEntry> {
    let Some(toc) = locate_or_report(root, &config.anchors().toc, observer) else {
        return Vec::new();
    };

    toc.descendants_by_tag("li")
        .into_iter()
        .map(|entry| {
            let level = toc_level(&entry);
            let text = normalize_whitespace(&entry.text_content().replace(config.toc_bullet(), ""));
            let text = if level == 1 { strip_leading_numeral(&text).to_string() } else { text };
            TocEntry { level, text }
        })
        .collect()
}
