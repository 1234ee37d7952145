//! Structural anchor lookup.
//!
//! An anchor is found by tag plus class/id signature. Absence is normal:
//! callers substitute an empty default and report `SectionMissing`.

use super::html_node::HtmlNode;
use crate::config::{AnchorSpec, Matcher, Signature};
use crate::extract_events::{ExtractionEvent, ExtractionObserver};

impl Signature {
    /// Whether an element carries this signature
    pub fn matches<'a, N: HtmlNode<'a>>(&self, node: &N) -> bool {
        if !node.tag_name().eq_ignore_ascii_case(&self.tag) {
            return false;
        }
        match &self.matcher {
            Matcher::ClassExact(class) => node.has_class(class),
            Matcher::ClassPrefix(prefix) => {
                node.class_list().iter().any(|class| class.starts_with(prefix.as_str()))
            }
            Matcher::Id(id) => node.attribute("id") == Some(id.as_str()),
            Matcher::Any => true,
        }
    }
}

/// First element below `root` (or `root` itself) matching the anchor.
///
/// Candidates are tried in order; each candidate scans the whole subtree
/// before the next one is considered.
pub fn locate<'a, N: HtmlNode<'a>>(root: N, anchor: &AnchorSpec) -> Option<N> {
    let mut nodes = vec![root];
    nodes.extend(root.descendant_elements());
    anchor
        .candidates
        .iter()
        .find_map(|signature| nodes.iter().copied().find(|node| signature.matches(node)))
}

/// Every element below `root` matching the first candidate that matches anything
pub fn locate_all<'a, N: HtmlNode<'a>>(root: N, anchor: &AnchorSpec) -> Vec<N> {
    let nodes = root.descendant_elements();
    for signature in &anchor.candidates {
        let hits: Vec<N> = nodes.iter().copied().filter(|node| signature.matches(node)).collect();
        if !hits.is_empty() {
            return hits;
        }
    }
    Vec::new()
}

/// [`locate`], reporting a miss to the observer
pub fn locate_or_report<'a, N: HtmlNode<'a>>(
    root: N,
    anchor: &AnchorSpec,
    observer: &dyn ExtractionObserver,
) -> Option<N> {
    let found = locate(root, anchor);
    if found.is_none() {
        observer.on_event(&ExtractionEvent::SectionMissing { anchor: anchor.name.clone() });
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_exact_class_requires_whole_token() {
        let html = Html::parse_document(r#"<div class="lemmaSummary_yKMC1x">no</div><div class="x lemmaSummary_yKMC1">yes</div>"#);
        let spec = AnchorSpec::new("abstract", vec![Signature::class("div", "lemmaSummary_yKMC1")]);
        let node = locate(html.root_element(), &spec);
        assert_eq!(node.map(|n| n.text_content()), Some("yes".to_string()));
    }

    #[test]
    fn test_candidates_tried_in_order() {
        let html = Html::parse_document(r#"<div class="lemmaReference_9Xq1">prefix</div>"#);
        let spec = AnchorSpec::new(
            "reference_section",
            vec![
                Signature::class("div", "lemmaReference_Dc3xe"),
                Signature::class_prefix("div", "lemmaReference"),
            ],
        );
        let node = locate(html.root_element(), &spec);
        assert_eq!(node.map(|n| n.text_content()), Some("prefix".to_string()));
    }

    #[test]
    fn test_id_and_tag_matching() {
        let html = Html::parse_document(r#"<span id="lemmaDesc">s</span><div id="lemmaDesc">d</div>"#);
        let spec = AnchorSpec::new("short_description", vec![Signature::id("div", "lemmaDesc")]);
        assert_eq!(locate(html.root_element(), &spec).map(|n| n.text_content()), Some("d".to_string()));
    }

    #[test]
    fn test_missing_anchor_reported() {
        let html = Html::parse_document("<p>nothing</p>");
        let observer = crate::extract_events::RecordingObserver::new();
        let spec = AnchorSpec::new("toc", vec![Signature::class("div", "catalogList_MR9Nd")]);
        assert!(locate_or_report(html.root_element(), &spec, &observer).is_none());
        assert_eq!(
            observer.events(),
            [ExtractionEvent::SectionMissing { anchor: "toc".to_string() }]
        );
    }

    #[test]
    fn test_locate_all_collects_every_match() {
        let html = Html::parse_document(r#"<dl><div class="item">a</div><div class="item">b</div></dl>"#);
        let spec = AnchorSpec::new("info_item", vec![Signature::class("div", "item")]);
        assert_eq!(locate_all(html.root_element(), &spec).len(), 2);
    }
}
