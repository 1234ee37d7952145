//! Bibliography extraction.
//!
//! The rendered reference list is preferred. When it is absent or empty the
//! citation markers in the page are scanned instead and one placeholder entry
//! is synthesized per distinct cited number.

use std::collections::BTreeSet;

use super::citation::{CitationRules, citation_numbers};
use super::html_node::HtmlNode;
use super::node_locator::locate;
use super::schema::Reference;
use crate::config::ExtractConfig;
use crate::extract_events::{ExtractionEvent, ExtractionObserver};
use crate::utils::{normalize_reference_url, normalize_whitespace};

const FALLBACK_ITEM_TAGS: [&str; 3] = ["p", "div", "span"];

/// Reference entries for a page
pub fn extract_references<'a, N: HtmlNode<'a>>(
    root: N,
    config: &ExtractConfig,
    observer: &dyn ExtractionObserver,
) -> Vec<Reference> {
    let references = rendered_references(root, config, observer);
    if !references.is_empty() {
        observer.on_event(&ExtractionEvent::ReferencesExtracted { count: references.len() });
        return references;
    }

    let synthesized = synthesize_references(root, config);
    if synthesized.is_empty() {
        observer.on_event(&ExtractionEvent::ReferencesExtracted { count: 0 });
    } else {
        observer.on_event(&ExtractionEvent::ReferencesSynthesized { count: synthesized.len() });
    }
    synthesized
}

fn reference_items<'a, N: HtmlNode<'a>>(list: N) -> Vec<N> {
    let items = list.descendants_by_tag("li");
    if !items.is_empty() {
        return items;
    }
    list.descendant_elements()
        .into_iter()
        .filter(|node| FALLBACK_ITEM_TAGS.iter().any(|tag| node.tag_name().eq_ignore_ascii_case(tag)))
        .filter(|node| node.class_list().iter().any(|class| class.to_lowercase().contains("reference")))
        .collect()
}

fn rendered_references<'a, N: HtmlNode<'a>>(
    root: N,
    config: &ExtractConfig,
    observer: &dyn ExtractionObserver,
) -> Vec<Reference> {
    let anchors = config.anchors();
    let Some(section) = locate(root, &anchors.reference_section) else {
        observer.on_event(&ExtractionEvent::SectionMissing { anchor: anchors.reference_section.name.clone() });
        return Vec::new();
    };
    let list = locate(section, &anchors.reference_list).unwrap_or(section);

    reference_items(list)
        .into_iter()
        .enumerate()
        .map(|(index, item)| reference_entry(index + 1, item, config))
        .collect()
}

fn reference_entry<'a, N: HtmlNode<'a>>(id: usize, item: N, config: &ExtractConfig) -> Reference {
    let marker = config.citation_date_marker();
    let is_date_span = |node: &N| {
        if !node.tag_name().eq_ignore_ascii_case("span") {
            return false;
        }
        let text = node.text_content();
        let text = text.trim();
        text.starts_with(marker) || text.strip_prefix('[').is_some_and(|rest| rest.starts_with(marker))
    };

    let ref_date = item
        .find_descendant(is_date_span)
        .map(|span| {
            span.text_content().replace(['[', ']'], "").replace(marker, "").trim().to_string()
        })
        .unwrap_or_default();

    let link = locate(item, &config.anchors().reference_link);
    let url = link
        .and_then(|link| link.attribute("href"))
        .map(|href| normalize_reference_url(href, config.base_origin()))
        .unwrap_or_default();
    let title = match link {
        Some(link) => normalize_whitespace(&link.text_content()),
        None => normalize_whitespace(&item.text_content_excluding(is_date_span)),
    };

    Reference { id: id.to_string(), title, url, ref_date }
}

/// Placeholder entries for every number cited by a marker element
fn synthesize_references<'a, N: HtmlNode<'a>>(root: N, config: &ExtractConfig) -> Vec<Reference> {
    let rules = CitationRules::from(config);
    let numbers: BTreeSet<u64> = root
        .descendants_by_tag(config.citation_marker_tag())
        .into_iter()
        .flat_map(|marker| citation_numbers(&marker.text_content(), &rules))
        .collect();

    numbers
        .into_iter()
        .map(|number| Reference {
            id: number.to_string(),
            title: format!("Reference {number}"),
            ..Reference::default()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract_events::{NoopObserver, RecordingObserver};
    use scraper::Html;

    fn references(html: &str) -> Vec<Reference> {
        let doc = Html::parse_document(html);
        extract_references(doc.root_element(), &ExtractConfig::default(), &NoopObserver)
    }

    #[test]
    fn test_rendered_list_with_links_and_dates() {
        let refs = references(
            r#"<div class="lemmaReference_a81Zq"><ul class="referenceList_Qc5h3">
                <li><span>[1]</span><a class="refLink_x" href="//news.example.com/a">Annual report</a><span> [引用日期2024-01-02]</span></li>
                <li><a class="refLink_x" href="/item/other">Other entry</a></li>
                <li>Plain citation text</li>
            </ul></div>"#,
        );
        assert_eq!(
            refs,
            [
                Reference {
                    id: "1".into(),
                    title: "Annual report".into(),
                    url: "https://news.example.com/a".into(),
                    ref_date: "2024-01-02".into(),
                },
                Reference {
                    id: "2".into(),
                    title: "Other entry".into(),
                    url: "https://baike.baidu.com/item/other".into(),
                    ref_date: String::new(),
                },
                Reference {
                    id: "3".into(),
                    title: "Plain citation text".into(),
                    url: String::new(),
                    ref_date: String::new(),
                },
            ]
        );
    }

    #[test]
    fn test_absolute_urls_pass_through() {
        let refs = references(
            r#"<div class="lemmaReference_Dc3xe"><ul><li><a href="http://x.org/p">X</a></li></ul></div>"#,
        );
        assert_eq!(refs[0].url, "http://x.org/p");
        assert_eq!(refs[0].title, "X");
    }

    #[test]
    fn test_class_based_items_without_li() {
        let refs = references(
            r#"<div class="lemmaReference_q"><div class="referenceItem">First</div><p class="Reference-line">Second</p></div>"#,
        );
        let titles: Vec<&str> = refs.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["First", "Second"]);
    }

    #[test]
    fn test_synthesized_from_markers() {
        let doc = Html::parse_document(
            r#"<p>a<sup>[3]</sup> b<sup>[1-2]</sup> c<sup>[3]</sup> <sup>note</sup></p>"#,
        );
        let observer = RecordingObserver::new();
        let refs = extract_references(doc.root_element(), &ExtractConfig::default(), &observer);

        let ids: Vec<&str> = refs.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
        assert_eq!(refs[2].title, "Reference 3");
        assert!(refs.iter().all(|r| r.url.is_empty()));
        assert_eq!(
            observer.count_where(|e| matches!(e, ExtractionEvent::ReferencesSynthesized { count: 3 })),
            1
        );
    }

    #[test]
    fn test_no_references_at_all() {
        assert!(references("<p>nothing cited</p>").is_empty());
    }
}
