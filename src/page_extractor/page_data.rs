//! Document assembly
//!
//! One HTML page in, one [`Document`] out. Section extractors run
//! independently against the parsed tree; a missing section never fails
//! the page. Only input-level problems surface as errors.

use rayon::prelude::*;
use scraper::Html;
use serde::{Deserialize, Serialize};

use super::citation::{CitationNormalizer, CitationRules};
use super::content_blocks::ContentBlockExtractor;
use super::node_locator::{locate, locate_or_report};
use super::references::extract_references;
use super::schema::{DualBlocks, Document};
use super::sections::{
    extract_abstract, extract_info_box, extract_short_description, extract_title, extract_toc,
};
use crate::config::ExtractConfig;
use crate::error::{ExtractError, ExtractResult};
use crate::extract_events::{ExtractionEvent, ExtractionObserver};

/// Extract a full document from one rendered HTML page
pub fn extract_document(
    html: &str,
    config: &ExtractConfig,
    observer: &dyn ExtractionObserver,
) -> ExtractResult<Document> {
    if html.trim().is_empty() {
        return Err(ExtractError::EmptyInput);
    }
    if html.len() > config.max_html_bytes() {
        return Err(ExtractError::InputTooLarge { size: html.len(), limit: config.max_html_bytes() });
    }

    let parsed = Html::parse_document(html);
    let root = parsed.root_element();
    let anchors = config.anchors();

    if config.require_entry_marker()
        && locate(root, &anchors.title).is_none()
        && locate(root, &anchors.abstract_text).is_none()
    {
        return Err(ExtractError::NotAnEntryPage);
    }

    let normalizer = CitationNormalizer::new(CitationRules::from(config), observer);

    let content = match locate_or_report(root, &anchors.content, observer) {
        Some(container) => ContentBlockExtractor::new(config, &normalizer, observer).extract(container),
        None => DualBlocks::default(),
    };

    Ok(Document {
        title: extract_title(root, config, observer),
        short_description: extract_short_description(root, config, observer),
        abstract_text: extract_abstract(root, config, &normalizer, observer),
        info_box: extract_info_box(root, config, &normalizer, observer),
        toc: extract_toc(root, config, observer),
        content,
        references: extract_references(root, config, observer),
    })
}

/// One page handed to [`extract_batch`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInput {
    /// Where the page came from; only used for reporting
    pub url: Option<String>,
    pub html: String,
}

impl PageInput {
    #[must_use]
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self { url: Some(url.into()), html: html.into() }
    }
}

/// Result for one page of a batch
#[derive(Debug, Clone)]
pub struct PageOutcome {
    pub url: Option<String>,
    pub result: ExtractResult<Document>,
}

impl PageOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Extract many pages in parallel.
///
/// Outcomes are returned in input order. A failing page is reported as
/// `PageFailed` and recorded in its outcome; the rest of the batch proceeds.
pub fn extract_batch(
    pages: &[PageInput],
    config: &ExtractConfig,
    observer: &dyn ExtractionObserver,
) -> Vec<PageOutcome> {
    pages
        .par_iter()
        .map(|page| {
            let result = extract_document(&page.html, config, observer);
            if let Err(err) = &result {
                observer.on_event(&ExtractionEvent::PageFailed {
                    url: page.url.clone(),
                    reason: err.to_string(),
                });
            }
            PageOutcome { url: page.url.clone(), result }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::extract_events::{NoopObserver, RecordingObserver};

    #[test]
    fn test_empty_input_rejected() {
        let err = extract_document("  \n ", &ExtractConfig::default(), &NoopObserver);
        assert!(matches!(err, Err(ExtractError::EmptyInput)));
    }

    #[test]
    fn test_oversized_input_rejected() -> anyhow::Result<()> {
        let config = ExtractConfig::builder().max_html_bytes(16).build()?;
        let result = extract_document("<p>more than sixteen bytes</p>", &config, &NoopObserver);
        assert!(matches!(result, Err(ExtractError::InputTooLarge { limit: 16, .. })));
        Ok(())
    }

    #[test]
    fn test_unrelated_page_yields_empty_document() -> anyhow::Result<()> {
        let observer = RecordingObserver::new();
        let doc = extract_document("<html><body><p>hello</p></body></html>", &ExtractConfig::default(), &observer)?;
        assert_eq!(doc, Document::default());
        assert!(observer.count_where(|e| matches!(e, ExtractionEvent::SectionMissing { .. })) >= 5);
        Ok(())
    }

    #[test]
    fn test_strict_mode_requires_entry_marker() -> anyhow::Result<()> {
        let config = ExtractConfig::builder().require_entry_marker(true).build()?;
        let result = extract_document("<p>captcha</p>", &config, &NoopObserver);
        assert!(matches!(result, Err(ExtractError::NotAnEntryPage)));

        let ok = extract_document(r#"<h1 class="J-lemma-title">T</h1>"#, &config, &NoopObserver)?;
        assert_eq!(ok.title, "T");
        Ok(())
    }

    #[test]
    fn test_batch_continues_past_failures() {
        let pages = vec![
            PageInput::new("https://example.com/a", r#"<h1 class="J-lemma-title">A</h1>"#),
            PageInput::new("https://example.com/empty", ""),
            PageInput::new("https://example.com/b", r#"<h1 class="J-lemma-title">B</h1>"#),
        ];
        let observer = RecordingObserver::new();
        let outcomes = extract_batch(&pages, &ExtractConfig::default(), &observer);

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].is_success());
        assert!(!outcomes[1].is_success());
        assert_eq!(outcomes[2].result.as_ref().map(|d| d.title.as_str()).ok(), Some("B"));
        assert_eq!(outcomes[1].result.as_ref().err().map(ExtractError::kind), Some(ErrorKind::PageFailure));
        assert_eq!(
            observer.count_where(|e| matches!(e, ExtractionEvent::PageFailed { .. })),
            1
        );
    }
}
