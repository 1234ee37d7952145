//! Citation marker normalization.
//!
//! Turns an HTML fragment into two texts:
//!
//! - **clean**: marker elements removed, visible text only
//! - **annotated**: marker text kept, then rewritten into canonical groups
//!
//! The annotated rewrite works on a token list rather than on byte offsets.
//! The fragment text is split into literal runs and bracket groups, and
//! three folds run over that list in order:
//!
//! 1. `[n] [n]` (same literal number, whitespace between) collapses to `[n]`
//! 2. `[a-b]` expands to `[a, a+1, ..., b]`; malformed ranges stay literal
//! 3. groups separated by at most `adjacency_gap` characters form a cluster;
//!    a cluster of two or more groups becomes one bracket holding the
//!    sorted, de-duplicated union of its numbers. Text between the members
//!    of a merged cluster is dropped.
//!
//! Range expansion happens while tokenizing, but only single-number groups
//! take part in step 1, so the observable order of the steps is preserved.

use regex::Regex;
use scraper::Html;
use std::collections::BTreeSet;
use std::sync::LazyLock;

use super::html_node::HtmlNode;
use super::schema::DualText;
use crate::config::ExtractConfig;
use crate::extract_events::{ExtractionEvent, ExtractionObserver};
use crate::utils::{
    CITATION_ADJACENCY_GAP, CITATION_MARKER_TAG, MAX_CITATION_RANGE_SPAN, normalize_whitespace,
};

static BRACKET_GROUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\[\]]*)\]").expect("BUG: hardcoded bracket group regex is statically valid")
});

static NUMBER_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+(?:,\s*\d+)*$").expect("BUG: hardcoded number list regex is statically valid")
});

static RESIDUAL_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\d+\]").expect("BUG: hardcoded residual marker regex is statically valid")
});

/// Parameters of the citation rewrite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitationRules {
    pub marker_tag: String,
    pub adjacency_gap: usize,
    pub max_range_span: u64,
    pub strip_residual_brackets: bool,
}

impl Default for CitationRules {
    fn default() -> Self {
        Self {
            marker_tag: CITATION_MARKER_TAG.to_string(),
            adjacency_gap: CITATION_ADJACENCY_GAP,
            max_range_span: MAX_CITATION_RANGE_SPAN,
            strip_residual_brackets: false,
        }
    }
}

impl From<&ExtractConfig> for CitationRules {
    fn from(config: &ExtractConfig) -> Self {
        Self {
            marker_tag: config.citation_marker_tag().to_string(),
            adjacency_gap: config.adjacency_gap(),
            max_range_span: config.max_range_span(),
            strip_residual_brackets: config.strip_residual_brackets(),
        }
    }
}

/// One bracket group recognized as a citation
#[derive(Debug, Clone, PartialEq, Eq)]
struct CiteGroup {
    numbers: Vec<u64>,
    /// Text emitted when the group is not merged with a neighbour
    display: String,
    /// Written as a bare `[n]`; only these collapse as duplicates
    single: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Text(String),
    Cite(CiteGroup),
}

enum Bracket {
    Cite(CiteGroup),
    Malformed,
    Literal,
}

fn classify_bracket(raw: &str, content: &str, rules: &CitationRules) -> Bracket {
    if !content.is_empty() && content.bytes().all(|b| b.is_ascii_digit()) {
        return match content.parse::<u64>() {
            Ok(n) => Bracket::Cite(CiteGroup { numbers: vec![n], display: raw.to_string(), single: true }),
            Err(_) => Bracket::Malformed,
        };
    }

    if content.contains('-') && content.bytes().all(|b| b.is_ascii_digit() || b == b'-') {
        return expand_range(content, rules.max_range_span).map_or(Bracket::Malformed, Bracket::Cite);
    }

    if NUMBER_LIST.is_match(content) {
        let numbers: Option<Vec<u64>> = content.split(',').map(|n| n.trim().parse().ok()).collect();
        return match numbers {
            Some(numbers) => Bracket::Cite(CiteGroup { numbers, display: raw.to_string(), single: false }),
            None => Bracket::Malformed,
        };
    }

    Bracket::Literal
}

fn expand_range(content: &str, max_span: u64) -> Option<CiteGroup> {
    let (start, end) = content.split_once('-')?;
    let start: u64 = start.parse().ok()?;
    let end: u64 = end.parse().ok()?;
    if end < start || end - start >= max_span {
        return None;
    }
    let numbers: Vec<u64> = (start..=end).collect();
    let display = format_group(&numbers);
    Some(CiteGroup { numbers, display, single: false })
}

fn format_group(numbers: &[u64]) -> String {
    let joined = numbers.iter().map(u64::to_string).collect::<Vec<_>>().join(", ");
    format!("[{joined}]")
}

fn push_text(tokens: &mut Vec<Token>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Token::Text(last)) = tokens.last_mut() {
        last.push_str(text);
    } else {
        tokens.push(Token::Text(text.to_string()));
    }
}

/// Split text into literal runs and citation groups; adjacent literals merge.
fn tokenize(text: &str, rules: &CitationRules, malformed: &mut Vec<String>) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut cursor = 0;
    for caps in BRACKET_GROUP.captures_iter(text) {
        let (Some(whole), Some(content)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push_text(&mut tokens, &text[cursor..whole.start()]);
        match classify_bracket(whole.as_str(), content.as_str(), rules) {
            Bracket::Cite(group) => tokens.push(Token::Cite(group)),
            Bracket::Malformed => {
                malformed.push(whole.as_str().to_string());
                push_text(&mut tokens, whole.as_str());
            }
            Bracket::Literal => push_text(&mut tokens, whole.as_str()),
        }
        cursor = whole.end();
    }
    push_text(&mut tokens, &text[cursor..]);
    tokens
}

/// Collapse `[n] [n]` pairs, non-overlapping, scanning left to right.
fn collapse_duplicates(tokens: Vec<Token>) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut index = 0;
    while index < tokens.len() {
        let duplicate = match (&tokens[index], tokens.get(index + 1), tokens.get(index + 2)) {
            (Token::Cite(first), Some(Token::Text(gap)), Some(Token::Cite(second))) => {
                first.single
                    && second.single
                    && first.display == second.display
                    && !gap.is_empty()
                    && gap.chars().all(char::is_whitespace)
            }
            _ => false,
        };
        out.push(tokens[index].clone());
        index += if duplicate { 3 } else { 1 };
    }
    out
}

fn flush_cluster(cluster: &mut Vec<CiteGroup>, out: &mut String) {
    match cluster.len() {
        0 => {}
        1 => out.push_str(&cluster[0].display),
        _ => {
            let union: BTreeSet<u64> = cluster.iter().flat_map(|g| g.numbers.iter().copied()).collect();
            out.push_str(&format_group(&union.into_iter().collect::<Vec<_>>()));
        }
    }
    cluster.clear();
}

/// Merge adjacent groups into clusters and render the token list.
fn merge_clusters(tokens: Vec<Token>, gap: usize) -> String {
    let mut out = String::new();
    let mut cluster: Vec<CiteGroup> = Vec::new();
    let mut between = String::new();

    for token in tokens {
        match token {
            Token::Text(text) if cluster.is_empty() => out.push_str(&text),
            Token::Text(text) => between.push_str(&text),
            Token::Cite(group) => {
                if !cluster.is_empty() && between.chars().count() > gap {
                    flush_cluster(&mut cluster, &mut out);
                    out.push_str(&between);
                }
                between.clear();
                cluster.push(group);
            }
        }
    }
    flush_cluster(&mut cluster, &mut out);
    out.push_str(&between);
    out
}

fn rewrite(text: &str, rules: &CitationRules, malformed: &mut Vec<String>) -> String {
    let tokens = collapse_duplicates(tokenize(text, rules, malformed));
    merge_clusters(tokens, rules.adjacency_gap).trim().to_string()
}

/// Rewrite citation groups in already-extracted text.
///
/// # Examples
/// ```
/// # use lemma_extract::page_extractor::citation::{merge_citations, CitationRules};
/// let rules = CitationRules::default();
/// assert_eq!(merge_citations("a[91-92]", &rules), "a[91, 92]");
/// assert_eq!(merge_citations("a[262] [411]", &rules), "a[262, 411]");
/// assert_eq!(merge_citations("b[7] [7]", &rules), "b[7]");
/// assert_eq!(merge_citations("c[411][7] [92]", &rules), "c[7, 92, 411]");
/// ```
#[must_use]
pub fn merge_citations(text: &str, rules: &CitationRules) -> String {
    rewrite(text, rules, &mut Vec::new())
}

/// Every citation number in the text, ranges expanded, sorted and unique
#[must_use]
pub fn citation_numbers(text: &str, rules: &CitationRules) -> BTreeSet<u64> {
    tokenize(text, rules, &mut Vec::new())
        .into_iter()
        .filter_map(|token| match token {
            Token::Cite(group) => Some(group.numbers),
            Token::Text(_) => None,
        })
        .flatten()
        .collect()
}

/// Produces the clean and annotated variants of fragments
pub struct CitationNormalizer<'o> {
    rules: CitationRules,
    observer: &'o dyn ExtractionObserver,
}

impl<'o> CitationNormalizer<'o> {
    #[must_use]
    pub fn new(rules: CitationRules, observer: &'o dyn ExtractionObserver) -> Self {
        Self { rules, observer }
    }

    #[must_use]
    pub fn rules(&self) -> &CitationRules {
        &self.rules
    }

    fn is_marker<'a, N: HtmlNode<'a>>(&self, node: &N) -> bool {
        node.tag_name().eq_ignore_ascii_case(&self.rules.marker_tag)
    }

    /// Visible text with every marker element removed
    pub fn clean_text<'a, N: HtmlNode<'a>>(&self, node: N) -> String {
        let text = normalize_whitespace(&node.text_content_excluding(|n| self.is_marker(n)));
        if self.rules.strip_residual_brackets {
            normalize_whitespace(&RESIDUAL_MARKER.replace_all(&text, ""))
        } else {
            text
        }
    }

    /// Visible text with marker groups merged.
    ///
    /// Fragments without marker elements are returned as plain text; bracket
    /// text that did not come from a marker is never rewritten.
    pub fn annotated_text<'a, N: HtmlNode<'a>>(&self, node: N) -> String {
        let text = normalize_whitespace(&node.text_content());
        let markers = node.descendant_elements().iter().filter(|n| self.is_marker(*n)).count();
        if markers == 0 {
            return text;
        }

        let mut malformed = Vec::new();
        let merged = rewrite(&text, &self.rules, &mut malformed);
        for token in malformed {
            self.observer.on_event(&ExtractionEvent::MalformedSpan {
                context: "citation".to_string(),
                token,
            });
        }
        self.observer.on_event(&ExtractionEvent::CitationsMerged { markers });
        merged
    }

    /// Both variants of one element's content
    pub fn normalize_node<'a, N: HtmlNode<'a>>(&self, node: N) -> DualText {
        DualText { clean: self.clean_text(node), annotated: self.annotated_text(node) }
    }

    /// Both variants of a serialized HTML fragment
    pub fn normalize_fragment(&self, html: &str) -> DualText {
        if html.trim().is_empty() {
            return DualText::default();
        }
        let fragment = Html::parse_fragment(html);
        self.normalize_node(fragment.root_element())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract_events::{NoopObserver, RecordingObserver};

    fn merge(text: &str) -> String {
        merge_citations(text, &CitationRules::default())
    }

    fn normalize(html: &str) -> DualText {
        CitationNormalizer::new(CitationRules::default(), &NoopObserver).normalize_fragment(html)
    }

    #[test]
    fn test_range_expansion() {
        assert_eq!(merge("x[91-92]"), "x[91, 92]");
        assert_eq!(merge("x[5-5]"), "x[5]");
        assert_eq!(merge("x[1-4]"), "x[1, 2, 3, 4]");
    }

    #[test]
    fn test_malformed_ranges_untouched() {
        assert_eq!(merge("x[a-b]"), "x[a-b]");
        assert_eq!(merge("x[5-]"), "x[5-]");
        assert_eq!(merge("x[1-2-3]"), "x[1-2-3]");
        assert_eq!(merge("x[9-3]"), "x[9-3]");
    }

    #[test]
    fn test_range_wider_than_limit_untouched() {
        let rules = CitationRules { max_range_span: 10, ..CitationRules::default() };
        assert_eq!(merge_citations("x[1-50]", &rules), "x[1-50]");
        assert_eq!(merge_citations("x[1-10]", &rules), "x[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]");
    }

    #[test]
    fn test_adjacency_threshold() {
        assert_eq!(merge("x[1]abc[2]"), "x[1, 2]");
        assert_eq!(merge("x[1]abcd[2]"), "x[1]abcd[2]");
        assert_eq!(merge("x[1][2]"), "x[1, 2]");
    }

    #[test]
    fn test_duplicate_collapse_is_non_overlapping() {
        assert_eq!(merge("x[7]      [7]"), "x[7]");
        // the third [7] is too far from the collapsed pair to cluster
        assert_eq!(merge("x[7] [7]      [7]"), "x[7]      [7]");
        // literal comparison: 07 and 7 are different tokens
        assert_eq!(merge("x[07]      [7]"), "x[07]      [7]");
    }

    #[test]
    fn test_numeric_not_lexical_sort() {
        assert_eq!(merge("x[411] [7] [92]"), "x[7, 92, 411]");
    }

    #[test]
    fn test_lone_group_keeps_its_spelling() {
        assert_eq!(merge("x[1,2] tail"), "x[1,2] tail");
        assert_eq!(merge("x[1,2][2, 3]"), "x[1, 2, 3]");
    }

    #[test]
    fn test_chained_clusters() {
        assert_eq!(merge("a[1] [2] b c d e[3] [1]"), "a[1, 2] b c d e[1, 3]");
    }

    #[test]
    fn test_non_citation_brackets_literal() {
        assert_eq!(merge("see [note] and [1]"), "see [note] and [1]");
        assert_eq!(merge("[[1]"), "[[1]");
    }

    #[test]
    fn test_normalize_fragment_variants() {
        let dual = normalize(
            r#"<div>Huawei was founded<sup>[1]</sup> <sup>[1]</sup> in 1987<sup>[2-3]</sup>.</div>"#,
        );
        assert_eq!(dual.clean, "Huawei was founded in 1987.");
        assert_eq!(dual.annotated, "Huawei was founded[1] in 1987[2, 3].");
    }

    #[test]
    fn test_adjacent_marker_elements_merge() {
        let dual = normalize(r#"<p>Revenue grew<sup>[262]</sup> <sup>[411]</sup></p>"#);
        assert_eq!(dual.annotated, "Revenue grew[262, 411]");
        assert_eq!(dual.clean, "Revenue grew");
    }

    #[test]
    fn test_text_brackets_without_markers_untouched() {
        let dual = normalize("<p>Array [1] [2] literal</p>");
        assert_eq!(dual.annotated, "Array [1] [2] literal");
        assert_eq!(dual.clean, "Array [1] [2] literal");
    }

    #[test]
    fn test_strip_residual_brackets_option() {
        let rules = CitationRules { strip_residual_brackets: true, ..CitationRules::default() };
        let normalizer = CitationNormalizer::new(rules, &NoopObserver);
        let dual = normalizer.normalize_fragment("<p>Text [3] more<sup>[4]</sup></p>");
        assert_eq!(dual.clean, "Text more");
    }

    #[test]
    fn test_empty_fragment() {
        assert_eq!(normalize(""), DualText::default());
        assert_eq!(normalize("   "), DualText::default());
    }

    #[test]
    fn test_malformed_marker_reported() {
        let observer = RecordingObserver::new();
        let normalizer = CitationNormalizer::new(CitationRules::default(), &observer);
        let dual = normalizer.normalize_fragment("<p>x<sup>[4-]</sup></p>");
        assert_eq!(dual.annotated, "x[4-]");
        assert_eq!(
            observer.count_where(|e| matches!(e, ExtractionEvent::MalformedSpan { .. })),
            1
        );
    }

    #[test]
    fn test_citation_numbers_collects_ranges() {
        let numbers = citation_numbers("[3][1-2] [9] [x]", &CitationRules::default());
        assert_eq!(numbers.into_iter().collect::<Vec<_>>(), [1, 2, 3, 9]);
    }
}
