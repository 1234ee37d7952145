//! Core configuration types for document extraction
//!
//! `ExtractConfig` carries every site-specific string the extractors match
//! against, so a regenerated class-name hash is a config change rather
//! than a code change.

use serde::{Deserialize, Serialize};

use crate::utils::{
    ABSTRACT_CLASS, CITATION_ADJACENCY_GAP, CITATION_DATE_MARKER, CITATION_MARKER_TAG,
    CONTENT_CLASS, DEFAULT_BASE_ORIGIN, HEADING_CLASS, HEADING_LEVEL_PREFIX, INFO_ITEM_CLASS,
    INFO_NAME_CLASS, INFO_PANEL_CLASS, INFO_VALUE_CLASS, MAX_CITATION_RANGE_SPAN, MAX_HTML_SIZE,
    MAX_TABLE_COLUMNS, MAX_TABLE_ROWS, ORDERED_LIST_CLASS, PARAGRAPH_CLASS,
    REFERENCE_LINK_PREFIX, REFERENCE_LIST_PREFIX, REFERENCE_SECTION_CLASS,
    REFERENCE_SECTION_PREFIX, SHORT_DESCRIPTION_CLASS, SHORT_DESCRIPTION_ID, TABLE_MODULE_ATTR,
    TABLE_MODULE_VALUE, TITLE_CLASS, TOC_BULLET, TOC_CLASS, UNORDERED_LIST_CLASS,
};

/// How a signature matches an element's attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Matcher {
    /// One of the element's class tokens equals the value
    ClassExact(String),
    /// One of the element's class tokens starts with the value
    ClassPrefix(String),
    /// The element's `id` equals the value
    Id(String),
    /// Any element with the tag matches
    Any,
}

/// Structural signature: tag name plus attribute matcher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub tag: String,
    pub matcher: Matcher,
}

impl Signature {
    #[must_use]
    pub fn class(tag: &str, class: &str) -> Self {
        Self { tag: tag.to_string(), matcher: Matcher::ClassExact(class.to_string()) }
    }

    #[must_use]
    pub fn class_prefix(tag: &str, prefix: &str) -> Self {
        Self { tag: tag.to_string(), matcher: Matcher::ClassPrefix(prefix.to_string()) }
    }

    #[must_use]
    pub fn id(tag: &str, id: &str) -> Self {
        Self { tag: tag.to_string(), matcher: Matcher::Id(id.to_string()) }
    }

    #[must_use]
    pub fn tag(tag: &str) -> Self {
        Self { tag: tag.to_string(), matcher: Matcher::Any }
    }
}

/// A named anchor: candidate signatures tried in order, first hit wins
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorSpec {
    pub name: String,
    pub candidates: Vec<Signature>,
}

impl AnchorSpec {
    #[must_use]
    pub fn new(name: &str, candidates: Vec<Signature>) -> Self {
        Self { name: name.to_string(), candidates }
    }
}

/// Every structural anchor of the entry schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorSet {
    pub title: AnchorSpec,
    pub short_description: AnchorSpec,
    pub abstract_text: AnchorSpec,
    pub info_panel: AnchorSpec,
    pub info_item: AnchorSpec,
    pub info_name: AnchorSpec,
    pub info_value: AnchorSpec,
    pub toc: AnchorSpec,
    pub content: AnchorSpec,
    pub reference_section: AnchorSpec,
    pub reference_list: AnchorSpec,
    pub reference_link: AnchorSpec,
}

impl Default for AnchorSet {
    fn default() -> Self {
        Self {
            title: AnchorSpec::new("title", vec![Signature::class("h1", TITLE_CLASS)]),
            short_description: AnchorSpec::new(
                "short_description",
                vec![
                    Signature::class("div", SHORT_DESCRIPTION_CLASS),
                    Signature::id("div", SHORT_DESCRIPTION_ID),
                ],
            ),
            abstract_text: AnchorSpec::new("abstract", vec![Signature::class("div", ABSTRACT_CLASS)]),
            info_panel: AnchorSpec::new("info_panel", vec![Signature::class("div", INFO_PANEL_CLASS)]),
            info_item: AnchorSpec::new("info_item", vec![Signature::class("div", INFO_ITEM_CLASS)]),
            info_name: AnchorSpec::new("info_name", vec![Signature::class("dt", INFO_NAME_CLASS)]),
            info_value: AnchorSpec::new("info_value", vec![Signature::class("dd", INFO_VALUE_CLASS)]),
            toc: AnchorSpec::new("toc", vec![Signature::class("div", TOC_CLASS)]),
            content: AnchorSpec::new("content", vec![Signature::class("div", CONTENT_CLASS)]),
            reference_section: AnchorSpec::new(
                "reference_section",
                vec![
                    Signature::class("div", REFERENCE_SECTION_CLASS),
                    Signature::class_prefix("div", REFERENCE_SECTION_PREFIX),
                ],
            ),
            reference_list: AnchorSpec::new(
                "reference_list",
                vec![Signature::class_prefix("ul", REFERENCE_LIST_PREFIX), Signature::tag("ul")],
            ),
            reference_link: AnchorSpec::new(
                "reference_link",
                vec![Signature::class_prefix("a", REFERENCE_LINK_PREFIX), Signature::tag("a")],
            ),
        }
    }
}

/// Signatures used to classify direct children of the content container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSignatures {
    pub heading_class: String,
    /// Class prefix carrying the heading level, e.g. `level-2`
    pub heading_level_prefix: String,
    pub paragraph_class: String,
    pub ordered_list_class: String,
    pub unordered_list_class: String,
    /// Attribute whose value marks a table module
    pub table_module_attr: String,
    pub table_module_value: String,
}

impl Default for BlockSignatures {
    fn default() -> Self {
        Self {
            heading_class: HEADING_CLASS.to_string(),
            heading_level_prefix: HEADING_LEVEL_PREFIX.to_string(),
            paragraph_class: PARAGRAPH_CLASS.to_string(),
            ordered_list_class: ORDERED_LIST_CLASS.to_string(),
            unordered_list_class: UNORDERED_LIST_CLASS.to_string(),
            table_module_attr: TABLE_MODULE_ATTR.to_string(),
            table_module_value: TABLE_MODULE_VALUE.to_string(),
        }
    }
}

/// Main configuration struct for extraction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    pub(crate) anchors: AnchorSet,
    pub(crate) blocks: BlockSignatures,

    /// Tag of inline citation markers (`sup` on the live site)
    pub(crate) citation_marker_tag: String,

    /// Maximum characters between citation groups merged into one cluster
    pub(crate) adjacency_gap: usize,

    /// Ranges spanning more numbers than this are left literal
    pub(crate) max_range_span: u64,

    /// Origin prepended to root-relative reference links
    pub(crate) base_origin: String,

    /// Phrase opening a reference's access-date annotation
    pub(crate) citation_date_marker: String,

    /// Glyph stripped from table-of-contents entries
    pub(crate) toc_bullet: char,

    /// Also delete bare `[n]` tokens that remain in the clean variant
    /// after marker elements are removed
    ///
    /// Default: false
    pub(crate) strip_residual_brackets: bool,

    /// Fail the page when neither title nor abstract can be located
    ///
    /// Pages served as captcha walls or error shells have neither. With
    /// this off they extract to an empty document instead.
    ///
    /// Default: false
    pub(crate) require_entry_marker: bool,

    pub(crate) max_html_bytes: usize,
    pub(crate) max_table_columns: usize,
    pub(crate) max_table_rows: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            anchors: AnchorSet::default(),
            blocks: BlockSignatures::default(),
            citation_marker_tag: CITATION_MARKER_TAG.to_string(),
            adjacency_gap: CITATION_ADJACENCY_GAP,
            max_range_span: MAX_CITATION_RANGE_SPAN,
            base_origin: DEFAULT_BASE_ORIGIN.to_string(),
            citation_date_marker: CITATION_DATE_MARKER.to_string(),
            toc_bullet: TOC_BULLET,
            strip_residual_brackets: false,
            require_entry_marker: false,
            max_html_bytes: MAX_HTML_SIZE,
            max_table_columns: MAX_TABLE_COLUMNS,
            max_table_rows: MAX_TABLE_ROWS,
        }
    }
}

impl ExtractConfig {
    #[must_use]
    pub fn anchors(&self) -> &AnchorSet {
        &self.anchors
    }

    #[must_use]
    pub fn blocks(&self) -> &BlockSignatures {
        &self.blocks
    }

    #[must_use]
    pub fn citation_marker_tag(&self) -> &str {
        &self.citation_marker_tag
    }

    #[must_use]
    pub fn adjacency_gap(&self) -> usize {
        self.adjacency_gap
    }

    #[must_use]
    pub fn max_range_span(&self) -> u64 {
        self.max_range_span
    }

    #[must_use]
    pub fn base_origin(&self) -> &str {
        &self.base_origin
    }

    #[must_use]
    pub fn citation_date_marker(&self) -> &str {
        &self.citation_date_marker
    }

    #[must_use]
    pub fn toc_bullet(&self) -> char {
        self.toc_bullet
    }

    #[must_use]
    pub fn strip_residual_brackets(&self) -> bool {
        self.strip_residual_brackets
    }

    #[must_use]
    pub fn require_entry_marker(&self) -> bool {
        self.require_entry_marker
    }

    #[must_use]
    pub fn max_html_bytes(&self) -> usize {
        self.max_html_bytes
    }

    #[must_use]
    pub fn max_table_columns(&self) -> usize {
        self.max_table_columns
    }

    #[must_use]
    pub fn max_table_rows(&self) -> usize {
        self.max_table_rows
    }
}

/// Options for the Markdown renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Line emitted before each non-empty table; `None` omits it
    pub table_label: Option<String>,

    /// Sentinel emitted for a table without headers and rows
    pub empty_table_marker: String,

    /// Drop ordered items lacking a leading `N.` instead of rendering
    /// their text as a plain line
    pub drop_unnumbered_ordered_items: bool,

    /// Label placed before a reference's access date
    pub citation_date_label: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            table_label: Some("**Table:**".to_string()),
            empty_table_marker: "*Empty table*".to_string(),
            drop_unnumbered_ordered_items: false,
            citation_date_label: CITATION_DATE_MARKER.to_string(),
        }
    }
}
