//! Shared configuration constants for lemma extraction
//!
//! Default anchor signatures for the encyclopedia entry schema plus the
//! limits and thresholds used by the extractors. Class names carrying a
//! hash suffix are regenerated by the site build, so every one of them is
//! overridable through [`crate::config::ExtractConfig`].

/// Site origin used to absolutize root-relative reference links
pub const DEFAULT_BASE_ORIGIN: &str = "https://baike.baidu.com";

/// Phrase that opens the access-date annotation of a reference item
pub const CITATION_DATE_MARKER: &str = "引用日期";

/// Bullet glyph rendered in front of table-of-contents entries
pub const TOC_BULLET: char = '▪';

/// Tag of inline citation-marker elements
pub const CITATION_MARKER_TAG: &str = "sup";

/// Maximum number of characters between two citation groups that still
/// belong to the same cluster (`[262] [411]` has a gap of one)
pub const CITATION_ADJACENCY_GAP: usize = 3;

/// Widest citation range expanded inline. `[1-100000]` is left literal
/// rather than exploding into a hundred thousand numbers.
pub const MAX_CITATION_RANGE_SPAN: u64 = 1000;

/// Maximum HTML input size (10 MB)
///
/// Matches the ceiling the markdown pipeline applies to whole pages.
pub const MAX_HTML_SIZE: usize = 10 * 1024 * 1024;

/// Maximum columns kept per extracted table, also the colspan clamp
pub const MAX_TABLE_COLUMNS: usize = 100;

/// Maximum rows kept per extracted table
pub const MAX_TABLE_ROWS: usize = 1000;

/// Deepest table-of-contents level; deeper `levelN` classes are clamped
/// here at extraction and again when indenting Markdown
pub const MAX_TOC_LEVEL: u32 = 6;

// ============================================================================
// Default anchor class names
// ============================================================================

pub const TITLE_CLASS: &str = "J-lemma-title";
pub const SHORT_DESCRIPTION_CLASS: &str = "lemmaDescText_nFmCD";
pub const SHORT_DESCRIPTION_ID: &str = "lemmaDesc";
pub const ABSTRACT_CLASS: &str = "lemmaSummary_yKMC1";
pub const INFO_PANEL_CLASS: &str = "J-basic-info";
pub const INFO_ITEM_CLASS: &str = "itemWrapper_ZNZh3";
pub const INFO_NAME_CLASS: &str = "itemName_LS0Jv";
pub const INFO_VALUE_CLASS: &str = "itemValue_AYbkR";
pub const TOC_CLASS: &str = "catalogList_MR9Nd";
pub const CONTENT_CLASS: &str = "J-lemma-content";
pub const REFERENCE_SECTION_CLASS: &str = "lemmaReference_Dc3xe";
pub const REFERENCE_SECTION_PREFIX: &str = "lemmaReference";
pub const REFERENCE_LIST_PREFIX: &str = "referenceList";
pub const REFERENCE_LINK_PREFIX: &str = "refLink";

// ============================================================================
// Content block signatures
// ============================================================================

pub const HEADING_CLASS: &str = "paraTitle_WslP_";
pub const HEADING_LEVEL_PREFIX: &str = "level-";
pub const PARAGRAPH_CLASS: &str = "content_pzMvr";
pub const ORDERED_LIST_CLASS: &str = "ordered_PAfTw";
pub const UNORDERED_LIST_CLASS: &str = "unordered_ev4ae";
pub const TABLE_MODULE_ATTR: &str = "data-module-type";
pub const TABLE_MODULE_VALUE: &str = "table";
