//! Entry page extraction.
//!
//! This module turns a rendered entry page into a [`Document`]: anchor
//! lookup, citation normalization, content block classification, tables,
//! references and the fixed header sections.

// Sub-modules
pub mod citation;
pub mod content_blocks;
pub mod html_node;
pub mod node_locator;
pub mod page_data;
pub mod references;
pub mod schema;
pub mod sections;
pub mod table;

// Re-exports for public API
pub use citation::{CitationNormalizer, CitationRules, merge_citations};
pub use html_node::{HtmlNode, NodeChild};
pub use node_locator::{locate, locate_all};
pub use page_data::{PageInput, PageOutcome, extract_batch, extract_document};
pub use schema::{
    BlockKind, ContentBlock, Document, DualBlocks, DualMap, DualText, Reference, TableData,
    TocEntry, Variant,
};
