//! Structured extraction of encyclopedia entry pages.
//!
//! A rendered entry page is turned into a [`Document`] holding every body
//! text twice: once with citation markers stripped and once with the markers
//! merged into canonical bracket groups. The document can then be rendered
//! to Markdown in either variant or exported as JSON.
//!
//! ```
//! use lemma_extract::{ExtractConfig, RenderOptions, TracingObserver, Variant};
//!
//! let html = r#"<h1 class="J-lemma-title">Example Corp</h1>
//!     <div class="J-lemma-content">
//!         <div class="content_pzMvr">Founded<sup>[1]</sup> <sup>[2]</sup> in 1987.</div>
//!     </div>"#;
//!
//! let doc = lemma_extract::extract_document(html, &ExtractConfig::default(), &TracingObserver)?;
//! let md = lemma_extract::render_markdown(&doc, Variant::Annotated, &RenderOptions::default());
//! assert!(md.contains("Founded[1, 2] in 1987."));
//! # Ok::<(), lemma_extract::ExtractError>(())
//! ```

pub mod config;
pub mod content_saver;
pub mod error;
pub mod extract_events;
pub mod page_extractor;
pub mod utils;

pub use config::{ExtractConfig, ExtractConfigBuilder, RenderOptions};
pub use content_saver::{DocumentExport, RenderedMarkdown, render_both, render_markdown};
pub use error::{ErrorKind, ExtractError, ExtractResult};
pub use extract_events::{
    ExtractionEvent, ExtractionObserver, NoopObserver, RecordingObserver, TracingObserver,
};
pub use page_extractor::schema::*;
pub use page_extractor::{
    CitationNormalizer, CitationRules, PageInput, PageOutcome, extract_batch, extract_document,
};
