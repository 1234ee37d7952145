//! Event type definitions for extraction diagnostics

use serde::{Deserialize, Serialize};

use crate::error::ErrorKind;

/// Diagnostic events emitted while a page is extracted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtractionEvent {
    /// A named anchor was not found; an empty default was used
    SectionMissing { anchor: String },
    /// A span or range token could not be parsed and was kept literal
    MalformedSpan { context: String, token: String },
    /// A direct child of the content container was skipped
    ChildSkipped { index: usize, reason: String },
    /// An ordered-list item has no leading `N.` numeral
    UnnumberedOrderedItem { text: String },
    /// Citation markers were found and normalized in one fragment
    CitationsMerged { markers: usize },
    /// A table module was converted into a grid
    TableExtracted { columns: usize, rows: usize },
    /// The rendered reference list produced this many entries
    ReferencesExtracted { count: usize },
    /// No reference list was available; placeholders were synthesized
    ReferencesSynthesized { count: usize },
    /// A whole page failed
    PageFailed { url: Option<String>, reason: String },
}

impl ExtractionEvent {
    /// Error classification for events that represent a problem
    #[must_use]
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::SectionMissing { .. } => Some(ErrorKind::MissingSection),
            Self::MalformedSpan { .. } => Some(ErrorKind::MalformedSpan),
            Self::ChildSkipped { .. } => Some(ErrorKind::ExtractionFailure),
            Self::UnnumberedOrderedItem { .. } => Some(ErrorKind::NoLeadingNumeral),
            Self::PageFailed { .. } => Some(ErrorKind::PageFailure),
            Self::CitationsMerged { .. }
            | Self::TableExtracted { .. }
            | Self::ReferencesExtracted { .. }
            | Self::ReferencesSynthesized { .. } => None,
        }
    }
}
