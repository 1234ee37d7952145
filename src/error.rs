//! Error types for document extraction
//!
//! Only page-level failures surface as `Err`. Missing sections, malformed
//! spans and skipped children are absorbed by the extractors and reported
//! through [`crate::extract_events::ExtractionObserver`] with an [`ErrorKind`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for extraction operations
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Page-level extraction errors
#[derive(Debug, Clone, Error)]
pub enum ExtractError {
    /// The page body was empty or whitespace only
    #[error("Empty HTML input")]
    EmptyInput,

    /// The page exceeds the configured size ceiling
    #[error("HTML input too large: {size} bytes (limit {limit})")]
    InputTooLarge { size: usize, limit: usize },

    /// Neither the title nor the abstract anchor exists (strict mode only)
    #[error("Page is not an encyclopedia entry: no title or abstract found")]
    NotAnEntryPage,

    /// Unexpected structure while classifying a content child
    #[error("Unexpected page structure: {0}")]
    Structure(String),

    /// Export payload could not be produced
    #[error("Export failed: {0}")]
    Export(String),
}

impl From<anyhow::Error> for ExtractError {
    fn from(err: anyhow::Error) -> Self {
        // {:#} keeps the context chain
        Self::Export(format!("{err:#}"))
    }
}

impl ExtractError {
    /// Classification of this error in the extraction taxonomy
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Structure(_) => ErrorKind::ExtractionFailure,
            Self::EmptyInput | Self::InputTooLarge { .. } | Self::NotAnEntryPage | Self::Export(_) => {
                ErrorKind::PageFailure
            }
        }
    }
}

/// Taxonomy of everything that can go wrong during extraction.
///
/// All kinds except `PageFailure` are non-fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Anchor not found; resolved to an empty default
    MissingSection,
    /// Unparseable column span or citation range; left as literal
    MalformedSpan,
    /// Ordered item without a leading numeral; rendered per `RenderOptions`
    NoLeadingNumeral,
    /// A content child could not be classified; skipped
    ExtractionFailure,
    /// The whole page failed
    PageFailure,
}

impl ErrorKind {
    /// Whether processing continues past this kind of problem
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::PageFailure)
    }
}
