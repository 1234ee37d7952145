//! Fluent builder for `ExtractConfig`
//!
//! Starts from the entry-schema defaults; `build()` validates the values
//! that would otherwise fail silently deep inside an extractor.

use anyhow::{Result, anyhow};
use url::Url;

use super::types::{AnchorSet, BlockSignatures, ExtractConfig};

#[derive(Debug, Clone, Default)]
pub struct ExtractConfigBuilder {
    config: ExtractConfig,
}

impl ExtractConfig {
    /// Create a builder seeded with the default entry schema
    #[must_use]
    pub fn builder() -> ExtractConfigBuilder {
        ExtractConfigBuilder::default()
    }
}

impl ExtractConfigBuilder {
    #[must_use]
    pub fn anchors(mut self, anchors: AnchorSet) -> Self {
        self.config.anchors = anchors;
        self
    }

    #[must_use]
    pub fn block_signatures(mut self, blocks: BlockSignatures) -> Self {
        self.config.blocks = blocks;
        self
    }

    #[must_use]
    pub fn citation_marker_tag(mut self, tag: impl Into<String>) -> Self {
        self.config.citation_marker_tag = tag.into();
        self
    }

    #[must_use]
    pub fn adjacency_gap(mut self, gap: usize) -> Self {
        self.config.adjacency_gap = gap;
        self
    }

    #[must_use]
    pub fn max_range_span(mut self, span: u64) -> Self {
        self.config.max_range_span = span;
        self
    }

    #[must_use]
    pub fn base_origin(mut self, origin: impl Into<String>) -> Self {
        self.config.base_origin = origin.into();
        self
    }

    #[must_use]
    pub fn citation_date_marker(mut self, marker: impl Into<String>) -> Self {
        self.config.citation_date_marker = marker.into();
        self
    }

    #[must_use]
    pub fn toc_bullet(mut self, bullet: char) -> Self {
        self.config.toc_bullet = bullet;
        self
    }

    #[must_use]
    pub fn strip_residual_brackets(mut self, enabled: bool) -> Self {
        self.config.strip_residual_brackets = enabled;
        self
    }

    #[must_use]
    pub fn require_entry_marker(mut self, enabled: bool) -> Self {
        self.config.require_entry_marker = enabled;
        self
    }

    #[must_use]
    pub fn max_html_bytes(mut self, bytes: usize) -> Self {
        self.config.max_html_bytes = bytes;
        self
    }

    #[must_use]
    pub fn max_table_columns(mut self, columns: usize) -> Self {
        self.config.max_table_columns = columns;
        self
    }

    #[must_use]
    pub fn max_table_rows(mut self, rows: usize) -> Self {
        self.config.max_table_rows = rows;
        self
    }

    /// Validate and produce the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the base origin is not an absolute URL, the
    /// citation marker tag is empty, or a table limit is zero.
    pub fn build(self) -> Result<ExtractConfig> {
        let config = self.config;

        Url::parse(&config.base_origin)
            .map_err(|e| anyhow!("Invalid base origin '{}': {e}", config.base_origin))?;

        if config.citation_marker_tag.trim().is_empty() {
            return Err(anyhow!("Citation marker tag must not be empty"));
        }

        if config.max_table_columns == 0 || config.max_table_rows == 0 {
            return Err(anyhow!("Table limits must be greater than zero"));
        }

        Ok(config)
    }
}
