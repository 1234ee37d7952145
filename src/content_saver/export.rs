//! Serializable export payload: the document plus both Markdown renderings.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::markdown_renderer::{RenderedMarkdown, render_both};
use crate::config::RenderOptions;
use crate::page_extractor::schema::Document;

/// Document fields with the rendered Markdown under `markdown_content`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentExport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub extracted_at: DateTime<Utc>,
    #[serde(flatten)]
    pub document: Document,
    pub markdown_content: RenderedMarkdown,
}

impl DocumentExport {
    /// Render both variants and stamp the current time
    #[must_use]
    pub fn new(url: Option<String>, document: Document, options: &RenderOptions) -> Self {
        Self::with_timestamp(url, document, options, Utc::now())
    }

    #[must_use]
    pub fn with_timestamp(
        url: Option<String>,
        document: Document,
        options: &RenderOptions,
        extracted_at: DateTime<Utc>,
    ) -> Self {
        let markdown_content = render_both(&document, options);
        Self { url, extracted_at, document, markdown_content }
    }

    /// Pretty-printed JSON
    pub fn to_json_string(&self) -> Result<String> {
        let json = serde_json::to_string_pretty(self).with_context(|| {
            format!(
                "Failed to serialize export for {}",
                self.url.as_deref().unwrap_or(&self.document.title)
            )
        })?;
        log::debug!("Serialized export ({} bytes) for {:?}", json.len(), self.url);
        Ok(json)
    }

    /// Parse a payload produced by [`Self::to_json_string`]
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse document export JSON")
    }
}
