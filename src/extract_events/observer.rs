//! Observers receiving extraction diagnostics.
//!
//! Extractors stay pure with respect to their return values: everything
//! worth logging is handed to an `ExtractionObserver` instead.

use parking_lot::Mutex;

use super::types::ExtractionEvent;

/// Receiver of diagnostic events. Must be shareable across the batch
/// worker threads.
pub trait ExtractionObserver: Send + Sync {
    fn on_event(&self, event: &ExtractionEvent);
}

/// Forwards events to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ExtractionObserver for TracingObserver {
    fn on_event(&self, event: &ExtractionEvent) {
        match event {
            ExtractionEvent::SectionMissing { anchor } => {
                tracing::debug!(anchor = %anchor, "Section not found, using empty default");
            }
            ExtractionEvent::MalformedSpan { context, token } => {
                tracing::debug!(context = %context, token = %token, "Malformed span left literal");
            }
            ExtractionEvent::ChildSkipped { index, reason } => {
                tracing::warn!(index, reason = %reason, "Skipped content child");
            }
            ExtractionEvent::UnnumberedOrderedItem { text } => {
                tracing::debug!(text = %text, "Ordered item without leading numeral");
            }
            ExtractionEvent::CitationsMerged { markers } => {
                tracing::trace!(markers, "Normalized citation markers");
            }
            ExtractionEvent::TableExtracted { columns, rows } => {
                tracing::debug!(columns, rows, "Extracted table");
            }
            ExtractionEvent::ReferencesExtracted { count } => {
                tracing::debug!(count, "Extracted references");
            }
            ExtractionEvent::ReferencesSynthesized { count } => {
                tracing::info!(count, "Synthesized placeholder references from citation numbers");
            }
            ExtractionEvent::PageFailed { url, reason } => {
                tracing::error!(url = ?url, reason = %reason, "Page extraction failed");
            }
        }
    }
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ExtractionObserver for NoopObserver {
    fn on_event(&self, _event: &ExtractionEvent) {}
}

/// Keeps every event for later inspection
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<ExtractionEvent>>,
}

impl RecordingObserver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events received so far
    #[must_use]
    pub fn events(&self) -> Vec<ExtractionEvent> {
        self.events.lock().clone()
    }

    /// Drain the recorded events
    pub fn take(&self) -> Vec<ExtractionEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    /// Number of recorded events matching a predicate
    pub fn count_where(&self, predicate: impl Fn(&ExtractionEvent) -> bool) -> usize {
        self.events.lock().iter().filter(|e| predicate(e)).count()
    }
}

impl ExtractionObserver for RecordingObserver {
    fn on_event(&self, event: &ExtractionEvent) {
        self.events.lock().push(event.clone());
    }
}
