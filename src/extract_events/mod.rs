//! Diagnostic events for extraction
//!
//! Extractors report missing sections, malformed spans and skipped
//! children through an injected observer rather than logging inline.

// Sub-modules
pub mod observer;
pub mod types;

// Re-exports for public API
pub use observer::{ExtractionObserver, NoopObserver, RecordingObserver, TracingObserver};
pub use types::ExtractionEvent;
