//! Output rendering for extracted documents

// Module declarations
mod export;
mod markdown_renderer;

// Re-export public API from export module
pub use export::DocumentExport;

// Re-export public API from markdown_renderer module
pub use markdown_renderer::{RenderedMarkdown, render_both, render_markdown, render_table};
