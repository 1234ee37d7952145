//! Configuration module for document extraction
//!
//! This module provides `ExtractConfig`, its builder, and the
//! `RenderOptions` consumed by the Markdown renderer.

// Sub-modules
pub mod builder;
pub mod types;

// Re-exports for public API
pub use builder::ExtractConfigBuilder;
pub use types::{
    AnchorSet, AnchorSpec, BlockSignatures, ExtractConfig, Matcher, RenderOptions, Signature,
};
