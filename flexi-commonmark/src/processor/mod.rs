//! Markdown processing.
//!
//! # Architecture
//!
//! - [`core`]: Main processor implementation and processing pipeline
//! - [`code_block`]: Rendering of fenced code blocks with their options
//! - [`process`]: High-level processing functions
//! - [`error`]: Errors raised while rendering
//! - [`types`]: Core type definitions and configuration structures
pub mod code_block;
pub mod core;
pub mod error;
pub mod process;
pub mod types;

pub use code_block::render_code_block;
pub use error::{ProcessorError, ProcessorResult};
pub use process::{
  ProcessorPreset,
  create_processor,
  process_batch,
  process_markdown_file,
  process_markdown_string,
};
pub use types::{MarkdownOptions, MarkdownOptionsBuilder, MarkdownProcessor};

pub use self::core::ProcessorFeature;
