//! # flexi-commonmark - Line numbers, highlights and options for code blocks
//!
//! A `CommonMark` processor whose fenced code blocks can number and highlight
//! ranges of their lines. A code block is configured by the options block
//! preceding it: a line starting with `o{` followed by a JSON object.
//!
//! ## Quick Start
//!
//! ```rust
//! use flexi_commonmark::{MarkdownOptions, MarkdownProcessor};
//!
//! let processor = MarkdownProcessor::new(MarkdownOptions::default());
//! let markdown = r#"o{"lineNumbers": true, "highlightedLines": [{"start": 2, "end": 2}]}
//! ~~~rust
//! let a = 1;
//! let b = 2;
//! ~~~
//! "#;
//!
//! let result = processor.render(markdown).unwrap();
//! assert!(result.html.contains(r#"<span class="line highlight">"#));
//! assert_eq!(result.annotated_code_blocks, 1);
//! ```
//!
//! ## Line ranges
//!
//! Ranges are inclusive and 1-based. Negative endpoints count from the end of
//! the code block, so `{"start": 2, "end": -2}` covers every line but the
//! first and the last. See [`ranges`] for the types and their validation.
//!
//! ## Building blocks
//!
//! The pieces behind the processor are usable on their own:
//!
//! - [`ranges`]: line ranges, line number ranges and their validation
//! - [`embellish`]: wrapping lines of text in numbering and highlight markup
//! - [`options`]: options block extraction and the options code blocks accept
//! - [`utils`]: class name helpers and code fence tracking
pub mod embellish;
pub mod options;
pub mod processor;
pub mod ranges;
mod types;
pub mod utils;

pub use crate::{
  processor::{
    MarkdownOptions,
    MarkdownOptionsBuilder,
    MarkdownProcessor,
    ProcessorError,
    ProcessorResult,
  },
  types::MarkdownResult,
};
