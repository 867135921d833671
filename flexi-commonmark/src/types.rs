//! Types for flexi-commonmark public API and internal use.
use serde::{Deserialize, Serialize};

/// Result of Markdown processing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MarkdownResult {
  /// Rendered HTML output.
  pub html: String,

  /// Number of code blocks rendered with options from an options block.
  pub annotated_code_blocks: usize,
}
