//! Error types for Markdown processing.
use std::path::PathBuf;

use crate::{options::OptionsError, ranges::RangeError};

/// Result type for Markdown processing.
pub type ProcessorResult<T> = Result<T, ProcessorError>;

/// Errors that can occur while rendering a document.
#[derive(Debug, thiserror::Error)]
pub enum ProcessorError {
  #[error(transparent)]
  Options(#[from] OptionsError),

  #[error("Invalid line ranges for code block at line {line}: {source}")]
  CodeBlock {
    line:   usize,
    #[source]
    source: RangeError,
  },

  #[error(
    "Invalid class prefix '{0}': it must start with a letter, '_' or '-' and \
     contain only letters, digits, '_' or '-'"
  )]
  InvalidClassPrefix(String),

  #[error("Failed to read {}: {source}", path.display())]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Failed to format HTML: {0}")]
  Format(#[from] std::fmt::Error),
}
