//! Error types for options blocks.

/// Result type for options block operations.
pub type OptionsResult<T> = Result<T, OptionsError>;

/// Errors that can occur while extracting or consuming options blocks.
///
/// Positions are 1-based and point at the opening brace of the block.
#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
  #[error(
    "Options block at line {line}, column {column} was not consumed before \
     another options block started"
  )]
  Unconsumed { line: usize, column: usize },

  #[error(
    "Options block at line {line}, column {column} was never consumed by a \
     following block"
  )]
  Orphaned { line: usize, column: usize },

  #[error(
    "Options block at line {line}, column {column} is not closed before the \
     end of input"
  )]
  Unterminated { line: usize, column: usize },

  #[error(
    "Failed to deserialize options block at line {line}, column {column}: \
     {source}"
  )]
  Deserialize {
    line:   usize,
    column: usize,
    #[source]
    source: serde_json::Error,
  },
}

impl OptionsError {
  /// Line and column of the options block the error refers to.
  #[must_use]
  pub const fn position(&self) -> (usize, usize) {
    match self {
      Self::Unconsumed { line, column }
      | Self::Orphaned { line, column }
      | Self::Unterminated { line, column }
      | Self::Deserialize { line, column, .. } => (*line, *column),
    }
  }
}
