//! Error types for line range construction and validation.

use std::fmt;

/// Result type for line range operations.
pub type RangeResult<T> = Result<T, RangeError>;

/// The kind of range a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeKind {
  /// A plain line range, not yet attached to a purpose.
  Line,
  /// A range assigning display numbers to lines.
  LineNumber,
  /// A range of highlighted lines.
  Highlight,
}

impl fmt::Display for RangeKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Line => f.write_str("line range"),
      Self::LineNumber => f.write_str("line number range"),
      Self::Highlight => f.write_str("highlighted line range"),
    }
  }
}

/// Errors that can occur when defining or validating line ranges.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
  #[error(
    "Line range endpoints must be nonzero, got start {start} and end {end}"
  )]
  ZeroEndpoint { start: isize, end: isize },

  #[error("Line range end {end} precedes its start {start}")]
  Reversed { start: isize, end: isize },

  #[error("Start line number must be at least 1, got {0}")]
  InvalidStartLineNumber(isize),

  #[error(
    "The {kind} {range} cannot be normalized against {num_lines} line(s)"
  )]
  OutOfBounds {
    kind:      RangeKind,
    range:     String,
    num_lines: usize,
  },

  #[error("The {kind}s {first} and {second} overlap")]
  Overlap {
    kind:   RangeKind,
    first:  String,
    second: String,
  },

  #[error("The line numbers assigned by {first} and {second} overlap")]
  LineNumberOverlap { first: String, second: String },

  #[error(
    "The {kind}s must be in ascending order, but {second} starts before \
     {first}"
  )]
  OutOfOrder {
    kind:   RangeKind,
    first:  String,
    second: String,
  },
}

impl RangeError {
  /// Whether this error was raised while constructing a range, as opposed to
  /// validating it against a concrete line count.
  #[must_use]
  pub const fn is_definition_error(&self) -> bool {
    matches!(
      self,
      Self::ZeroEndpoint { .. }
        | Self::Reversed { .. }
        | Self::InvalidStartLineNumber(_)
    )
  }

  /// Whether this error reports two ranges of the same kind conflicting.
  #[must_use]
  pub const fn is_overlap_error(&self) -> bool {
    matches!(
      self,
      Self::Overlap { .. }
        | Self::LineNumberOverlap { .. }
        | Self::OutOfOrder { .. }
    )
  }
}
