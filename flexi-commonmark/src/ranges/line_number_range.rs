//! Line ranges carrying the display number of their first line.
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{
  error::{RangeError, RangeKind, RangeResult},
  line_range::{LineRange, NormalizedRange},
};

/// A [`LineRange`] whose lines are numbered from `start_line_number`.
///
/// Display numbers need not match physical line indices. A snippet taken from
/// the middle of a file can number its lines from where they appear in the
/// file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawLineNumberRange", into = "RawLineNumberRange")]
pub struct LineNumberRange {
  range:             LineRange,
  start_line_number: usize,
}

impl LineNumberRange {
  /// Create a new line number range.
  ///
  /// # Errors
  ///
  /// Returns an error if the line range is invalid or `start_line_number` is
  /// less than 1.
  pub fn new(
    start: isize,
    end: isize,
    start_line_number: isize,
  ) -> RangeResult<Self> {
    let range = LineRange::new(start, end)?;
    Self::from_range(range, start_line_number)
  }

  /// Attach a starting display number to an existing range.
  ///
  /// # Errors
  ///
  /// Returns an error if `start_line_number` is less than 1.
  pub fn from_range(
    range: LineRange,
    start_line_number: isize,
  ) -> RangeResult<Self> {
    if start_line_number < 1 {
      return Err(RangeError::InvalidStartLineNumber(start_line_number));
    }
    Ok(Self {
      range,
      start_line_number: start_line_number.unsigned_abs(),
    })
  }

  /// Number every line, starting from 1.
  #[must_use]
  pub const fn full() -> Self {
    Self {
      range:             LineRange::full(),
      start_line_number: 1,
    }
  }

  #[must_use]
  pub const fn range(&self) -> LineRange {
    self.range
  }

  #[must_use]
  pub const fn start_line_number(&self) -> usize {
    self.start_line_number
  }

  /// Resolve the underlying line range against `num_lines` lines.
  ///
  /// # Errors
  ///
  /// Returns an error if the range does not fit within `num_lines` lines.
  pub fn normalize(&self, num_lines: usize) -> RangeResult<NormalizedRange> {
    self.range.normalize_as(RangeKind::LineNumber, num_lines)
  }

  /// Resolve the range and pair it with its starting display number.
  ///
  /// # Errors
  ///
  /// Returns an error if the range does not fit within `num_lines` lines.
  pub fn number(&self, num_lines: usize) -> RangeResult<NumberedSpan> {
    Ok(NumberedSpan {
      lines:             self.normalize(num_lines)?,
      start_line_number: self.start_line_number,
    })
  }
}

impl Default for LineNumberRange {
  fn default() -> Self {
    Self::full()
  }
}

impl fmt::Display for LineNumberRange {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} numbered from {}", self.range, self.start_line_number)
  }
}

/// A normalized line number range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NumberedSpan {
  pub lines:             NormalizedRange,
  pub start_line_number: usize,
}

impl NumberedSpan {
  /// The display number of `line`, if the span covers it.
  #[must_use]
  pub const fn line_number(&self, line: usize) -> Option<usize> {
    if self.lines.contains(line) {
      Some(self.start_line_number + (line - self.lines.start))
    } else {
      None
    }
  }

  /// The span of display numbers assigned by this range.
  #[must_use]
  pub const fn numbers(&self) -> NormalizedRange {
    NormalizedRange {
      start: self.start_line_number,
      end:   self.start_line_number + self.lines.len() - 1,
    }
  }
}

#[derive(Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawLineNumberRange {
  #[serde(alias = "startLine")]
  start:             isize,
  #[serde(alias = "endLine")]
  end:               isize,
  #[serde(alias = "startNumber")]
  start_line_number: isize,
}

impl Default for RawLineNumberRange {
  fn default() -> Self {
    Self {
      start:             1,
      end:               -1,
      start_line_number: 1,
    }
  }
}

impl TryFrom<RawLineNumberRange> for LineNumberRange {
  type Error = RangeError;

  fn try_from(raw: RawLineNumberRange) -> Result<Self, Self::Error> {
    Self::new(raw.start, raw.end, raw.start_line_number)
  }
}

impl From<LineNumberRange> for RawLineNumberRange {
  fn from(range: LineNumberRange) -> Self {
    Self {
      start:             range.range.start(),
      end:               range.range.end(),
      start_line_number: isize::try_from(range.start_line_number)
        .unwrap_or(isize::MAX),
    }
  }
}
