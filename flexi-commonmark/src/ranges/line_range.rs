//! Line ranges with forward and backward addressing.
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{RangeError, RangeKind, RangeResult};

/// Where a line falls relative to a normalized range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelativePosition {
  /// The line comes before the range's first line.
  Before,
  /// The line is one of the range's lines.
  Within,
  /// The line comes after the range's last line.
  After,
}

/// A line range resolved against a concrete line count.
///
/// Both endpoints are absolute, 1-based and inclusive, with
/// `1 <= start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NormalizedRange {
  pub start: usize,
  pub end:   usize,
}

impl NormalizedRange {
  /// Check if `line` lies within the range.
  #[must_use]
  pub const fn contains(&self, line: usize) -> bool {
    self.start <= line && line <= self.end
  }

  /// Check if the two ranges share at least one line.
  #[must_use]
  pub fn overlaps(&self, other: &Self) -> bool {
    self.start.max(other.start) <= self.end.min(other.end)
  }

  /// Number of lines covered by the range.
  #[must_use]
  pub const fn len(&self) -> usize {
    self.end - self.start + 1
  }

  /// Classify `line` relative to the range.
  #[must_use]
  pub const fn position_of(&self, line: usize) -> RelativePosition {
    if line < self.start {
      RelativePosition::Before
    } else if line > self.end {
      RelativePosition::After
    } else {
      RelativePosition::Within
    }
  }
}

impl From<NormalizedRange> for (usize, usize) {
  fn from(range: NormalizedRange) -> Self {
    (range.start, range.end)
  }
}

/// An inclusive span of lines.
///
/// Positive endpoints are 1-based line numbers counted from the first line.
/// Negative endpoints count from the end, so `-1` is the last line and `-2`
/// the one before it. Zero is never a valid endpoint.
///
/// # Examples
///
/// ```
/// use flexi_commonmark::ranges::LineRange;
///
/// let range = LineRange::new(2, -1).unwrap();
/// let normalized = range.normalize(10).unwrap();
/// assert_eq!((normalized.start, normalized.end), (2, 10));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawLineRange", into = "RawLineRange")]
pub struct LineRange {
  start: isize,
  end:   isize,
}

impl LineRange {
  /// Create a new line range.
  ///
  /// # Errors
  ///
  /// Returns an error if either endpoint is zero, or if both endpoints have
  /// the same sign and `end` precedes `start`.
  pub fn new(start: isize, end: isize) -> RangeResult<Self> {
    if start == 0 || end == 0 {
      return Err(RangeError::ZeroEndpoint { start, end });
    }
    // Mixed signs can only be compared once the line count is known.
    if (start > 0) == (end > 0) && end < start {
      return Err(RangeError::Reversed { start, end });
    }
    Ok(Self { start, end })
  }

  /// The range covering every line.
  #[must_use]
  pub const fn full() -> Self {
    Self { start: 1, end: -1 }
  }

  /// The raw start endpoint.
  #[must_use]
  pub const fn start(&self) -> isize {
    self.start
  }

  /// The raw end endpoint.
  #[must_use]
  pub const fn end(&self) -> isize {
    self.end
  }

  /// Resolve both endpoints against `num_lines` lines.
  ///
  /// # Errors
  ///
  /// Returns [`RangeError::OutOfBounds`] if the resolved range does not fit
  /// within `1..=num_lines` or ends before it starts.
  pub fn normalize(&self, num_lines: usize) -> RangeResult<NormalizedRange> {
    self.normalize_as(RangeKind::Line, num_lines)
  }

  pub(crate) fn normalize_as(
    &self,
    kind: RangeKind,
    num_lines: usize,
  ) -> RangeResult<NormalizedRange> {
    let out_of_bounds = || {
      RangeError::OutOfBounds {
        kind,
        range: self.to_string(),
        num_lines,
      }
    };

    let start = resolve(self.start, num_lines).ok_or_else(out_of_bounds)?;
    let end = match self.end {
      0 => num_lines,
      end => resolve(end, num_lines).ok_or_else(out_of_bounds)?,
    };

    if start < 1 || start > num_lines || end < start || end > num_lines {
      return Err(out_of_bounds());
    }

    Ok(NormalizedRange { start, end })
  }

  /// Classify `line` relative to this range once normalized against
  /// `num_lines`.
  ///
  /// # Errors
  ///
  /// Returns an error if the range cannot be normalized.
  pub fn relative_position(
    &self,
    line: usize,
    num_lines: usize,
  ) -> RangeResult<RelativePosition> {
    Ok(self.normalize(num_lines)?.position_of(line))
  }

  /// Check if `line` lies within this range once normalized against
  /// `num_lines`.
  ///
  /// # Errors
  ///
  /// Returns an error if the range cannot be normalized.
  pub fn contains(&self, line: usize, num_lines: usize) -> RangeResult<bool> {
    Ok(self.normalize(num_lines)?.contains(line))
  }
}

impl Default for LineRange {
  fn default() -> Self {
    Self::full()
  }
}

impl fmt::Display for LineRange {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "[{}, {}]", self.start, self.end)
  }
}

/// Resolve a nonzero endpoint to an absolute line number, `-k` mapping to
/// `num_lines - k + 1`. Returns `None` when a backward endpoint reaches past
/// the first line.
const fn resolve(value: isize, num_lines: usize) -> Option<usize> {
  if value > 0 {
    Some(value.unsigned_abs())
  } else {
    num_lines.checked_sub(value.unsigned_abs() - 1)
  }
}

#[derive(Serialize, Deserialize)]
#[serde(default)]
struct RawLineRange {
  #[serde(alias = "startLine")]
  start: isize,
  #[serde(alias = "endLine")]
  end:   isize,
}

impl Default for RawLineRange {
  fn default() -> Self {
    Self { start: 1, end: -1 }
  }
}

impl TryFrom<RawLineRange> for LineRange {
  type Error = RangeError;

  fn try_from(raw: RawLineRange) -> Result<Self, Self::Error> {
    Self::new(raw.start, raw.end)
  }
}

impl From<LineRange> for RawLineRange {
  fn from(range: LineRange) -> Self {
    Self {
      start: range.start,
      end:   range.end,
    }
  }
}
