//! Validation of line number and highlight ranges against a line count.
use std::fmt::Display;

use super::{
  error::{RangeError, RangeKind, RangeResult},
  line_number_range::{LineNumberRange, NumberedSpan},
  line_range::{LineRange, NormalizedRange},
};

/// Ranges that passed validation, resolved against a concrete line count.
///
/// Both collections keep the order they were supplied in, which validation
/// guarantees is ascending and non-overlapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedRanges {
  pub line_numbers: Vec<NumberedSpan>,
  pub highlights:   Vec<NormalizedRange>,
}

impl ValidatedRanges {
  /// Check if no ranges of either kind were supplied.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.line_numbers.is_empty() && self.highlights.is_empty()
  }

  /// The display number assigned to `line`, if any.
  #[must_use]
  pub fn line_number(&self, line: usize) -> Option<usize> {
    self
      .line_numbers
      .iter()
      .find_map(|span| span.line_number(line))
  }

  /// Check if `line` is highlighted.
  #[must_use]
  pub fn is_highlighted(&self, line: usize) -> bool {
    self.highlights.iter().any(|range| range.contains(line))
  }
}

/// Validate line number ranges and highlight ranges against `num_lines`.
///
/// Each kind is checked independently: every range must normalize within
/// `1..=num_lines`, and consecutive ranges must neither overlap nor go
/// backwards. Line number ranges must additionally assign disjoint display
/// numbers. Ranges are never reordered; callers supply them sorted.
///
/// # Errors
///
/// Returns the first violation found, line number ranges first.
pub fn validate_ranges(
  number_ranges: &[LineNumberRange],
  highlight_ranges: &[LineRange],
  num_lines: usize,
) -> RangeResult<ValidatedRanges> {
  let line_numbers = number_ranges
    .iter()
    .map(|range| range.number(num_lines))
    .collect::<RangeResult<Vec<_>>>()?;
  check_sequence(
    RangeKind::LineNumber,
    number_ranges,
    &line_numbers.iter().map(|span| span.lines).collect::<Vec<_>>(),
  )?;
  check_line_numbers(number_ranges, &line_numbers)?;

  let highlights = highlight_ranges
    .iter()
    .map(|range| range.normalize_as(RangeKind::Highlight, num_lines))
    .collect::<RangeResult<Vec<_>>>()?;
  check_sequence(RangeKind::Highlight, highlight_ranges, &highlights)?;

  Ok(ValidatedRanges {
    line_numbers,
    highlights,
  })
}

/// Walk consecutive pairs in supplied order. Since each pair must be
/// ascending and disjoint, the whole sequence is.
fn check_sequence<R: Display>(
  kind: RangeKind,
  raw: &[R],
  normalized: &[NormalizedRange],
) -> RangeResult<()> {
  for (index, pair) in normalized.windows(2).enumerate() {
    let (previous, current) = (pair[0], pair[1]);
    if previous.overlaps(&current) {
      return Err(RangeError::Overlap {
        kind,
        first: raw[index].to_string(),
        second: raw[index + 1].to_string(),
      });
    }
    if current.start < previous.start {
      return Err(RangeError::OutOfOrder {
        kind,
        first: raw[index].to_string(),
        second: raw[index + 1].to_string(),
      });
    }
  }
  Ok(())
}

/// Display numbers are not required to ascend, so every pair is compared.
fn check_line_numbers(
  raw: &[LineNumberRange],
  spans: &[NumberedSpan],
) -> RangeResult<()> {
  for (i, first) in spans.iter().enumerate() {
    for (j, second) in spans.iter().enumerate().skip(i + 1) {
      if first.numbers().overlaps(&second.numbers()) {
        return Err(RangeError::LineNumberOverlap {
          first:  raw[i].to_string(),
          second: raw[j].to_string(),
        });
      }
    }
  }
  Ok(())
}
