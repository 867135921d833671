//! Per-line decoration of code with display numbers and highlights.
//!
//! Each line becomes
//!
//! ```html
//! <span class="line highlight"><span class="line-number">7</span><span class="line-text">...</span></span>
//! ```
//!
//! where the `highlight` class and the number element are only present when
//! the line is highlighted or numbered. Text is inserted verbatim, so callers
//! escape it first.
use std::borrow::Cow;

use crate::{
  ranges::{LineNumberRange, LineRange, RangeResult, validate_ranges},
  utils::class_name,
};

/// Class names used for a single line, with the prefix already applied.
struct LineClasses {
  line:             String,
  highlighted_line: String,
  number:           String,
  text:             String,
}

impl LineClasses {
  fn new(prefix: Option<&str>) -> Self {
    let line = class_name(prefix, "line");
    let highlighted_line =
      format!("{line} {}", class_name(prefix, "highlight"));
    Self {
      line,
      highlighted_line,
      number: class_name(prefix, "line-number"),
      text: class_name(prefix, "line-text"),
    }
  }

  fn write_line(
    &self,
    out: &mut String,
    text: &str,
    number: Option<usize>,
    highlighted: bool,
  ) {
    out.push_str("<span class=\"");
    out.push_str(if highlighted {
      &self.highlighted_line
    } else {
      &self.line
    });
    out.push_str("\">");

    if let Some(number) = number {
      out.push_str(&format!(
        "<span class=\"{}\">{number}</span>",
        self.number
      ));
    }

    out.push_str("<span class=\"");
    out.push_str(&self.text);
    out.push_str("\">");
    out.push_str(text);
    out.push_str("</span></span>");
  }
}

/// Strip a single trailing `\n` or `\r\n` from `text`.
#[must_use]
pub fn strip_line_ending(text: &str) -> &str {
  text
    .strip_suffix('\n')
    .map_or(text, |rest| rest.strip_suffix('\r').unwrap_or(rest))
}

/// Split `text` into its physical lines.
///
/// Lines end at `\n` or `\r\n`. Only the final line ending is a terminator,
/// so blank lines before it are kept, and `"a\n\n"` has two lines. Empty text
/// has none.
#[must_use]
pub fn physical_lines(text: &str) -> Vec<&str> {
  if text.is_empty() {
    return Vec::new();
  }
  strip_line_ending(text)
    .split('\n')
    .map(|line| line.strip_suffix('\r').unwrap_or(line))
    .collect()
}

/// Wrap every line of `text` in markup carrying its display number and
/// highlight state.
///
/// Lines are split as by [`physical_lines`] and rejoined with `\n`. When both
/// range collections are empty, `text` is returned as is without validation.
///
/// # Arguments
///
/// * `text` - The (already escaped) text to decorate
/// * `number_ranges` - Ranges of lines to number, in ascending order
/// * `highlight_ranges` - Ranges of lines to highlight, in ascending order
/// * `class_prefix` - Prefix for every class name, ignored when blank
///
/// # Errors
///
/// Returns an error if the ranges fail validation against the number of lines
/// in `text`. Nothing is produced in that case.
///
/// # Examples
///
/// ```
/// use flexi_commonmark::{
///   embellish::embellish,
///   ranges::{LineNumberRange, LineRange},
/// };
///
/// let numbers = [LineNumberRange::new(1, -1, 1).unwrap()];
/// let html = embellish("a\nb", &numbers, &[], None).unwrap();
/// assert!(html.starts_with(r#"<span class="line"><span class="line-number">1</span>"#));
/// ```
pub fn embellish<'a>(
  text: &'a str,
  number_ranges: &[LineNumberRange],
  highlight_ranges: &[LineRange],
  class_prefix: Option<&str>,
) -> RangeResult<Cow<'a, str>> {
  if number_ranges.is_empty() && highlight_ranges.is_empty() {
    return Ok(Cow::Borrowed(text));
  }

  let lines = physical_lines(text);
  let ranges = validate_ranges(number_ranges, highlight_ranges, lines.len())?;
  log::trace!(
    "Embellishing {} line(s) with {} line number range(s) and {} highlight \
     range(s)",
    lines.len(),
    ranges.line_numbers.len(),
    ranges.highlights.len()
  );

  let classes = LineClasses::new(class_prefix);
  let mut output = String::with_capacity(text.len() + lines.len() * 96);

  for (index, line) in lines.iter().enumerate() {
    let line_number = index + 1;
    let number = ranges.line_number(line_number);
    let highlighted = ranges.is_highlighted(line_number);

    if index > 0 {
      output.push('\n');
    }
    classes.write_line(&mut output, line, number, highlighted);
  }

  Ok(Cow::Owned(output))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ranges::RangeError;

  fn numbered(start: isize, end: isize, number: isize) -> LineNumberRange {
    LineNumberRange::new(start, end, number).expect("valid range")
  }

  fn lines(start: isize, end: isize) -> LineRange {
    LineRange::new(start, end).expect("valid range")
  }

  #[test]
  fn test_identity_without_ranges() {
    let text = "line 1\r\nline 2\n";
    let result = embellish(text, &[], &[], Some("x-")).expect("no validation");
    assert!(matches!(result, Cow::Borrowed(_)));
    assert_eq!(result, text);
  }

  #[test]
  fn test_numbers_and_highlights() {
    let result = embellish(
      "line 1\nline 2\nline 3",
      &[numbered(1, 2, 1)],
      &[lines(2, 2)],
      None,
    )
    .expect("ranges are valid");

    let expected = [
      r#"<span class="line"><span class="line-number">1</span><span class="line-text">line 1</span></span>"#,
      r#"<span class="line highlight"><span class="line-number">2</span><span class="line-text">line 2</span></span>"#,
      r#"<span class="line"><span class="line-text">line 3</span></span>"#,
    ]
    .join("\n");
    assert_eq!(result, expected);
  }

  #[test]
  fn test_class_prefix() {
    let result = embellish("a", &[], &[lines(1, 1)], Some("flexi-"))
      .expect("ranges are valid");
    assert_eq!(
      result,
      r#"<span class="flexi-line flexi-highlight"><span class="flexi-line-text">a</span></span>"#
    );

    let blank = embellish("a", &[], &[lines(1, 1)], Some(" "))
      .expect("ranges are valid");
    assert!(blank.starts_with(r#"<span class="line highlight">"#));
  }

  #[test]
  fn test_multiple_ranges_with_gaps() {
    let text = "a\nb\nc\nd\ne\nf";
    let result = embellish(
      text,
      &[numbered(1, 2, 1), numbered(5, -1, 20)],
      &[lines(1, 1), lines(-2, -2)],
      None,
    )
    .expect("ranges are valid");
    let rendered: Vec<&str> = result.lines().collect();

    assert_eq!(rendered.len(), 6);
    assert!(rendered[0].contains(r#"class="line highlight""#));
    assert!(rendered[1].contains(">2</span>"));
    assert!(!rendered[2].contains("line-number"));
    assert!(!rendered[3].contains("line-number"));
    assert!(rendered[4].contains(r#"class="line highlight""#));
    assert!(rendered[4].contains(">20</span>"));
    assert!(rendered[5].contains(">21</span>"));
    assert!(!rendered[5].contains("highlight"));
  }

  #[test]
  fn test_crlf_and_empty_lines() {
    let result = embellish("a\r\n\r\nb\r\n", &[numbered(1, -1, 1)], &[], None)
      .expect("ranges are valid");
    let rendered: Vec<&str> = result.lines().collect();
    assert_eq!(rendered.len(), 3);
    assert_eq!(
      rendered[1],
      r#"<span class="line"><span class="line-number">2</span><span class="line-text"></span></span>"#
    );
    assert!(!result.contains('\r'));
  }

  #[test]
  fn test_blank_last_line_is_kept() {
    assert_eq!(physical_lines("a\n\n"), ["a", ""]);
    assert_eq!(physical_lines("a\r\n\r\n"), ["a", ""]);
    assert_eq!(physical_lines("\n"), [""]);
    assert!(physical_lines("").is_empty());

    let result =
      embellish("a\n\n", &[numbered(-1, -1, 7)], &[lines(2, 2)], None)
        .expect("line 2 exists");
    assert_eq!(
      result.lines().nth(1),
      Some(
        r#"<span class="line highlight"><span class="line-number">7</span><span class="line-text"></span></span>"#
      )
    );
  }

  #[test]
  fn test_strip_line_ending() {
    assert_eq!(strip_line_ending("a\n\n"), "a\n");
    assert_eq!(strip_line_ending("a\r\n"), "a");
    assert_eq!(strip_line_ending("a"), "a");
  }

  #[test]
  fn test_invalid_ranges_fail() {
    let err = embellish("a\nb\nc", &[numbered(4, -1, 1)], &[], None)
      .expect_err("line 4 does not exist");
    assert!(matches!(err, RangeError::OutOfBounds { num_lines: 3, .. }));

    let err = embellish("a\nb\nc", &[], &[lines(1, 2), lines(2, 3)], None)
      .expect_err("line 2 is shared");
    assert!(err.is_overlap_error());
  }
}
