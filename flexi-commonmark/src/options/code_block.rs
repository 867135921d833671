//! Options accepted by fenced code blocks.
use std::fmt;

use serde::{
  Deserialize,
  Deserializer,
  Serialize,
  de::{self, SeqAccess, Visitor, value::SeqAccessDeserializer},
};

use crate::ranges::{LineNumberRange, LineRange};

/// Line numbering requested for a code block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LineNumbers {
  /// `true` numbers every line from 1, `false` disables numbering.
  Enabled(bool),
  /// Explicit ranges of numbered lines.
  Ranges(Vec<LineNumberRange>),
}

impl<'de> Deserialize<'de> for LineNumbers {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    struct LineNumbersVisitor;

    impl<'de> Visitor<'de> for LineNumbersVisitor {
      type Value = LineNumbers;

      fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a boolean or a list of line number ranges")
      }

      fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
      where
        E: de::Error,
      {
        Ok(LineNumbers::Enabled(value))
      }

      fn visit_seq<A>(self, seq: A) -> Result<Self::Value, A::Error>
      where
        A: SeqAccess<'de>,
      {
        Vec::deserialize(SeqAccessDeserializer::new(seq))
          .map(LineNumbers::Ranges)
      }
    }

    deserializer.deserialize_any(LineNumbersVisitor)
  }
}

/// Options for a single fenced code block, usually read from the options
/// block preceding it.
///
/// # Examples
///
/// ```
/// use flexi_commonmark::options::{CodeBlockOptions, LineNumbers};
///
/// let options: CodeBlockOptions = serde_json::from_str(
///   r#"{"title": "main.rs", "lineNumbers": true, "highlightedLines": [{"start": 2}]}"#,
/// )
/// .unwrap();
/// assert_eq!(options.title.as_deref(), Some("main.rs"));
/// assert_eq!(options.line_numbers, Some(LineNumbers::Enabled(true)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CodeBlockOptions {
  /// Caption rendered above the code.
  pub title: Option<String>,

  /// Language of the code, overriding the fence's info string.
  pub language: Option<String>,

  /// Prefix for generated class names, overriding the processor's.
  pub class_prefix: Option<String>,

  /// Line numbering. When absent, the processor's default applies.
  pub line_numbers: Option<LineNumbers>,

  /// Lines to highlight, in ascending order.
  pub highlighted_lines: Vec<LineRange>,
}

impl CodeBlockOptions {
  /// Resolve the line number ranges to apply to `num_lines` lines of code.
  ///
  /// Numbering every line is expressed as a single range covering the whole
  /// text and starting at display number 1. Empty code gets no ranges so
  /// that there is nothing to validate.
  #[must_use]
  pub fn line_number_ranges(
    &self,
    number_by_default: bool,
    num_lines: usize,
  ) -> Vec<LineNumberRange> {
    if num_lines == 0 {
      return Vec::new();
    }

    match &self.line_numbers {
      Some(LineNumbers::Ranges(ranges)) => ranges.clone(),
      Some(LineNumbers::Enabled(true)) => vec![LineNumberRange::full()],
      Some(LineNumbers::Enabled(false)) => Vec::new(),
      None if number_by_default => vec![LineNumberRange::full()],
      None => Vec::new(),
    }
  }

  /// Language to render, preferring the explicit option over the first word
  /// of the fence's info string.
  #[must_use]
  pub fn language<'a>(&'a self, info: &'a str) -> Option<&'a str> {
    self
      .language
      .as_deref()
      .or_else(|| info.split_whitespace().next())
      .filter(|lang| !lang.is_empty())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults() {
    let options: CodeBlockOptions =
      serde_json::from_str("{}").expect("valid JSON");
    assert_eq!(options, CodeBlockOptions::default());
    assert!(options.line_number_ranges(false, 3).is_empty());
    assert_eq!(options.line_number_ranges(true, 3), vec![
      LineNumberRange::full()
    ]);
  }

  #[test]
  fn test_unknown_fields_are_ignored() {
    let options: CodeBlockOptions =
      serde_json::from_str(r#"{"copyIcon": "<svg/>", "title": "t"}"#)
        .expect("valid JSON");
    assert_eq!(options.title.as_deref(), Some("t"));
  }

  #[test]
  fn test_line_numbers_ranges() {
    let options: CodeBlockOptions = serde_json::from_str(
      r#"{"lineNumbers": [{"start": 1, "end": 3, "startLineNumber": 10}, {"start": 5}]}"#,
    )
    .expect("valid JSON");

    let ranges = options.line_number_ranges(false, 8);
    assert_eq!(ranges, vec![
      LineNumberRange::new(1, 3, 10).expect("valid range"),
      LineNumberRange::new(5, -1, 1).expect("valid range"),
    ]);
  }

  #[test]
  fn test_line_numbers_disabled_overrides_default() {
    let options: CodeBlockOptions =
      serde_json::from_str(r#"{"lineNumbers": false}"#).expect("valid JSON");
    assert!(options.line_number_ranges(true, 3).is_empty());
  }

  #[test]
  fn test_empty_code_has_no_ranges() {
    let options = CodeBlockOptions {
      line_numbers: Some(LineNumbers::Enabled(true)),
      ..Default::default()
    };
    assert!(options.line_number_ranges(true, 0).is_empty());
  }

  #[test]
  fn test_invalid_line_numbers() {
    let err = serde_json::from_str::<CodeBlockOptions>(r#"{"lineNumbers": 3}"#)
      .expect_err("numbers are not accepted");
    assert!(err.to_string().contains("a boolean or a list"));

    let err = serde_json::from_str::<CodeBlockOptions>(
      r#"{"lineNumbers": [{"start": 4, "end": 2}]}"#,
    )
    .expect_err("reversed range");
    assert!(err.to_string().contains("precedes"));
  }

  #[test]
  fn test_language() {
    let options = CodeBlockOptions::default();
    assert_eq!(options.language("rust ignore"), Some("rust"));
    assert_eq!(options.language(""), None);

    let options = CodeBlockOptions {
      language: Some("toml".to_string()),
      ..Default::default()
    };
    assert_eq!(options.language("ini"), Some("toml"));
  }
}
