//! Incremental detection of where a brace-delimited JSON literal ends.
//!
//! The scanner is not a JSON validator. It tracks just enough state (brace
//! depth, whether it is inside a string literal, and whether the next
//! character is escaped) to find the brace that closes the literal, even when
//! the literal spans several lines or contains braces inside strings.

/// A source of characters within a single line.
pub trait LineSource {
  /// Look at the next character without consuming it.
  fn peek(&self) -> Option<char>;

  /// Consume and return the next character.
  fn advance(&mut self) -> Option<char>;

  /// Byte offset of the next character within the line.
  fn offset(&self) -> usize;
}

/// A [`LineSource`] over a borrowed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCursor<'a> {
  line:   &'a str,
  offset: usize,
}

impl<'a> LineCursor<'a> {
  /// Create a cursor at the start of `line`.
  #[must_use]
  pub const fn new(line: &'a str) -> Self {
    Self { line, offset: 0 }
  }

  /// Create a cursor at byte `offset` of `line`.
  ///
  /// Offsets past the end of the line, or inside a multi-byte character,
  /// yield no characters.
  #[must_use]
  pub const fn at(line: &'a str, offset: usize) -> Self {
    Self { line, offset }
  }

  /// The unconsumed part of the line.
  #[must_use]
  pub fn remaining(&self) -> &'a str {
    self.line.get(self.offset..).unwrap_or_default()
  }
}

impl LineSource for LineCursor<'_> {
  fn peek(&self) -> Option<char> {
    self.remaining().chars().next()
  }

  fn advance(&mut self) -> Option<char> {
    let ch = self.peek()?;
    self.offset += ch.len_utf8();
    Some(ch)
  }

  fn offset(&self) -> usize {
    self.offset
  }
}

/// Outcome of scanning one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStatus {
  /// The literal is still open; more lines are needed.
  StillOpen,
  /// The literal closed at this byte offset of the line (the offset of the
  /// closing brace).
  ClosedAt(usize),
}

/// Scanner state carried from one line to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanState {
  open_bracket_count: usize,
  ends_in_string:     bool,
  escaped:            bool,
}

impl ScanState {
  /// Create the state for a literal that has not started yet.
  #[must_use]
  pub const fn new() -> Self {
    Self {
      open_bracket_count: 0,
      ends_in_string:     false,
      escaped:            false,
    }
  }

  /// Number of braces opened and not yet closed.
  #[must_use]
  pub const fn open_bracket_count(&self) -> usize {
    self.open_bracket_count
  }

  /// Check if the scanned text ends inside a string literal.
  #[must_use]
  pub const fn ends_in_string(&self) -> bool {
    self.ends_in_string
  }

  /// Consume characters from `source` until the literal closes or the line
  /// runs out.
  ///
  /// Returns the updated state and whether the literal closed. On
  /// [`ScanStatus::ClosedAt`] the source is left just past the closing brace
  /// and the returned state should be discarded.
  ///
  /// Inside a string, a backslash escapes the character after it unless it
  /// is itself escaped, so `"a\\"` is a complete string holding one
  /// backslash. Outside strings a backslash is an ordinary character and
  /// every brace counts.
  #[must_use]
  pub fn scan<S: LineSource>(&self, source: &mut S) -> (Self, ScanStatus) {
    let mut state = *self;

    while let Some(ch) = source.peek() {
      let offset = source.offset();
      source.advance();

      if state.escaped {
        state.escaped = false;
        continue;
      }

      match ch {
        '\\' if state.ends_in_string => state.escaped = true,
        '"' => state.ends_in_string = !state.ends_in_string,
        '{' if !state.ends_in_string => state.open_bracket_count += 1,
        '}' if !state.ends_in_string && state.open_bracket_count > 0 => {
          state.open_bracket_count -= 1;
          if state.open_bracket_count == 0 {
            return (state, ScanStatus::ClosedAt(offset));
          }
        },
        _ => {},
      }
    }

    (state, ScanStatus::StillOpen)
  }
}
