//! Recognition, accumulation and hand-off of options blocks.
//!
//! An options block is a line starting with `o{` (after at most three spaces
//! of indentation) followed by a JSON object that may continue over several
//! lines:
//!
//! ~~~markdown
//! o{
//!     "title": "main.rs",
//!     "highlightedLines": [{"start": 2, "end": 2}]
//! }
//! ```rust
//! fn main() {
//!     println!("hi");
//! }
//! ```
//! ~~~
//!
//! The block applies to the next block that consumes options. Until then it
//! waits in a [`PendingOptions`] slot owned by the caller.
use serde::de::DeserializeOwned;

use super::{
  error::{OptionsError, OptionsResult},
  scanner::{LineCursor, ScanState, ScanStatus},
};

/// Marker that opens an options block.
pub const OPTIONS_BLOCK_MARKER: &str = "o{";

/// Maximum indentation before the marker, as for other markdown blocks.
const MAX_INDENT: usize = 3;

/// Byte offset of the literal's opening brace if `line` opens an options
/// block.
fn literal_start(line: &str) -> Option<usize> {
  let indent = line.len() - line.trim_start_matches(' ').len();
  if indent > MAX_INDENT || !line[indent..].starts_with(OPTIONS_BLOCK_MARKER) {
    return None;
  }
  Some(indent + 1)
}

/// Check if `line` opens an options block.
#[must_use]
pub fn opens_options_block(line: &str) -> bool {
  literal_start(line).is_some()
}

/// A complete options block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionsBlock {
  json:   String,
  line:   usize,
  column: usize,
}

impl OptionsBlock {
  /// The JSON literal, from its opening brace through its closing brace.
  #[must_use]
  pub fn json(&self) -> &str {
    &self.json
  }

  /// Line on which the literal starts (1-based).
  #[must_use]
  pub const fn line(&self) -> usize {
    self.line
  }

  /// Column of the opening brace (1-based).
  #[must_use]
  pub const fn column(&self) -> usize {
    self.column
  }

  /// Deserialize the literal into `T`.
  ///
  /// # Errors
  ///
  /// Returns [`OptionsError::Deserialize`] carrying the block's position if
  /// the literal is not valid JSON for `T`.
  pub fn deserialize<T: DeserializeOwned>(&self) -> OptionsResult<T> {
    serde_json::from_str(&self.json).map_err(|source| {
      OptionsError::Deserialize {
        line: self.line,
        column: self.column,
        source,
      }
    })
  }
}

/// Result of feeding a line to an [`OptionsBlockBuilder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feed {
  /// The literal is still open; feed the next line.
  Pending(OptionsBlockBuilder),
  /// The literal closed on this line.
  Complete(OptionsBlock),
}

/// Accumulates the lines of an options block until its literal closes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionsBlockBuilder {
  state:  ScanState,
  json:   String,
  line:   usize,
  column: usize,
}

impl OptionsBlockBuilder {
  /// Start an options block if `line` opens one.
  ///
  /// Returns `None` if the line does not start with the options block
  /// marker. `line_number` is the 1-based line number of `line`, used for
  /// diagnostics.
  #[must_use]
  pub fn open(line: &str, line_number: usize) -> Option<Feed> {
    let start = literal_start(line)?;
    let builder = Self {
      state:  ScanState::new(),
      json:   String::new(),
      line:   line_number,
      column: start + 1,
    };
    Some(builder.consume(line, start))
  }

  /// Feed the next line of the literal.
  #[must_use]
  pub fn push_line(mut self, line: &str) -> Feed {
    self.json.push('\n');
    self.consume(line, 0)
  }

  /// Current scanner state.
  #[must_use]
  pub const fn state(&self) -> ScanState {
    self.state
  }

  /// The error to report when input ends while the literal is still open.
  #[must_use]
  pub fn unterminated(&self) -> OptionsError {
    OptionsError::Unterminated {
      line:   self.line,
      column: self.column,
    }
  }

  fn consume(mut self, line: &str, from: usize) -> Feed {
    let mut cursor = LineCursor::at(line, from);
    let (state, status) = self.state.scan(&mut cursor);

    match status {
      ScanStatus::StillOpen => {
        self.json.push_str(&line[from..]);
        self.state = state;
        log::trace!(
          "Options block at line {} still open ({} unclosed brace(s))",
          self.line,
          state.open_bracket_count()
        );
        Feed::Pending(self)
      },
      ScanStatus::ClosedAt(end) => {
        self.json.push_str(&line[from..=end]);
        let trailing = cursor.remaining().trim();
        if !trailing.is_empty() {
          log::warn!(
            "Ignoring text after options block at line {}: {trailing}",
            self.line
          );
        }
        Feed::Complete(OptionsBlock {
          json:   self.json,
          line:   self.line,
          column: self.column,
        })
      },
    }
  }
}

/// Collect a whole options block from `lines`, whose first line must open
/// it.
///
/// Returns `Ok(None)` if the first line does not open an options block.
/// Lines after the closing one are left in the iterator.
///
/// # Errors
///
/// Returns [`OptionsError::Unterminated`] if `lines` runs out before the
/// literal closes.
pub fn read_options_block<'a, I>(
  first_line_number: usize,
  lines: &mut I,
) -> OptionsResult<Option<OptionsBlock>>
where
  I: Iterator<Item = &'a str>,
{
  let Some(first) = lines.next() else {
    return Ok(None);
  };
  let Some(mut feed) = OptionsBlockBuilder::open(first, first_line_number)
  else {
    return Ok(None);
  };

  loop {
    match feed {
      Feed::Complete(block) => return Ok(Some(block)),
      Feed::Pending(builder) => {
        match lines.next() {
          Some(line) => feed = builder.push_line(line),
          None => return Err(builder.unterminated()),
        }
      },
    }
  }
}

/// Single-use slot holding the options block waiting for a consumer.
///
/// The slot is owned by whoever drives the parse, so a block left over from
/// one document can never leak into another.
#[derive(Debug, Default)]
pub struct PendingOptions {
  block: Option<OptionsBlock>,
}

impl PendingOptions {
  /// Create an empty slot.
  #[must_use]
  pub const fn new() -> Self {
    Self { block: None }
  }

  /// Check if a block is waiting to be consumed.
  #[must_use]
  pub const fn is_pending(&self) -> bool {
    self.block.is_some()
  }

  /// Store a newly completed block.
  ///
  /// # Errors
  ///
  /// Returns [`OptionsError::Unconsumed`] for the waiting block if one has
  /// not been consumed yet. The slot keeps the waiting block.
  pub fn stash(&mut self, block: OptionsBlock) -> OptionsResult<()> {
    if let Some(waiting) = &self.block {
      return Err(OptionsError::Unconsumed {
        line:   waiting.line,
        column: waiting.column,
      });
    }
    self.block = Some(block);
    Ok(())
  }

  /// Consume the waiting block, if any.
  pub fn take(&mut self) -> Option<OptionsBlock> {
    self.block.take()
  }

  /// Close the slot at the end of a document.
  ///
  /// # Errors
  ///
  /// Returns [`OptionsError::Orphaned`] if a block was never consumed.
  pub fn finish(self) -> OptionsResult<()> {
    match self.block {
      Some(block) => {
        Err(OptionsError::Orphaned {
          line:   block.line,
          column: block.column,
        })
      },
      None => Ok(()),
    }
  }
}
