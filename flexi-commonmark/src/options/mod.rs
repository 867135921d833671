//! Options blocks: JSON literals embedded in markdown that configure the block
//! following them.
//!
//! - [`scanner`]: finds where a literal ends, one line at a time
//! - [`block`]: recognizes options blocks and hands them to their consumer
//! - [`code_block`]: the options fenced code blocks accept
//! - [`error`]: errors raised while extracting or consuming options
pub mod block;
pub mod code_block;
pub mod error;
pub mod scanner;

pub use block::{
  Feed,
  OPTIONS_BLOCK_MARKER,
  OptionsBlock,
  OptionsBlockBuilder,
  PendingOptions,
  opens_options_block,
  read_options_block,
};
pub use code_block::{CodeBlockOptions, LineNumbers};
pub use error::{OptionsError, OptionsResult};
pub use scanner::{LineCursor, LineSource, ScanState, ScanStatus};
