//! Type definitions for the Markdown processor.
//!
//! Contains the configuration options (`MarkdownOptions`), their builder and
//! the main processor struct (`MarkdownProcessor`).
//!
//! # Examples
//!
//! ```
//! use flexi_commonmark::{MarkdownOptions, MarkdownProcessor};
//!
//! let options = MarkdownOptions {
//!   line_numbers: true,
//!   class_prefix: Some("flexi-".to_string()),
//!   ..Default::default()
//! };
//!
//! let processor = MarkdownProcessor::new(options);
//! ```

/// Options for configuring the Markdown processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownOptions {
  /// Enable GitHub Flavored Markdown (GFM) extensions.
  pub gfm: bool,

  /// Optional: Prefix for every class name generated for code blocks.
  /// Blank prefixes are ignored.
  pub class_prefix: Option<String>,

  /// Number the lines of code blocks that do not say otherwise.
  pub line_numbers: bool,

  /// Recognize options blocks (`o{ ... }`) preceding code blocks.
  /// When `false`, such lines are left as ordinary markdown.
  pub options_blocks: bool,
}

impl MarkdownOptions {
  /// Enable all available features based on compile-time feature flags.
  #[must_use]
  pub const fn with_all_features() -> Self {
    Self {
      gfm:            cfg!(feature = "gfm"),
      class_prefix:   None,
      line_numbers:   true,
      options_blocks: true,
    }
  }

  /// Create options with runtime feature overrides.
  #[must_use]
  pub const fn with_features(
    gfm: bool,
    line_numbers: bool,
    options_blocks: bool,
  ) -> Self {
    Self {
      gfm,
      class_prefix: None,
      line_numbers,
      options_blocks,
    }
  }
}

impl Default for MarkdownOptions {
  fn default() -> Self {
    Self {
      gfm:            cfg!(feature = "gfm"),
      class_prefix:   None,
      line_numbers:   false,
      options_blocks: true,
    }
  }
}

/// Main Markdown processor.
///
/// Holds no per-document state, so a single processor can render any number
/// of documents.
#[derive(Debug, Clone)]
pub struct MarkdownProcessor {
  pub(crate) options: MarkdownOptions,
}

/// Builder for constructing `MarkdownOptions` with method chaining.
#[derive(Debug, Clone)]
pub struct MarkdownOptionsBuilder {
  options: MarkdownOptions,
}

impl MarkdownOptionsBuilder {
  /// Create a new builder with default options.
  #[must_use]
  pub fn new() -> Self {
    Self {
      options: MarkdownOptions::default(),
    }
  }

  /// Enable or disable GitHub Flavored Markdown.
  #[must_use]
  pub const fn gfm(mut self, enabled: bool) -> Self {
    self.options.gfm = enabled;
    self
  }

  /// Set the class prefix for generated code block markup.
  #[must_use]
  pub fn class_prefix<S: Into<String>>(mut self, prefix: Option<S>) -> Self {
    self.options.class_prefix = prefix.map(Into::into);
    self
  }

  /// Number code block lines unless a block disables it.
  #[must_use]
  pub const fn line_numbers(mut self, enabled: bool) -> Self {
    self.options.line_numbers = enabled;
    self
  }

  /// Enable or disable options block recognition.
  #[must_use]
  pub const fn options_blocks(mut self, enabled: bool) -> Self {
    self.options.options_blocks = enabled;
    self
  }

  /// Build the final `MarkdownOptions`.
  #[must_use]
  pub fn build(self) -> MarkdownOptions {
    self.options
  }
}

impl Default for MarkdownOptionsBuilder {
  fn default() -> Self {
    Self::new()
  }
}
