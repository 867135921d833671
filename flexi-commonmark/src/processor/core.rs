//! Core implementation of the Markdown processor.
//!
//! Rendering happens in two passes. The first lifts options blocks out of the
//! source, blanking their lines so that line numbers still match the original
//! document. The second parses the remaining markdown with comrak, hands each
//! options block to the first fenced code block comrak finds after it, and
//! swaps every fenced code block for its embellished HTML.
use std::{collections::HashMap, iter, ops::RangeInclusive};

use comrak::{
  Arena,
  nodes::{AstNode, NodeHtmlBlock, NodeValue},
  options::Options,
  parse_document,
};
use log::{debug, trace};

use super::{
  code_block::render_code_block,
  error::{ProcessorError, ProcessorResult},
  types::{MarkdownOptions, MarkdownProcessor},
};
use crate::{
  options::{
    CodeBlockOptions,
    OptionsBlock,
    PendingOptions,
    opens_options_block,
    read_options_block,
  },
  types::MarkdownResult,
  utils::is_valid_class_prefix,
};

/// Markdown with its options blocks removed.
#[derive(Debug, Default)]
struct Preprocessed {
  /// Source with every options block line blanked.
  markdown: String,
  /// Options blocks in document order.
  blocks:   Vec<OptionsBlock>,
}

impl MarkdownProcessor {
  /// Create a new `MarkdownProcessor` with the given options.
  #[must_use]
  pub const fn new(options: MarkdownOptions) -> Self {
    Self { options }
  }

  /// Access processor options.
  #[must_use]
  pub const fn options(&self) -> &MarkdownOptions {
    &self.options
  }

  /// Check if a specific feature is enabled.
  #[must_use]
  pub const fn has_feature(&self, feature: ProcessorFeature) -> bool {
    match feature {
      ProcessorFeature::Gfm => self.options.gfm,
      ProcessorFeature::LineNumbers => self.options.line_numbers,
      ProcessorFeature::OptionsBlocks => self.options.options_blocks,
    }
  }

  /// Render Markdown to HTML.
  ///
  /// # Errors
  ///
  /// Returns an error if an options block is malformed or left without a
  /// code block to apply to, if a code block's line ranges are invalid, or if
  /// a class prefix is not usable in a class attribute.
  pub fn render(&self, markdown: &str) -> ProcessorResult<MarkdownResult> {
    if let Some(prefix) = self
      .options
      .class_prefix
      .as_deref()
      .filter(|p| !is_valid_class_prefix(p))
    {
      return Err(ProcessorError::InvalidClassPrefix(prefix.to_string()));
    }

    let preprocessed = if self.options.options_blocks {
      self.preprocess(markdown)?
    } else {
      Preprocessed {
        markdown: markdown.to_string(),
        blocks:   Vec::new(),
      }
    };

    self.convert_to_html(&preprocessed)
  }

  /// Lift options blocks out of `content`.
  ///
  /// Markers are only recognized outside the code blocks comrak finds in
  /// `content`.
  fn preprocess(&self, content: &str) -> ProcessorResult<Preprocessed> {
    if !content.lines().any(opens_options_block) {
      return Ok(Preprocessed {
        markdown: content.to_string(),
        blocks:   Vec::new(),
      });
    }

    let mut result = Preprocessed {
      markdown: String::with_capacity(content.len()),
      blocks:   Vec::new(),
    };
    let mut code_spans = self.code_line_spans(content).into_iter().peekable();
    let mut lines = content.lines().enumerate();

    while let Some((index, line)) = lines.next() {
      let line_number = index + 1;
      while code_spans
        .next_if(|span| *span.end() < line_number)
        .is_some()
      {}
      let in_code = code_spans
        .peek()
        .is_some_and(|span| span.contains(&line_number));

      if !in_code && opens_options_block(line) {
        let markdown = &mut result.markdown;
        let mut block_lines = iter::once(line)
          .chain(lines.by_ref().map(|(_, line)| line))
          .inspect(|_| markdown.push('\n'));

        if let Some(block) = read_options_block(line_number, &mut block_lines)? {
          trace!(
            "Found options block at line {}, column {}",
            block.line(),
            block.column()
          );
          result.blocks.push(block);
        }
        continue;
      }

      result.markdown.push_str(line);
      result.markdown.push('\n');
    }

    Ok(result)
  }

  /// Source lines covered by code blocks, fenced or indented, in document
  /// order.
  fn code_line_spans(&self, content: &str) -> Vec<RangeInclusive<usize>> {
    let arena = Arena::new();
    let options = self.comrak_options();
    let root = parse_document(&arena, content, &options);

    root
      .descendants()
      .filter_map(|node| {
        let data = node.data.borrow();
        match data.value {
          NodeValue::CodeBlock(_) => {
            Some(data.sourcepos.start.line..=data.sourcepos.end.line)
          },
          _ => None,
        }
      })
      .collect()
  }

  /// Convert preprocessed markdown to HTML using comrak and configured
  /// options.
  fn convert_to_html(
    &self,
    preprocessed: &Preprocessed,
  ) -> ProcessorResult<MarkdownResult> {
    let arena = Arena::new();
    let options = self.comrak_options();
    let root = parse_document(&arena, &preprocessed.markdown, &options);

    let code_options =
      attach_options(&preprocessed.blocks, &fenced_code_lines(root))?;
    let annotated_code_blocks =
      self.embellish_code_blocks(root, &code_options)?;

    let mut html = String::new();
    comrak::format_html(root, &options, &mut html)?;

    Ok(MarkdownResult {
      html,
      annotated_code_blocks,
    })
  }

  /// Replace every fenced code block under `root` with its rendered HTML.
  ///
  /// Returns the number of blocks that carried an options block.
  fn embellish_code_blocks<'a>(
    &self,
    root: &'a AstNode<'a>,
    code_options: &HashMap<usize, CodeBlockOptions>,
  ) -> ProcessorResult<usize> {
    let defaults = CodeBlockOptions::default();
    let mut annotated = 0;

    for node in root.descendants() {
      let mut data = node.data.borrow_mut();
      let line = data.sourcepos.start.line;

      let html = match &data.value {
        NodeValue::CodeBlock(code) if code.fenced => {
          let options = code_options.get(&line);
          if options.is_some() {
            annotated += 1;
          }
          render_code_block(
            &code.literal,
            &code.info,
            options.unwrap_or(&defaults),
            &self.options,
            line,
          )?
        },
        _ => continue,
      };

      data.value = NodeValue::HtmlBlock(NodeHtmlBlock {
        block_type: 0,
        literal:    html,
      });
    }

    Ok(annotated)
  }

  /// Build comrak options from `MarkdownOptions` and feature flags.
  fn comrak_options(&self) -> Options<'_> {
    let mut options = Options::default();
    if self.options.gfm {
      options.extension.table = true;
      options.extension.footnotes = true;
      options.extension.strikethrough = true;
      options.extension.tasklist = true;
      options.extension.autolink = true;
    }
    // Embellished code blocks are emitted as raw HTML.
    options.render.r#unsafe = true;
    options
  }
}

/// Start lines of the fenced code blocks under `root`, ascending.
fn fenced_code_lines<'a>(root: &'a AstNode<'a>) -> Vec<usize> {
  let mut lines: Vec<usize> = root
    .descendants()
    .filter_map(|node| {
      let data = node.data.borrow();
      match &data.value {
        NodeValue::CodeBlock(code) if code.fenced => {
          Some(data.sourcepos.start.line)
        },
        _ => None,
      }
    })
    .collect();
  lines.sort_unstable();
  lines
}

/// Hand each options block to the first fenced code block starting after it.
///
/// Returns the deserialized options keyed by the start line of their code
/// block.
///
/// # Errors
///
/// Returns an error if a block is followed by another options block before
/// any fenced code block, if no fenced code block follows it at all, or if it
/// does not deserialize.
fn attach_options(
  blocks: &[OptionsBlock],
  fence_lines: &[usize],
) -> ProcessorResult<HashMap<usize, CodeBlockOptions>> {
  let mut pending = PendingOptions::new();
  let mut blocks = blocks.iter().peekable();
  let mut attached = HashMap::new();

  for &fence_line in fence_lines {
    while let Some(block) = blocks.next_if(|block| block.line() < fence_line) {
      pending.stash(block.clone())?;
    }
    if let Some(block) = pending.take() {
      let options: CodeBlockOptions = block.deserialize()?;
      debug!(
        "Attaching options from line {} to code block at line {fence_line}",
        block.line()
      );
      attached.insert(fence_line, options);
    }
  }

  for block in blocks {
    pending.stash(block.clone())?;
  }
  pending.finish()?;

  Ok(attached)
}

/// Features that can be enabled on a processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessorFeature {
  /// GitHub Flavored Markdown extensions.
  Gfm,
  /// Line numbers on code blocks by default.
  LineNumbers,
  /// Options blocks preceding code blocks.
  OptionsBlocks,
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::options::OptionsError;

  fn processor() -> MarkdownProcessor {
    MarkdownProcessor::new(MarkdownOptions::default())
  }

  fn block(line: usize, json: &str) -> OptionsBlock {
    let source = format!("{}o{json}", "\n".repeat(line - 1));
    let mut lines = source.lines().skip(line - 1);
    read_options_block(line, &mut lines)
      .expect("literal closes")
      .expect("line opens an options block")
  }

  #[test]
  fn test_preprocess_keeps_line_numbers() {
    let source =
      "Intro\no{\n  \"title\": \"t\"\n}\n```rust\nfn main() {}\n```\n";
    let preprocessed =
      processor().preprocess(source).expect("valid options block");

    assert_eq!(
      preprocessed.markdown,
      "Intro\n\n\n\n```rust\nfn main() {}\n```\n"
    );
    assert_eq!(preprocessed.markdown.lines().count(), source.lines().count());
    assert_eq!(preprocessed.blocks.len(), 1);
    assert_eq!(preprocessed.blocks[0].line(), 2);
  }

  #[test]
  fn test_preprocess_ignores_markers_in_code() {
    let fenced = "```\no{\"title\": \"t\"}\n```\n";
    let preprocessed =
      processor().preprocess(fenced).expect("nothing to extract");
    assert_eq!(preprocessed.markdown, fenced);
    assert!(preprocessed.blocks.is_empty());

    // A list item's fence is still a fence.
    let listed = "- ```\n  o{}\n  ```\n";
    let preprocessed =
      processor().preprocess(listed).expect("nothing to extract");
    assert!(preprocessed.blocks.is_empty());

    let indented = "Text\n\n    o{}\n";
    let preprocessed =
      processor().preprocess(indented).expect("nothing to extract");
    assert!(preprocessed.blocks.is_empty());
  }

  #[test]
  fn test_attach_to_next_fence() {
    let blocks = [
      block(1, r#"{"title": "a"}"#),
      block(6, r#"{"title": "b"}"#),
    ];
    let attached = attach_options(&blocks, &[2, 4, 7]).expect("all consumed");

    assert_eq!(attached.len(), 2);
    assert_eq!(attached[&2].title.as_deref(), Some("a"));
    assert!(!attached.contains_key(&4));
    assert_eq!(attached[&7].title.as_deref(), Some("b"));
  }

  #[test]
  fn test_attach_orphaned_block() {
    let err = attach_options(&[block(3, "{}")], &[1])
      .expect_err("block never consumed");
    assert!(matches!(
      err,
      ProcessorError::Options(OptionsError::Orphaned { line: 3, column: 2 })
    ));
  }

  #[test]
  fn test_attach_unconsumed_block() {
    let err = attach_options(&[block(1, "{}"), block(2, "{}")], &[3])
      .expect_err("first block never consumed");
    assert!(matches!(
      err,
      ProcessorError::Options(OptionsError::Unconsumed { line: 1, column: 2 })
    ));
  }

  #[test]
  fn test_has_feature() {
    let processor = MarkdownProcessor::new(MarkdownOptions::with_features(
      false, true, false,
    ));
    assert!(!processor.has_feature(ProcessorFeature::Gfm));
    assert!(processor.has_feature(ProcessorFeature::LineNumbers));
    assert!(!processor.has_feature(ProcessorFeature::OptionsBlocks));
  }
}
