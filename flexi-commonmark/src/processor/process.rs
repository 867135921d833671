//! Main processing functions for Markdown content.
use std::{
  fs,
  io::Error,
  path::{Path, PathBuf},
};

use log::error;

use super::{
  error::{ProcessorError, ProcessorResult},
  types::{MarkdownOptions, MarkdownProcessor},
};
use crate::types::MarkdownResult;

/// Preset configurations for common use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessorPreset {
  /// GitHub Flavored Markdown with options blocks, no default numbering.
  Basic,
  /// As `Basic`, and every code block is numbered unless it opts out.
  Numbered,
  /// Plain `CommonMark`: no GFM extensions and no options blocks.
  Strict,
}

/// Create a processor with sensible defaults for library usage.
///
/// # Arguments
///
/// * `preset` - The preset configuration to use
#[must_use]
pub fn create_processor(preset: ProcessorPreset) -> MarkdownProcessor {
  let options = match preset {
    ProcessorPreset::Basic => MarkdownOptions::with_features(true, false, true),
    ProcessorPreset::Numbered => {
      MarkdownOptions::with_features(true, true, true)
    },
    ProcessorPreset::Strict => {
      MarkdownOptions::with_features(false, false, false)
    },
  };

  MarkdownProcessor::new(options)
}

/// Process markdown content from a string.
///
/// This is a convenience function that combines processor creation and
/// content processing in a single call.
///
/// # Errors
///
/// Returns an error if the document cannot be rendered.
pub fn process_markdown_string(
  content: &str,
  preset: ProcessorPreset,
) -> ProcessorResult<MarkdownResult> {
  create_processor(preset).render(content)
}

/// Process markdown content from a file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the document cannot be
/// rendered.
pub fn process_markdown_file(
  processor: &MarkdownProcessor,
  file_path: &Path,
) -> ProcessorResult<MarkdownResult> {
  let content =
    fs::read_to_string(file_path).map_err(|source| ProcessorError::Io {
      path: file_path.to_path_buf(),
      source,
    })?;
  processor.render(&content)
}

/// Process a batch of markdown files with consistent error handling.
///
/// Every file is rendered with the same processor. A failing file is logged
/// and reported in its own slot without stopping the batch.
///
/// # Arguments
/// * `processor` - The configured markdown processor
/// * `files` - Iterator of file paths to process
/// * `read_file_fn` - Function to read file content from path
///
/// # Returns
/// Vector of tuples containing (`file_path`, `processing_result`)
pub fn process_batch<I, F>(
  processor: &MarkdownProcessor,
  files: I,
  read_file_fn: F,
) -> Vec<(PathBuf, ProcessorResult<MarkdownResult>)>
where
  I: Iterator<Item = PathBuf>,
  F: Fn(&Path) -> Result<String, Error>,
{
  files
    .map(|path| {
      let result = read_file_fn(&path)
        .map_err(|source| {
          ProcessorError::Io {
            path: path.clone(),
            source,
          }
        })
        .and_then(|content| processor.render(&content));
      if let Err(e) = &result {
        error!("Failed to process {}: {e}", path.display());
      }
      (path, result)
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use std::path::Path;

  use super::*;

  #[test]
  fn test_process_markdown_string() {
    let content = "# Test Header\n\nSome content.";
    let result = process_markdown_string(content, ProcessorPreset::Basic)
      .expect("plain markdown renders");

    assert!(result.html.contains("<h1>"));
    assert!(result.html.contains("Test Header"));
    assert_eq!(result.annotated_code_blocks, 0);
  }

  #[test]
  fn test_create_processor_presets() {
    let basic = create_processor(ProcessorPreset::Basic);
    assert!(basic.options.gfm);
    assert!(!basic.options.line_numbers);
    assert!(basic.options.options_blocks);

    let numbered = create_processor(ProcessorPreset::Numbered);
    assert!(numbered.options.line_numbers);

    let strict = create_processor(ProcessorPreset::Strict);
    assert!(!strict.options.gfm);
    assert!(!strict.options.options_blocks);
  }

  #[test]
  fn test_strict_preset_keeps_marker_lines() {
    let result =
      process_markdown_string("o{\"title\": \"t\"}\n", ProcessorPreset::Strict)
        .expect("options blocks are not recognized");
    assert!(result.html.contains("o{"));
  }

  #[test]
  fn test_process_batch() {
    let processor = create_processor(ProcessorPreset::Basic);
    let paths = vec![
      Path::new("test1.md"),
      Path::new("test2.md"),
      Path::new("missing.md"),
    ];

    let read_fn = |path: &Path| -> Result<String, std::io::Error> {
      match path.file_name().and_then(|n| n.to_str()) {
        Some("test1.md") => Ok("# Test 1".to_string()),
        Some("test2.md") => Ok("o{}\n".to_string()),
        _ => {
          Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "File not found",
          ))
        },
      }
    };

    let results = process_batch(
      &processor,
      paths.into_iter().map(Path::to_path_buf),
      read_fn,
    );
    assert_eq!(results.len(), 3);

    let result = results[0].1.as_ref().expect("first file renders");
    assert!(result.html.contains("Test 1"));
    assert!(matches!(results[1].1, Err(ProcessorError::Options(_))));
    assert!(matches!(results[2].1, Err(ProcessorError::Io { .. })));
  }
}
