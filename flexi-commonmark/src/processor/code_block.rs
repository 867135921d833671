//! Rendering of fenced code blocks with their options applied.
use super::{
  error::{ProcessorError, ProcessorResult},
  types::MarkdownOptions,
};
use crate::{
  embellish::{embellish, physical_lines, strip_line_ending},
  options::CodeBlockOptions,
  utils::{class_name, is_valid_class_prefix},
};

/// Render a fenced code block to HTML.
///
/// The code is escaped, then numbered and highlighted as `options` ask,
/// falling back to `defaults` for anything the block leaves unset.
///
/// # Arguments
///
/// * `code` - The literal content of the code block
/// * `info` - The fence's info string
/// * `options` - Options attached to this block
/// * `defaults` - Processor-wide options
/// * `line` - Source line of the opening fence, for diagnostics
///
/// # Errors
///
/// Returns an error if the effective class prefix is not a valid class name
/// fragment, or if the block's line ranges do not fit its code.
pub fn render_code_block(
  code: &str,
  info: &str,
  options: &CodeBlockOptions,
  defaults: &MarkdownOptions,
  line: usize,
) -> ProcessorResult<String> {
  let prefix = options
    .class_prefix
    .as_deref()
    .or(defaults.class_prefix.as_deref());
  if let Some(prefix) = prefix.filter(|p| !is_valid_class_prefix(p)) {
    return Err(ProcessorError::InvalidClassPrefix(prefix.to_string()));
  }

  let escaped = html_escape::encode_text(code);
  let num_lines = physical_lines(&escaped).len();
  let line_numbers = options.line_number_ranges(defaults.line_numbers, num_lines);
  let body = embellish(
    &escaped,
    &line_numbers,
    &options.highlighted_lines,
    prefix,
  )
  .map_err(|source| ProcessorError::CodeBlock { line, source })?;
  let body = strip_line_ending(&body);

  let mut html = String::with_capacity(body.len() + 128);

  if let Some(title) = &options.title {
    html.push_str(&format!(
      "<figure class=\"{}\"><figcaption class=\"{}\">{}</figcaption>",
      class_name(prefix, "code-block"),
      class_name(prefix, "code-title"),
      html_escape::encode_text(title)
    ));
  }

  html.push_str(&format!("<pre class=\"{}\"><code", class_name(prefix, "code")));
  if let Some(language) = options.language(info) {
    html.push_str(&format!(
      " class=\"language-{}\"",
      html_escape::encode_double_quoted_attribute(language)
    ));
  }
  html.push('>');
  html.push_str(body);
  html.push_str("</code></pre>");

  if options.title.is_some() {
    html.push_str("</figure>");
  }
  html.push('\n');

  Ok(html)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    options::LineNumbers,
    ranges::{LineNumberRange, LineRange},
  };

  #[test]
  fn test_plain_block() {
    let html = render_code_block(
      "a < b\n",
      "rust",
      &CodeBlockOptions::default(),
      &MarkdownOptions::default(),
      1,
    )
    .expect("nothing to validate");
    assert_eq!(
      html,
      "<pre class=\"code\"><code class=\"language-rust\">a &lt; b</code></pre>\n"
    );
  }

  #[test]
  fn test_default_numbering() {
    let defaults = MarkdownOptions {
      line_numbers: true,
      ..Default::default()
    };
    let html = render_code_block(
      "one\ntwo\n",
      "",
      &CodeBlockOptions::default(),
      &defaults,
      1,
    )
    .expect("ranges are valid");
    assert!(html.starts_with("<pre class=\"code\"><code>"));
    assert!(html.contains(r#"<span class="line-number">1</span><span class="line-text">one</span>"#));
    assert!(html.contains(r#"<span class="line-number">2</span><span class="line-text">two</span>"#));
  }

  #[test]
  fn test_title_and_block_prefix() {
    let options = CodeBlockOptions {
      title: Some("<main>.rs".to_string()),
      class_prefix: Some("x-".to_string()),
      line_numbers: Some(LineNumbers::Ranges(vec![
        LineNumberRange::new(1, 1, 5).expect("valid range"),
      ])),
      highlighted_lines: vec![LineRange::new(-1, -1).expect("valid range")],
      ..Default::default()
    };
    let defaults = MarkdownOptions {
      class_prefix: Some("ignored-".to_string()),
      ..Default::default()
    };

    let html = render_code_block("a\nb", "js", &options, &defaults, 3)
      .expect("ranges are valid");
    assert!(html.starts_with(
      "<figure class=\"x-code-block\"><figcaption \
       class=\"x-code-title\">&lt;main&gt;.rs</figcaption><pre \
       class=\"x-code\"><code class=\"language-js\">"
    ));
    assert!(html.contains(r#"<span class="x-line-number">5</span>"#));
    assert!(html.contains(
      r#"<span class="x-line x-highlight"><span class="x-line-text">b</span>"#
    ));
    assert!(html.ends_with("</code></pre></figure>\n"));
    assert!(!html.contains("ignored-"));
  }

  #[test]
  fn test_blank_last_line_counts() {
    let options = CodeBlockOptions {
      highlighted_lines: vec![LineRange::new(-1, -1).expect("valid range")],
      ..Default::default()
    };
    let html = render_code_block(
      "a\n\n",
      "",
      &options,
      &MarkdownOptions::default(),
      1,
    )
    .expect("line 2 exists");
    assert_eq!(
      html,
      "<pre class=\"code\"><code><span class=\"line\"><span \
       class=\"line-text\">a</span></span>\n<span class=\"line \
       highlight\"><span class=\"line-text\"></span></span></code></pre>\n"
    );

    let plain = render_code_block(
      "a\n\n",
      "",
      &CodeBlockOptions::default(),
      &MarkdownOptions::default(),
      1,
    )
    .expect("nothing to validate");
    assert_eq!(plain, "<pre class=\"code\"><code>a\n</code></pre>\n");
  }

  #[test]
  fn test_range_error_names_line() {
    let options = CodeBlockOptions {
      highlighted_lines: vec![LineRange::new(3, 3).expect("valid range")],
      ..Default::default()
    };
    let err = render_code_block(
      "a\nb\n",
      "",
      &options,
      &MarkdownOptions::default(),
      9,
    )
    .expect_err("line 3 does not exist");
    assert!(matches!(err, ProcessorError::CodeBlock { line: 9, .. }));
  }

  #[test]
  fn test_invalid_class_prefix() {
    let options = CodeBlockOptions {
      class_prefix: Some("\"><script>".to_string()),
      ..Default::default()
    };
    let err = render_code_block(
      "a",
      "",
      &options,
      &MarkdownOptions::default(),
      1,
    )
    .expect_err("prefix is not a class name");
    assert!(matches!(err, ProcessorError::InvalidClassPrefix(_)));
  }
}
