use std::{env, fs};

use flexi_commonmark::{MarkdownOptionsBuilder, MarkdownProcessor};

const DEMO: &str = r#"# Options blocks

o{
  "title": "fib.rs",
  "lineNumbers": [{"start": 1, "end": -1, "startLineNumber": 10}],
  "highlightedLines": [{"start": 2, "end": 3}]
}
```rust
fn fib(n: u64) -> u64 {
  if n < 2 {
    return n;
  }
  fib(n - 1) + fib(n - 2)
}
```
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
  let content = match env::args().nth(1) {
    Some(path) => fs::read_to_string(path)?,
    None => DEMO.to_string(),
  };

  let options = MarkdownOptionsBuilder::new()
    .class_prefix(Some("flexi-"))
    .build();
  let result = MarkdownProcessor::new(options).render(&content)?;

  println!("{}", result.html);
  println!(
    "<!-- {} code block(s) configured by options blocks -->",
    result.annotated_code_blocks
  );

  Ok(())
}
