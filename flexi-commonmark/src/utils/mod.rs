use std::sync::LazyLock;

use regex::Regex;

static CLASS_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[A-Za-z_-][A-Za-z0-9_-]*$").unwrap_or_else(|e| {
    log::error!(
      "Failed to compile CLASS_PREFIX_RE regex: {e}\n Falling back to never \
       matching regex."
    );
    never_matching_regex()
  })
});

/// Return the class prefix to apply, or `None` if it is blank.
#[must_use]
pub fn effective_prefix(prefix: Option<&str>) -> Option<&str> {
  prefix.filter(|p| !p.trim().is_empty())
}

/// Build a class name, prepending `prefix` when it is not blank.
#[must_use]
pub fn class_name(prefix: Option<&str>, name: &str) -> String {
  effective_prefix(prefix)
    .map_or_else(|| name.to_string(), |p| format!("{p}{name}"))
}

/// Check if `prefix` can be prepended to a class name and still yield a valid
/// CSS class. Blank prefixes are valid since they are never applied.
#[must_use]
pub fn is_valid_class_prefix(prefix: &str) -> bool {
  prefix.trim().is_empty() || CLASS_PREFIX_RE.is_match(prefix)
}

/// Create a regex that never matches anything.
///
/// This is used as a fallback pattern when a regex fails to compile.
/// It will never match any input, which is safer than using a trivial regex
/// like `^$` which would match empty strings.
///
/// # Panics
///
/// Panics if the fallback regex pattern `r"^\b$"` fails to compile, which
/// should never happen.
#[must_use]
pub fn never_matching_regex() -> Regex {
  Regex::new(r"[^\s\S]").unwrap_or_else(|_| {
    #[allow(
      clippy::expect_used,
      reason = "This pattern is guaranteed to be valid"
    )]
    Regex::new(r"^\b$").expect("regex pattern ^\\b$ should always compile")
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_class_name() {
    assert_eq!(class_name(None, "line"), "line");
    assert_eq!(class_name(Some(""), "line"), "line");
    assert_eq!(class_name(Some("  "), "line"), "line");
    assert_eq!(class_name(Some("flexi-"), "line"), "flexi-line");
  }

  #[test]
  fn test_class_prefix_validation() {
    assert!(is_valid_class_prefix(""));
    assert!(is_valid_class_prefix("flexi-"));
    assert!(is_valid_class_prefix("_code_"));
    assert!(!is_valid_class_prefix("1st-"));
    assert!(!is_valid_class_prefix("a b"));
    assert!(!is_valid_class_prefix("x\"onclick"));
  }

  #[test]
  fn test_never_matching_regex() {
    let re = never_matching_regex();
    assert!(!re.is_match(""));
    assert!(!re.is_match("anything"));
  }
}
