use std::{
  fs,
  path::{Path, PathBuf},
};

use flexi_commonmark::{MarkdownOptions, utils::is_valid_class_prefix};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File names searched by [`Config::find_config_file`], in priority order.
const CONFIG_FILENAMES: [&str; 6] = [
  "flexi.toml",
  "flexi.json",
  ".flexi.toml",
  ".flexi.json",
  ".config/flexi.toml",
  ".config/flexi.json",
];

/// Configuration for the flexi-commonmark processor.
///
/// Fields are typically loaded from a TOML or JSON config file. Missing
/// fields take their default values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Enable GitHub Flavored Markdown extensions.
  pub gfm: bool,

  /// Prefix for every class name generated for code blocks.
  pub class_prefix: Option<String>,

  /// Number the lines of code blocks that do not say otherwise.
  pub line_numbers: bool,

  /// Recognize options blocks preceding code blocks.
  pub options_blocks: bool,
}

impl Default for Config {
  fn default() -> Self {
    let defaults = MarkdownOptions::default();
    Self {
      gfm:            defaults.gfm,
      class_prefix:   defaults.class_prefix,
      line_numbers:   defaults.line_numbers,
      options_blocks: defaults.options_blocks,
    }
  }
}

impl Config {
  /// Load configuration from a file (TOML or JSON).
  ///
  /// # Arguments
  ///
  /// * `path` - Path to the configuration file.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or parsed, if the format is
  /// unsupported, or if the loaded values are invalid.
  #[allow(
    clippy::option_if_let_else,
    reason = "Clearer with explicit match on extension"
  )]
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content =
      fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
      })?;

    let config: Self = match path.extension().and_then(|ext| ext.to_str()) {
      Some(ext) => {
        match ext.to_lowercase().as_str() {
          "json" => {
            serde_json::from_str(&content).map_err(|source| {
              ConfigError::Serde {
                path: path.to_path_buf(),
                source,
              }
            })?
          },
          "toml" => {
            toml::from_str(&content).map_err(|source| {
              ConfigError::Toml {
                path: path.to_path_buf(),
                source,
              }
            })?
          },
          _ => {
            return Err(ConfigError::Config(format!(
              "Unsupported config file format: {}",
              path.display()
            )));
          },
        }
      },
      None => {
        return Err(ConfigError::Config(format!(
          "Config file has no extension: {}",
          path.display()
        )));
      },
    };

    config.validate()?;
    Ok(config)
  }

  /// Load configuration from files and KEY=VALUE overrides, merging them.
  ///
  /// Files are merged in order, later files taking precedence. Without any
  /// file, a config discovered in `search_dir` is used if there is one, and
  /// the defaults otherwise.
  ///
  /// # Errors
  ///
  /// Returns an error if a file cannot be loaded, an override is malformed,
  /// or the result is invalid.
  pub fn load(
    config_files: &[PathBuf],
    config_overrides: &[String],
    search_dir: &Path,
  ) -> Result<Self, ConfigError> {
    let mut config = if let Some((first, rest)) = config_files.split_first() {
      let mut merged_config = Self::from_file(first)?;
      for config_path in rest {
        merged_config.merge(Self::from_file(config_path)?);
      }

      if config_files.len() > 1 {
        log::info!("Loaded and merged {} config files", config_files.len());
      }

      merged_config
    } else if let Some(discovered_config) = Self::find_config_file(search_dir)
    {
      log::info!(
        "Using discovered config file: {}",
        discovered_config.display()
      );
      Self::from_file(&discovered_config)?
    } else {
      Self::default()
    };

    if !config_overrides.is_empty() {
      config.apply_overrides(config_overrides)?;
    }

    config.validate()?;
    Ok(config)
  }

  /// Search `dir` for a config file in the usual locations.
  #[must_use]
  pub fn find_config_file(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILENAMES
      .iter()
      .map(|filename| dir.join(filename))
      .find(|path| path.is_file())
  }

  /// Apply configuration overrides from KEY=VALUE strings.
  ///
  /// # Errors
  ///
  /// Returns an error if:
  ///
  /// - An override string is not in KEY=VALUE format
  /// - A key is not recognized
  /// - A value cannot be parsed as the expected type
  pub fn apply_overrides(
    &mut self,
    overrides: &[String],
  ) -> Result<(), ConfigError> {
    for override_str in overrides {
      let (key, value) = override_str.split_once('=').ok_or_else(|| {
        ConfigError::Config(format!(
          "Invalid config override format: '{override_str}'. Expected \
           KEY=VALUE"
        ))
      })?;

      self.apply_override(key.trim(), value.trim())?;
    }

    Ok(())
  }

  fn apply_override(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
      "gfm" => self.gfm = parse_bool(key, value)?,
      "line_numbers" => self.line_numbers = parse_bool(key, value)?,
      "options_blocks" => self.options_blocks = parse_bool(key, value)?,
      "class_prefix" => {
        self.class_prefix =
          (!value.is_empty()).then(|| value.to_string());
      },
      _ => {
        return Err(ConfigError::Config(format!(
          "Unknown configuration key: '{key}'"
        )));
      },
    }
    log::debug!("Applied config override {key}={value}");
    Ok(())
  }

  /// Merge another config into this one, with the other config's values taking
  /// precedence.
  ///
  /// # Merge Rules
  ///
  /// - [`Option<T>`] fields: Other's [`Some`] value replaces this config's
  ///   value
  /// - Plain fields: Other's value always replaces
  pub fn merge(&mut self, other: Self) {
    self.gfm = other.gfm;
    self.line_numbers = other.line_numbers;
    self.options_blocks = other.options_blocks;
    if other.class_prefix.is_some() {
      self.class_prefix = other.class_prefix;
    }
  }

  /// Check that the configured values are usable.
  ///
  /// # Errors
  ///
  /// Returns an error if the class prefix cannot appear in a class name.
  pub fn validate(&self) -> Result<(), ConfigError> {
    match self.class_prefix.as_deref() {
      Some(prefix) if !is_valid_class_prefix(prefix) => {
        Err(ConfigError::Config(format!(
          "Invalid class prefix '{prefix}': expected letters, digits, '_' or \
           '-', not starting with a digit"
        )))
      },
      _ => Ok(()),
    }
  }

  /// Convert to processor options.
  #[must_use]
  pub fn markdown_options(&self) -> MarkdownOptions {
    MarkdownOptions {
      gfm:            self.gfm,
      class_prefix:   self.class_prefix.clone(),
      line_numbers:   self.line_numbers,
      options_blocks: self.options_blocks,
    }
  }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
  match value.to_lowercase().as_str() {
    "true" | "yes" | "1" => Ok(true),
    "false" | "no" | "0" => Ok(false),
    _ => {
      Err(ConfigError::Config(format!(
        "Invalid boolean value for '{key}': '{value}'. Expected true/false, \
         yes/no, or 1/0"
      )))
    },
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults_match_processor() {
    assert_eq!(
      Config::default().markdown_options(),
      MarkdownOptions::default()
    );
  }

  #[test]
  fn test_config_merge_option_fields() {
    let mut base = Config {
      class_prefix: Some("base-".to_string()),
      ..Default::default()
    };

    base.merge(Config {
      line_numbers: true,
      ..Default::default()
    });

    // class_prefix should remain from base (other had None)
    assert_eq!(base.class_prefix.as_deref(), Some("base-"));
    assert!(base.line_numbers);
  }

  #[test]
  fn test_apply_overrides() {
    let mut config = Config::default();

    config
      .apply_overrides(&[
        "line_numbers=yes".to_string(),
        "options_blocks = 0".to_string(),
        "class_prefix=docs-".to_string(),
      ])
      .expect("valid overrides");

    assert!(config.line_numbers);
    assert!(!config.options_blocks);
    assert_eq!(config.class_prefix.as_deref(), Some("docs-"));

    config
      .apply_overrides(&["class_prefix=".to_string()])
      .expect("empty clears the prefix");
    assert_eq!(config.class_prefix, None);
  }

  #[test]
  fn test_apply_overrides_invalid_format() {
    let err = Config::default()
      .apply_overrides(&["no_equals_sign".to_string()])
      .expect_err("missing '='");
    assert!(err.to_string().contains("Expected KEY=VALUE"));
  }

  #[test]
  fn test_apply_overrides_unknown_key() {
    let err = Config::default()
      .apply_overrides(&["unknown_key=value".to_string()])
      .expect_err("not a config field");
    assert!(err.to_string().contains("Unknown configuration key"));
  }

  #[test]
  fn test_apply_overrides_invalid_boolean() {
    let err = Config::default()
      .apply_overrides(&["gfm=maybe".to_string()])
      .expect_err("not a boolean");
    assert!(err.to_string().contains("Invalid boolean"));
  }

  #[test]
  fn test_validate_class_prefix() {
    let config = Config {
      class_prefix: Some("9lives".to_string()),
      ..Default::default()
    };
    assert!(config.validate().is_err());
  }
}
