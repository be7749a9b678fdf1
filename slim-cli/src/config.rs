//! Option loading: a JSON base file, then command-line flags on top.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use slim_css::CssOptions;
use slim_html::HtmlOptions;

/// Contents of a `--config` file. Missing sections and fields keep their
/// defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Base HTML options.
    pub html: HtmlOptions,
    /// Base CSS options.
    pub css: CssOptions,
}

impl FileConfig {
    /// Parse a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a JSON object of known options.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid configuration")
    }

    /// Load a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("in config file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_gives_defaults() {
        assert_eq!(FileConfig::from_json("{}").unwrap(), FileConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let config =
            FileConfig::from_json(r#"{ "html": { "strip_comments": false }, "css": { "line_breaks_after_rules": true } }"#)
                .unwrap();
        assert!(!config.html.strip_comments);
        assert!(config.html.extra_newlines);
        assert!(config.css.line_breaks_after_rules);
        assert!(!config.css.keep_exclamation_comments);
    }

    #[test]
    fn test_unknown_section_is_rejected() {
        assert!(FileConfig::from_json(r#"{ "js": {} }"#).is_err());
    }
}
