//! Options for the CSS reducer.

use serde::Deserialize;

/// Comments starting with this prefix survive when
/// [`CssOptions::keep_exclamation_comments`] is set.
pub const EXCLAMATION_COMMENT_PREFIX: &str = "/*!";

/// How the CSS reducer treats rule boundaries and `/*!` comments.
///
/// Both toggles are off by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CssOptions {
    /// Write a newline after every `}`.
    pub line_breaks_after_rules: bool,
    /// Keep comments whose text begins with [`EXCLAMATION_COMMENT_PREFIX`].
    pub keep_exclamation_comments: bool,
}

impl CssOptions {
    /// Returns true if a comment with this source text must be written.
    #[must_use]
    pub fn keeps_comment(&self, raw: &str) -> bool {
        self.keep_exclamation_comments && raw.starts_with(EXCLAMATION_COMMENT_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_only_exclamation_comments_when_asked() {
        let keep = CssOptions {
            keep_exclamation_comments: true,
            ..CssOptions::default()
        };
        assert!(keep.keeps_comment("/*! license */"));
        assert!(!keep.keeps_comment("/* note */"));
        assert!(!CssOptions::default().keeps_comment("/*! license */"));
    }
}
