//! Options for the HTML reducer.

use serde::Deserialize;

/// How the HTML reducer treats newlines, comments and CDATA.
///
/// Built once per reduction and never mutated while it runs. Missing fields
/// fall back to [`HtmlOptions::default`] when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HtmlOptions {
    /// Insert readability newlines after doctype/html/head/body boundaries
    /// and around verbatim regions. On by default.
    pub extra_newlines: bool,
    /// Suppress comments that are not conditional comments. On by default.
    pub strip_comments: bool,
    /// Treat `<![CDATA[...]]>` as text instead of a comment. Off by default.
    pub allow_cdata: bool,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            extra_newlines: true,
            strip_comments: true,
            allow_cdata: false,
        }
    }
}
