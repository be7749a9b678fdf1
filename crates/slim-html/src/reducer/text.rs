//! Context-free text transforms used by the reducer states.

/// Characters that count as white space for collapsing but render as
/// content: the no-break spaces.
const fn is_no_break_space(c: char) -> bool {
    matches!(c, '\u{A0}' | '\u{2007}' | '\u{202F}')
}

fn is_collapsible(c: char) -> bool {
    (c.is_whitespace() || c.is_control()) && !is_no_break_space(c)
}

/// Collapse every run of white-space or control characters to one ASCII space.
///
/// A text that is nothing but such a run collapses to the empty string.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars() {
        if is_collapsible(c) {
            if !in_run {
                out.push(' ');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    if out == " " {
        out.clear();
    }
    out
}

/// Trim the ASCII white space around text in the document head.
#[must_use]
pub fn trim_head_text(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_ascii_whitespace())
}

/// Returns true if the comment is a legacy conditional comment
/// (`<!--[if IE]>` ... `<![endif]-->`) that must never be stripped.
///
/// `raw` is the full comment source including its opening delimiter.
#[must_use]
pub fn is_conditional_comment(raw: &str) -> bool {
    let content = raw
        .strip_prefix("<!--")
        .or_else(|| raw.get(2..))
        .unwrap_or_default()
        .to_ascii_lowercase();
    content.contains("[if") || content.contains("[endif")
}

/// Drop one line break at the start of a verbatim region.
#[must_use]
pub fn strip_leading_break(text: &str) -> &str {
    text.strip_prefix("\r\n")
        .or_else(|| text.strip_prefix('\n'))
        .unwrap_or(text)
}
