//! The HTML reduction state machine.
//!
//! Each state is a variant of [`ReducerState`]; [`step`] is the single
//! dispatch that consumes one token and returns the next state together with
//! what to write. `step` never touches the sink, which keeps every transition
//! testable on its own.

use std::borrow::Cow;
use std::str::FromStr;

use strum_macros::{AsRefStr, Display, EnumString};

use super::text::{collapse_whitespace, is_conditional_comment, strip_leading_break, trim_head_text};
use crate::options::HtmlOptions;
use crate::tokenizer::{Token, TokenKind};

/// The document region a passthrough region returns to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Region {
    /// Back to [`ReducerState::InHead`].
    Head,
    /// Back to [`ReducerState::InBody`].
    Body,
}

impl Region {
    /// The state to resume when the verbatim region ends, given whether a
    /// newline was written after its end tag.
    #[must_use]
    pub const fn state(self, after_break: bool) -> ReducerState {
        match self {
            Self::Head => ReducerState::InHead,
            Self::Body => ReducerState::InBody { after_break },
        }
    }
}

/// Elements whose content is reproduced byte for byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum VerbatimTag {
    /// `<pre>`
    Pre,
    /// `<script>`
    Script,
    /// `<style>`
    Style,
}

/// Where the reducer is in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ReducerState {
    /// Nothing seen yet; a leading doctype is written verbatim.
    AtDoctype,
    /// Inside the document head: text is trimmed.
    InHead,
    /// Inside the document body: text whitespace is collapsed.
    InBody {
        /// The last write was a readability newline, so leading whitespace
        /// of the next text is redundant.
        after_break: bool,
    },
    /// Inside `<pre>`, `<script>` or `<style>`: raw bytes pass through.
    Passthrough {
        /// The region to resume after the closing tag.
        return_to: Region,
        /// The element that opened the region; only its end tag closes it.
        tag: VerbatimTag,
        /// A newline was written after the opening tag and the region's
        /// first token has not been seen yet.
        after_break: bool,
    },
}

/// What one step writes: optional newline, optional text, optional newline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Emit<'t> {
    /// Write a newline before the text.
    pub break_before: bool,
    /// The text to write, borrowed from the token when unchanged.
    pub text: Option<Cow<'t, str>>,
    /// Write a newline after the text.
    pub break_after: bool,
}

impl<'t> Emit<'t> {
    /// Write nothing.
    #[must_use]
    pub fn nothing() -> Self {
        Self::default()
    }

    /// Write `text` as is.
    #[must_use]
    pub fn text(text: impl Into<Cow<'t, str>>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Write the token's source text.
    #[must_use]
    pub fn raw(token: &'t Token) -> Self {
        Self::text(token.raw.as_str())
    }

    /// Write the token's compact re-serialization.
    #[must_use]
    pub fn serialized(token: &Token) -> Self {
        Self::text(token.kind.to_string())
    }

    /// Add a trailing newline if the options ask for readability newlines.
    #[must_use]
    pub fn then_break(mut self, options: &HtmlOptions) -> Self {
        self.break_after = options.extra_newlines;
        self
    }

    /// Add a leading newline if the options ask for readability newlines.
    #[must_use]
    pub fn after_break(mut self, options: &HtmlOptions) -> Self {
        self.break_before = options.extra_newlines;
        self
    }
}

type Transition<'t> = (ReducerState, Emit<'t>);

/// Consume one token in `state`.
///
/// Returns the next state and what to write for the token.
#[must_use]
pub fn step<'t>(state: ReducerState, token: &'t Token, options: &HtmlOptions) -> Transition<'t> {
    match state {
        ReducerState::AtDoctype => at_doctype(token, options),
        ReducerState::InHead => in_head(token, options),
        ReducerState::InBody { after_break } => in_body(after_break, token, options),
        ReducerState::Passthrough {
            return_to,
            tag,
            after_break,
        } => passthrough(return_to, tag, after_break, token, options),
    }
}

/// A comment survives when stripping is off or it is a conditional comment.
fn keeps_comment(token: &Token, options: &HtmlOptions) -> bool {
    !options.strip_comments || is_conditional_comment(&token.raw)
}

fn verbatim_tag(name: &str) -> Option<VerbatimTag> {
    VerbatimTag::from_str(name).ok()
}

fn at_doctype<'t>(token: &'t Token, options: &HtmlOptions) -> Transition<'t> {
    if matches!(token.kind, TokenKind::Doctype { .. }) {
        return (ReducerState::InHead, Emit::raw(token).then_break(options));
    }
    // Not a doctype: the head handles this same token.
    in_head(token, options)
}

fn in_head<'t>(token: &'t Token, options: &HtmlOptions) -> Transition<'t> {
    let stay = ReducerState::InHead;
    match &token.kind {
        TokenKind::Comment { .. } => {
            if keeps_comment(token, options) {
                (stay, Emit::raw(token).then_break(options))
            } else {
                (stay, Emit::nothing())
            }
        }
        TokenKind::Text { .. } => (stay, Emit::text(trim_head_text(&token.raw))),
        TokenKind::StartTag { name, .. } => {
            let emit = Emit::serialized(token);
            match name.as_str() {
                "script" | "style" => {
                    let next = ReducerState::Passthrough {
                        return_to: Region::Head,
                        tag: verbatim_tag(name).unwrap_or(VerbatimTag::Script),
                        after_break: false,
                    };
                    (next, emit)
                }
                "html" | "head" | "link" | "meta" => (stay, emit.then_break(options)),
                "title" => (stay, emit),
                // Anything else starts the body, which handles this same token.
                _ => in_body(false, token, options),
            }
        }
        TokenKind::SelfClosingTag { .. } => (stay, Emit::serialized(token).then_break(options)),
        TokenKind::EndTag { name } => {
            let next = if name == "head" {
                ReducerState::InBody {
                    after_break: options.extra_newlines,
                }
            } else {
                stay
            };
            (next, Emit::serialized(token).then_break(options))
        }
        TokenKind::Doctype { .. } => (stay, Emit::raw(token)),
    }
}

fn in_body<'t>(after_break: bool, token: &'t Token, options: &HtmlOptions) -> Transition<'t> {
    let stay = ReducerState::InBody { after_break };
    let written = ReducerState::InBody { after_break: false };
    let broken = ReducerState::InBody {
        after_break: options.extra_newlines,
    };
    match &token.kind {
        TokenKind::Comment { .. } => {
            if keeps_comment(token, options) {
                (broken, Emit::raw(token).then_break(options))
            } else {
                (stay, Emit::nothing())
            }
        }
        TokenKind::Text { .. } => {
            let collapsed = collapse_whitespace(&token.raw);
            // A newline was just written; it already separates this text.
            let text = if after_break {
                collapsed.trim_start_matches(' ')
            } else {
                collapsed.as_str()
            };
            if text.is_empty() {
                (stay, Emit::nothing())
            } else {
                (written, Emit::text(text.to_string()))
            }
        }
        TokenKind::StartTag { name, .. } => {
            // Raw spacing inside start tags never affects rendering.
            let emit = Emit::serialized(token);
            if let Some(tag) = verbatim_tag(name) {
                let next = ReducerState::Passthrough {
                    return_to: Region::Body,
                    tag,
                    after_break: options.extra_newlines,
                };
                (next, emit.then_break(options))
            } else if name == "body" {
                (broken, emit.then_break(options))
            } else {
                (written, emit)
            }
        }
        TokenKind::SelfClosingTag { .. } => (written, Emit::serialized(token)),
        TokenKind::EndTag { name } => {
            let emit = Emit::serialized(token);
            if name == "body" {
                (broken, emit.after_break(options).then_break(options))
            } else {
                (written, emit)
            }
        }
        TokenKind::Doctype { .. } => (written, Emit::raw(token)),
    }
}

fn passthrough<'t>(
    return_to: Region,
    tag: VerbatimTag,
    after_break: bool,
    token: &'t Token,
    options: &HtmlOptions,
) -> Transition<'t> {
    if token.is_end_tag(tag.as_ref()) {
        let emit = Emit::serialized(token);
        return match tag {
            VerbatimTag::Script | VerbatimTag::Style => (
                return_to.state(options.extra_newlines),
                emit.then_break(options),
            ),
            VerbatimTag::Pre => (return_to.state(false), emit),
        };
    }

    let stay = ReducerState::Passthrough {
        return_to,
        tag,
        after_break: false,
    };
    let raw = if after_break && matches!(token.kind, TokenKind::Text { .. }) {
        // The newline written after the opening tag stands in for this one.
        strip_leading_break(&token.raw)
    } else {
        token.raw.as_str()
    };
    (stay, Emit::text(raw))
}
