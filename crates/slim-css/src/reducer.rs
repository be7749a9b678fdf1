//! CSS reducer.
//!
//! A single-state loop over the token stream with a one-slot hold buffer.
//! Whitespace and the punctuation marks `; { , . :` are withheld until the
//! next token shows whether they are redundant; everything else is written
//! as soon as it is seen.

use std::io::{Read, Write};

use slim_common::{ReduceError, read_source, write_str};

use crate::options::CssOptions;
use crate::tokenizer::{CSSToken, CSSTokenKind, CSSTokenizer, TokenizeError};

/// Punctuation that swallows whitespace on both sides.
const COALESCING_PUNCTUATION: [char; 5] = [';', '{', ',', '.', ':'];

impl From<TokenizeError> for ReduceError {
    fn from(error: TokenizeError) -> Self {
        Self::tokenize("CSS", &error)
    }
}

/// The token in the hold buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Held {
    /// A whitespace run, written as one space if it survives.
    Space,
    /// One of `; { , . :`.
    Punct(char),
    /// Output that whitespace must not follow: the start of the stylesheet,
    /// a `}` or a protected comment. Writes nothing.
    Barrier,
}

impl Held {
    fn write_to<W: Write + ?Sized>(self, sink: &mut W) -> Result<(), ReduceError> {
        match self {
            Self::Space => write_str(sink, " "),
            Self::Punct(c) => write_str(sink, c.encode_utf8(&mut [0; 4])),
            Self::Barrier => Ok(()),
        }
    }
}

/// Streams CSS tokens to a sink, dropping redundant whitespace, comments and
/// semicolons.
#[derive(Debug)]
pub struct Reducer<'o> {
    held: Option<Held>,
    options: &'o CssOptions,
}

impl<'o> Reducer<'o> {
    /// A reducer at the start of a stylesheet.
    #[must_use]
    pub const fn new(options: &'o CssOptions) -> Self {
        Self {
            held: Some(Held::Barrier),
            options,
        }
    }

    /// The token currently withheld from the sink.
    #[must_use]
    pub const fn held(&self) -> Option<Held> {
        self.held
    }

    /// Feed one token, writing whatever it settles.
    ///
    /// # Errors
    ///
    /// Returns [`ReduceError::Write`] if the sink rejects a write.
    pub fn feed<W: Write + ?Sized>(&mut self, token: &CSSToken, sink: &mut W) -> Result<(), ReduceError> {
        match token.kind {
            CSSTokenKind::Comment if self.options.keeps_comment(&token.raw) => {
                if let Some(held @ Held::Punct(_)) = self.held.take() {
                    held.write_to(sink)?;
                }
                write_str(sink, &token.raw)?;
                self.held = Some(Held::Barrier);
            }
            CSSTokenKind::Comment => {}
            CSSTokenKind::Whitespace => {
                if self.held.is_none() {
                    self.held = Some(Held::Space);
                }
            }
            CSSTokenKind::Char('}') => {
                match self.held.take() {
                    // Whitespace and a last semicolon are redundant before `}`.
                    None | Some(Held::Space | Held::Barrier | Held::Punct(';')) => {}
                    Some(held) => held.write_to(sink)?,
                }
                write_str(sink, "}")?;
                if self.options.line_breaks_after_rules {
                    write_str(sink, "\n")?;
                }
                self.held = Some(Held::Barrier);
            }
            CSSTokenKind::Char(c) if COALESCING_PUNCTUATION.contains(&c) => {
                if self.held == Some(Held::Space) {
                    self.held = None;
                }
                self.hold(Held::Punct(c), sink)?;
            }
            _ => {
                self.flush(sink)?;
                write_str(sink, &token.raw)?;
            }
        }
        Ok(())
    }

    /// Replace the held token with `next`, writing the old one unless both
    /// are `;`. Other repeats are written: `::` opens a pseudo-element.
    fn hold<W: Write + ?Sized>(&mut self, next: Held, sink: &mut W) -> Result<(), ReduceError> {
        if let Some(held) = self.held.take()
            && !(held == Held::Punct(';') && next == Held::Punct(';'))
        {
            held.write_to(sink)?;
        }
        self.held = Some(next);
        Ok(())
    }

    /// Write and clear the held token.
    fn flush<W: Write + ?Sized>(&mut self, sink: &mut W) -> Result<(), ReduceError> {
        match self.held.take() {
            Some(held) => held.write_to(sink),
            None => Ok(()),
        }
    }

    /// End of stream: held punctuation is written, a held space is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ReduceError::Write`] if the sink rejects a write.
    pub fn finish<W: Write + ?Sized>(&mut self, sink: &mut W) -> Result<(), ReduceError> {
        match self.held.take() {
            Some(held @ Held::Punct(_)) => held.write_to(sink),
            _ => Ok(()),
        }
    }

    /// Feed tokens until the stream ends, then [`finish`](Self::finish).
    ///
    /// # Errors
    ///
    /// Returns the first tokenizer or sink error; output written before the
    /// error stays written and the held token is discarded.
    pub fn run<W, I>(&mut self, tokens: I, sink: &mut W) -> Result<(), ReduceError>
    where
        W: Write + ?Sized,
        I: IntoIterator<Item = Result<CSSToken, TokenizeError>>,
    {
        for token in tokens {
            self.feed(&token?, sink)?;
        }
        self.finish(sink)
    }
}

/// Read a stylesheet from `source` and write its reduced form to `sink`.
///
/// # Errors
///
/// Returns [`ReduceError`] if the source cannot be read or is not UTF-8, the
/// tokenizer reports malformed CSS, or the sink rejects a write.
pub fn reduce_css<W, R>(sink: &mut W, source: R, options: &CssOptions) -> Result<(), ReduceError>
where
    W: Write + ?Sized,
    R: Read,
{
    let input = read_source(source)?;
    Reducer::new(options).run(CSSTokenizer::new(input), sink)
}

/// Reduce an in-memory stylesheet.
///
/// # Errors
///
/// Returns [`ReduceError::Tokenize`] if the CSS is malformed.
pub fn reduce_css_str(input: &str, options: &CssOptions) -> Result<String, ReduceError> {
    let mut out = Vec::with_capacity(input.len());
    reduce_css(&mut out, input.as_bytes(), options)?;
    Ok(String::from_utf8(out)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(kind: CSSTokenKind, raw: &str) -> CSSToken {
        CSSToken::new(kind, raw)
    }

    fn feed_all(reducer: &mut Reducer<'_>, tokens: &[CSSToken]) -> String {
        let mut out = Vec::new();
        for t in tokens {
            reducer.feed(t, &mut out).unwrap();
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_starts_with_barrier() {
        let options = CssOptions::default();
        let mut reducer = Reducer::new(&options);
        let out = feed_all(
            &mut reducer,
            &[
                token(CSSTokenKind::Whitespace, "\n  "),
                token(CSSTokenKind::Ident("a".to_string()), "a"),
            ],
        );
        assert_eq!(out, "a");
        assert_eq!(reducer.held(), None);
    }

    #[test]
    fn test_whitespace_is_held_as_one_space() {
        let options = CssOptions::default();
        let mut reducer = Reducer::new(&options);
        let out = feed_all(
            &mut reducer,
            &[
                token(CSSTokenKind::Ident("a".to_string()), "a"),
                token(CSSTokenKind::Whitespace, "\t\n "),
            ],
        );
        assert_eq!(out, "a");
        assert_eq!(reducer.held(), Some(Held::Space));
    }

    #[test]
    fn test_repeated_punctuation_collapses() {
        let options = CssOptions::default();
        let mut reducer = Reducer::new(&options);
        let out = feed_all(
            &mut reducer,
            &[
                token(CSSTokenKind::Char(';'), ";"),
                token(CSSTokenKind::Char(';'), ";"),
                token(CSSTokenKind::Char(':'), ":"),
            ],
        );
        assert_eq!(out, ";");
        assert_eq!(reducer.held(), Some(Held::Punct(':')));
    }

    #[test]
    fn test_double_colon_survives() {
        let options = CssOptions::default();
        let mut reducer = Reducer::new(&options);
        let out = feed_all(
            &mut reducer,
            &[
                token(CSSTokenKind::Char(':'), ":"),
                token(CSSTokenKind::Char(':'), ":"),
                token(CSSTokenKind::Ident("before".to_string()), "before"),
            ],
        );
        assert_eq!(out, "::before");
    }

    #[test]
    fn test_closing_brace_keeps_held_open_brace() {
        let options = CssOptions::default();
        let mut reducer = Reducer::new(&options);
        let out = feed_all(
            &mut reducer,
            &[
                token(CSSTokenKind::Char('{'), "{"),
                token(CSSTokenKind::Char('}'), "}"),
            ],
        );
        assert_eq!(out, "{}");
        assert_eq!(reducer.held(), Some(Held::Barrier));
    }

    #[test]
    fn test_finish_writes_punctuation_only() {
        let options = CssOptions::default();
        let mut out = Vec::new();

        let mut reducer = Reducer::new(&options);
        reducer.feed(&token(CSSTokenKind::Char(','), ","), &mut out).unwrap();
        reducer.finish(&mut out).unwrap();
        assert_eq!(out, b",");

        out.clear();
        let mut reducer = Reducer::new(&options);
        reducer
            .feed(&token(CSSTokenKind::Ident("a".to_string()), "a"), &mut out)
            .unwrap();
        reducer.feed(&token(CSSTokenKind::Whitespace, " "), &mut out).unwrap();
        reducer.finish(&mut out).unwrap();
        assert_eq!(out, b"a");
    }
}
