//! HTML reducer.
//!
//! Re-emits an HTML token stream with whitespace collapsed, most comments
//! stripped and optional readability newlines inserted, leaving tag nesting
//! and the content of `<pre>`, `<script>` and `<style>` untouched.

/// The state machine and its transitions.
pub mod state;
/// Whitespace collapsing and comment classification.
pub mod text;

use std::io::{Read, Write};

use slim_common::{ReduceError, read_source, write_str};

use crate::options::HtmlOptions;
use crate::tokenizer::{HTMLTokenizer, Token, TokenizeError};

pub use state::{Emit, ReducerState, Region, VerbatimTag, step};

impl From<TokenizeError> for ReduceError {
    fn from(error: TokenizeError) -> Self {
        Self::tokenize("HTML", &error)
    }
}

impl Emit<'_> {
    /// Write this emission to the sink.
    ///
    /// # Errors
    ///
    /// Returns [`ReduceError::Write`] if the sink rejects a write.
    pub fn write_to<W: Write + ?Sized>(&self, sink: &mut W) -> Result<(), ReduceError> {
        if self.break_before {
            write_str(sink, "\n")?;
        }
        if let Some(text) = &self.text {
            write_str(sink, text)?;
        }
        if self.break_after {
            write_str(sink, "\n")?;
        }
        Ok(())
    }
}

/// Drives [`step`] over a token stream.
///
/// Owns the current state for the duration of one reduction; the token
/// stream and the sink are borrowed from the caller.
#[derive(Debug)]
pub struct Reducer<'o> {
    state: ReducerState,
    options: &'o HtmlOptions,
}

impl<'o> Reducer<'o> {
    /// A reducer at the start of a document.
    #[must_use]
    pub const fn new(options: &'o HtmlOptions) -> Self {
        Self {
            state: ReducerState::AtDoctype,
            options,
        }
    }

    /// The state the next token will be handled in.
    #[must_use]
    pub const fn state(&self) -> ReducerState {
        self.state
    }

    /// Feed one token and write its emission.
    ///
    /// # Errors
    ///
    /// Returns [`ReduceError::Write`] if the sink rejects a write.
    pub fn feed<W: Write + ?Sized>(&mut self, token: &Token, sink: &mut W) -> Result<(), ReduceError> {
        let (next, emit) = step(self.state, token, self.options);
        emit.write_to(sink)?;
        self.state = next;
        Ok(())
    }

    /// Feed tokens until the stream ends or fails.
    ///
    /// # Errors
    ///
    /// Returns the first tokenizer or sink error; output written before the
    /// error stays written.
    pub fn run<W, I>(&mut self, tokens: I, sink: &mut W) -> Result<(), ReduceError>
    where
        W: Write + ?Sized,
        I: IntoIterator<Item = Result<Token, TokenizeError>>,
    {
        for token in tokens {
            self.feed(&token?, sink)?;
        }
        Ok(())
    }
}

/// Read an HTML document from `source` and write its reduced form to `sink`.
///
/// # Errors
///
/// Returns [`ReduceError`] if the source cannot be read or is not UTF-8, the
/// tokenizer reports malformed markup, or the sink rejects a write.
pub fn reduce_html<W, R>(sink: &mut W, source: R, options: &HtmlOptions) -> Result<(), ReduceError>
where
    W: Write + ?Sized,
    R: Read,
{
    let input = read_source(source)?;
    let tokenizer = HTMLTokenizer::new(input).allow_cdata(options.allow_cdata);
    Reducer::new(options).run(tokenizer, sink)
}

/// Reduce an in-memory HTML document.
///
/// # Errors
///
/// Returns [`ReduceError::Tokenize`] if the markup is malformed.
pub fn reduce_html_str(input: &str, options: &HtmlOptions) -> Result<String, ReduceError> {
    let mut out = Vec::with_capacity(input.len());
    reduce_html(&mut out, input.as_bytes(), options)?;
    Ok(String::from_utf8(out)?)
}
