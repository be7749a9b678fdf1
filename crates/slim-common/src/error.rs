//! The error type shared by the HTML and CSS reducers.
//!
//! Every failure is fatal to the reduction that hit it: the pass stops at the
//! first error and bytes already written to the sink stay written.

use std::io::{Read, Write};
use std::string::FromUtf8Error;

use thiserror::Error;

/// Any failure while reducing a document.
#[derive(Debug, Error)]
pub enum ReduceError {
    /// The byte source could not be read.
    #[error("failed to read input: {0}")]
    Read(#[source] std::io::Error),

    /// The sink rejected a write.
    #[error("failed to write output: {0}")]
    Write(#[source] std::io::Error),

    /// The source bytes are not UTF-8.
    #[error("input is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] FromUtf8Error),

    /// The tokenizer reported malformed input.
    #[error("{language} syntax error: {message}")]
    Tokenize {
        /// Which tokenizer failed ("HTML" or "CSS").
        language: &'static str,
        /// What went wrong, including the byte offset.
        message: String,
    },
}

impl ReduceError {
    /// Build a [`ReduceError::Tokenize`] from any displayable tokenizer error.
    #[must_use]
    pub fn tokenize(language: &'static str, error: &impl std::fmt::Display) -> Self {
        Self::Tokenize {
            language,
            message: error.to_string(),
        }
    }
}

/// Read the whole source into a `String`.
///
/// The tokenizers work on owned UTF-8 text, so the source is drained up front.
///
/// # Errors
///
/// Returns [`ReduceError::Read`] if the source fails and
/// [`ReduceError::InvalidUtf8`] if the bytes are not UTF-8.
pub fn read_source(mut source: impl Read) -> Result<String, ReduceError> {
    let mut bytes = Vec::new();
    let _ = source.read_to_end(&mut bytes).map_err(ReduceError::Read)?;
    Ok(String::from_utf8(bytes)?)
}

/// Write `text` to the sink, mapping failures to [`ReduceError::Write`].
///
/// # Errors
///
/// Returns [`ReduceError::Write`] if the sink rejects the bytes.
pub fn write_str<W: Write + ?Sized>(sink: &mut W, text: &str) -> Result<(), ReduceError> {
    if text.is_empty() {
        return Ok(());
    }
    sink.write_all(text.as_bytes()).map_err(ReduceError::Write)
}
