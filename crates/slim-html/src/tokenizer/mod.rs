//! HTML tokenizer module.
//!
//! Scans HTML source into [`Token`]s that keep both their decoded form and
//! their exact source text. Tokens are produced lazily, one per call.

/// Helper methods for input handling and lookahead.
mod helpers;
/// Tokenizer state machine implementation.
pub mod lexer;
/// Token types produced by the tokenizer.
pub mod token;

pub use lexer::{HTMLTokenizer, TokenizeError};
pub use token::{Attribute, Token, TokenKind};
