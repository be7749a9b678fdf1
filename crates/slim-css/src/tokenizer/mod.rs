//! CSS tokenizer module.

/// Tokenizer implementation.
pub mod lexer;
/// CSS token types per [CSS Syntax Level 3 § 4](https://www.w3.org/TR/css-syntax-3/#tokenization).
pub mod token;

pub use lexer::{CSSTokenizer, TokenizeError};
pub use token::{CSSToken, CSSTokenKind, HashType, NumericType};
