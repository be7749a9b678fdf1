//! CSS tokenizer and reducer for slim.
//!
//! # Scope
//!
//! This crate implements:
//! - **CSS Tokenizer** - [CSS Syntax Level 3 § 4](https://www.w3.org/TR/css-syntax-3/#tokenization)
//!   with comments kept as tokens and the source text of every token preserved
//!
//! - **CSS Reducer** - whitespace and comment removal around `{ } ; : , .`
//!   with an optional newline after each rule and optional `/*!` comment
//!   preservation
//!
//! # Not Implemented
//!
//! - Parsing into rules and declarations
//! - Value rewriting (colors, zero units, shorthand merging)

/// Reducer options.
pub mod options;
/// Hold-buffer reduction loop.
pub mod reducer;
/// CSS tokenizer for converting input into tokens.
pub mod tokenizer;

pub use options::{CssOptions, EXCLAMATION_COMMENT_PREFIX};
pub use reducer::{Held, Reducer, reduce_css, reduce_css_str};
pub use tokenizer::{CSSToken, CSSTokenKind, CSSTokenizer, TokenizeError};
