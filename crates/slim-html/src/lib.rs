//! HTML tokenizer and reducer for slim.
//!
//! # Scope
//!
//! This crate implements:
//! - **HTML Tokenizer** - a lazy scanner producing doctype, tag, comment and
//!   text tokens that keep their exact source text
//!   - Raw text handling for `script`, `style`, `title`, `textarea` and friends
//!   - Optional CDATA-as-text
//!
//! - **HTML Reducer** - a state machine over that token stream
//!   - States: `AtDoctype`, `InHead`, `InBody`, `Passthrough`
//!   - Whitespace collapsing, comment stripping, conditional comment detection
//!
//! # Not Implemented
//!
//! - Tree construction or any tag nesting repair
//! - Character reference decoding (attribute values pass through as written)

/// Reducer options.
pub mod options;
/// HTML reduction state machine.
pub mod reducer;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

pub use options::HtmlOptions;
pub use reducer::{Reducer, ReducerState, reduce_html, reduce_html_str};
pub use tokenizer::{Attribute, HTMLTokenizer, Token, TokenKind, TokenizeError};
