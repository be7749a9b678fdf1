//! CSS token types per [§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization).
//!
//! Single code point tokens (`<colon-token>`, `<{-token>`, `<delim-token>`
//! and the rest) are folded into [`CSSTokenKind::Char`], since the reducer
//! only ever asks which character it saw. Comments are tokens here rather
//! than being consumed silently, because some of them must survive.

use core::fmt;

/// [§ 4.2 Definitions](https://www.w3.org/TR/css-syntax-3/#token-diagrams)
///
/// "A `<hash-token>` with the type flag set to 'id'... or 'unrestricted'."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashType {
    /// "id" - the hash token's value is a valid identifier
    Id,
    /// "unrestricted" - the hash token's value is not a valid identifier
    Unrestricted,
}

/// [§ 4.2 Definitions](https://www.w3.org/TR/css-syntax-3/#token-diagrams)
///
/// "A `<number-token>` has a type flag set to either 'integer' or 'number'."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericType {
    /// "integer" - the number is an integer
    Integer,
    /// "number" - the number has a decimal point or exponent
    Number,
}

/// The classification of a [`CSSToken`] with its decoded value.
#[derive(Debug, Clone, PartialEq)]
pub enum CSSTokenKind {
    /// `/* ... */`
    Comment,

    /// "`<whitespace-token>`"
    /// "represents one or more whitespace code points"
    Whitespace,

    /// A single punctuation or delimiter code point: `{ } ( ) [ ] ; : ,`
    /// and every `<delim-token>`.
    Char(char),

    /// "`<ident-token>`"
    Ident(String),

    /// "`<at-keyword-token>`", value without the `@`.
    AtKeyword(String),

    /// "`<hash-token>`", value without the `#`.
    Hash {
        /// Escapes resolved.
        value: String,
        /// "a type flag set to either 'id' or 'unrestricted'"
        hash_type: HashType,
    },

    /// "`<function-token>`", name without the `(`.
    Function(String),

    /// "`<string-token>`", value without the quotes.
    String(String),

    /// "`<url-token>`", the unquoted argument of `url(...)`.
    Url(String),

    /// "`<number-token>`"
    Number {
        /// "a numeric value"
        value: f64,
        /// "a type flag set to either 'integer' or 'number'"
        numeric_type: NumericType,
    },

    /// "`<percentage-token>`"
    Percentage {
        /// "a numeric value"
        value: f64,
        /// "a type flag set to either 'integer' or 'number'"
        numeric_type: NumericType,
    },

    /// "`<dimension-token>`"
    Dimension {
        /// "a numeric value"
        value: f64,
        /// "a type flag set to either 'integer' or 'number'"
        numeric_type: NumericType,
        /// "a unit"
        unit: String,
    },

    /// `U+0025-00FF`, `u+4??`
    UnicodeRange,

    /// "`<CDO-token>`" (`<!--`)
    Cdo,

    /// "`<CDC-token>`" (`-->`)
    Cdc,
}

/// A classified unit of CSS source with the exact text it was scanned from.
#[derive(Debug, Clone, PartialEq)]
pub struct CSSToken {
    /// Classification and decoded value.
    pub kind: CSSTokenKind,
    /// Source text of the token.
    pub raw: String,
}

impl CSSToken {
    /// Create a token from its kind and source text.
    #[must_use]
    pub fn new(kind: CSSTokenKind, raw: impl Into<String>) -> Self {
        Self {
            kind,
            raw: raw.into(),
        }
    }

    /// Returns true if this is a whitespace token.
    #[must_use]
    pub const fn is_whitespace(&self) -> bool {
        matches!(self.kind, CSSTokenKind::Whitespace)
    }

    /// Returns true if this is a comment token.
    #[must_use]
    pub const fn is_comment(&self) -> bool {
        matches!(self.kind, CSSTokenKind::Comment)
    }

    /// The character of a [`CSSTokenKind::Char`] token.
    #[must_use]
    pub const fn as_char(&self) -> Option<char> {
        match self.kind {
            CSSTokenKind::Char(c) => Some(c),
            _ => None,
        }
    }
}

impl fmt::Display for CSSTokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Comment => write!(f, "<comment>"),
            Self::Whitespace => write!(f, "<whitespace>"),
            Self::Char(c) => write!(f, "<char:{c}>"),
            Self::Ident(v) => write!(f, "<ident:{v}>"),
            Self::AtKeyword(v) => write!(f, "<at-keyword:@{v}>"),
            Self::Hash { value, hash_type } => {
                let t = match hash_type {
                    HashType::Id => "id",
                    HashType::Unrestricted => "unrestricted",
                };
                write!(f, "<hash:#{value} ({t})>")
            }
            Self::Function(v) => write!(f, "<function:{v}(>"),
            Self::String(v) => write!(f, "<string:\"{v}\">"),
            Self::Url(v) => write!(f, "<url:{v}>"),
            Self::Number { value, .. } => write!(f, "<number:{value}>"),
            Self::Percentage { value, .. } => write!(f, "<percentage:{value}%>"),
            Self::Dimension { value, unit, .. } => write!(f, "<dimension:{value}{unit}>"),
            Self::UnicodeRange => write!(f, "<unicode-range>"),
            Self::Cdo => write!(f, "<CDO>"),
            Self::Cdc => write!(f, "<CDC>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_kind() {
        assert_eq!(CSSTokenKind::Char('{').to_string(), "<char:{>");
        assert_eq!(
            CSSTokenKind::Hash {
                value: "main".to_string(),
                hash_type: HashType::Id
            }
            .to_string(),
            "<hash:#main (id)>"
        );
    }

    #[test]
    fn test_as_char() {
        assert_eq!(CSSToken::new(CSSTokenKind::Char(';'), ";").as_char(), Some(';'));
        assert_eq!(CSSToken::new(CSSTokenKind::Whitespace, " ").as_char(), None);
    }
}
