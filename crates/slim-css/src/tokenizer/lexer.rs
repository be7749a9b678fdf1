use slim_common::warning::warn_once;
use thiserror::Error;

use super::token::{CSSToken, CSSTokenKind, HashType, NumericType};

/// Malformed CSS the tokenizer cannot recover from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenizeError {
    /// `/*` without a closing `*/`.
    #[error("unterminated comment starting at byte {offset}")]
    UnterminatedComment {
        /// Byte offset of the `/*`.
        offset: usize,
    },

    /// A string ran into a newline or the end of input.
    #[error("unterminated string starting at byte {offset}")]
    UnterminatedString {
        /// Byte offset of the opening quote.
        offset: usize,
    },

    /// `url(` without a closing `)`.
    #[error("unterminated url starting at byte {offset}")]
    UnterminatedUrl {
        /// Byte offset of `url(`.
        offset: usize,
    },

    /// An unquoted url containing a quote, `(`, inner whitespace or a
    /// non-printable code point.
    #[error("malformed url starting at byte {offset}")]
    BadUrl {
        /// Byte offset of `url(`.
        offset: usize,
    },
}

/// [§ 4.3 Tokenizer Algorithms](https://www.w3.org/TR/css-syntax-3/#tokenizer-algorithms)
///
/// A lazy, forward-only CSS tokenizer. Comments and whitespace runs are
/// returned as tokens, and every token keeps its source text, so the raw
/// text of all tokens concatenated is the input.
#[derive(Debug)]
pub struct CSSTokenizer {
    /// The input string being tokenized
    input: String,
    /// Byte offset of the next unconsumed character
    position: usize,
    /// Set after end of input or an error
    finished: bool,
}

impl CSSTokenizer {
    /// Create a new CSS tokenizer with the given input.
    #[must_use]
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            position: 0,
            finished: false,
        }
    }

    /// Byte offset of the next unconsumed character.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// [§ 4.3.1 Consume a token](https://www.w3.org/TR/css-syntax-3/#consume-token)
    fn next_token(&mut self) -> Result<Option<CSSToken>, TokenizeError> {
        let start = self.position;
        let Some(c) = self.peek() else {
            return Ok(None);
        };

        let kind = if self.next_few_characters_are("/*") {
            self.consume_comment(start)?
        } else if is_whitespace(c) {
            // "Consume as much whitespace as possible. Return a <whitespace-token>."
            let _ = self.consume_while(is_whitespace);
            CSSTokenKind::Whitespace
        } else if self.would_start_number() {
            self.consume_numeric_token()
        } else if self.next_few_characters_are("<!--") {
            self.position += "<!--".len();
            CSSTokenKind::Cdo
        } else if self.next_few_characters_are("-->") {
            self.position += "-->".len();
            CSSTokenKind::Cdc
        } else if self.would_start_unicode_range() {
            self.consume_unicode_range();
            CSSTokenKind::UnicodeRange
        } else if self.would_start_ident_sequence() {
            self.consume_ident_like_token(start)?
        } else {
            let _ = self.consume();
            match c {
                '"' | '\'' => self.consume_string_token(start, c)?,
                '#' => self.consume_hash_token(),
                '@' if self.would_start_ident_sequence() => {
                    CSSTokenKind::AtKeyword(self.consume_ident_sequence())
                }
                '\\' => {
                    // "This is a parse error."
                    self.log_parse_error("invalid escape");
                    CSSTokenKind::Char('\\')
                }
                c => CSSTokenKind::Char(c),
            }
        };

        Ok(Some(CSSToken::new(kind, &self.input[start..self.position])))
    }

    /// [§ 4.3.2 Consume comments](https://www.w3.org/TR/css-syntax-3/#consume-comment)
    fn consume_comment(&mut self, start: usize) -> Result<CSSTokenKind, TokenizeError> {
        self.position += "/*".len();
        match self.input[self.position..].find("*/") {
            Some(end) => {
                self.position += end + "*/".len();
                Ok(CSSTokenKind::Comment)
            }
            None => {
                self.position = self.input.len();
                Err(TokenizeError::UnterminatedComment { offset: start })
            }
        }
    }

    /// [§ 4.3.4 Consume a string token](https://www.w3.org/TR/css-syntax-3/#consume-string-token)
    ///
    /// The opening quote has been consumed. A bad string is an error here.
    fn consume_string_token(
        &mut self,
        start: usize,
        ending_code_point: char,
    ) -> Result<CSSTokenKind, TokenizeError> {
        let unterminated = TokenizeError::UnterminatedString { offset: start };
        let mut value = String::new();
        loop {
            match self.consume() {
                Some(c) if c == ending_code_point => return Ok(CSSTokenKind::String(value)),
                None | Some('\n' | '\r' | '\x0C') => return Err(unterminated),
                Some('\\') => match self.peek() {
                    None => {}
                    // An escaped newline continues the string.
                    Some('\n') => {
                        let _ = self.consume();
                    }
                    Some(_) => value.push(self.consume_escaped_code_point()),
                },
                Some(c) => value.push(c),
            }
        }
    }

    /// "U+0023 NUMBER SIGN (#)", already consumed.
    fn consume_hash_token(&mut self) -> CSSTokenKind {
        // "If the next input code point is an ident code point or the next
        // two input code points are a valid escape..."
        if self.peek().is_some_and(is_ident_code_point)
            || is_valid_escape(self.peek(), self.peek_at(1))
        {
            let hash_type = if self.would_start_ident_sequence() {
                HashType::Id
            } else {
                HashType::Unrestricted
            };
            let value = self.consume_ident_sequence();
            CSSTokenKind::Hash { value, hash_type }
        } else {
            CSSTokenKind::Char('#')
        }
    }

    /// [§ 4.3.5 Consume a numeric token](https://www.w3.org/TR/css-syntax-3/#consume-numeric-token)
    fn consume_numeric_token(&mut self) -> CSSTokenKind {
        let (value, numeric_type) = self.consume_number();

        if self.would_start_ident_sequence() {
            let unit = self.consume_ident_sequence();
            CSSTokenKind::Dimension {
                value,
                numeric_type,
                unit,
            }
        } else if self.peek() == Some('%') {
            let _ = self.consume();
            CSSTokenKind::Percentage {
                value,
                numeric_type,
            }
        } else {
            CSSTokenKind::Number {
                value,
                numeric_type,
            }
        }
    }

    /// [§ 4.3.6 Consume an ident-like token](https://www.w3.org/TR/css-syntax-3/#consume-ident-like-token)
    fn consume_ident_like_token(&mut self, start: usize) -> Result<CSSTokenKind, TokenizeError> {
        let string = self.consume_ident_sequence();

        if string.eq_ignore_ascii_case("url") && self.peek() == Some('(') {
            let _ = self.consume();
            let _ = self.consume_while(is_whitespace);
            // A quoted url is a function call followed by a string token.
            if matches!(self.peek(), Some('"' | '\'')) {
                return Ok(CSSTokenKind::Function(string));
            }
            return self.consume_url_token(start);
        }
        if self.peek() == Some('(') {
            let _ = self.consume();
            return Ok(CSSTokenKind::Function(string));
        }
        Ok(CSSTokenKind::Ident(string))
    }

    /// [§ 4.3.7 Consume a url token](https://www.w3.org/TR/css-syntax-3/#consume-url-token)
    fn consume_url_token(&mut self, start: usize) -> Result<CSSTokenKind, TokenizeError> {
        let unterminated = TokenizeError::UnterminatedUrl { offset: start };
        let bad = TokenizeError::BadUrl { offset: start };
        let mut value = String::new();
        loop {
            match self.consume() {
                Some(')') => return Ok(CSSTokenKind::Url(value)),
                None => return Err(unterminated),
                Some(c) if is_whitespace(c) => {
                    let _ = self.consume_while(is_whitespace);
                    return match self.consume() {
                        Some(')') => Ok(CSSTokenKind::Url(value)),
                        None => Err(unterminated),
                        Some(_) => Err(bad),
                    };
                }
                Some('"' | '\'' | '(') => return Err(bad),
                Some(c) if is_non_printable(c) => return Err(bad),
                Some('\\') => {
                    if !is_valid_escape(Some('\\'), self.peek()) {
                        return Err(bad);
                    }
                    value.push(self.consume_escaped_code_point());
                }
                Some(c) => value.push(c),
            }
        }
    }

    /// `U+` followed by up to six hex digits or `?`, and an optional `-` range end.
    fn consume_unicode_range(&mut self) {
        self.position += "u+".len();
        let mut count = 0;
        while count < 6 && self.peek().is_some_and(|c| c.is_ascii_hexdigit() || c == '?') {
            let _ = self.consume();
            count += 1;
        }
        if self.peek() == Some('-') && self.peek_at(1).is_some_and(|c| c.is_ascii_hexdigit()) {
            let _ = self.consume();
            let mut count = 0;
            while count < 6 && self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                let _ = self.consume();
                count += 1;
            }
        }
    }

    /// [§ 4.3.11 Consume an ident sequence](https://www.w3.org/TR/css-syntax-3/#consume-name)
    fn consume_ident_sequence(&mut self) -> String {
        let mut result = String::new();
        loop {
            match self.peek() {
                // "ident code point"
                Some(c) if is_ident_code_point(c) => {
                    let _ = self.consume();
                    result.push(c);
                }
                // "the stream starts with a valid escape"
                Some('\\') if is_valid_escape(Some('\\'), self.peek_at(1)) => {
                    let _ = self.consume();
                    result.push(self.consume_escaped_code_point());
                }
                // "anything else"
                _ => return result,
            }
        }
    }

    /// [§ 4.3.12 Consume a number](https://www.w3.org/TR/css-syntax-3/#consume-number)
    fn consume_number(&mut self) -> (f64, NumericType) {
        let start = self.position;
        let mut numeric_type = NumericType::Integer;
        let is_digit = |c: char| c.is_ascii_digit();

        if matches!(self.peek(), Some('+' | '-')) {
            let _ = self.consume();
        }
        let _ = self.consume_while(is_digit);

        // "If the next 2 input code points are U+002E FULL STOP (.) followed by a digit..."
        if self.peek() == Some('.') && self.peek_at(1).is_some_and(is_digit) {
            let _ = self.consume();
            let _ = self.consume_while(is_digit);
            numeric_type = NumericType::Number;
        }

        // "E or e, optionally followed by - or +, followed by a digit"
        if matches!(self.peek(), Some('e' | 'E')) {
            let has_sign = matches!(self.peek_at(1), Some('+' | '-'));
            let digit_pos = if has_sign { 2 } else { 1 };
            if self.peek_at(digit_pos).is_some_and(is_digit) {
                let _ = self.consume();
                if has_sign {
                    let _ = self.consume();
                }
                let _ = self.consume_while(is_digit);
                numeric_type = NumericType::Number;
            }
        }

        let value = self.input[start..self.position].parse().unwrap_or(0.0);
        (value, numeric_type)
    }

    /// [§ 4.3.13 Consume an escaped code point](https://www.w3.org/TR/css-syntax-3/#consume-escaped-code-point)
    ///
    /// The backslash has been consumed.
    fn consume_escaped_code_point(&mut self) -> char {
        match self.consume() {
            Some(c) if c.is_ascii_hexdigit() => {
                let mut hex = c.to_string();
                // "Consume as many hex digits as possible, but no more than 5."
                while hex.len() < 6 {
                    match self.peek() {
                        Some(d) if d.is_ascii_hexdigit() => {
                            let _ = self.consume();
                            hex.push(d);
                        }
                        _ => break,
                    }
                }
                // "If the next input code point is whitespace, consume it."
                if self.peek().is_some_and(is_whitespace) {
                    let _ = self.consume();
                }
                u32::from_str_radix(&hex, 16)
                    .ok()
                    .filter(|&code_point| code_point != 0)
                    .and_then(char::from_u32)
                    .unwrap_or('\u{FFFD}')
            }
            // "EOF: This is a parse error. Return U+FFFD REPLACEMENT CHARACTER."
            None => {
                self.log_parse_error("escape at end of input");
                '\u{FFFD}'
            }
            Some(c) => c,
        }
    }

    /// [§ 4.3.9 Check if three code points would start an ident sequence](https://www.w3.org/TR/css-syntax-3/#would-start-an-identifier)
    fn would_start_ident_sequence(&self) -> bool {
        match self.peek() {
            Some('-') => {
                let second = self.peek_at(1);
                second.is_some_and(is_ident_start_code_point)
                    || second == Some('-')
                    || is_valid_escape(second, self.peek_at(2))
            }
            Some(c) if is_ident_start_code_point(c) => true,
            Some('\\') => is_valid_escape(Some('\\'), self.peek_at(1)),
            _ => false,
        }
    }

    /// [§ 4.3.10 Check if three code points would start a number](https://www.w3.org/TR/css-syntax-3/#starts-with-a-number)
    fn would_start_number(&self) -> bool {
        let is_digit = |c: char| c.is_ascii_digit();
        match self.peek() {
            Some('+' | '-') => {
                let second = self.peek_at(1);
                second.is_some_and(is_digit)
                    || (second == Some('.') && self.peek_at(2).is_some_and(is_digit))
            }
            Some('.') => self.peek_at(1).is_some_and(is_digit),
            Some(c) => is_digit(c),
            None => false,
        }
    }

    /// `u+` or `U+` followed by a hex digit or `?`.
    fn would_start_unicode_range(&self) -> bool {
        matches!(self.peek(), Some('u' | 'U'))
            && self.peek_at(1) == Some('+')
            && self
                .peek_at(2)
                .is_some_and(|c| c.is_ascii_hexdigit() || c == '?')
    }

    /// Consume and return the next character.
    fn consume(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += c.len_utf8();
        Some(c)
    }

    /// Consume characters while `predicate` holds and return where the run started.
    fn consume_while(&mut self, predicate: impl Fn(char) -> bool) -> usize {
        let start = self.position;
        while self.peek().is_some_and(&predicate) {
            let _ = self.consume();
        }
        start
    }

    /// Peek at the next character without consuming it.
    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// Peek at a character at an offset from current position.
    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input[self.position..].chars().nth(offset)
    }

    fn next_few_characters_are(&self, target: &str) -> bool {
        self.input[self.position..].starts_with(target)
    }

    fn log_parse_error(&self, message: &str) {
        let pos = self.position;
        warn_once("CSS Tokenizer", &format!("{message} at byte {pos}"));
    }
}

impl Iterator for CSSTokenizer {
    type Item = Result<CSSToken, TokenizeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.next_token();
        if !matches!(result, Ok(Some(_))) {
            self.finished = true;
        }
        result.transpose()
    }
}

impl std::iter::FusedIterator for CSSTokenizer {}

/// [§ 4.3.8 Check if two code points are a valid escape](https://www.w3.org/TR/css-syntax-3/#starts-with-a-valid-escape)
fn is_valid_escape(first: Option<char>, second: Option<char>) -> bool {
    first == Some('\\') && second != Some('\n')
}

/// [§ 4.2 Definitions - whitespace](https://www.w3.org/TR/css-syntax-3/#whitespace)
///
/// "A newline, U+0009 CHARACTER TABULATION, or U+0020 SPACE."
const fn is_whitespace(c: char) -> bool {
    matches!(c, '\n' | '\t' | ' ' | '\r' | '\x0C')
}

/// [§ 4.2 Definitions - ident-start code point](https://www.w3.org/TR/css-syntax-3/#ident-start-code-point)
///
/// "A letter, a non-ASCII code point, or U+005F LOW LINE (_)."
const fn is_ident_start_code_point(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

/// [§ 4.2 Definitions - ident code point](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
///
/// "An ident-start code point, a digit, or U+002D HYPHEN-MINUS (-)."
const fn is_ident_code_point(c: char) -> bool {
    is_ident_start_code_point(c) || c.is_ascii_digit() || c == '-'
}

/// [§ 4.2 Definitions - non-printable code point](https://www.w3.org/TR/css-syntax-3/#non-printable-code-point)
const fn is_non_printable(c: char) -> bool {
    matches!(c, '\0'..='\x08' | '\x0B' | '\x0E'..='\x1F' | '\x7F')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<CSSTokenKind> {
        CSSTokenizer::new(input)
            .map(|token| token.map(|t| t.kind))
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn test_escaped_ident() {
        assert_eq!(kinds(r"\31 0"), vec![CSSTokenKind::Ident("10".to_string())]);
    }

    #[test]
    fn test_invalid_escape_is_a_char() {
        assert_eq!(
            kinds("\\\n"),
            vec![CSSTokenKind::Char('\\'), CSSTokenKind::Whitespace]
        );
    }

    #[test]
    fn test_fused_after_error() {
        let mut tokenizer = CSSTokenizer::new("a /* open");
        assert!(matches!(tokenizer.next(), Some(Ok(_))));
        assert!(matches!(tokenizer.next(), Some(Ok(_))));
        assert_eq!(
            tokenizer.next(),
            Some(Err(TokenizeError::UnterminatedComment { offset: 2 }))
        );
        assert!(tokenizer.next().is_none());
    }

    #[test]
    fn test_non_printable() {
        assert!(is_non_printable('\x01'));
        assert!(!is_non_printable('\n'));
        assert!(!is_non_printable('a'));
    }
}
