//! Helper functions for the HTML tokenizer.
//!
//! This module contains utility functions used throughout the tokenizer:
//! - Input/character handling ("Consume the next input character")
//! - Lookahead ("If the next few characters are...")
//! - Raw-text end tag search
//! - Error reporting through the shared warning system

use slim_common::warning::warn_once;

use super::lexer::HTMLTokenizer;

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl HTMLTokenizer {
    /// Returns true once every input character has been consumed.
    pub(super) fn at_eof(&self) -> bool {
        self.position >= self.input.len()
    }

    /// "Consume the next input character"
    ///
    /// Returns the character at the current position and advances the position.
    /// Returns None if we've reached the end of input.
    pub(super) fn consume(&mut self) -> Option<char> {
        let c = self.input[self.position..].chars().next()?;
        self.position += c.len_utf8();
        Some(c)
    }

    /// Peek at the current character without consuming it.
    pub(super) fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// Consume characters while `predicate` holds and return where the run started.
    pub(super) fn consume_while(&mut self, predicate: impl Fn(char) -> bool) -> usize {
        let start = self.position;
        while self.peek().is_some_and(&predicate) {
            let _ = self.consume();
        }
        start
    }

    /// "If the next few characters are..."
    ///
    /// Check if the next few characters match the target string exactly.
    pub(super) fn next_few_characters_are(&self, target: &str) -> bool {
        self.input[self.position..].starts_with(target)
    }

    /// "ASCII case-insensitive match for the word 'DOCTYPE'"
    ///
    /// Check if the next few characters match the target string using
    /// ASCII case-insensitive comparison.
    pub(super) fn next_few_characters_are_case_insensitive(&self, target: &str) -> bool {
        self.input.as_bytes()[self.position..]
            .get(..target.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(target.as_bytes()))
    }

    /// Advance past an ASCII `target` the caller has already matched.
    pub(super) const fn consume_string(&mut self, target: &str) {
        self.position += target.len();
    }

    /// Whitespace inside tag markup: tab, LF, FF, CR and space.
    pub(super) const fn is_whitespace_char(input_char: char) -> bool {
        matches!(input_char, ' ' | '\t' | '\n' | '\x0C' | '\r')
    }

    /// Returns true if byte `at` is a `<` that opens markup rather than text.
    ///
    /// Markup is `<` followed by an ASCII letter, `!`, `?`, or `/` with at
    /// least one more character after it.
    pub(super) fn starts_markup(&self, at: usize) -> bool {
        let rest = &self.input.as_bytes()[at..];
        if rest.first() != Some(&b'<') {
            return false;
        }
        match rest.get(1) {
            Some(b'!' | b'?') => true,
            Some(b'/') => rest.len() > 2,
            Some(c) => c.is_ascii_alphabetic(),
            None => false,
        }
    }
}

// =============================================================================
// Raw Text Helpers
// =============================================================================

impl HTMLTokenizer {
    /// Find the byte offset of the end tag that closes raw text element `name`.
    ///
    /// An appropriate end tag is `</` followed by the element name (ASCII
    /// case-insensitive) and then whitespace, `/` or `>`.
    pub(super) fn find_appropriate_end_tag(&self, name: &str) -> Option<usize> {
        let haystack = &self.input[self.position..];
        let bytes = haystack.as_bytes();
        let mut from = 0;
        while let Some(found) = haystack[from..].find("</") {
            let at = from + found;
            let name_end = at + 2 + name.len();
            if bytes.len() > name_end
                && bytes[at + 2..name_end].eq_ignore_ascii_case(name.as_bytes())
                && matches!(
                    bytes[name_end],
                    b'\t' | b'\n' | b'\x0C' | b'\r' | b' ' | b'/' | b'>'
                )
            {
                return Some(self.position + at);
            }
            from = at + 2;
        }
        None
    }
}

// =============================================================================
// Error Handling
// =============================================================================

impl HTMLTokenizer {
    /// Logs a recoverable parse error using the slim-common warning system.
    /// These are not fatal - the tokenizer recovers and continues.
    pub(super) fn log_parse_error(&self, message: &str) {
        let pos = self.position;
        warn_once("HTML Tokenizer", &format!("{message} at byte {pos}"));
    }
}
