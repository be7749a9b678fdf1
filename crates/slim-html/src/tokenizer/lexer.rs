use thiserror::Error;

use super::token::{Attribute, Token, TokenKind};

/// Elements whose content is scanned as text up to the matching end tag.
const RAW_TEXT_ELEMENTS: [&str; 9] = [
    "script", "style", "xmp", "iframe", "noembed", "noframes", "noscript", "title", "textarea",
];

/// Malformed HTML the tokenizer cannot recover from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenizeError {
    /// A start or end tag was still open at end of input.
    #[error("unterminated tag starting at byte {offset}")]
    UnterminatedTag {
        /// Byte offset of the tag's `<`.
        offset: usize,
    },

    /// A doctype declaration was still open at end of input.
    #[error("unterminated doctype starting at byte {offset}")]
    UnterminatedDoctype {
        /// Byte offset of the doctype's `<`.
        offset: usize,
    },
}

/// What the next call to the tokenizer is scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ContentMode {
    /// Ordinary markup and character data.
    Data,
    /// Content of a raw text element, up to `</name`.
    RawText(String),
    /// Everything after `<plaintext>`.
    Plaintext,
}

/// A lazy, forward-only HTML tokenizer.
///
/// Yields one [`Token`] per call to [`Iterator::next`]. End of input ends the
/// iteration; malformed input yields a single [`TokenizeError`] after which
/// the iterator is exhausted.
#[derive(Debug)]
pub struct HTMLTokenizer {
    pub(super) input: String,
    pub(super) position: usize,
    mode: ContentMode,
    allow_cdata: bool,
    finished: bool,
}

impl HTMLTokenizer {
    /// Create a new tokenizer for the given input.
    #[must_use]
    pub const fn new(input: String) -> Self {
        Self {
            input,
            position: 0,
            mode: ContentMode::Data,
            allow_cdata: false,
            finished: false,
        }
    }

    /// Scan `<![CDATA[ ... ]]>` as a text token instead of a bogus comment.
    #[must_use]
    pub const fn allow_cdata(mut self, allow: bool) -> Self {
        self.allow_cdata = allow;
        self
    }

    /// Byte offset of the next unconsumed character.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    fn next_token(&mut self) -> Result<Option<Token>, TokenizeError> {
        if self.at_eof() {
            return Ok(None);
        }

        match std::mem::replace(&mut self.mode, ContentMode::Data) {
            ContentMode::RawText(name) => {
                if let Some(token) = self.consume_raw_text(&name) {
                    return Ok(Some(token));
                }
            }
            ContentMode::Plaintext => {
                self.mode = ContentMode::Plaintext;
                let start = self.position;
                self.position = self.input.len();
                return Ok(Some(self.text_token(start)));
            }
            ContentMode::Data => {}
        }

        if self.starts_markup(self.position) {
            return self.consume_markup().map(Some);
        }
        Ok(Some(self.consume_text()))
    }

    fn text_token(&self, start: usize) -> Token {
        let raw = &self.input[start..self.position];
        Token::new(
            TokenKind::Text {
                data: raw.to_string(),
            },
            raw,
        )
    }

    /// Character data up to the next `<` that opens markup.
    fn consume_text(&mut self) -> Token {
        let start = self.position;
        let mut cursor = start;
        loop {
            match self.input[cursor..].find('<') {
                None => {
                    cursor = self.input.len();
                    break;
                }
                Some(offset) => {
                    let at = cursor + offset;
                    if at > start && self.starts_markup(at) {
                        cursor = at;
                        break;
                    }
                    // "invalid-first-character-of-tag-name parse error"
                    self.position = at;
                    self.log_parse_error("'<' does not start a tag");
                    cursor = at + 1;
                }
            }
        }
        self.position = cursor;
        self.text_token(start)
    }

    /// Content of a raw text element. Returns None when the end tag follows
    /// immediately, leaving it for the markup scanner.
    fn consume_raw_text(&mut self, name: &str) -> Option<Token> {
        let start = self.position;
        let end = self
            .find_appropriate_end_tag(name)
            .unwrap_or(self.input.len());
        if end == start {
            return None;
        }
        self.position = end;
        Some(self.text_token(start))
    }

    /// Dispatch on the characters after `<`.
    fn consume_markup(&mut self) -> Result<Token, TokenizeError> {
        let start = self.position;
        if self.next_few_characters_are("<!--") {
            self.consume_string("<!--");
            return Ok(self.consume_comment(start));
        }
        if self.next_few_characters_are_case_insensitive("<!doctype") {
            self.consume_string("<!doctype");
            return self.consume_doctype(start);
        }
        if self.next_few_characters_are("<![CDATA[") {
            self.consume_string("<![CDATA[");
            return Ok(self.consume_cdata(start));
        }
        if self.next_few_characters_are("</") {
            self.consume_string("</");
            return if self.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
                self.consume_tag(start, true)
            } else {
                Ok(self.consume_bogus_comment(start))
            };
        }
        if self.next_few_characters_are("<!") || self.next_few_characters_are("<?") {
            self.consume_string("<!");
            return Ok(self.consume_bogus_comment(start));
        }
        self.consume_string("<");
        self.consume_tag(start, false)
    }

    /// `<!--` has been consumed. Ends at `-->` or `--!>`; the abrupt forms
    /// `<!-->` and `<!--->` are empty comments.
    fn consume_comment(&mut self, start: usize) -> Token {
        let data_start = self.position;
        let (data_end, end) = if self.next_few_characters_are(">") {
            (data_start, data_start + 1)
        } else if self.next_few_characters_are("->") {
            (data_start, data_start + 2)
        } else {
            let rest = &self.input[data_start..];
            let close = [("-->", rest.find("-->")), ("--!>", rest.find("--!>"))]
                .into_iter()
                .filter_map(|(delim, found)| found.map(|at| (at, delim.len())))
                .min();
            if let Some((at, len)) = close {
                (data_start + at, data_start + at + len)
            } else {
                self.log_parse_error("unterminated comment runs to end of input");
                (self.input.len(), self.input.len())
            }
        };
        self.position = end;
        Token::new(
            TokenKind::Comment {
                data: self.input[data_start..data_end].to_string(),
            },
            &self.input[start..end],
        )
    }

    /// Everything after `<!`, `<?` or `</` up to the next `>`.
    fn consume_bogus_comment(&mut self, start: usize) -> Token {
        let data_start = self.position;
        let (data_end, end) = match self.input[data_start..].find('>') {
            Some(at) => (data_start + at, data_start + at + 1),
            None => (self.input.len(), self.input.len()),
        };
        self.position = end;
        Token::new(
            TokenKind::Comment {
                data: self.input[data_start..data_end].to_string(),
            },
            &self.input[start..end],
        )
    }

    /// `<![CDATA[` has been consumed.
    fn consume_cdata(&mut self, start: usize) -> Token {
        let data_start = self.position;
        let (data_end, end) = match self.input[data_start..].find("]]>") {
            Some(at) => (data_start + at, data_start + at + 3),
            None => (self.input.len(), self.input.len()),
        };
        self.position = end;
        let data = self.input[data_start..data_end].to_string();
        let kind = if self.allow_cdata {
            TokenKind::Text { data }
        } else {
            TokenKind::Comment {
                data: format!("[CDATA[{data}]]"),
            }
        };
        Token::new(kind, &self.input[start..end])
    }

    /// `<!doctype` has been consumed.
    fn consume_doctype(&mut self, start: usize) -> Result<Token, TokenizeError> {
        let Some(close) = self.input[self.position..].find('>') else {
            self.position = self.input.len();
            return Err(TokenizeError::UnterminatedDoctype { offset: start });
        };
        let body = &self.input[self.position..self.position + close];
        let name = body
            .split(Self::is_whitespace_char)
            .find(|word| !word.is_empty())
            .map(str::to_ascii_lowercase);
        self.position += close + 1;
        Ok(Token::new(
            TokenKind::Doctype { name },
            &self.input[start..self.position],
        ))
    }

    /// `<` or `</` has been consumed and the next character is a letter.
    fn consume_tag(&mut self, start: usize, is_end: bool) -> Result<Token, TokenizeError> {
        let unterminated = TokenizeError::UnterminatedTag { offset: start };

        let name_start =
            self.consume_while(|c| !Self::is_whitespace_char(c) && c != '/' && c != '>');
        let name = self.input[name_start..self.position].to_ascii_lowercase();

        let mut attributes: Vec<Attribute> = Vec::new();
        let mut self_closing = false;
        loop {
            let _ = self.consume_while(Self::is_whitespace_char);
            match self.peek() {
                None => return Err(unterminated),
                Some('>') => {
                    let _ = self.consume();
                    break;
                }
                Some('/') => {
                    let _ = self.consume();
                    if self.peek() == Some('>') {
                        let _ = self.consume();
                        self_closing = true;
                        break;
                    }
                    // "unexpected-solidus-in-tag parse error"
                }
                Some(_) => {
                    let attribute = self.consume_attribute().ok_or(unterminated)?;
                    if attributes.iter().any(|a| a.name == attribute.name) {
                        self.log_parse_error("duplicate attribute dropped");
                    } else {
                        attributes.push(attribute);
                    }
                }
            }
        }

        let raw = &self.input[start..self.position];
        let kind = if is_end {
            TokenKind::EndTag { name }
        } else if self_closing {
            TokenKind::SelfClosingTag { name, attributes }
        } else {
            if name == "plaintext" {
                self.mode = ContentMode::Plaintext;
            } else if RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
                self.mode = ContentMode::RawText(name.clone());
            }
            TokenKind::StartTag { name, attributes }
        };
        Ok(Token::new(kind, raw))
    }

    /// One `name`, `name=value`, `name="value"` or `name='value'`.
    /// Returns None if input ends inside a quoted value.
    fn consume_attribute(&mut self) -> Option<Attribute> {
        // A leading '=' belongs to the name.
        let name_start = self.position;
        if self.peek() == Some('=') {
            let _ = self.consume();
        }
        let _ = self.consume_while(|c| {
            !Self::is_whitespace_char(c) && !matches!(c, '/' | '>' | '=')
        });
        let name = self.input[name_start..self.position].to_ascii_lowercase();

        let before_equals = self.position;
        let _ = self.consume_while(Self::is_whitespace_char);
        if self.peek() != Some('=') {
            // Valueless attribute; the whitespace is rescanned by the caller.
            self.position = before_equals;
            return Some(Attribute::new(name, String::new()));
        }
        let _ = self.consume();
        let _ = self.consume_while(Self::is_whitespace_char);

        let value = match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                let _ = self.consume();
                let value_start = self.position;
                let close = self.input[value_start..].find(quote)?;
                self.position = value_start + close + 1;
                self.input[value_start..value_start + close].to_string()
            }
            _ => {
                let value_start =
                    self.consume_while(|c| !Self::is_whitespace_char(c) && c != '>');
                self.input[value_start..self.position].to_string()
            }
        };
        Some(Attribute::new(name, value))
    }
}

impl Iterator for HTMLTokenizer {
    type Item = Result<Token, TokenizeError>;

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

impl std::iter::FusedIterator for HTMLTokenizer {}
