use core::fmt;

/// An attribute on a start or self-closing tag.
///
/// Names are ASCII-lowercased by the tokenizer. Values are kept exactly as
/// written, character references included, so re-serializing a tag never
/// changes what the attribute decodes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Lowercased attribute name.
    pub name: String,
    /// Value as written between the quotes (empty for a bare attribute).
    pub value: String,
}

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub const fn new(name: String, value: String) -> Self {
        Self { name, value }
    }
}

/// The classification of a [`Token`] together with its decoded form.
///
/// Tag variants carry the normalized name and attributes independent of how
/// the source was formatted; their [`Display`](fmt::Display) output is the
/// compact re-serialization the reducer writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// `<!DOCTYPE name ...>`
    Doctype {
        /// The first word after `doctype`, lowercased, if any.
        name: Option<String>,
    },

    /// `<name attr=value ...>`
    StartTag {
        /// Lowercased tag name.
        name: String,
        /// Attributes in source order, duplicates removed.
        attributes: Vec<Attribute>,
    },

    /// `<name attr=value ... />`
    SelfClosingTag {
        /// Lowercased tag name.
        name: String,
        /// Attributes in source order, duplicates removed.
        attributes: Vec<Attribute>,
    },

    /// `</name>`. Attributes on end tags are parsed and dropped.
    EndTag {
        /// Lowercased tag name.
        name: String,
    },

    /// `<!-- data -->` or a bogus comment such as `<!x>`, `<?x>` or `</ x>`.
    Comment {
        /// Everything between the delimiters.
        data: String,
    },

    /// Character data, or a CDATA section when CDATA is treated as text.
    Text {
        /// The text content (for CDATA, without the `<![CDATA[` `]]>` markers).
        data: String,
    },
}

impl TokenKind {
    /// The tag name of a start, self-closing or end tag.
    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Self::StartTag { name, .. } | Self::SelfClosingTag { name, .. } | Self::EndTag { name } => {
                Some(name)
            }
            _ => None,
        }
    }
}

/// A classified unit of HTML source.
///
/// `raw` is the exact source text the token was scanned from. The reducer
/// writes it unchanged wherever bytes must survive verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Classification and decoded form.
    pub kind: TokenKind,
    /// Source text of the token.
    pub raw: String,
}

impl Token {
    /// Create a token from its kind and source text.
    #[must_use]
    pub fn new(kind: TokenKind, raw: impl Into<String>) -> Self {
        Self {
            kind,
            raw: raw.into(),
        }
    }

    /// Returns true if this is an end tag named `name`.
    #[must_use]
    pub fn is_end_tag(&self, name: &str) -> bool {
        matches!(&self.kind, TokenKind::EndTag { name: n } if n == name)
    }
}

fn write_attributes(f: &mut fmt::Formatter<'_>, attributes: &[Attribute]) -> fmt::Result {
    for attr in attributes {
        write!(f, " {}=\"", attr.name)?;
        // Single-quoted and unquoted sources may contain a bare quote.
        for (i, part) in attr.value.split('"').enumerate() {
            if i > 0 {
                f.write_str("&#34;")?;
            }
            f.write_str(part)?;
        }
        f.write_str("\"")?;
    }
    Ok(())
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Doctype { name } => match name {
                Some(n) => write!(f, "<!DOCTYPE {n}>"),
                None => write!(f, "<!DOCTYPE>"),
            },
            Self::StartTag { name, attributes } => {
                write!(f, "<{name}")?;
                write_attributes(f, attributes)?;
                write!(f, ">")
            }
            Self::SelfClosingTag { name, attributes } => {
                write!(f, "<{name}")?;
                write_attributes(f, attributes)?;
                write!(f, "/>")
            }
            Self::EndTag { name } => write!(f, "</{name}>"),
            Self::Comment { data } => write!(f, "<!--{data}-->"),
            Self::Text { data } => f.write_str(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_tag_serialization_quotes_values() {
        let kind = TokenKind::StartTag {
            name: "a".to_string(),
            attributes: vec![
                Attribute::new("href".to_string(), "/x?a=1&amp;b=2".to_string()),
                Attribute::new("hidden".to_string(), String::new()),
            ],
        };
        assert_eq!(kind.to_string(), r#"<a href="/x?a=1&amp;b=2" hidden="">"#);
    }

    #[test]
    fn test_embedded_quote_is_escaped() {
        let kind = TokenKind::SelfClosingTag {
            name: "img".to_string(),
            attributes: vec![Attribute::new("alt".to_string(), r#"say "hi""#.to_string())],
        };
        assert_eq!(kind.to_string(), r#"<img alt="say &#34;hi&#34;"/>"#);
    }

    #[test]
    fn test_end_tag_serialization() {
        let kind = TokenKind::EndTag {
            name: "div".to_string(),
        };
        assert_eq!(kind.to_string(), "</div>");
        assert_eq!(kind.tag_name(), Some("div"));
    }
}
