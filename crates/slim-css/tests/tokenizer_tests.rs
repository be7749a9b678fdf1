//! Integration tests for the CSS tokenizer.

use slim_css::tokenizer::{CSSToken, CSSTokenKind, CSSTokenizer, HashType, NumericType, TokenizeError};

/// Helper to tokenize a string and return the tokens
fn tokenize(input: &str) -> Vec<CSSToken> {
    CSSTokenizer::new(input)
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

fn kinds(input: &str) -> Vec<CSSTokenKind> {
    tokenize(input).into_iter().map(|t| t.kind).collect()
}

#[test]
fn test_raw_text_concatenates_to_input() {
    let inputs = [
        "body { font-size: 23px; }",
        "@import url( a.css );\n/* c */ a:hover>b+i~u { x: -.5e2% !important }",
        "<!-- a { content: \"\\\"q\\\"\" } -->",
    ];
    for input in inputs {
        let raw: String = tokenize(input).into_iter().map(|t| t.raw).collect();
        assert_eq!(raw, input);
    }
}

#[test]
fn test_whitespace_run_is_one_token() {
    let tokens = tokenize("   \t\n  ");
    assert_eq!(tokens.len(), 1);
    assert!(tokens[0].is_whitespace());
    assert_eq!(tokens[0].raw, "   \t\n  ");
}

#[test]
fn test_comment_is_a_token() {
    let tokens = tokenize("/*! keep */a");
    assert_eq!(tokens.len(), 2);
    assert!(tokens[0].is_comment());
    assert_eq!(tokens[0].raw, "/*! keep */");
}

#[test]
fn test_ident() {
    assert_eq!(
        kinds("background-color"),
        vec![CSSTokenKind::Ident("background-color".to_string())]
    );
    assert_eq!(kinds("_private"), vec![CSSTokenKind::Ident("_private".to_string())]);
    assert_eq!(kinds("--var"), vec![CSSTokenKind::Ident("--var".to_string())]);
}

#[test]
fn test_punctuation_is_char() {
    let chars: Vec<_> = tokenize("{}();:,.[]>").iter().filter_map(CSSToken::as_char).collect();
    assert_eq!(chars, ['{', '}', '(', ')', ';', ':', ',', '.', '[', ']', '>']);
}

#[test]
fn test_function() {
    assert_eq!(kinds("rgb("), vec![CSSTokenKind::Function("rgb".to_string())]);
}

#[test]
fn test_at_keyword() {
    assert_eq!(kinds("@media"), vec![CSSTokenKind::AtKeyword("media".to_string())]);
    assert_eq!(kinds("@ "), vec![CSSTokenKind::Char('@'), CSSTokenKind::Whitespace]);
}

#[test]
fn test_hash() {
    assert_eq!(
        kinds("#main"),
        vec![CSSTokenKind::Hash {
            value: "main".to_string(),
            hash_type: HashType::Id
        }]
    );
    assert_eq!(
        kinds("#123"),
        vec![CSSTokenKind::Hash {
            value: "123".to_string(),
            hash_type: HashType::Unrestricted
        }]
    );
    assert_eq!(kinds("# "), vec![CSSTokenKind::Char('#'), CSSTokenKind::Whitespace]);
}

#[test]
fn test_string_with_escape() {
    assert_eq!(
        kinds(r#""a\"b""#),
        vec![CSSTokenKind::String("a\"b".to_string())]
    );
    assert_eq!(kinds("'x'"), vec![CSSTokenKind::String("x".to_string())]);
}

#[test]
fn test_numbers() {
    assert_eq!(
        kinds("42"),
        vec![CSSTokenKind::Number {
            value: 42.0,
            numeric_type: NumericType::Integer
        }]
    );
    assert_eq!(
        kinds("-.5"),
        vec![CSSTokenKind::Number {
            value: -0.5,
            numeric_type: NumericType::Number
        }]
    );
    assert_eq!(
        kinds("50%"),
        vec![CSSTokenKind::Percentage {
            value: 50.0,
            numeric_type: NumericType::Integer
        }]
    );
    assert_eq!(
        kinds("1.5em"),
        vec![CSSTokenKind::Dimension {
            value: 1.5,
            numeric_type: NumericType::Number,
            unit: "em".to_string()
        }]
    );
}

#[test]
fn test_url() {
    assert_eq!(kinds("url(a.png)"), vec![CSSTokenKind::Url("a.png".to_string())]);
    assert_eq!(kinds("URL(  a.png  )"), vec![CSSTokenKind::Url("a.png".to_string())]);
    assert_eq!(
        kinds("url('a.png')"),
        vec![
            CSSTokenKind::Function("url".to_string()),
            CSSTokenKind::String("a.png".to_string()),
            CSSTokenKind::Char(')'),
        ]
    );
}

#[test]
fn test_unicode_range() {
    let tokens = tokenize("U+0025-00FF, u+4??");
    assert_eq!(tokens[0].kind, CSSTokenKind::UnicodeRange);
    assert_eq!(tokens[0].raw, "U+0025-00FF");
    assert_eq!(tokens[3].kind, CSSTokenKind::UnicodeRange);
    assert_eq!(tokens[3].raw, "u+4??");
}

#[test]
fn test_cdo_cdc() {
    assert_eq!(
        kinds("<!---->"),
        vec![CSSTokenKind::Cdo, CSSTokenKind::Cdc]
    );
}

#[test]
fn test_errors() {
    let cases = [
        ("a /* open", TokenizeError::UnterminatedComment { offset: 2 }),
        ("'abc", TokenizeError::UnterminatedString { offset: 0 }),
        ("x 'a\nb'", TokenizeError::UnterminatedString { offset: 2 }),
        ("url(a.png", TokenizeError::UnterminatedUrl { offset: 0 }),
        ("b url(a b)", TokenizeError::BadUrl { offset: 2 }),
    ];
    for (input, expected) in cases {
        let error = CSSTokenizer::new(input)
            .find_map(Result::err)
            .unwrap();
        assert_eq!(error, expected, "input: {input:?}");
    }
}
