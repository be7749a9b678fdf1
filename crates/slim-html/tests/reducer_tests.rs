//! Integration tests for the HTML reducer.

use std::io::{self, Write};

use slim_common::ReduceError;
use slim_html::{HtmlOptions, reduce_html, reduce_html_str};

/// Helper to reduce with default options
fn reduce(input: &str) -> String {
    reduce_html_str(input, &HtmlOptions::default()).unwrap()
}

fn reduce_with(input: &str, options: HtmlOptions) -> String {
    reduce_html_str(input, &options).unwrap()
}

const NO_NEWLINES: HtmlOptions = HtmlOptions {
    extra_newlines: false,
    strip_comments: true,
    allow_cdata: false,
};

#[test]
fn test_head_is_trimmed_and_broken_into_lines() {
    let input = "<!doctype html>\n\t\t<head>   <title> foo bar </title> </head>";
    assert_eq!(
        reduce(input),
        "<!doctype html>\n<head>\n<title>foo bar</title>\n</head>\n"
    );
}

#[test]
fn test_inline_whitespace_collapses_to_single_spaces() {
    let input = "<div>foo bar <span> bazz\n\n\t\t</span> ban </div>";
    assert_eq!(reduce(input), "<div>foo bar <span> bazz </span> ban </div>");
}

#[test]
fn test_unclosed_title_passes_through() {
    let input = "<!DOCTYPE html>\n<title>x<title>";
    assert_eq!(reduce(input), "<!DOCTYPE html>\n<title>x<title>");
}

#[test]
fn test_conditional_comment_survives_stripping() {
    let input = "<p>a</p><!--[if IE]>text<![endif]--><!-- gone --><p>b</p>";
    assert_eq!(
        reduce(input),
        "<p>a</p><!--[if IE]>text<![endif]-->\n<p>b</p>"
    );
}

#[test]
fn test_comments_kept_when_stripping_is_off() {
    let options = HtmlOptions {
        strip_comments: false,
        extra_newlines: false,
        ..HtmlOptions::default()
    };
    assert_eq!(
        reduce_with("<p>a<!--  note  -->b</p>", options),
        "<p>a<!--  note  -->b</p>"
    );
}

#[test]
fn test_start_tags_are_reserialized() {
    let input = "<div   CLASS='a'\n  id=main  hidden ><img src = \"x.png\"   /></div>";
    assert_eq!(
        reduce(input),
        r#"<div class="a" id="main" hidden=""><img src="x.png"/></div>"#
    );
}

#[test]
fn test_attribute_values_keep_character_references() {
    let input = r#"<a title='say "hi" &amp; go'>x</a>"#;
    assert_eq!(
        reduce(input),
        r#"<a title="say &#34;hi&#34; &amp; go">x</a>"#
    );
}

#[test]
fn test_pre_content_is_verbatim() {
    let input = "<p>x</p><pre>  a\n\n   b  <b> c </b>\t</pre>  <p>y</p>";
    assert_eq!(
        reduce(input),
        "<p>x</p><pre>\n  a\n\n   b  <b> c </b>\t</pre><p>y</p>"
    );
}

#[test]
fn test_pre_leading_newline_is_not_doubled() {
    let input = "<div><pre>\ncode</pre></div>";
    assert_eq!(reduce(input), "<div><pre>\ncode</pre></div>");
    assert_eq!(reduce_with(input, NO_NEWLINES), "<div><pre>\ncode</pre></div>");
}

#[test]
fn test_script_and_style_in_body() {
    let input = "<div><script>\n  if (a  <  b) { go(); }\n</script>  <style> a  { }  </style></div>";
    assert_eq!(
        reduce(input),
        "<div><script>\n  if (a  <  b) { go(); }\n</script>\n<style>\n a  { }  </style>\n</div>"
    );
}

#[test]
fn test_script_in_head_returns_to_head() {
    let input = "<head><script src=a.js></script>\n<meta charset=utf-8>\n<title> t </title></head><body><p> x </p></body>";
    assert_eq!(
        reduce(input),
        "<head>\n<script src=\"a.js\"></script>\n<meta charset=\"utf-8\">\n<title>t</title>\n</head>\n<body>\n<p> x </p>\n</body>\n"
    );
}

#[test]
fn test_unknown_head_tag_starts_body() {
    let input = "<head><title>t</title><div>  a  b </div>";
    assert_eq!(reduce(input), "<head>\n<title>t</title>\n<div> a b </div>");
}

#[test]
fn test_body_tags_without_newlines() {
    let input = "<body>\n  <p>x</p>\n</body>\n";
    assert_eq!(reduce_with(input, NO_NEWLINES), "<body><p>x</p></body>");
    assert_eq!(reduce(input), "<body>\n<p>x</p>\n</body>\n");
}

#[test]
fn test_plain_text_documents() {
    assert_eq!(reduce("ab"), "ab");
    assert_eq!(reduce("<p> ab</p>"), "<p> ab</p>");
    assert_eq!(reduce("<div>foo</div>"), "<div>foo</div>");
}

#[test]
fn test_pre_right_after_head_is_verbatim() {
    let input = "<!doctype html>\n<pre>  a\n\n  b</pre>";
    assert_eq!(reduce(input), "<!doctype html>\n<pre>\n  a\n\n  b</pre>");
}

#[test]
fn test_text_after_inserted_newline_loses_leading_space() {
    let cases = [
        ("<p>a<script>x</script> b</p>", "<p>a<script>\nx</script>\nb</p>"),
        ("<p>a<style>x</style>\n  b</p>", "<p>a<style>\nx</style>\nb</p>"),
        (
            "<p>a<!--[if IE]>x<![endif]--> b</p>",
            "<p>a<!--[if IE]>x<![endif]-->\nb</p>",
        ),
    ];
    for (input, expected) in cases {
        let once = reduce(input);
        assert_eq!(once, expected, "input: {input:?}");
        assert_eq!(reduce(&once), once, "input: {input:?}");
    }
}

#[test]
fn test_cdata_handling() {
    let input = "<p><![CDATA[ a   b ]]></p>";
    assert_eq!(reduce(input), "<p></p>");
    let options = HtmlOptions {
        allow_cdata: true,
        ..HtmlOptions::default()
    };
    assert_eq!(reduce_with(input, options), "<p><![CDATA[ a b ]]></p>");
}

#[test]
fn test_reducing_twice_changes_nothing() {
    let inputs = [
        "<!doctype html>\n<head>   <title> foo bar </title> </head>",
        "<div>foo bar <span> bazz\n\n\t\t</span> ban </div>",
        "<html><head><meta charset=utf-8><link rel=stylesheet href=a.css></head>\n<body>\n<pre>\n x  y</pre><script>\nvar a;</script><p>a  b</p></body></html>",
    ];
    for input in inputs {
        let once = reduce(input);
        assert_eq!(reduce(&once), once, "input: {input:?}");
    }
}

#[test]
fn test_unterminated_tag_is_an_error() {
    let mut out = Vec::new();
    let result = reduce_html(&mut out, "<p>ok</p><a href=\"x".as_bytes(), &HtmlOptions::default());
    assert!(matches!(result, Err(ReduceError::Tokenize { language: "HTML", .. })));
    // Bytes written before the error stay written.
    assert_eq!(String::from_utf8(out).unwrap(), "<p>ok</p>");
}

struct BrokenSink;

impl Write for BrokenSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_sink_error_aborts() {
    let result = reduce_html(&mut BrokenSink, "<p>x</p>".as_bytes(), &HtmlOptions::default());
    assert!(matches!(result, Err(ReduceError::Write(_))));
}

struct BrokenSource;

impl io::Read for BrokenSource {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::other("unreadable"))
    }
}

#[test]
fn test_source_error_aborts() {
    let mut out = Vec::new();
    let result = reduce_html(&mut out, BrokenSource, &HtmlOptions::default());
    assert!(matches!(result, Err(ReduceError::Read(_))));
    assert!(out.is_empty());
}

#[test]
fn test_empty_document() {
    assert_eq!(reduce(""), "");
}
