//! Dispatch Equivalence Tests
//!
//! The direct (enum-matched) and dynamic (boxed trait object) stream
//! strategies must be observationally identical, and pluggable sources
//! must drive the parser and linter exactly like the built-in lexers.

use jsonkit::{
    ByteSource, Grammar, JsonLexer, Linter, MemorySource, ParseOptions, Token, TokenSource,
    TokenStream, parse, parse_stream,
};
use std::path::Path;

#[test]
fn test_dynamic_stream_matches_direct() {
    let source = r#"{"a": [1, null], "b": "x"}"#;
    let direct = TokenStream::tokenize(source, Grammar::Json).collect_tokens();
    let dynamic = TokenStream::dynamic(JsonLexer::new(source)).collect_tokens();
    assert_eq!(direct, dynamic);
}

#[test]
fn test_buffered_stream_matches_direct() {
    let source = ".{ .a = 1, // note\n }";
    let tokens = TokenStream::tokenize(source, Grammar::Zon).collect_tokens();
    let replayed = TokenStream::from_tokens(tokens.clone()).collect_tokens();
    assert_eq!(tokens, replayed);
}

#[test]
fn test_parser_accepts_any_strategy() {
    let source = r#"[1, 2, {"k": true}]"#;
    let options = ParseOptions::default();

    let direct = parse(source, Grammar::Json, &options).unwrap();

    let stream = TokenStream::dynamic(JsonLexer::new(source));
    let dynamic = parse_stream(stream, source, Grammar::Json, &options).unwrap();

    let tokens = TokenStream::tokenize(source, Grammar::Json).collect_tokens();
    let buffered = parse_stream(
        TokenStream::from_tokens(tokens),
        source,
        Grammar::Json,
        &options,
    )
    .unwrap();

    assert!(direct.tree_eq(&dynamic));
    assert!(direct.tree_eq(&buffered));
}

#[test]
fn test_linter_over_replayed_tokens() {
    let source = r#"{"a": 1, "a": 2}"#;
    let tokens = TokenStream::tokenize(source, Grammar::Json).collect_tokens();
    let diags = Linter::new().lint_tokens(TokenStream::from_tokens(tokens), source);
    assert_eq!(diags.len(), 1);
}

#[test]
fn test_custom_source_through_the_dynamic_seam() {
    // Filters trivia out before the consumer ever sees it.
    struct SignificantOnly<'src>(JsonLexer<'src>);
    impl TokenSource for SignificantOnly<'_> {
        fn next_token(&mut self) -> Option<Token> {
            loop {
                let tok = self.0.next_token()?;
                if !tok.is_trivia() {
                    return Some(tok);
                }
            }
        }
    }

    let source = "  [ 1 , 2 ]  ";
    let stream = TokenStream::dynamic(SignificantOnly(JsonLexer::new(source)));
    let ast = parse_stream(stream, source, Grammar::Json, &ParseOptions::default()).unwrap();
    assert_eq!(ast.write_json(), "[1,2]");
}

#[test]
fn test_memory_source_feeds_the_pipeline() {
    let mut fs = MemorySource::new();
    fs.insert("conf/app.json", r#"{"port": 8080}"#);
    fs.insert("conf/db.json", r#"{"port": 5432, "host": "db"}"#);

    let mut schemas = Vec::new();
    for path in fs.children(Path::new("conf")).unwrap() {
        let file = fs.read(&path).unwrap();
        let ast = parse(&file.contents, Grammar::Json, &ParseOptions::default()).unwrap();
        schemas.push(ast);
    }
    let combined = jsonkit::infer_combined(&schemas, &jsonkit::InferOptions::default());
    assert_eq!(combined.schema_type, jsonkit::SchemaType::Object);
    assert!(combined.property("port").is_some());
}
