//! The JSON scanner.
//!
//! Malformed-but-recognizable shapes (leading-zero numbers, digitless
//! exponents, unterminated strings) get their own patterns so the whole
//! offending lexeme lands in one `Error` token instead of shattering into
//! per-byte errors. The linter later classifies those spans by shape.

use logos::Logos;

use super::{check_escapes, string_body};
use crate::span::Span;
use crate::token::{Token, TokenKind};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum JsonTok {
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token(":")]
    Colon,

    #[token(",")]
    Comma,

    #[token("true")]
    True,

    #[token("false")]
    False,

    #[token("null")]
    Null,

    #[regex(r#""([^"\\\x00-\x1F]|\\.)*""#)]
    Str,

    #[regex(r"-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?")]
    Number,

    // Leading-zero shape, e.g. `01` or `-0012.5`. Always at least one
    // digit after the zero, so it never competes with plain `0`.
    #[regex(r"-?0[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?")]
    LeadingZeroNumber,

    // Exponent marker with no digits after it, e.g. `1e` or `2.5E+`.
    #[regex(r"-?(0|[1-9][0-9]*)(\.[0-9]+)?[eE][+-]?")]
    MalformedExponent,

    // A string that never closes before end of line/input.
    #[regex(r#""([^"\\\x00-\x1F]|\\.)*"#)]
    UnterminatedStr,
}

/// Scanner for the [`Grammar::Json`](super::Grammar::Json) rules.
///
/// Produces tokens whose spans tile the input exactly, then a single
/// zero-width `Eof`.
pub struct JsonLexer<'src> {
    inner: logos::Lexer<'src, JsonTok>,
    eof_emitted: bool,
}

impl<'src> JsonLexer<'src> {
    /// Creates a fresh scanner over `source`.
    pub fn new(source: &'src str) -> Self {
        Self {
            inner: JsonTok::lexer(source),
            eof_emitted: false,
        }
    }

    pub(crate) fn next_token(&mut self) -> Option<Token> {
        match self.inner.next() {
            Some(result) => {
                let range = self.inner.span();
                let span = Span::new(range.start as u32, range.end as u32);
                let kind = match result {
                    Ok(tok) => classify(tok, self.inner.slice()),
                    Err(()) => TokenKind::Error,
                };
                Some(Token::new(kind, span))
            }
            None if !self.eof_emitted => {
                self.eof_emitted = true;
                let end = self.inner.source().len() as u32;
                Some(Token::new(TokenKind::Eof, Span::at(end)))
            }
            None => None,
        }
    }
}

fn classify(tok: JsonTok, slice: &str) -> TokenKind {
    match tok {
        JsonTok::Whitespace => TokenKind::Whitespace,
        JsonTok::LBrace => TokenKind::ObjectStart,
        JsonTok::RBrace => TokenKind::ObjectEnd,
        JsonTok::LBracket => TokenKind::ArrayStart,
        JsonTok::RBracket => TokenKind::ArrayEnd,
        JsonTok::Colon => TokenKind::Colon,
        JsonTok::Comma => TokenKind::Comma,
        JsonTok::True => TokenKind::True,
        JsonTok::False => TokenKind::False,
        JsonTok::Null => TokenKind::Null,
        JsonTok::Number => TokenKind::Number,
        JsonTok::Str => {
            if check_escapes(string_body(slice)).is_ok() {
                TokenKind::String
            } else {
                TokenKind::Error
            }
        }
        JsonTok::LeadingZeroNumber
        | JsonTok::MalformedExponent
        | JsonTok::UnterminatedStr => TokenKind::Error,
    }
}
