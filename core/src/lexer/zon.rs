//! The ZON-style configuration scanner.
//!
//! Differences from JSON: aggregates open with `.{` and close with `}`
//! (the same pair serves objects and arrays; consumers look at the first
//! significant token inside to tell them apart), fields are `.name = value`,
//! `//` comments are trivia, and multiline strings are written as runs of
//! `\\` lines, each of which lexes as one `Continuation` token.

use logos::Logos;

use super::{check_escapes, string_body};
use crate::span::Span;
use crate::token::{Token, TokenKind};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum ZonTok {
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"//[^\n]*", allow_greedy = true)]
    Comment,

    #[token(".{")]
    AggregateStart,

    #[token("}")]
    RBrace,

    #[token("=")]
    Eq,

    #[token(",")]
    Comma,

    #[token("true")]
    True,

    #[token("false")]
    False,

    #[token("null")]
    Null,

    // `.name` field accessors, including the quoted form `.@"any text"`.
    #[regex(r"\.[A-Za-z_][A-Za-z0-9_]*")]
    #[regex(r#"\.@"([^"\\]|\\.)*""#)]
    Field,

    // One line of a multiline string literal.
    #[regex(r"\\\\[^\n]*", allow_greedy = true)]
    Continuation,

    #[regex(r#""([^"\\\x00-\x1F]|\\.)*""#)]
    Str,

    #[regex(r"-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?")]
    Number,

    #[regex(r"-?0[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?")]
    LeadingZeroNumber,

    #[regex(r"-?(0|[1-9][0-9]*)(\.[0-9]+)?[eE][+-]?")]
    MalformedExponent,

    #[regex(r#""([^"\\\x00-\x1F]|\\.)*"#)]
    UnterminatedStr,
}

/// Scanner for the [`Grammar::Zon`](super::Grammar::Zon) rules.
pub struct ZonLexer<'src> {
    inner: logos::Lexer<'src, ZonTok>,
    eof_emitted: bool,
}

impl<'src> ZonLexer<'src> {
    /// Creates a fresh scanner over `source`.
    pub fn new(source: &'src str) -> Self {
        Self {
            inner: ZonTok::lexer(source),
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

fn classify(tok: ZonTok, slice: &str) -> TokenKind {
    match tok {
        ZonTok::Whitespace => TokenKind::Whitespace,
        ZonTok::Comment => TokenKind::Comment,
        ZonTok::AggregateStart => TokenKind::ObjectStart,
        ZonTok::RBrace => TokenKind::ObjectEnd,
        ZonTok::Eq => TokenKind::Colon,
        ZonTok::Comma => TokenKind::Comma,
        ZonTok::True => TokenKind::True,
        ZonTok::False => TokenKind::False,
        ZonTok::Null => TokenKind::Null,
        ZonTok::Field => TokenKind::PropertyName,
        ZonTok::Continuation => TokenKind::Continuation,
        ZonTok::Number => TokenKind::Number,
        ZonTok::Str => {
            if check_escapes(string_body(slice)).is_ok() {
                TokenKind::String
            } else {
                TokenKind::Error
            }
        }
        ZonTok::LeadingZeroNumber
        | ZonTok::MalformedExponent
        | ZonTok::UnterminatedStr => TokenKind::Error,
    }
}
