//! Recursive-descent parser.
//!
//! Consumes significant tokens from a [`TokenStream`] and builds an
//! arena-owned [`Ast`]. The parser is deliberately strict: the first
//! structural error aborts the whole call with a spanned [`ParseError`],
//! and no partial tree is ever returned. Malformed separators, doubled
//! operators, and assignments without a value all fail.

use thiserror::Error;

use crate::ast::{Ast, Node, NodeId};
use crate::config::{ParseOptions, RecursionGuard};
use crate::error::LimitError;
use crate::lexer::{Grammar, decode_string, string_body};
use crate::span::Span;
use crate::stream::TokenStream;
use crate::token::{Token, TokenKind};

/// Why a parse failed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The stream produced a token of the wrong kind.
    #[error("expected {expect}, found {found}")]
    Unexpected {
        expect: &'static str,
        found: &'static str,
    },

    /// The input ended where a token was required.
    #[error("expected {expect}, found end of input")]
    UnexpectedEof { expect: &'static str },

    /// A lexical `Error` token reached the parser.
    #[error("invalid token")]
    InvalidToken,

    /// A resource budget was exceeded.
    #[error(transparent)]
    Limit(LimitError),
}

/// A structural parse failure with the offending source region.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind} at {span}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

impl ParseError {
    fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Parses `source` under `grammar` into an arena-owned tree.
pub fn parse(
    source: &str,
    grammar: Grammar,
    options: &ParseOptions,
) -> Result<Ast, ParseError> {
    let stream = TokenStream::tokenize(source, grammar);
    parse_stream(stream, source, grammar, options)
}

/// Parses from an existing token stream.
///
/// The stream may be backed by any strategy; `source` must be the text the
/// stream's spans refer to.
pub fn parse_stream<'src>(
    stream: TokenStream<'src>,
    source: &'src str,
    grammar: Grammar,
    options: &ParseOptions,
) -> Result<Ast, ParseError> {
    Parser {
        stream,
        source,
        grammar,
        options: *options,
        guard: RecursionGuard::new(),
        ast: Ast::new(),
        lookahead: None,
    }
    .run()
}

struct Parser<'src> {
    stream: TokenStream<'src>,
    source: &'src str,
    grammar: Grammar,
    options: ParseOptions,
    guard: RecursionGuard,
    ast: Ast,
    lookahead: Option<Token>,
}

impl Parser<'_> {
    fn run(mut self) -> Result<Ast, ParseError> {
        let root = self.parse_value()?;
        let tail = self.peek();
        if !matches!(tail.map(|t| t.kind), None | Some(TokenKind::Eof)) {
            return Err(self.unexpected("end of input", tail));
        }
        self.ast.set_root(root);
        Ok(self.ast)
    }

    /// One-token lookahead over the significant stream.
    fn peek(&mut self) -> Option<Token> {
        if self.lookahead.is_none() {
            self.lookahead = self.stream.next_significant();
        }
        self.lookahead
    }

    fn bump(&mut self) -> Option<Token> {
        let tok = self.peek();
        self.lookahead = None;
        tok
    }

    fn unexpected(&self, expect: &'static str, tok: Option<Token>) -> ParseError {
        match tok {
            None => ParseError::new(
                ParseErrorKind::UnexpectedEof { expect },
                Span::at(self.source.len() as u32),
            ),
            Some(tok) if tok.is_eof() => {
                ParseError::new(ParseErrorKind::UnexpectedEof { expect }, tok.span)
            }
            Some(tok) if tok.kind == TokenKind::Error => {
                ParseError::new(ParseErrorKind::InvalidToken, tok.span)
            }
            Some(tok) => ParseError::new(
                ParseErrorKind::Unexpected {
                    expect,
                    found: tok.kind.describe(),
                },
                tok.span,
            ),
        }
    }

    fn expect(&mut self, kind: TokenKind, expect: &'static str) -> Result<Token, ParseError> {
        let tok = self.peek();
        match tok {
            Some(t) if t.kind == kind => {
                self.bump();
                Ok(t)
            }
            _ => Err(self.unexpected(expect, tok)),
        }
    }

    fn push_node(&mut self, node: Node) -> Result<NodeId, ParseError> {
        if self.ast.len() >= self.options.max_nodes {
            return Err(ParseError::new(
                ParseErrorKind::Limit(LimitError::NodeLimitExceeded {
                    nodes: self.ast.len(),
                    limit: self.options.max_nodes,
                }),
                node.span(),
            ));
        }
        Ok(self.ast.push_node(node))
    }

    fn enter(&mut self, span: Span) -> Result<(), ParseError> {
        self.guard
            .enter(self.options.max_depth)
            .map_err(|limit| ParseError::new(ParseErrorKind::Limit(limit), span))
    }

    fn parse_value(&mut self) -> Result<NodeId, ParseError> {
        let tok = self.peek();
        let Some(tok) = tok.filter(|t| !t.is_eof()) else {
            return Err(self.unexpected("value", tok));
        };
        match tok.kind {
            TokenKind::Null => {
                self.bump();
                self.push_node(Node::Null { span: tok.span })
            }
            TokenKind::True => {
                self.bump();
                self.push_node(Node::Bool {
                    value: true,
                    span: tok.span,
                })
            }
            TokenKind::False => {
                self.bump();
                self.push_node(Node::Bool {
                    value: false,
                    span: tok.span,
                })
            }
            TokenKind::Number => {
                self.bump();
                let text = self.ast.intern(tok.text(self.source).to_string());
                self.push_node(Node::Number {
                    text,
                    span: tok.span,
                })
            }
            TokenKind::String => {
                self.bump();
                let text = self.string_text(tok);
                let text = self.ast.intern(text);
                self.push_node(Node::String {
                    text,
                    span: tok.span,
                })
            }
            TokenKind::Continuation => self.parse_multiline_string(),
            TokenKind::ObjectStart => match self.grammar {
                Grammar::Json => self.parse_json_object(),
                Grammar::Zon => self.parse_zon_aggregate(),
            },
            TokenKind::ArrayStart => self.parse_json_array(),
            _ => Err(self.unexpected("value", Some(tok))),
        }
    }

    fn string_text(&self, tok: Token) -> String {
        let body = string_body(tok.text(self.source));
        if self.options.decode_strings {
            decode_string(body)
        } else {
            body.to_string()
        }
    }

    /// Folds a run of `\\` lines into one string value, joined by `\n`.
    fn parse_multiline_string(&mut self) -> Result<NodeId, ParseError> {
        let mut text = String::new();
        let mut span = Span::EMPTY;
        let mut first = true;
        while let Some(tok) = self.peek() {
            if tok.kind != TokenKind::Continuation {
                break;
            }
            self.bump();
            let line = tok.text(self.source);
            let line = line.strip_prefix("\\\\").unwrap_or(line);
            if first {
                span = tok.span;
                first = false;
            } else {
                text.push('\n');
                span = span.join(&tok.span);
            }
            text.push_str(line);
        }
        let text = self.ast.intern(text);
        self.push_node(Node::String { text, span })
    }

    fn parse_json_object(&mut self) -> Result<NodeId, ParseError> {
        let open = self.expect(TokenKind::ObjectStart, "'{'")?;
        self.enter(open.span)?;

        let mut properties = Vec::new();
        let close = loop {
            let tok = self.peek();
            match tok.map(|t| t.kind) {
                Some(TokenKind::ObjectEnd) if properties.is_empty() => {
                    break self.bump().unwrap_or(open);
                }
                _ => {}
            }

            properties.push(self.parse_json_property()?);

            let tok = self.peek();
            match tok.map(|t| t.kind) {
                Some(TokenKind::ObjectEnd) => break self.bump().unwrap_or(open),
                Some(TokenKind::Comma) => {
                    self.bump();
                    // JSON forbids trailing commas: the next token must
                    // start another member.
                }
                _ => return Err(self.unexpected("',' or '}'", tok)),
            }
        };

        self.guard.exit();
        let range = self.ast.push_children(&properties);
        self.push_node(Node::Object {
            properties: range,
            span: open.span.join(&close.span),
        })
    }

    fn parse_json_property(&mut self) -> Result<NodeId, ParseError> {
        let key_tok = self.peek();
        let Some(key_tok) = key_tok.filter(|t| t.kind == TokenKind::String) else {
            return Err(self.unexpected("string key", key_tok));
        };
        self.bump();
        let text = self.string_text(key_tok);
        let text = self.ast.intern(text);
        let key = self.push_node(Node::String {
            text,
            span: key_tok.span,
        })?;

        self.expect(TokenKind::Colon, "':'")?;
        let value = self.parse_value()?;
        let span = key_tok.span.join(&self.ast.node(value).span());
        self.push_node(Node::Property { key, value, span })
    }

    fn parse_json_array(&mut self) -> Result<NodeId, ParseError> {
        let open = self.expect(TokenKind::ArrayStart, "'['")?;
        self.enter(open.span)?;

        let mut elements = Vec::new();
        let close = loop {
            let tok = self.peek();
            match tok.map(|t| t.kind) {
                Some(TokenKind::ArrayEnd) if elements.is_empty() => {
                    break self.bump().unwrap_or(open);
                }
                _ => {}
            }

            elements.push(self.parse_value()?);

            let tok = self.peek();
            match tok.map(|t| t.kind) {
                Some(TokenKind::ArrayEnd) => break self.bump().unwrap_or(open),
                Some(TokenKind::Comma) => {
                    self.bump();
                }
                _ => return Err(self.unexpected("',' or ']'", tok)),
            }
        };

        self.guard.exit();
        let range = self.ast.push_children(&elements);
        self.push_node(Node::Array {
            elements: range,
            span: open.span.join(&close.span),
        })
    }

    /// Parses a `.{ ... }` aggregate. The first significant token inside
    /// decides the shape: a field name makes it an object, anything else
    /// an array. `.{}` is an empty object.
    fn parse_zon_aggregate(&mut self) -> Result<NodeId, ParseError> {
        let open = self.expect(TokenKind::ObjectStart, "'.{'")?;
        self.enter(open.span)?;

        let first = self.peek();
        let node = match first.map(|t| t.kind) {
            Some(TokenKind::ObjectEnd) => {
                let close = self.bump().unwrap_or(open);
                let range = self.ast.push_children(&[]);
                self.push_node(Node::Object {
                    properties: range,
                    span: open.span.join(&close.span),
                })
            }
            Some(TokenKind::PropertyName) => self.parse_zon_object_body(open),
            _ => self.parse_zon_array_body(open),
        }?;

        self.guard.exit();
        Ok(node)
    }

    fn parse_zon_object_body(&mut self, open: Token) -> Result<NodeId, ParseError> {
        let mut properties = Vec::new();
        let close = loop {
            let key_tok = self.peek();
            let Some(key_tok) = key_tok.filter(|t| t.kind == TokenKind::PropertyName) else {
                return Err(self.unexpected("field name", key_tok));
            };
            self.bump();
            let text = field_name(key_tok.text(self.source));
            let text = self.ast.intern(text);
            let key = self.push_node(Node::String {
                text,
                span: key_tok.span,
            })?;

            self.expect(TokenKind::Colon, "'='")?;
            let value = self.parse_value()?;
            let span = key_tok.span.join(&self.ast.node(value).span());
            properties.push(self.push_node(Node::Property { key, value, span })?);

            let tok = self.peek();
            match tok.map(|t| t.kind) {
                Some(TokenKind::ObjectEnd) => break self.bump().unwrap_or(open),
                Some(TokenKind::Comma) => {
                    self.bump();
                    // Trailing commas are part of this grammar.
                    if self.peek().map(|t| t.kind) == Some(TokenKind::ObjectEnd) {
                        break self.bump().unwrap_or(open);
                    }
                }
                _ => return Err(self.unexpected("',' or '}'", tok)),
            }
        };

        let range = self.ast.push_children(&properties);
        self.push_node(Node::Object {
            properties: range,
            span: open.span.join(&close.span),
        })
    }

    fn parse_zon_array_body(&mut self, open: Token) -> Result<NodeId, ParseError> {
        let mut elements = Vec::new();
        let close = loop {
            elements.push(self.parse_value()?);

            let tok = self.peek();
            match tok.map(|t| t.kind) {
                Some(TokenKind::ObjectEnd) => break self.bump().unwrap_or(open),
                Some(TokenKind::Comma) => {
                    self.bump();
                    if self.peek().map(|t| t.kind) == Some(TokenKind::ObjectEnd) {
                        break self.bump().unwrap_or(open);
                    }
                }
                _ => return Err(self.unexpected("',' or '}'", tok)),
            }
        };

        let range = self.ast.push_children(&elements);
        self.push_node(Node::Array {
            elements: range,
            span: open.span.join(&close.span),
        })
    }
}

/// Extracts the name from a `.field` or `.@"field"` token.
pub(crate) fn field_name(text: &str) -> String {
    if let Some(quoted) = text.strip_prefix(".@\"") {
        let body = quoted.strip_suffix('"').unwrap_or(quoted);
        decode_string(body)
    } else {
        text.strip_prefix('.').unwrap_or(text).to_string()
    }
}
