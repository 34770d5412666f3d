//! Token stream dispatch.
//!
//! Every consumer in this crate is written against one calling convention:
//! `next() -> Option<Token>`, monotonically advancing until the single
//! `Eof` token has been observed, then `None` forever. Two strategies back
//! that convention:
//!
//! - **Direct**: [`TokenStream`] is a closed enum over the first-party
//!   producers. `next()` resolves each variant with an ordinary `match`,
//!   so the hot path (one fetch per lexical unit) pays no indirect call.
//! - **Dynamic**: the [`TokenStream::Dynamic`] variant holds a boxed
//!   [`TokenSource`], reaching pluggable producers (adapters, mocks,
//!   cross-crate sources) through one vtable call per token.
//!
//! The representation is picked when the stream is constructed, never per
//! call, and consumers must not assume which strategy backs a stream.

use crate::lexer::{Grammar, JsonLexer, ZonLexer};
use crate::token::Token;

/// An open-ended producer of tokens.
///
/// Implement this to feed the parser or linter from anything that is not
/// one of the built-in lexers. Producers signal exhaustion by returning
/// `None`, never by panicking, and surface recoverable lexical problems
/// as `Error`-kind tokens so consumers decide whether to stop.
pub trait TokenSource {
    /// Produces the next token, or `None` once the stream is exhausted.
    fn next_token(&mut self) -> Option<Token>;
}

/// A pre-materialized token sequence.
///
/// The in-memory producer used by tests and by callers that already hold
/// tokens (e.g. re-running the linter over a captured stream). Yields
/// exactly the tokens it was given, in order, then `None` forever.
#[derive(Debug, Clone, Default)]
pub struct BufferedTokens {
    tokens: Vec<Token>,
    cursor: usize,
}

impl BufferedTokens {
    /// Wraps an owned token sequence.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, cursor: 0 }
    }

    /// Number of tokens not yet yielded.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.tokens.len().saturating_sub(self.cursor)
    }
}

impl TokenSource for BufferedTokens {
    #[inline]
    fn next_token(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(tok)
    }
}

impl TokenSource for JsonLexer<'_> {
    #[inline]
    fn next_token(&mut self) -> Option<Token> {
        JsonLexer::next_token(self)
    }
}

impl TokenSource for ZonLexer<'_> {
    #[inline]
    fn next_token(&mut self) -> Option<Token> {
        ZonLexer::next_token(self)
    }
}

/// A stream of tokens, dispatched directly for the closed set of
/// first-party producers and dynamically for everything else.
pub enum TokenStream<'src> {
    /// JSON lexer output (direct dispatch).
    Json(JsonLexer<'src>),
    /// Config-grammar lexer output (direct dispatch).
    Zon(ZonLexer<'src>),
    /// Pre-materialized tokens (direct dispatch).
    Buffered(BufferedTokens),
    /// An opaque pluggable producer (one indirect call per token).
    Dynamic(Box<dyn TokenSource + 'src>),
}

impl<'src> TokenStream<'src> {
    /// Lexes `source` under `grammar`.
    ///
    /// Never fails: lexical problems surface as `Error`-kind tokens in the
    /// stream.
    pub fn tokenize(source: &'src str, grammar: Grammar) -> Self {
        match grammar {
            Grammar::Json => Self::Json(JsonLexer::new(source)),
            Grammar::Zon => Self::Zon(ZonLexer::new(source)),
        }
    }

    /// Wraps a pre-materialized token sequence.
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self::Buffered(BufferedTokens::new(tokens))
    }

    /// Wraps an arbitrary producer behind the dynamic strategy.
    pub fn dynamic(source: impl TokenSource + 'src) -> Self {
        Self::Dynamic(Box::new(source))
    }

    /// Produces the next token, trivia included.
    #[inline]
    pub fn next(&mut self) -> Option<Token> {
        match self {
            Self::Json(lexer) => lexer.next_token(),
            Self::Zon(lexer) => lexer.next_token(),
            Self::Buffered(tokens) => tokens.next_token(),
            Self::Dynamic(source) => source.next_token(),
        }
    }

    /// Produces the next non-trivia token.
    #[inline]
    pub fn next_significant(&mut self) -> Option<Token> {
        loop {
            let tok = self.next()?;
            if !tok.is_trivia() {
                return Some(tok);
            }
        }
    }

    /// Drains the stream into a vector, trivia included.
    pub fn collect_tokens(mut self) -> Vec<Token> {
        let mut out = Vec::new();
        while let Some(tok) = self.next() {
            out.push(tok);
        }
        out
    }
}
