//! Lexical tokens.
//!
//! [`TokenKind`] is a closed enumeration shared by every grammar the crate
//! lexes. Grammar-specific lexemes map into this common set so that the
//! parser and linter are written once, against kinds, not against a
//! particular lexer.

use crate::span::Span;

/// The classification of a lexical unit.
///
/// Trivia kinds ([`Whitespace`](TokenKind::Whitespace),
/// [`Comment`](TokenKind::Comment)) are produced like any other token and
/// filtered by consumers, so error-recovery tooling can still see them and
/// token spans cover every input byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    /// A string literal, quotes included in the span.
    String,
    /// A number literal.
    Number,
    /// The `true` literal.
    True,
    /// The `false` literal.
    False,
    /// The `null` literal.
    Null,
    /// `{` in JSON; `.{` in the config grammar (which uses it for arrays
    /// too; consumers disambiguate from the first token inside).
    ObjectStart,
    /// `}` for both grammars.
    ObjectEnd,
    /// `[` (JSON only).
    ArrayStart,
    /// `]` (JSON only).
    ArrayEnd,
    /// `,` element/member separator.
    Comma,
    /// The key/value separator: `:` in JSON, `=` in the config grammar.
    Colon,
    /// A `.identifier` field name (config grammar only).
    PropertyName,
    /// A run of whitespace. Trivia.
    Whitespace,
    /// A `//` line comment (config grammar only). Trivia.
    Comment,
    /// One `\\...` line of a multiline string (config grammar only).
    Continuation,
    /// Bytes that match no valid lexical form. The lexer emits this and
    /// keeps scanning; it never aborts the stream.
    Error,
    /// End of input. Zero-width, emitted exactly once per stream.
    Eof,
}

impl TokenKind {
    /// Returns `true` for kinds with no structural meaning.
    #[inline]
    pub const fn is_trivia(&self) -> bool {
        matches!(self, Self::Whitespace | Self::Comment)
    }

    /// A short human-readable name, used in error messages.
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::True => "'true'",
            Self::False => "'false'",
            Self::Null => "'null'",
            Self::ObjectStart => "'{'",
            Self::ObjectEnd => "'}'",
            Self::ArrayStart => "'['",
            Self::ArrayEnd => "']'",
            Self::Comma => "','",
            Self::Colon => "key separator",
            Self::PropertyName => "field name",
            Self::Whitespace => "whitespace",
            Self::Comment => "comment",
            Self::Continuation => "multiline string line",
            Self::Error => "invalid token",
            Self::Eof => "end of input",
        }
    }
}

/// A classified lexical unit with its source location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[inline]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns `true` for whitespace and comment tokens.
    #[inline]
    pub const fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }

    /// Returns `true` for the end-of-input marker.
    #[inline]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Slices this token's text out of `source`.
    #[inline]
    pub fn text<'src>(&self, source: &'src str) -> &'src str {
        self.span.text(source).unwrap_or("")
    }
}
