//! Lexers for the supported grammars.
//!
//! Each grammar gets its own `logos`-derived scanner wrapped in a small
//! restartable lexer. The wrapper maps grammar-specific lexemes onto the
//! shared [`TokenKind`](crate::token::TokenKind) set, appends the final
//! `Eof` token, and downgrades malformed lexemes to `Error` tokens instead
//! of aborting, so one run can report many lexical problems.
//!
//! Lexers own no heap state: just the scan position inside the borrowed
//! source. Construct a fresh one per input.

mod json;
mod zon;

pub use json::JsonLexer;
pub use zon::ZonLexer;

/// Selects the lexical rules applied to an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Grammar {
    /// Strict JSON (RFC 8259): no comments, no trailing commas.
    #[default]
    Json,
    /// ZON-style configuration: `.{ .field = value }` aggregates, `//`
    /// comments, `\\` multiline strings, trailing commas allowed.
    Zon,
}

/// A problem found inside a string literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StringIssue {
    /// An escape character outside the grammar's allowed set, e.g. `\q`.
    UnknownEscape,
    /// A `\u` escape without four hex digits.
    MalformedUnicode,
    /// A `\u` escape encoding half of a surrogate pair.
    UnpairedSurrogate,
}

/// Validates the escape sequences of a string body (no surrounding quotes).
///
/// This is the lexical check: every `\` must introduce a known escape, and
/// `\u` must be followed by four hex digits. Surrogate pairing is the
/// linter's concern, not the lexer's. `\uD800` is lexically fine here.
pub(crate) fn check_escapes(body: &str) -> Result<(), StringIssue> {
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            continue;
        }
        match chars.next() {
            Some('"' | '\\' | '/' | 'b' | 'f' | 'n' | 'r' | 't') => {}
            Some('u') => {
                for _ in 0..4 {
                    match chars.next() {
                        Some(h) if h.is_ascii_hexdigit() => {}
                        _ => return Err(StringIssue::MalformedUnicode),
                    }
                }
            }
            _ => return Err(StringIssue::UnknownEscape),
        }
    }
    Ok(())
}

/// Validates that `\u` escapes in a string body encode well-formed text.
///
/// High surrogates must be followed immediately by a low surrogate escape;
/// lone surrogates in either position are rejected. Assumes `body` already
/// passed [`check_escapes`].
pub(crate) fn check_encoding(body: &str) -> Result<(), StringIssue> {
    let mut units = unicode_escapes(body);
    while let Some(unit) = units.next() {
        match unit {
            0xD800..=0xDBFF => match units.next() {
                Some(0xDC00..=0xDFFF) => {}
                _ => return Err(StringIssue::UnpairedSurrogate),
            },
            0xDC00..=0xDFFF => return Err(StringIssue::UnpairedSurrogate),
            _ => {}
        }
    }
    Ok(())
}

/// Iterates the UTF-16 code units written as `\uXXXX` escapes.
///
/// Non-escape characters break surrogate adjacency, so they are yielded as
/// a replacement unit to keep pairing checks honest.
fn unicode_escapes(body: &str) -> impl Iterator<Item = u16> + '_ {
    let mut chars = body.chars().peekable();
    core::iter::from_fn(move || {
        let c = chars.next()?;
        if c != '\\' {
            // A literal character terminates any pending surrogate pair.
            return Some(0xFFFD);
        }
        match chars.next() {
            Some('u') => {
                let mut unit: u16 = 0;
                for _ in 0..4 {
                    let h = chars.next()?.to_digit(16)? as u16;
                    unit = unit << 4 | h;
                }
                Some(unit)
            }
            // Any other escape is a plain BMP character as well.
            Some(_) => Some(0xFFFD),
            None => None,
        }
    })
}

/// Decodes the escape sequences of a string body into owned text.
///
/// Unknown escapes and lone surrogates decode to U+FFFD; the lexer and
/// linter have already reported them, decoding just needs to terminate.
pub(crate) fn decode_string(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('/') => out.push('/'),
            Some('b') => out.push('\u{0008}'),
            Some('f') => out.push('\u{000C}'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('u') => {
                let unit = read_hex4(&mut chars);
                match unit {
                    Some(hi @ 0xD800..=0xDBFF) => {
                        // Try to combine with a following \uXXXX low half.
                        let mut fork = chars.clone();
                        let lo = match (fork.next(), fork.next()) {
                            (Some('\\'), Some('u')) => read_hex4(&mut fork),
                            _ => None,
                        };
                        match lo {
                            Some(lo @ 0xDC00..=0xDFFF) => {
                                let c = 0x10000
                                    + ((hi as u32 - 0xD800) << 10)
                                    + (lo as u32 - 0xDC00);
                                out.push(char::from_u32(c).unwrap_or('\u{FFFD}'));
                                chars = fork;
                            }
                            _ => out.push('\u{FFFD}'),
                        }
                    }
                    Some(0xDC00..=0xDFFF) | None => out.push('\u{FFFD}'),
                    Some(unit) => {
                        out.push(char::from_u32(unit as u32).unwrap_or('\u{FFFD}'));
                    }
                }
            }
            Some(other) => {
                out.push('\u{FFFD}');
                let _ = other;
            }
            None => out.push('\u{FFFD}'),
        }
    }
    out
}

fn read_hex4(chars: &mut core::iter::Peekable<core::str::Chars<'_>>) -> Option<u16> {
    let mut unit: u16 = 0;
    for _ in 0..4 {
        let h = chars.next()?.to_digit(16)? as u16;
        unit = unit << 4 | h;
    }
    Some(unit)
}

/// Strips the surrounding quotes from a string token's text, tolerating a
/// missing closing quote (unterminated literals).
pub(crate) fn string_body(text: &str) -> &str {
    let text = text.strip_prefix('"').unwrap_or(text);
    text.strip_suffix('"').unwrap_or(text)
}
