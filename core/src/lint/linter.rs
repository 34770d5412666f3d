//! The streaming linter.
//!
//! Works directly on tokens so it keeps producing findings for input the
//! parser would reject: structural problems are reported as syntax-error
//! diagnostics and scanning resynchronizes instead of aborting. The one
//! hard stop is the maximum-depth rule, which exists to bound the
//! linter's own recursion on runaway input.

use std::collections::HashMap;

use crate::lexer::{Grammar, StringIssue, check_encoding, check_escapes, decode_string, string_body};
use crate::lint::diagnostic::Diagnostic;
use crate::lint::rules::{RuleKind, RuleSet};
use crate::parser::field_name;
use crate::span::Span;
use crate::stream::TokenStream;
use crate::token::{Token, TokenKind};

/// Configuration for a lint pass.
///
/// # Default Values
///
/// | Setting | Default |
/// |---------|---------|
/// | `rules` | catalog defaults |
/// | `max_depth` | 100 |
/// | `deep_nesting_threshold` | 20 |
/// | `max_object_keys` | 10,000 |
/// | `max_array_elements` | 100,000 |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinterOptions {
    /// Which rules run. Disabled rules report nothing, though lexically
    /// invalid input still surfaces as a plain syntax error.
    pub rules: RuleSet,

    /// Hard nesting limit. Crossing it reports an error and stops the
    /// scan.
    pub max_depth: usize,

    /// Advisory nesting threshold for the deep-nesting rule.
    pub deep_nesting_threshold: usize,

    /// Key-count threshold for the large-structure rule.
    pub max_object_keys: usize,

    /// Element-count threshold for the large-structure rule.
    pub max_array_elements: usize,
}

impl Default for LinterOptions {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl LinterOptions {
    /// Default configuration, usable in const contexts.
    pub const DEFAULT: Self = Self {
        rules: RuleSet::DEFAULT,
        max_depth: 100,
        deep_nesting_threshold: 20,
        max_object_keys: 10_000,
        max_array_elements: 100_000,
    };

    /// Creates a new configuration with default values.
    #[inline]
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Replaces the enabled-rule set.
    #[inline]
    pub const fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    /// Sets the hard nesting limit.
    #[inline]
    pub const fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Sets the advisory nesting threshold.
    #[inline]
    pub const fn with_deep_nesting_threshold(mut self, threshold: usize) -> Self {
        self.deep_nesting_threshold = threshold;
        self
    }

    /// Sets the object-size threshold.
    #[inline]
    pub const fn with_max_object_keys(mut self, keys: usize) -> Self {
        self.max_object_keys = keys;
        self
    }

    /// Sets the array-size threshold.
    #[inline]
    pub const fn with_max_array_elements(mut self, elements: usize) -> Self {
        self.max_array_elements = elements;
        self
    }
}

/// Runs lint rules over token streams.
#[derive(Debug, Clone, Copy, Default)]
pub struct Linter {
    options: LinterOptions,
}

impl Linter {
    /// A linter with the default rule set and thresholds.
    #[inline]
    pub const fn new() -> Self {
        Self {
            options: LinterOptions::DEFAULT,
        }
    }

    /// A linter with explicit options.
    #[inline]
    pub const fn with_options(options: LinterOptions) -> Self {
        Self { options }
    }

    /// Lints `source` under `grammar`.
    ///
    /// Diagnostics come back in source order. An empty vector means the
    /// input is clean under the enabled rules.
    pub fn lint(&self, source: &str, grammar: Grammar) -> Vec<Diagnostic> {
        self.run(TokenStream::tokenize(source, grammar), source, Some(grammar))
    }

    /// Lints an existing token stream.
    ///
    /// Without grammar knowledge, `{`-style aggregates are classified from
    /// their contents, so a missing `:` after a lone string key reads as
    /// an array element rather than a structural error. Prefer
    /// [`Linter::lint`] when the grammar is known.
    pub fn lint_tokens<'src>(&self, stream: TokenStream<'src>, source: &'src str) -> Vec<Diagnostic> {
        self.run(stream, source, None)
    }

    fn run<'src>(
        &self,
        stream: TokenStream<'src>,
        source: &'src str,
        grammar: Option<Grammar>,
    ) -> Vec<Diagnostic> {
        let mut checker = Checker {
            stream,
            source,
            grammar,
            options: self.options,
            diagnostics: Vec::new(),
            lookahead: None,
            depth: 0,
            halted: false,
        };
        checker.run();
        let mut diagnostics = checker.diagnostics;
        diagnostics.sort_by_key(|d| (d.span.start, d.span.end));
        diagnostics
    }
}

/// How the body of a brace aggregate is keyed.
#[derive(Clone, Copy, PartialEq, Eq)]
enum AggregateMode {
    /// String keys with `:` separators.
    StringKeys,
    /// `.field` keys with `=` separators.
    FieldKeys,
    /// No keys, just comma-separated values.
    Elements,
}

struct Checker<'src> {
    stream: TokenStream<'src>,
    source: &'src str,
    grammar: Option<Grammar>,
    options: LinterOptions,
    diagnostics: Vec<Diagnostic>,
    lookahead: Option<Token>,
    depth: usize,
    halted: bool,
}

impl Checker<'_> {
    fn run(&mut self) {
        self.check_value();
        let mut trailing_reported = false;
        loop {
            if self.halted {
                return;
            }
            let Some(tok) = self.peek() else { return };
            if tok.is_eof() {
                return;
            }
            if !trailing_reported {
                self.report(
                    RuleKind::SyntaxError,
                    "unexpected content after the top-level value".to_string(),
                    tok.span,
                );
                trailing_reported = true;
            }
            match tok.kind {
                TokenKind::ObjectEnd
                | TokenKind::ArrayEnd
                | TokenKind::PropertyName
                | TokenKind::Colon
                | TokenKind::Comma => {
                    self.bump();
                }
                _ => self.check_value(),
            }
        }
    }

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

    #[inline]
    fn enabled(&self, rule: RuleKind) -> bool {
        self.options.rules.contains(rule)
    }

    fn report(&mut self, rule: RuleKind, message: String, span: Span) {
        if self.enabled(rule) {
            self.diagnostics.push(Diagnostic::new(rule, message, span));
        }
    }

    /// Enters one nesting level. Returns `false` when the scan must stop.
    fn enter(&mut self, span: Span) -> bool {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            self.report(
                RuleKind::MaxDepthExceeded,
                format!(
                    "nesting depth {} exceeds the maximum of {}",
                    self.depth, self.options.max_depth
                ),
                span,
            );
            self.halted = true;
            return false;
        }
        if self.depth == self.options.deep_nesting_threshold.saturating_add(1) {
            self.report(
                RuleKind::DeepNesting,
                format!(
                    "nesting depth {} crosses the advisory threshold of {}",
                    self.depth, self.options.deep_nesting_threshold
                ),
                span,
            );
        }
        true
    }

    fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Checks one value starting at the current token.
    ///
    /// Closing tokens and field names are reported but left in place so
    /// the enclosing scope can resynchronize on them.
    fn check_value(&mut self) {
        loop {
            if self.halted {
                return;
            }
            let Some(tok) = self.peek() else { return };
            match tok.kind {
                TokenKind::Eof => return,
                TokenKind::Colon | TokenKind::Comma => {
                    self.bump();
                    self.report(
                        RuleKind::SyntaxError,
                        format!("expected value, found {}", tok.kind.describe()),
                        tok.span,
                    );
                }
                TokenKind::ObjectEnd | TokenKind::ArrayEnd | TokenKind::PropertyName => {
                    self.report(
                        RuleKind::SyntaxError,
                        format!("expected value, found {}", tok.kind.describe()),
                        tok.span,
                    );
                    return;
                }
                TokenKind::String => {
                    self.bump();
                    self.check_string(tok);
                    return;
                }
                TokenKind::Number => {
                    self.bump();
                    self.check_number(tok);
                    return;
                }
                TokenKind::True | TokenKind::False | TokenKind::Null => {
                    self.bump();
                    return;
                }
                TokenKind::Continuation => {
                    while self.peek().map(|t| t.kind) == Some(TokenKind::Continuation) {
                        self.bump();
                    }
                    return;
                }
                TokenKind::Error => {
                    self.bump();
                    self.classify_error(tok);
                    return;
                }
                TokenKind::ObjectStart => {
                    self.check_braces(tok);
                    return;
                }
                TokenKind::ArrayStart => {
                    self.check_array(tok);
                    return;
                }
                // Trivia: next_significant never yields it.
                _ => return,
            }
        }
    }

    /// Checks a `{` or `.{` aggregate.
    fn check_braces(&mut self, open: Token) {
        self.bump();
        if !self.enter(open.span) {
            return;
        }

        let mode = match self.grammar {
            Some(Grammar::Json) => AggregateMode::StringKeys,
            _ => match self.peek().map(|t| t.kind) {
                Some(TokenKind::PropertyName) => AggregateMode::FieldKeys,
                _ if self.grammar == Some(Grammar::Zon) => AggregateMode::Elements,
                // Grammar unknown: decided by the first entry's shape.
                Some(TokenKind::String) => AggregateMode::StringKeys,
                _ => AggregateMode::Elements,
            },
        };

        let mut keys: HashMap<String, Span> = HashMap::new();
        let mut entries = 0usize;
        // Set after each entry; the next entry must be preceded by `,`.
        let mut needs_comma = false;
        let close = loop {
            if self.halted {
                return;
            }
            let Some(tok) = self.peek() else { break open };
            match tok.kind {
                TokenKind::ObjectEnd => {
                    self.bump();
                    break tok;
                }
                TokenKind::Eof => {
                    self.report(
                        RuleKind::SyntaxError,
                        "unexpected end of input inside aggregate".to_string(),
                        tok.span,
                    );
                    break tok;
                }
                TokenKind::Comma => {
                    self.bump();
                    if !needs_comma {
                        self.report(
                            RuleKind::SyntaxError,
                            format!("expected {}, found ','", mode.expectation()),
                            tok.span,
                        );
                    }
                    needs_comma = false;
                }
                TokenKind::String if mode == AggregateMode::StringKeys => {
                    if needs_comma {
                        self.report(
                            RuleKind::SyntaxError,
                            format!("expected ',', found {}", tok.kind.describe()),
                            tok.span,
                        );
                    }
                    self.bump();
                    self.check_string(tok);
                    if self.peek().map(|t| t.kind) == Some(TokenKind::Colon) {
                        self.bump();
                        entries += 1;
                        let key = decode_string(string_body(tok.text(self.source)));
                        self.record_key(&mut keys, key, tok.span);
                        self.check_value();
                    } else if self.grammar.is_none() {
                        // No separator: reclassify as an element of a
                        // keyless aggregate.
                        entries += 1;
                    } else {
                        let at = self.peek().map_or(tok.span, |t| t.span);
                        self.report(
                            RuleKind::SyntaxError,
                            "expected ':' after object key".to_string(),
                            at,
                        );
                        self.check_trailing_value();
                    }
                    needs_comma = true;
                }
                TokenKind::PropertyName if mode == AggregateMode::FieldKeys => {
                    if needs_comma {
                        self.report(
                            RuleKind::SyntaxError,
                            format!("expected ',', found {}", tok.kind.describe()),
                            tok.span,
                        );
                    }
                    self.bump();
                    entries += 1;
                    self.record_key(&mut keys, field_name(tok.text(self.source)), tok.span);
                    if self.peek().map(|t| t.kind) == Some(TokenKind::Colon) {
                        self.bump();
                        self.check_value();
                    } else {
                        let at = self.peek().map_or(tok.span, |t| t.span);
                        self.report(
                            RuleKind::SyntaxError,
                            "expected '=' after field name".to_string(),
                            at,
                        );
                        self.check_trailing_value();
                    }
                    needs_comma = true;
                }
                TokenKind::ArrayEnd => {
                    self.bump();
                    self.report(
                        RuleKind::SyntaxError,
                        "unexpected ']' inside braces".to_string(),
                        tok.span,
                    );
                }
                TokenKind::Error => {
                    // A malformed key or element: classify it once, then
                    // pick up the rest of the entry if one follows.
                    if needs_comma {
                        self.report(
                            RuleKind::SyntaxError,
                            "expected ',' before the next entry".to_string(),
                            tok.span,
                        );
                    }
                    self.bump();
                    self.classify_error(tok);
                    if self.peek().map(|t| t.kind) == Some(TokenKind::Colon) {
                        self.bump();
                        entries += 1;
                        self.check_value();
                    }
                    needs_comma = true;
                }
                _ if mode == AggregateMode::Elements => {
                    if tok.kind == TokenKind::PropertyName {
                        self.bump();
                        self.report(
                            RuleKind::SyntaxError,
                            "unexpected field name in keyless aggregate".to_string(),
                            tok.span,
                        );
                    } else {
                        if needs_comma {
                            self.report(
                                RuleKind::SyntaxError,
                                format!("expected ',', found {}", tok.kind.describe()),
                                tok.span,
                            );
                        }
                        entries += 1;
                        self.check_value();
                        needs_comma = true;
                    }
                }
                _ => {
                    self.report(
                        RuleKind::SyntaxError,
                        format!("expected {}, found {}", mode.expectation(), tok.kind.describe()),
                        tok.span,
                    );
                    self.skip_entry(tok);
                }
            }
        };

        self.exit();
        self.check_size(mode, entries, open.span.join(&close.span));
    }

    /// Checks a `[` array.
    fn check_array(&mut self, open: Token) {
        self.bump();
        if !self.enter(open.span) {
            return;
        }

        let mut elements = 0usize;
        // Set after each element; the next element must be preceded by `,`.
        let mut needs_comma = false;
        let close = loop {
            if self.halted {
                return;
            }
            let Some(tok) = self.peek() else { break open };
            match tok.kind {
                TokenKind::ArrayEnd => {
                    self.bump();
                    break tok;
                }
                TokenKind::Eof => {
                    self.report(
                        RuleKind::SyntaxError,
                        "unexpected end of input inside array".to_string(),
                        tok.span,
                    );
                    break tok;
                }
                TokenKind::Comma => {
                    self.bump();
                    if !needs_comma {
                        self.report(
                            RuleKind::SyntaxError,
                            "expected value, found ','".to_string(),
                            tok.span,
                        );
                    }
                    needs_comma = false;
                }
                TokenKind::ObjectEnd | TokenKind::PropertyName => {
                    self.bump();
                    self.report(
                        RuleKind::SyntaxError,
                        format!("unexpected {} inside array", tok.kind.describe()),
                        tok.span,
                    );
                }
                _ => {
                    if needs_comma {
                        self.report(
                            RuleKind::SyntaxError,
                            format!("expected ',', found {}", tok.kind.describe()),
                            tok.span,
                        );
                    }
                    elements += 1;
                    self.check_value();
                    needs_comma = true;
                }
            }
        };

        self.exit();
        if self.enabled(RuleKind::LargeStructure) && elements > self.options.max_array_elements {
            self.report(
                RuleKind::LargeStructure,
                format!(
                    "array has {} elements, more than the threshold of {}",
                    elements, self.options.max_array_elements
                ),
                open.span.join(&close.span),
            );
        }
    }

    fn check_size(&mut self, mode: AggregateMode, entries: usize, span: Span) {
        if !self.enabled(RuleKind::LargeStructure) {
            return;
        }
        let (limit, what) = match mode {
            AggregateMode::Elements => (self.options.max_array_elements, "elements"),
            _ => (self.options.max_object_keys, "keys"),
        };
        if entries > limit {
            self.report(
                RuleKind::LargeStructure,
                format!("aggregate has {entries} {what}, more than the threshold of {limit}"),
                span,
            );
        }
    }

    /// Consumes a value after a reported separator problem, when one is
    /// actually present.
    fn check_trailing_value(&mut self) {
        if self.peek().is_some_and(|t| starts_value(t.kind)) {
            self.check_value();
        }
    }

    fn skip_entry(&mut self, tok: Token) {
        if starts_value(tok.kind) {
            self.check_value();
        } else {
            self.bump();
        }
    }

    fn record_key(&mut self, keys: &mut HashMap<String, Span>, key: String, span: Span) {
        if !self.enabled(RuleKind::NoDuplicateKeys) {
            return;
        }
        if keys.contains_key(&key) {
            self.report(
                RuleKind::NoDuplicateKeys,
                format!("duplicate key \"{key}\""),
                span,
            );
        } else {
            keys.insert(key, span);
        }
    }

    fn check_string(&mut self, tok: Token) {
        if !self.enabled(RuleKind::InvalidStringEncoding) {
            return;
        }
        let body = string_body(tok.text(self.source));
        if check_encoding(body) == Err(StringIssue::UnpairedSurrogate) {
            self.report(
                RuleKind::InvalidStringEncoding,
                "unicode escapes form an unpaired surrogate".to_string(),
                tok.span,
            );
        }
    }

    fn check_number(&mut self, tok: Token) {
        if !self.enabled(RuleKind::LargeNumberPrecision) {
            return;
        }
        let digits = significant_digits(tok.text(self.source));
        if digits > 17 {
            self.report(
                RuleKind::LargeNumberPrecision,
                format!("number carries {digits} significant digits; a 64-bit float preserves at most 17"),
                tok.span,
            );
        }
    }

    /// Reports a finding about a lexically invalid token.
    ///
    /// When the specific rule is disabled the finding downgrades to the
    /// plain syntax-error rule, so invalid input never lints as clean.
    fn report_lexical(&mut self, rule: RuleKind, message: String, span: Span) {
        if self.enabled(rule) {
            self.diagnostics.push(Diagnostic::new(rule, message, span));
        } else {
            self.report(RuleKind::SyntaxError, message, span);
        }
    }

    /// Maps a lexical error token onto the most specific rule its text
    /// suggests.
    fn classify_error(&mut self, tok: Token) {
        let text = tok.text(self.source);
        if text.starts_with('"') {
            if text.len() < 2 || !text.ends_with('"') {
                self.report(
                    RuleKind::SyntaxError,
                    "unterminated string literal".to_string(),
                    tok.span,
                );
                return;
            }
            let body = string_body(text);
            match check_escapes(body) {
                Err(StringIssue::UnknownEscape | StringIssue::MalformedUnicode) => self
                    .report_lexical(
                        RuleKind::InvalidEscape,
                        "invalid escape sequence in string".to_string(),
                        tok.span,
                    ),
                _ => match check_encoding(body) {
                    Err(StringIssue::UnpairedSurrogate) => self.report_lexical(
                        RuleKind::InvalidStringEncoding,
                        "unicode escapes form an unpaired surrogate".to_string(),
                        tok.span,
                    ),
                    _ => self.report(
                        RuleKind::SyntaxError,
                        "malformed string literal".to_string(),
                        tok.span,
                    ),
                },
            }
            return;
        }

        let unsigned = text.strip_prefix('-').unwrap_or(text);
        if unsigned.len() >= 2
            && unsigned.starts_with('0')
            && unsigned.as_bytes()[1].is_ascii_digit()
        {
            self.report_lexical(
                RuleKind::NoLeadingZeros,
                "number has a redundant leading zero".to_string(),
                tok.span,
            );
            return;
        }
        let number_like = unsigned
            .as_bytes()
            .first()
            .is_some_and(|b| b.is_ascii_digit())
            && unsigned
                .bytes()
                .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
        if number_like {
            self.report_lexical(
                RuleKind::InvalidNumber,
                "malformed number literal".to_string(),
                tok.span,
            );
            return;
        }
        self.report(
            RuleKind::SyntaxError,
            format!("unexpected input `{}`", snippet(text)),
            tok.span,
        );
    }
}

impl AggregateMode {
    const fn expectation(self) -> &'static str {
        match self {
            AggregateMode::StringKeys => "string key",
            AggregateMode::FieldKeys => "field name",
            AggregateMode::Elements => "value",
        }
    }
}

const fn starts_value(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::String
            | TokenKind::Number
            | TokenKind::True
            | TokenKind::False
            | TokenKind::Null
            | TokenKind::ObjectStart
            | TokenKind::ArrayStart
            | TokenKind::Continuation
            | TokenKind::Error
    )
}

fn snippet(text: &str) -> &str {
    let mut end = text.len().min(24);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

fn significant_digits(text: &str) -> usize {
    let mantissa = text.split(['e', 'E']).next().unwrap_or(text);
    let digits: Vec<u8> = mantissa.bytes().filter(u8::is_ascii_digit).collect();
    let Some(start) = digits.iter().position(|d| *d != b'0') else {
        return 0;
    };
    let end = digits
        .iter()
        .rposition(|d| *d != b'0')
        .map_or(digits.len(), |i| i + 1);
    end - start
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::diagnostic::Severity;
    use test_case::test_case;

    fn lint_json(source: &str) -> Vec<Diagnostic> {
        Linter::new().lint(source, Grammar::Json)
    }

    fn lint_zon(source: &str) -> Vec<Diagnostic> {
        Linter::new().lint(source, Grammar::Zon)
    }

    #[test]
    fn test_clean_object_has_no_findings() {
        assert!(lint_json(r#"{"a": 1, "b": 2}"#).is_empty());
    }

    #[test]
    fn test_duplicate_key_points_at_second_occurrence() {
        let diags = lint_json(r#"{"a": 1, "a": 2}"#);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule, RuleKind::NoDuplicateKeys);
        assert_eq!(diags[0].severity, Severity::Error);
        assert_eq!(diags[0].span, Span::new(9, 12));
    }

    #[test]
    fn test_disabled_rule_leaves_no_trace() {
        let options = LinterOptions::new()
            .with_rules(RuleSet::default().without(RuleKind::NoDuplicateKeys));
        let diags = Linter::with_options(options).lint(r#"{"a": 1, "a": 2}"#, Grammar::Json);
        assert!(diags.is_empty());
    }

    #[test]
    fn test_leading_zero_is_a_warning() {
        let diags = lint_json("01");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule, RuleKind::NoLeadingZeros);
        assert_eq!(diags[0].severity, Severity::Warning);
        assert_eq!(diags[0].span, Span::new(0, 2));
    }

    #[test]
    fn test_missing_colon_resynchronizes() {
        let diags = lint_json(r#"{"a" 1, "b": 2}"#);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule, RuleKind::SyntaxError);
    }

    #[test_case("[1 2]", Span::new(3, 4) ; "array missing comma")]
    #[test_case(r#"{"a": 1 "b": 2}"#, Span::new(8, 11) ; "object missing comma")]
    fn test_missing_comma_reported(source: &str, at: Span) {
        let diags = lint_json(source);
        assert_eq!(diags.len(), 1, "diagnostics: {diags:?}");
        assert_eq!(diags[0].rule, RuleKind::SyntaxError);
        assert_eq!(diags[0].span, at);
    }

    #[test]
    fn test_doubled_comma_reported() {
        let diags = lint_json("[1,,2]");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule, RuleKind::SyntaxError);
        assert_eq!(diags[0].span, Span::new(3, 4));
    }

    #[test_case(".{ 1 2 }" ; "tuple missing comma")]
    #[test_case(".{ .a = 1 .b = 2 }" ; "struct missing comma")]
    fn test_zon_missing_comma_reported(source: &str) {
        let diags = lint_zon(source);
        assert_eq!(diags.len(), 1, "diagnostics: {diags:?}");
        assert_eq!(diags[0].rule, RuleKind::SyntaxError);
    }

    #[test]
    fn test_trailing_comma_stays_clean() {
        assert!(lint_zon(".{ 1, 2, }").is_empty());
        assert!(lint_zon(".{ .a = 1, }").is_empty());
    }

    #[test_case("01", RuleKind::NoLeadingZeros ; "leading zero")]
    #[test_case(r#""\q""#, RuleKind::InvalidEscape ; "unknown escape")]
    fn test_disabled_lexical_rule_falls_back(source: &str, disabled: RuleKind) {
        let options = LinterOptions::new().with_rules(RuleSet::default().without(disabled));
        let diags = Linter::with_options(options).lint(source, Grammar::Json);
        assert_eq!(diags.len(), 1, "diagnostics: {diags:?}");
        assert_eq!(diags[0].rule, RuleKind::SyntaxError);
    }

    #[test]
    fn test_double_assignment_is_syntax_error() {
        let diags = lint_zon(r#".{ .field = = "value" }"#);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule, RuleKind::SyntaxError);
        assert_eq!(diags[0].span, Span::new(12, 13));
    }

    #[test]
    fn test_missing_value_is_syntax_error() {
        let diags = lint_zon(".{ .name = }");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule, RuleKind::SyntaxError);
    }

    #[test]
    fn test_deep_nesting_warns_once() {
        let source = "[".repeat(25) + "1" + &"]".repeat(25);
        let diags = lint_json(&source);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule, RuleKind::DeepNesting);
        assert_eq!(diags[0].severity, Severity::Warning);
    }

    #[test]
    fn test_max_depth_stops_the_scan() {
        let source = "[".repeat(150);
        let diags = lint_json(&source);
        assert!(diags.iter().any(|d| d.rule == RuleKind::MaxDepthExceeded));
        // Halted: no unclosed-array findings pile up afterwards.
        assert!(diags.iter().all(|d| d.rule != RuleKind::SyntaxError));
    }

    #[test]
    fn test_unpaired_surrogate() {
        let diags = lint_json(r#""\uD83D hello""#);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule, RuleKind::InvalidStringEncoding);
    }

    #[test]
    fn test_invalid_escape_classified() {
        let diags = lint_json(r#""\q""#);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule, RuleKind::InvalidEscape);
    }

    #[test]
    fn test_malformed_exponent_classified() {
        let diags = lint_json("[1e+]");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule, RuleKind::InvalidNumber);
    }

    #[test]
    fn test_precision_rule_off_by_default() {
        assert!(lint_json("1.2345678901234567890123").is_empty());

        let options =
            LinterOptions::new().with_rules(RuleSet::default().with(RuleKind::LargeNumberPrecision));
        let diags = Linter::with_options(options).lint("1.2345678901234567890123", Grammar::Json);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule, RuleKind::LargeNumberPrecision);
    }

    #[test]
    fn test_large_structure_threshold() {
        let members: Vec<String> = (0..4).map(|i| format!("\"k{i}\": {i}")).collect();
        let source = format!("{{{}}}", members.join(", "));
        let options = LinterOptions::new()
            .with_rules(RuleSet::default().with(RuleKind::LargeStructure))
            .with_max_object_keys(3);
        let diags = Linter::with_options(options).lint(&source, Grammar::Json);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule, RuleKind::LargeStructure);
    }

    #[test]
    fn test_lint_tokens_matches_lint_for_clean_input() {
        let source = r#"{"a": [1, 2], "b": null}"#;
        let stream = TokenStream::tokenize(source, Grammar::Json);
        assert!(Linter::new().lint_tokens(stream, source).is_empty());
    }

    #[test]
    fn test_trailing_content_reported_once() {
        let diags = lint_json("1 2 3");
        assert_eq!(
            diags
                .iter()
                .filter(|d| d.rule == RuleKind::SyntaxError)
                .count(),
            1
        );
    }

    #[test_case(r#"{"a": 1, "b": 2}"# ; "object")]
    #[test_case("[true, false, null]" ; "array")]
    #[test_case(r#""plain""# ; "string")]
    fn test_clean_inputs(source: &str) {
        assert!(lint_json(source).is_empty());
    }

    #[test]
    fn test_zon_clean_struct() {
        assert!(lint_zon(r#".{ .name = "svc", .port = 8080, }"#).is_empty());
    }

    #[test]
    fn test_zon_duplicate_field() {
        let diags = lint_zon(".{ .a = 1, .a = 2 }");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule, RuleKind::NoDuplicateKeys);
        assert_eq!(diags[0].span, Span::new(11, 13));
    }

    #[test]
    fn test_diagnostics_in_source_order() {
        let diags = lint_json(r#"{"a": 01, "a": 02}"#);
        let spans: Vec<u32> = diags.iter().map(|d| d.span.start).collect();
        let mut sorted = spans.clone();
        sorted.sort_unstable();
        assert_eq!(spans, sorted);
        assert_eq!(diags.len(), 3);
    }

    #[test]
    fn test_significant_digits() {
        assert_eq!(significant_digits("0.0001200"), 2);
        assert_eq!(significant_digits("123456789012345678"), 18);
        assert_eq!(significant_digits("1e300"), 1);
        assert_eq!(significant_digits("0"), 0);
    }
}
