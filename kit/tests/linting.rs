//! Linter Scenario Tests
//!
//! End-to-end rule behavior: defaults, gating, classification of lexical
//! errors, nesting thresholds, and resynchronization on structural
//! problems.

use jsonkit::{Diagnostic, Grammar, Linter, LinterOptions, RuleKind, RuleSet, Severity, Span};
use test_case::test_case;

fn lint_json(source: &str) -> Vec<Diagnostic> {
    Linter::new().lint(source, Grammar::Json)
}

#[test_case(r#"{"a": 1, "b": 2}"# ; "object")]
#[test_case("[1, 2, 3]" ; "array")]
#[test_case(r#"{"nested": {"deep": [null, true]}}"# ; "nested")]
fn test_clean_inputs_produce_nothing(source: &str) {
    assert!(lint_json(source).is_empty());
}

#[test]
fn test_duplicate_keys_flagged_at_second_occurrence() {
    let source = r#"{"a": 1, "a": 2}"#;
    let diags = lint_json(source);
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].rule, RuleKind::NoDuplicateKeys);
    assert_eq!(diags[0].severity, Severity::Error);
    assert_eq!(diags[0].span.text(source), Some("\"a\""));
    assert_eq!(diags[0].span, Span::new(9, 12));
}

#[test]
fn test_disabling_a_rule_leaves_no_trace() {
    let options =
        LinterOptions::new().with_rules(RuleSet::default().without(RuleKind::NoDuplicateKeys));
    let diags = Linter::with_options(options).lint(r#"{"a": 1, "a": 2}"#, Grammar::Json);
    assert!(diags.is_empty());
}

#[test]
fn test_leading_zero_warns() {
    let diags = lint_json("01");
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].rule, RuleKind::NoLeadingZeros);
    assert_eq!(diags[0].severity, Severity::Warning);
}

#[test_case(r#""\q""#, RuleKind::InvalidEscape ; "unknown escape")]
#[test_case(r#""\uD800""#, RuleKind::InvalidStringEncoding ; "lone surrogate")]
#[test_case("[1e+]", RuleKind::InvalidNumber ; "digitless exponent")]
#[test_case("@", RuleKind::SyntaxError ; "stray byte")]
fn test_error_token_classification(source: &str, expected: RuleKind) {
    let diags = lint_json(source);
    assert_eq!(diags.len(), 1, "diagnostics: {diags:?}");
    assert_eq!(diags[0].rule, expected);
}

#[test]
fn test_structural_problems_resynchronize() {
    // Missing colon: one finding, the rest of the document still checked.
    let diags = lint_json(r#"{"a" 1, "b": 2, "b": 3}"#);
    assert_eq!(diags.len(), 2);
    assert_eq!(diags[0].rule, RuleKind::SyntaxError);
    assert_eq!(diags[1].rule, RuleKind::NoDuplicateKeys);
}

#[test]
fn test_separator_problems_are_reported() {
    let missing = lint_json(r#"{"a": 1 "b": 2}"#);
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].rule, RuleKind::SyntaxError);

    let doubled = lint_json("[1,,2]");
    assert_eq!(doubled.len(), 1);
    assert_eq!(doubled[0].rule, RuleKind::SyntaxError);
}

#[test]
fn test_deep_nesting_is_advisory() {
    let source = "[".repeat(25) + "1" + &"]".repeat(25);
    let diags = lint_json(&source);
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].rule, RuleKind::DeepNesting);
    assert_eq!(diags[0].severity, Severity::Warning);
}

#[test]
fn test_max_depth_is_a_hard_stop() {
    let source = "[".repeat(200);
    let diags = lint_json(&source);
    assert!(diags.iter().any(|d| d.rule == RuleKind::MaxDepthExceeded));
}

#[test]
fn test_thresholds_are_configurable() {
    let source = "[[[1]]]";
    let options = LinterOptions::new().with_deep_nesting_threshold(2);
    let diags = Linter::with_options(options).lint(source, Grammar::Json);
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].rule, RuleKind::DeepNesting);
}

#[test]
fn test_zon_duplicate_fields() {
    let diags = Linter::new().lint(".{ .a = 1, .a = 2 }", Grammar::Zon);
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].rule, RuleKind::NoDuplicateKeys);
}

#[test]
fn test_zon_syntax_errors_match_parser_contract() {
    let double = Linter::new().lint(r#".{ .field = = "value" }"#, Grammar::Zon);
    assert_eq!(double.len(), 1);
    assert_eq!(double[0].rule, RuleKind::SyntaxError);

    let missing = Linter::new().lint(".{ .name = }", Grammar::Zon);
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].rule, RuleKind::SyntaxError);
}

#[test]
fn test_diagnostics_come_back_in_source_order() {
    let diags = lint_json(r#"[01, "\q", 02]"#);
    assert_eq!(diags.len(), 3);
    let starts: Vec<u32> = diags.iter().map(|d| d.span.start).collect();
    let mut sorted = starts.clone();
    sorted.sort_unstable();
    assert_eq!(starts, sorted);
}

#[test]
fn test_rule_metadata_is_exposed() {
    assert_eq!(RuleKind::NoDuplicateKeys.name(), "no-duplicate-keys");
    assert_eq!(RuleKind::NoLeadingZeros.severity(), Severity::Warning);
    assert!(!RuleKind::LargeStructure.info().enabled);
}
