//! Lint findings.

use crate::lint::rules::RuleKind;
use crate::span::Span;

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    /// Lowercase label for rendering.
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

/// One lint finding: which rule fired, how serious it is, a human-readable
/// message, and the offending source region.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostic {
    pub rule: RuleKind,
    pub severity: Severity,
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    /// Builds a finding at the rule's catalog severity.
    pub fn new(rule: RuleKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            rule,
            severity: rule.severity(),
            message: message.into(),
            span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_catalog_severity() {
        let diag = Diagnostic::new(RuleKind::NoLeadingZeros, "leading zero", Span::new(0, 2));
        assert_eq!(diag.severity, Severity::Warning);

        let diag = Diagnostic::new(RuleKind::NoDuplicateKeys, "dup", Span::new(0, 2));
        assert_eq!(diag.severity, Severity::Error);
    }
}
