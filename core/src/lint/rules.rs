//! The rule catalog.
//!
//! Every check the linter can perform is one variant of [`RuleKind`]. The
//! catalog is closed: adding a rule means adding a variant, a row in
//! [`RULES`], and the check itself. Enablement is a [`RuleSet`] bitset so
//! option structs stay `Copy` and rule membership tests are one mask.

use crate::lint::diagnostic::Severity;

/// Identifies one lint rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RuleKind {
    /// An object contains the same key more than once.
    NoDuplicateKeys = 0,
    /// A number literal is written with a leading zero.
    NoLeadingZeros = 1,
    /// A string's `\u` escapes form ill-formed UTF-16 (unpaired surrogate).
    InvalidStringEncoding = 2,
    /// Nesting exceeded the configured hard maximum.
    MaxDepthExceeded = 3,
    /// A number carries more precision than a 64-bit float preserves.
    LargeNumberPrecision = 4,
    /// An object or array exceeds the configured size thresholds.
    LargeStructure = 5,
    /// Nesting crossed the advisory depth threshold.
    DeepNesting = 6,
    /// A malformed number literal.
    InvalidNumber = 7,
    /// A string contains an unknown or malformed escape sequence.
    InvalidEscape = 8,
    /// Structurally invalid input (stray tokens, missing separators).
    SyntaxError = 9,
}

/// Number of rules in the catalog.
pub const RULE_COUNT: usize = 10;

impl RuleKind {
    /// Every rule, in catalog order.
    pub const ALL: [RuleKind; RULE_COUNT] = [
        RuleKind::NoDuplicateKeys,
        RuleKind::NoLeadingZeros,
        RuleKind::InvalidStringEncoding,
        RuleKind::MaxDepthExceeded,
        RuleKind::LargeNumberPrecision,
        RuleKind::LargeStructure,
        RuleKind::DeepNesting,
        RuleKind::InvalidNumber,
        RuleKind::InvalidEscape,
        RuleKind::SyntaxError,
    ];

    /// This rule's catalog metadata.
    #[inline]
    pub const fn info(self) -> &'static RuleInfo {
        &RULES[self as usize]
    }

    /// Stable rule name, e.g. `no-duplicate-keys`.
    #[inline]
    pub const fn name(self) -> &'static str {
        self.info().name
    }

    /// The severity this rule reports at.
    #[inline]
    pub const fn severity(self) -> Severity {
        self.info().severity
    }
}

/// Static metadata for one rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub severity: Severity,
    /// Whether the rule is part of [`RuleSet::DEFAULT`].
    pub enabled: bool,
}

/// Catalog metadata, indexable by `RuleKind as usize`.
pub const RULES: [RuleInfo; RULE_COUNT] = [
    RuleInfo {
        name: "no-duplicate-keys",
        description: "objects must not repeat a key",
        severity: Severity::Error,
        enabled: true,
    },
    RuleInfo {
        name: "no-leading-zeros",
        description: "numbers must not start with a redundant zero",
        severity: Severity::Warning,
        enabled: true,
    },
    RuleInfo {
        name: "invalid-string-encoding",
        description: "unicode escapes must form well-paired surrogates",
        severity: Severity::Error,
        enabled: true,
    },
    RuleInfo {
        name: "max-depth-exceeded",
        description: "nesting must stay under the configured hard limit",
        severity: Severity::Error,
        enabled: true,
    },
    RuleInfo {
        name: "large-number-precision",
        description: "numbers should fit a 64-bit float without precision loss",
        severity: Severity::Warning,
        enabled: false,
    },
    RuleInfo {
        name: "large-structure",
        description: "objects and arrays should stay under the size thresholds",
        severity: Severity::Warning,
        enabled: false,
    },
    RuleInfo {
        name: "deep-nesting",
        description: "nesting should stay under the advisory threshold",
        severity: Severity::Warning,
        enabled: true,
    },
    RuleInfo {
        name: "invalid-number",
        description: "number literals must be well-formed",
        severity: Severity::Error,
        enabled: true,
    },
    RuleInfo {
        name: "invalid-escape",
        description: "string escapes must come from the allowed set",
        severity: Severity::Error,
        enabled: true,
    },
    RuleInfo {
        name: "syntax-error",
        description: "input must be structurally valid",
        severity: Severity::Error,
        enabled: true,
    },
];

/// A fixed-size set of enabled rules.
///
/// One bit per catalog entry; `Copy`, comparable, and usable in const
/// contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSet(u16);

impl RuleSet {
    /// No rules enabled.
    pub const EMPTY: Self = Self(0);

    /// Every rule enabled.
    pub const ALL: Self = Self((1 << RULE_COUNT) - 1);

    /// The catalog's default enablement.
    pub const DEFAULT: Self = Self::defaults();

    const fn defaults() -> Self {
        let mut bits = 0u16;
        let mut i = 0;
        while i < RULE_COUNT {
            if RULES[i].enabled {
                bits |= 1 << i;
            }
            i += 1;
        }
        Self(bits)
    }

    /// Whether `rule` is enabled in this set.
    #[inline]
    pub const fn contains(self, rule: RuleKind) -> bool {
        self.0 & (1 << rule as usize) != 0
    }

    /// Returns the set with `rule` enabled.
    #[inline]
    pub const fn with(self, rule: RuleKind) -> Self {
        Self(self.0 | (1 << rule as usize))
    }

    /// Returns the set with `rule` disabled.
    #[inline]
    pub const fn without(self, rule: RuleKind) -> Self {
        Self(self.0 & !(1 << rule as usize))
    }

    /// Number of enabled rules.
    #[inline]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl Default for RuleSet {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_set_matches_catalog() {
        let set = RuleSet::default();
        for rule in RuleKind::ALL {
            assert_eq!(
                set.contains(rule),
                rule.info().enabled,
                "mismatch for {}",
                rule.name()
            );
        }
    }

    #[test]
    fn test_set_operations() {
        let set = RuleSet::EMPTY.with(RuleKind::NoDuplicateKeys);
        assert!(set.contains(RuleKind::NoDuplicateKeys));
        assert!(!set.contains(RuleKind::SyntaxError));
        assert_eq!(set.len(), 1);

        let cleared = set.without(RuleKind::NoDuplicateKeys);
        assert!(cleared.is_empty());
    }

    #[test]
    fn test_all_contains_every_rule() {
        for rule in RuleKind::ALL {
            assert!(RuleSet::ALL.contains(rule));
        }
        assert_eq!(RuleSet::ALL.len(), RULE_COUNT);
    }

    #[test]
    fn test_off_by_default_rules() {
        let set = RuleSet::default();
        assert!(!set.contains(RuleKind::LargeNumberPrecision));
        assert!(!set.contains(RuleKind::LargeStructure));
    }
}
