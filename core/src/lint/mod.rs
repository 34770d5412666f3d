//! Streaming lint checks over token streams.
//!
//! The linter consumes tokens, never a parsed tree, so it keeps producing
//! diagnostics for input the parser would reject. Checks are organized as
//! a closed rule catalog ([`rules::RuleKind`]) with per-rule metadata and a
//! fixed-size enablement set; a disabled rule's check is never evaluated.

mod diagnostic;
mod linter;
mod rules;

pub use diagnostic::{Diagnostic, Severity};
pub use linter::{Linter, LinterOptions};
pub use rules::{RULES, RuleInfo, RuleKind, RuleSet};
