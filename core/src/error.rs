//! Resource-limit errors.
//!
//! These are the "infrastructure failure" class: distinct from lexical
//! error tokens (non-fatal) and from structural parse errors (fatal to one
//! call). They are always propagated to the immediate caller, never
//! swallowed.

use thiserror::Error;

/// A configured resource budget was exceeded.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitError {
    /// Nesting exceeded the configured maximum depth.
    ///
    /// This limit exists to prevent stack overflow from deeply nested
    /// input like `[[[[[[...]]]]]]`.
    #[error("recursion limit exceeded: depth {depth} > limit {limit}")]
    RecursionLimitExceeded {
        /// Current nesting depth when the limit was exceeded.
        depth: usize,
        /// Maximum allowed nesting depth.
        limit: usize,
    },

    /// The tree grew past the configured node budget.
    ///
    /// This limit bounds arena growth for callers that parse untrusted
    /// input with a fixed memory budget.
    #[error("node limit exceeded: {nodes} nodes > limit {limit}")]
    NodeLimitExceeded {
        /// Number of nodes allocated when the limit was exceeded.
        nodes: usize,
        /// Maximum allowed node count.
        limit: usize,
    },
}
