//! Parser configuration for resource limits and behavior tuning.
//!
//! # Recursion Limits
//!
//! Following the pattern established by `serde_json`, the parser enforces a
//! maximum nesting depth so malformed or hostile input cannot overflow the
//! stack. The default of 128 balances safety with practical nesting.

use crate::error::LimitError;

/// Configuration for a single parse call.
///
/// # Default Values
///
/// | Setting | Default |
/// |---------|---------|
/// | `max_depth` | 128 |
/// | `max_nodes` | `usize::MAX` |
/// | `decode_strings` | `true` |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum allowed nesting depth.
    ///
    /// Each object or array level increments a depth counter; exceeding
    /// this fails the parse with a recursion-limit error.
    pub max_depth: usize,

    /// Maximum number of AST nodes to allocate.
    ///
    /// Exceeding this fails the parse with a node-limit error. Bounds
    /// arena growth when parsing untrusted input.
    pub max_nodes: usize,

    /// When `true`, string escape sequences are decoded into owned,
    /// arena-resident text. When `false`, the raw source text of each
    /// literal is stored verbatim (cheaper, still arena-owned).
    pub decode_strings: bool,
}

impl Default for ParseOptions {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl ParseOptions {
    /// Default configuration, usable in const contexts.
    pub const DEFAULT: Self = Self {
        max_depth: 128,
        max_nodes: usize::MAX,
        decode_strings: true,
    };

    /// Creates a new configuration with default values.
    #[inline]
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Sets the maximum nesting depth. Use `usize::MAX` to disable.
    #[inline]
    pub const fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Sets the AST node budget. Use `usize::MAX` to disable.
    #[inline]
    pub const fn with_max_nodes(mut self, nodes: usize) -> Self {
        self.max_nodes = nodes;
        self
    }

    /// Controls whether string escapes are decoded during parsing.
    #[inline]
    pub const fn with_decode_strings(mut self, decode: bool) -> Self {
        self.decode_strings = decode;
        self
    }
}

/// Tracks nesting depth during parsing or linting.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecursionGuard {
    depth: usize,
}

impl RecursionGuard {
    /// Creates a new guard with depth 0.
    #[inline]
    pub const fn new() -> Self {
        Self { depth: 0 }
    }

    /// Current nesting depth.
    #[inline]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Enter a nested context, incrementing depth.
    ///
    /// Returns `Err(LimitError::RecursionLimitExceeded)` when the new
    /// depth would exceed `limit`.
    #[inline]
    pub fn enter(&mut self, limit: usize) -> Result<(), LimitError> {
        self.depth = self.depth.saturating_add(1);
        if self.depth > limit {
            Err(LimitError::RecursionLimitExceeded {
                depth: self.depth,
                limit,
            })
        } else {
            Ok(())
        }
    }

    /// Exit a nested context, decrementing depth.
    ///
    /// Uses saturating subtraction so extra `exit()` calls don't underflow.
    #[inline]
    pub fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Reset depth to zero.
    #[inline]
    pub fn reset(&mut self) {
        self.depth = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options_defaults() {
        let opts = ParseOptions::default();
        assert_eq!(opts.max_depth, 128);
        assert_eq!(opts.max_nodes, usize::MAX);
        assert!(opts.decode_strings);
    }

    #[test]
    fn test_parse_options_builder() {
        let opts = ParseOptions::new()
            .with_max_depth(16)
            .with_max_nodes(10_000)
            .with_decode_strings(false);

        assert_eq!(opts.max_depth, 16);
        assert_eq!(opts.max_nodes, 10_000);
        assert!(!opts.decode_strings);
    }

    #[test]
    fn test_recursion_guard_basic() {
        let mut guard = RecursionGuard::new();
        guard.enter(128).unwrap();
        guard.enter(128).unwrap();
        assert_eq!(guard.depth(), 2);

        guard.exit();
        assert_eq!(guard.depth(), 1);
    }

    #[test]
    fn test_recursion_guard_limit_exceeded() {
        let mut guard = RecursionGuard::new();
        for _ in 0..3 {
            guard.enter(3).unwrap();
        }
        assert!(matches!(
            guard.enter(3),
            Err(LimitError::RecursionLimitExceeded { depth: 4, limit: 3 })
        ));
    }

    #[test]
    fn test_recursion_guard_exit_saturates() {
        let mut guard = RecursionGuard::new();
        guard.exit();
        assert_eq!(guard.depth(), 0);
    }
}
