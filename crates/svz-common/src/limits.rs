//! Centralized limits and thresholds for the svz compiler.
//!
//! Centralizing these values prevents duplicate definitions with
//! inconsistent values and documents the rationale for each limit.

/// Maximum recursion depth for the parser.
///
/// Grammar nesting (parenthesized expressions, nested blocks, nested
/// generate constructs) drives real stack usage; beyond this depth the
/// parser reports a diagnostic and synthesizes a placeholder node instead
/// of risking a stack overflow on adversarial input.
pub const MAX_PARSER_RECURSION_DEPTH: u32 = 200;

/// Maximum pre-allocation for the node arena, to avoid capacity overflow
/// on huge files with pathological token counts.
pub const MAX_NODE_PREALLOC: usize = 5_000_000;
