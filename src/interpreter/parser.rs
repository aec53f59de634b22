/// The parser state and the block-level rules.
///
/// Holds the [`core::Parser`] type, the program and compound-statement rules,
/// and the statement dispatcher that tries each alternative in turn.
pub mod core;

/// Parse-time scope table.
///
/// Tracks which function signatures and variable names are visible at each
/// block level, so unresolved names and mismatched call arities are rejected
/// while parsing rather than during execution.
pub mod scope;

/// Statement rules.
///
/// Implements `repeat`, `if`, `def`, and function-call statements, including
/// the declarations they introduce into the scope table.
pub mod statement;

/// Shared helpers for the parser.
///
/// Token expectation, expressions, and the comma-separated lists used by
/// argument and parameter lists.
pub mod utils;
