/// Parsing errors.
///
/// Defines every failure the parser can report: grammar violations, invalid
/// tokens, and names or call signatures that do not resolve against the
/// enclosing scopes. Each carries the line and column of the offending token.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all errors that can be raised while a parsed program executes,
/// such as argument type mismatches in native functions or non-boolean `if`
/// conditions. Runtime errors carry no source position.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// The single failure a run can end with.
///
/// Parse failures and runtime failures are disjoint: a program that fails to
/// parse never executes, and a runtime failure is only possible after the whole
/// program parsed.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// The source text was rejected before execution.
    #[error("parse error at {0}")]
    Parse(#[from] ParseError),
    /// Execution was aborted.
    #[error("runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// Whether the run failed during parsing.
    #[must_use]
    pub const fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }

    /// Whether the run failed during execution.
    #[must_use]
    pub const fn is_runtime(&self) -> bool {
        matches!(self, Self::Runtime(_))
    }
}
