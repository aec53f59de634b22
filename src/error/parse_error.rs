use crate::interpreter::lexer::Token;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during lexing or parsing.
///
/// The `Display` form is `line L, column C: message`.
pub enum ParseError {
    /// A specific token was required but something else was found.
    #[error("line {line}, column {column}: {expected} expected, found {found}")]
    Expected {
        /// What the grammar required at this point.
        expected: &'static str,
        /// Description of the token actually found.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
        /// The source column where the error occurred.
        column:   usize,
    },
    /// The lexer could not form a token from the input.
    #[error("line {line}, column {column}: invalid token '{text}'")]
    InvalidToken {
        /// The offending source text.
        text:   String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// Input remained after the last complete statement of the program.
    #[error("line {line}, column {column}: extra characters after program end")]
    TrailingInput {
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// Blocks were nested more deeply than the parser allows.
    #[error("line {line}, column {column}: blocks nested deeper than {limit} levels")]
    NestingTooDeep {
        /// The nesting limit.
        limit:  usize,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// A call names a function that is not declared in any enclosing scope.
    #[error("line {line}, column {column}: unknown function '{name}'")]
    UnknownFunction {
        /// The name of the function.
        name:   String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// A call names a declared function but with an argument count it was
    /// not declared with.
    #[error("line {line}, column {column}: wrong signature for function '{name}': no definition takes {arity} argument(s)")]
    WrongSignature {
        /// The name of the function.
        name:   String,
        /// The number of arguments supplied at the call site.
        arity:  usize,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// An expression names a variable that is not bound in any enclosing
    /// scope.
    #[error("line {line}, column {column}: unknown variable '{name}'")]
    UnknownVariable {
        /// The name of the variable.
        name:   String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// A `def` reuses a function name already defined in the same block.
    #[error("line {line}, column {column}: function '{name}' is already defined in this scope")]
    FunctionAlreadyDefined {
        /// The name of the function.
        name:   String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// A `def` lists the same parameter name twice.
    #[error("line {line}, column {column}: duplicate parameter '{name}'")]
    DuplicateParameter {
        /// The repeated parameter name.
        name:   String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
}

impl ParseError {
    /// Builds the error for a token that does not fit the grammar.
    ///
    /// Lexer error tokens are reported as [`ParseError::InvalidToken`] so the
    /// message names the bad input rather than the expectation.
    #[must_use]
    pub fn unexpected(expected: &'static str, token: &Token) -> Self {
        use crate::interpreter::lexer::TokenKind;

        match &token.kind {
            TokenKind::Error(text) => Self::InvalidToken { text:   text.clone(),
                                                           line:   token.line,
                                                           column: token.column, },
            kind => Self::Expected { expected,
                                     found: kind.to_string(),
                                     line: token.line,
                                     column: token.column },
        }
    }

    /// The source line where the error occurred.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Expected { line, .. }
            | Self::InvalidToken { line, .. }
            | Self::TrailingInput { line, .. }
            | Self::NestingTooDeep { line, .. }
            | Self::UnknownFunction { line, .. }
            | Self::WrongSignature { line, .. }
            | Self::UnknownVariable { line, .. }
            | Self::FunctionAlreadyDefined { line, .. }
            | Self::DuplicateParameter { line, .. } => *line,
        }
    }

    /// The source column where the error occurred.
    #[must_use]
    pub const fn column(&self) -> usize {
        match self {
            Self::Expected { column, .. }
            | Self::InvalidToken { column, .. }
            | Self::TrailingInput { column, .. }
            | Self::NestingTooDeep { column, .. }
            | Self::UnknownFunction { column, .. }
            | Self::WrongSignature { column, .. }
            | Self::UnknownVariable { column, .. }
            | Self::FunctionAlreadyDefined { column, .. }
            | Self::DuplicateParameter { column, .. } => *column,
        }
    }
}
