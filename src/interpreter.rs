/// The evaluator module executes a parsed program.
///
/// The evaluator walks the AST, creating a runtime scope for every block and
/// function invocation, binding parameters, installing closures, and calling
/// into native functions supplied by the host.
///
/// # Responsibilities
/// - Executes statements in order and evaluates expressions.
/// - Keeps runtime scoping lexical, mirroring the parser's static scopes.
/// - Reports runtime errors such as non-boolean `if` conditions.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces tokens one at a time on
/// demand: keywords, identifiers, integer, duration and boolean literals, and
/// punctuation, each tagged with its line and column.
///
/// # Responsibilities
/// - Skips whitespace while tracking line and column.
/// - Classifies digit-led runs as integers or durations.
/// - Produces error tokens for malformed input.
pub mod lexer;
/// The parser module builds the AST from tokens.
///
/// The parser is a recursive-descent parser that resolves every variable
/// reference and every `(name, arity)` call signature against the enclosing
/// scopes while it parses, so a program that parses never calls a function
/// that is not defined.
///
/// # Responsibilities
/// - Converts tokens into statements and expressions.
/// - Validates grammar and name resolution, reporting errors with position.
pub mod parser;
/// The value module defines the runtime data types.
///
/// Values are integers, durations and booleans; nothing else exists at run
/// time.
pub mod value;
