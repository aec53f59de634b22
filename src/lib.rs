//! # autoscript
//!
//! autoscript is an embeddable interpreter for a small automation scripting
//! language written in Rust. Scripts consist of blocks, bounded repetition,
//! conditionals, and user-defined functions with lexical closures, and they
//! drive the host through native functions such as simulated clicks or timed
//! pauses.
//!
//! A run has two phases. The whole script is parsed first, resolving every
//! name and call signature against the host's native functions and the
//! script's own definitions; only then does it execute.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use tracing::debug;

use crate::{
    ast::Program,
    interpreter::{
        evaluator::{core::Evaluator, function::native::Natives},
        parser::core::Parser,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the statement and expression types that represent a
/// script as a tree. The AST is built by the parser and executed by the
/// evaluator.
///
/// # Responsibilities
/// - Defines expression, statement, block, and function definition types.
/// - Owns function bodies, which closures borrow while the program runs.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while parsing or running
/// a script. Parse errors carry the line and column of the offending token;
/// runtime errors carry only a message.
///
/// # Responsibilities
/// - Defines error enums for both failure phases.
/// - Provides the umbrella [`Error`](error::Error) a whole run returns.
pub mod error;
/// Orchestrates the entire process of script execution.
///
/// This module ties together lexing, parsing, values, and evaluation.
///
/// # Responsibilities
/// - Coordinates the lexer, parser, and evaluator.
/// - Defines the bridge through which hosts supply native functions.
pub mod interpreter;

pub use crate::{
    error::Error,
    interpreter::evaluator::core::{DEFAULT_MAX_CALL_DEPTH, Options},
};

/// Parses `source` against the signatures registered in `natives`.
///
/// # Errors
/// Returns the first [`ParseError`](error::ParseError) in the script.
///
/// # Examples
/// ```
/// use autoscript::{interpreter::evaluator::function::native::Natives, parse};
///
/// let mut natives = Natives::new();
/// natives.register("click", 2, |_, _| Ok(()));
///
/// assert!(parse("repeat (3) { click(10, 10) }", &natives).is_ok());
///
/// let err = parse("click(1)", &natives).unwrap_err();
/// assert_eq!((err.line(), err.column()), (1, 1));
/// ```
pub fn parse(source: &str, natives: &Natives) -> Result<Program, error::ParseError> {
    let root = natives.static_scope();
    Parser::new(source).parse_program(&root)
}

/// Parses and then executes `source`.
///
/// Native functions run as they are reached, so a runtime failure leaves the
/// effects of the calls made before it in place.
///
/// # Errors
/// Returns [`Error::Parse`] if the script is rejected, in which case nothing
/// ran, or [`Error::Runtime`] for the first failure during execution.
///
/// # Examples
/// ```
/// use std::{cell::Cell, rc::Rc};
///
/// use autoscript::{Options, interpreter::evaluator::function::native::Natives, run};
///
/// let clicks = Rc::new(Cell::new(0));
/// let counter = Rc::clone(&clicks);
///
/// let mut natives = Natives::new();
/// natives.register("click", 2, move |_, _| {
///            counter.set(counter.get() + 1);
///            Ok(())
///        });
///
/// run("repeat (3) { click(10, 10) }", &natives, Options::default()).unwrap();
/// assert_eq!(clicks.get(), 3);
///
/// // The condition is an integer, which is only detected at run time.
/// assert!(run("if (1) { }", &natives, Options::default()).unwrap_err().is_runtime());
/// ```
pub fn run(source: &str, natives: &Natives, options: Options) -> Result<(), Error> {
    debug!(bytes = source.len(), natives = natives.len(), "running script");

    let program = parse(source, natives)?;
    let mut evaluator = Evaluator::new(natives, options);
    evaluator.run(&program)?;

    Ok(())
}
