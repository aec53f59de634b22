/// Core evaluation logic.
///
/// Contains the [`core::Evaluator`], its settings, and statement and
/// expression execution.
pub mod core;

/// Runtime scope chain.
///
/// An arena of activation records holding variable bindings and installed
/// functions, each linked to its lexically enclosing record.
pub mod scope;

/// Function evaluation.
///
/// Handles calls into native and user-defined functions and defines the
/// bridge through which the host supplies native functions.
pub mod function;
