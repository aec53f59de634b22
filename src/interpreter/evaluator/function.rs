/// Sample automation functions.
///
/// `click`, `pause` and `dump`, as used by the command-line driver. Hosts
/// embedding the interpreter usually register their own instead.
pub mod builtin;

/// The native function bridge.
///
/// Defines how the host registers functions with a fixed name and arity, and
/// what a native function can see of its caller.
pub mod native;

/// Function call dispatch.
///
/// Resolves a call by name and arity, evaluates arguments, and invokes either
/// a native function or a closure in a scope chained to its defining scope.
pub mod core;
