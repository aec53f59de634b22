#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during evaluation.
///
/// The first four variants are the failures a correctly parsed program can
/// run into. The rest report an internal inconsistency between the parser's
/// scopes and the evaluator's scopes.
pub enum RuntimeError {
    /// A native function received an argument of the wrong kind.
    #[error("argument type mismatch in function {function}")]
    ArgumentTypeMismatch {
        /// The name of the native function.
        function: String,
    },
    /// An `if` condition did not evaluate to a boolean.
    #[error("type mismatch for if condition, must be bool")]
    ConditionNotBool {
        /// Kind of the value the condition produced.
        found: &'static str,
    },
    /// A native function failed for a reason other than its arguments.
    #[error("function {function} failed: {message}")]
    NativeFailure {
        /// The name of the native function.
        function: String,
        /// What went wrong.
        message:  String,
    },
    /// Too many user-defined function invocations were active at once.
    #[error("call depth limit of {limit} exceeded")]
    CallDepthExceeded {
        /// The configured limit.
        limit: usize,
    },
    /// A user-defined function was invoked with the wrong argument count.
    #[error("number of arguments mismatch for function call to '{name}'")]
    ArgumentCountMismatch {
        /// The name of the function.
        name:     String,
        /// Number of declared parameters.
        expected: usize,
        /// Number of supplied arguments.
        found:    usize,
    },
    /// No callable with this name and arity is visible at run time.
    #[error("cannot find function '{name}' taking {arity} argument(s)")]
    UnresolvedFunction {
        /// The name of the function.
        name:  String,
        /// The number of supplied arguments.
        arity: usize,
    },
    /// No binding for this variable is visible at run time.
    #[error("cannot find variable '{name}'")]
    UnresolvedVariable {
        /// The name of the variable.
        name: String,
    },
    /// A closure was invoked after the scope it was defined in had ended.
    #[error("defining scope of function '{name}' is no longer live")]
    DeadDefiningScope {
        /// The name of the function.
        name: String,
    },
    /// A binding was made in a scope that had already been closed.
    #[error("scope for binding '{name}' is no longer live")]
    ScopeNotLive {
        /// The name being bound.
        name: String,
    },
}
