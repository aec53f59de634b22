use std::time::Duration;

/// An expression: a literal or a reference to a variable.
///
/// Expressions never have side effects and never fail to evaluate in a program
/// that passed static resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// An integer literal such as `42`.
    Integer(i64),
    /// A duration literal such as `100s`.
    Duration(Duration),
    /// `true` or `false`.
    Bool(bool),
    /// Reference to a variable bound by an enclosing function parameter.
    Variable(String),
}

/// A brace-delimited sequence of statements.
///
/// Every block gets its own scope at parse time and at run time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    /// Statements in source order.
    pub statements: Vec<Statement>,
}

/// A `def` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDef {
    /// Name of the function.
    pub name:   String,
    /// Parameter names, in order. Their count is the function's arity.
    pub params: Vec<String>,
    /// The function body.
    pub body:   Block,
}

impl FunctionDef {
    /// Number of parameters.
    #[must_use]
    pub const fn arity(&self) -> usize {
        self.params.len()
    }
}

/// A statement node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `name(arg, ...)`, calling a native or user-defined function.
    FunctionCall {
        /// Name of the called function.
        name:      String,
        /// Argument expressions, evaluated left to right in the caller's scope.
        arguments: Vec<Expr>,
    },
    /// `{ ... }`
    Block(Block),
    /// `repeat (n) { ... }`
    Repeat {
        /// Fixed iteration count taken from an integer literal.
        count: u64,
        /// Loop body, re-entered with a fresh scope on every iteration.
        body:  Block,
    },
    /// `if (cond) { ... }`
    If {
        /// Condition; must evaluate to a boolean at run time.
        condition: Expr,
        /// Body executed when the condition is `true`.
        body:      Block,
    },
    /// `def name(params) { ... }`
    FunctionDef(FunctionDef),
}

/// A whole parsed script: the top-level block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    /// The top-level statements.
    pub body: Block,
}
