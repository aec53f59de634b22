use tracing::{debug, trace};

use crate::{
    ast::{Block, Expr, Program, Statement},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            function::native::Natives,
            scope::{ScopeId, ScopeStack},
        },
        value::Value,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Default limit on nested user-defined function invocations.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 256;

/// Evaluator settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// How many user-defined function invocations may be active at once
    /// before the run fails with [`RuntimeError::CallDepthExceeded`].
    pub max_call_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self { max_call_depth: DEFAULT_MAX_CALL_DEPTH }
    }
}

/// Executes a parsed program.
///
/// The evaluator owns the runtime scope chain. Each run opens an outermost
/// scope holding the host's native functions; the program body and every
/// nested block run in scopes created beneath it. Both the AST and the natives are borrowed for
/// `'a`, which lets closures refer to their definitions without copying them.
///
/// # Example
/// ```
/// use autoscript::{
///     interpreter::evaluator::{
///         core::{Evaluator, Options},
///         function::native::Natives,
///     },
///     parse,
/// };
///
/// let natives = Natives::new();
/// let program = parse("def f(x) { if (x) { f(false) } } f(true)", &natives).unwrap();
///
/// let mut evaluator = Evaluator::new(&natives, Options::default());
/// assert!(evaluator.run(&program).is_ok());
/// ```
pub struct Evaluator<'a> {
    pub(in crate::interpreter::evaluator) natives:    &'a Natives,
    pub(in crate::interpreter::evaluator) scopes:     ScopeStack<'a>,
    pub(in crate::interpreter::evaluator) call_depth: usize,
    pub(in crate::interpreter::evaluator) options:    Options,
}

impl<'a> Evaluator<'a> {
    /// Creates an evaluator that makes every function in `natives` visible
    /// to the programs it runs.
    #[must_use]
    pub fn new(natives: &'a Natives, options: Options) -> Self {
        Self { natives,
               scopes: ScopeStack::new(),
               call_depth: 0,
               options }
    }

    /// Runs the whole program.
    ///
    /// # Errors
    /// The first [`RuntimeError`] raised; execution stops there.
    pub fn run(&mut self, program: &'a Program) -> EvalResult<()> {
        debug!(statements = program.body.statements.len(), "executing program");

        let natives = self.natives;
        let root = self.scopes.push(None);
        let result = natives.iter()
                         .try_for_each(|native| self.scopes.install_native(root, native))
                         .and_then(|()| self.exec_block(&program.body, root));
        self.scopes.pop(root);

        debug!(ok = result.is_ok(), "program finished");
        result
    }

    /// Executes a single statement in `scope`.
    ///
    /// - A block runs in a new child scope.
    /// - `repeat` runs its body block the parsed number of times.
    /// - `if` evaluates its condition in `scope` and requires a boolean.
    /// - `def` installs a closure capturing `scope`.
    /// - A call is dispatched by name and arity.
    pub fn exec_statement(&mut self, statement: &'a Statement, scope: ScopeId) -> EvalResult<()> {
        match statement {
            Statement::FunctionCall { name, arguments } => {
                self.eval_function_call(name, arguments, scope)
            },
            Statement::Block(block) => self.exec_block(block, scope),
            Statement::Repeat { count, body } => {
                for _ in 0..*count {
                    self.exec_block(body, scope)?;
                }
                Ok(())
            },
            Statement::If { condition, body } => match self.eval(condition, scope)? {
                Value::Bool(true) => self.exec_block(body, scope),
                Value::Bool(false) => Ok(()),
                other => Err(RuntimeError::ConditionNotBool { found: other.kind_name() }),
            },
            Statement::FunctionDef(def) => {
                let closure = self.scopes.install_closure(scope, def)?;
                trace!(function = %def.name,
                       arity = def.arity(),
                       mark = closure.mark,
                       "installed closure");
                Ok(())
            },
        }
    }

    /// Executes a block in a new scope chained to `parent`.
    ///
    /// The scope, and every binding made in it, is discarded when the block
    /// ends, whether it completed or failed.
    pub fn exec_block(&mut self, block: &'a Block, parent: ScopeId) -> EvalResult<()> {
        self.in_scope(parent, |evaluator, scope| {
                trace!(statements = block.statements.len(), "entering block");
                for statement in &block.statements {
                    evaluator.exec_statement(statement, scope)?;
                }
                Ok(())
            })
    }

    /// Evaluates an expression in `scope`.
    ///
    /// Literals evaluate to themselves. A variable is looked up walking
    /// outward from `scope`.
    ///
    /// # Errors
    /// [`RuntimeError::UnresolvedVariable`] if the variable is not bound,
    /// which static resolution rules out for parsed programs.
    pub fn eval(&self, expr: &Expr, scope: ScopeId) -> EvalResult<Value> {
        match expr {
            Expr::Integer(n) => Ok(Value::Integer(*n)),
            Expr::Duration(d) => Ok(Value::Duration(*d)),
            Expr::Bool(b) => Ok(Value::Bool(*b)),
            Expr::Variable(name) => {
                self.scopes
                    .variable(scope, name)
                    .ok_or_else(|| RuntimeError::UnresolvedVariable { name: name.clone() })
            },
        }
    }

    /// Opens a scope chained to `parent`, runs `body` in it, and closes it
    /// again regardless of the outcome.
    pub(in crate::interpreter::evaluator) fn in_scope<T>(&mut self,
                                                        parent: ScopeId,
                                                        body: impl FnOnce(&mut Self, ScopeId)
                                                                          -> EvalResult<T>)
                                                        -> EvalResult<T> {
        let scope = self.scopes.push(Some(parent));
        let result = body(self, scope);
        self.scopes.pop(scope);
        result
    }
}
