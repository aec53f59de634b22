use tracing::trace;

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Evaluator},
            function::native::CallerScope,
            scope::{Callable, Closure, ScopeId},
        },
        value::Value,
    },
};

impl<'a> Evaluator<'a> {
    /// Evaluates a function call statement.
    ///
    /// Arguments are evaluated left to right in the caller's `scope`. The
    /// callable is then looked up by name and argument count, walking outward
    /// from `scope`.
    ///
    /// # Errors
    /// - [`RuntimeError::UnresolvedFunction`] if nothing matches, which static
    ///   resolution rules out for parsed programs.
    /// - Whatever the invoked function fails with.
    pub(in crate::interpreter::evaluator) fn eval_function_call(&mut self,
                                                                name: &str,
                                                                arguments: &[Expr],
                                                                scope: ScopeId)
                                                                -> EvalResult<()> {
        let args = arguments.iter()
                            .map(|argument| self.eval(argument, scope))
                            .collect::<EvalResult<Vec<_>>>()?;

        let callable = self.scopes.function(scope, name, args.len()).ok_or_else(|| {
                                                                        RuntimeError::UnresolvedFunction { name:  name.to_string(),
                                                                                                           arity: args.len(), }
                                                                    })?;

        match callable {
            Callable::Native(native) => {
                trace!(function = name, "calling native function");
                native.call(&CallerScope::new(&self.scopes, scope), &args)
            },
            Callable::Closure(closure) => self.call_closure(closure, args),
        }
    }

    /// Invokes a user-defined function.
    ///
    /// A fresh scope is chained to the closure's defining scope, never to the
    /// caller's, and each parameter is bound there to its argument. The body
    /// block then runs beneath it. Functions the defining scope gained after
    /// the closure was installed stay out of reach.
    ///
    /// # Errors
    /// - [`RuntimeError::CallDepthExceeded`] if the invocation would nest more
    ///   deeply than [`Options::max_call_depth`](crate::Options).
    /// - [`RuntimeError::DeadDefiningScope`] if the defining scope has already
    ///   ended.
    /// - [`RuntimeError::ArgumentCountMismatch`] if `args` does not match the
    ///   parameter list.
    fn call_closure(&mut self, closure: Closure<'a>, args: Vec<Value>) -> EvalResult<()> {
        let def = closure.def;

        if self.call_depth >= self.options.max_call_depth {
            return Err(RuntimeError::CallDepthExceeded { limit: self.options.max_call_depth });
        }
        if !self.scopes.is_live(closure.scope) {
            return Err(RuntimeError::DeadDefiningScope { name: def.name.clone() });
        }
        if args.len() != def.arity() {
            return Err(RuntimeError::ArgumentCountMismatch { name:     def.name.clone(),
                                                             expected: def.arity(),
                                                             found:    args.len(), });
        }

        trace!(function = %def.name, depth = self.call_depth + 1, "calling closure");

        self.call_depth += 1;
        let scope = self.scopes.push_call(&closure);
        let result = def.params
                        .iter()
                        .zip(args)
                        .try_for_each(|(param, value)| self.scopes.define_variable(scope, param, value))
                        .and_then(|()| self.exec_block(&def.body, scope));
        self.scopes.pop(scope);
        self.call_depth -= 1;

        result
    }
}
