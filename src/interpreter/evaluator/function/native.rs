use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::EvalResult,
            scope::{ScopeId, ScopeStack},
        },
        parser::scope::StaticScope,
        value::Value,
    },
};

/// The scope a native function was called from.
///
/// Gives read access to the variables visible at the call site.
pub struct CallerScope<'s> {
    scopes: &'s ScopeStack<'s>,
    scope:  ScopeId,
}

impl<'s> CallerScope<'s> {
    pub(in crate::interpreter::evaluator) const fn new(scopes: &'s ScopeStack<'s>,
                                                       scope: ScopeId)
                                                       -> Self {
        Self { scopes, scope }
    }

    /// Looks up a variable visible from the call site.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<Value> {
        self.scopes.variable(self.scope, name)
    }
}

/// Signature of a host-supplied function.
///
/// The callable receives the caller's scope and the evaluated arguments, whose
/// count always equals the registered arity. It validates argument kinds
/// itself.
pub type NativeFn = dyn Fn(&CallerScope<'_>, &[Value]) -> EvalResult<()>;

/// A host-supplied function with a fixed name and arity.
pub struct NativeFunction {
    name:     String,
    arity:    usize,
    callable: Box<NativeFn>,
}

impl NativeFunction {
    /// The name scripts call the function by.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The number of arguments the function takes.
    #[must_use]
    pub const fn arity(&self) -> usize {
        self.arity
    }

    /// Invokes the function.
    ///
    /// # Errors
    /// Whatever the host callable fails with.
    pub fn call(&self, caller: &CallerScope<'_>, args: &[Value]) -> EvalResult<()> {
        (self.callable)(caller, args)
    }
}

impl std::fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeFunction")
         .field("name", &self.name)
         .field("arity", &self.arity)
         .finish_non_exhaustive()
    }
}

/// The host's function table for one run.
///
/// Must be complete before parsing starts: the parser resolves calls against
/// the registered `(name, arity)` pairs, and the evaluator installs the same
/// functions in its outermost scope.
///
/// # Example
/// ```
/// use autoscript::interpreter::{evaluator::function::native::Natives, value::Value};
///
/// let mut natives = Natives::new();
/// natives.register("beep", 0, |_, _| Ok(()))
///        .register("wait", 1, |_, args| {
///            args[0].as_duration("wait")?;
///            Ok(())
///        });
///
/// assert_eq!(natives.len(), 2);
/// assert!(natives.get("wait").is_some_and(|f| f.arity() == 1));
/// ```
#[derive(Debug, Default)]
pub struct Natives {
    functions: Vec<NativeFunction>,
}

impl Natives {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callable` as `name` taking `arity` arguments.
    ///
    /// A function registered earlier under the same name is replaced.
    pub fn register<F>(&mut self, name: impl Into<String>, arity: usize, callable: F) -> &mut Self
        where F: Fn(&CallerScope<'_>, &[Value]) -> Result<(), RuntimeError> + 'static
    {
        let name = name.into();
        self.functions.retain(|f| f.name != name);
        self.functions.push(NativeFunction { name,
                                             arity,
                                             callable: Box::new(callable) });
        self
    }

    /// Looks a registered function up by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&NativeFunction> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Iterates over the registered functions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &NativeFunction> {
        self.functions.iter()
    }

    /// Number of registered functions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Whether no function is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Builds the outermost parse-time scope holding every registered
    /// signature.
    #[must_use]
    pub fn static_scope(&self) -> StaticScope<'static> {
        let mut scope = StaticScope::root();
        for function in &self.functions {
            scope.declare_function(&function.name, function.arity);
        }
        scope
    }
}
