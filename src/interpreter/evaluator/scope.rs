use std::collections::HashMap;

use crate::{
    ast::FunctionDef,
    error::RuntimeError,
    interpreter::{
        evaluator::{core::EvalResult, function::native::NativeFunction},
        value::Value,
    },
};

/// Handle to a runtime scope living in a [`ScopeStack`].
///
/// The handle pairs the slot index with the serial number the scope was
/// created with, so a handle kept past the end of its scope is detected
/// instead of silently resolving to whatever scope reuses the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeId {
    index:  usize,
    serial: u64,
}

/// A user-defined function together with the scope it was defined in.
#[derive(Debug, Clone, Copy)]
pub struct Closure<'a> {
    /// The definition, borrowed from the program's AST.
    pub def:   &'a FunctionDef,
    /// The scope that was executing when the definition ran.
    pub scope: ScopeId,
    /// Install number of the closure itself. Functions installed in `scope`
    /// or its ancestors after this point are invisible to the body.
    pub mark:  u64,
}

/// Anything a function call can resolve to.
#[derive(Clone, Copy)]
pub enum Callable<'a> {
    /// A host-supplied function.
    Native(&'a NativeFunction),
    /// A user-defined function.
    Closure(Closure<'a>),
}

impl Callable<'_> {
    /// Number of arguments the callable takes.
    #[must_use]
    pub fn arity(&self) -> usize {
        match self {
            Self::Native(native) => native.arity(),
            Self::Closure(closure) => closure.def.arity(),
        }
    }
}

/// One activation record.
struct Frame<'a> {
    parent:    Option<ScopeId>,
    serial:    u64,
    /// Set on the parameter scope of a closure invocation: the closure's
    /// [`Closure::mark`].
    horizon:   Option<u64>,
    variables: HashMap<&'a str, Value>,
    functions: HashMap<&'a str, Installed<'a>>,
}

/// A callable together with the order in which it was installed.
#[derive(Clone, Copy)]
struct Installed<'a> {
    callable: Callable<'a>,
    number:   u64,
}

/// Arena of runtime scopes.
///
/// Scopes are created and destroyed in strict stack order as blocks and calls
/// begin and end, but each scope links to its *lexically* enclosing scope,
/// which for a function body is the closure's defining scope rather than the
/// caller's. Name lookup follows those links outward.
///
/// Every installed function is numbered in installation order. Once a lookup
/// leaves a closure invocation for the closure's defining scope, functions
/// numbered after the closure are skipped, so a body never reaches a
/// definition that follows its own.
///
/// # Example
/// ```
/// use autoscript::interpreter::{evaluator::scope::ScopeStack, value::Value};
///
/// let mut scopes = ScopeStack::new();
/// let outer = scopes.push(None);
/// scopes.define_variable(outer, "x", Value::Integer(1)).unwrap();
///
/// let inner = scopes.push(Some(outer));
/// assert_eq!(scopes.variable(inner, "x"), Some(Value::Integer(1)));
///
/// scopes.pop(inner);
/// assert!(!scopes.is_live(inner));
/// assert!(scopes.is_live(outer));
/// assert!(scopes.define_variable(inner, "y", Value::Bool(true)).is_err());
/// ```
#[derive(Default)]
pub struct ScopeStack<'a> {
    frames:       Vec<Frame<'a>>,
    next_serial:  u64,
    next_install: u64,
}

impl<'a> ScopeStack<'a> {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new, empty scope chained to `parent`.
    pub fn push(&mut self, parent: Option<ScopeId>) -> ScopeId {
        self.push_frame(parent, None)
    }

    /// Opens the parameter scope for an invocation of `closure`, chained to
    /// its defining scope.
    pub fn push_call(&mut self, closure: &Closure<'a>) -> ScopeId {
        self.push_frame(Some(closure.scope), Some(closure.mark))
    }

    fn push_frame(&mut self, parent: Option<ScopeId>, horizon: Option<u64>) -> ScopeId {
        let id = ScopeId { index:  self.frames.len(),
                           serial: self.next_serial, };
        self.next_serial += 1;
        self.frames.push(Frame { parent,
                                 serial: id.serial,
                                 horizon,
                                 variables: HashMap::new(),
                                 functions: HashMap::new() });
        id
    }

    /// Closes the innermost scope, which must be `id`.
    pub fn pop(&mut self, id: ScopeId) {
        debug_assert!(self.frames.last().is_some_and(|frame| frame.serial == id.serial),
                      "scopes must be closed in reverse order of creation");
        if self.frames.last().is_some_and(|frame| frame.serial == id.serial) {
            self.frames.pop();
        }
    }

    /// Whether the scope behind `id` has not been closed yet.
    #[must_use]
    pub fn is_live(&self, id: ScopeId) -> bool {
        self.frame(id).is_some()
    }

    /// Number of open scopes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether no scope is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Binds a variable in scope `id`.
    ///
    /// # Errors
    /// [`RuntimeError::ScopeNotLive`] if `id` has been closed.
    pub fn define_variable(&mut self, id: ScopeId, name: &'a str, value: Value) -> EvalResult<()> {
        let frame = self.live_frame_mut(id, name)?;
        frame.variables.insert(name, value);
        Ok(())
    }

    /// Installs a host function in scope `id`.
    ///
    /// # Errors
    /// [`RuntimeError::ScopeNotLive`] if `id` has been closed.
    pub fn install_native(&mut self, id: ScopeId, native: &'a NativeFunction) -> EvalResult<()> {
        self.install(id, native.name(), Callable::Native(native))
    }

    /// Installs `def` as a closure over scope `id` and returns it.
    ///
    /// # Errors
    /// [`RuntimeError::ScopeNotLive`] if `id` has been closed.
    pub fn install_closure(&mut self, id: ScopeId, def: &'a FunctionDef) -> EvalResult<Closure<'a>> {
        let closure = Closure { def,
                                scope: id,
                                mark: self.next_install };
        self.install(id, &def.name, Callable::Closure(closure))?;
        Ok(closure)
    }

    fn install(&mut self, id: ScopeId, name: &'a str, callable: Callable<'a>) -> EvalResult<()> {
        let number = self.next_install;
        self.live_frame_mut(id, name)?
            .functions
            .insert(name, Installed { callable, number });
        self.next_install += 1;
        Ok(())
    }

    /// Looks a variable up, starting at `id` and walking outward.
    #[must_use]
    pub fn variable(&self, mut id: ScopeId, name: &str) -> Option<Value> {
        loop {
            let frame = self.frame(id)?;
            if let Some(value) = frame.variables.get(name) {
                return Some(*value);
            }
            id = frame.parent?;
        }
    }

    /// Looks a callable up by name and arity, starting at `id` and walking
    /// outward.
    ///
    /// A same-named callable with a different arity does not stop the search.
    /// Neither does one installed after the closure whose defining scope the
    /// search has stepped into.
    #[must_use]
    pub fn function(&self, mut id: ScopeId, name: &str, arity: usize) -> Option<Callable<'a>> {
        let mut horizon = u64::MAX;
        loop {
            let frame = self.frame(id)?;
            if let Some(installed) = frame.functions.get(name)
               && installed.number <= horizon
               && installed.callable.arity() == arity
            {
                return Some(installed.callable);
            }
            if let Some(mark) = frame.horizon {
                horizon = horizon.min(mark);
            }
            id = frame.parent?;
        }
    }

    fn frame(&self, id: ScopeId) -> Option<&Frame<'a>> {
        self.frames.get(id.index).filter(|frame| frame.serial == id.serial)
    }

    fn live_frame_mut(&mut self, id: ScopeId, name: &str) -> EvalResult<&mut Frame<'a>> {
        self.frames
            .get_mut(id.index)
            .filter(|frame| frame.serial == id.serial)
            .ok_or_else(|| RuntimeError::ScopeNotLive { name: name.to_string() })
    }
}
