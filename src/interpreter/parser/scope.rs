use std::collections::{HashMap, HashSet};

/// Outcome of resolving a function call against the static scope chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// A function with this name and arity is visible.
    Found,
    /// The name is visible, but not with this arity.
    WrongSignature,
    /// The name is not declared anywhere in the chain.
    NotFound,
}

/// One level of the parse-time scope chain.
///
/// A `StaticScope` records which function signatures and variable names are
/// declared at one block level. It borrows its parent, so the chain lives on
/// the parser's call stack and each level disappears when the block that
/// created it finishes parsing.
///
/// # Example
/// ```
/// use autoscript::interpreter::parser::scope::{Lookup, StaticScope};
///
/// let mut root = StaticScope::root();
/// root.declare_function("click", 2);
///
/// let inner = StaticScope::child(&root);
/// assert_eq!(inner.lookup_function("click", 2), Lookup::Found);
/// assert_eq!(inner.lookup_function("click", 1), Lookup::WrongSignature);
/// assert_eq!(inner.lookup_function("pause", 1), Lookup::NotFound);
/// ```
#[derive(Debug, Default)]
pub struct StaticScope<'p> {
    parent:    Option<&'p StaticScope<'p>>,
    functions: HashMap<String, usize>,
    variables: HashSet<String>,
}

impl<'p> StaticScope<'p> {
    /// Creates an outermost scope with no declarations.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates an empty scope nested inside `parent`.
    #[must_use]
    pub fn child(parent: &'p StaticScope<'p>) -> Self {
        Self { parent:    Some(parent),
               functions: HashMap::new(),
               variables: HashSet::new(), }
    }

    /// Declares a function signature at this level.
    ///
    /// Returns `false`, leaving the scope unchanged, if a function with this
    /// name is already declared at this level.
    pub fn declare_function(&mut self, name: &str, arity: usize) -> bool {
        if self.functions.contains_key(name) {
            return false;
        }
        self.functions.insert(name.to_string(), arity);
        true
    }

    /// Declares a variable name at this level.
    ///
    /// Returns `false` if the name was already declared at this level.
    pub fn declare_variable(&mut self, name: &str) -> bool {
        self.variables.insert(name.to_string())
    }

    /// Resolves a call to `name` with `arity` arguments.
    ///
    /// A level declaring the exact signature resolves the call. Otherwise the
    /// answer from the enclosing levels is preferred whenever they know the
    /// name at all; only if they do not does a same-named declaration at this
    /// level turn into [`Lookup::WrongSignature`].
    #[must_use]
    pub fn lookup_function(&self, name: &str, arity: usize) -> Lookup {
        let declared = self.functions.get(name);
        if declared == Some(&arity) {
            return Lookup::Found;
        }
        if let Some(parent) = self.parent {
            let outer = parent.lookup_function(name, arity);
            if outer != Lookup::NotFound {
                return outer;
            }
        }
        if declared.is_some() {
            Lookup::WrongSignature
        } else {
            Lookup::NotFound
        }
    }

    /// Whether a variable called `name` is visible from this level.
    #[must_use]
    pub fn lookup_variable(&self, name: &str) -> bool {
        self.variables.contains(name) || self.parent.is_some_and(|parent| parent.lookup_variable(name))
    }
}
