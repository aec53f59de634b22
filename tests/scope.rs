use autoscript::{
    ast::{Block, FunctionDef},
    error::RuntimeError,
    interpreter::{
        evaluator::scope::{Callable, ScopeStack},
        value::Value,
    },
};

fn def(name: &str, params: &[&str]) -> FunctionDef {
    FunctionDef { name:   name.to_string(),
                  params: params.iter().map(|p| (*p).to_string()).collect(),
                  body:   Block::default(), }
}

fn resolved_def<'a>(callable: Option<Callable<'a>>) -> Option<&'a FunctionDef> {
    match callable? {
        Callable::Closure(closure) => Some(closure.def),
        Callable::Native(_) => None,
    }
}

#[test]
fn bindings_in_a_closed_scope_are_errors() {
    let g = def("g", &[]);
    let mut scopes = ScopeStack::new();
    let outer = scopes.push(None);
    let inner = scopes.push(Some(outer));
    scopes.pop(inner);

    assert_eq!(scopes.define_variable(inner, "x", Value::Integer(1)),
               Err(RuntimeError::ScopeNotLive { name: "x".to_string() }));
    assert!(matches!(scopes.install_closure(inner, &g),
                     Err(RuntimeError::ScopeNotLive { ref name }) if name == "g"));

    assert!(scopes.define_variable(outer, "x", Value::Integer(1)).is_ok());
    assert!(scopes.install_closure(outer, &g).is_ok());
}

#[test]
fn lookup_matches_name_and_arity_walking_outward() {
    let (f0, f1) = (def("f", &[]), def("f", &["x"]));
    let mut scopes = ScopeStack::new();
    let outer = scopes.push(None);
    scopes.install_closure(outer, &f1).unwrap();
    let inner = scopes.push(Some(outer));
    scopes.install_closure(inner, &f0).unwrap();

    assert!(resolved_def(scopes.function(inner, "f", 0)).is_some_and(|d| std::ptr::eq(d, &f0)));
    assert!(resolved_def(scopes.function(inner, "f", 1)).is_some_and(|d| std::ptr::eq(d, &f1)));
    assert!(scopes.function(inner, "f", 2).is_none());
    assert!(scopes.function(outer, "f", 0).is_none());
}

#[test]
fn closure_invocation_hides_later_installs_in_defining_scopes() {
    let (early, f, late, local) = (def("g", &[]), def("f", &[]), def("g", &[]), def("g", &[]));
    let mut scopes = ScopeStack::new();
    let program = scopes.push(None);
    scopes.install_closure(program, &early).unwrap();
    let block = scopes.push(Some(program));
    let closure = scopes.install_closure(block, &f).unwrap();
    scopes.install_closure(block, &late).unwrap();

    // From the block itself the later `g` is visible.
    assert!(resolved_def(scopes.function(block, "g", 0)).is_some_and(|d| std::ptr::eq(d, &late)));

    // From inside `f` it is not, but `f` itself is.
    let params = scopes.push_call(&closure);
    let body = scopes.push(Some(params));
    assert!(resolved_def(scopes.function(body, "g", 0)).is_some_and(|d| std::ptr::eq(d, &early)));
    assert!(resolved_def(scopes.function(body, "f", 0)).is_some_and(|d| std::ptr::eq(d, &f)));

    // Definitions made during the invocation are visible to it.
    scopes.install_closure(body, &local).unwrap();
    assert!(resolved_def(scopes.function(body, "g", 0)).is_some_and(|d| std::ptr::eq(d, &local)));
}
