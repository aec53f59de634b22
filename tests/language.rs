use std::{cell::RefCell, fs, rc::Rc};

use autoscript::{
    Error, Options,
    error::{ParseError, RuntimeError},
    interpreter::{
        evaluator::function::{
            builtin::{PauseMode, register_builtins},
            native::Natives,
        },
        parser::core::MAX_NESTING_DEPTH,
        value::Value,
    },
    run,
};

/// Runs `src` against the sample library and returns every line it printed.
fn run_script(src: &str) -> Result<Vec<String>, Error> {
    run_with_options(src, Options::default())
}

fn run_with_options(src: &str, options: Options) -> Result<Vec<String>, Error> {
    let out = Rc::new(RefCell::new(Vec::new()));
    let mut natives = Natives::new();
    register_builtins(&mut natives, Rc::clone(&out), PauseMode::Report);

    run(src, &natives, options)?;

    let text = String::from_utf8(out.borrow().clone()).expect("builtins write UTF-8");
    Ok(text.lines().map(str::to_string).collect())
}

fn assert_success(src: &str) -> Vec<String> {
    match run_script(src) {
        Ok(lines) => lines,
        Err(e) => panic!("Script failed: {e}"),
    }
}

fn assert_failure(src: &str) -> Error {
    match run_script(src) {
        Ok(_) => panic!("Script succeeded but was expected to fail"),
        Err(e) => e,
    }
}

fn parse_error(src: &str) -> ParseError {
    match assert_failure(src) {
        Error::Parse(e) => e,
        Error::Runtime(e) => panic!("Expected a parse error, got runtime error: {e}"),
    }
}

fn runtime_error(src: &str) -> RuntimeError {
    match assert_failure(src) {
        Error::Runtime(e) => e,
        Error::Parse(e) => panic!("Expected a runtime error, got parse error: {e}"),
    }
}

#[test]
fn empty_program_does_nothing() {
    assert!(assert_success("").is_empty());
    assert!(assert_success("  \n\t\n ").is_empty());
    assert!(assert_success("{ } { { } }").is_empty());
}

#[test]
fn literals_of_every_kind() {
    assert_eq!(assert_success("dump(42) dump(100s) dump(true) dump(false)"),
               ["dump: 42", "dump: 100s", "dump: true", "dump: false"]);
}

#[test]
fn repeat_runs_body_count_times() {
    assert_eq!(assert_success("repeat (3) { click(10, 10) }"),
               ["click: (10, 10)"; 3]);
    assert!(assert_success("repeat (0) { click(10, 10) }").is_empty());
}

#[test]
fn nested_repeat_multiplies() {
    assert_eq!(assert_success("repeat (2) { repeat (3) { click(1, 2) } }").len(), 6);
}

#[test]
fn if_runs_body_only_when_true() {
    assert_eq!(assert_success("if (true) { click(1, 1) } if (false) { click(2, 2) }"),
               ["click: (1, 1)"]);
}

#[test]
fn recursion_terminates() {
    assert_eq!(assert_success("def f(x) { dump(x) if (x) { f(false) } } f(true)"),
               ["dump: true", "dump: false"]);
}

#[test]
fn parameters_shadow_nothing_outside_the_call() {
    assert_eq!(assert_success("def show(a, b) { dump(b) dump(a) } show(1, 2s) show(true, 3)"),
               ["dump: 2s", "dump: 1", "dump: 3", "dump: true"]);
}

#[test]
fn closures_see_their_defining_scope() {
    // `h` is called from `f`, whose own `y` must not leak into `h`.
    assert_eq!(assert_success("def g(y) { def h() { dump(y) } def f(y) { h() } f(false) } g(true)"),
               ["dump: true"]);
}

#[test]
fn closures_resolve_variables_of_enclosing_functions() {
    assert_eq!(assert_success("def g(x, y) { def f(x) { dump(y) } def h(y) { f(y) } h(true) } g(1, 2)"),
               ["dump: 2"]);
}

#[test]
fn inner_definitions_shadow_natives() {
    assert_eq!(assert_success("{ def click(x, y) { dump(x) } click(7, 8) } click(7, 8)"),
               ["dump: 7", "click: (7, 8)"]);
}

#[test]
fn call_falls_through_to_outer_definition_with_matching_arity() {
    // The inner `f` takes one argument, so `f(1, 2)` resolves to the outer one.
    assert_eq!(assert_success("def f(a, b) { dump(b) } { def f(a) { dump(a) } f(1, 2) f(3) }"),
               ["dump: 2", "dump: 3"]);
}

#[test]
fn definitions_inside_repeat_are_fresh_each_iteration() {
    assert_eq!(assert_success("repeat (2) { def f() { click(0, 0) } f() }").len(), 2);
}

#[test]
fn sample_program() {
    let src = "
        def g(x, y)
        {
            def f(x) { dump(y) }
            def h(y) { f(y) }
            h(true)
        }
        g(1, 2)
        repeat (3)
        {
            def f(x)
            {
                click(1, 1)
                dump(x)
                if (x) { f(false) }
            }
            click(10,10)
            pause(100s)
            click(10,10)
            repeat(2)
            {
               pause(10s)
               f(true)
            }
        }";

    let lines = assert_success(src);
    let iteration = ["click: (10, 10)",
                     "pause: 100 seconds",
                     "click: (10, 10)",
                     "pause: 10 seconds",
                     "click: (1, 1)",
                     "dump: true",
                     "click: (1, 1)",
                     "dump: false",
                     "pause: 10 seconds",
                     "click: (1, 1)",
                     "dump: true",
                     "click: (1, 1)",
                     "dump: false"];

    assert_eq!(lines[0], "dump: 2");
    assert_eq!(lines.len(), 1 + 3 * iteration.len());
    for chunk in lines[1..].chunks(iteration.len()) {
        assert_eq!(chunk, iteration);
    }
}

#[test]
fn script_file() {
    let src = fs::read_to_string("tests/example.auto").expect("Failed to read tests/example.auto");
    let lines = assert_success(&src);

    assert_eq!(lines.iter().filter(|line| line.starts_with("click")).count(), 8);
    assert_eq!(lines.last().map(String::as_str), Some("dump: true"));
}

#[test]
fn wrong_arity_is_rejected_before_running() {
    let e = parse_error("click(1)");
    assert!(matches!(e, ParseError::WrongSignature { ref name, arity: 1, .. } if name == "click"));
    assert_eq!((e.line(), e.column()), (1, 1));

    // Nothing ran, even though the bad call comes last.
    let out = Rc::new(RefCell::new(Vec::<u8>::new()));
    let mut natives = Natives::new();
    register_builtins(&mut natives, Rc::clone(&out), PauseMode::Report);
    assert!(run("click(1, 1) click(1)", &natives, Options::default()).is_err());
    assert!(out.borrow().is_empty());
}

#[test]
fn unknown_function() {
    let e = parse_error("\n  beep()");
    assert!(matches!(e, ParseError::UnknownFunction { ref name, .. } if name == "beep"));
    assert_eq!((e.line(), e.column()), (2, 3));
}

#[test]
fn forward_references_are_rejected() {
    assert!(matches!(parse_error("f() def f() { }"), ParseError::UnknownFunction { .. }));
}

#[test]
fn definitions_are_local_to_their_block() {
    assert!(matches!(parse_error("{ def f() { } } f()"), ParseError::UnknownFunction { .. }));
}

#[test]
fn unknown_variable() {
    let e = parse_error("dump(x)");
    assert!(matches!(e, ParseError::UnknownVariable { ref name, .. } if name == "x"));
    assert_eq!((e.line(), e.column()), (1, 6));
}

#[test]
fn parameters_are_not_visible_outside_the_body() {
    assert!(matches!(parse_error("def f(x) { } dump(x)"), ParseError::UnknownVariable { .. }));
}

#[test]
fn duplicate_definitions_and_parameters() {
    assert!(matches!(parse_error("def f() { } def f(x) { }"),
                     ParseError::FunctionAlreadyDefined { .. }));
    assert!(matches!(parse_error("def f(x, x) { }"), ParseError::DuplicateParameter { .. }));
    assert_success("def f() { } { def f() { } }");
}

#[test]
fn malformed_tokens() {
    assert!(matches!(parse_error("dump(10x)"), ParseError::InvalidToken { .. }));
    assert!(matches!(parse_error("dump(10ss)"), ParseError::InvalidToken { .. }));
    let e = parse_error("click(1, 1) @");
    assert!(matches!(e, ParseError::InvalidToken { ref text, .. } if text == "@"));
    assert_eq!(e.column(), 13);
}

#[test]
fn grammar_errors() {
    assert!(matches!(parse_error("repeat (x) { }"), ParseError::Expected { .. }));
    assert!(matches!(parse_error("repeat (2s) { }"), ParseError::Expected { .. }));
    assert!(matches!(parse_error("repeat (3) click(1, 1)"), ParseError::Expected { .. }));
    assert!(matches!(parse_error("if (true) { click(1, 1)"), ParseError::Expected { .. }));
    assert!(matches!(parse_error("click(1 1)"), ParseError::Expected { .. }));
    assert!(matches!(parse_error("click(1, )"), ParseError::Expected { .. }));
    assert!(matches!(parse_error("def (x) { }"), ParseError::Expected { .. }));
    assert!(matches!(parse_error("def f(1) { }"), ParseError::Expected { .. }));
}

#[test]
fn trailing_input() {
    let e = parse_error("click(1, 1) }");
    assert!(matches!(e, ParseError::TrailingInput { .. }));
    assert_eq!((e.line(), e.column()), (1, 13));
}

#[test]
fn if_condition_must_be_bool() {
    let e = runtime_error("if (1) { }");
    assert!(matches!(e, RuntimeError::ConditionNotBool { found: "integer" }));
    assert_eq!(e.to_string(), "type mismatch for if condition, must be bool");

    assert!(matches!(runtime_error("def f(x) { if (x) { } } f(5s)"),
                     RuntimeError::ConditionNotBool { .. }));
}

#[test]
fn native_argument_kinds_are_checked_at_run_time() {
    let e = runtime_error("pause(1)");
    assert!(matches!(e, RuntimeError::ArgumentTypeMismatch { ref function } if function == "pause"));
    assert_eq!(e.to_string(), "argument type mismatch in function pause");

    assert!(matches!(runtime_error("click(true, 1)"), RuntimeError::ArgumentTypeMismatch { .. }));
}

#[test]
fn effects_before_a_runtime_error_stay() {
    let out = Rc::new(RefCell::new(Vec::new()));
    let mut natives = Natives::new();
    register_builtins(&mut natives, Rc::clone(&out), PauseMode::Report);

    let result = run("click(1, 2) pause(3) click(4, 5)", &natives, Options::default());

    assert!(result.is_err_and(|e| e.is_runtime()));
    assert_eq!(String::from_utf8(out.borrow().clone()).unwrap(), "click: (1, 2)\n");
}

#[test]
fn unbounded_recursion_hits_the_depth_limit() {
    let e = runtime_error("def f(x) { f(x) } f(true)");
    assert!(matches!(e, RuntimeError::CallDepthExceeded { limit: 256 }));

    let options = Options { max_call_depth: 3 };
    let err = run_with_options("def f(x) { dump(x) f(x) } f(1)", options).unwrap_err();
    assert!(matches!(err, Error::Runtime(RuntimeError::CallDepthExceeded { limit: 3 })));

    assert_eq!(run_with_options("def f() { } f()", Options { max_call_depth: 1 }).unwrap(),
               Vec::<String>::new());
}

#[test]
fn custom_natives_see_arguments_and_caller_scope() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&calls);

    let mut natives = Natives::new();
    natives.register("record", 1, move |caller, args| {
               seen.borrow_mut().push((args[0], caller.variable("n")));
               Ok(())
           });

    run("record(1) def f(n) { record(n) } f(2s)", &natives, Options::default()).unwrap();

    assert_eq!(*calls.borrow(),
               [(Value::Integer(1), None),
                (Value::Duration(std::time::Duration::from_secs(2)),
                 Some(Value::Duration(std::time::Duration::from_secs(2))))]);
}

#[test]
fn native_failures_propagate() {
    let mut natives = Natives::new();
    natives.register("fail", 0, |_, _| {
               Err(RuntimeError::NativeFailure { function: "fail".to_string(),
                                                 message:  "device offline".to_string(), })
           });

    let err = run("fail()", &natives, Options::default()).unwrap_err();
    assert_eq!(err.to_string(), "runtime error: function fail failed: device offline");
}

#[test]
fn error_messages_carry_position() {
    let err = run_script("\n\nclick(1)").unwrap_err();
    assert!(err.is_parse());
    assert_eq!(err.to_string(),
               "parse error at line 3, column 1: wrong signature for function 'click': no \
                definition takes 1 argument(s)");
}

#[test]
fn closure_body_ignores_later_sibling_definitions() {
    // `g()` inside `f` resolves to the outer `g`; the sibling is declared too late.
    assert_eq!(assert_success("def g() { dump(1) } { def f() { g() } def g() { dump(2) } f() g() }"),
               ["dump: 1", "dump: 2"]);
}

#[test]
fn nested_closure_ignores_definitions_after_its_enclosing_function() {
    assert_eq!(assert_success("def x() { dump(1) } { def g() { def f() { x() } f() } def x() { dump(2) } g() }"),
               ["dump: 1"]);
}

#[test]
fn closure_still_reaches_earlier_definitions_and_itself() {
    let src = "{ def a() { dump(1) } def f(n) { a() if (n) { f(false) } } def b() { } f(true) }";
    assert_eq!(assert_success(src), ["dump: 1", "dump: 1"]);
}

#[test]
fn nesting_limit() {
    let nested = |depth: usize| format!("{}{}", "{".repeat(depth), "}".repeat(depth));

    assert!(assert_success(&nested(MAX_NESTING_DEPTH)).is_empty());

    let e = parse_error(&nested(MAX_NESTING_DEPTH + 1));
    assert!(matches!(e, ParseError::NestingTooDeep { limit: MAX_NESTING_DEPTH, .. }));
    assert_eq!((e.line(), e.column()), (1, MAX_NESTING_DEPTH + 1));

    assert!(matches!(parse_error(&nested(200_000)), ParseError::NestingTooDeep { .. }));
}

#[test]
fn nesting_limit_counts_every_kind_of_block() {
    let src = format!("def f() {{ {} {} }}",
                      "repeat (1) { ".repeat(MAX_NESTING_DEPTH),
                      "}".repeat(MAX_NESTING_DEPTH));
    assert!(matches!(parse_error(&src), ParseError::NestingTooDeep { .. }));
}
