use std::{cell::RefCell, io::Write, rc::Rc, thread};

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{core::EvalResult, function::native::Natives},
        value::Value,
    },
};

/// How the sample `pause` function treats its duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PauseMode {
    /// Only report the pause.
    #[default]
    Report,
    /// Report the pause and block the thread for its duration.
    Sleep,
}

/// Registers the sample automation library: `click(x, y)`, `pause(d)` and
/// `dump(v)`.
///
/// Every function reports what it does as one line written to `out`.
///
/// # Example
/// ```
/// use std::{cell::RefCell, rc::Rc};
///
/// use autoscript::{
///     Options,
///     interpreter::evaluator::function::{
///         builtin::{PauseMode, register_builtins},
///         native::Natives,
///     },
///     run,
/// };
///
/// let out = Rc::new(RefCell::new(Vec::new()));
/// let mut natives = Natives::new();
/// register_builtins(&mut natives, out.clone(), PauseMode::Report);
///
/// run("click(10, 20) pause(3s)", &natives, Options::default()).unwrap();
/// assert_eq!(String::from_utf8(out.borrow().clone()).unwrap(),
///            "click: (10, 20)\npause: 3 seconds\n");
/// ```
pub fn register_builtins<W>(natives: &mut Natives, out: Rc<RefCell<W>>, pause_mode: PauseMode)
    where W: Write + 'static
{
    let click_out = Rc::clone(&out);
    let pause_out = Rc::clone(&out);
    natives.register("click", 2, move |_, args| click(&mut *click_out.borrow_mut(), args))
           .register("pause", 1, move |_, args| {
               pause(&mut *pause_out.borrow_mut(), args, pause_mode)
           })
           .register("dump", 1, move |_, args| dump(&mut *out.borrow_mut(), args));
}

/// Simulates a click at the integer coordinates `(x, y)`.
///
/// # Errors
/// [`RuntimeError::ArgumentTypeMismatch`] unless both arguments are integers.
pub fn click(out: &mut dyn Write, args: &[Value]) -> EvalResult<()> {
    let [x, y] = args else {
        return Err(arity_mismatch("click", 2, args));
    };
    let x = x.as_integer("click")?;
    let y = y.as_integer("click")?;

    report(out, "click", format_args!("click: ({x}, {y})"))
}

/// Pauses for a duration.
///
/// # Errors
/// [`RuntimeError::ArgumentTypeMismatch`] unless the argument is a duration.
pub fn pause(out: &mut dyn Write, args: &[Value], mode: PauseMode) -> EvalResult<()> {
    let [duration] = args else {
        return Err(arity_mismatch("pause", 1, args));
    };
    let duration = duration.as_duration("pause")?;

    report(out, "pause", format_args!("pause: {} seconds", duration.as_secs()))?;
    if mode == PauseMode::Sleep {
        thread::sleep(duration);
    }
    Ok(())
}

/// Writes any value.
pub fn dump(out: &mut dyn Write, args: &[Value]) -> EvalResult<()> {
    let [value] = args else {
        return Err(arity_mismatch("dump", 1, args));
    };

    report(out, "dump", format_args!("dump: {value}"))
}

fn report(out: &mut dyn Write, function: &str, line: std::fmt::Arguments<'_>) -> EvalResult<()> {
    writeln!(out, "{line}").map_err(|e| RuntimeError::NativeFailure { function: function.to_string(),
                                                                      message:  e.to_string(), })
}

fn arity_mismatch(name: &str, expected: usize, args: &[Value]) -> RuntimeError {
    RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                          expected,
                                          found: args.len() }
}
