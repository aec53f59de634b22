use std::{cell::RefCell, fs, io, process::ExitCode, rc::Rc};

use autoscript::{
    DEFAULT_MAX_CALL_DEPTH, Options,
    interpreter::evaluator::function::{
        builtin::{PauseMode, register_builtins},
        native::Natives,
    },
    run,
};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// autoscript runs small automation scripts: blocks, `repeat`, `if`, and
/// user-defined functions driving `click`, `pause` and `dump`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells autoscript to read the script from a file instead of taking it
    /// literally.
    #[arg(short, long)]
    file: bool,

    /// Makes `pause` actually wait for its duration instead of only reporting
    /// it.
    #[arg(long)]
    real_pauses: bool,

    /// Maximum number of nested user-defined function calls.
    #[arg(long, default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    max_call_depth: usize,

    /// Logs parsing and execution details to stderr. `RUST_LOG` takes
    /// precedence when set.
    #[arg(short, long)]
    verbose: bool,

    contents: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter)
                             .with_writer(io::stderr)
                             .init();

    let script = if args.file {
        match fs::read_to_string(&args.contents) {
            Ok(script) => script,
            Err(e) => {
                eprintln!("Failed to read the input file '{}': {e}", &args.contents);
                return ExitCode::FAILURE;
            },
        }
    } else {
        args.contents
    };

    let pause_mode = if args.real_pauses {
        PauseMode::Sleep
    } else {
        PauseMode::Report
    };
    let mut natives = Natives::new();
    register_builtins(&mut natives, Rc::new(RefCell::new(io::stdout())), pause_mode);

    let options = Options { max_call_depth: args.max_call_depth };
    match run(&script, &natives, options) {
        Ok(()) => {
            info!("script completed");
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}
