use std::{
    fs,
    io::{self, BufRead, Write},
    process::ExitCode,
};

use clap::Parser;
use engscript::{
    Session,
    config::{Config, DEFAULT_MAX_NESTING},
    interpreter::{evaluator::core::Output, value::core::Value},
};

const PROMPT: &str = "engscript > ";

/// engscript runs programs written in a small scripting language whose
/// operators are English keywords. Without contents it starts an interactive
/// shell.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells engscript to treat the contents as a file path instead of a
    /// script.
    #[arg(short, long)]
    file: bool,

    /// Print the value of every statement, not only OUTPUT statements.
    #[arg(short, long)]
    debug: bool,

    /// Deepest bracket or parenthesis nesting accepted.
    #[arg(long, default_value_t = DEFAULT_MAX_NESTING)]
    max_nesting: usize,

    /// A script, or a file path with --file.
    contents: Option<String>,
}

/// Prints each value on its own line as soon as it is produced.
struct Printer;

impl Output for Printer {
    fn emit(&mut self, value: &Value) {
        println!("{value}");
    }
}

fn init_tracing() {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env()
                                 .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")))
                             .with_writer(io::stderr)
                             .init();
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();
    let config = Config::default().with_debug(args.debug)
                                  .with_max_nesting(args.max_nesting);

    match args.contents {
        None => shell(config.with_source_name("<shell>")),
        Some(path) if args.file => {
            let Ok(script) = fs::read_to_string(&path) else {
                eprintln!("Failed to read the input file '{path}'. Perhaps this file does not exist?");
                return ExitCode::FAILURE;
            };
            run_script(config.with_source_name(path), &script)
        },
        Some(script) => run_script(config, &script),
    }
}

/// Runs a whole program once; the first error is reported and fails the
/// process.
fn run_script(config: Config, script: &str) -> ExitCode {
    let mut session = Session::new(config);
    match session.execute(script, &mut Printer) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}", error.render(&session.config().source_name, None));
            ExitCode::FAILURE
        },
    }
}

/// Reads programs line by line from stdin against one session, so variables
/// persist between inputs. Errors are reported with a caret line aligned under
/// the prompt and the shell keeps going.
fn shell(config: Config) -> ExitCode {
    let mut session = Session::new(config);
    let stdin = io::stdin();
    let mut input = String::new();

    loop {
        print!("{PROMPT}");
        if io::stdout().flush().is_err() {
            return ExitCode::FAILURE;
        }

        input.clear();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => return ExitCode::SUCCESS,
            Ok(_) => {},
            Err(error) => {
                eprintln!("Failed to read input: {error}");
                return ExitCode::FAILURE;
            },
        }

        if input.trim().is_empty() {
            continue;
        }

        if let Err(error) = session.execute(&input, &mut Printer) {
            eprintln!("{}", error.render(&session.config().source_name, Some(PROMPT.len())));
        }
    }
}
