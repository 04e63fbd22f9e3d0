//! # engscript
//!
//! engscript is an interpreter for a small, line-oriented scripting language
//! whose operators are English keywords:
//!
//! ```text
//! total EQUALS 0
//! FOR i FROM 1 TO 4 [
//!     total EQUALS total ADD i
//! ]
//! IF total MORETHAN 5 [ OUTPUT[ "big" JOIN "!" ] ] ELSE [ OUTPUT[ total ] ]
//! ```
//!
//! A program runs in three phases per logical line: the lexer splits the text
//! into token lines (recursively lexing `[...]` blocks), the parser builds one
//! statement node per line, and the evaluator executes it against a shared
//! variable table.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use tracing::debug;

use crate::{
    config::Config,
    error::{Error, RuntimeError},
    interpreter::{
        evaluator::{
            core::{Completion, Evaluator, Output},
            environment::Environment,
        },
        lexer::{LineDump, tokenize},
        parser::core::parse_line,
        value::core::Value,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Node` type and the operator enums that represent
/// one statement as a tree. The tree is built by the parser and walked by the
/// evaluator.
///
/// # Responsibilities
/// - Defines a closed set of node kinds for all language constructs.
/// - Attaches source spans and the output flag to every node.
pub mod ast;
/// Settings for a run: source name, debug printing and the nesting limit.
pub mod config;
/// Provides unified error types for lexing, parsing and evaluation.
///
/// This module defines all errors that can be raised while running a program
/// and renders them as diagnostics of the form
/// `<kind>: <message>\nFile <name>, line <N>`.
///
/// # Responsibilities
/// - Defines error enums for every failure mode (lexer, parser, evaluator).
/// - Attaches source spans for caret rendering.
pub mod error;
/// Orchestrates the phases of code execution.
///
/// This module ties together positions, lexing, parsing, evaluation and value
/// representations.
pub mod interpreter;
/// General utilities for safe numeric conversion and number display.
///
/// # Responsibilities
/// - Safely convert between `i64`, `usize` and `f64` without silent data
///   loss.
/// - Format Numbers the way the interpreter prints them.
pub mod util;

/// An interpreter session: a configuration and a variable table that persists
/// across calls to [`Session::execute`].
///
/// The interactive shell keeps one session for its whole lifetime, so
/// variables assigned on one input line are visible on the next.
#[derive(Debug, Clone, Default)]
pub struct Session {
    config:      Config,
    environment: Environment,
}

impl Session {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config,
               environment: Environment::new() }
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The variable table, as left by the statements run so far.
    #[must_use]
    pub const fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Runs a program.
    ///
    /// The text is lexed as a whole, then each logical line is parsed and
    /// executed in order. The first error stops the run; values printed by
    /// earlier statements have already been sent to `output`, and variables
    /// they assigned stay assigned.
    ///
    /// # Errors
    /// The first lexical, syntax or runtime error. A program with nothing but
    /// whitespace is `RuntimeError::EmptyInput`, and a `BREAK` that is not
    /// inside a `FOR` loop is `RuntimeError::BreakOutsideLoop`.
    ///
    /// # Example
    /// ```
    /// use engscript::{Session, config::Config, interpreter::value::core::Value};
    ///
    /// let mut session = Session::new(Config::default());
    /// let mut printed: Vec<Value> = Vec::new();
    ///
    /// session.execute("x EQUALS 9", &mut printed).unwrap();
    /// session.execute("OUTPUT[ x MULTIPLY 2 ]", &mut printed).unwrap();
    ///
    /// assert_eq!(printed, vec![Value::Number(18.0)]);
    /// ```
    pub fn execute(&mut self, source: &str, output: &mut dyn Output) -> Result<(), Error> {
        let lines = tokenize(source, self.config.max_nesting)?;
        debug!(source = %self.config.source_name, lines = lines.len(), "tokenized program");
        for line in &lines {
            debug!(tokens = %LineDump(line), "tokens");
        }

        let mut evaluator = Evaluator::new(self.config.debug, output);
        for line in &lines {
            let statement = parse_line(line, self.config.max_nesting)?;
            debug!(line = statement.span.start.line + 1,
                   compound = statement.is_compound(),
                   output = statement.output,
                   "parsed statement");

            let outcome = evaluator.execute(&statement, &mut self.environment)?;
            if let Completion::Break(span) = outcome.completion {
                return Err(RuntimeError::BreakOutsideLoop { span }.into());
            }
        }

        Ok(())
    }
}

/// Runs a program with the default configuration.
///
/// # Returns
/// The printed values, in order.
///
/// # Example
/// ```
/// use engscript::{interpreter::value::core::Value, run};
///
/// let printed = run("OUTPUT[ 5 MULTIPLY (5 DIVIDE 2) ]").unwrap();
/// assert_eq!(printed, vec![Value::Number(12.5)]);
///
/// assert!(run("OUTPUT[ y ]").is_err());
/// ```
pub fn run(source: &str) -> Result<Vec<Value>, Error> {
    run_with(&Config::default(), source)
}

/// Runs a program in a fresh session built from `config`.
pub fn run_with(config: &Config, source: &str) -> Result<Vec<Value>, Error> {
    let mut session = Session::new(config.clone());
    let mut printed: Vec<Value> = Vec::new();
    session.execute(source, &mut printed)?;
    Ok(printed)
}

/// Returns the displayed output of a program, or its rendered diagnostic.
///
/// Each printed value is displayed the way the command-line driver prints
/// it. On failure the diagnostic is rendered without a caret line.
///
/// # Errors
/// The rendered diagnostic of the first error.
///
/// # Examples
/// ```
/// use engscript::{config::Config, get_result};
///
/// let config = Config::default().with_source_name("demo.eng");
///
/// let output = get_result(&config, "OUTPUT[ \"ab\" MULTIPLY 3 ]");
/// assert_eq!(output, Ok(vec!["ababab".to_string()]));
///
/// let failure = get_result(&config, "x EQUALS 1\nOUTPUT[ x DIVIDE 0 ]");
/// assert_eq!(failure,
///            Err("Runtime error: Division by zero\nFile demo.eng, line 2".to_string()));
/// ```
pub fn get_result(config: &Config, source: &str) -> Result<Vec<String>, String> {
    run_with(config, source).map(|printed| printed.iter().map(ToString::to_string).collect())
                            .map_err(|error| error.render(&config.source_name, None))
}
