/// Core evaluation logic.
///
/// Contains the `Evaluator`, the uniform `Outcome` result shape, the `Output`
/// sink for printed values and the dispatch over node kinds.
pub mod core;

/// The variable table.
///
/// One flat, unscoped mapping from names to values, owned by the session and
/// passed by reference into every evaluation call.
pub mod environment;

/// Binary operator evaluation logic.
///
/// Arithmetic on Numbers, string joining and repetition, and comparisons.
pub mod binary;

/// Iterative evaluation of operator chains.
///
/// Long runs of binary and prefix operators are folded from a heap stack
/// rather than by recursion.
pub mod chain;

/// Unary operator evaluation logic.
///
/// Prefix plus and minus, and `LENGTH`.
pub mod unary;

/// Evaluation of `IF`/`ELSEIF`/`ELSE` chains.
pub mod conditional;

/// Evaluation of `FOR` loops.
///
/// Binds the induction variable in the shared table, checks the exclusive
/// upper bound before each pass and stops at a `BREAK`.
pub mod for_loop;
