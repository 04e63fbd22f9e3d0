/// Numeric conversion and display helpers.
///
/// The language has a single `Number` type backed by `f64`. This module holds
/// the checked conversions between that representation and the integer types
/// the interpreter needs (literal parsing, string lengths, repetition counts),
/// plus the display rule that prints whole numbers without a fractional part.
///
/// All conversions return a `Result` carrying a caller-supplied error, so each
/// phase can report the failure with its own error type and span.
pub mod num;
