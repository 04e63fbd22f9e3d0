use crate::{
    ast::{BinaryOperator, StringOperator},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        position::Span,
        value::core::Value,
    },
    util::num::{f64_to_repeat_count, format_number},
};

/// Largest string, in bytes, that repetition may build.
pub const MAX_STRING_BYTES: usize = 1 << 26;

impl Evaluator<'_> {
    /// Evaluates an operator of the string chain.
    ///
    /// `JOIN` concatenates two Strings. `MULTIPLY` repeats a String by a
    /// Number given on either side; between two Numbers it is ordinary
    /// multiplication.
    ///
    /// # Errors
    /// - `NonStringJoin` if either `JOIN` operand is not a String.
    /// - `BooleanArithmetic` / `StringArithmetic` for other invalid `MULTIPLY`
    ///   operands.
    /// - Errors of [`Evaluator::repeat`].
    pub fn eval_string_op(op: StringOperator,
                          left: &Value,
                          right: &Value,
                          right_span: Span,
                          span: Span)
                          -> EvalResult<Value> {
        match op {
            StringOperator::Join => match (left, right) {
                (Value::String(a), Value::String(b)) => Ok(Value::String(format!("{a}{b}"))),
                _ => Err(RuntimeError::NonStringJoin { span }),
            },
            StringOperator::Repeat => {
                Self::eval_arithmetic(BinaryOperator::Multiply, left, right, right_span, span)
            },
        }
    }

    /// Repeats `text` `count` times.
    ///
    /// Negative whole counts give the empty string.
    ///
    /// # Errors
    /// - `InvalidRepeatCount` for fractional or non-finite counts.
    /// - `StringTooLong` if the result would exceed [`MAX_STRING_BYTES`].
    ///
    /// # Example
    /// ```
    /// use engscript::interpreter::{
    ///     evaluator::core::Evaluator, position::Span, value::core::Value,
    /// };
    ///
    /// let span = Span::default();
    /// assert_eq!(Evaluator::repeat("ab", 3.0, span).unwrap(), Value::from("ababab"));
    /// assert_eq!(Evaluator::repeat("ab", -1.0, span).unwrap(), Value::from(""));
    /// assert!(Evaluator::repeat("ab", 1.5, span).is_err());
    /// ```
    pub fn repeat(text: &str, count: f64, span: Span) -> EvalResult<Value> {
        let times =
            f64_to_repeat_count(count,
                                RuntimeError::InvalidRepeatCount { count: format_number(count),
                                                                   span })?;
        match text.len().checked_mul(times) {
            Some(total) if total <= MAX_STRING_BYTES => Ok(Value::String(text.repeat(times))),
            _ => Err(RuntimeError::StringTooLong { span }),
        }
    }
}
