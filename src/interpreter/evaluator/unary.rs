use crate::{
    ast::UnaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        position::Span,
        value::core::Value,
    },
    util::num::usize_to_f64_checked,
};

impl Evaluator<'_> {
    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `Plus`: returns the operand unchanged.
    /// - `Negate`: multiplies a Number by -1.
    ///
    /// # Parameters
    /// - `op`: Unary operator.
    /// - `value`: Input value.
    /// - `span`: Span of the whole unary expression, for error reporting.
    ///
    /// # Returns
    /// The computed `Value` wrapped in `EvalResult`.
    ///
    /// # Example
    /// ```
    /// use engscript::{
    ///     ast::UnaryOperator,
    ///     interpreter::{evaluator::core::Evaluator, position::Span, value::core::Value},
    /// };
    ///
    /// let v = Evaluator::eval_unary(UnaryOperator::Negate, Value::Number(5.0), Span::default());
    /// assert_eq!(v.unwrap(), Value::Number(-5.0));
    ///
    /// let v = Evaluator::eval_unary(UnaryOperator::Negate, Value::Boolean(true), Span::default());
    /// assert!(v.is_err());
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: Value, span: Span) -> EvalResult<Value> {
        match (op, value) {
            (UnaryOperator::Plus, value) => Ok(value),
            (UnaryOperator::Negate, Value::Number(n)) => Ok(Value::Number(-1.0 * n)),
            (UnaryOperator::Negate, Value::Boolean(_)) => {
                Err(RuntimeError::BooleanArithmetic { span })
            },
            (UnaryOperator::Negate, Value::String(_)) => Err(RuntimeError::StringArithmetic { span }),
        }
    }

    /// Evaluates `LENGTH`: the number of characters in a String.
    ///
    /// # Errors
    /// `LengthOfNonString` for Numbers and Booleans.
    pub fn eval_length(value: &Value, span: Span) -> EvalResult<Value> {
        match value {
            Value::String(s) => {
                let length = usize_to_f64_checked(s.chars().count(),
                                                  RuntimeError::StringTooLong { span })?;
                Ok(Value::Number(length))
            },
            other => Err(RuntimeError::LengthOfNonString { found: other.type_name(),
                                                           span }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plus_passes_any_value_through() {
        let v = Evaluator::eval_unary(UnaryOperator::Plus, Value::from("a"), Span::default());
        assert_eq!(v.unwrap(), Value::from("a"));
    }

    #[test]
    fn negating_a_string_is_an_arithmetic_error() {
        let err = Evaluator::eval_unary(UnaryOperator::Negate, Value::from("a"), Span::default()).unwrap_err();
        assert!(matches!(err, RuntimeError::StringArithmetic { .. }));
    }

    #[test]
    fn length_counts_characters() {
        let v = Evaluator::eval_length(&Value::from("héllo"), Span::default()).unwrap();
        assert_eq!(v, Value::Number(5.0));
        let err = Evaluator::eval_length(&Value::Number(3.0), Span::default()).unwrap_err();
        assert_eq!(err.to_string(), "LENGTH expects a String, found Number");
    }
}
