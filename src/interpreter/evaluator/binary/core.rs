use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        position::Span,
        value::core::Value,
    },
};

impl Evaluator<'_> {
    /// Evaluates an arithmetic operator of the numeric chain.
    ///
    /// Two Numbers go to [`Evaluator::eval_scalar_op`]. A String and a Number
    /// under `MULTIPLY`, in either order, repeat the String, so repetition
    /// works even when the lookahead chose the arithmetic chain (for instance
    /// when the String is held in a variable). Any Boolean operand is an
    /// error, as is every other use of a String.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `right_span`: Span of the right operand, blamed for division by zero.
    /// - `span`: Span of the whole operation.
    ///
    /// # Example
    /// ```
    /// use engscript::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Evaluator, position::Span, value::core::Value},
    /// };
    ///
    /// let span = Span::default();
    /// let sum = Evaluator::eval_arithmetic(BinaryOperator::Add,
    ///                                      &Value::Number(3.0),
    ///                                      &Value::Number(4.0),
    ///                                      span,
    ///                                      span);
    /// assert_eq!(sum.unwrap(), Value::Number(7.0));
    ///
    /// let repeated = Evaluator::eval_arithmetic(BinaryOperator::Multiply,
    ///                                           &Value::Number(2.0),
    ///                                           &Value::from("ab"),
    ///                                           span,
    ///                                           span);
    /// assert_eq!(repeated.unwrap(), Value::from("abab"));
    /// ```
    pub fn eval_arithmetic(op: BinaryOperator,
                           left: &Value,
                           right: &Value,
                           right_span: Span,
                           span: Span)
                           -> EvalResult<Value> {
        use Value::{Boolean, Number, String};

        match (left, right) {
            (Boolean(_), _) | (_, Boolean(_)) => Err(RuntimeError::BooleanArithmetic { span }),
            (Number(a), Number(b)) => Self::eval_scalar_op(op, *a, *b, right_span),
            (String(text), Number(count)) | (Number(count), String(text))
                if op == BinaryOperator::Multiply =>
            {
                Self::repeat(text, *count, span)
            },
            _ => Err(RuntimeError::StringArithmetic { span }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booleans_never_take_part_in_arithmetic() {
        for op in [BinaryOperator::Add, BinaryOperator::Multiply] {
            let err = Evaluator::eval_arithmetic(op,
                                                 &Value::Boolean(true),
                                                 &Value::Number(1.0),
                                                 Span::default(),
                                                 Span::default()).unwrap_err();
            assert!(matches!(err, RuntimeError::BooleanArithmetic { .. }));
        }
    }

    #[test]
    fn adding_strings_is_an_arithmetic_error() {
        let err = Evaluator::eval_arithmetic(BinaryOperator::Add,
                                             &Value::from("a"),
                                             &Value::from("b"),
                                             Span::default(),
                                             Span::default()).unwrap_err();
        assert_eq!(err.to_string(), "Cannot perform arithmetic on String values");
    }
}
