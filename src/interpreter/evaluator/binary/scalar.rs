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
    /// Evaluates a scalar arithmetic operation on two Numbers.
    ///
    /// Division by zero is checked explicitly and blamed on the right operand.
    ///
    /// # Parameters
    /// - `op`: The arithmetic operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `right_span`: Span of the right operand.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the computed Number.
    ///
    /// # Example
    /// ```
    /// use engscript::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Evaluator, position::Span, value::core::Value},
    /// };
    ///
    /// let result = Evaluator::eval_scalar_op(BinaryOperator::Divide, 5.0, 2.0, Span::default());
    /// assert_eq!(result.unwrap(), Value::Number(2.5));
    /// ```
    pub fn eval_scalar_op(op: BinaryOperator,
                          left: f64,
                          right: f64,
                          right_span: Span)
                          -> EvalResult<Value> {
        use BinaryOperator::{Add, Divide, Multiply, Subtract};

        Ok(Value::Number(match op {
                             Add => left + right,
                             Subtract => left - right,
                             Multiply => left * right,
                             Divide => {
                                 if right == 0.0 {
                                     return Err(RuntimeError::DivisionByZero { span: right_span });
                                 }
                                 left / right
                             },
                         }))
    }
}
