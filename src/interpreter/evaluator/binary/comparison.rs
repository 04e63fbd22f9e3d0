use std::cmp::Ordering;

use crate::{
    ast::ComparisonOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        position::Span,
        value::core::Value,
    },
};

/// Maps a comparison operator and the ordering of its operands to the final
/// boolean value.
///
/// An unordered pair (a NaN operand) satisfies only `NOTSAMEAS`.
#[must_use]
pub fn ordering_result(op: ComparisonOperator, ordering: Option<Ordering>) -> bool {
    let Some(ordering) = ordering else {
        return op == ComparisonOperator::NotSameAs;
    };
    match op {
        ComparisonOperator::LessThan => ordering.is_lt(),
        ComparisonOperator::MoreThan => ordering.is_gt(),
        ComparisonOperator::LessEquals => ordering.is_le(),
        ComparisonOperator::MoreEquals => ordering.is_ge(),
        ComparisonOperator::SameAs => ordering.is_eq(),
        ComparisonOperator::NotSameAs => ordering.is_ne(),
    }
}

impl Evaluator<'_> {
    /// Evaluates a comparison of the form `Value <Operator> Value`.
    ///
    /// Both operands must have the same type:
    /// - Numbers compare numerically.
    /// - Strings order by **length** (in characters) for `LESSTHAN`,
    ///   `MORETHAN`, `LESSEQUALS` and `MOREEQUALS`, while `SAMEAS` and
    ///   `NOTSAMEAS` compare the text itself.
    /// - Booleans order `false` before `true`.
    ///
    /// # Parameters
    /// - `op`: The comparison operator.
    /// - `left`: The left-hand value.
    /// - `right`: The right-hand value.
    /// - `span`: Span of the whole comparison.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing a Boolean.
    ///
    /// # Example
    /// ```
    /// use engscript::{
    ///     ast::ComparisonOperator,
    ///     interpreter::{evaluator::core::Evaluator, position::Span, value::core::Value},
    /// };
    ///
    /// let span = Span::default();
    /// let shorter = Evaluator::eval_comparison(ComparisonOperator::LessThan,
    ///                                          &Value::from("ab"),
    ///                                          &Value::from("abc"),
    ///                                          span);
    /// assert_eq!(shorter.unwrap(), Value::Boolean(true));
    ///
    /// let same = Evaluator::eval_comparison(ComparisonOperator::SameAs,
    ///                                       &Value::from("ab"),
    ///                                       &Value::from("ba"),
    ///                                       span);
    /// assert_eq!(same.unwrap(), Value::Boolean(false));
    /// ```
    pub fn eval_comparison(op: ComparisonOperator,
                           left: &Value,
                           right: &Value,
                           span: Span)
                           -> EvalResult<Value> {
        use ComparisonOperator::{NotSameAs, SameAs};

        let ordering = match (left, right) {
            (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
            (Value::String(a), Value::String(b)) => match op {
                SameAs => return Ok(Value::Boolean(a == b)),
                NotSameAs => return Ok(Value::Boolean(a != b)),
                _ => Some(a.chars().count().cmp(&b.chars().count())),
            },
            (Value::Boolean(a), Value::Boolean(b)) => Some(a.cmp(b)),
            _ => {
                return Err(RuntimeError::ComparisonMismatch { left: left.type_name(),
                                                              right: right.type_name(),
                                                              span });
            },
        };

        Ok(Value::Boolean(ordering_result(op, ordering)))
    }
}
