use crate::{
    ast::{BinaryOperator, ComparisonOperator, Node, NodeKind, StringOperator, UnaryOperator},
    interpreter::{
        evaluator::{
            core::{EvalResult, Evaluator},
            environment::Environment,
        },
        position::Span,
        value::core::Value,
    },
};

/// One operator waiting for its inner operand, with the span of its node.
enum Pending<'n> {
    Arithmetic(BinaryOperator, &'n Node, Span),
    String(StringOperator, &'n Node, Span),
    Comparison(ComparisonOperator, &'n Node, Span),
    Unary(UnaryOperator, Span),
    Length(Span),
}

impl Evaluator<'_> {
    /// Evaluates a run of operator nodes without a call frame per operator.
    ///
    /// Binary operators are followed down their left operand and prefix
    /// operators down their only operand, collecting each into a stack. The
    /// innermost operand is evaluated first, then the operators are applied
    /// from the inside out. Right operands are evaluated when their operator
    /// is applied, so evaluation order and the first error reported are the
    /// same as for a plain recursive walk.
    ///
    /// Right operands recurse, but the parser bounds that depth by the
    /// nesting limit.
    ///
    /// # Parameters
    /// - `node`: An operator node.
    /// - `env`: The variable table.
    ///
    /// # Returns
    /// The value of the whole chain.
    pub fn eval_chain(&mut self, node: &Node, env: &mut Environment) -> EvalResult<Value> {
        let mut pending = Vec::new();
        let mut current = node;
        loop {
            let (step, inner) = match &current.kind {
                NodeKind::BinaryOp { left, op, right } => {
                    (Pending::Arithmetic(*op, right, current.span), &**left)
                },
                NodeKind::StringOp { left, op, right } => {
                    (Pending::String(*op, right, current.span), &**left)
                },
                NodeKind::ComparisonOp { left, op, right } => {
                    (Pending::Comparison(*op, right, current.span), &**left)
                },
                NodeKind::UnaryOp { op, operand } => (Pending::Unary(*op, current.span), &**operand),
                NodeKind::StringLength(operand) => (Pending::Length(current.span), &**operand),
                _ => break,
            };
            pending.push(step);
            current = inner;
        }

        let mut value = self.eval_value(current, env)?;
        while let Some(step) = pending.pop() {
            value = match step {
                Pending::Arithmetic(op, right, span) => {
                    let r = self.eval_value(right, env)?;
                    Self::eval_arithmetic(op, &value, &r, right.span, span)?
                },
                Pending::String(op, right, span) => {
                    let r = self.eval_value(right, env)?;
                    Self::eval_string_op(op, &value, &r, right.span, span)?
                },
                Pending::Comparison(op, right, span) => {
                    let r = self.eval_value(right, env)?;
                    Self::eval_comparison(op, &value, &r, span)?
                },
                Pending::Unary(op, span) => Self::eval_unary(op, value, span)?,
                Pending::Length(span) => Self::eval_length(&value, span)?,
            };
        }
        Ok(value)
    }
}
