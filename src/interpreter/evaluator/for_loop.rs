use std::cmp::Ordering;

use tracing::trace;

use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Completion, EvalResult, Evaluator},
            environment::Environment,
        },
        position::Span,
        value::core::Value,
    },
    util::num::format_number,
};

impl Evaluator<'_> {
    /// Evaluates a `FOR` loop.
    ///
    /// Both bounds are evaluated once, before the first pass, and must be
    /// Numbers. The induction variable is bound to the start value in the
    /// shared table. Before each pass it is read back and compared with the
    /// exclusive upper bound; after each pass it is read back again and
    /// increased by exactly 1. Reading it back means assignments to it inside
    /// the body are observed. A reversed or empty range runs zero passes.
    ///
    /// Past 2^53 adding 1 to a Number leaves it unchanged, so a variable that
    /// large would never reach the bound; that is an error instead.
    ///
    /// A `BREAK` anywhere in the body, including inside a nested `IF`, ends
    /// the current pass at once and ends the loop.
    ///
    /// # Parameters
    /// - `variable`: Name of the induction variable.
    /// - `from`: Start expression.
    /// - `to`: End expression, exclusive.
    /// - `body`: Statements run on each pass.
    /// - `span`: Span of the whole loop.
    /// - `env`: The variable table.
    ///
    /// # Returns
    /// The completion of the last statement of the last full pass, or `Empty`
    /// if the loop did not run. The induction variable persists after the
    /// loop.
    ///
    /// # Example
    /// ```
    /// use engscript::run;
    ///
    /// let printed = run("FOR i FROM 0 TO 3 [ OUTPUT[ i ] ]\nOUTPUT[ i ]").unwrap();
    /// let printed: Vec<String> = printed.iter().map(ToString::to_string).collect();
    /// assert_eq!(printed, ["0", "1", "2", "3"]);
    /// ```
    pub fn eval_for(&mut self,
                    variable: &str,
                    from: &Node,
                    to: &Node,
                    body: &[Node],
                    span: Span,
                    env: &mut Environment)
                    -> EvalResult<Completion> {
        let start = self.eval_value(from, env)?.as_number(from.span)?;
        let end = self.eval_value(to, env)?.as_number(to.span)?;

        env.assign(variable, Value::Number(start));
        let mut last = Completion::Empty;

        loop {
            let current = Self::induction_value(variable, span, env)?;
            if current.partial_cmp(&end) != Some(Ordering::Less) {
                break;
            }

            trace!(variable, current, "loop pass");
            match self.run_body(body, env)? {
                Completion::Break(_) => break,
                completion => last = completion,
            }

            let current = Self::induction_value(variable, span, env)?;
            let next = current + 1.0;
            if next <= current {
                return Err(RuntimeError::LoopCounterStuck { name: variable.to_string(),
                                                            value: format_number(current),
                                                            span });
            }
            env.assign(variable, Value::Number(next));
        }

        Ok(last)
    }

    fn induction_value(variable: &str, span: Span, env: &Environment) -> EvalResult<f64> {
        env.get(variable)
           .ok_or_else(|| RuntimeError::UndefinedVariable { name: variable.to_string(),
                                                             span })?
           .as_number(span)
    }
}
