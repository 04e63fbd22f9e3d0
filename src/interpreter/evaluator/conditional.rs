use crate::{
    ast::{Branch, ElseBranch},
    interpreter::evaluator::{
        core::{Completion, EvalResult, Evaluator},
        environment::Environment,
    },
};

impl Evaluator<'_> {
    /// Evaluates an `IF` chain.
    ///
    /// The `IF` condition is evaluated first; if it is true its body runs and
    /// the chain stops. Otherwise each `ELSEIF` condition is tried in order and
    /// the first true one runs. If none matched, the `ELSE` body runs when
    /// present. Conditions must be Booleans.
    ///
    /// # Returns
    /// The completion of the body that ran, `Empty` if none ran. A `BREAK`
    /// inside the body is passed on to the enclosing loop.
    pub fn eval_conditional(&mut self,
                            if_branch: &Branch,
                            elseif_branches: &[Branch],
                            else_branch: Option<&ElseBranch>,
                            env: &mut Environment)
                            -> EvalResult<Completion> {
        for branch in std::iter::once(if_branch).chain(elseif_branches) {
            let condition = self.eval_value(&branch.condition, env)?;
            if condition.as_condition(branch.condition.span)? {
                return self.run_body(&branch.body, env);
            }
        }

        match else_branch {
            Some(branch) => self.run_body(&branch.body, env),
            None => Ok(Completion::Empty),
        }
    }
}
