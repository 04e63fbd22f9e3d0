use tracing::trace;

use crate::{
    ast::{Node, NodeKind},
    error::RuntimeError,
    interpreter::{
        evaluator::environment::Environment, position::Span, value::core::Value,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Receives the values of printing statements, in execution order.
pub trait Output {
    fn emit(&mut self, value: &Value);
}

impl Output for Vec<Value> {
    fn emit(&mut self, value: &Value) {
        self.push(value.clone());
    }
}

/// How the evaluation of a node ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// The node produced a value.
    Value(Value),
    /// A `BREAK` at the given span is unwinding to the enclosing loop.
    Break(Span),
    /// The node produced nothing, e.g. an `IF` whose branches were all
    /// skipped.
    Empty,
}

/// The result of evaluating one node: how it completed and whether its value
/// is to be printed when it runs as a statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub completion: Completion,
    pub print:      bool,
}

impl Outcome {
    #[must_use]
    pub const fn new(completion: Completion, print: bool) -> Self {
        Self { completion, print }
    }

    /// The produced value, if any.
    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        match &self.completion {
            Completion::Value(value) => Some(value),
            _ => None,
        }
    }
}

/// Walks the syntax tree.
///
/// The evaluator itself holds no program state: the variable table is an
/// [`Environment`] passed into every call, so one evaluator can run statements
/// against any table. It carries the debug flag and the sink that receives
/// printed values.
pub struct Evaluator<'o> {
    debug:  bool,
    output: &'o mut dyn Output,
}

impl<'o> Evaluator<'o> {
    /// Creates an evaluator that prints into `output`.
    ///
    /// With `debug` set, every non-compound statement prints its value, not
    /// only those wrapped in `OUTPUT[...]`.
    pub fn new(debug: bool, output: &'o mut dyn Output) -> Self {
        Self { debug, output }
    }

    /// Evaluates a node.
    ///
    /// This is the main entry point for evaluation. It dispatches on the node
    /// kind; operands are evaluated left to right and the first error is
    /// returned. Operator nodes go through [`Evaluator::eval_chain`].
    ///
    /// # Parameters
    /// - `node`: Node to evaluate.
    /// - `env`: The variable table.
    ///
    /// # Returns
    /// The node's completion and its print flag.
    pub fn eval(&mut self, node: &Node, env: &mut Environment) -> EvalResult<Outcome> {
        let completion = match &node.kind {
            NodeKind::NumberLiteral(n) => Completion::Value(Value::Number(*n)),
            NodeKind::StringLiteral(s) => Completion::Value(Value::String(s.clone())),
            NodeKind::BinaryOp { .. }
            | NodeKind::StringOp { .. }
            | NodeKind::ComparisonOp { .. }
            | NodeKind::UnaryOp { .. }
            | NodeKind::StringLength(_) => Completion::Value(self.eval_chain(node, env)?),
            NodeKind::VarRef(name) => Completion::Value(Self::eval_variable(name, node.span, env)?),
            NodeKind::VarAssign { name, value } => {
                let value = self.eval_value(value, env)?;
                env.assign(name, value.clone());
                Completion::Value(value)
            },
            NodeKind::Conditional { if_branch,
                                    elseif_branches,
                                    else_branch, } => {
                self.eval_conditional(if_branch, elseif_branches, else_branch.as_ref(), env)?
            },
            NodeKind::ForLoop { variable,
                                from,
                                to,
                                body, } => self.eval_for(variable, from, to, body, node.span, env)?,
            NodeKind::Break => Completion::Break(node.span),
        };

        let print = node.output || (self.debug && !node.is_compound());
        Ok(Outcome::new(completion, print))
    }

    /// Evaluates a node that must produce a value.
    ///
    /// # Errors
    /// `MissingValue` if the node completed without one.
    pub fn eval_value(&mut self, node: &Node, env: &mut Environment) -> EvalResult<Value> {
        match self.eval(node, env)?.completion {
            Completion::Value(value) => Ok(value),
            Completion::Break(_) | Completion::Empty => {
                Err(RuntimeError::MissingValue { span: node.span })
            },
        }
    }

    /// Runs a node as a statement, printing its value when its print flag is
    /// set.
    ///
    /// Compound statements never print their own value; their inner
    /// statements are run through this method and print themselves.
    pub fn execute(&mut self, statement: &Node, env: &mut Environment) -> EvalResult<Outcome> {
        let outcome = self.eval(statement, env)?;
        if outcome.print
           && !statement.is_compound()
           && let Some(value) = outcome.value()
        {
            trace!(%value, line = statement.span.start.line, "emit");
            self.output.emit(value);
        }
        Ok(outcome)
    }

    /// Runs a body in order.
    ///
    /// A `BREAK` stops the body at once and is handed back to the caller,
    /// which passes it on until a loop consumes it.
    ///
    /// # Returns
    /// The completion of the last statement run, `Empty` for an empty body.
    pub fn run_body(&mut self, body: &[Node], env: &mut Environment) -> EvalResult<Completion> {
        let mut last = Completion::Empty;
        for statement in body {
            match self.execute(statement, env)?.completion {
                Completion::Break(span) => return Ok(Completion::Break(span)),
                completion => last = completion,
            }
        }
        Ok(last)
    }

    fn eval_variable(name: &str, span: Span, env: &Environment) -> EvalResult<Value> {
        env.get(name)
           .cloned()
           .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.to_string(),
                                                             span })
    }
}
