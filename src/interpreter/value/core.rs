use std::fmt;

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, position::Span},
    util::num::format_number,
};

/// Represents a runtime value in the interpreter.
///
/// Literals, assignments and operators all produce one of these. There is no
/// separate integer type: `INT` and `FLOAT` literals both become `Number`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A numeric value (double precision floating-point).
    Number(f64),
    /// A string of text.
    String(String),
    /// A boolean value. Produced only by comparison operators and used as the
    /// condition of `IF` and `ELSEIF` clauses.
    Boolean(bool),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl Value {
    /// The name of the value's type, as used in diagnostics.
    ///
    /// # Example
    /// ```
    /// use engscript::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::from(1.0).type_name(), "Number");
    /// assert_eq!(Value::from("a").type_name(), "String");
    /// assert_eq!(Value::from(true).type_name(), "Boolean");
    /// ```
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "Number",
            Self::String(_) => "String",
            Self::Boolean(_) => "Boolean",
        }
    }

    /// Converts the value to an `f64`, or returns an error if not numeric.
    ///
    /// # Parameters
    /// - `span`: Source range of the expression that produced the value.
    ///
    /// # Returns
    /// - `Ok(f64)`: If the value is a Number.
    /// - `Err(RuntimeError::ExpectedNumber)`: Otherwise.
    pub const fn as_number(&self, span: Span) -> EvalResult<f64> {
        match self {
            Self::Number(n) => Ok(*n),
            other => Err(RuntimeError::ExpectedNumber { found: other.type_name(),
                                                        span }),
        }
    }

    /// Converts the value to `bool`, or returns an error if not boolean.
    ///
    /// Used for the conditions of `IF` and `ELSEIF` clauses.
    pub const fn as_condition(&self, span: Span) -> EvalResult<bool> {
        match self {
            Self::Boolean(b) => Ok(*b),
            other => Err(RuntimeError::ConditionNotBoolean { found: other.type_name(),
                                                             span }),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::String(s) => f.write_str(s),
            Self::Boolean(b) => write!(f, "{b}"),
        }
    }
}
