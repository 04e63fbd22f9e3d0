use crate::interpreter::position::Span;

/// Represents all errors that can occur during evaluation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuntimeError {
    /// The right operand of `DIVIDE` was zero. Points at that operand.
    #[error("Division by zero")]
    DivisionByZero { span: Span },
    /// Read of a variable that was never assigned.
    #[error("No variable with name {name} defined")]
    UndefinedVariable {
        /// The name of the variable.
        name: String,
        span: Span,
    },
    /// A comparison between values of different types.
    #[error("Cannot compare {left} and {right}")]
    ComparisonMismatch {
        /// Type name of the left operand.
        left:  &'static str,
        /// Type name of the right operand.
        right: &'static str,
        span:  Span,
    },
    /// A Boolean used as an arithmetic operand.
    #[error("Cannot perform binary operations on Boolean values")]
    BooleanArithmetic { span: Span },
    /// A String used with `ADD`, `MINUS` or `DIVIDE`, or negated.
    #[error("Cannot perform arithmetic on String values")]
    StringArithmetic { span: Span },
    /// `JOIN` with a non-String operand.
    #[error("You can only join strings together")]
    NonStringJoin { span: Span },
    /// The program held nothing but whitespace.
    #[error("No text found")]
    EmptyInput { span: Span },
    /// `LENGTH` applied to something other than a String.
    #[error("LENGTH expects a String, found {found}")]
    LengthOfNonString {
        /// Type name of the operand.
        found: &'static str,
        span:  Span,
    },
    /// String repetition by a fractional or non-finite count.
    #[error("Cannot repeat a string {count} times")]
    InvalidRepeatCount {
        /// The count as printed.
        count: String,
        span:  Span,
    },
    /// String repetition that would exceed the maximum string size.
    #[error("Repeated string would be too long")]
    StringTooLong { span: Span },
    /// An `IF` or `ELSEIF` condition that is not a Boolean.
    #[error("Condition must be a Boolean, found {found}")]
    ConditionNotBoolean {
        /// Type name of the condition value.
        found: &'static str,
        span:  Span,
    },
    /// A loop bound or induction variable that is not a Number.
    #[error("Expected a Number, found {found}")]
    ExpectedNumber {
        /// Type name of the value found.
        found: &'static str,
        span:  Span,
    },
    /// A loop variable so large that adding 1 no longer changes it.
    #[error("Loop variable {name} cannot count past {value}")]
    LoopCounterStuck {
        /// The name of the induction variable.
        name:  String,
        /// Its value as printed.
        value: String,
        span:  Span,
    },
    /// `BREAK` executed with no enclosing `FOR`.
    #[error("BREAK outside of a FOR loop")]
    BreakOutsideLoop { span: Span },
    /// A statement with no value used where a value was required.
    #[error("Statement produced no value")]
    MissingValue { span: Span },
}

impl RuntimeError {
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::DivisionByZero { span }
            | Self::UndefinedVariable { span, .. }
            | Self::ComparisonMismatch { span, .. }
            | Self::BooleanArithmetic { span }
            | Self::StringArithmetic { span }
            | Self::NonStringJoin { span }
            | Self::EmptyInput { span }
            | Self::LengthOfNonString { span, .. }
            | Self::InvalidRepeatCount { span, .. }
            | Self::StringTooLong { span }
            | Self::ConditionNotBoolean { span, .. }
            | Self::LoopCounterStuck { span, .. }
            | Self::ExpectedNumber { span, .. }
            | Self::BreakOutsideLoop { span }
            | Self::MissingValue { span } => *span,
        }
    }
}
