use crate::interpreter::position::Span;

/// Represents all errors that can occur while reading the structure of a
/// program: unbalanced delimiters found by the lexer and grammar violations
/// found by the parser.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SyntaxError {
    /// A string literal without its closing quote.
    #[error("Expected \"")]
    UnterminatedString { span: Span },
    /// An identifier at the start of a statement followed by a value.
    #[error("Expected EQUALS")]
    ExpectedEquals { span: Span },
    /// A `(` without its `)`.
    #[error("Expected ')'")]
    ExpectedClosingParen { span: Span },
    /// A block was required but something else came first.
    #[error("Expected '['")]
    ExpectedOpenBracket { span: Span },
    /// A `[` without its `]`.
    #[error("Expected ']'")]
    ExpectedClosingBracket { span: Span },
    /// `FOR` not followed by the loop variable.
    #[error("Expected identifier after FOR")]
    ExpectedLoopVariable { span: Span },
    /// The loop variable not followed by `FROM`.
    #[error("Expected FROM")]
    ExpectedFrom { span: Span },
    /// The start expression not followed by `TO`.
    #[error("Expected TO")]
    ExpectedTo { span: Span },
    /// `OUTPUT[ x EQUALS 1 ]`.
    #[error("Cannot output an assignment")]
    OutputAssignment { span: Span },
    /// `OUTPUT[ ]` with zero or several lines inside.
    #[error("OUTPUT takes a single expression")]
    OutputArity { span: Span },
    /// `ELSE` or `ELSEIF` starting a statement.
    #[error("{keyword} without a preceding IF")]
    DanglingBranch {
        /// The branch keyword as written.
        keyword: &'static str,
        span:    Span,
    },
    /// `EQUALS` inside an expression, e.g. `x EQUALS y EQUALS 1`.
    #[error("Cannot assign inside an expression")]
    AssignmentInExpression { span: Span },
    /// String operators and arithmetic operators in the same operand.
    #[error("Cannot mix string and arithmetic operators")]
    MixedOperators { span: Span },
    /// A block's lines where a single token was expected.
    #[error("Unexpected block")]
    UnexpectedBlock { span: Span },
    /// `BREAK` followed by more tokens.
    #[error("BREAK must stand alone")]
    BreakNotAlone { span: Span },
    /// A token that cannot start an operand, or trailing tokens.
    #[error("Invalid syntax")]
    InvalidSyntax { span: Span },
    /// The line ended where an operand was required.
    #[error("Unexpected end of line")]
    UnexpectedEndOfLine { span: Span },
    /// Brackets, parentheses or `LENGTH` operands nested deeper than the
    /// configured limit.
    #[error("Nesting is too deep (limit {limit})")]
    NestingTooDeep {
        /// The configured limit.
        limit: usize,
        span:  Span,
    },
}

impl SyntaxError {
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::UnterminatedString { span }
            | Self::ExpectedEquals { span }
            | Self::ExpectedClosingParen { span }
            | Self::ExpectedOpenBracket { span }
            | Self::ExpectedClosingBracket { span }
            | Self::ExpectedLoopVariable { span }
            | Self::ExpectedFrom { span }
            | Self::ExpectedTo { span }
            | Self::OutputAssignment { span }
            | Self::OutputArity { span }
            | Self::DanglingBranch { span, .. }
            | Self::AssignmentInExpression { span }
            | Self::MixedOperators { span }
            | Self::UnexpectedBlock { span }
            | Self::BreakNotAlone { span }
            | Self::InvalidSyntax { span }
            | Self::UnexpectedEndOfLine { span }
            | Self::NestingTooDeep { span, .. } => *span,
        }
    }
}
