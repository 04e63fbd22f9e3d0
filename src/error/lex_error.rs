use crate::interpreter::position::Span;

/// Represents all errors that can occur while tokenizing source text.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexError {
    /// A character that starts no token.
    #[error("'{character}'")]
    IllegalCharacter {
        /// The offending character.
        character: char,
        /// One column wide, at the character.
        span:      Span,
    },
    /// An integer literal that does not fit the number type exactly.
    #[error("Literal {literal} is too large")]
    LiteralTooLarge {
        /// The literal as written.
        literal: String,
        /// The full literal.
        span:    Span,
    },
}

impl LexError {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::IllegalCharacter { .. } => "Illegal character",
            Self::LiteralTooLarge { .. } => "Lexical error",
        }
    }

    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::IllegalCharacter { span, .. } | Self::LiteralTooLarge { span, .. } => *span,
        }
    }
}
