/// Lexical errors.
///
/// Raised while turning source text into tokens: characters the language does
/// not recognise and numeric literals that cannot be represented.
pub mod lex_error;
/// Syntax errors.
///
/// Raised while lexing block structure and while parsing logical lines:
/// missing delimiters or keywords, malformed blocks, dangling branch keywords
/// and invalid operator mixing.
pub mod syntax_error;
/// Runtime errors.
///
/// Raised during evaluation: division by zero, undefined variables, type
/// mismatches between operands, and empty programs.
pub mod runtime_error;

pub use lex_error::LexError;
pub use runtime_error::RuntimeError;
pub use syntax_error::SyntaxError;

use crate::interpreter::position::Span;

/// Any error produced while running a program.
///
/// Every phase returns its own error type; this enum unifies them for the
/// driver so a single diagnostic can be rendered whatever failed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Lexical(#[from] LexError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// The label printed before the message, e.g. `Syntax error`.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Lexical(e) => e.kind(),
            Self::Syntax(_) => "Syntax error",
            Self::Runtime(_) => "Runtime error",
        }
    }

    /// The source range the error points at.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Lexical(e) => e.span(),
            Self::Syntax(e) => e.span(),
            Self::Runtime(e) => e.span(),
        }
    }

    /// Renders the error as a user-facing diagnostic.
    ///
    /// The format is `<kind>: <message>` followed by `File <name>, line <N>`.
    /// With `caret_indent` set, a line of carets underlining the error columns
    /// is printed first, shifted right by the indent (the width of a shell
    /// prompt, for instance).
    ///
    /// # Example
    /// ```
    /// use engscript::run;
    ///
    /// let error = run("OUTPUT[ 1 DIVIDE 0 ]").unwrap_err();
    /// assert_eq!(error.render("<doc>", None),
    ///            "Runtime error: Division by zero\nFile <doc>, line 1");
    /// ```
    #[must_use]
    pub fn render(&self, source_name: &str, caret_indent: Option<usize>) -> String {
        let span = self.span();
        let mut rendered = String::new();
        if let Some(indent) = caret_indent {
            rendered.push_str(&" ".repeat(indent + span.start.column));
            rendered.push_str(&"^".repeat(span.columns()));
            rendered.push('\n');
        }
        rendered.push_str(&format!("{}: {}\nFile {}, line {}",
                                   self.kind(),
                                   self,
                                   source_name,
                                   span.start.line + 1));
        rendered
    }
}
