use std::iter::Peekable;

use crate::{
    ast::Node,
    error::SyntaxError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{binary::parse_comparison, statement::parse_statement},
        position::Span,
    },
};

pub type ParseResult<T> = Result<T, SyntaxError>;

/// How many parenthesized groups and `LENGTH` operands the parser has entered
/// on the current line, and how many it may enter.
///
/// These are the only places where the expression parser calls itself, so
/// bounding them bounds the height of every tree outside the left-deep
/// operator chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nesting {
    depth: usize,
    limit: usize,
}

impl Nesting {
    #[must_use]
    pub const fn new(limit: usize) -> Self {
        Self { depth: 0,
               limit }
    }

    #[must_use]
    pub const fn limit(self) -> usize {
        self.limit
    }

    /// Goes one level deeper.
    ///
    /// # Errors
    /// `NestingTooDeep` at `span` once the limit is reached.
    pub fn enter(self, span: Span) -> ParseResult<Self> {
        if self.depth >= self.limit {
            return Err(SyntaxError::NestingTooDeep { limit: self.limit,
                                                     span });
        }
        Ok(Self { depth: self.depth + 1,
                  limit: self.limit })
    }
}

/// Parses one logical line into a statement node.
///
/// The line must hold exactly one statement followed by its `Eof` token;
/// anything left over is a syntax error.
///
/// # Parameters
/// - `line`: The tokens of one logical line, as produced by the lexer.
/// - `max_nesting`: How deep groups and `LENGTH` operands may nest.
///
/// # Returns
/// The statement node.
///
/// # Example
/// ```
/// use engscript::{
///     ast::NodeKind,
///     interpreter::{lexer::tokenize, parser::core::parse_line},
/// };
///
/// let lines = tokenize("x EQUALS 2 ADD 3", 64).unwrap();
/// let node = parse_line(&lines[0], 64).unwrap();
/// assert!(matches!(node.kind, NodeKind::VarAssign { .. }));
/// ```
pub fn parse_line(line: &[Token], max_nesting: usize) -> ParseResult<Node> {
    let mut tokens = line.iter().peekable();
    let node = parse_statement(&mut tokens, Nesting::new(max_nesting))?;

    match tokens.next() {
        Some(Token { kind: TokenKind::Eof,
                     .. })
        | None => Ok(node),
        Some(token) => Err(SyntaxError::InvalidSyntax { span: token.span }),
    }
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, comparison, and descends through the chains.
///
/// Grammar: `expression := comparison`
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>, nesting: Nesting) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    parse_comparison(tokens, nesting)
}

/// Decides whether the operand starting at the current token belongs to the
/// string chain.
///
/// Scans ahead without consuming anything, up to the end of the operand: the
/// first token at parenthesis depth zero that cannot continue it (a
/// comparison operator, a bracket, a block, `Eof`, `FROM`, `TO`, `ELSEIF`,
/// `ELSE`, `EQUALS`) or an unmatched `)`. The string chain is chosen when
/// that region holds a string literal or `JOIN` and no `LENGTH`.
///
/// # Example
/// ```
/// use engscript::interpreter::{lexer::tokenize, parser::core::prefers_string_chain};
///
/// let lines = tokenize("3 MULTIPLY \"ab\"", 64).unwrap();
/// assert!(prefers_string_chain(&lines[0].iter().peekable()));
///
/// let lines = tokenize("LENGTH \"ab\" ADD 1", 64).unwrap();
/// assert!(!prefers_string_chain(&lines[0].iter().peekable()));
/// ```
#[must_use]
pub fn prefers_string_chain<'a, I>(tokens: &Peekable<I>) -> bool
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut depth = 0usize;
    let mut has_string = false;

    for token in tokens.clone() {
        match &token.kind {
            TokenKind::LParen => depth += 1,
            TokenKind::RParen if depth == 0 => break,
            TokenKind::RParen => depth -= 1,
            TokenKind::LSBrack | TokenKind::RSBrack | TokenKind::Block(_) | TokenKind::Eof => {
                break;
            },
            kind if depth == 0 && ends_operand(kind) => break,
            TokenKind::Length => return false,
            TokenKind::Str(_) | TokenKind::Join => has_string = true,
            _ => {},
        }
    }

    has_string
}

const fn ends_operand(kind: &TokenKind) -> bool {
    matches!(kind,
             TokenKind::From
             | TokenKind::To
             | TokenKind::ElseIf
             | TokenKind::Else
             | TokenKind::Equals
             | TokenKind::LessThan
             | TokenKind::MoreThan
             | TokenKind::LessEquals
             | TokenKind::MoreEquals
             | TokenKind::SameAs
             | TokenKind::NotSameAs)
}
