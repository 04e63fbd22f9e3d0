use std::iter::Peekable;

use crate::{
    ast::{Node, NodeKind, UnaryOperator},
    error::SyntaxError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            binary::{parse_comparison, parse_string_chain},
            core::{Nesting, ParseResult},
            utils::{expect_closing_paren, next_token, peek},
        },
    },
    util::num::i64_to_f64_checked,
};

/// Parses a unary expression.
///
/// Supports the prefix operators `ADD` (pass-through) and `MINUS` or `-`
/// (negation). Prefixes are collected in a loop and applied innermost first,
/// so `MINUS - 1` is `-(-(1))` without one call frame per prefix.
///
/// Grammar:
/// ```text
///     unary := ("ADD" | "MINUS")* atom
/// ```
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
/// - `nesting`: Room left for groups and `LENGTH` operands.
///
/// # Returns
/// A `UnaryOp` chain around the atom, or the atom itself.
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>, nesting: Nesting) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut prefixes = Vec::new();
    while let Some(token) = peek(tokens) {
        let op = match token.kind {
            TokenKind::Add => UnaryOperator::Plus,
            TokenKind::Minus => UnaryOperator::Negate,
            _ => break,
        };
        tokens.next();
        prefixes.push((op, token.span));
    }

    let mut node = parse_atom(tokens, nesting)?;
    for (op, span) in prefixes.into_iter().rev() {
        node = Node::unary(op, span, node);
    }
    Ok(node)
}

/// Parses an atom: the operands the operator chains are built from.
///
/// Grammar (simplified):
/// ```text
///     atom := INT | FLOAT | STRING | VAR
///           | "LENGTH" string_chain
///           | "(" comparison ")"
/// ```
/// A parenthesized group keeps its inner node, widened to cover the
/// parentheses. The string-chain lookahead is run again inside the group.
///
/// # Errors
/// - `NestingTooDeep` if a group or `LENGTH` operand goes past the limit.
/// - `UnexpectedBlock` for a `[` or block in operand position.
/// - `UnexpectedEndOfLine` if the line ends where an operand is required.
/// - `InvalidSyntax` for any other token.
pub(crate) fn parse_atom<'a, I>(tokens: &mut Peekable<I>, nesting: Nesting) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let token = next_token(tokens)?;
    let span = token.span;

    match &token.kind {
        TokenKind::Int(n) => {
            let value = i64_to_f64_checked(*n, SyntaxError::InvalidSyntax { span })?;
            Ok(Node::new(NodeKind::NumberLiteral(value), span))
        },
        TokenKind::Float(x) => Ok(Node::new(NodeKind::NumberLiteral(*x), span)),
        TokenKind::Str(s) => Ok(Node::new(NodeKind::StringLiteral(s.clone()), span)),
        TokenKind::Var(name) => Ok(Node::new(NodeKind::VarRef(name.clone()), span)),
        TokenKind::Length => {
            let operand = parse_string_chain(tokens, nesting.enter(span)?)?;
            let span = span.to(operand.span);
            Ok(Node::new(NodeKind::StringLength(Box::new(operand)), span))
        },
        TokenKind::LParen => {
            let mut inner = parse_comparison(tokens, nesting.enter(span)?)?;
            inner.span = span.to(expect_closing_paren(tokens)?);
            Ok(inner)
        },
        TokenKind::LSBrack | TokenKind::Block(_) => Err(SyntaxError::UnexpectedBlock { span }),
        TokenKind::Eof => Err(SyntaxError::UnexpectedEndOfLine { span }),
        _ => Err(SyntaxError::InvalidSyntax { span }),
    }
}
