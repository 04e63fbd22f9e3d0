use std::iter::Peekable;

use crate::{
    error::SyntaxError,
    interpreter::{
        lexer::{Line, Token, TokenKind},
        parser::core::ParseResult,
        position::Span,
    },
};

/// Returns the next token without consuming it.
///
/// The returned reference borrows the line, not the iterator, so the caller
/// may keep it while advancing.
pub(in crate::interpreter::parser) fn peek<'a, I>(tokens: &mut Peekable<I>) -> Option<&'a Token>
    where I: Iterator<Item = &'a Token>
{
    tokens.peek().copied()
}

/// Consumes the next token.
///
/// # Errors
/// `UnexpectedEndOfLine` if the line is exhausted.
pub(in crate::interpreter::parser) fn next_token<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<&'a Token>
    where I: Iterator<Item = &'a Token>
{
    tokens.next()
          .ok_or(SyntaxError::UnexpectedEndOfLine { span: Span::default() })
}

/// Consumes the next token if it has the `expected` kind.
///
/// # Parameters
/// - `tokens`: Token iterator.
/// - `expected`: The kind required next.
/// - `error`: Builds the error from the span of the token found instead.
///
/// # Returns
/// The consumed token.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    expected: &TokenKind,
                                                    error: impl FnOnce(Span) -> SyntaxError)
                                                    -> ParseResult<&'a Token>
    where I: Iterator<Item = &'a Token>
{
    let token = next_token(tokens)?;
    if &token.kind == expected {
        Ok(token)
    } else {
        Err(error(token.span))
    }
}

/// Consumes a `[`, block, `]` triple.
///
/// # Returns
/// The lines of the block and the span from `[` to `]`.
///
/// # Errors
/// - `ExpectedOpenBracket` if the next token is not `[`.
/// - `ExpectedClosingBracket` if the block is not closed.
pub(in crate::interpreter::parser) fn expect_block<'a, I>(tokens: &mut Peekable<I>)
                                                          -> ParseResult<(&'a [Line], Span)>
    where I: Iterator<Item = &'a Token>
{
    let open = expect(tokens, &TokenKind::LSBrack, |span| {
                   SyntaxError::ExpectedOpenBracket { span }
               })?;

    let lines = match next_token(tokens)? {
        Token { kind: TokenKind::Block(lines),
                .. } => lines.as_slice(),
        _ => return Err(SyntaxError::ExpectedClosingBracket { span: open.span }),
    };

    let close = expect(tokens, &TokenKind::RSBrack, |_| {
                    SyntaxError::ExpectedClosingBracket { span: open.span }
                })?;

    Ok((lines, open.span.to(close.span)))
}

/// Consumes the `)` closing a group.
///
/// # Returns
/// The span of the `)`.
///
/// # Errors
/// `ExpectedClosingParen` pointing at the token found instead.
pub(in crate::interpreter::parser) fn expect_closing_paren<'a, I>(tokens: &mut Peekable<I>)
                                                                  -> ParseResult<Span>
    where I: Iterator<Item = &'a Token>
{
    expect(tokens, &TokenKind::RParen, |span| SyntaxError::ExpectedClosingParen { span })
        .map(|token| token.span)
}
