use std::iter::Peekable;

use crate::{
    ast::{Branch, ElseBranch, Node, NodeKind},
    error::SyntaxError,
    interpreter::{
        lexer::{Line, Token, TokenKind},
        parser::{
            core::{Nesting, ParseResult, parse_expression, parse_line},
            utils::{expect, expect_block, next_token, peek},
        },
    },
};

/// Parses the lines of a block into a statement list.
///
/// Each inner line is parsed on its own, exactly like a top-level line, with
/// a fresh nesting budget. An empty block gives an empty body.
pub fn parse_block(lines: &[Line], nesting: Nesting) -> ParseResult<Vec<Node>> {
    lines.iter()
         .map(|line| parse_line(line, nesting.limit()))
         .collect()
}

/// Parses an `IF` statement with its optional `ELSEIF` and `ELSE` clauses.
///
/// Syntax:
/// ```text
///     IF <condition> [ <body> ]
///     ELSEIF <condition> [ <body> ]
///     ELSE [ <body> ]
/// ```
/// All clauses belong to one logical line: an `ELSEIF` or `ELSE` must follow
/// the `]` of the previous clause on the same physical line.
///
/// # Parameters
/// - `tokens`: Token stream positioned at the `IF` keyword.
///
/// # Returns
/// A `Conditional` node spanning from `IF` to the last `]`.
pub fn parse_conditional<'a, I>(tokens: &mut Peekable<I>, nesting: Nesting) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let if_branch = parse_branch(tokens, nesting)?;

    let mut elseif_branches = Vec::new();
    while let Some(token) = peek(tokens)
          && token.kind == TokenKind::ElseIf
    {
        elseif_branches.push(parse_branch(tokens, nesting)?);
    }

    let else_branch = match peek(tokens) {
        Some(keyword) if keyword.kind == TokenKind::Else => {
            tokens.next();
            let (lines, span) = expect_block(tokens)?;
            Some(ElseBranch { body: parse_block(lines, nesting)?,
                              span: keyword.span.to(span), })
        },
        _ => None,
    };

    let end = else_branch.as_ref()
                         .map(|branch| branch.span)
                         .or_else(|| elseif_branches.last().map(|branch| branch.span))
                         .unwrap_or(if_branch.span);
    let span = if_branch.span.to(end);

    Ok(Node::new(NodeKind::Conditional { if_branch,
                                         elseif_branches,
                                         else_branch },
                 span))
}

/// Parses one `IF` or `ELSEIF` clause, keyword included.
fn parse_branch<'a, I>(tokens: &mut Peekable<I>, nesting: Nesting) -> ParseResult<Branch>
    where I: Iterator<Item = &'a Token> + Clone
{
    let keyword = next_token(tokens)?;
    let condition = parse_expression(tokens, nesting)?;
    let (lines, span) = expect_block(tokens)?;
    let body = parse_block(lines, nesting)?;

    Ok(Branch { condition: Box::new(condition),
                body,
                span: keyword.span.to(span) })
}

/// Parses a `FOR` loop.
///
/// Syntax:
/// ```text
///     FOR <identifier> FROM <expression> TO <expression> [ <body> ]
/// ```
/// The upper bound is exclusive.
///
/// # Errors
/// - `ExpectedLoopVariable` if `FOR` is not followed by an identifier.
/// - `ExpectedFrom` / `ExpectedTo` for a missing keyword.
/// - `ExpectedOpenBracket` if the body is missing.
pub fn parse_for_loop<'a, I>(tokens: &mut Peekable<I>, nesting: Nesting) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let keyword = next_token(tokens)?;

    let target = next_token(tokens)?;
    let TokenKind::Var(variable) = &target.kind else {
        return Err(SyntaxError::ExpectedLoopVariable { span: target.span });
    };

    expect(tokens, &TokenKind::From, |span| SyntaxError::ExpectedFrom { span })?;
    let from = parse_expression(tokens, nesting)?;
    expect(tokens, &TokenKind::To, |span| SyntaxError::ExpectedTo { span })?;
    let to = parse_expression(tokens, nesting)?;

    let (lines, span) = expect_block(tokens)?;
    let body = parse_block(lines, nesting)?;

    Ok(Node::new(NodeKind::ForLoop { variable: variable.clone(),
                                     from: Box::new(from),
                                     to: Box::new(to),
                                     body },
                 keyword.span.to(span)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::Error, interpreter::lexer::tokenize};

    fn parse(source: &str) -> Result<Node, Error> {
        let lines = tokenize(source, 64)?;
        Ok(parse_line(&lines[0], 64)?)
    }

    #[test]
    fn conditional_collects_every_clause() {
        let node = parse("IF a [ 1 ] ELSEIF b [ 2 ] ELSEIF c [ 3\n4 ] ELSE [ 5 ]").unwrap();
        let NodeKind::Conditional { if_branch,
                                    elseif_branches,
                                    else_branch, } = &node.kind
        else {
            panic!("expected a conditional");
        };
        assert_eq!(if_branch.body.len(), 1);
        assert_eq!(elseif_branches.len(), 2);
        assert_eq!(elseif_branches[1].body.len(), 2);
        assert!(else_branch.is_some());
    }

    #[test]
    fn multi_line_bodies_are_parsed_line_by_line() {
        let node = parse("FOR i FROM 0 TO 3 [\n  x EQUALS i\n\n  OUTPUT[ x ]\n]").unwrap();
        let NodeKind::ForLoop { variable, body, .. } = &node.kind else {
            panic!("expected a loop");
        };
        assert_eq!(variable, "i");
        assert_eq!(body.len(), 2);
        assert!(body[1].output);
        assert_eq!(body[1].span.start.line, 3);
    }

    #[test]
    fn empty_bodies_are_allowed() {
        let node = parse("IF 1 LESSTHAN 2 [ ]").unwrap();
        let NodeKind::Conditional { if_branch, .. } = &node.kind else {
            panic!("expected a conditional");
        };
        assert!(if_branch.body.is_empty());
    }

    #[test]
    fn for_loop_reports_missing_parts() {
        let cases = [("FOR 1 FROM 0 TO 2 [ ]", "Expected identifier after FOR"),
                     ("FOR i 0 TO 2 [ ]", "Expected FROM"),
                     ("FOR i FROM 0 2 [ ]", "Expected TO"),
                     ("FOR i FROM 0 TO 2", "Expected '['")];
        for (source, message) in cases {
            assert_eq!(parse(source).unwrap_err().to_string(), message, "{source}");
        }
    }

    #[test]
    fn conditional_without_body_is_rejected() {
        let err = parse("IF 1 LESSTHAN 2 OUTPUT[ 1 ]").unwrap_err();
        assert!(matches!(err, Error::Syntax(SyntaxError::ExpectedOpenBracket { .. })));
    }

    #[test]
    fn errors_in_bodies_keep_their_position() {
        let err = parse("IF x [\n  y EQUALS EQUALS\n]").unwrap_err();
        assert_eq!(err.span().start.line, 1);
        assert_eq!(err.span().start.column, 11);
    }
}
