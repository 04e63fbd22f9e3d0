use std::iter::Peekable;

use crate::{
    ast::{Node, NodeKind},
    error::SyntaxError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            block::{parse_conditional, parse_for_loop},
            core::{Nesting, ParseResult, parse_expression},
            utils::{expect_block, next_token, peek},
        },
    },
};

/// Parses a single statement.
///
/// The first token decides what the statement is:
/// - `VAR EQUALS ...`: an assignment.
/// - `IF`: a conditional with its `ELSEIF`/`ELSE` chain.
/// - `FOR`: a counted loop.
/// - `BREAK`: a loop exit.
/// - `OUTPUT`: a printed expression.
/// - anything else: an expression used as a statement, printed only in debug
///   mode.
///
/// # Errors
/// - `ExpectedEquals` for an identifier directly followed by an operand.
/// - `DanglingBranch` for a line starting with `ELSE` or `ELSEIF`.
/// - Any error of the construct being parsed.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>, nesting: Nesting) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let Some(token) = peek(tokens) else {
        return parse_expression(tokens, nesting);
    };

    match &token.kind {
        TokenKind::Var(_) => {
            let mut lookahead = tokens.clone();
            lookahead.next();
            match lookahead.peek() {
                Some(Token { kind: TokenKind::Equals,
                             .. }) => parse_assignment(tokens, nesting),
                Some(next) if starts_operand(&next.kind) => {
                    Err(SyntaxError::ExpectedEquals { span: next.span })
                },
                _ => parse_expression(tokens, nesting),
            }
        },
        TokenKind::If => parse_conditional(tokens, nesting),
        TokenKind::ElseIf => Err(SyntaxError::DanglingBranch { keyword: "ELSEIF",
                                                               span:    token.span, }),
        TokenKind::Else => Err(SyntaxError::DanglingBranch { keyword: "ELSE",
                                                             span:    token.span, }),
        TokenKind::For => parse_for_loop(tokens, nesting),
        TokenKind::Break => parse_break(tokens),
        TokenKind::Output => parse_output(tokens, nesting),
        _ => parse_expression(tokens, nesting),
    }
}

/// Parses `name EQUALS expression`.
///
/// The caller has already seen the identifier and the `EQUALS`. Whether the
/// right side is a string or arithmetic expression is left to the operand
/// lookahead.
fn parse_assignment<'a, I>(tokens: &mut Peekable<I>, nesting: Nesting) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let target = next_token(tokens)?;
    let TokenKind::Var(name) = &target.kind else {
        return Err(SyntaxError::InvalidSyntax { span: target.span });
    };
    tokens.next();

    let value = parse_expression(tokens, nesting)?;
    let span = target.span.to(value.span);
    Ok(Node::new(NodeKind::VarAssign { name:  name.clone(),
                                       value: Box::new(value), },
                 span))
}

/// Parses `BREAK`, which must be the only token on its line.
fn parse_break<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let keyword = next_token(tokens)?;
    match peek(tokens) {
        Some(next) if next.kind != TokenKind::Eof => {
            Err(SyntaxError::BreakNotAlone { span: next.span })
        },
        _ => Ok(Node::new(NodeKind::Break, keyword.span)),
    }
}

/// Parses `OUTPUT[ expression ]`.
///
/// The block must hold exactly one line, and that line must be an expression:
/// an `EQUALS` anywhere in it is rejected, so assignments cannot be printed.
/// The returned node is the expression itself with its output flag set.
///
/// # Errors
/// - `ExpectedOpenBracket` if no block follows `OUTPUT`.
/// - `OutputArity` for an empty block or one with several lines.
/// - `OutputAssignment` for an `EQUALS` inside the block.
fn parse_output<'a, I>(tokens: &mut Peekable<I>, nesting: Nesting) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let keyword = next_token(tokens)?;
    let (lines, span) = expect_block(tokens)?;

    let [line] = lines else {
        return Err(SyntaxError::OutputArity { span: keyword.span.to(span) });
    };

    if let Some(equals) = line.iter().find(|token| token.kind == TokenKind::Equals) {
        return Err(SyntaxError::OutputAssignment { span: equals.span });
    }

    let mut inner = line.iter().peekable();
    let mut node = parse_expression(&mut inner, nesting)?;
    if let Some(token) = peek(&mut inner)
       && token.kind != TokenKind::Eof
    {
        return Err(SyntaxError::InvalidSyntax { span: token.span });
    }

    node.output = true;
    Ok(node)
}

/// Returns `true` if `kind` can start an operand.
///
/// Used to tell `x 5` (a missing `EQUALS`) from `x ADD 5`.
const fn starts_operand(kind: &TokenKind) -> bool {
    matches!(kind,
             TokenKind::Int(_)
             | TokenKind::Float(_)
             | TokenKind::Str(_)
             | TokenKind::Var(_)
             | TokenKind::Length
             | TokenKind::LParen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ast::{BinaryOperator, StringOperator},
        error::Error,
        interpreter::{lexer::tokenize, parser::core::parse_line},
    };

    fn parse(source: &str) -> Result<Node, Error> {
        let lines = tokenize(source, 64)?;
        Ok(parse_line(&lines[0], 64)?)
    }

    fn syntax_error(source: &str) -> SyntaxError {
        match parse(source) {
            Err(Error::Syntax(e)) => e,
            other => panic!("expected a syntax error for {source:?}, got {other:?}"),
        }
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let node = parse("1 ADD 2 MULTIPLY 3").unwrap();
        let NodeKind::BinaryOp { op, right, .. } = &node.kind else {
            panic!("expected a binary node");
        };
        assert_eq!(*op, BinaryOperator::Add);
        assert!(matches!(right.kind,
                         NodeKind::BinaryOp { op: BinaryOperator::Multiply,
                                              .. }));
    }

    #[test]
    fn node_span_covers_children() {
        let node = parse("10 DIVIDE (4 MINUS 4)").unwrap();
        assert_eq!(node.span.start.column, 0);
        assert_eq!(node.span.end.column, 21);
        let NodeKind::BinaryOp { right, .. } = &node.kind else {
            panic!("expected a binary node");
        };
        assert_eq!(right.span.start.column, 10);
    }

    #[test]
    fn string_literal_selects_the_string_chain() {
        let node = parse("x EQUALS \"ab\" MULTIPLY 3").unwrap();
        let NodeKind::VarAssign { value, .. } = &node.kind else {
            panic!("expected an assignment");
        };
        assert!(matches!(value.kind,
                         NodeKind::StringOp { op: StringOperator::Repeat,
                                              .. }));
    }

    #[test]
    fn length_keeps_the_arithmetic_chain() {
        let node = parse("LENGTH \"abc\" ADD 1").unwrap();
        assert!(matches!(node.kind,
                         NodeKind::BinaryOp { op: BinaryOperator::Add,
                                              .. }));
    }

    #[test]
    fn output_sets_the_flag_on_the_expression() {
        let node = parse("OUTPUT[ 1 ADD 2 ]").unwrap();
        assert!(node.output);
        assert!(matches!(node.kind, NodeKind::BinaryOp { .. }));
    }

    #[test]
    fn identifier_followed_by_operand_expects_equals() {
        assert!(matches!(syntax_error("x 5"), SyntaxError::ExpectedEquals { .. }));
    }

    #[test]
    fn output_rejects_assignment() {
        assert!(matches!(syntax_error("OUTPUT[ x EQUALS 1 ]"),
                         SyntaxError::OutputAssignment { .. }));
    }

    #[test]
    fn output_requires_exactly_one_line() {
        assert!(matches!(syntax_error("OUTPUT[ ]"), SyntaxError::OutputArity { .. }));
        assert!(matches!(syntax_error("OUTPUT[ 1\n2 ]"), SyntaxError::OutputArity { .. }));
        assert!(matches!(syntax_error("OUTPUT 1"), SyntaxError::ExpectedOpenBracket { .. }));
    }

    #[test]
    fn dangling_else_is_rejected() {
        let err = syntax_error("ELSE [ OUTPUT[ 1 ] ]");
        assert_eq!(err.to_string(), "ELSE without a preceding IF");
    }

    #[test]
    fn chained_assignment_is_rejected() {
        assert!(matches!(syntax_error("x EQUALS y EQUALS 1"),
                         SyntaxError::AssignmentInExpression { .. }));
    }

    #[test]
    fn mixing_join_with_arithmetic_is_rejected() {
        assert!(matches!(syntax_error("\"a\" JOIN \"b\" ADD 1"),
                         SyntaxError::MixedOperators { .. }));
        assert!(matches!(syntax_error("1 ADD 2 JOIN \"x\""),
                         SyntaxError::MixedOperators { .. }));
    }

    #[test]
    fn break_must_stand_alone() {
        assert!(matches!(syntax_error("BREAK 1"), SyntaxError::BreakNotAlone { .. }));
        assert!(matches!(parse("BREAK").unwrap().kind, NodeKind::Break));
    }

    #[test]
    fn trailing_tokens_are_invalid() {
        assert!(matches!(syntax_error("1 2"), SyntaxError::InvalidSyntax { .. }));
        assert!(matches!(syntax_error("1 )"), SyntaxError::InvalidSyntax { .. }));
    }

    #[test]
    fn missing_operand_and_paren() {
        assert!(matches!(syntax_error("1 ADD"), SyntaxError::UnexpectedEndOfLine { .. }));
        assert!(matches!(syntax_error("(1 ADD 2"), SyntaxError::ExpectedClosingParen { .. }));
        assert!(matches!(syntax_error("x EQUALS [ 1 ]"), SyntaxError::UnexpectedBlock { .. }));
    }

    #[test]
    fn long_chains_parse_without_deep_recursion() {
        let source = format!("{}1", "- ".repeat(100_000));
        assert!(matches!(parse(&source).unwrap().kind, NodeKind::UnaryOp { .. }));

        let source = format!("x EQUALS 1{}", " ADD 1".repeat(100_000));
        assert!(matches!(parse(&source).unwrap().kind, NodeKind::VarAssign { .. }));
    }

    #[test]
    fn groups_and_length_share_the_nesting_limit() {
        let lines = tokenize("LENGTH (LENGTH (\"a\"))", 64).unwrap();
        assert!(parse_line(&lines[0], 4).is_ok());
        let err = parse_line(&lines[0], 3).unwrap_err();
        assert!(matches!(err, SyntaxError::NestingTooDeep { limit: 3, .. }));
        assert_eq!(err.span().start.column, 15);
    }
}
