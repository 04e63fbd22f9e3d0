use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, ComparisonOperator, Node, StringOperator},
    error::SyntaxError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::{Nesting, ParseResult, prefers_string_chain},
            unary::parse_unary,
            utils::peek,
        },
    },
};

/// Parses comparison expressions.
///
/// Comparisons are folded left to right, so `a LESSTHAN b SAMEAS c` compares
/// the Boolean result of the first comparison with `c`.
///
/// The rule is: `comparison := operand (cmp_op operand)*`
///
/// # Parameters
/// - `tokens`: Token stream positioned at the first operand.
///
/// # Returns
/// A `ComparisonOp` tree, or the single operand.
///
/// # Errors
/// `AssignmentInExpression` if an `EQUALS` follows the expression, as in
/// `x EQUALS y EQUALS 1`.
pub fn parse_comparison<'a, I>(tokens: &mut Peekable<I>, nesting: Nesting) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut left = parse_operand(tokens, nesting)?;

    while let Some(token) = peek(tokens)
          && let Some(op) = token_to_comparison_operator(&token.kind)
    {
        tokens.next();
        let right = parse_operand(tokens, nesting)?;
        left = Node::comparison(left, op, right);
    }

    if let Some(token) = peek(tokens)
       && token.kind == TokenKind::Equals
    {
        return Err(SyntaxError::AssignmentInExpression { span: token.span });
    }

    Ok(left)
}

/// Parses one side of a comparison with the chain the lookahead selects.
///
/// After the chain ends, an operator belonging to the other chain means the
/// operand mixes string and arithmetic operators.
fn parse_operand<'a, I>(tokens: &mut Peekable<I>, nesting: Nesting) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let string_chain = prefers_string_chain(tokens);
    let operand = if string_chain {
        parse_string_chain(tokens, nesting)?
    } else {
        parse_additive(tokens, nesting)?
    };

    if let Some(token) = peek(tokens) {
        let mixed = if string_chain {
            token_to_binary_operator(&token.kind).is_some()
        } else {
            token.kind == TokenKind::Join
        };
        if mixed {
            return Err(SyntaxError::MixedOperators { span: token.span });
        }
    }

    Ok(operand)
}

/// Parses addition and subtraction expressions.
///
/// The rule is: `additive := multiplicative (("ADD" | "MINUS") multiplicative)*`
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>, nesting: Nesting) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut left = parse_multiplicative(tokens, nesting)?;
    while let Some(token) = peek(tokens)
          && let Some(op) = token_to_binary_operator(&token.kind)
          && matches!(op, BinaryOperator::Add | BinaryOperator::Subtract)
    {
        tokens.next();
        let right = parse_multiplicative(tokens, nesting)?;
        left = Node::binary(left, op, right);
    }
    Ok(left)
}

/// Parses multiplication and division expressions.
///
/// The rule is: `multiplicative := unary (("MULTIPLY" | "DIVIDE") unary)*`
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>, nesting: Nesting) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut left = parse_unary(tokens, nesting)?;
    while let Some(token) = peek(tokens)
          && let Some(op) = token_to_binary_operator(&token.kind)
          && matches!(op, BinaryOperator::Multiply | BinaryOperator::Divide)
    {
        tokens.next();
        let right = parse_unary(tokens, nesting)?;
        left = Node::binary(left, op, right);
    }
    Ok(left)
}

/// Parses the string chain.
///
/// `JOIN` concatenates and `MULTIPLY` repeats; both share one precedence level
/// and associate to the left.
///
/// The rule is: `string_chain := unary (("JOIN" | "MULTIPLY") unary)*`
///
/// # Example
/// ```
/// use engscript::{
///     ast::{NodeKind, StringOperator},
///     interpreter::{
///         lexer::tokenize,
///         parser::{binary::parse_string_chain, core::Nesting},
///     },
/// };
///
/// let lines = tokenize("\"a\" JOIN \"b\" MULTIPLY 2", 64).unwrap();
/// let node = parse_string_chain(&mut lines[0].iter().peekable(), Nesting::new(64)).unwrap();
/// assert!(matches!(node.kind, NodeKind::StringOp { op: StringOperator::Repeat, .. }));
/// ```
pub fn parse_string_chain<'a, I>(tokens: &mut Peekable<I>, nesting: Nesting) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut left = parse_unary(tokens, nesting)?;
    while let Some(token) = peek(tokens)
          && let Some(op) = token_to_string_operator(&token.kind)
    {
        tokens.next();
        let right = parse_unary(tokens, nesting)?;
        left = Node::string_op(left, op, right);
    }
    Ok(left)
}

/// Maps a token to its arithmetic operator.
///
/// # Example
/// ```
/// use engscript::{
///     ast::BinaryOperator,
///     interpreter::{lexer::TokenKind, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&TokenKind::Minus),
///            Some(BinaryOperator::Subtract));
/// assert_eq!(token_to_binary_operator(&TokenKind::Join), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(kind: &TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Add => Some(BinaryOperator::Add),
        TokenKind::Minus => Some(BinaryOperator::Subtract),
        TokenKind::Multiply => Some(BinaryOperator::Multiply),
        TokenKind::Divide => Some(BinaryOperator::Divide),
        _ => None,
    }
}

/// Maps a token to its string-chain operator.
#[must_use]
pub const fn token_to_string_operator(kind: &TokenKind) -> Option<StringOperator> {
    match kind {
        TokenKind::Join => Some(StringOperator::Join),
        TokenKind::Multiply => Some(StringOperator::Repeat),
        _ => None,
    }
}

#[must_use]
pub const fn token_to_comparison_operator(kind: &TokenKind) -> Option<ComparisonOperator> {
    match kind {
        TokenKind::LessThan => Some(ComparisonOperator::LessThan),
        TokenKind::MoreThan => Some(ComparisonOperator::MoreThan),
        TokenKind::LessEquals => Some(ComparisonOperator::LessEquals),
        TokenKind::MoreEquals => Some(ComparisonOperator::MoreEquals),
        TokenKind::SameAs => Some(ComparisonOperator::SameAs),
        TokenKind::NotSameAs => Some(ComparisonOperator::NotSameAs),
        _ => None,
    }
}
