/// Parser entry points.
///
/// Parses one logical line into a statement node and decides, by linear
/// lookahead, whether an operand uses the string chain or the arithmetic
/// chain.
pub mod core;

/// Statement parsing.
///
/// Dispatches on the first token of a line: assignments, `OUTPUT`, `BREAK`,
/// `IF`, `FOR` and bare expressions.
pub mod statement;

/// Block parsing.
///
/// Parses the bodies of `IF`/`ELSEIF`/`ELSE` and `FOR`, each a list of
/// independently parsed inner lines.
pub mod block;

/// Binary operator parsing.
///
/// Comparisons, the additive and multiplicative levels of the arithmetic
/// chain, and the `JOIN`/`MULTIPLY` string chain.
pub mod binary;

/// Unary operator and atom parsing.
///
/// Prefix `ADD`/`MINUS`, literals, variables, `LENGTH` and parenthesized
/// groups.
pub mod unary;

/// Utility functions for the parser.
///
/// Token lookahead and the `expect_*` helpers shared by the other parser
/// modules.
pub mod utils;
