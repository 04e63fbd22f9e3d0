/// Source positions and spans.
///
/// Every token, node and error carries a span so diagnostics can point back
/// at the program text.
pub mod position;
/// The lexer module turns source text into logical lines of tokens.
///
/// The lexer reads the raw program text and produces one token list per
/// logical line. Bracketed blocks are lexed recursively into nested lines, so
/// the parser receives `IF` and `FOR` bodies already split into statements.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with source spans.
/// - Handles numeric and string literals, identifiers, and keywords.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module builds the syntax tree from logical lines.
///
/// Each logical line is parsed on its own into one statement node. Block
/// bodies are parsed line by line, exactly like the top level.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes.
/// - Picks the string or arithmetic operator chain for each operand.
/// - Validates the grammar, reporting errors with their spans.
pub mod parser;
/// The evaluator module executes statement nodes.
///
/// The evaluator walks the tree, applies operators, reads and writes the
/// variable table and sends the values of printing statements to an output
/// sink.
///
/// # Responsibilities
/// - Evaluates every node kind.
/// - Runs `IF` chains and `FOR` loops, including `BREAK`.
/// - Reports runtime errors such as division by zero or type mismatches.
pub mod evaluator;
/// The value module defines the runtime data types for evaluation.
pub mod value;
