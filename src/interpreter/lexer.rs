use std::fmt;

use logos::Logos;
use tracing::trace;

use crate::{
    error::{Error, LexError, RuntimeError, SyntaxError},
    interpreter::position::{Position, Span},
    util::num::i64_to_f64_checked,
};

/// Result type used by the lexer. Lexing can fail with lexical errors,
/// syntax errors (unbalanced quotes or brackets) or an empty program.
pub type LexResult<T> = Result<T, Error>;

/// A logical line: the tokens of one statement, always ending in
/// [`TokenKind::Eof`].
pub type Line = Vec<Token>;

/// Represents the kind and payload of a lexical token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Integer literal, such as `42`.
    Int(i64),
    /// Float literal, such as `3.5` or `2.`.
    Float(f64),
    /// String literal with escapes decoded.
    Str(String),
    /// Identifier that is not a keyword.
    Var(String),
    /// `ADD`
    Add,
    /// `MINUS` or `-`
    Minus,
    /// `MULTIPLY`
    Multiply,
    /// `DIVIDE`
    Divide,
    /// `EQUALS`
    Equals,
    /// `JOIN`
    Join,
    /// `LENGTH`
    Length,
    /// `OUTPUT`
    Output,
    /// `LESSTHAN`
    LessThan,
    /// `MORETHAN`
    MoreThan,
    /// `LESSEQUALS`
    LessEquals,
    /// `MOREEQUALS`
    MoreEquals,
    /// `SAMEAS`
    SameAs,
    /// `NOTSAMEAS`
    NotSameAs,
    /// `IF`
    If,
    /// `ELSEIF`
    ElseIf,
    /// `ELSE`
    Else,
    /// `FOR`
    For,
    /// `FROM`
    From,
    /// `TO`
    To,
    /// `BREAK`
    Break,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LSBrack,
    /// `]`
    RSBrack,
    /// The lines between a `[` and its matching `]`, lexed on their own.
    Block(Vec<Line>),
    /// End of a logical line.
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "INT:{n}"),
            Self::Float(x) => write!(f, "FLOAT:{x}"),
            Self::Str(s) => write!(f, "STRING:\"{s}\""),
            Self::Var(name) => write!(f, "VAR:{name}"),
            Self::Block(lines) => write!(f, "BLOCK:{}", lines.len()),
            other => f.write_str(other.keyword().unwrap_or("?")),
        }
    }
}

impl TokenKind {
    /// The source spelling of keyword and punctuation tokens.
    #[must_use]
    pub const fn keyword(&self) -> Option<&'static str> {
        Some(match self {
                 Self::Add => "ADD",
                 Self::Minus => "MINUS",
                 Self::Multiply => "MULTIPLY",
                 Self::Divide => "DIVIDE",
                 Self::Equals => "EQUALS",
                 Self::Join => "JOIN",
                 Self::Length => "LENGTH",
                 Self::Output => "OUTPUT",
                 Self::LessThan => "LESSTHAN",
                 Self::MoreThan => "MORETHAN",
                 Self::LessEquals => "LESSEQUALS",
                 Self::MoreEquals => "MOREEQUALS",
                 Self::SameAs => "SAMEAS",
                 Self::NotSameAs => "NOTSAMEAS",
                 Self::If => "IF",
                 Self::ElseIf => "ELSEIF",
                 Self::Else => "ELSE",
                 Self::For => "FOR",
                 Self::From => "FROM",
                 Self::To => "TO",
                 Self::Break => "BREAK",
                 Self::LParen => "(",
                 Self::RParen => ")",
                 Self::LSBrack => "[",
                 Self::RSBrack => "]",
                 Self::Eof => "EOF",
                 Self::Int(_) | Self::Float(_) | Self::Str(_) | Self::Var(_) | Self::Block(_) => {
                     return None;
                 },
             })
    }
}

/// A token and the source range it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Why the raw lexer rejected a slice of input.
#[derive(Debug, Clone, Default, PartialEq)]
enum RawError {
    #[default]
    Unrecognised,
    LiteralTooLarge,
}

/// Character classes recognised directly from the input.
///
/// String literals and bracketed blocks are not matched here: the raw lexer
/// only reports their opening character and [`Lexer`] scans the rest, since
/// both need escape handling or depth counting.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(error = RawError)]
enum RawToken {
    #[regex(r"[0-9]+\.[0-9]*", parse_float)]
    Float(f64),
    #[regex(r"[0-9]+", parse_integer)]
    Int(i64),
    #[token("\"")]
    Quote,
    #[token("ADD")]
    Add,
    #[token("MINUS")]
    #[token("-")]
    Minus,
    #[token("MULTIPLY")]
    Multiply,
    #[token("DIVIDE")]
    Divide,
    #[token("EQUALS")]
    Equals,
    #[token("JOIN")]
    Join,
    #[token("LENGTH")]
    Length,
    #[token("OUTPUT")]
    Output,
    #[token("LESSTHAN")]
    LessThan,
    #[token("MORETHAN")]
    MoreThan,
    #[token("LESSEQUALS")]
    LessEquals,
    #[token("MOREEQUALS")]
    MoreEquals,
    #[token("SAMEAS")]
    SameAs,
    #[token("NOTSAMEAS")]
    NotSameAs,
    #[token("IF")]
    If,
    #[token("ELSEIF")]
    ElseIf,
    #[token("ELSE")]
    Else,
    #[token("FOR")]
    For,
    #[token("FROM")]
    From,
    #[token("TO")]
    To,
    #[token("BREAK")]
    Break,
    #[regex(r"[A-Za-z_]+", |lex| lex.slice().to_string())]
    Identifier(String),
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("\n")]
    NewLine,
    #[regex(r"[ \t\r]+", logos::skip)]
    Ignored,
}

fn parse_float(lex: &mut logos::Lexer<RawToken>) -> Result<f64, RawError> {
    lex.slice().parse().map_err(|_| RawError::Unrecognised)
}

fn parse_integer(lex: &mut logos::Lexer<RawToken>) -> Result<i64, RawError> {
    let value: i64 = lex.slice().parse().map_err(|_| RawError::LiteralTooLarge)?;
    i64_to_f64_checked(value, RawError::LiteralTooLarge)?;
    Ok(value)
}

impl RawToken {
    /// Maps a simple raw token to its public kind. Quotes and brackets are
    /// handled by the caller before this is reached.
    fn into_kind(self) -> TokenKind {
        match self {
            Self::Float(x) => TokenKind::Float(x),
            Self::Int(n) => TokenKind::Int(n),
            Self::Add => TokenKind::Add,
            Self::Minus => TokenKind::Minus,
            Self::Multiply => TokenKind::Multiply,
            Self::Divide => TokenKind::Divide,
            Self::Equals => TokenKind::Equals,
            Self::Join => TokenKind::Join,
            Self::Length => TokenKind::Length,
            Self::Output => TokenKind::Output,
            Self::LessThan => TokenKind::LessThan,
            Self::MoreThan => TokenKind::MoreThan,
            Self::LessEquals => TokenKind::LessEquals,
            Self::MoreEquals => TokenKind::MoreEquals,
            Self::SameAs => TokenKind::SameAs,
            Self::NotSameAs => TokenKind::NotSameAs,
            Self::If => TokenKind::If,
            Self::ElseIf => TokenKind::ElseIf,
            Self::Else => TokenKind::Else,
            Self::For => TokenKind::For,
            Self::From => TokenKind::From,
            Self::To => TokenKind::To,
            Self::Break => TokenKind::Break,
            Self::Identifier(name) => TokenKind::Var(name),
            Self::LParen => TokenKind::LParen,
            Self::RParen => TokenKind::RParen,
            Self::LBracket => TokenKind::LSBrack,
            Self::RBracket => TokenKind::RSBrack,
            Self::Quote | Self::NewLine | Self::Ignored => TokenKind::Eof,
        }
    }
}

/// Splits program text into logical lines.
///
/// Each `Lexer` covers one slice of the program: the whole text at the top
/// level, or the inside of one `[...]` block. It walks the raw tokens while
/// keeping an absolute [`Position`] cursor in step with them, so every token
/// span refers to the full program whatever slice produced it.
///
/// Block handoff: a nested lexer is seeded with the absolute position of the
/// first character after `[` and returns its lines together with its final
/// position; the outer lexer seeks its cursor there and consumes the `]`.
pub struct Lexer<'src> {
    /// Text covered by this lexer.
    source:      &'src str,
    /// Bytes of `source` the cursor has moved past.
    consumed:    usize,
    /// Absolute position of `source[consumed..]`.
    cursor:      Position,
    /// Number of enclosing blocks.
    depth:       usize,
    max_nesting: usize,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer for a whole program.
    #[must_use]
    pub const fn new(source: &'src str, max_nesting: usize) -> Self {
        Self::nested(source, Position::new(0, 0, 0), 0, max_nesting)
    }

    const fn nested(source: &'src str,
                    start: Position,
                    depth: usize,
                    max_nesting: usize)
                    -> Self {
        Self { source,
               consumed: 0,
               cursor: start,
               depth,
               max_nesting }
    }

    /// Lexes the covered text into logical lines.
    ///
    /// A newline outside brackets ends the current line; blank lines produce
    /// nothing. The last line is flushed at the end of the text even without
    /// a trailing newline.
    ///
    /// # Returns
    /// The lines and the position just past the covered text.
    ///
    /// # Errors
    /// Illegal characters, oversized literals, unterminated strings,
    /// unmatched `[` and excessive nesting.
    pub fn tokenize(mut self) -> LexResult<(Vec<Line>, Position)> {
        let mut raw = RawToken::lexer(self.source);
        let mut lines = Vec::new();
        let mut line = Line::new();
        let mut parens = 0usize;

        while let Some(result) = raw.next() {
            let range = raw.span();
            self.skip_to(range.start);
            let start = self.cursor;

            match result {
                Ok(RawToken::NewLine) => {
                    self.skip_to(range.end);
                    Self::flush(&mut lines, &mut line, Span::new(start, self.cursor));
                    parens = 0;
                },
                Ok(RawToken::Quote) => {
                    let Some((text, length)) = scan_string(&self.source[range.end..]) else {
                        let end = self.position_at(self.source.len());
                        return Err(SyntaxError::UnterminatedString { span: Span::new(start, end) }.into());
                    };
                    raw.bump(length);
                    self.skip_to(range.end + length);
                    line.push(Token::new(TokenKind::Str(text), Span::new(start, self.cursor)));
                },
                Ok(RawToken::LBracket) => {
                    self.skip_to(range.end);
                    let open = Span::new(start, self.cursor);
                    let consumed = self.extract_block(open, &mut line)?;
                    raw.bump(consumed);
                },
                Ok(RawToken::LParen) => {
                    self.skip_to(range.end);
                    parens += 1;
                    if parens > self.max_nesting {
                        return Err(SyntaxError::NestingTooDeep { limit: self.max_nesting,
                                                                 span:  Span::new(start,
                                                                                  self.cursor), }.into());
                    }
                    line.push(Token::new(TokenKind::LParen, Span::new(start, self.cursor)));
                },
                Ok(RawToken::RParen) => {
                    self.skip_to(range.end);
                    parens = parens.saturating_sub(1);
                    line.push(Token::new(TokenKind::RParen, Span::new(start, self.cursor)));
                },
                Ok(token) => {
                    self.skip_to(range.end);
                    line.push(Token::new(token.into_kind(), Span::new(start, self.cursor)));
                },
                Err(RawError::LiteralTooLarge) => {
                    self.skip_to(range.end);
                    return Err(LexError::LiteralTooLarge { literal: raw.slice().to_string(),
                                                           span:    Span::new(start, self.cursor), }.into());
                },
                Err(RawError::Unrecognised) => {
                    let character = self.source[range.start..].chars().next().unwrap_or_default();
                    return Err(LexError::IllegalCharacter { character,
                                                            span: Span::single(start, character) }.into());
                },
            }
        }

        self.skip_to(self.source.len());
        let end = self.cursor;
        Self::flush(&mut lines, &mut line, Span::new(end, end));
        Ok((lines, end))
    }

    /// Lexes the block opened by the `[` at `open` and appends the
    /// `[`, block and `]` tokens to `line`.
    ///
    /// # Returns
    /// The number of bytes consumed after the `[`, including the `]`.
    fn extract_block(&mut self, open: Span, line: &mut Line) -> LexResult<usize> {
        if self.depth + 1 > self.max_nesting {
            return Err(SyntaxError::NestingTooDeep { limit: self.max_nesting,
                                                     span:  open, }.into());
        }

        let rest = &self.source[self.consumed..];
        let close = match matching_bracket(rest) {
            Ok(close) => close,
            Err(Unclosed::Bracket) => {
                return Err(SyntaxError::ExpectedClosingBracket { span: open }.into());
            },
            Err(Unclosed::String(quote)) => {
                let start = self.position_at(self.consumed + quote);
                let end = self.position_at(self.source.len());
                return Err(SyntaxError::UnterminatedString { span: Span::new(start, end) }.into());
            },
        };

        trace!(depth = self.depth + 1, line = open.start.line, "lexing block");
        let inner = Lexer::nested(&rest[..close], self.cursor, self.depth + 1, self.max_nesting);
        let (lines, end) = inner.tokenize()?;

        let body = Span::new(self.cursor, end);
        self.seek(self.consumed + close, end);
        let close_start = self.cursor;
        self.skip_to(self.consumed + 1);

        line.push(Token::new(TokenKind::LSBrack, open));
        line.push(Token::new(TokenKind::Block(lines), body));
        line.push(Token::new(TokenKind::RSBrack, Span::new(close_start, self.cursor)));
        Ok(close + 1)
    }

    /// Appends the pending tokens as a finished line, terminated by `Eof`.
    fn flush(lines: &mut Vec<Line>, line: &mut Line, eof: Span) {
        if line.is_empty() {
            return;
        }
        let mut finished = std::mem::take(line);
        finished.push(Token::new(TokenKind::Eof, eof));
        lines.push(finished);
    }

    /// Moves the cursor forward, one character at a time, to byte `offset`
    /// of `source`.
    fn skip_to(&mut self, offset: usize) {
        if offset <= self.consumed {
            return;
        }
        for ch in self.source[self.consumed..offset].chars() {
            self.cursor.advance(ch);
        }
        self.consumed = offset;
    }

    /// Jumps to byte `offset` whose absolute position is already known.
    const fn seek(&mut self, offset: usize, position: Position) {
        self.consumed = offset;
        self.cursor = position;
    }

    /// The absolute position of byte `offset`, without moving the cursor.
    fn position_at(&self, offset: usize) -> Position {
        self.source[self.consumed..offset].chars()
                                          .fold(self.cursor, Position::advanced)
    }
}

/// Lexes a whole program.
///
/// # Errors
/// Any lexing error, or [`RuntimeError::EmptyInput`] when the program holds
/// nothing but whitespace.
///
/// # Example
/// ```
/// use engscript::interpreter::lexer::{TokenKind, tokenize};
///
/// let lines = tokenize("x EQUALS 1\n\nOUTPUT[ x ]\n", 64).unwrap();
/// assert_eq!(lines.len(), 2);
/// assert_eq!(lines[0][0].kind, TokenKind::Var("x".into()));
/// assert_eq!(lines[1].last().unwrap().kind, TokenKind::Eof);
/// ```
pub fn tokenize(source: &str, max_nesting: usize) -> LexResult<Vec<Line>> {
    let (lines, end) = Lexer::new(source, max_nesting).tokenize()?;
    if lines.is_empty() {
        return Err(RuntimeError::EmptyInput { span: Span::new(end, end) }.into());
    }
    Ok(lines)
}

/// Scans a string body that starts just after the opening quote.
///
/// # Returns
/// The decoded text and the number of bytes consumed including the closing
/// quote, or `None` when the quote is never closed.
fn scan_string(rest: &str) -> Option<(String, usize)> {
    let mut text = String::new();
    let mut chars = rest.char_indices();
    while let Some((i, ch)) = chars.next() {
        match ch {
            '"' => return Some((text, i + 1)),
            '\\' => match chars.next() {
                Some((_, 'n')) => text.push('\n'),
                Some((_, 't')) => text.push('\t'),
                Some((_, '"')) => text.push('"'),
                Some((_, '\\')) => text.push('\\'),
                Some((_, other)) => {
                    text.push('\\');
                    text.push(other);
                },
                None => return None,
            },
            _ => text.push(ch),
        }
    }
    None
}

/// What was still open when the text of a block ran out.
#[derive(Debug, PartialEq, Eq)]
enum Unclosed {
    Bracket,
    /// A string literal whose opening quote is at this byte offset.
    String(usize),
}

/// Finds the `]` matching an already consumed `[`.
///
/// Brackets inside string literals are ignored.
///
/// # Returns
/// The byte offset of the matching `]` within `text`.
fn matching_bracket(text: &str) -> Result<usize, Unclosed> {
    let mut depth = 0usize;
    let mut string_start = None;
    let mut escaped = false;
    for (i, ch) in text.char_indices() {
        if string_start.is_some() {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => string_start = None,
                _ => {},
            }
            continue;
        }
        match ch {
            '"' => string_start = Some(i),
            '[' => depth += 1,
            ']' if depth == 0 => return Ok(i),
            ']' => depth -= 1,
            _ => {},
        }
    }
    Err(string_start.map_or(Unclosed::Bracket, Unclosed::String))
}

/// Displays the tokens of a logical line separated by spaces, with the lines
/// of each block between braces.
///
/// # Example
/// ```
/// use engscript::interpreter::lexer::{LineDump, tokenize};
///
/// let lines = tokenize("OUTPUT[ x JOIN \"!\" ]", 64).unwrap();
/// assert_eq!(LineDump(&lines[0]).to_string(),
///            "OUTPUT [ {VAR:x JOIN STRING:\"!\" EOF} ] EOF");
/// ```
pub struct LineDump<'a>(pub &'a [Token]);

impl fmt::Display for LineDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match &token.kind {
                TokenKind::Block(lines) => {
                    f.write_str("{")?;
                    for (j, line) in lines.iter().enumerate() {
                        if j > 0 {
                            f.write_str("; ")?;
                        }
                        write!(f, "{}", LineDump(line))?;
                    }
                    f.write_str("}")?;
                },
                kind => write!(f, "{kind}")?,
            }
        }
        Ok(())
    }
}
