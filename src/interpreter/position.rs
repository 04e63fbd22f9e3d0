/// A cursor into the program text.
///
/// `index` is a byte offset into the whole program, `line` and `column` are
/// zero-based and counted in characters. Positions are copied into every token,
/// node and error so diagnostics can point back at the source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    /// Byte offset from the start of the program.
    pub index:  usize,
    /// Zero-based line number.
    pub line:   usize,
    /// Zero-based column, in characters.
    pub column: usize,
}

impl Position {
    /// Creates a position at the given coordinates.
    #[must_use]
    pub const fn new(index: usize, line: usize, column: usize) -> Self {
        Self { index,
               line,
               column }
    }

    /// Moves the cursor past `ch`.
    ///
    /// A newline starts the next line at column zero; every other character
    /// moves one column to the right.
    ///
    /// # Example
    /// ```
    /// use engscript::interpreter::position::Position;
    ///
    /// let mut pos = Position::default();
    /// pos.advance('a');
    /// assert_eq!(pos, Position::new(1, 0, 1));
    /// pos.advance('\n');
    /// assert_eq!(pos, Position::new(2, 1, 0));
    /// ```
    pub const fn advance(&mut self, ch: char) {
        self.index += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }

    /// Returns a copy of the position moved past `ch`.
    #[must_use]
    pub const fn advanced(mut self, ch: char) -> Self {
        self.advance(ch);
        self
    }
}

/// A half-open source range `[start, end)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Span {
    /// First position covered.
    pub start: Position,
    /// Position just past the last character covered.
    pub end:   Position,
}

impl Span {
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// A span covering the single character `ch` found at `start`.
    #[must_use]
    pub const fn single(start: Position, ch: char) -> Self {
        Self { start,
               end: start.advanced(ch) }
    }

    /// Joins two spans, from the start of `self` to the end of `other`.
    #[must_use]
    pub const fn to(self, other: Self) -> Self {
        Self { start: self.start,
               end:   other.end, }
    }

    /// Number of columns a caret underline should cover.
    ///
    /// Spans that cross a line boundary, and empty spans, are drawn as a single
    /// caret.
    #[must_use]
    pub const fn columns(&self) -> usize {
        if self.start.line == self.end.line && self.end.column > self.start.column {
            self.end.column - self.start.column
        } else {
            1
        }
    }
}
