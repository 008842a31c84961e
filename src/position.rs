use std::fmt;

/// A cursor into the input.
///
/// `offset` counts code points consumed since the start of input, not bytes.
/// Lines and columns are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// The position before the first character of any input.
    pub fn origin() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Step over one consumed character.
    pub fn advance(self, was_newline: bool) -> Self {
        if was_newline {
            Self {
                offset: self.offset + 1,
                line: self.line + 1,
                column: 1,
            }
        } else {
            Self {
                offset: self.offset + 1,
                line: self.line,
                column: self.column + 1,
            }
        }
    }

    /// Step over `c`, treating `\n` as a line break.
    pub fn advance_over(self, c: char) -> Self {
        self.advance(c == '\n')
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::origin()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
