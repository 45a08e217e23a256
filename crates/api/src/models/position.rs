use serde::{Deserialize, Serialize};
use std::fmt;

/// A cursor location. Both fields are 1-based; `column` counts bytes.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Source span of a node. Lines and columns are 1-based and the end column
/// points one past the last byte, so a cursor sitting right after a token is
/// still inside it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
}

impl Range {
    pub fn new(start_line: usize, start_col: usize, end_line: usize, end_col: usize) -> Self {
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    pub fn start(&self) -> Position {
        Position::new(self.start_line, self.start_col)
    }

    pub fn end(&self) -> Position {
        Position::new(self.end_line, self.end_col)
    }

    pub fn is_single_line(&self) -> bool {
        self.start_line == self.end_line
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.contains_with_leeway(pos, 0)
    }

    /// Containment where the start column is widened by `leeway` bytes.
    /// Columns are only compared on the boundary lines of multi-line spans.
    pub fn contains_with_leeway(&self, pos: Position, leeway: usize) -> bool {
        if pos.line < self.start_line || pos.line > self.end_line {
            return false;
        }
        if pos.line == self.start_line && pos.column + leeway < self.start_col {
            return false;
        }
        if pos.line == self.end_line && pos.column > self.end_col {
            return false;
        }
        true
    }

    pub fn covers(&self, other: &Range) -> bool {
        self.start() <= other.start() && other.end() <= self.end()
    }

    /// Smallest range spanning both.
    pub fn merge(&self, other: &Range) -> Range {
        let start = self.start().min(other.start());
        let end = self.end().max(other.end());
        Range::new(start.line, start.column, end.line, end.column)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.start_line, self.start_col, self.end_line, self.end_col
        )
    }
}
