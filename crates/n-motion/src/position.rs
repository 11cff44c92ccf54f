//! Cursor position type.
//!
//! All coordinates are **0-indexed**. Row 0 is the first line of the buffer,
//! column 0 is the first character. Columns count Unicode scalar values
//! (chars), not bytes, which matches how `ropey` indexes the buffer.
//!
//! Display layers (the replay transcript, a status line) convert to 1-indexed
//! for the user — that conversion never belongs here.

use std::fmt;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A cursor position in a buffer: (row, column), both 0-indexed.
///
/// Positions are plain values. Whether a position is valid for a particular
/// buffer is decided by whoever applies it — marks, for example, are stored
/// verbatim and only reinterpreted when jumped to.
///
/// # Ordering
///
/// Positions are ordered lexicographically: row first, then column, so
/// `Position { row: 0, col: 5 }` < `Position { row: 1, col: 0 }`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// The origin — row 0, column 0.
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Create a new position.
    #[inline]
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The same row with a different column.
    #[inline]
    #[must_use]
    pub const fn with_col(self, col: usize) -> Self {
        Self { row: self.row, col }
    }
}

// Natural ordering: row first, then column.
impl Ord for Position {
    #[inline]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl PartialOrd for Position {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pos({}:{})", self.row, self.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 1-indexed for human display, matching Vim's `line:col` status.
        write!(f, "{}:{}", self.row + 1, self.col + 1)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
