//! Word motions — `w`, `e` and `b` over space-delimited words.
//!
//! | Motion                 | Vim key | Description                               |
//! |------------------------|---------|-------------------------------------------|
//! | [`next_word_start`]    | `w`     | Forward to the start of the next word     |
//! | [`word_end`]           | `e`     | Forward to the end of the current/next word |
//! | [`prev_word_start`]    | `b`     | Backward to the start of the previous word |
//!
//! # Words
//!
//! A word is a run of characters other than `' '`. There is a single
//! delimiter class: punctuation does not split words (`hello.world` is one
//! word) and tabs are ordinary characters.
//!
//! # Line crossing
//!
//! Each motion scans the current line first. As soon as the scan reaches the
//! edge of the line (the last column going forward, column 0 going back) the
//! motion moves to the adjacent row, even if the edge itself begins or ends a
//! word. Forward motions continue from the new row's first non-blank column;
//! `b` continues from its last column. An **empty** adjacent row stops the
//! motion on that row at column 0, so a paragraph break is never skipped.
//! On the first or last row there is nowhere to go and the motion stays at
//! the edge.
//!
//! The `*_in_line` variants have no neighbouring rows to move to. They clamp
//! within the line and return a plain column.

use crate::buffer::Buffer;
use crate::motion::first_non_blank_col;
use crate::position::Position;

// ---------------------------------------------------------------------------
// Line scans
// ---------------------------------------------------------------------------

/// Result of scanning one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    /// The scan stopped inside the line.
    Landed(usize),
    /// The scan reached the edge of the line. The column is where it stopped,
    /// used when there is no adjacent row to move to.
    AtEdge(usize),
}

impl Scan {
    const fn col(self) -> usize {
        match self {
            Self::Landed(col) | Self::AtEdge(col) => col,
        }
    }
}

/// `w` on one line: skip the rest of the current word, then the blanks after
/// it.
fn scan_next_word_start(col: usize, line: &[char]) -> Scan {
    let len = line.len();
    let mut c = col;
    while c + 1 < len && line[c] != ' ' {
        c += 1;
    }
    while c + 1 < len && line[c] == ' ' {
        c += 1;
    }
    if c + 1 >= len { Scan::AtEdge(c) } else { Scan::Landed(c) }
}

/// First half of `e`: step off the cursor, then skip blanks.
fn scan_to_next_word(col: usize, line: &[char]) -> Scan {
    let len = line.len();
    let mut c = col;
    if c + 1 < len {
        c += 1;
    }
    while c + 1 < len && line[c] == ' ' {
        c += 1;
    }
    if c + 1 >= len { Scan::AtEdge(c) } else { Scan::Landed(c) }
}

/// Second half of `e`: run to the last char before the next blank.
fn extend_to_word_end(col: usize, line: &[char]) -> usize {
    let mut c = col;
    while c + 1 < line.len() && line[c + 1] != ' ' {
        c += 1;
    }
    c
}

/// First half of `b`: step back off the cursor, then skip blanks.
fn scan_to_prev_word(col: usize, line: &[char]) -> Scan {
    let mut c = col.min(line.len().saturating_sub(1));
    c = c.saturating_sub(1);
    while c > 0 && line[c] == ' ' {
        c -= 1;
    }
    if c == 0 { Scan::AtEdge(0) } else { Scan::Landed(c) }
}

/// Second half of `b`: run back to the first char after a blank.
fn extend_to_word_start(col: usize, line: &[char]) -> usize {
    let mut c = col;
    while c > 0 && line[c - 1] != ' ' {
        c -= 1;
    }
    c
}

fn chars_of(buf: &Buffer, row: usize) -> Vec<char> {
    buf.line(row).map(|line| line.chars().collect()).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Single-line API
// ---------------------------------------------------------------------------

/// `w` within one line. Stops on the last column when no word follows.
#[must_use]
pub fn next_word_start_in_line(col: usize, line: &str) -> usize {
    let chars: Vec<char> = line.chars().collect();
    scan_next_word_start(col, &chars).col()
}

/// `e` within one line.
#[must_use]
pub fn word_end_in_line(col: usize, line: &str) -> usize {
    let chars: Vec<char> = line.chars().collect();
    extend_to_word_end(scan_to_next_word(col, &chars).col(), &chars)
}

/// `b` within one line. Stops at column 0.
#[must_use]
pub fn prev_word_start_in_line(col: usize, line: &str) -> usize {
    let chars: Vec<char> = line.chars().collect();
    extend_to_word_start(scan_to_prev_word(col, &chars).col(), &chars)
}

// ---------------------------------------------------------------------------
// Buffer API
// ---------------------------------------------------------------------------

/// `w` — forward to the start of the next word, crossing rows.
#[must_use]
pub fn next_word_start(pos: Position, buf: &Buffer) -> Position {
    let line = chars_of(buf, pos.row);
    match scan_next_word_start(pos.col, &line) {
        Scan::AtEdge(_) if pos.row < buf.last_row() => {
            let row = pos.row + 1;
            let next = buf.line(row).unwrap_or_default();
            Position::new(row, first_non_blank_col(&next))
        }
        scan => pos.with_col(scan.col()),
    }
}

/// `e` — forward to the end of the current or next word, crossing rows.
#[must_use]
pub fn word_end(pos: Position, buf: &Buffer) -> Position {
    let line = chars_of(buf, pos.row);
    match scan_to_next_word(pos.col, &line) {
        Scan::AtEdge(_) if pos.row < buf.last_row() => {
            let row = pos.row + 1;
            let next = chars_of(buf, row);
            if next.is_empty() {
                return Position::new(row, 0);
            }
            let text: String = next.iter().collect();
            Position::new(row, extend_to_word_end(first_non_blank_col(&text), &next))
        }
        scan => pos.with_col(extend_to_word_end(scan.col(), &line)),
    }
}

/// `b` — backward to the start of the previous word, crossing rows.
#[must_use]
pub fn prev_word_start(pos: Position, buf: &Buffer) -> Position {
    let line = chars_of(buf, pos.row);
    match scan_to_prev_word(pos.col, &line) {
        Scan::AtEdge(_) if pos.row > 0 => {
            let row = pos.row - 1;
            let prev = chars_of(buf, row);
            let last = prev.len().saturating_sub(1);
            Position::new(row, extend_to_word_start(last, &prev))
        }
        scan => pos.with_col(extend_to_word_start(scan.col(), &line)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
