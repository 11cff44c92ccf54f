//! Motion primitives — row, column, paragraph and character-search steps.
//!
//! Every function here is pure and total: it takes the old coordinate plus
//! whatever text it needs and returns the new coordinate. Nothing fails;
//! motions that would leave the buffer clamp, and searches that find nothing
//! return their input unchanged.
//!
//! | Function                 | Vim key | Result                                   |
//! |--------------------------|---------|------------------------------------------|
//! | [`move_down`]            | `j`     | next row, stops at the last row          |
//! | [`move_up`]              | `k`     | previous row, stops at row 0             |
//! | [`goto_line`]            | `gg` `G`| any target clamped into the buffer       |
//! | [`move_left`]            | `h`     | previous column, stops at 0              |
//! | [`move_right`]           | `l`     | next column, stops at the last char      |
//! | [`goto_line_start`]      | `0`     | column 0                                 |
//! | [`goto_line_end`]        | `$`     | last char                                |
//! | [`first_non_blank_col`]  | `^`     | first non-space char                     |
//! | [`paragraph_up`]         | `{`     | previous paragraph break (or row 0)      |
//! | [`paragraph_down`]       | `}`     | next paragraph break (or last row)       |
//! | [`find_char_forward`]    | `f`     | next occurrence on the line              |
//! | [`find_char_backward`]   | `F`     | previous occurrence on the line          |
//! | [`till_char_forward`]    | `t`     | one before the next occurrence           |
//! | [`till_char_backward`]   | `T`     | one after the previous occurrence        |
//!
//! Word motions live in [`crate::word`].

use crate::buffer::Buffer;

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// `j` — one row down, clamped to `total_lines - 1`.
#[inline]
#[must_use]
pub const fn move_down(row: usize, total_lines: usize) -> usize {
    if row + 1 < total_lines { row + 1 } else { row }
}

/// `k` — one row up, clamped to 0.
#[inline]
#[must_use]
pub const fn move_up(row: usize) -> usize {
    row.saturating_sub(1)
}

/// Clamp any target row — negative or past the end — into
/// `[0, total_lines - 1]`.
#[must_use]
pub fn goto_line(target: isize, total_lines: usize) -> usize {
    let last = total_lines.saturating_sub(1);
    usize::try_from(target).map_or(0, |row| row.min(last))
}

// ---------------------------------------------------------------------------
// Columns
// ---------------------------------------------------------------------------

/// `h` — one column left, clamped to 0.
#[inline]
#[must_use]
pub const fn move_left(col: usize) -> usize {
    col.saturating_sub(1)
}

/// `l` — one column right, clamped to `line_len - 1`.
#[inline]
#[must_use]
pub const fn move_right(col: usize, line_len: usize) -> usize {
    if col + 1 < line_len { col + 1 } else { col }
}

/// `0` — always column 0.
#[inline]
#[must_use]
pub const fn goto_line_start() -> usize {
    0
}

/// `$` — the last character, or 0 on an empty line.
#[inline]
#[must_use]
pub const fn goto_line_end(line_len: usize) -> usize {
    line_len.saturating_sub(1)
}

/// `^` — the first column whose char is not a space.
///
/// Only `' '` counts as blank. On a line made entirely of spaces this returns
/// the last column, which is itself a space; on an empty line it returns 0.
/// Mark jumps rely on exactly this boundary behaviour.
#[must_use]
pub fn first_non_blank_col(line: &str) -> usize {
    let len = line.chars().count();
    let mut col = 0;
    for ch in line.chars() {
        if col + 1 >= len || ch != ' ' {
            break;
        }
        col += 1;
    }
    col
}

// ---------------------------------------------------------------------------
// Paragraphs
// ---------------------------------------------------------------------------

/// `{` — scan upward from the row above the cursor to the nearest paragraph
/// break, stopping at row 0.
#[must_use]
pub fn paragraph_up(row: usize, buf: &Buffer) -> usize {
    if row == 0 {
        return 0;
    }
    let mut target = row - 1;
    while target > 0 && !buf.is_paragraph_break(target) {
        target -= 1;
    }
    target
}

/// `}` — scan downward from the row below the cursor to the nearest paragraph
/// break, stopping at the last row.
#[must_use]
pub fn paragraph_down(row: usize, buf: &Buffer) -> usize {
    let last = buf.last_row();
    let mut target = row + 1;
    while target < last && !buf.is_paragraph_break(target) {
        target += 1;
    }
    target.min(last)
}

// ---------------------------------------------------------------------------
// Character search
// ---------------------------------------------------------------------------

/// `f{ch}` — the first `ch` strictly after `col` on this line, or `col`.
#[must_use]
pub fn find_char_forward(col: usize, line: &str, ch: char) -> usize {
    line.chars()
        .enumerate()
        .skip(col + 1)
        .find(|&(_, c)| c == ch)
        .map_or(col, |(i, _)| i)
}

/// `F{ch}` — the last `ch` strictly before `col` on this line, or `col`.
#[must_use]
pub fn find_char_backward(col: usize, line: &str, ch: char) -> usize {
    line.chars()
        .take(col)
        .enumerate()
        .filter(|&(_, c)| c == ch)
        .last()
        .map_or(col, |(i, _)| i)
}

/// `t{ch}` — one column before the next `ch`, or `col` when there is none.
///
/// When `ch` sits right after the cursor the result is `col` again, so a
/// repeated `t` to the same char does not advance.
#[must_use]
pub fn till_char_forward(col: usize, line: &str, ch: char) -> usize {
    let found = find_char_forward(col, line, ch);
    if found == col { col } else { found - 1 }
}

/// `T{ch}` — one column after the previous `ch`, or `col` when there is none.
#[must_use]
pub fn till_char_backward(col: usize, line: &str, ch: char) -> usize {
    let found = find_char_backward(col, line, ch);
    if found == col { col } else { found + 1 }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
