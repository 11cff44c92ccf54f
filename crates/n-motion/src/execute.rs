//! Command execution — applying a parsed [`Command`] to cursor state.
//!
//! [`execute`] is infallible. Unset marks, missing search characters and
//! motions already at a boundary all leave the cursor where it is.
//!
//! # Repetition
//!
//! A count runs the underlying primitive `count` times in sequence, so word
//! motions re-derive boundaries at every step. Repetition stops early once a
//! step no longer moves the cursor: every primitive is a pure function of the
//! position, so the remaining steps could not move it either.
//!
//! # Columns after vertical motions
//!
//! `j`, `k`, `gg`, `G`, `{count}G`, `{` and `}` change only the row. The
//! column is left exactly as it was, even if the new row is shorter, so the
//! caller can apply its own desired-column rule (see
//! [`Session`](crate::session::Session)). Every other motion produces a
//! column that is valid for its row.

use log::trace;

use crate::buffer::Buffer;
use crate::command::{Action, Command};
use crate::marks::{JumpMark, MarkSet};
use crate::motion::{
    find_char_backward, find_char_forward, first_non_blank_col, goto_line, goto_line_end,
    goto_line_start, move_down, move_left, move_right, move_up, paragraph_down, paragraph_up,
    till_char_backward, till_char_forward,
};
use crate::position::Position;
use crate::word;

// ---------------------------------------------------------------------------
// CursorState
// ---------------------------------------------------------------------------

/// Everything a command can change: the cursor, the named marks and the
/// jump mark.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CursorState {
    pub cursor: Position,
    pub marks: MarkSet,
    pub jump: JumpMark,
}

impl CursorState {
    /// Fresh state with the cursor at `cursor` and no marks.
    #[must_use]
    pub const fn new(cursor: Position) -> Self {
        Self {
            cursor,
            marks: MarkSet::new(),
            jump: JumpMark::new(),
        }
    }

    /// Move the cursor to `cursor` and forget every mark.
    pub fn reset(&mut self, cursor: Position) {
        self.cursor = cursor;
        self.marks.clear();
        self.jump.clear();
    }
}

// ---------------------------------------------------------------------------
// Execution
// ---------------------------------------------------------------------------

/// Apply `command` to `state` over `buf`.
pub fn execute(command: &Command, state: &mut CursorState, buf: &Buffer) {
    let from = state.cursor;
    let times = command.repeat();
    let total = buf.line_count();
    let line = buf.line(from.row).unwrap_or_default();
    let line_len = buf.line_len(from.row);

    let to = match command.action {
        // -- Rows -----------------------------------------------------------
        Action::Down => repeat(from, times, |p| Position::new(move_down(p.row, total), p.col)),
        Action::Up => repeat(from, times, |p| Position::new(move_up(p.row), p.col)),
        Action::First => {
            state.jump.record(from);
            Position::new(goto_line(0, total), from.col)
        }
        Action::Last => {
            state.jump.record(from);
            Position::new(goto_line(to_isize(total) - 1, total), from.col)
        }
        Action::Goto => {
            state.jump.record(from);
            let target = to_isize(command.count.unwrap_or(1)) - 1;
            Position::new(goto_line(target, total), from.col)
        }
        Action::ParagraphUp => {
            state.jump.record(from);
            repeat(from, times, |p| Position::new(paragraph_up(p.row, buf), p.col))
        }
        Action::ParagraphDown => {
            state.jump.record(from);
            repeat(from, times, |p| Position::new(paragraph_down(p.row, buf), p.col))
        }

        // -- Columns --------------------------------------------------------
        Action::Left => repeat(from, times, |p| p.with_col(move_left(p.col))),
        Action::Right => repeat(from, times, |p| p.with_col(move_right(p.col, line_len))),
        Action::FirstNonBlank => from.with_col(first_non_blank_col(&line)),
        Action::LineStart => from.with_col(goto_line_start()),
        Action::LineEnd => from.with_col(goto_line_end(line_len)),

        // -- Words ----------------------------------------------------------
        Action::WordNext => repeat(from, times, |p| word::next_word_start(p, buf)),
        Action::WordEnd => repeat(from, times, |p| word::word_end(p, buf)),
        Action::WordPrev => repeat(from, times, |p| word::prev_word_start(p, buf)),

        // -- Char search (current line only) --------------------------------
        Action::FindForward(ch) => {
            repeat(from, times, |p| p.with_col(find_char_forward(p.col, &line, ch)))
        }
        Action::FindBackward(ch) => {
            repeat(from, times, |p| p.with_col(find_char_backward(p.col, &line, ch)))
        }
        Action::TillForward(ch) => {
            repeat(from, times, |p| p.with_col(till_char_forward(p.col, &line, ch)))
        }
        Action::TillBackward(ch) => {
            repeat(from, times, |p| p.with_col(till_char_backward(p.col, &line, ch)))
        }

        // -- Marks ----------------------------------------------------------
        Action::SetMark(name) => {
            if !state.marks.set(name, from) {
                trace!("ignoring mark name {name:?}");
            }
            from
        }
        Action::JumpToMark(name) => match state.marks.get(name) {
            Some(mark) => {
                state.jump.record(from);
                Position::new(goto_line(to_isize(mark.row), total), mark.col)
            }
            None => from,
        },
        Action::JumpToMarkLine(name) => match state.marks.get(name) {
            Some(mark) => {
                state.jump.record(from);
                line_head(buf, mark.row)
            }
            None => from,
        },
        Action::JumpPrevLine => match state.jump.swap(from) {
            Some(prev) => line_head(buf, prev.row),
            None => from,
        },
    };

    state.cursor = to;
}

/// Run `step` up to `times` times, stopping once it no longer moves.
fn repeat(from: Position, times: usize, step: impl Fn(Position) -> Position) -> Position {
    let mut pos = from;
    for _ in 0..times {
        let next = step(pos);
        if next == pos {
            break;
        }
        pos = next;
    }
    pos
}

/// `row` (clamped into the buffer) at its first non-blank column.
fn line_head(buf: &Buffer, row: usize) -> Position {
    let row = goto_line(to_isize(row), buf.line_count());
    let line = buf.line(row).unwrap_or_default();
    Position::new(row, first_non_blank_col(&line))
}

fn to_isize(n: usize) -> isize {
    isize::try_from(n).unwrap_or(isize::MAX)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
