//! Interactive session — keys in, cursor out.
//!
//! A [`Session`] owns a buffer, the cursor state and the keys typed so far.
//! [`Session::feed_key`] drives the whole pipeline for one key:
//!
//! 1. Keys that can't be part of a motion are ignored, unless a target prefix
//!    (`f`, `t`, `m`, `'`, ...) is pending, in which case anything goes.
//! 2. The key is appended to the pending sequence, which is re-parsed.
//! 3. An invalid sequence is discarded; an incomplete one waits for more keys.
//! 4. A complete command is executed, the pending keys are cleared and the
//!    column is reconciled with the desired column.
//!
//! # Desired column
//!
//! Vertical motions (`j k gg G {count}G { }`) land on
//! `min(desired_col, len - 1)` of the new row, so moving through a short line
//! and back out restores the earlier column. Every other motion clamps the
//! column into its row and makes it the new desired column.

use std::collections::VecDeque;

use log::{debug, trace};

use crate::buffer::Buffer;
use crate::command::{Action, Command, Parse, is_awaiting_target, is_motion_key, parse};
use crate::error::BufferError;
use crate::execute::{CursorState, execute};
use crate::marks::MarkSet;
use crate::options::Options;
use crate::position::Position;

/// What a single key did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not a motion key and no target pending. Nothing changed.
    Ignored,
    /// Appended to the pending keys; more are needed.
    Pending,
    /// The pending keys can never form a command and were discarded.
    Rejected,
    /// The pending keys formed this command, which has been executed.
    Executed(Command),
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct Session {
    buffer: Buffer,
    options: Options,
    state: CursorState,
    pending: String,
    desired_col: usize,
    trail: VecDeque<Position>,
}

impl Session {
    /// Start a session over `buffer` at the position `options` describe.
    #[must_use]
    pub fn new(buffer: Buffer, options: Options) -> Self {
        let start = start_position(&buffer, &options);
        debug!("session start at {start} over {} lines", buffer.line_count());
        Self {
            state: CursorState::new(start),
            desired_col: start.col,
            trail: VecDeque::new(),
            pending: String::new(),
            buffer,
            options,
        }
    }

    /// Convenience for [`Session::new`] over [`Buffer::from_text`].
    ///
    /// # Errors
    /// Returns [`BufferError::Empty`] if `text` holds no lines.
    pub fn from_text(text: &str, options: Options) -> Result<Self, BufferError> {
        Ok(Self::new(Buffer::from_text(text)?, options))
    }

    // -- Input --------------------------------------------------------------

    /// Feed one key.
    pub fn feed_key(&mut self, key: char) -> KeyOutcome {
        trace!("key {key:?}, pending {:?}", self.pending);

        if !is_motion_key(key) && !is_awaiting_target(&self.pending) {
            return KeyOutcome::Ignored;
        }

        self.pending.push(key);
        match parse(&self.pending) {
            Parse::Incomplete { .. } => KeyOutcome::Pending,
            Parse::Invalid => {
                debug!("rejected {:?}", self.pending);
                self.pending.clear();
                KeyOutcome::Rejected
            }
            Parse::Complete(command) => {
                execute(&command, &mut self.state, &self.buffer);
                self.reconcile_col(command.action);
                self.push_trail(self.state.cursor);
                debug!("{:?} {command} -> {}", self.pending, self.state.cursor);
                self.pending.clear();
                KeyOutcome::Executed(command)
            }
        }
    }

    /// Feed every char of `keys` in order.
    pub fn feed_keys(&mut self, keys: &str) -> Vec<KeyOutcome> {
        keys.chars().map(|key| self.feed_key(key)).collect()
    }

    fn reconcile_col(&mut self, action: Action) {
        let cursor = &mut self.state.cursor;
        let last_col = self.buffer.line_len(cursor.row).saturating_sub(1);
        if action.is_vertical() {
            cursor.col = self.desired_col.min(last_col);
        } else {
            cursor.col = cursor.col.min(last_col);
            self.desired_col = cursor.col;
        }
    }

    fn push_trail(&mut self, pos: Position) {
        if self.options.trail_len == 0 {
            return;
        }
        while self.trail.len() >= self.options.trail_len {
            self.trail.pop_front();
        }
        self.trail.push_back(pos);
    }

    // -- Lifecycle ----------------------------------------------------------

    /// Back to the start position with no marks, pending keys or trail.
    pub fn restart(&mut self) {
        let start = start_position(&self.buffer, &self.options);
        self.state.reset(start);
        self.desired_col = start.col;
        self.pending.clear();
        self.trail.clear();
        debug!("restart at {start}");
    }

    /// Install a new buffer built from `text`, then restart.
    ///
    /// # Errors
    /// Returns [`BufferError::Empty`] if `text` holds no lines. The current
    /// buffer and cursor state are left untouched.
    pub fn replace_buffer(&mut self, text: &str) -> Result<(), BufferError> {
        self.buffer = Buffer::from_text(text)?;
        debug!("buffer replaced, {} lines", self.buffer.line_count());
        self.restart();
        Ok(())
    }

    // -- Accessors ----------------------------------------------------------

    #[must_use]
    pub const fn cursor(&self) -> Position {
        self.state.cursor
    }

    #[must_use]
    pub const fn marks(&self) -> &MarkSet {
        &self.state.marks
    }

    /// Position saved by the most recent jump.
    #[must_use]
    pub const fn jump_mark(&self) -> Option<Position> {
        self.state.jump.get()
    }

    /// Keys typed towards a command that isn't complete yet.
    #[must_use]
    pub fn pending(&self) -> &str {
        &self.pending
    }

    #[must_use]
    pub const fn desired_col(&self) -> usize {
        self.desired_col
    }

    /// Positions after each executed command, oldest first.
    pub fn trail(&self) -> impl Iterator<Item = Position> + '_ {
        self.trail.iter().copied()
    }

    #[must_use]
    pub const fn buffer(&self) -> &Buffer {
        &self.buffer
    }
}

/// `options.start_row` clamped into the buffer, at column 0 or the middle
/// of the row.
fn start_position(buffer: &Buffer, options: &Options) -> Position {
    let row = options.start_row.min(buffer.last_row());
    let col = if options.start_centered {
        buffer.line_len(row) / 2
    } else {
        0
    };
    Position::new(row, col)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
