//! Named marks and the jump mark — saved cursor positions.
//!
//! **Marks** (`ma` … `mz`) store an exact position under a lowercase letter.
//! They are overwritten silently and never expire; only a session restart
//! clears them. Jump to one with `` `a `` (exact) or `'a` (row, first
//! non-blank column).
//!
//! The **jump mark** is a single slot, not a list. Every jump motion (`gg`,
//! `G`, `{count}G`, `{`, `}`, `'a`, `` `a ``) overwrites it with the position
//! the cursor is leaving. `''` swaps it with the current position, so
//! repeating `''` bounces between the two most recent jump endpoints.

use crate::position::Position;

/// Number of mark slots, one per lowercase ASCII letter.
const MARK_COUNT: usize = 26;

// ---------------------------------------------------------------------------
// MarkSet
// ---------------------------------------------------------------------------

/// Named positions `a`–`z`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkSet {
    slots: [Option<Position>; MARK_COUNT],
}

impl MarkSet {
    /// Create an empty mark set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: [None; MARK_COUNT],
        }
    }

    /// True if `name` can hold a mark.
    #[inline]
    #[must_use]
    pub const fn is_valid_name(name: char) -> bool {
        name.is_ascii_lowercase()
    }

    /// Store `pos` under `name`, replacing any previous position.
    /// Returns `false` (and stores nothing) when `name` isn't `a`–`z`.
    pub fn set(&mut self, name: char, pos: Position) -> bool {
        match slot_index(name) {
            Some(idx) => {
                self.slots[idx] = Some(pos);
                true
            }
            None => false,
        }
    }

    /// The position stored under `name`, if any.
    #[must_use]
    pub fn get(&self, name: char) -> Option<Position> {
        slot_index(name).and_then(|idx| self.slots[idx])
    }

    /// Forget every mark.
    pub fn clear(&mut self) {
        self.slots = [None; MARK_COUNT];
    }

    /// All set marks as `(name, position)`, in alphabetical order.
    pub fn iter(&self) -> impl Iterator<Item = (char, Position)> + '_ {
        (b'a'..=b'z')
            .zip(self.slots.iter())
            .filter_map(|(letter, slot)| slot.map(|pos| (char::from(letter), pos)))
    }

    /// Whether no mark is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

fn slot_index(name: char) -> Option<usize> {
    MarkSet::is_valid_name(name).then(|| (name as usize) - ('a' as usize))
}

// ---------------------------------------------------------------------------
// JumpMark
// ---------------------------------------------------------------------------

/// The position the cursor held before the most recent jump.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JumpMark {
    saved: Option<Position>,
}

impl JumpMark {
    /// An empty jump mark (no jump has happened yet).
    #[must_use]
    pub const fn new() -> Self {
        Self { saved: None }
    }

    /// The saved position, if any.
    #[inline]
    #[must_use]
    pub const fn get(&self) -> Option<Position> {
        self.saved
    }

    /// Overwrite the slot with the position a jump is leaving.
    pub const fn record(&mut self, from: Position) {
        self.saved = Some(from);
    }

    /// Exchange the saved position with `current`. Returns the previously
    /// saved position, or `None` (leaving the slot empty) when nothing was
    /// saved.
    pub const fn swap(&mut self, current: Position) -> Option<Position> {
        match self.saved {
            Some(prev) => {
                self.saved = Some(current);
                Some(prev)
            }
            None => None,
        }
    }

    /// Forget the saved position.
    pub const fn clear(&mut self) {
        self.saved = None;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
