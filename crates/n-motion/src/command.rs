//! Normal-mode command grammar — classifying the pending key sequence.
//!
//! Keys typed since the last finished command accumulate in a pending buffer.
//! After every key the whole buffer is re-parsed with [`parse`], which has no
//! side effects and sees only the string it is given. The outcome is one of:
//!
//! - [`Parse::Incomplete`] — the buffer is a prefix of a longer command; wait
//!   for the next key.
//! - [`Parse::Invalid`] — nothing can ever match; discard the whole buffer.
//! - [`Parse::Complete`] — a [`Command`] ready for
//!   [`execute`](crate::execute::execute).
//!
//! # Grammar
//!
//! `[count] motion`, where `count` is a run of leading digits.
//!
//! | Keys           | Action              | Count                         |
//! |----------------|---------------------|-------------------------------|
//! | `j` `k`        | `down` `up`         | repeat                        |
//! | `h` `l`        | `left` `right`      | repeat                        |
//! | `w` `e` `b`    | `word_*`            | repeat                        |
//! | `{` `}`        | `paragraph_*`       | repeat                        |
//! | `f` `F` `t` `T` + char | `find_*` / `till_*` | repeat                |
//! | `0`            | `line_start`        | — (only as the whole buffer)  |
//! | `^` `$`        | `first_non_blank` `line_end` | ignored              |
//! | `gg` / `G`     | `first` / `last`    | with a count: `goto` line N   |
//! | `m` + char     | `set_mark`          | ignored                       |
//! | `'` + char     | `jump_to_mark_line` | ignored                       |
//! | `''`           | `jump_prev_line`    | ignored                       |
//! | `` ` `` + char | `jump_to_mark`      | ignored                       |
//!
//! Target-taking prefixes accept any character. Whether the target makes
//! sense (an unset mark, a char that isn't on the line) is decided when the
//! command runs.

use std::fmt;

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// What a complete command does. Target characters travel inside the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// `j`
    Down,
    /// `k`
    Up,
    /// `gg` without a count.
    First,
    /// `G` without a count.
    Last,
    /// `{count}gg` / `{count}G` — go to 1-indexed line `count`.
    Goto,
    /// `h`
    Left,
    /// `l`
    Right,
    /// `w`
    WordNext,
    /// `e`
    WordEnd,
    /// `b`
    WordPrev,
    /// `^`
    FirstNonBlank,
    /// `0`
    LineStart,
    /// `$`
    LineEnd,
    /// `f{ch}`
    FindForward(char),
    /// `F{ch}`
    FindBackward(char),
    /// `t{ch}`
    TillForward(char),
    /// `T{ch}`
    TillBackward(char),
    /// `{`
    ParagraphUp,
    /// `}`
    ParagraphDown,
    /// `m{ch}`
    SetMark(char),
    /// `` `{ch} `` — exact mark position.
    JumpToMark(char),
    /// `'{ch}` — mark row, first non-blank column.
    JumpToMarkLine(char),
    /// `''` — toggle with the position before the last jump.
    JumpPrevLine,
}

impl Action {
    /// Stable snake_case name, used in logs and transcripts.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Down => "down",
            Self::Up => "up",
            Self::First => "first",
            Self::Last => "last",
            Self::Goto => "goto",
            Self::Left => "left",
            Self::Right => "right",
            Self::WordNext => "word_next",
            Self::WordEnd => "word_end",
            Self::WordPrev => "word_prev",
            Self::FirstNonBlank => "first_non_blank",
            Self::LineStart => "line_start",
            Self::LineEnd => "line_end",
            Self::FindForward(_) => "find_forward",
            Self::FindBackward(_) => "find_backward",
            Self::TillForward(_) => "till_forward",
            Self::TillBackward(_) => "till_backward",
            Self::ParagraphUp => "paragraph_up",
            Self::ParagraphDown => "paragraph_down",
            Self::SetMark(_) => "set_mark",
            Self::JumpToMark(_) => "jump_to_mark",
            Self::JumpToMarkLine(_) => "jump_to_mark_line",
            Self::JumpPrevLine => "jump_prev_line",
        }
    }

    /// The target character consumed by the command, if any.
    #[must_use]
    pub const fn target(self) -> Option<char> {
        match self {
            Self::FindForward(ch)
            | Self::FindBackward(ch)
            | Self::TillForward(ch)
            | Self::TillBackward(ch)
            | Self::SetMark(ch)
            | Self::JumpToMark(ch)
            | Self::JumpToMarkLine(ch) => Some(ch),
            _ => None,
        }
    }

    /// Jump motions record the pre-motion position as the jump mark before
    /// moving. `''` is not one of them: it swaps instead.
    #[must_use]
    pub const fn is_jump(self) -> bool {
        matches!(
            self,
            Self::First
                | Self::Last
                | Self::Goto
                | Self::ParagraphUp
                | Self::ParagraphDown
                | Self::JumpToMark(_)
                | Self::JumpToMarkLine(_)
        )
    }

    /// Purely vertical motions keep the desired column across rows.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(
            self,
            Self::Down
                | Self::Up
                | Self::First
                | Self::Last
                | Self::Goto
                | Self::ParagraphUp
                | Self::ParagraphDown
        )
    }

    /// True when a count prefix repeats the motion.
    #[must_use]
    pub const fn is_repeatable(self) -> bool {
        matches!(
            self,
            Self::Down
                | Self::Up
                | Self::Left
                | Self::Right
                | Self::WordNext
                | Self::WordEnd
                | Self::WordPrev
                | Self::FindForward(_)
                | Self::FindBackward(_)
                | Self::TillForward(_)
                | Self::TillBackward(_)
                | Self::ParagraphUp
                | Self::ParagraphDown
        )
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())?;
        if let Some(ch) = self.target() {
            write!(f, " {ch:?}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// A complete command: an action and its count.
///
/// `count` is `Some(n >= 1)` for repeatable motions (1 when no count was
/// typed), the 1-indexed line number for [`Action::Goto`], and `None` for
/// everything that ignores counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Command {
    pub action: Action,
    pub count: Option<usize>,
}

impl Command {
    #[must_use]
    pub const fn new(action: Action, count: Option<usize>) -> Self {
        Self { action, count }
    }

    /// How many times the motion runs. At least 1.
    #[must_use]
    pub const fn repeat(&self) -> usize {
        match self.count {
            Some(n) if n > 0 => n,
            _ => 1,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(count) = self.count {
            write!(f, "{count}×")?;
        }
        write!(f, "{}", self.action)
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Outcome of parsing a pending key sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parse {
    /// A valid prefix. `count` is the count typed so far, if any.
    Incomplete { count: Option<usize> },
    /// Can never become a command. Discard the pending keys.
    Invalid,
    /// A finished command.
    Complete(Command),
}

/// Prefix keys that consume the next key as their target.
const TARGET_PREFIXES: [char; 7] = ['f', 'F', 't', 'T', 'm', '\'', '`'];

/// Classify a pending key sequence.
///
/// Leading ASCII digits form the count; a digit after any other key belongs
/// to the command. A buffer that is exactly `"0"` is the line-start motion,
/// never the start of a count.
#[must_use]
pub fn parse(pending: &str) -> Parse {
    let split = pending
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(pending.len());
    let (digits, rest) = pending.split_at(split);

    if rest.is_empty() {
        return match digits {
            "" => Parse::Incomplete { count: None },
            "0" => Parse::Complete(Command::new(Action::LineStart, None)),
            _ => Parse::Incomplete {
                count: Some(parse_count(digits)),
            },
        };
    }

    let count = (!digits.is_empty()).then(|| parse_count(digits));

    let mut keys = rest.chars();
    let (Some(first), second) = (keys.next(), keys.next()) else {
        return Parse::Invalid;
    };
    if keys.next().is_some() {
        return Parse::Invalid;
    }

    let action = match (first, second) {
        ('j', None) => Action::Down,
        ('k', None) => Action::Up,
        ('h', None) => Action::Left,
        ('l', None) => Action::Right,
        ('w', None) => Action::WordNext,
        ('e', None) => Action::WordEnd,
        ('b', None) => Action::WordPrev,
        ('{', None) => Action::ParagraphUp,
        ('}', None) => Action::ParagraphDown,
        ('^', None) => Action::FirstNonBlank,
        ('$', None) => Action::LineEnd,
        ('G', None) | ('g', Some('g')) => {
            return Parse::Complete(match count {
                Some(line) => Command::new(Action::Goto, Some(line)),
                None if first == 'G' => Command::new(Action::Last, None),
                None => Command::new(Action::First, None),
            });
        }
        ('g', None) => return Parse::Incomplete { count },
        (prefix, None) if TARGET_PREFIXES.contains(&prefix) => {
            return Parse::Incomplete { count };
        }
        ('f', Some(ch)) => Action::FindForward(ch),
        ('F', Some(ch)) => Action::FindBackward(ch),
        ('t', Some(ch)) => Action::TillForward(ch),
        ('T', Some(ch)) => Action::TillBackward(ch),
        ('m', Some(ch)) => Action::SetMark(ch),
        ('\'', Some('\'')) => Action::JumpPrevLine,
        ('\'', Some(ch)) => Action::JumpToMarkLine(ch),
        ('`', Some(ch)) => Action::JumpToMark(ch),
        _ => return Parse::Invalid,
    };

    let count = action
        .is_repeatable()
        .then(|| count.filter(|&n| n > 0).unwrap_or(1));
    Parse::Complete(Command::new(action, count))
}

/// True when the pending keys end in a bare target prefix (`f`, `F`, `t`,
/// `T`, `m`, `'`, `` ` ``, optionally after a count). The next key must then
/// be accepted whatever it is.
#[must_use]
pub fn is_awaiting_target(pending: &str) -> bool {
    let rest = pending.trim_start_matches(|ch: char| ch.is_ascii_digit());
    let mut keys = rest.chars();
    match (keys.next(), keys.next()) {
        (Some(prefix), None) => TARGET_PREFIXES.contains(&prefix),
        _ => false,
    }
}

/// True for keys that can start or continue a motion: the grammar's command
/// keys and the digits.
#[must_use]
pub const fn is_motion_key(key: char) -> bool {
    matches!(
        key,
        'j' | 'k'
            | 'h'
            | 'l'
            | 'g'
            | 'G'
            | 'w'
            | 'e'
            | 'b'
            | '^'
            | '$'
            | 'f'
            | 'F'
            | 't'
            | 'T'
            | '{'
            | '}'
            | 'm'
            | '\''
            | '`'
            | '0'..='9'
    )
}

/// Decimal count with saturating accumulation.
fn parse_count(digits: &str) -> usize {
    digits.bytes().fold(0usize, |acc, b| {
        acc.saturating_mul(10).saturating_add(usize::from(b - b'0'))
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
