//! Text buffer — the fixed lines the cursor moves over.
//!
//! A `Buffer` wraps a [`ropey::Rope`] and exposes it as an ordered sequence
//! of lines. The motion core never edits text; a new text replaces the whole
//! buffer (and resets all cursor state, see [`Session`](crate::session::Session)).
//!
//! # Design choices
//!
//! - **ropey** gives O(log n) line indexing and careful Unicode handling.
//!   Lines are handed out as `Cow<str>` without their terminator, borrowed
//!   straight from the rope whenever the line sits in a single chunk.
//!
//! - **Columns are char offsets**, not byte offsets. Column 3 of `"café"` is
//!   `'é'`. Byte offsets never leak into the public API.
//!
//! - **There is always at least one line.** Constructors reject input that
//!   would produce an empty buffer, so callers never special-case zero rows.

use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::path::Path;

use ropey::{Rope, RopeSlice};

use crate::error::BufferError;

/// An immutable, rope-backed sequence of text lines.
#[derive(Clone)]
pub struct Buffer {
    rope: Rope,
}

impl Buffer {
    // -- Construction -------------------------------------------------------

    /// Build a buffer from free text.
    ///
    /// Lines are split on `\n`, `\r\n` or `\r` only; form feeds and Unicode
    /// separators such as `U+2028` are ordinary characters. Trailing empty
    /// lines are dropped, so `"a\nb\n\n"` has two lines. Lines holding only
    /// whitespace are kept — they are paragraph breaks, not padding.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Empty`] when nothing is left after trimming.
    pub fn from_text(text: &str) -> Result<Self, BufferError> {
        let trimmed = text.trim_end_matches(['\n', '\r']);
        if trimmed.is_empty() {
            return Err(BufferError::Empty);
        }
        Ok(Self {
            rope: Rope::from_str(trimmed),
        })
    }

    /// Build a buffer from exact lines. Unlike [`from_text`](Self::from_text)
    /// nothing is trimmed: a trailing `""` stays a trailing empty row.
    ///
    /// Lines must not contain line terminators themselves.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Empty`] when `lines` yields nothing.
    pub fn from_lines<I, S>(lines: I) -> Result<Self, BufferError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut text = String::new();
        let mut any = false;
        for line in lines {
            if any {
                text.push('\n');
            }
            text.push_str(line.as_ref());
            any = true;
        }
        if !any {
            return Err(BufferError::Empty);
        }
        Ok(Self {
            rope: Rope::from_str(&text),
        })
    }

    /// Load a buffer from a file, with the same trimming as
    /// [`from_text`](Self::from_text).
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Io`] if the file cannot be read or is not
    /// UTF-8, and [`BufferError::Empty`] if it holds no text.
    pub fn from_file(path: &Path) -> Result<Self, BufferError> {
        let text = fs::read_to_string(path).map_err(|source| BufferError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_text(&text)
    }

    // -- Line access --------------------------------------------------------

    /// Number of rows. Always at least 1.
    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Index of the last row.
    #[inline]
    #[must_use]
    pub fn last_row(&self) -> usize {
        self.line_count().saturating_sub(1)
    }

    /// The content of `row` without its line terminator, or `None` if the row
    /// doesn't exist.
    #[must_use]
    pub fn line(&self, row: usize) -> Option<Cow<'_, str>> {
        self.content(row).map(Cow::from)
    }

    /// Length of `row` in chars, excluding the terminator. Rows that don't
    /// exist have length 0.
    #[must_use]
    pub fn line_len(&self, row: usize) -> usize {
        self.content(row).map_or(0, |slice| slice.len_chars())
    }

    /// True when `row` is a paragraph break: its trimmed content is empty.
    #[must_use]
    pub fn is_paragraph_break(&self, row: usize) -> bool {
        self.content(row)
            .is_some_and(|slice| slice.chars().all(char::is_whitespace))
    }

    /// Iterate over all rows' content.
    pub fn lines(&self) -> impl Iterator<Item = Cow<'_, str>> + '_ {
        (0..self.line_count()).filter_map(|row| self.line(row))
    }

    /// The rope slice for `row` minus any trailing `\n`, `\r\n` or `\r`.
    fn content(&self, row: usize) -> Option<RopeSlice<'_>> {
        if row >= self.rope.len_lines() {
            return None;
        }
        let line = self.rope.line(row);
        let total = line.len_chars();
        let len = if total == 0 {
            0
        } else {
            match line.char(total - 1) {
                '\n' if total >= 2 && line.char(total - 2) == '\r' => total - 2,
                '\n' | '\r' => total - 1,
                _ => total,
            }
        };
        Some(line.slice(..len))
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.lines()).finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn lines_of(buf: &Buffer) -> Vec<String> {
        buf.lines().map(Cow::into_owned).collect()
    }

    // -- from_text ----------------------------------------------------------

    #[test]
    fn from_text_splits_lines() {
        let buf = Buffer::from_text("hello\nworld").unwrap();
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line(0).as_deref(), Some("hello"));
        assert_eq!(buf.line(1).as_deref(), Some("world"));
    }

    #[test]
    fn from_text_drops_trailing_empty_lines() {
        let buf = Buffer::from_text("a\nb\n\n\n").unwrap();
        assert_eq!(lines_of(&buf), vec!["a", "b"]);
    }

    #[test]
    fn from_text_keeps_trailing_whitespace_line() {
        let buf = Buffer::from_text("a\n   \n").unwrap();
        assert_eq!(lines_of(&buf), vec!["a", "   "]);
    }

    #[test]
    fn from_text_keeps_leading_and_inner_empty_lines() {
        let buf = Buffer::from_text("\na\n\nb").unwrap();
        assert_eq!(lines_of(&buf), vec!["", "a", "", "b"]);
    }

    #[test]
    fn from_text_strips_crlf() {
        let buf = Buffer::from_text("one\r\ntwo\r\n").unwrap();
        assert_eq!(lines_of(&buf), vec!["one", "two"]);
        assert_eq!(buf.line_len(0), 3);
    }

    #[test]
    fn form_feed_stays_inside_its_row() {
        let buf = Buffer::from_text("page one\u{0C}page two\nnext").unwrap();
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line(0).as_deref(), Some("page one\u{0C}page two"));
        assert_eq!(buf.line_len(0), 17);
    }

    #[test]
    fn unicode_separators_are_not_line_breaks() {
        for sep in ['\u{0B}', '\u{85}', '\u{2028}', '\u{2029}'] {
            let text = format!("a{sep}b");
            let buf = Buffer::from_lines([text.as_str()]).unwrap();
            assert_eq!(buf.line_count(), 1, "separator {sep:?}");
            assert_eq!(buf.line_len(0), 3, "separator {sep:?}");
        }
    }

    #[test]
    fn from_text_rejects_empty() {
        assert!(matches!(Buffer::from_text(""), Err(BufferError::Empty)));
        assert!(matches!(Buffer::from_text("\n\n"), Err(BufferError::Empty)));
    }

    // -- from_lines ---------------------------------------------------------

    #[test]
    fn from_lines_is_exact() {
        let buf = Buffer::from_lines(["hello world", "foo bar", "", "baz qux"]).unwrap();
        assert_eq!(buf.line_count(), 4);
        assert_eq!(buf.line(2).as_deref(), Some(""));
        assert_eq!(buf.line(3).as_deref(), Some("baz qux"));
    }

    #[test]
    fn from_lines_keeps_trailing_empty_row() {
        let buf = Buffer::from_lines(["a", ""]).unwrap();
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.last_row(), 1);
    }

    #[test]
    fn from_lines_single_empty_line() {
        let buf = Buffer::from_lines([""]).unwrap();
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line_len(0), 0);
    }

    #[test]
    fn from_lines_rejects_nothing() {
        let none: [&str; 0] = [];
        assert!(matches!(Buffer::from_lines(none), Err(BufferError::Empty)));
    }

    // -- Line access --------------------------------------------------------

    #[test]
    fn line_out_of_range() {
        let buf = Buffer::from_text("only").unwrap();
        assert_eq!(buf.line(1), None);
        assert_eq!(buf.line_len(7), 0);
    }

    #[test]
    fn line_len_counts_chars() {
        let buf = Buffer::from_text("café\n中文").unwrap();
        assert_eq!(buf.line_len(0), 4);
        assert_eq!(buf.line_len(1), 2);
    }

    // -- Paragraph breaks ---------------------------------------------------

    #[test]
    fn whitespace_rows_are_paragraph_breaks() {
        let buf = Buffer::from_lines(["a", "", "b", "  \t", "c"]).unwrap();
        assert!(buf.is_paragraph_break(1));
        assert!(buf.is_paragraph_break(3));
        assert!(!buf.is_paragraph_break(0));
        assert!(!buf.is_paragraph_break(99));
    }

    // -- Files --------------------------------------------------------------

    #[test]
    fn from_file_reads_and_trims() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "first\nsecond\n\n").unwrap();
        let buf = Buffer::from_file(file.path()).unwrap();
        assert_eq!(lines_of(&buf), vec!["first", "second"]);
    }

    #[test]
    fn from_file_nonexistent() {
        let err = Buffer::from_file(Path::new("/nonexistent/n-drill/text.txt")).unwrap_err();
        assert!(matches!(err, BufferError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/n-drill/text.txt"));
    }

    #[test]
    fn debug_lists_lines() {
        let buf = Buffer::from_text("a\nb").unwrap();
        assert_eq!(format!("{buf:?}"), r#"["a", "b"]"#);
    }
}
