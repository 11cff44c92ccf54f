//! # n-motion — Vim motion core for n-drill
//!
//! Everything needed to turn keystrokes into cursor positions over a fixed
//! text buffer:
//!
//! - **[`position`]** — `Position` (row, col), 0-indexed
//! - **[`buffer`]** — `Buffer`, an immutable rope of lines
//! - **[`motion`]** — row, column, paragraph and char-search primitives
//! - **[`word`]** — `w` / `e` / `b`, within a line and across rows
//! - **[`command`]** — incremental parsing of key sequences into `Command`s
//! - **[`marks`]** — named marks `a`–`z` and the jump mark
//! - **[`execute`]** — applying a `Command` to cursor state
//! - **[`session`]** — key-by-key driver with desired-column tracking
//! - **[`options`]** — start position and trail settings, TOML and `:set` style
//! - **[`error`]** — the few things that can fail (loading text and options)
//!
//! Nothing here edits text or renders anything.

pub mod buffer;
pub mod command;
pub mod error;
pub mod execute;
pub mod marks;
pub mod motion;
pub mod options;
pub mod position;
pub mod session;
pub mod word;
