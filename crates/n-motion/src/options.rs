//! Drill options — start position and trail length.
//!
//! Options are layered: built-in defaults, then an optional TOML file, then
//! `:set`-style overrides applied one argument at a time.
//!
//! # Override syntax
//!
//! | Syntax           | Effect                 |
//! |------------------|------------------------|
//! | `option`         | Enable boolean         |
//! | `nooption`       | Disable boolean        |
//! | `option!`        | Toggle boolean         |
//! | `option=N`       | Assign value           |
//!
//! # Option names
//!
//! | Full name   | Abbrev | TOML key         | Type    | Default |
//! |-------------|--------|------------------|---------|---------|
//! | `startrow`  | `sr`   | `start_row`      | integer | 8       |
//! | `centered`  | `ce`   | `start_centered` | bool    | true    |
//! | `traillen`  | `tl`   | `trail_len`      | integer | 20      |
//!
//! `startrow` is 0-indexed and clamped into the buffer at session start.

use std::fs;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::error::OptionsError;

/// Default start row; short buffers clamp it to their last row.
pub const DEFAULT_START_ROW: usize = 8;

/// Default number of positions kept in the session trail.
pub const DEFAULT_TRAIL_LEN: usize = 20;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Session start-up and bookkeeping options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Row the cursor starts on (and returns to on restart).
    pub start_row: usize,
    /// Start in the middle of the start row instead of column 0.
    pub start_centered: bool,
    /// Maximum number of positions in the trail.
    pub trail_len: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            start_row: DEFAULT_START_ROW,
            start_centered: true,
            trail_len: DEFAULT_TRAIL_LEN,
        }
    }
}

impl Options {
    /// Parse options from TOML text. Missing keys keep their defaults.
    ///
    /// # Errors
    /// Returns [`OptionsError::Parse`] on malformed TOML, unknown keys or
    /// mistyped values.
    pub fn from_toml_str(text: &str) -> Result<Self, OptionsError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML options file.
    ///
    /// # Errors
    /// Returns [`OptionsError::Io`] if the file can't be read, or any error
    /// from [`Options::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, OptionsError> {
        let text = fs::read_to_string(path).map_err(|source| OptionsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let options = Self::from_toml_str(&text)?;
        debug!("loaded options from {}: {options:?}", path.display());
        Ok(options)
    }

    /// Apply one override argument (`startrow=4`, `centered`, `notl`, ...).
    ///
    /// # Errors
    /// Returns [`OptionsError::Unknown`] for names outside the table above,
    /// [`OptionsError::InvalidValue`] when a value doesn't parse, and
    /// [`OptionsError::NotBoolean`] when an integer option is switched on,
    /// off or toggled.
    pub fn apply(&mut self, arg: &str) -> Result<(), OptionsError> {
        match parse_set_arg(arg) {
            SetDirective::Assign(name, value) => {
                let option = lookup(&name)?;
                let invalid = || OptionsError::InvalidValue {
                    name: name.clone(),
                    value: value.clone(),
                };
                match option {
                    OptionName::StartRow => {
                        self.start_row = value.parse().map_err(|_| invalid())?;
                    }
                    OptionName::TrailLen => {
                        self.trail_len = value.parse().map_err(|_| invalid())?;
                    }
                    OptionName::Centered => {
                        self.start_centered = value.parse().map_err(|_| invalid())?;
                    }
                }
            }
            SetDirective::On(name) => self.set_bool(&name, |_| true)?,
            SetDirective::Off(name) => self.set_bool(&name, |_| false)?,
            SetDirective::Toggle(name) => self.set_bool(&name, |old| !old)?,
        }
        debug!("option {arg:?} applied");
        Ok(())
    }

    fn set_bool(&mut self, name: &str, f: impl FnOnce(bool) -> bool) -> Result<(), OptionsError> {
        match lookup(name)? {
            OptionName::Centered => {
                self.start_centered = f(self.start_centered);
                Ok(())
            }
            OptionName::StartRow | OptionName::TrailLen => {
                Err(OptionsError::NotBoolean(name.to_string()))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Override parsing
// ---------------------------------------------------------------------------

/// A parsed override argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetDirective {
    /// `option` — enable a boolean option.
    On(String),

    /// `nooption` — disable a boolean option.
    Off(String),

    /// `option!` — toggle a boolean option.
    Toggle(String),

    /// `option=value` — assign a value.
    Assign(String, String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OptionName {
    StartRow,
    Centered,
    TrailLen,
}

fn lookup(name: &str) -> Result<OptionName, OptionsError> {
    match name {
        "startrow" | "sr" => Ok(OptionName::StartRow),
        "centered" | "ce" => Ok(OptionName::Centered),
        "traillen" | "tl" => Ok(OptionName::TrailLen),
        _ => Err(OptionsError::Unknown(name.to_string())),
    }
}

/// Returns `true` if `name` is a known boolean option (full name or abbreviation).
#[must_use]
pub fn is_bool_option(name: &str) -> bool {
    matches!(lookup(name), Ok(OptionName::Centered))
}

/// Parse a single override argument into a directive.
///
/// Unknown names still parse; [`Options::apply`] reports them.
#[must_use]
pub fn parse_set_arg(arg: &str) -> SetDirective {
    let arg = arg.trim();

    if let Some((name, value)) = arg.split_once('=') {
        return SetDirective::Assign(name.trim().to_string(), value.trim().to_string());
    }

    if let Some(name) = arg.strip_suffix('!') {
        return SetDirective::Toggle(name.to_string());
    }

    // Only strip "no" when what remains is a boolean option name.
    if let Some(name) = arg.strip_prefix("no") {
        if is_bool_option(name) {
            return SetDirective::Off(name.to_string());
        }
    }

    SetDirective::On(arg.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    // ── parse_set_arg ─────────────────────────────────────────────────────

    #[test]
    fn parse_boolean_on_and_off() {
        assert_eq!(parse_set_arg("centered"), SetDirective::On("centered".into()));
        assert_eq!(parse_set_arg("nocentered"), SetDirective::Off("centered".into()));
        assert_eq!(parse_set_arg("noce"), SetDirective::Off("ce".into()));
    }

    #[test]
    fn parse_toggle() {
        assert_eq!(parse_set_arg("ce!"), SetDirective::Toggle("ce".into()));
    }

    #[test]
    fn parse_assign() {
        assert_eq!(
            parse_set_arg("startrow=8"),
            SetDirective::Assign("startrow".into(), "8".into())
        );
        assert_eq!(
            parse_set_arg("tl = 5"),
            SetDirective::Assign("tl".into(), "5".into())
        );
    }

    #[test]
    fn parse_no_prefix_only_for_bool_options() {
        assert_eq!(parse_set_arg("notl"), SetDirective::On("notl".into()));
        assert_eq!(parse_set_arg("nofoo"), SetDirective::On("nofoo".into()));
    }

    // ── defaults ─────────────────────────────────────────────────────────

    #[test]
    fn default_start_is_row_eight_centered() {
        let opts = Options::default();
        assert_eq!(opts.start_row, 8);
        assert!(opts.start_centered);
        assert_eq!(opts.trail_len, DEFAULT_TRAIL_LEN);
    }

    // ── apply ────────────────────────────────────────────────────────────

    #[test]
    fn apply_assignments() {
        let mut opts = Options::default();
        opts.apply("startrow=2").unwrap();
        opts.apply("tl=3").unwrap();
        opts.apply("centered=false").unwrap();
        assert_eq!(
            opts,
            Options {
                start_row: 2,
                start_centered: false,
                trail_len: 3,
            }
        );
    }

    #[test]
    fn apply_booleans() {
        let mut opts = Options::default();
        opts.apply("noce").unwrap();
        assert!(!opts.start_centered);
        opts.apply("ce").unwrap();
        assert!(opts.start_centered);
        opts.apply("nocentered").unwrap();
        assert!(!opts.start_centered);
        opts.apply("centered!").unwrap();
        assert!(opts.start_centered);
    }

    #[test]
    fn apply_unknown_option() {
        let mut opts = Options::default();
        assert!(matches!(
            opts.apply("scrolloff=5"),
            Err(OptionsError::Unknown(name)) if name == "scrolloff"
        ));
        assert_eq!(opts, Options::default());
    }

    #[test]
    fn apply_invalid_value() {
        let mut opts = Options::default();
        assert!(matches!(
            opts.apply("startrow=-1"),
            Err(OptionsError::InvalidValue { .. })
        ));
        assert!(matches!(
            opts.apply("centered=maybe"),
            Err(OptionsError::InvalidValue { .. })
        ));
        assert_eq!(opts, Options::default());
    }

    #[test]
    fn apply_bool_syntax_on_integer_option() {
        let mut opts = Options::default();
        assert!(matches!(
            opts.apply("traillen"),
            Err(OptionsError::NotBoolean(_))
        ));
        assert!(matches!(opts.apply("sr!"), Err(OptionsError::NotBoolean(_))));
    }

    // ── TOML ─────────────────────────────────────────────────────────────

    #[test]
    fn toml_defaults_for_missing_keys() {
        let opts = Options::from_toml_str("start_row = 2\n").unwrap();
        assert_eq!(
            opts,
            Options {
                start_row: 2,
                ..Options::default()
            }
        );
        assert_eq!(Options::from_toml_str("").unwrap(), Options::default());
    }

    #[test]
    fn toml_rejects_unknown_and_mistyped_keys() {
        assert!(matches!(
            Options::from_toml_str("start_rwo = 1"),
            Err(OptionsError::Parse(_))
        ));
        assert!(matches!(
            Options::from_toml_str("trail_len = \"long\""),
            Err(OptionsError::Parse(_))
        ));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "start_centered = false\ntrail_len = 5").unwrap();
        let opts = Options::load(file.path()).unwrap();
        assert!(!opts.start_centered);
        assert_eq!(opts.trail_len, 5);
        assert_eq!(opts.start_row, DEFAULT_START_ROW);
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(matches!(
            Options::load(&path),
            Err(OptionsError::Io { .. })
        ));
    }
}
