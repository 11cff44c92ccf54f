// SPDX-License-Identifier: MIT
//
// n-drill — replay Vim motion keystrokes over a fixed text.
//
// This binary wires the n-motion core to the command line:
//
//   text file  → Buffer
//   config     → Options (TOML file, then --set overrides)
//   keys       → Session::feed_key, one char at a time
//
// Keys come from positional arguments first, then from --script. Each key
// flows through:
//
//   feed_key → parse pending keys → execute → reconcile column → trail
//
// With --trace every executed or rejected sequence is printed as it happens.
// A summary of the final cursor, jump mark and marks is always printed.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use log::{LevelFilter, debug};
use thiserror::Error;

use n_motion::buffer::Buffer;
use n_motion::error::{BufferError, OptionsError};
use n_motion::options::Options;
use n_motion::session::{KeyOutcome, Session};

// ─── Command line ───────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "n-drill", version, about, long_about = None)]
struct Cli {
    /// Text file the cursor moves over
    #[arg(value_name = "TEXT_FILE")]
    text_file: PathBuf,

    /// Keys to feed, each argument's characters in order
    #[arg(value_name = "KEYS")]
    keys: Vec<String>,

    /// Feed the keys in FILE after the positional ones (line breaks are skipped)
    #[arg(short = 's', long = "script", value_name = "FILE")]
    script: Option<PathBuf>,

    /// Load options from a TOML file
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override an option, `:set` style (startrow=N, centered, traillen=N)
    #[arg(short = 'o', long = "set", value_name = "NAME[=VALUE]")]
    set: Vec<String>,

    /// Print every executed or rejected key sequence
    #[arg(long)]
    trace: bool,

    /// Log at debug level
    #[arg(short = 'v', long)]
    verbose: bool,
}

// ─── Errors ─────────────────────────────────────────────────────────────────

#[derive(Error, Debug)]
enum DrillError {
    #[error(transparent)]
    Text(#[from] BufferError),

    #[error(transparent)]
    Options(#[from] OptionsError),

    #[error("cannot read script {}: {source}", path.display())]
    Script {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

// ─── Replay ─────────────────────────────────────────────────────────────────

/// Feed `keys` into `session`, returning the trace transcript (empty unless
/// `trace` is set).
fn replay(session: &mut Session, keys: &str, trace: bool) -> String {
    let mut out = String::new();
    for key in keys.chars() {
        let typed = format!("{}{key}", session.pending());
        match session.feed_key(key) {
            KeyOutcome::Executed(command) if trace => {
                out.push_str(&format!("{typed} {} -> {}\n", command.action, session.cursor()));
            }
            KeyOutcome::Rejected if trace => out.push_str(&format!("{typed} rejected\n")),
            _ => {}
        }
    }
    out
}

/// Final cursor, pending keys, jump mark and marks.
fn summary(session: &Session) -> String {
    let mut out = format!("cursor  {}\n", session.cursor());
    if !session.pending().is_empty() {
        out.push_str(&format!("pending {}\n", session.pending()));
    }
    let jump = session
        .jump_mark()
        .map_or_else(|| "-".to_string(), |pos| pos.to_string());
    out.push_str(&format!("jump    {jump}\n"));
    let marks = if session.marks().is_empty() {
        "-".to_string()
    } else {
        session
            .marks()
            .iter()
            .map(|(name, pos)| format!("{name} {pos}"))
            .collect::<Vec<_>>()
            .join(", ")
    };
    out.push_str(&format!("marks   {marks}\n"));
    out
}

/// Script keys: every line's characters, without the line breaks.
fn read_script(path: &Path) -> Result<String, DrillError> {
    let text = fs::read_to_string(path).map_err(|source| DrillError::Script {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(text.lines().collect())
}

fn load_options(cli: &Cli) -> Result<Options, DrillError> {
    let mut options = match &cli.config {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    for arg in &cli.set {
        options.apply(arg)?;
    }
    Ok(options)
}

fn run(cli: &Cli) -> Result<String, DrillError> {
    let options = load_options(cli)?;
    let buffer = Buffer::from_file(&cli.text_file)?;

    let mut keys = cli.keys.concat();
    if let Some(path) = &cli.script {
        keys.push_str(&read_script(path)?);
    }
    debug!("replaying {} keys", keys.chars().count());

    let mut session = Session::new(buffer, options);
    let mut out = replay(&mut session, &keys, cli.trace);
    out.push_str(&summary(&session));
    Ok(out)
}

fn init_logging(verbose: bool) {
    let env = env_logger::Env::default().default_filter_or("warn");
    let mut builder = env_logger::Builder::from_env(env);
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(out) => print!("{out}"),
        Err(e) => {
            eprintln!("n-drill: {e}");
            process::exit(1);
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use n_motion::position::Position;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const TEXT: &str = "hello world\n  indented line\n\nlast paragraph here\n";

    // ── Helpers ───────────────────────────────────────────────────────────

    fn session() -> Session {
        let options = Options {
            start_row: 0,
            start_centered: false,
            ..Options::default()
        };
        Session::from_text(TEXT, options).unwrap()
    }

    fn text_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TEXT.as_bytes()).unwrap();
        file
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("n-drill").chain(args.iter().copied())).unwrap()
    }

    // ── replay ────────────────────────────────────────────────────────────

    #[test]
    fn replay_without_trace_is_silent() {
        let mut s = session();
        assert_eq!(replay(&mut s, "jw", false), "");
        assert_eq!(s.cursor(), Position::new(1, 2));
    }

    #[test]
    fn replay_trace_lists_commands_with_their_keys() {
        let mut s = session();
        let out = replay(&mut s, "2jxgjfh}", true);
        assert_eq!(
            out,
            "2j down -> 3:1\n\
             gj rejected\n\
             fh find_forward 'h' -> 3:1\n\
             } paragraph_down -> 4:1\n"
        );
    }

    #[test]
    fn replay_leaves_incomplete_keys_pending() {
        let mut s = session();
        replay(&mut s, "j3f", false);
        assert_eq!(s.pending(), "3f");
    }

    // ── summary ───────────────────────────────────────────────────────────

    #[test]
    fn summary_of_fresh_session() {
        assert_eq!(summary(&session()), "cursor  1:1\njump    -\nmarks   -\n");
    }

    #[test]
    fn summary_lists_marks_and_jump() {
        let mut s = session();
        replay(&mut s, "jmb$maG2", false);
        assert_eq!(
            summary(&s),
            "cursor  4:15\n\
             pending 2\n\
             jump    2:15\n\
             marks   a 2:15, b 2:1\n"
        );
    }

    // ── run ───────────────────────────────────────────────────────────────

    #[test]
    fn run_with_keys_and_script() {
        let text = text_file();
        let mut script = tempfile::NamedTempFile::new().unwrap();
        writeln!(script, "w\nma").unwrap();
        let path = text.path().to_str().unwrap();
        let script_path = script.path().to_str().unwrap();

        let args = [path, "-o", "sr=0", "-o", "noce", "j", "e", "--script", script_path];
        let out = run(&cli(&args)).unwrap();
        assert_eq!(out, "cursor  2:12\njump    -\nmarks   a 2:12\n");
    }

    #[test]
    fn run_starts_centered_on_clamped_row_eight() {
        let text = text_file();
        let out = run(&cli(&[text.path().to_str().unwrap()])).unwrap();
        assert_eq!(out, "cursor  4:10\njump    -\nmarks   -\n");
    }

    #[test]
    fn run_applies_config_then_overrides() {
        let text = text_file();
        let mut config = tempfile::NamedTempFile::new().unwrap();
        writeln!(config, "start_row = 3\nstart_centered = true").unwrap();
        let path = text.path().to_str().unwrap();
        let config_path = config.path().to_str().unwrap();

        let out = run(&cli(&[path, "-c", config_path, "-o", "startrow=1"])).unwrap();
        assert!(out.starts_with("cursor  2:8\n"), "{out}");
    }

    #[test]
    fn run_reports_bad_override() {
        let text = text_file();
        let path = text.path().to_str().unwrap();
        let err = run(&cli(&[path, "--set", "scrolloff=3"])).unwrap_err();
        assert_eq!(err.to_string(), "unknown option: scrolloff");
    }

    #[test]
    fn run_reports_empty_text() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        let err = run(&cli(&[path])).unwrap_err();
        assert!(matches!(err, DrillError::Text(BufferError::Empty)));
    }

    #[test]
    fn run_reports_missing_script() {
        let text = text_file();
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("keys.txt");
        let args = [
            text.path().to_str().unwrap(),
            "--script",
            missing.to_str().unwrap(),
        ];
        assert!(matches!(run(&cli(&args)), Err(DrillError::Script { .. })));
    }

    #[test]
    fn cli_collects_keys_and_overrides() {
        let parsed = cli(&["t.txt", "3j", "w", "-o", "ce", "--set", "tl=5", "--trace"]);
        assert_eq!(parsed.text_file, PathBuf::from("t.txt"));
        assert_eq!(parsed.keys, vec!["3j", "w"]);
        assert_eq!(parsed.set, vec!["ce", "tl=5"]);
        assert!(parsed.trace);
        assert!(!parsed.verbose);
    }
}
