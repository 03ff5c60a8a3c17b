//! Headless intent scripts.
//!
//! Each non-blank line is one command. The session is driven exactly as the
//! terminal UI drives it, and snapshots are printed as plain text.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use derive_more::{Display, Error};
use derive_new::new;
use tracing::{debug, info, instrument, warn};

use rewind_tictactoe::{Dispatched, Intent, MoveOutcome, Seat, Session, Snapshot, Standing};

/// One parsed script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    /// Forward an intent to the session.
    Intent(Intent),
    /// Rename a seat (only before start).
    Rename(Seat, String),
    /// Print the current snapshot.
    Show,
}

/// A line that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, new)]
#[display("Script line {line}: {message}")]
pub struct ScriptError {
    /// 1-based line number.
    pub line: usize,
    /// What was wrong.
    pub message: String,
}

/// Parses one line. Blank lines and `#` comments yield `None`.
///
/// A trailing `#` comment is allowed after every command except `name`,
/// whose text runs to the end of the line.
pub fn parse_line(number: usize, text: &str) -> Result<Option<ScriptCommand>, ScriptError> {
    let text = text.trim();
    let uncommented = text.split('#').next().unwrap_or_default().trim();
    if uncommented.is_empty() {
        return Ok(None);
    }

    let mut words = uncommented.splitn(2, char::is_whitespace);
    let verb = words.next().unwrap_or_default().to_lowercase();
    let rest = if verb == "name" {
        text.splitn(2, char::is_whitespace).nth(1).unwrap_or_default().trim()
    } else {
        words.next().map(str::trim).unwrap_or_default()
    };

    let index = |what: &str| -> Result<usize, ScriptError> {
        rest.parse::<usize>()
            .map_err(|_| ScriptError::new(number, format!("expected {what}, found {rest:?}")))
    };

    let command = match verb.as_str() {
        "start" => ScriptCommand::Intent(Intent::Start),
        "reset" => ScriptCommand::Intent(Intent::Reset),
        "show" => ScriptCommand::Show,
        "click" => ScriptCommand::Intent(Intent::Click(index("a cell index")?)),
        "jump" => ScriptCommand::Intent(Intent::JumpTo(index("a history step")?)),
        "name" => {
            let mut parts = rest.splitn(2, char::is_whitespace);
            let seat = match parts.next() {
                Some("1") => Seat::One,
                Some("2") => Seat::Two,
                other => {
                    return Err(ScriptError::new(
                        number,
                        format!("expected seat 1 or 2, found {:?}", other.unwrap_or_default()),
                    ));
                }
            };
            ScriptCommand::Rename(seat, parts.next().unwrap_or_default().trim().to_string())
        }
        other => {
            return Err(ScriptError::new(number, format!("unknown command {other:?}")));
        }
    };

    Ok(Some(command))
}

/// Runs every line of `input` against `session`, writing output to `out`.
///
/// Out-of-range indices abort the script; clicks the game ignores are
/// reported and the script continues.
#[instrument(skip_all, fields(json = json))]
pub fn run(
    session: &mut Session,
    input: impl BufRead,
    mut out: impl Write,
    json: bool,
) -> Result<()> {
    for (i, line) in input.lines().enumerate() {
        let number = i + 1;
        let line = line.context("Failed to read script")?;
        let Some(command) = parse_line(number, &line)? else {
            continue;
        };
        debug!(number, ?command, "Running script line");

        match command {
            ScriptCommand::Intent(intent) => {
                let dispatched = session
                    .dispatch(intent)
                    .with_context(|| format!("Script line {number}: {intent}"))?;
                match dispatched {
                    Dispatched::Moved(MoveOutcome::Ignored(reason)) => {
                        warn!(number, %reason, "Click ignored");
                        writeln!(out, "line {number}: ignored ({reason})")?;
                    }
                    Dispatched::Reset(Some(seat)) => {
                        info!(%seat, "Round credited");
                    }
                    _ => {}
                }
            }
            ScriptCommand::Rename(seat, name) => {
                if !session.rename(seat, name) {
                    writeln!(out, "line {number}: names are locked once the game starts")?;
                }
            }
            ScriptCommand::Show => {
                writeln!(out, "{}\n", render_text(session.snapshot()))?;
            }
        }
    }

    if json {
        let text = serde_json::to_string_pretty(session.snapshot())
            .context("Failed to serialize snapshot")?;
        writeln!(out, "{text}")?;
    } else {
        writeln!(out, "{}", render_text(session.snapshot()))?;
    }

    Ok(())
}

/// Plain-text rendering of a snapshot.
pub fn render_text(snapshot: &Snapshot) -> String {
    let mut text = snapshot.board().display();

    if !snapshot.status_text().is_empty() {
        text.push_str("\n\n");
        text.push_str(snapshot.status_text());
    }

    if let Some(win) = snapshot.winning_line() {
        let cells: Vec<String> = win.indices().iter().map(ToString::to_string).collect();
        text.push_str(&format!(" [{}]", cells.join(", ")));
    }

    for label in snapshot.moves() {
        let marker = if *label.current() { ">" } else { " " };
        text.push_str(&format!("\n{marker} {}", label.text()));
    }

    text.push_str("\nScore");
    for seat in snapshot.seats() {
        let badge = match seat.standing() {
            Standing::Leading => " (leading)",
            Standing::Trailing | Standing::Level => "",
        };
        text.push_str(&format!("\n  {} [{}]{badge}", seat.score_text(), seat.symbol()));
    }

    text
}
