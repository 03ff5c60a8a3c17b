//! Application state and key handling.

use std::sync::mpsc;

use crossterm::event::KeyCode;
use rewind_tictactoe::{
    Dispatched, Intent, MoveOutcome, PlayerNames, Position, Seat, Session, Snapshot,
};
use tracing::{debug, info, instrument, warn};

use super::input::{digit_cell, move_cursor};

/// A seat name being typed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameEntry {
    /// Seat being renamed.
    pub seat: Seat,
    /// Text typed so far.
    pub buffer: String,
}

/// Main application state.
///
/// Holds the session and the latest snapshot it published. Rendering reads
/// only the snapshot; key presses become intents.
pub struct App {
    session: Session,
    updates: mpsc::Receiver<Snapshot>,
    view: Snapshot,
    cursor: Position,
    editing: Option<NameEntry>,
    message: String,
    should_quit: bool,
}

impl App {
    /// Creates the app and subscribes it to `names`' session.
    #[instrument(skip(names))]
    pub fn new(names: PlayerNames) -> Self {
        let mut session = Session::new(names);
        let (tx, rx) = mpsc::channel();
        session.subscribe(tx);
        let view = session.snapshot().clone();

        Self {
            session,
            updates: rx,
            view,
            cursor: Position::Center,
            editing: None,
            message: "Press s to start, Tab to enter names.".to_string(),
            should_quit: false,
        }
    }

    /// The snapshot to draw.
    pub fn view(&self) -> &Snapshot {
        &self.view
    }

    /// Board cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Name being edited, if any.
    pub fn editing(&self) -> Option<&NameEntry> {
        self.editing.as_ref()
    }

    /// Last feedback message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the main loop should exit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handles one key press.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, key: KeyCode) {
        if self.editing.is_some() {
            self.handle_name_key(key);
            return;
        }

        match key {
            KeyCode::Char('q') | KeyCode::Esc => {
                info!("User quit");
                self.should_quit = true;
            }
            KeyCode::Char('s') => self.send(Intent::Start),
            KeyCode::Char('r') => self.send(Intent::Reset),
            KeyCode::Char('[') => {
                if let Some(step) = self.view.current_step().checked_sub(1) {
                    self.send(Intent::JumpTo(step));
                }
            }
            KeyCode::Char(']') => {
                let step = self.view.current_step() + 1;
                if step < self.view.moves().len() {
                    self.send(Intent::JumpTo(step));
                }
            }
            KeyCode::Char('0') if !self.view.moves().is_empty() => self.send(Intent::JumpTo(0)),
            KeyCode::Char(c) if digit_cell(c).is_some() => {
                if let Some(cell) = digit_cell(c) {
                    self.cursor = Position::from_index(cell).unwrap_or(self.cursor);
                    self.send(Intent::Click(cell));
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.send(Intent::Click(self.cursor.to_index())),
            KeyCode::Tab => self.begin_editing(Seat::One),
            code @ (KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right) => {
                self.cursor = move_cursor(self.cursor, code);
            }
            _ => {}
        }
    }

    fn begin_editing(&mut self, seat: Seat) {
        if self.session.engine().is_started() {
            self.message = "Names are locked once the game starts.".to_string();
            return;
        }
        debug!(%seat, "Editing name");
        self.editing = Some(NameEntry {
            seat,
            buffer: self.session.names().get(seat).to_string(),
        });
        self.message = "Type a name, Enter to save, Tab for the other player, Esc to cancel."
            .to_string();
    }

    fn handle_name_key(&mut self, key: KeyCode) {
        let Some(entry) = self.editing.as_mut() else {
            return;
        };

        match key {
            KeyCode::Char(c) => entry.buffer.push(c),
            KeyCode::Backspace => {
                entry.buffer.pop();
            }
            KeyCode::Esc => {
                self.editing = None;
                self.message.clear();
            }
            KeyCode::Enter | KeyCode::Tab => {
                let NameEntry { seat, buffer } = entry.clone();
                self.session.rename(seat, buffer);
                self.drain();
                if key == KeyCode::Tab {
                    self.begin_editing(seat.other());
                } else {
                    self.editing = None;
                    self.message = "Names saved. Press s to start.".to_string();
                }
            }
            _ => {}
        }
    }

    /// Forwards an intent and records feedback for the status bar.
    fn send(&mut self, intent: Intent) {
        match self.session.dispatch(intent) {
            Ok(Dispatched::Moved(MoveOutcome::Ignored(reason))) => {
                debug!(%reason, "Click ignored");
                self.message = format!("Ignored: {reason}.");
            }
            Ok(Dispatched::Reset(Some(seat))) => {
                self.message = format!("Point to {}.", self.session.names().get(seat));
            }
            Ok(Dispatched::Reset(None)) => {
                self.message = "New round, no points awarded.".to_string();
            }
            Ok(_) => self.message.clear(),
            Err(e) => {
                warn!(error = %e, %intent, "Intent rejected");
                self.message = e.to_string();
            }
        }
        self.drain();
    }

    /// Pulls every published snapshot, keeping the newest.
    fn drain(&mut self) {
        for snapshot in self.updates.try_iter() {
            self.view = snapshot;
        }
    }
}
