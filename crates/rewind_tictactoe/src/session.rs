//! Intent dispatch and change notification.
//!
//! A [`Session`] owns the engine and the player names. Presentation code
//! forwards user intents through [`Session::dispatch`] and learns about
//! changes by subscribing a [`SnapshotObserver`]; it never touches the
//! engine directly.

use std::sync::mpsc;

use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::error::{EngineError, MoveOutcome};
use crate::{GameEngine, PlayerNames, Seat, Snapshot};

/// Something the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum Intent {
    /// Start the game.
    #[display("start")]
    Start,
    /// Click a cell (0-8).
    #[display("click {_0}")]
    Click(usize),
    /// Close the round and begin the next.
    #[display("reset")]
    Reset,
    /// View the board after the given number of moves.
    #[display("jump {_0}")]
    JumpTo(usize),
}

/// What a dispatched intent did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Dispatched {
    /// The game was started (or already running).
    Started,
    /// Result of a click.
    Moved(MoveOutcome),
    /// Now viewing this step.
    Jumped(usize),
    /// A new round began; the seat credited with the old one, if any.
    Reset(Option<Seat>),
}

/// Receives a fresh snapshot whenever the projection changes.
pub trait SnapshotObserver {
    /// Called with the new projection.
    fn on_snapshot(&mut self, snapshot: &Snapshot);
}

impl<F> SnapshotObserver for F
where
    F: FnMut(&Snapshot),
{
    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        self(snapshot)
    }
}

impl SnapshotObserver for mpsc::Sender<Snapshot> {
    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        // A dropped receiver just means nobody is rendering any more.
        if self.send(snapshot.clone()).is_err() {
            trace!("Snapshot receiver gone");
        }
    }
}

/// The single owner of game state for one process.
pub struct Session {
    engine: GameEngine,
    names: PlayerNames,
    last: Snapshot,
    observers: Vec<Box<dyn SnapshotObserver>>,
}

impl Session {
    /// A fresh session with the given names.
    #[instrument(skip(names))]
    pub fn new(names: PlayerNames) -> Self {
        let engine = GameEngine::new();
        let last = Snapshot::capture(&engine, &names);
        Self {
            engine,
            names,
            last,
            observers: Vec::new(),
        }
    }

    /// Registers an observer and sends it the current snapshot.
    pub fn subscribe(&mut self, mut observer: impl SnapshotObserver + 'static) {
        observer.on_snapshot(&self.last);
        self.observers.push(Box::new(observer));
    }

    /// Applies `intent` and notifies observers if anything visible changed.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidArgument`] for an out-of-range cell or step.
    #[instrument(skip(self))]
    pub fn dispatch(&mut self, intent: Intent) -> Result<Dispatched, EngineError> {
        let dispatched = match intent {
            Intent::Start => {
                self.engine.start();
                Dispatched::Started
            }
            Intent::Click(cell) => Dispatched::Moved(self.engine.click(cell)?),
            Intent::Reset => Dispatched::Reset(self.engine.reset()),
            Intent::JumpTo(step) => {
                self.engine.jump_to(step)?;
                Dispatched::Jumped(step)
            }
        };

        debug!(?dispatched, "Intent applied");
        self.publish();
        Ok(dispatched)
    }

    /// Renames a seat. Names are locked once the game starts.
    ///
    /// Returns whether the name was changed.
    #[instrument(skip(self, name))]
    pub fn rename(&mut self, seat: Seat, name: impl Into<String>) -> bool {
        if self.engine.is_started() {
            debug!("Rename ignored: game already started");
            return false;
        }
        self.names.set(seat, name);
        self.publish();
        true
    }

    /// The latest projection.
    pub fn snapshot(&self) -> &Snapshot {
        &self.last
    }

    /// Read access to the engine.
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Current player names.
    pub fn names(&self) -> &PlayerNames {
        &self.names
    }

    fn publish(&mut self) {
        let next = Snapshot::capture(&self.engine, &self.names);
        if next == self.last {
            trace!("Projection unchanged");
            return;
        }
        self.last = next;
        for observer in &mut self.observers {
            observer.on_snapshot(&self.last);
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(PlayerNames::default())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("engine", &self.engine)
            .field("names", &self.names)
            .field("observers", &self.observers.len())
            .finish()
    }
}
