//! Engine error and move outcome types.

use derive_more::{Display, Error};
use serde::Serialize;

use crate::{Player, Position};

/// Caller contract violations.
///
/// These only arise from a bug in whatever forwards intents to the engine,
/// never from ordinary play.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum EngineError {
    /// An index was outside its valid range.
    #[display("Invalid {what}: {value} (must be below {limit})")]
    InvalidArgument {
        /// Which argument was wrong.
        what: &'static str,
        /// The value supplied.
        value: usize,
        /// Exclusive upper bound.
        limit: usize,
    },
}

impl EngineError {
    /// Out-of-range board cell.
    pub fn invalid_cell(value: usize) -> Self {
        Self::InvalidArgument {
            what: "cell index",
            value,
            limit: crate::BOARD_CELLS,
        }
    }

    /// Out-of-range history step.
    pub fn invalid_step(value: usize, history_len: usize) -> Self {
        Self::InvalidArgument {
            what: "history step",
            value,
            limit: history_len,
        }
    }
}

/// Why a click left the game untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum IgnoreReason {
    /// The round has not been started.
    #[display("game not started")]
    NotStarted,
    /// The cell already holds a mark.
    #[display("{_0} is already occupied")]
    CellOccupied(Position),
    /// The viewed board already has a winner.
    #[display("game is already won")]
    GameOver,
}

/// Result of a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MoveOutcome {
    /// A mark was placed and appended to history.
    Placed {
        /// Where the mark went.
        position: Position,
        /// The mark placed.
        symbol: Player,
    },
    /// Nothing changed.
    Ignored(IgnoreReason),
}

impl MoveOutcome {
    /// Whether the click changed the game.
    pub fn is_placed(&self) -> bool {
        matches!(self, MoveOutcome::Placed { .. })
    }
}
