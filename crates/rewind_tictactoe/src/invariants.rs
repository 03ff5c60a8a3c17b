//! First-class invariants for the game engine.
//!
//! Each invariant is a logical property that must hold after every
//! operation. They are checked in debug builds and tested on their own.

use crate::rules::{detect_winner, is_draw, is_full};
use crate::{Board, FULL_HISTORY_LEN, GameEngine, GameStatus, Player, Position, Square};

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

impl<S, I1, I2, I3, I4, I5> InvariantSet<S> for (I1, I2, I3, I4, I5)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
    I4: Invariant<S>,
    I5: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }

        if !I4::holds(state) {
            violations.push(InvariantViolation::new(I4::description()));
        }

        if !I5::holds(state) {
            violations.push(InvariantViolation::new(I5::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Invariant: the viewed step points at an existing history entry.
pub struct StepInBounds;

impl Invariant<GameEngine> for StepInBounds {
    fn holds(engine: &GameEngine) -> bool {
        engine.current_step() < engine.history().len()
    }

    fn description() -> &'static str {
        "Current step is inside the history"
    }
}

/// Invariant: X is next exactly when an even number of moves are on the viewed board.
pub struct TurnMatchesStep;

impl Invariant<GameEngine> for TurnMatchesStep {
    fn holds(engine: &GameEngine) -> bool {
        engine.x_is_next() == (engine.current_step() % 2 == 0)
    }

    fn description() -> &'static str {
        "Turn flag matches the parity of the current step"
    }
}

/// Invariant: each entry adds exactly one mark to the one before it.
///
/// Entry `i` holds `i` marks, and the mark added at odd steps is X.
pub struct HistoryConsistent;

impl HistoryConsistent {
    fn extends(prev: &Board, next: &Board, step: usize) -> bool {
        let expected = if step % 2 == 1 { Player::X } else { Player::O };
        let added: Vec<Position> = Position::ALL
            .iter()
            .copied()
            .filter(|pos| prev.get(*pos) != next.get(*pos))
            .collect();

        matches!(added.as_slice(), [pos]
            if prev.is_empty(*pos) && next.get(*pos) == Square::Occupied(expected))
    }
}

impl Invariant<GameEngine> for HistoryConsistent {
    fn holds(engine: &GameEngine) -> bool {
        let entries = engine.history().entries();

        entries.first().is_some_and(|first| first.occupied() == 0)
            && entries
                .windows(2)
                .enumerate()
                .all(|(i, pair)| Self::extends(&pair[0], &pair[1], i + 1))
    }

    fn description() -> &'static str {
        "Each history entry adds one alternating mark to the previous entry"
    }
}

/// Invariant: nothing follows a winning entry.
pub struct FrozenAfterWin;

impl Invariant<GameEngine> for FrozenAfterWin {
    fn holds(engine: &GameEngine) -> bool {
        let entries = engine.history().entries();
        entries[..entries.len() - 1]
            .iter()
            .all(|board| detect_winner(board).is_none())
    }

    fn description() -> &'static str {
        "No history entry follows a won board"
    }
}

/// Invariant: the length-based status agrees with the latest board.
///
/// A full history means a full board, and `Draw` means a full board with
/// no line.
pub struct StatusMatchesBoard;

impl Invariant<GameEngine> for StatusMatchesBoard {
    fn holds(engine: &GameEngine) -> bool {
        let latest = engine.latest_board();
        (engine.history().len() == FULL_HISTORY_LEN) == is_full(latest)
            && (engine.game_status() == GameStatus::Draw) == is_draw(latest)
    }

    fn description() -> &'static str {
        "Game status agrees with the latest board"
    }
}

/// All engine invariants as a composable set.
pub type EngineInvariants = (
    StepInBounds,
    TurnMatchesStep,
    HistoryConsistent,
    FrozenAfterWin,
    StatusMatchesBoard,
);

/// Panics in debug builds if any engine invariant is broken.
pub fn assert_invariants(engine: &GameEngine) {
    #[cfg(debug_assertions)]
    if let Err(violations) = EngineInvariants::check_all(engine) {
        panic!("Engine invariants violated: {violations:?}");
    }
    #[cfg(not(debug_assertions))]
    let _ = engine;
}
