//! Board history for time travel.

use serde::Serialize;
use tracing::{debug, instrument};

use crate::Board;

/// Ordered board snapshots, starting with the empty board.
///
/// The first entry can never be removed, so a history is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct History {
    entries: Vec<Board>,
}

impl History {
    /// A history holding only the empty board.
    pub fn new() -> Self {
        Self {
            entries: vec![Board::new()],
        }
    }

    /// Number of entries, including the initial board.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Entry at `step`, if it exists.
    pub fn get(&self, step: usize) -> Option<&Board> {
        self.entries.get(step)
    }

    /// The most recent entry.
    pub fn latest(&self) -> &Board {
        // entries[0] is never removed
        &self.entries[self.entries.len() - 1]
    }

    /// Index of the most recent entry.
    pub fn last_step(&self) -> usize {
        self.entries.len() - 1
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[Board] {
        &self.entries
    }

    /// Drops everything after `step` and appends `board`.
    ///
    /// Returns the index of the appended entry.
    #[instrument(skip(self, board), fields(before = self.entries.len()))]
    pub fn branch_from(&mut self, step: usize, board: Board) -> usize {
        let keep = (step + 1).min(self.entries.len());
        if keep < self.entries.len() {
            debug!(discarded = self.entries.len() - keep, "Discarding future entries");
        }
        self.entries.truncate(keep);
        self.entries.push(board);
        self.last_step()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Player, Position};

    #[test]
    fn test_new_history_has_empty_board() {
        let history = History::new();
        assert_eq!(history.len(), 1);
        assert_eq!(history.latest(), &Board::new());
        assert_eq!(history.last_step(), 0);
    }

    #[test]
    fn test_branch_from_latest_appends() {
        let mut history = History::new();
        let board = Board::new().with_mark(Position::Center, Player::X);
        assert_eq!(history.branch_from(0, board.clone()), 1);
        assert_eq!(history.latest(), &board);
    }

    #[test]
    fn test_branch_from_earlier_step_truncates() {
        let mut history = History::new();
        let first = Board::new().with_mark(Position::TopLeft, Player::X);
        let second = first.with_mark(Position::Center, Player::O);
        history.branch_from(0, first.clone());
        history.branch_from(1, second);
        assert_eq!(history.len(), 3);

        let replacement = Board::new().with_mark(Position::BottomRight, Player::X);
        assert_eq!(history.branch_from(0, replacement.clone()), 1);
        assert_eq!(history.len(), 2);
        assert_eq!(history.get(1), Some(&replacement));
        assert_eq!(history.get(2), None);
    }
}
