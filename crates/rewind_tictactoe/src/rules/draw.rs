//! Draw detection logic for tic-tac-toe.

use super::win::detect_winner;
use crate::{BOARD_CELLS, Board};
use tracing::instrument;

/// Checks if the board is full (all squares occupied).
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.occupied() == BOARD_CELLS
}

/// A full board with no winning line.
#[instrument(skip(board))]
pub fn is_draw(board: &Board) -> bool {
    is_full(board) && detect_winner(board).is_none()
}
