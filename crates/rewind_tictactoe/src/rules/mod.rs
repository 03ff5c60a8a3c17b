//! Game rules for tic-tac-toe.
//!
//! Pure functions for evaluating a board. Rules are kept apart from the
//! engine so the history model and the outcome logic can be tested alone.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, WinningLine, detect_winner};
