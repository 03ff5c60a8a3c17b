//! Tic-tac-toe engine with move history, time travel, and a seat scoreboard.
//!
//! # Architecture
//!
//! - **Rules**: pure win and draw detection over a [`Board`]
//! - **Engine**: [`GameEngine`] owns history, turn, seat ownership of X, and scores
//! - **Snapshot**: [`Snapshot`] is the read-only projection handed to renderers
//! - **Session**: [`Session`] dispatches [`Intent`]s and notifies observers
//!
//! # Example
//!
//! ```
//! use rewind_tictactoe::{GameStatus, Intent, Session};
//!
//! let mut session = Session::default();
//! session.dispatch(Intent::Start)?;
//! for cell in [0, 1, 4, 2, 8] {
//!     session.dispatch(Intent::Click(cell))?;
//! }
//! assert_eq!(*session.snapshot().status(), GameStatus::Winner);
//! assert_eq!(session.snapshot().status_text(), "Winner is: Player 1!");
//! # Ok::<(), rewind_tictactoe::EngineError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod engine;
mod error;
mod history;
pub mod invariants;
mod position;
pub mod rules;
mod seat;
mod session;
mod snapshot;
mod types;

pub use engine::{FULL_HISTORY_LEN, GameEngine, GameStatus, Phase};
pub use error::{EngineError, IgnoreReason, MoveOutcome};
pub use history::History;
pub use position::Position;
pub use rules::{WinningLine, detect_winner};
pub use seat::{Scores, Seat, Standing};
pub use session::{Dispatched, Intent, Session, SnapshotObserver};
pub use snapshot::{MoveLabel, PlayerNames, SeatLine, Snapshot};
pub use types::{BOARD_CELLS, BOARD_SIDE, Board, Player, Square};
