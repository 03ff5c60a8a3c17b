//! Property-based tests for the engine.
//!
//! Random intent sequences are replayed against the engine and every
//! documented guarantee is checked after each step.

use proptest::prelude::*;
use rewind_tictactoe::invariants::{EngineInvariants, InvariantSet};
use rewind_tictactoe::rules::LINES;
use rewind_tictactoe::{
    BOARD_CELLS, Board, GameEngine, GameStatus, Intent, MoveOutcome, Player, Position, Session,
    Square, detect_winner,
};

// =============================================================================
// Strategies
// =============================================================================

fn arb_square() -> impl Strategy<Value = Square> {
    prop_oneof![
        Just(Square::Empty),
        Just(Square::Occupied(Player::X)),
        Just(Square::Occupied(Player::O)),
    ]
}

fn arb_board() -> impl Strategy<Value = Board> {
    proptest::array::uniform9(arb_square()).prop_map(Board::from_squares)
}

/// Intents within range, biased towards clicks.
fn arb_intent() -> impl Strategy<Value = Intent> {
    prop_oneof![
        1 => Just(Intent::Start),
        8 => (0usize..BOARD_CELLS).prop_map(Intent::Click),
        1 => Just(Intent::Reset),
        2 => (0usize..BOARD_CELLS + 1).prop_map(Intent::JumpTo),
    ]
}

fn apply(engine: &mut GameEngine, intent: Intent) {
    match intent {
        Intent::Start => engine.start(),
        Intent::Click(cell) => {
            engine.click(cell).unwrap();
        }
        Intent::Reset => {
            engine.reset();
        }
        Intent::JumpTo(step) => {
            if step < engine.history().len() {
                engine.jump_to(step).unwrap();
            } else {
                assert!(engine.jump_to(step).is_err());
            }
        }
    }
}

fn line_owner(board: &Board, line: [Position; 3]) -> Option<Player> {
    let [a, b, c] = line;
    let symbol = board.get(a).player()?;
    (board.get(b).player() == Some(symbol) && board.get(c).player() == Some(symbol))
        .then_some(symbol)
}

// =============================================================================
// Win detection
// =============================================================================

/// Every one of the 3^9 boards agrees with a direct scan of the line table.
#[test]
fn test_detect_winner_exhaustive() {
    let marks = [Square::Empty, Square::Occupied(Player::X), Square::Occupied(Player::O)];
    for code in 0..3usize.pow(BOARD_CELLS as u32) {
        let mut squares = [Square::Empty; BOARD_CELLS];
        let mut rest = code;
        for square in &mut squares {
            *square = marks[rest % 3];
            rest /= 3;
        }
        let board = Board::from_squares(squares);

        let expected = LINES
            .iter()
            .find_map(|line| line_owner(&board, *line).map(|p| (p, *line)));

        match (detect_winner(&board), expected) {
            (None, None) => {}
            (Some(win), Some((symbol, line))) => {
                assert_eq!(win.symbol, symbol);
                assert_eq!(win.line, line);
            }
            (got, want) => panic!("board {code}: got {got:?}, want {want:?}"),
        }
    }
}

proptest! {
    #[test]
    fn prop_winning_line_is_uniform_and_ascending(board in arb_board()) {
        if let Some(win) = detect_winner(&board) {
            let idx = win.indices();
            prop_assert!(idx[0] < idx[1] && idx[1] < idx[2]);
            for pos in win.line {
                prop_assert_eq!(board.get(pos), Square::Occupied(win.symbol));
            }
        } else {
            for line in LINES {
                prop_assert!(line_owner(&board, line).is_none());
            }
        }
    }

    #[test]
    fn prop_invariants_hold_for_any_sequence(intents in prop::collection::vec(arb_intent(), 0..60)) {
        let mut engine = GameEngine::new();
        for intent in intents {
            apply(&mut engine, intent);
            prop_assert!(EngineInvariants::check_all(&engine).is_ok());
        }
    }

    #[test]
    fn prop_click_on_concluded_game_keeps_history(intents in prop::collection::vec(arb_intent(), 0..60), cell in 0usize..BOARD_CELLS) {
        let mut engine = GameEngine::new();
        for intent in intents {
            apply(&mut engine, intent);
        }
        if engine.current_winner().is_some() {
            let len = engine.history().len();
            prop_assert!(!engine.click(cell).unwrap().is_placed());
            prop_assert_eq!(engine.history().len(), len);
        }
    }

    #[test]
    fn prop_click_never_overwrites(intents in prop::collection::vec(arb_intent(), 0..60), cell in 0usize..BOARD_CELLS) {
        let mut engine = GameEngine::new();
        for intent in intents {
            apply(&mut engine, intent);
        }
        let pos = Position::ALL[cell];
        let before = engine.current_board().get(pos);
        if before != Square::Empty {
            let outcome = engine.click(cell).unwrap();
            prop_assert!(matches!(outcome, MoveOutcome::Ignored(_)));
            prop_assert_eq!(engine.current_board().get(pos), before);
        }
    }

    #[test]
    fn prop_jump_then_click_truncates(intents in prop::collection::vec(arb_intent(), 0..60), pick in any::<prop::sample::Index>(), cell in 0usize..BOARD_CELLS) {
        let mut engine = GameEngine::new();
        engine.start();
        for intent in intents {
            apply(&mut engine, intent);
        }
        let k = pick.index(engine.history().len());
        let kept: Vec<Board> = engine.history().entries()[..=k].to_vec();

        engine.jump_to(k).unwrap();
        prop_assert_eq!(engine.x_is_next(), k % 2 == 0);

        if engine.click(cell).unwrap().is_placed() {
            prop_assert_eq!(engine.history().len(), k + 2);
            prop_assert_eq!(&engine.history().entries()[..=k], kept.as_slice());
        }
    }

    #[test]
    fn prop_one_round_scores_at_most_once(clicks in prop::collection::vec(0usize..BOARD_CELLS, 0..30), extra_resets in 0usize..3) {
        let mut session = Session::default();
        session.dispatch(Intent::Start).unwrap();
        for cell in clicks {
            session.dispatch(Intent::Click(cell)).unwrap();
        }
        let won = session.engine().game_status() == GameStatus::Winner;
        session.dispatch(Intent::Reset).unwrap();
        let total = session.engine().scores().total();
        prop_assert!(total <= 1);
        prop_assert_eq!(total == 1, won);

        for _ in 0..extra_resets {
            session.dispatch(Intent::Reset).unwrap();
        }
        prop_assert_eq!(session.engine().scores().total(), total);
    }
}
