//! Property tests for geometry and controller invariants.
//!
//! Invariants covered:
//! - rotation keeps exactly four cells and has period four
//! - hidden spawn rows and the bottom guard row never hold placed blocks
//! - the active piece always sits inside the walls without overlapping
//! - score grows by n² for each landing that clears n rows

use proptest::prelude::*;

use matrix_tetris::core::{GameState, Piece, TickOutcome};
use matrix_tetris::types::{PieceKind, GRID_HEIGHT, TOP_SAFE_ROWS};

#[derive(Debug, Clone, Copy)]
enum Action {
    Left,
    Right,
    Rotate,
    Drop,
    Tick,
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        1 => Just(Action::Left),
        1 => Just(Action::Right),
        1 => Just(Action::Rotate),
        1 => Just(Action::Drop),
        3 => Just(Action::Tick),
    ]
}

proptest! {
    #[test]
    fn rotation_preserves_cells_and_has_period_four(index in 0usize..7, turns in 0usize..8) {
        let kind = PieceKind::ALL[index];
        let mut p = Piece::new(kind);
        for _ in 0..turns {
            p.rotate();
            prop_assert_eq!(p.cell_count(), 4);
        }
        let before = p;
        for _ in 0..4 {
            p.rotate();
        }
        prop_assert_eq!(p, before);
    }

    #[test]
    fn random_play_keeps_grid_invariants(
        seed in any::<u32>(),
        actions in prop::collection::vec(action(), 1..600),
    ) {
        let mut state = GameState::new(seed);
        let mut expected_score = 0u32;

        for a in actions {
            match a {
                Action::Left => { state.move_left(); }
                Action::Right => { state.move_right(); }
                Action::Rotate => { state.try_rotate(); }
                Action::Drop => { state.soft_drop(); }
                Action::Tick => match state.tick() {
                    Ok(TickOutcome::Settled { cleared_rows, points }) => {
                        prop_assert_eq!(points, (cleared_rows * cleared_rows) as u32);
                        expected_score += points;
                    }
                    Ok(TickOutcome::GameOver) => state.reset(),
                    Ok(TickOutcome::Fell) => {}
                    Err(err) => {
                        prop_assert!(false, "{}", err);
                    }
                },
            }

            let rows = state.grid().rows();
            prop_assert!(rows[..TOP_SAFE_ROWS].iter().all(|&r| r == 0));
            prop_assert_eq!(rows[GRID_HEIGHT - 1], 0);

            let active = state.active();
            prop_assert!(state
                .grid()
                .is_valid_column_position(&active.piece, active.x, active.y));
            prop_assert_eq!(active.piece.cell_count(), 4);
        }

        prop_assert_eq!(state.score(), expected_score);
    }
}
