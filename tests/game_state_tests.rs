//! Piece controller tests - landing, stacking, scoring and game over

use matrix_tetris::core::{ActivePiece, Blocked, GameState, Phase, ShapeSequence, TickOutcome};
use matrix_tetris::types::{PieceKind, FULL_ROW, VISIBLE_BOTTOM, VISIBLE_TOP};

type OnlyO = ShapeSequence<1>;

fn o_only() -> GameState<OnlyO> {
    GameState::with_entropy(ShapeSequence::new([PieceKind::O.index()]))
}

/// Tick until the active piece stops falling
fn drop_piece(state: &mut GameState<OnlyO>) -> TickOutcome {
    loop {
        match state.tick().expect("commit stays inside the grid") {
            TickOutcome::Fell => continue,
            other => return other,
        }
    }
}

#[test]
fn test_o_pieces_stack_on_each_other() {
    let mut state = o_only();

    for (i, top) in [34i8, 32, 30].into_iter().enumerate() {
        let outcome = drop_piece(&mut state);
        assert_eq!(
            outcome,
            TickOutcome::Settled {
                cleared_rows: 0,
                points: 0
            },
            "piece {i}"
        );
        assert_eq!(state.grid().row(top), Some(0x18));
        assert_eq!(state.grid().row(top + 1), Some(0x18));
    }

    // The next O is grounded exactly on top of the stack.
    let o = ActivePiece {
        y: 28,
        ..*state.active()
    };
    assert!(state.grid().will_collide(&o.piece, o.x, o.y));
    assert!(!state.grid().will_collide(&o.piece, o.x, o.y - 1));
    assert_eq!(state.grid().row(29), Some(0));
}

#[test]
fn test_stack_reaching_top_ends_round_and_reset_clears() {
    let mut state = o_only();

    let mut settled = 0;
    loop {
        match drop_piece(&mut state) {
            TickOutcome::Settled { .. } => settled += 1,
            TickOutcome::GameOver => break,
            TickOutcome::Fell => unreachable!(),
        }
    }

    // 16 O pieces fill the 32 visible rows of columns 3-4.
    assert_eq!(settled, 16);
    assert_eq!(state.pieces_spawned(), 17);
    assert_eq!(state.phase(), Phase::GameOver);
    for y in VISIBLE_TOP..VISIBLE_BOTTOM {
        assert_eq!(state.grid().row(y as i8), Some(0x18), "row {y}");
    }

    state.reset();
    assert!(state.grid().is_empty());
    assert_eq!(state.phase(), Phase::Falling);
    assert_eq!(state.rounds(), 1);
    assert_eq!(state.active().y, 2);
}

#[test]
fn test_horizontal_move_rejected_beside_occupied_cell() {
    let mut state = o_only();
    state.set_active(ActivePiece {
        y: 19,
        ..*state.active()
    });
    state.grid_mut().set_row(20, 0x20);

    let a = *state.active();
    assert_eq!(
        state.grid().check_column_position(&a.piece, a.x + 1, a.y),
        Err(Blocked::Occupied)
    );
    assert!(!state.move_left());
    assert_eq!(state.active().x, 3);

    assert!(state.move_right());
    assert_eq!(state.active().x, 2);
}

#[test]
fn test_single_row_clear_scores_one() {
    let mut state = o_only();
    state.grid_mut().set_row(35, FULL_ROW ^ 0x18);

    let outcome = drop_piece(&mut state);
    assert_eq!(
        outcome,
        TickOutcome::Settled {
            cleared_rows: 1,
            points: 1
        }
    );
    assert_eq!(state.score(), 1);
    assert_eq!(state.lines(), 1);
    // The O's upper half dropped into the cleared row.
    assert_eq!(state.grid().row(35), Some(0x18));
    assert_eq!(state.grid().row(34), Some(0));
}

#[test]
fn test_double_row_clear_scores_four() {
    let mut state = o_only();
    state.grid_mut().set_row(34, FULL_ROW ^ 0x18);
    state.grid_mut().set_row(35, FULL_ROW ^ 0x18);

    let outcome = drop_piece(&mut state);
    assert_eq!(
        outcome,
        TickOutcome::Settled {
            cleared_rows: 2,
            points: 4
        }
    );
    assert_eq!(state.score(), 4);
    assert!(state.grid().is_empty());
}

#[test]
fn test_score_carries_over_into_next_round() {
    let mut state = o_only();
    state.grid_mut().set_row(35, FULL_ROW ^ 0x18);
    drop_piece(&mut state);
    assert_eq!(state.score(), 1);

    state.grid_mut().set_row(VISIBLE_TOP as i8, 0x18);
    assert_eq!(drop_piece(&mut state), TickOutcome::GameOver);
    state.reset();
    assert_eq!(state.score(), 1);
}

#[test]
fn test_clear_full_rows_is_idempotent() {
    let mut state = o_only();
    state.grid_mut().set_row(33, 0x42);
    state.grid_mut().set_row(35, FULL_ROW);

    assert_eq!(state.grid_mut().clear_full_rows().len(), 1);
    let after = state.grid().clone();
    assert!(state.grid_mut().clear_full_rows().is_empty());
    assert_eq!(state.grid(), &after);
    assert_eq!(after.row(34), Some(0x42));
}

#[test]
fn test_same_seed_replays_same_pieces() {
    let mut a = GameState::new(777);
    let mut b = GameState::new(777);
    for _ in 0..200 {
        assert_eq!(a.active().kind, b.active().kind);
        assert_eq!(a.tick(), b.tick());
    }
    assert_eq!(a.grid(), b.grid());
}
