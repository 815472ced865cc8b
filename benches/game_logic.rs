use criterion::{black_box, criterion_group, criterion_main, Criterion};
use matrix_tetris::core::{GameState, Grid, Piece};
use matrix_tetris::engine::project_columns;
use matrix_tetris::types::{PieceKind, FULL_ROW};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345);

    c.bench_function("gravity_tick", |b| {
        b.iter(|| {
            if state.tick().is_ok() && state.game_over() {
                state.reset();
            }
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_rows", |b| {
        b.iter(|| {
            let mut grid = Grid::new();
            for y in 32..36 {
                grid.set_row(y, FULL_ROW);
            }
            black_box(grid.clear_full_rows());
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut piece = Piece::new(PieceKind::L);

    c.bench_function("rotate", |b| {
        b.iter(|| {
            piece.rotate();
            black_box(piece);
        })
    });
}

fn bench_will_collide(c: &mut Criterion) {
    let mut grid = Grid::new();
    for y in 20..36 {
        grid.set_row(y, 0xE7);
    }
    let piece = Piece::new(PieceKind::T);

    c.bench_function("will_collide", |b| {
        b.iter(|| grid.will_collide(black_box(&piece), black_box(3), black_box(18)))
    });
}

fn bench_project_columns(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    for _ in 0..40 {
        let _ = state.tick();
    }

    c.bench_function("project_columns", |b| {
        b.iter(|| project_columns(black_box(state.grid()), Some(state.active())))
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_rotate,
    bench_will_collide,
    bench_project_columns
);
criterion_main!(benches);
