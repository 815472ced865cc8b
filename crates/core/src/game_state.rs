//! Game state module - the active piece controller
//!
//! Ties the grid, the active piece, the entropy source and the score
//! together. One call to [`GameState::tick`] is one gravity step:
//!
//! ```text
//! Falling --will_collide--> Landing --above visible top--> GameOver
//!                              |
//!                              +--commit, clear rows, score--> Settled --spawn--> Falling
//! ```

use crate::grid::{Grid, GridError};
use crate::pieces::Piece;
use crate::rng::{EntropySource, SimpleRng};
use crate::scoring::line_clear_points;
use crate::types::{PieceKind, SHAPE_COUNT, SPAWN_X, TOP_SAFE_ROWS, VISIBLE_TOP};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub piece: Piece,
    /// Column offset; larger values sit further left
    pub x: i8,
    /// Grid row of the piece's top row
    pub y: i8,
}

impl ActivePiece {
    /// Spawn placement: column 3, feet on the last hidden row
    pub fn spawn(kind: PieceKind) -> Self {
        let piece = Piece::new(kind);
        Self {
            kind,
            piece,
            x: SPAWN_X,
            y: (TOP_SAFE_ROWS - piece.feet_index() - 1) as i8,
        }
    }

    /// Grid row of the lowest occupied piece row
    pub fn feet_row(&self) -> i8 {
        self.y + self.piece.feet_index() as i8
    }

    /// Has the piece never moved below the hidden spawn rows?
    pub fn is_above_visible_top(&self) -> bool {
        usize::try_from(self.y).map_or(true, |y| y < VISIBLE_TOP)
    }
}

/// Where the controller is in its per-tick state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Falling,
    Landing,
    Settled,
    GameOver,
}

/// Result of one gravity step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The piece moved down one row
    Fell,
    /// The piece landed, was committed and a new piece spawned
    Settled { cleared_rows: usize, points: u32 },
    /// The piece landed before entering the visible playfield
    GameOver,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState<R = SimpleRng> {
    grid: Grid,
    active: ActivePiece,
    phase: Phase,
    entropy: R,
    score: u32,
    lines: u32,
    pieces_spawned: u32,
    /// Completed rounds (increments on every reset after game over)
    rounds: u32,
}

impl GameState<SimpleRng> {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_entropy(SimpleRng::new(seed))
    }
}

impl<R: EntropySource> GameState<R> {
    /// Create a new game drawing shapes from `entropy`; the first piece is spawned immediately
    pub fn with_entropy(entropy: R) -> Self {
        let mut state = Self {
            grid: Grid::new(),
            active: ActivePiece::spawn(PieceKind::O),
            phase: Phase::Falling,
            entropy,
            score: 0,
            lines: 0,
            pieces_spawned: 0,
            rounds: 0,
        };
        state.spawn();
        state
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn active(&self) -> &ActivePiece {
        &self.active
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Replace the active piece with a random one at the spawn position
    pub fn spawn(&mut self) {
        let index = self.entropy.next_shape_index() % SHAPE_COUNT;
        let kind = PieceKind::ALL[index];
        self.spawn_kind(kind);
    }

    /// Replace the active piece with `kind` at the spawn position
    pub fn spawn_kind(&mut self, kind: PieceKind) {
        self.active = ActivePiece::spawn(kind);
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
        if self.phase != Phase::GameOver {
            self.phase = Phase::Falling;
        }
        log::trace!("spawned {} at y={}", kind.as_str(), self.active.y);
    }

    /// Place the active piece directly (tests and tooling)
    pub fn set_active(&mut self, active: ActivePiece) {
        self.active = active;
    }

    /// Shift the piece by `dx` columns if the new position is valid
    pub fn try_move_horizontal(&mut self, dx: i8) -> bool {
        if self.game_over() {
            return false;
        }
        let a = self.active;
        let x = a.x.saturating_add(dx);
        match self.grid.check_column_position(&a.piece, x, a.y) {
            Ok(()) => {
                self.active.x = x;
                true
            }
            Err(blocked) => {
                log::trace!("move {dx:+} rejected: {}", blocked.message());
                false
            }
        }
    }

    /// Move one column to the left (towards bit 7)
    pub fn move_left(&mut self) -> bool {
        self.try_move_horizontal(1)
    }

    /// Move one column to the right (towards bit 0)
    pub fn move_right(&mut self) -> bool {
        self.try_move_horizontal(-1)
    }

    /// Rotate the piece in place if the rotated shape fits at the current position
    pub fn try_rotate(&mut self) -> bool {
        if self.game_over() {
            return false;
        }
        let a = self.active;
        let rotated = a.piece.rotated();
        match self.grid.check_column_position(&rotated, a.x, a.y) {
            Ok(()) => {
                self.active.piece = rotated;
                true
            }
            Err(blocked) => {
                log::trace!("rotation rejected: {}", blocked.message());
                false
            }
        }
    }

    /// Descend one row unless the piece is resting on something.
    ///
    /// Never lands the piece; that only happens on a gravity tick.
    pub fn soft_drop(&mut self) -> bool {
        if self.game_over() || self.is_grounded() {
            return false;
        }
        self.active.y += 1;
        true
    }

    /// Is the piece resting on the floor or a placed block?
    pub fn is_grounded(&self) -> bool {
        let a = &self.active;
        self.grid.will_collide(&a.piece, a.x, a.y)
    }

    /// One gravity step.
    ///
    /// Errors only when committing the landed piece would write outside the
    /// grid, which the spawn and landing rules should make impossible. The
    /// grid is left untouched and the phase goes back to `Falling`.
    pub fn tick(&mut self) -> Result<TickOutcome, GridError> {
        if self.game_over() {
            return Ok(TickOutcome::GameOver);
        }

        if !self.is_grounded() {
            self.active.y += 1;
            self.phase = Phase::Falling;
            return Ok(TickOutcome::Fell);
        }

        self.phase = Phase::Landing;
        let a = self.active;

        if a.is_above_visible_top() {
            log::info!(
                "game over: {} landed at y={} (score {})",
                a.kind.as_str(),
                a.y,
                self.score
            );
            self.phase = Phase::GameOver;
            return Ok(TickOutcome::GameOver);
        }

        if let Err(err) = self.grid.commit(&a.piece, a.x, a.y) {
            log::error!("{} ({}): {:?}", err, err.code(), a);
            self.phase = Phase::Falling;
            return Err(err);
        }

        let cleared = self.grid.clear_full_rows();
        let points = line_clear_points(cleared.len());
        if !cleared.is_empty() {
            self.lines = self.lines.saturating_add(cleared.len() as u32);
            self.score = self.score.saturating_add(points);
            log::debug!(
                "cleared rows {:?}: +{} points, score {}",
                cleared.as_slice(),
                points,
                self.score
            );
        } else {
            log::debug!("{} landed at x={} y={}", a.kind.as_str(), a.x, a.y);
        }

        self.phase = Phase::Settled;
        self.spawn();

        Ok(TickOutcome::Settled {
            cleared_rows: cleared.len(),
            points,
        })
    }

    /// Start a new round after game over: empty grid, fresh piece.
    ///
    /// The score keeps accumulating across rounds.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.phase = Phase::Falling;
        self.rounds = self.rounds.wrapping_add(1);
        self.spawn();
    }
}

impl Default for GameState<SimpleRng> {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ShapeSequence;

    fn o_only() -> GameState<ShapeSequence<1>> {
        GameState::with_entropy(ShapeSequence::new([PieceKind::O.index()]))
    }

    #[test]
    fn test_commit_below_grid_is_rejected() {
        let mut state = o_only();
        state.set_active(ActivePiece {
            kind: PieceKind::I,
            piece: Piece::new(PieceKind::I),
            x: 0,
            y: 35,
        });

        assert_eq!(
            state.tick(),
            Err(GridError::OutOfBounds { top: 35, feet: 38 })
        );
        assert!(state.grid().is_empty());
        assert_eq!(state.phase(), Phase::Falling);
        assert_eq!(state.score(), 0);
        assert_eq!(state.active().y, 35);
    }

    #[test]
    fn test_spawn_places_feet_on_last_hidden_row() {
        for kind in PieceKind::ALL {
            let a = ActivePiece::spawn(kind);
            assert_eq!(a.x, 3);
            assert_eq!(a.feet_row(), (TOP_SAFE_ROWS - 1) as i8, "{:?}", kind);
        }
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);
        assert_eq!(state.phase(), Phase::Falling);
        assert_eq!(state.score(), 0);
        assert_eq!(state.pieces_spawned(), 1);
        assert!(state.grid().is_empty());
    }

    #[test]
    fn test_tick_falls_one_row() {
        let mut state = o_only();
        let y = state.active().y;
        assert_eq!(state.tick(), Ok(TickOutcome::Fell));
        assert_eq!(state.active().y, y + 1);
    }

    #[test]
    fn test_move_left_and_right() {
        let mut state = o_only();
        assert!(state.move_left());
        assert_eq!(state.active().x, 4);
        assert!(state.move_right());
        assert!(state.move_right());
        assert_eq!(state.active().x, 2);
    }

    #[test]
    fn test_move_stops_at_walls() {
        let mut state = o_only();
        while state.move_right() {}
        assert_eq!(state.active().x, 0);
        while state.move_left() {}
        // O occupies box columns 0-1, so its left edge stops at column 7.
        assert_eq!(state.active().x, 6);
    }

    #[test]
    fn test_soft_drop_never_lands() {
        let mut state = o_only();
        while state.soft_drop() {}
        assert!(state.is_grounded());
        assert!(state.grid().is_empty());
        assert_eq!(state.active().feet_row(), 35);
    }

    #[test]
    fn test_landing_commits_and_spawns() {
        let mut state = o_only();
        while state.soft_drop() {}
        let outcome = state.tick().unwrap();
        assert_eq!(
            outcome,
            TickOutcome::Settled {
                cleared_rows: 0,
                points: 0
            }
        );
        assert_eq!(state.grid().row(34), Some(0x18));
        assert_eq!(state.grid().row(35), Some(0x18));
        assert_eq!(state.active().y, 2);
        assert_eq!(state.phase(), Phase::Falling);
    }

    #[test]
    fn test_rotation_rejected_when_blocked() {
        let mut state = GameState::with_entropy(ShapeSequence::new([PieceKind::I.index()]));
        state.set_active(ActivePiece {
            y: 10,
            ..*state.active()
        });
        // Horizontal I at x=3 would cover columns 3-6 of row 10.
        state.grid_mut().set_row(10, 0x40);
        assert!(!state.try_rotate());
        assert_eq!(state.active().piece, Piece::new(PieceKind::I));

        state.grid_mut().set_row(10, 0);
        assert!(state.try_rotate());
        assert_eq!(state.active().piece.rows(), [0x0F, 0, 0, 0]);
    }

    #[test]
    fn test_game_over_is_sticky_until_reset() {
        let mut state = o_only();
        state.grid_mut().set_row(4, 0x18);
        assert_eq!(state.tick(), Ok(TickOutcome::GameOver));
        assert!(state.game_over());
        assert!(!state.move_left());
        assert_eq!(state.tick(), Ok(TickOutcome::GameOver));

        state.reset();
        assert_eq!(state.phase(), Phase::Falling);
        assert!(state.grid().is_empty());
        assert_eq!(state.rounds(), 1);
    }
}
