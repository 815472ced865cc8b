//! Cooperative game loop.
//!
//! One [`GameLoop::step`] is one poll iteration:
//!
//! 1. gravity tick when `drop_delay_ms` has elapsed since the last one
//! 2. left / right: edge-triggered horizontal moves
//! 3. down: soft drop while held, rate-limited by `soft_drop_interval_ms`
//! 4. rotate: edge-triggered rotation
//! 5. render grid + piece to the matrix
//!
//! A game over plays the closing animation, resets the grid and ends the
//! iteration early. [`GameLoop::run`] repeats `step` with a fixed sleep.

use anyhow::Result;

use crate::config::LoopConfig;
use crate::core::{EntropySource, GameState, SimpleRng, TickOutcome};
use crate::render::{play_closing_animation, project_columns, render_frame, MatrixColumns};
use crate::triggers::{EdgeTrigger, RepeatGate};
use crate::types::{Button, ButtonSource, Clock, MatrixDisplay, ScoreDisplay, SCORE_DIGITS};

/// What happened during one loop iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Normal iteration; `tick` is the gravity step result if one ran
    Running { tick: Option<TickOutcome> },
    /// The round ended; the grid has been reset and a new piece spawned
    GameOver,
}

/// Per-button edge trackers
#[derive(Debug, Clone)]
struct InputTrackers {
    left: EdgeTrigger,
    right: EdgeTrigger,
    rotate: EdgeTrigger,
    down: RepeatGate,
}

/// Owns the simulation and every hardware collaborator.
pub struct GameLoop<D, S, B, C, R = SimpleRng> {
    state: GameState<R>,
    display: D,
    score_display: S,
    buttons: B,
    clock: C,
    config: LoopConfig,
    inputs: InputTrackers,
    last_drop_ms: u64,
    shown_score: Option<u32>,
    frame: MatrixColumns,
}

impl<D, S, B, C, R> GameLoop<D, S, B, C, R>
where
    D: MatrixDisplay,
    D::Error: Into<anyhow::Error>,
    S: ScoreDisplay,
    S::Error: Into<anyhow::Error>,
    B: ButtonSource,
    C: Clock,
    R: EntropySource,
{
    pub fn new(
        state: GameState<R>,
        display: D,
        score_display: S,
        buttons: B,
        clock: C,
        config: LoopConfig,
    ) -> Self {
        let last_drop_ms = clock.now_ms();
        Self {
            state,
            display,
            score_display,
            buttons,
            clock,
            inputs: InputTrackers {
                left: EdgeTrigger::new(),
                right: EdgeTrigger::new(),
                rotate: EdgeTrigger::new(),
                down: RepeatGate::new(config.soft_drop_interval_ms),
            },
            config,
            last_drop_ms,
            shown_score: None,
            frame: [0; crate::types::MATRIX_WIDTH],
        }
    }

    pub fn state(&self) -> &GameState<R> {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState<R> {
        &mut self.state
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn score_display(&self) -> &S {
        &self.score_display
    }

    pub fn buttons_mut(&mut self) -> &mut B {
        &mut self.buttons
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    /// Last frame sent to the matrix
    pub fn frame(&self) -> &MatrixColumns {
        &self.frame
    }

    /// Show the starting score, prime the gravity timer and draw the first frame.
    pub fn start(&mut self) -> Result<()> {
        self.last_drop_ms = self.clock.now_ms();
        self.show_score()?;
        self.render()
    }

    /// Run one poll iteration
    pub fn step(&mut self) -> Result<StepOutcome> {
        let now = self.clock.now_ms();

        let mut tick = None;
        if now.saturating_sub(self.last_drop_ms) >= u64::from(self.config.drop_delay_ms) {
            self.last_drop_ms = now;
            let outcome = self.state.tick()?;
            match outcome {
                TickOutcome::GameOver => {
                    self.finish_round()?;
                    return Ok(StepOutcome::GameOver);
                }
                TickOutcome::Settled { points, .. } if points > 0 => self.show_score()?,
                _ => {}
            }
            tick = Some(outcome);
        }

        self.poll_inputs(now);
        self.render()?;
        Ok(StepOutcome::Running { tick })
    }

    /// Start, then step and sleep one tick at a time while `keep_running` says so.
    pub fn run(&mut self, mut keep_running: impl FnMut(&Self) -> bool) -> Result<()> {
        self.start()?;
        while keep_running(self) {
            self.step()?;
            self.clock.sleep_ms(self.config.tick_ms);
        }
        Ok(())
    }

    fn poll_inputs(&mut self, now: u64) {
        let left = self.buttons.is_pressed(Button::Left);
        let right = self.buttons.is_pressed(Button::Right);
        let down = self.buttons.is_pressed(Button::Down);
        let rotate = self.buttons.is_pressed(Button::Rotate);

        if self.inputs.left.update(left) {
            self.state.move_left();
        }
        if self.inputs.right.update(right) {
            self.state.move_right();
        }
        if self.inputs.down.update(down, now) {
            self.state.soft_drop();
        }
        if self.inputs.rotate.update(rotate) {
            self.state.try_rotate();
        }
    }

    fn render(&mut self) -> Result<()> {
        self.frame = project_columns(self.state.grid(), Some(self.state.active()));
        render_frame(&mut self.display, &self.frame).map_err(Into::into)
    }

    fn show_score(&mut self) -> Result<()> {
        let score = self.state.score();
        if self.shown_score == Some(score) {
            return Ok(());
        }
        self.score_display
            .show_number(score, SCORE_DIGITS)
            .map_err(Into::<anyhow::Error>::into)?;
        self.shown_score = Some(score);
        Ok(())
    }

    fn finish_round(&mut self) -> Result<()> {
        play_closing_animation(
            &mut self.display,
            &mut self.clock,
            self.config.closing_step_ms,
            self.config.closing_hold_ms,
        )
        .map_err(Into::<anyhow::Error>::into)?;
        self.state.reset();
        self.frame = [0; crate::types::MATRIX_WIDTH];
        log::info!("round {} started", self.state.rounds() + 1);
        Ok(())
    }
}
