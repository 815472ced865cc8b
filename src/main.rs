//! Terminal host for Matrix Tetris (default binary).
//!
//! Emulates the 32x8 LED matrix, the 4-digit score display and the four
//! buttons in a terminal. The game loop runs exactly as it would on the board;
//! only the collaborators differ.
//!
//! Environment:
//! - `TETRIS_TICK_MS`, `TETRIS_DROP_MS`, `TETRIS_SOFT_DROP_MS`: loop timing
//! - `TETRIS_SEED`: entropy seed (default: time based)
//! - `TETRIS_LOG_PATH`: append logs to this file (`RUST_LOG` filters)

use std::cell::RefCell;
use std::fs::OpenOptions;
use std::rc::Rc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use matrix_tetris::core::GameState;
use matrix_tetris::engine::{GameLoop, LoopConfig, StepOutcome, SystemClock};
use matrix_tetris::input::{should_quit, KeyboardButtons};
use matrix_tetris::term::TerminalPanel;

fn main() -> Result<()> {
    init_logging()?;

    let config = LoopConfig::from_env();
    let seed = seed_from_env();
    log::info!("starting with seed {seed} and {config:?}");

    let panel = Rc::new(RefCell::new(TerminalPanel::new()));
    panel.borrow_mut().renderer_mut().enter()?;

    let result = run(&panel, config, seed);

    // Always try to restore terminal state.
    let _ = panel.borrow_mut().renderer_mut().exit();
    if let Err(err) = &result {
        log::error!("{err:#}");
    }
    result
}

fn run(panel: &Rc<RefCell<TerminalPanel>>, config: LoopConfig, seed: u32) -> Result<()> {
    let buttons = if panel.borrow().renderer().reports_key_releases() {
        KeyboardButtons::new().with_release_events()
    } else {
        KeyboardButtons::new()
    };

    let mut game = GameLoop::new(
        GameState::new(seed),
        Rc::clone(panel),
        Rc::clone(panel),
        buttons,
        SystemClock::new(),
        config,
    );
    game.start()?;

    let tick = Duration::from_millis(u64::from(config.tick_ms));
    loop {
        if game.step()? == StepOutcome::GameOver {
            log::info!(
                "round {} over, score {}",
                game.state().rounds(),
                game.state().score()
            );
        }

        // Input with timeout until the next poll iteration.
        let deadline = Instant::now() + tick;
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press && should_quit(key) {
                        log::info!("quit with score {}", game.state().score());
                        return Ok(());
                    }
                    game.buttons_mut().handle_key_event(key);
                }
                Event::Resize(..) => panel.borrow_mut().redraw()?,
                _ => {}
            }
        }
    }
}

fn init_logging() -> Result<()> {
    let Some(path) = std::env::var("TETRIS_LOG_PATH")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
    else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {path}"))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn seed_from_env() -> u32 {
    std::env::var("TETRIS_SEED")
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
}
