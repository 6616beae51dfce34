//! Tank Battle entry point
//!
//! Runs the fixed-rate game loop: poll input, advance one tick, render, wait
//! for the next frame. On a terminal the player drives the green tank with
//! W/A/S/D and Space (Esc or Q quits). With stdin redirected the binary plays
//! an AI-vs-AI demo instead.

use std::io::{self, IsTerminal};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tank_battle::GameConfig;
use tank_battle::platform::{FrameLimiter, IdleInput, InputSource, KeyBindings, TerminalInput};
use tank_battle::renderer::{AsciiRenderer, FrameView, Renderer};
use tank_battle::sim::{GameState, tick};

/// Seconds the final frame stays up after a winner is decided
const LINGER_SECS: u32 = 3;
/// Hard stop for demo matches where neither tank ever lands a hit
const MATCH_LIMIT_SECS: u32 = 180;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    log::info!("Tank Battle (native) starting...");

    let config = GameConfig::default();
    config.validate()?;

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(seed_from_elapsed)
        .unwrap_or(0);

    let interactive = io::stdin().is_terminal();
    let (mut state, mut input) = if interactive {
        let input: Box<dyn InputSource> = Box::new(TerminalInput::new(KeyBindings::default())?);
        (GameState::new(config.clone(), seed), input)
    } else {
        log::info!("stdin is not a terminal; running the AI demo");
        let input: Box<dyn InputSource> =
            Box::new(IdleInput::new(u64::from(MATCH_LIMIT_SECS * config.fps)));
        (GameState::demo(config.clone(), seed), input)
    };

    print!("\x1b[2J");
    let mut renderer = AsciiRenderer::new(io::stdout().lock(), true).with_color(interactive);
    let mut limiter = FrameLimiter::new(config.fps);
    let mut linger = LINGER_SECS * config.fps;

    loop {
        let frame = input.poll();
        if frame.quit {
            log::info!("Quit requested after {} ticks", state.time_ticks);
            break;
        }

        tick(&mut state, &frame.controls);
        renderer.render(&FrameView::from_state(&state));

        if state.is_over() {
            if linger == 0 {
                break;
            }
            linger -= 1;
        }
        limiter.wait();
    }
    // Restores the terminal before the summary is logged
    drop(input);

    match state.winner() {
        Some(winner) => log::info!("{} won in {} ticks", winner.label(), state.time_ticks),
        None => log::info!("No winner"),
    }
    Ok(())
}

/// Fold the full nanosecond count into 64 bits
fn seed_from_elapsed(elapsed: Duration) -> u64 {
    let nanos = elapsed.as_nanos();
    (nanos as u64) ^ ((nanos >> 64) as u64)
}
