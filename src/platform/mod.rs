//! Platform abstraction layer
//!
//! Handles the outside world for the game loop:
//! - Input sources (quit signal + control snapshot per tick)
//! - Key bindings from physical keys to logical controls
//! - Frame pacing

mod terminal;

pub use terminal::{HeldKeys, TerminalInput};

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::sim::TickInput;

/// Everything the loop reads from the input device once per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputFrame {
    /// Window closed / process asked to stop
    pub quit: bool,
    pub controls: TickInput,
}

/// Supplies one `InputFrame` per tick
pub trait InputSource {
    fn poll(&mut self) -> InputFrame;
}

/// Physical key assignment for the five logical controls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub up: char,
    pub down: char,
    pub left: char,
    pub right: char,
    pub shoot: char,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            up: 'w',
            down: 's',
            left: 'a',
            right: 'd',
            shoot: ' ',
        }
    }
}

impl KeyBindings {
    /// Map the set of currently held keys to logical controls
    pub fn controls(&self, pressed: &[char]) -> TickInput {
        let held = |key: char| {
            pressed
                .iter()
                .any(|p| p.to_ascii_lowercase() == key.to_ascii_lowercase())
        };
        TickInput {
            up: held(self.up),
            down: held(self.down),
            left: held(self.left),
            right: held(self.right),
            shoot: held(self.shoot),
        }
    }
}

/// Nothing held; requests quit after `budget` ticks
#[derive(Debug, Clone)]
pub struct IdleInput {
    remaining: u64,
}

impl IdleInput {
    pub fn new(budget: u64) -> Self {
        Self { remaining: budget }
    }
}

impl InputSource for IdleInput {
    fn poll(&mut self) -> InputFrame {
        if self.remaining == 0 {
            return InputFrame {
                quit: true,
                controls: TickInput::default(),
            };
        }
        self.remaining -= 1;
        InputFrame::default()
    }
}

/// Blocking limiter that holds the loop to a target frame rate
#[derive(Debug)]
pub struct FrameLimiter {
    frame: Duration,
    next: Instant,
}

impl FrameLimiter {
    pub fn new(fps: u32) -> Self {
        let frame = Duration::from_secs(1) / fps.max(1);
        Self {
            frame,
            next: Instant::now() + frame,
        }
    }

    /// Sleep until the next frame boundary.
    /// If we fell behind, the schedule restarts from now instead of bursting.
    pub fn wait(&mut self) {
        let now = Instant::now();
        if now < self.next {
            std::thread::sleep(self.next - now);
            self.next += self.frame;
        } else {
            self.next = now + self.frame;
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }
}
