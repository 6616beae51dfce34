//! Presentation module
//!
//! Renderers are one-way consumers of a `FrameView`, a borrowed snapshot of
//! everything visible in a frame. The simulation never reads render output.

pub mod ascii;

pub use ascii::AsciiRenderer;

use crate::sim::{Arena, Bullet, GamePhase, GameState, Rect, Tank};

/// Read-only view of one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub screen: Rect,
    pub tile_size: i32,
    pub arena: &'a Arena,
    pub walls: &'a [Rect],
    pub tanks: &'a [Tank],
    pub bullets: &'a [Bullet],
    pub phase: GamePhase,
}

impl<'a> FrameView<'a> {
    pub fn from_state(state: &'a GameState) -> Self {
        Self {
            screen: state.config.bounds(),
            tile_size: state.config.tile_size,
            arena: &state.arena,
            walls: &state.walls,
            tanks: &state.tanks,
            bullets: &state.bullets,
            phase: state.phase,
        }
    }

    /// Overlay text once the match is decided
    pub fn banner(&self) -> Option<String> {
        match self.phase {
            GamePhase::GameOver { winner } => Some(format!("{} WINS!", winner.label())),
            GamePhase::Playing => None,
        }
    }
}

/// Draws frames somewhere
pub trait Renderer {
    fn render(&mut self, frame: &FrameView<'_>);
}
