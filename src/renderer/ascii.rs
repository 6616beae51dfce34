//! Text renderer: one character per arena tile
//!
//! `#` wall, `,` grass, `G`/`P` tanks with their turret drawn as an arrow in
//! the neighbouring cell. Bullets show whose they are: `o` for green, `*` for
//! purple. The win banner is centred on the middle row. With colour enabled,
//! tanks, turrets and bullets are tinted with their owner's RGB colour.

use std::io::Write;

use glam::IVec2;

use super::{FrameView, Renderer};
use crate::sim::{Direction, GamePhase, TankColor, TileKind};

/// One grid cell: glyph plus the tank colour it belongs to, if any
type Cell = (char, Option<TankColor>);

/// Character grid for a single frame, without colour
pub fn draw(frame: &FrameView<'_>) -> String {
    paint(&layout(frame), false, "\n")
}

/// Character grid with ANSI truecolor escapes around owned cells
pub fn draw_colored(frame: &FrameView<'_>) -> String {
    paint(&layout(frame), true, "\n")
}

fn layout(frame: &FrameView<'_>) -> Vec<Vec<Cell>> {
    let t = frame.tile_size;
    let cols = (frame.screen.w / t).max(1) as usize;
    let rows = (frame.screen.h / t).max(1) as usize;

    let mut grid: Vec<Vec<Cell>> = vec![vec![(' ', None); cols]; rows];
    let cell = |p: IVec2| -> Option<(usize, usize)> {
        let (c, r) = (p.x.div_euclid(t), p.y.div_euclid(t));
        (c >= 0 && r >= 0 && (c as usize) < cols && (r as usize) < rows)
            .then_some((c as usize, r as usize))
    };

    for (r, row) in grid.iter_mut().enumerate() {
        for (c, slot) in row.iter_mut().enumerate() {
            if frame.arena.tile(c, r) == Some(TileKind::Grass) {
                slot.0 = ',';
            }
        }
    }

    for wall in frame.walls {
        if let Some((c, r)) = cell(wall.center()) {
            grid[r][c] = ('#', None);
        }
    }

    for tank in frame.tanks {
        let center = tank.rect.center();
        if let Some((c, r)) = cell(center) {
            grid[r][c] = (tank_glyph(tank.color), Some(tank.color));
        }
        if let Some((c, r)) = cell(center + tank.facing.unit() * t) {
            if matches!(grid[r][c].0, ' ' | ',') {
                grid[r][c] = (turret(tank.facing), Some(tank.color));
            }
        }
    }

    for bullet in frame.bullets {
        if let Some((c, r)) = cell(bullet.rect.center()) {
            grid[r][c] = (bullet_glyph(bullet.owner_color), Some(bullet.owner_color));
        }
    }

    if let Some(banner) = frame.banner() {
        let winner = match frame.phase {
            GamePhase::GameOver { winner } => Some(winner),
            GamePhase::Playing => None,
        };
        let row = &mut grid[rows / 2];
        let start = cols.saturating_sub(banner.len()) / 2;
        for (i, ch) in banner.chars().enumerate() {
            if let Some(slot) = row.get_mut(start + i) {
                *slot = (ch, winner);
            }
        }
    }
    grid
}

fn paint(grid: &[Vec<Cell>], color: bool, line_end: &str) -> String {
    let cols = grid.first().map_or(0, Vec::len);
    let mut out = String::with_capacity((cols + line_end.len()) * grid.len());
    for row in grid {
        for &(ch, owner) in row {
            match owner.filter(|_| color) {
                Some(owner) => {
                    let (r, g, b) = owner.rgb();
                    out.push_str(&format!("\x1b[38;2;{r};{g};{b}m{ch}\x1b[0m"));
                }
                None => out.push(ch),
            }
        }
        out.push_str(line_end);
    }
    out
}

fn tank_glyph(color: TankColor) -> char {
    match color {
        TankColor::Green => 'G',
        TankColor::Purple => 'P',
    }
}

fn bullet_glyph(owner: TankColor) -> char {
    match owner {
        TankColor::Green => 'o',
        TankColor::Purple => '*',
    }
}

fn turret(facing: Direction) -> char {
    match facing {
        Direction::Up => '^',
        Direction::Down => 'v',
        Direction::Left => '<',
        Direction::Right => '>',
    }
}

/// Writes each frame to a terminal-like sink
pub struct AsciiRenderer<W: Write> {
    out: W,
    /// Move the cursor home before each frame instead of scrolling.
    /// Lines end in `\r\n` so frames stay aligned in raw terminal mode.
    redraw_in_place: bool,
    color: bool,
}

impl<W: Write> AsciiRenderer<W> {
    pub fn new(out: W, redraw_in_place: bool) -> Self {
        Self {
            out,
            redraw_in_place,
            color: false,
        }
    }

    /// Tint tanks and bullets with their owner's colour
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for AsciiRenderer<W> {
    fn render(&mut self, frame: &FrameView<'_>) {
        let (prefix, line_end) = if self.redraw_in_place {
            ("\x1b[H", "\r\n")
        } else {
            ("", "\n")
        };
        let text = paint(&layout(frame), self.color, line_end);
        if let Err(e) = write!(self.out, "{prefix}{text}").and_then(|_| self.out.flush()) {
            log::warn!("Render error: {:?}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::{Direction, GamePhase, GameState, TankColor, TickInput, tick};

    #[test]
    fn test_standard_frame_layout() {
        let mut state = GameState::new(GameConfig::default(), 5);
        state.tanks[0].facing = Direction::Right;
        let text = draw(&FrameView::from_state(&state));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 15);
        assert!(lines.iter().all(|l| l.chars().count() == 20));
        assert_eq!(lines[0], "#".repeat(20));
        // Green at tile (2, 2) with its turret pointing right into the cluster
        assert_eq!(lines[2].chars().nth(2), Some('G'));
        assert_eq!(lines[2].chars().nth(3), Some('#'));
        assert_eq!(lines[12].chars().nth(17), Some('P'));
        assert_eq!(lines[6].chars().nth(8), Some(','));
    }

    #[test]
    fn test_turret_and_bullet_drawn() {
        let mut state = GameState::new(GameConfig::default(), 5);
        state.tanks[0].facing = Direction::Down;
        assert!(state.fire(0));
        let text = draw(&FrameView::from_state(&state));
        let lines: Vec<&str> = text.lines().collect();
        // Bullet spawns on the tank's bottom edge, which is in the next row
        assert_eq!(lines[3].chars().nth(2), Some('o'));

        state.bullets.clear();
        let text = draw(&FrameView::from_state(&state));
        assert_eq!(text.lines().nth(3).and_then(|l| l.chars().nth(2)), Some('v'));
    }

    #[test]
    fn test_bullet_glyph_per_owner() {
        let mut state = GameState::new(GameConfig::default(), 5);
        state.tanks[0].facing = Direction::Down;
        state.tanks[1].facing = Direction::Up;
        assert!(state.fire(0));
        assert!(state.fire(1));
        let text = draw(&FrameView::from_state(&state));
        let lines: Vec<&str> = text.lines().collect();
        // Purple's muzzle is its top edge at y=480, which is row 12
        assert_eq!(lines[3].chars().nth(2), Some('o'));
        assert_eq!(lines[12].chars().nth(17), Some('*'));
        assert_eq!(text.matches('o').count(), 1);
    }

    #[test]
    fn test_colored_frame_uses_owner_rgb() {
        let mut state = GameState::new(GameConfig::default(), 5);
        state.tanks[0].facing = Direction::Down;
        let text = draw_colored(&FrameView::from_state(&state));
        assert!(text.contains("\x1b[38;2;0;255;0mG\x1b[0m"));
        assert!(text.contains("\x1b[38;2;0;255;0mv\x1b[0m"));
        assert!(text.contains("\x1b[38;2;128;0;128mP\x1b[0m"));
        // Walls stay plain
        assert!(text.starts_with("####"));
        assert!(!draw(&FrameView::from_state(&state)).contains('\x1b'));
    }

    #[test]
    fn test_banner_after_game_over() {
        let mut state = GameState::new(GameConfig::default(), 5);
        state.phase = GamePhase::GameOver {
            winner: TankColor::Purple,
        };
        tick(&mut state, &TickInput::default());
        let text = draw(&FrameView::from_state(&state));
        assert!(text.lines().nth(7).unwrap().contains("PURPLE WINS!"));
    }

    #[test]
    fn test_renderer_writes_frames() {
        let state = GameState::new(GameConfig::default(), 5);
        let mut renderer = AsciiRenderer::new(Vec::new(), false);
        renderer.render(&FrameView::from_state(&state));
        renderer.render(&FrameView::from_state(&state));
        let bytes = renderer.into_inner();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.lines().count(), 30);
        assert!(!text.contains('\r'));
    }

    #[test]
    fn test_in_place_renderer_homes_cursor_and_returns_carriage() {
        let state = GameState::new(GameConfig::default(), 5);
        let mut renderer = AsciiRenderer::new(Vec::new(), true).with_color(true);
        renderer.render(&FrameView::from_state(&state));
        let text = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(text.starts_with("\x1b[H"));
        assert_eq!(text.matches("\r\n").count(), 15);
        assert!(text.contains("38;2;0;255;0"));
    }
}
