//! Arena tile grid
//!
//! The play field is a character grid parsed once at startup. Each wall cell
//! becomes one tile-sized collision box owned by the simulation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::rect::Rect;

/// The reference battlefield: a walled border, four hollow block clusters and
/// a grass patch in the middle.
pub const STANDARD_LAYOUT: [&str; 16] = [
    "BBBBBBBBBBBBBBBBBBBB",
    "B..................B",
    "B..BBB.......BBB...B",
    "B..B B.......B B...B",
    "B..BBB.......BBB...B",
    "B..................B",
    "B.......GGGG.......B",
    "B.......G..G.......B",
    "B.......G..G.......B",
    "B.......GGGG.......B",
    "B..................B",
    "B..BBB.......BBB...B",
    "B..B B.......B B...B",
    "B..BBB.......BBB...B",
    "B..................B",
    "BBBBBBBBBBBBBBBBBBBB",
];

/// Map parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("map has no rows")]
    Empty,
    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown tile {tile:?} at row {row}, column {col}")]
    UnknownTile { row: usize, col: usize, tile: char },
}

/// Kind of a single arena cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TileKind {
    #[default]
    Empty,
    /// Destructible wall
    Wall,
    /// Decoration only, no collision
    Grass,
}

impl TileKind {
    fn from_char(c: char) -> Option<Self> {
        match c {
            'B' | '#' => Some(TileKind::Wall),
            'G' => Some(TileKind::Grass),
            '.' | ' ' => Some(TileKind::Empty),
            _ => None,
        }
    }
}

/// A rectangular grid of tiles (row-major)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arena {
    cols: usize,
    rows: usize,
    tiles: Vec<TileKind>,
}

impl Arena {
    /// The built-in battlefield
    pub fn standard() -> Self {
        // The layout is a checked-in constant; parsing cannot fail.
        Self::from_rows(&STANDARD_LAYOUT[..]).unwrap_or_else(|e| panic!("standard layout: {e}"))
    }

    /// Parse newline-separated rows
    pub fn parse(text: &str) -> Result<Self, MapError> {
        let rows: Vec<&str> = text.lines().filter(|l| !l.is_empty()).collect();
        Self::from_rows(&rows[..])
    }

    /// Build from rows of tile characters; every row must be the same width
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, MapError> {
        let first = rows.first().ok_or(MapError::Empty)?;
        let cols = first.as_ref().chars().count();
        if cols == 0 {
            return Err(MapError::Empty);
        }

        let mut tiles = Vec::with_capacity(cols * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != cols {
                return Err(MapError::RaggedRow {
                    row,
                    expected: cols,
                    found,
                });
            }
            for (col, tile) in line.chars().enumerate() {
                let kind =
                    TileKind::from_char(tile).ok_or(MapError::UnknownTile { row, col, tile })?;
                tiles.push(kind);
            }
        }

        Ok(Self {
            cols,
            rows: rows.len(),
            tiles,
        })
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Tile at (col, row), `None` outside the grid
    pub fn tile(&self, col: usize, row: usize) -> Option<TileKind> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.tiles.get(row * self.cols + col).copied()
    }

    /// One collision box per wall cell, in row-major order.
    /// Coordinates saturate instead of overflowing on oversized grids.
    pub fn build_walls(&self, tile_size: i32) -> Vec<Rect> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, kind)| **kind == TileKind::Wall)
            .map(|(i, _)| {
                let col = i32::try_from(i % self.cols).unwrap_or(i32::MAX);
                let row = i32::try_from(i / self.cols).unwrap_or(i32::MAX);
                Rect::new(
                    col.saturating_mul(tile_size),
                    row.saturating_mul(tile_size),
                    tile_size,
                    tile_size,
                )
            })
            .collect()
    }
}
