//! Level grids: tile-code text parsed into bricks
//!
//! Format: whitespace-separated non-negative integers, one row per line.
//! `0` is empty, `1` is a solid brick, anything else is a destructible brick
//! whose colour is picked from the palette by code.

use std::fmt;
use std::path::{Path, PathBuf};

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::entity::{Entity, Sprite};

/// Built-in level grids, in menu order
pub const BUILTIN_LEVELS: [(&str, &str); 4] = [
    ("one", include_str!("../../levels/one.lvl")),
    ("two", include_str!("../../levels/two.lvl")),
    ("three", include_str!("../../levels/three.lvl")),
    ("four", include_str!("../../levels/four.lvl")),
];

const SOLID_COLOR: Vec3 = Vec3::new(0.8, 0.8, 0.7);
const BRICK_PALETTE: [Vec3; 4] = [
    Vec3::new(0.2, 0.6, 1.0),
    Vec3::new(0.0, 0.7, 0.0),
    Vec3::new(0.8, 0.8, 0.4),
    Vec3::new(1.0, 0.5, 0.0),
];

/// Colour for a destructible tile code (>= 2)
pub fn brick_color(code: u32) -> Vec3 {
    BRICK_PALETTE[(code.saturating_sub(2) as usize) % BRICK_PALETTE.len()]
}

/// Failure to load a level grid
#[derive(Debug)]
pub enum LevelError {
    Io { path: PathBuf, source: std::io::Error },
    /// No rows; would be vacuously complete
    Empty,
    Ragged { row: usize, expected: usize, found: usize },
    BadTile { row: usize, col: usize, token: String },
    /// A game needs at least one level
    NoLevels,
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::Io { path, source } => {
                write!(f, "failed to read level {}: {}", path.display(), source)
            }
            LevelError::Empty => write!(f, "level grid has no rows"),
            LevelError::Ragged { row, expected, found } => write!(
                f,
                "row {} has {} columns, expected {}",
                row, found, expected
            ),
            LevelError::BadTile { row, col, token } => {
                write!(f, "invalid tile {:?} at row {}, column {}", token, row, col)
            }
            LevelError::NoLevels => write!(f, "no levels configured"),
        }
    }
}

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LevelError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Parse tile text into a rectangular grid of codes
pub fn parse_tiles(source: &str) -> Result<Vec<Vec<u32>>, LevelError> {
    let mut rows: Vec<Vec<u32>> = Vec::new();

    for line in source.lines().filter(|l| !l.trim().is_empty()) {
        let row_index = rows.len();
        let row = line
            .split_whitespace()
            .enumerate()
            .map(|(col, token)| {
                token.parse::<u32>().map_err(|_| LevelError::BadTile {
                    row: row_index,
                    col,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(first) = rows.first()
            && first.len() != row.len()
        {
            return Err(LevelError::Ragged {
                row: row_index,
                expected: first.len(),
                found: row.len(),
            });
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(LevelError::Empty);
    }
    Ok(rows)
}

/// A loaded level: its bricks plus the source they were built from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    pub bricks: Vec<Entity>,
    pub rows: usize,
    pub columns: usize,
    source: String,
    width: f32,
    height: f32,
}

impl Level {
    /// Build a level from tile text laid out over `width` x `height` pixels
    pub fn parse(
        name: impl Into<String>,
        source: &str,
        width: f32,
        height: f32,
    ) -> Result<Self, LevelError> {
        let tiles = parse_tiles(source)?;
        let rows = tiles.len();
        let columns = tiles[0].len();
        let bricks = build_bricks(&tiles, width, height);
        let name = name.into();

        log::info!(
            "Level {}: {}x{} grid, {} bricks ({} destructible)",
            name,
            columns,
            rows,
            bricks.len(),
            bricks.iter().filter(|b| !b.solid).count()
        );

        Ok(Self {
            name,
            bricks,
            rows,
            columns,
            source: source.to_string(),
            width,
            height,
        })
    }

    /// Read and parse a level file
    pub fn load(path: &Path, width: f32, height: f32) -> Result<Self, LevelError> {
        let source = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::parse(name, &source, width, height)
    }

    /// The four levels shipped with the game
    pub fn builtin(width: f32, height: f32) -> Result<Vec<Self>, LevelError> {
        BUILTIN_LEVELS
            .iter()
            .map(|(name, source)| Self::parse(*name, source, width, height))
            .collect()
    }

    /// Rebuild all bricks from the stored source.
    ///
    /// On failure the current bricks are kept.
    pub fn reload(&mut self) -> Result<(), LevelError> {
        let tiles = parse_tiles(&self.source)?;
        self.bricks = build_bricks(&tiles, self.width, self.height);
        log::debug!("Level {} reloaded", self.name);
        Ok(())
    }

    /// True once every destructible brick is destroyed
    pub fn is_completed(&self) -> bool {
        self.bricks.iter().all(|b| b.solid || b.destroyed)
    }

    /// Bricks still in play
    pub fn live_bricks(&self) -> impl Iterator<Item = &Entity> {
        self.bricks.iter().filter(|b| !b.destroyed)
    }
}

fn build_bricks(tiles: &[Vec<u32>], width: f32, height: f32) -> Vec<Entity> {
    let rows = tiles.len();
    let columns = tiles.first().map_or(0, Vec::len);
    if columns == 0 {
        return Vec::new();
    }
    let cell = Vec2::new(width / columns as f32, height / rows as f32);

    let mut bricks = Vec::new();
    for (y, row) in tiles.iter().enumerate() {
        for (x, &code) in row.iter().enumerate() {
            let pos = cell * Vec2::new(x as f32, y as f32);
            match code {
                0 => {}
                1 => {
                    let mut brick = Entity::new(pos, cell, Sprite::BlockSolid).with_color(SOLID_COLOR);
                    brick.solid = true;
                    bricks.push(brick);
                }
                code => {
                    bricks.push(Entity::new(pos, cell, Sprite::Block).with_color(brick_color(code)));
                }
            }
        }
    }
    bricks
}
