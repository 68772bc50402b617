//! Grid module - the logical coordinate space.
//!
//! The grid is derived from the canvas dimensions and the cell edge length:
//! `cols = canvas_width / grid_size`, `rows = canvas_height / grid_size`.
//! Coordinates: (x, y) with x in 0..cols (left to right) and y in 0..rows
//! (top to bottom). Derivation is validated at construction; a canvas that is
//! not an exact multiple of the grid size is a configuration error, never a
//! silently truncated grid.

use crate::error::ConfigError;
use crate::types::{
    Cell, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_GRID_SIZE, DEFAULT_TICK_MS,
};

/// Engine construction options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    /// Cell edge length in canvas units.
    pub grid_size: u16,
    /// Simulation tick period in milliseconds.
    pub tick_ms: f64,
    pub canvas_width: u16,
    pub canvas_height: u16,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            tick_ms: DEFAULT_TICK_MS,
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
        }
    }
}

impl GameConfig {
    /// Validate the configuration and derive the logical grid.
    pub fn grid(&self) -> Result<Grid, ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::ZeroGridSize);
        }
        if !(self.tick_ms > 0.0) {
            return Err(ConfigError::NonPositiveTick(self.tick_ms));
        }
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(ConfigError::ZeroCanvas {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        if self.canvas_width % self.grid_size != 0 || self.canvas_height % self.grid_size != 0 {
            return Err(ConfigError::NotGridAligned {
                width: self.canvas_width,
                height: self.canvas_height,
                grid_size: self.grid_size,
            });
        }

        let cols = self.canvas_width / self.grid_size;
        let rows = self.canvas_height / self.grid_size;
        // Cell coordinates are i16; a grid wider than that would let a flat
        // index map to an off-grid cell.
        if cols > i16::MAX as u16 || rows > i16::MAX as u16 {
            return Err(ConfigError::GridTooWide { cols, rows });
        }

        Ok(Grid { cols, rows })
    }
}

/// The logical play field, `cols x rows` cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    cols: u16,
    rows: u16,
}

impl Grid {
    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        (self.cols as usize) * (self.rows as usize)
    }

    /// Whether a cell lies inside `[0, cols) x [0, rows)`.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && (cell.x as u16) < self.cols && cell.y >= 0 && (cell.y as u16) < self.rows
    }

    /// Cell for a flat row-major index. Index must be < `cell_count`.
    pub fn cell_at(&self, index: usize) -> Cell {
        let cols = self.cols as usize;
        Cell::new((index % cols) as i16, (index / cols) as i16)
    }

    /// Construct directly from cell counts (test and bench convenience).
    pub fn from_dimensions(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }
}
