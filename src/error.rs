//! Error taxonomy for the engine.
//!
//! Construction problems are `ConfigError` and are rejected before a game
//! exists. `EngineFault` covers broken simulation invariants; a fault is fatal
//! and distinct from an ordinary game over (wall or self hit), which is a
//! normal state transition.

use thiserror::Error;

/// Rejected configuration, reported at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid size must be positive")]
    ZeroGridSize,

    #[error("tick period must be positive, got {0} ms")]
    NonPositiveTick(f64),

    #[error("canvas dimensions must be positive, got {width}x{height}")]
    ZeroCanvas { width: u16, height: u16 },

    #[error("canvas {width}x{height} is not a multiple of grid size {grid_size}")]
    NotGridAligned {
        width: u16,
        height: u16,
        grid_size: u16,
    },

    #[error("a {cols}x{rows} grid exceeds the {max} cell coordinate limit", max = i16::MAX)]
    GridTooWide { cols: u16, rows: u16 },

    #[error("a {cols}x{rows} grid cannot hold the initial snake")]
    GridTooSmall { cols: u16, rows: u16 },
}

/// A simulation invariant was violated. Fatal; never a routine game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineFault {
    #[error("no free cell left to place food on a {cols}x{rows} grid")]
    GridFull { cols: u16, rows: u16 },

    #[error("head committed outside the grid at ({x}, {y})")]
    HeadOutOfGrid { x: i16, y: i16 },
}

/// Anything engine construction can reject.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fault(#[from] EngineFault),
}
