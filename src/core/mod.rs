//! Core module - pure game logic with no external dependencies
//!
//! This module contains all the game rules, state management, and logic.
//! It has zero dependencies on UI or I/O.

pub mod game_state;
pub mod grid;
pub mod rng;
pub mod snake;
pub mod snapshot;

// Re-export commonly used types
pub use game_state::{GameState, TickOutcome};
pub use grid::{GameConfig, Grid};
pub use rng::SimpleRng;
pub use snake::{Segment, Snake};
pub use snapshot::{lerp, RenderSnapshot, SegmentSnapshot};
