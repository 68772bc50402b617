//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. The engine
//! itself never sees key events; only the mapped actions reach it.

pub mod map;

pub use map::{handle_key_event, should_quit};
