//! tui-snake: a snake engine with a fixed-timestep simulation loop and
//! interpolated rendering, playable in a terminal.
//!
//! The `core` module is the pure simulation (grid, snake, food, lifecycle
//! state machine). The `engine` module wraps it in the accumulator-driven
//! fixed-step loop and exposes the host-facing surface: construct, start,
//! handle input, advance once per frame, destroy. `term` and `input` are the
//! terminal front end; any other driver only needs `engine` and `core`.

pub mod core;
pub mod engine;
pub mod error;
pub mod input;
pub mod term;
pub mod types;

pub use engine::{Engine, Frame, GameEvent, ScoreSink};
pub use error::{ConfigError, EngineError, EngineFault};
