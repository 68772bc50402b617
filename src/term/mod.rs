//! Terminal rendering module.
//!
//! Split the way a game renderer wants to be split: a pure view that paints
//! a snapshot into a framebuffer (unit-testable, no I/O) and a thin renderer
//! that flushes framebuffers to a real terminal via crossterm.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fb::{Color, FrameBuffer, Glyph};
pub use game_view::{GameView, Viewport};
pub use renderer::TerminalRenderer;
