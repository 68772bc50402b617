//! Render snapshot: everything the renderer needs, detached from the
//! simulation.
//!
//! The renderer never reads `GameState` directly. Each frame the driver fills
//! a caller-owned snapshot (no per-frame allocation once the segment buffer
//! has grown) and hands it to the view together with the interpolation alpha.
//! Rendering therefore cannot mutate simulation state by construction.

use crate::core::game_state::GameState;
use crate::types::{Cell, Direction, Phase};

/// One body cell as the renderer sees it: where it was last tick and where it
/// is now. The draw position is `lerp(prev, cell, alpha)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SegmentSnapshot {
    pub prev: (i16, i16),
    pub cell: (i16, i16),
}

/// Complete per-frame view of the game.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSnapshot {
    pub segments: Vec<SegmentSnapshot>,
    pub food: Cell,
    pub heading: Direction,
    pub phase: Phase,
    pub score: u32,
    /// Remaining ticks of head emphasis after a food event, 0 when settled.
    pub eat_flash: u8,
    pub cols: u16,
    pub rows: u16,
}

impl Default for RenderSnapshot {
    fn default() -> Self {
        Self {
            segments: Vec::new(),
            food: Cell::new(0, 0),
            heading: Direction::Right,
            phase: Phase::Ready,
            score: 0,
            eat_flash: 0,
            cols: 0,
            rows: 0,
        }
    }
}

impl GameState {
    /// Fill `out` with the current frame's view of this state.
    pub fn snapshot_into(&self, out: &mut RenderSnapshot) {
        out.segments.clear();
        out.segments
            .extend(self.snake().segments().iter().map(|s| SegmentSnapshot {
                prev: (s.prev.x, s.prev.y),
                cell: (s.cell.x, s.cell.y),
            }));
        out.food = self.food();
        out.heading = self.snake().dir();
        out.phase = self.phase();
        out.score = self.score();
        out.eat_flash = self.eat_flash();
        out.cols = self.grid().cols();
        out.rows = self.grid().rows();
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        let mut out = RenderSnapshot::default();
        self.snapshot_into(&mut out);
        out
    }
}

/// Linear interpolation between the previous and current coordinate of one
/// axis. `alpha` in [0,1): 0 draws at the previous-tick cell, 1 at the
/// current one.
pub fn lerp(prev: i16, current: i16, alpha: f32) -> f32 {
    (prev as f32) * (1.0 - alpha) + (current as f32) * alpha
}
