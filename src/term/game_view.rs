//! GameView: maps a render snapshot plus alpha into a framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Grid cells render as 2x1 character blocks to compensate for terminal glyph
//! aspect ratio. Moving segments are drawn at their interpolated position
//! (`lerp(prev, cell, alpha)` rounded to the nearest character); the food
//! marker has no previous position and never interpolates.

use crate::core::{lerp, RenderSnapshot, SegmentSnapshot};
use crate::term::fb::{Color, FrameBuffer, Glyph};
use crate::types::{Direction, Phase};

/// Terminal columns per grid cell.
const CELL_W: u16 = 2;
/// Terminal rows per grid cell.
const CELL_H: u16 = 1;

const BODY: Color = Color(0, 255, 0);
const HEAD_FLASH: Color = Color(255, 255, 80);
const FOOD: Color = Color(255, 80, 30);
const GRID_DOT: Color = Color(0, 60, 0);
const OVERLAY: Color = Color(255, 255, 255);
const LABEL: Color = Color(160, 160, 160);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Stateless renderer from snapshot to framebuffer.
#[derive(Debug, Default, Clone, Copy)]
pub struct GameView;

impl GameView {
    /// Render one frame. Never touches simulation state.
    pub fn render(&self, snap: &RenderSnapshot, alpha: f32, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);

        let field_w = snap.cols.saturating_mul(CELL_W);
        let field_h = snap.rows.saturating_mul(CELL_H);
        let frame_w = field_w.saturating_add(2);
        let frame_h = field_h.saturating_add(2);
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        self.draw_border(&mut fb, start_x, start_y, frame_w, frame_h);
        self.draw_grid_dots(&mut fb, snap, start_x, start_y);
        self.draw_food(&mut fb, snap, start_x, start_y);
        self.draw_snake(&mut fb, snap, alpha, start_x, start_y);
        self.draw_score(&mut fb, snap, start_x, start_y);

        match snap.phase {
            Phase::Ready => {
                self.draw_overlay(&mut fb, start_x, start_y, frame_w, frame_h, "System Ready");
                self.draw_overlay_hint(
                    &mut fb,
                    start_x,
                    start_y,
                    frame_w,
                    frame_h,
                    "./start_game.sh  [enter]",
                );
            }
            Phase::GameOver => {
                self.draw_overlay(
                    &mut fb,
                    start_x,
                    start_y,
                    frame_w,
                    frame_h,
                    "Segmentation Fault",
                );
                self.draw_overlay_hint(
                    &mut fb,
                    start_x,
                    start_y,
                    frame_w,
                    frame_h,
                    "./retry.sh  [enter]",
                );
            }
            Phase::Playing => {}
        }

        fb
    }

    /// Character position for an interpolated cell coordinate.
    fn cell_px(start_x: u16, start_y: u16, x: f32, y: f32) -> (u16, u16) {
        let px = (x * CELL_W as f32).round().max(0.0) as u16;
        let py = (y * CELL_H as f32).round().max(0.0) as u16;
        (
            start_x.saturating_add(1).saturating_add(px),
            start_y.saturating_add(1).saturating_add(py),
        )
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        if w < 2 || h < 2 {
            return;
        }
        let edge = |ch| Glyph::new(ch, LABEL);

        fb.put(x, y, edge('┌'));
        fb.put(x + w - 1, y, edge('┐'));
        fb.put(x, y + h - 1, edge('└'));
        fb.put(x + w - 1, y + h - 1, edge('┘'));
        for dx in 1..w - 1 {
            fb.put(x + dx, y, edge('─'));
            fb.put(x + dx, y + h - 1, edge('─'));
        }
        for dy in 1..h - 1 {
            fb.put(x, y + dy, edge('│'));
            fb.put(x + w - 1, y + dy, edge('│'));
        }
    }

    fn draw_grid_dots(&self, fb: &mut FrameBuffer, snap: &RenderSnapshot, sx: u16, sy: u16) {
        let dot = Glyph::new('·', GRID_DOT);
        for cy in 0..snap.rows {
            for cx in 0..snap.cols {
                let (px, py) = Self::cell_px(sx, sy, cx as f32, cy as f32);
                fb.put(px, py, dot);
            }
        }
    }

    fn draw_food(&self, fb: &mut FrameBuffer, snap: &RenderSnapshot, sx: u16, sy: u16) {
        let (px, py) = Self::cell_px(sx, sy, snap.food.x as f32, snap.food.y as f32);
        fb.put(px, py, Glyph::bold('●', FOOD));
    }

    fn draw_snake(
        &self,
        fb: &mut FrameBuffer,
        snap: &RenderSnapshot,
        alpha: f32,
        sx: u16,
        sy: u16,
    ) {
        // Body first, tail to neck, so the head paints over its neighbor
        // mid-interpolation.
        for segment in snap.segments.iter().skip(1).rev() {
            let (px, py) = Self::interpolated_px(segment, alpha, sx, sy);
            fb.put(px, py, Glyph::new('█', BODY));
            fb.put(px.saturating_add(1), py, Glyph::new('█', BODY));
        }

        let Some(head) = snap.segments.first() else {
            return;
        };
        let (px, py) = Self::interpolated_px(head, alpha, sx, sy);
        let color = if snap.eat_flash > 0 { HEAD_FLASH } else { BODY };
        let ch = match snap.heading {
            Direction::Up => '▲',
            Direction::Down => '▼',
            Direction::Left => '◀',
            Direction::Right => '▶',
        };
        // Heading glyph occupies the half-cell the snake is moving toward.
        let (lead, trail) = match snap.heading {
            Direction::Left => (px, px.saturating_add(1)),
            _ => (px.saturating_add(1), px),
        };
        fb.put(trail, py, Glyph::bold('█', color));
        fb.put(lead, py, Glyph::bold(ch, color));
    }

    fn interpolated_px(segment: &SegmentSnapshot, alpha: f32, sx: u16, sy: u16) -> (u16, u16) {
        let ix = lerp(segment.prev.0, segment.cell.0, alpha);
        let iy = lerp(segment.prev.1, segment.cell.1, alpha);
        Self::cell_px(sx, sy, ix, iy)
    }

    fn draw_score(&self, fb: &mut FrameBuffer, snap: &RenderSnapshot, sx: u16, sy: u16) {
        if sy == 0 {
            return;
        }
        fb.put_str(sx + 1, sy - 1, "SCORE", LABEL, false);
        fb.put_str(sx + 7, sy - 1, &snap.score.to_string(), OVERLAY, true);
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, sx: u16, sy: u16, w: u16, h: u16, text: &str) {
        let y = sy + h / 2 - 1;
        let x = sx + w.saturating_sub(text.chars().count() as u16) / 2;
        fb.put_str(x, y, text, OVERLAY, true);
    }

    fn draw_overlay_hint(&self, fb: &mut FrameBuffer, sx: u16, sy: u16, w: u16, h: u16, text: &str) {
        let y = sy + h / 2 + 1;
        let x = sx + w.saturating_sub(text.chars().count() as u16) / 2;
        fb.put_str(x, y, text, LABEL, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    fn snapshot() -> RenderSnapshot {
        RenderSnapshot {
            segments: vec![
                SegmentSnapshot {
                    prev: (5, 10),
                    cell: (6, 10),
                },
                SegmentSnapshot {
                    prev: (4, 10),
                    cell: (5, 10),
                },
            ],
            food: Cell::new(20, 3),
            heading: Direction::Right,
            phase: Phase::Playing,
            score: 30,
            eat_flash: 0,
            cols: 30,
            rows: 20,
        }
    }

    // Interior char position of a grid cell for a viewport that leaves the
    // frame at the origin.
    fn px(x: u16, y: u16) -> (u16, u16) {
        (1 + x * CELL_W, 1 + y * CELL_H)
    }

    fn tight_viewport() -> Viewport {
        // Exactly the frame: no centering offset, px() stays simple.
        Viewport::new(30 * CELL_W + 2, 20 * CELL_H + 2)
    }

    #[test]
    fn alpha_zero_draws_segments_at_previous_cells() {
        let view = GameView;
        let fb = view.render(&snapshot(), 0.0, tight_viewport());
        let (hx, hy) = px(5, 10);
        assert_eq!(fb.get(hx + 1, hy).unwrap().ch, '▶');
        let (bx, by) = px(4, 10);
        assert_eq!(fb.get(bx, by).unwrap().ch, '█');
    }

    #[test]
    fn alpha_one_draws_segments_at_current_cells() {
        let view = GameView;
        let fb = view.render(&snapshot(), 1.0, tight_viewport());
        let (hx, hy) = px(6, 10);
        assert_eq!(fb.get(hx + 1, hy).unwrap().ch, '▶');
        let (bx, by) = px(5, 10);
        assert_eq!(fb.get(bx, by).unwrap().ch, '█');
    }

    #[test]
    fn food_does_not_interpolate() {
        let view = GameView;
        for alpha in [0.0, 0.4, 0.9] {
            let fb = view.render(&snapshot(), alpha, tight_viewport());
            let (fx, fy) = px(20, 3);
            assert_eq!(fb.get(fx, fy).unwrap().ch, '●');
        }
    }

    #[test]
    fn ready_phase_shows_start_affordance() {
        let mut snap = snapshot();
        snap.phase = Phase::Ready;
        let fb = GameView.render(&snap, 1.0, tight_viewport());
        let text: String = fb.glyphs().iter().map(|g| g.ch).collect();
        assert!(text.contains("System Ready"));
        assert!(text.contains("start_game"));
    }

    #[test]
    fn game_over_phase_shows_retry_affordance() {
        let mut snap = snapshot();
        snap.phase = Phase::GameOver;
        let fb = GameView.render(&snap, 1.0, tight_viewport());
        let text: String = fb.glyphs().iter().map(|g| g.ch).collect();
        assert!(text.contains("Segmentation Fault"));
        assert!(text.contains("retry"));
    }

    #[test]
    fn head_flash_brightens_the_head() {
        let mut snap = snapshot();
        snap.eat_flash = 5;
        let fb = GameView.render(&snap, 1.0, tight_viewport());
        let (hx, hy) = px(6, 10);
        assert_eq!(fb.get(hx + 1, hy).unwrap().fg, HEAD_FLASH);
    }

    #[test]
    fn score_readout_is_drawn_when_there_is_headroom() {
        let snap = snapshot();
        let viewport = Viewport::new(80, 30);
        let fb = GameView.render(&snap, 0.5, viewport);
        let text: String = fb.glyphs().iter().map(|g| g.ch).collect();
        assert!(text.contains("SCORE"));
        assert!(text.contains("30"));
    }

    #[test]
    fn oversized_grid_clips_without_panicking() {
        let snap = snapshot();
        let fb = GameView.render(&snap, 0.5, Viewport::new(10, 5));
        assert_eq!(fb.width(), 10);
    }

    #[test]
    fn extreme_snapshot_dimensions_do_not_overflow() {
        let mut snap = snapshot();
        snap.cols = u16::MAX;
        snap.rows = 1;
        snap.food = Cell::new(i16::MAX, 0);
        snap.segments = vec![SegmentSnapshot {
            prev: (i16::MAX - 1, 0),
            cell: (i16::MAX, 0),
        }];
        let fb = GameView.render(&snap, 0.5, Viewport::new(80, 24));
        assert_eq!(fb.width(), 80);
    }
}
