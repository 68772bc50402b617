//! Core types shared across the application
//! This module contains pure data types with no external dependencies

/// Default cell edge length in canvas units.
pub const DEFAULT_GRID_SIZE: u16 = 20;
/// Default simulation tick period in milliseconds.
pub const DEFAULT_TICK_MS: f64 = 100.0;
/// Default canvas dimensions in canvas units.
pub const DEFAULT_CANVAS_WIDTH: u16 = 600;
pub const DEFAULT_CANVAS_HEIGHT: u16 = 400;

/// Snake length at the start of every run.
pub const INITIAL_LENGTH: usize = 3;
/// Score awarded per food consumed.
pub const FOOD_REWARD: u32 = 10;
/// Ticks the head keeps its "just ate" emphasis after a food event.
pub const EAT_FLASH_TICKS: u8 = 10;
/// Upper bound on simulation steps run per frame after a long stall.
pub const MAX_CATCHUP_TICKS: u32 = 8;

/// Movement heading on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The 180-degree reverse of this heading.
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit step in grid coordinates (y grows downward).
    pub fn delta(&self) -> (i16, i16) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

}

/// One logical grid cell.
///
/// Coordinates are signed so a tentative head move can land at -1 before the
/// boundary check rejects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i16,
    pub y: i16,
}

impl Cell {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// The neighboring cell one step in the given direction.
    pub fn step(&self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Engine lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Simulation paused, "press to start" affordance shown.
    Ready,
    /// Fixed-step loop running, direction input accepted.
    Playing,
    /// Terminal until an explicit retry performs a full reset.
    GameOver,
}

/// Game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Buffer a new heading (applied at the start of the next tick).
    Turn(Direction),
    /// Start from Ready, or full reset + start from GameOver.
    Activate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_involutive() {
        for dir in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_ne!(dir.opposite(), dir);
        }
    }

    #[test]
    fn delta_is_a_unit_step() {
        for dir in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            let (dx, dy) = dir.delta();
            assert_eq!(dx.abs() + dy.abs(), 1);
        }
    }

    #[test]
    fn cell_step_moves_one_cell() {
        let cell = Cell::new(5, 10);
        assert_eq!(cell.step(Direction::Right), Cell::new(6, 10));
        assert_eq!(cell.step(Direction::Up), Cell::new(5, 9));
    }
}
