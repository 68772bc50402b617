//! Snake module - the segment sequence and its steering rules.
//!
//! Segments are ordered head first; insertion order is body order. Each
//! segment carries the cell it occupied on the previous tick, used only for
//! render interpolation, never for gameplay decisions.

use crate::core::grid::Grid;
use crate::types::{Cell, Direction, INITIAL_LENGTH};

/// One occupied body cell with its previous-tick position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub cell: Cell,
    pub prev: Cell,
}

impl Segment {
    /// A segment that has not moved yet (prev == cell).
    pub fn settled(cell: Cell) -> Self {
        Self { cell, prev: cell }
    }
}

/// The snake: ordered segments plus the two direction slots.
///
/// `dir` is the heading applied this tick; `pending` is overwritten by the
/// latest accepted input and committed into `dir` at the start of the next
/// tick. This decouples input arrival time from simulation tick time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    segments: Vec<Segment>,
    dir: Direction,
    pending: Direction,
}

impl Snake {
    /// Spawn the initial snake: `INITIAL_LENGTH` cells in a horizontal row at
    /// mid-height, heading right. On the default 30x20 grid this is
    /// (5,10),(4,10),(3,10).
    pub fn spawn(grid: &Grid) -> Self {
        let y = (grid.rows() / 2) as i16;
        let head_x = (INITIAL_LENGTH + 2) as i16;
        let segments = (0..INITIAL_LENGTH as i16)
            .map(|i| Segment::settled(Cell::new(head_x - i, y)))
            .collect();
        Self {
            segments,
            dir: Direction::Right,
            pending: Direction::Right,
        }
    }

    pub fn head(&self) -> Cell {
        self.segments[0].cell
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn dir(&self) -> Direction {
        self.dir
    }

    pub fn pending(&self) -> Direction {
        self.pending
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether any segment currently occupies `cell`.
    pub fn occupies(&self, cell: Cell) -> bool {
        self.segments.iter().any(|s| s.cell == cell)
    }

    /// Buffer a new heading. Rejected if it reverses the active heading 180
    /// degrees (the snake would collide with its own neck). Latest accepted
    /// input wins; there is no queue.
    pub fn steer(&mut self, dir: Direction) -> bool {
        if dir == self.dir.opposite() {
            return false;
        }
        self.pending = dir;
        true
    }

    /// Commit the pending heading. Called exactly once, at the start of each
    /// tick; this is the only point where `dir` changes.
    pub fn commit_heading(&mut self) -> Direction {
        self.dir = self.pending;
        self.dir
    }

    /// Build the next tick's segment sequence from this one.
    ///
    /// Every carried segment snapshots its current cell into `prev`, the new
    /// head is prepended with `prev` at the old head cell, and the tail is
    /// dropped unless the snake grew. The previous sequence stays untouched;
    /// the caller swaps the new one in once the tick commits.
    pub fn advanced(&self, new_head: Cell, grow: bool) -> Vec<Segment> {
        let mut next = Vec::with_capacity(self.segments.len() + 1);
        next.push(Segment {
            cell: new_head,
            prev: self.head(),
        });
        let carried = if grow {
            self.segments.len()
        } else {
            self.segments.len() - 1
        };
        next.extend(self.segments[..carried].iter().map(|s| Segment {
            cell: s.cell,
            prev: s.cell,
        }));
        next
    }

    /// Replace the segment sequence with the one built by [`advanced`].
    pub fn replace_segments(&mut self, segments: Vec<Segment>) {
        self.segments = segments;
    }

    #[cfg(test)]
    pub fn from_cells(cells: &[Cell], dir: Direction) -> Self {
        Self {
            segments: cells.iter().copied().map(Segment::settled).collect(),
            dir,
            pending: dir,
        }
    }
}
