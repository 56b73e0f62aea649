//! Grid primitives: cells, headings and the toroidal board

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// A board coordinate (column, row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn as_ivec2(self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }
}

impl From<IVec2> for Cell {
    fn from(v: IVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

/// Snake heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector in screen space (y grows downward)
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }
}

/// Board bounds. Movement wraps on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub cols: i32,
    pub rows: i32,
}

impl Board {
    pub const fn new(cols: i32, rows: i32) -> Self {
        Self { cols, rows }
    }

    pub fn area(&self) -> usize {
        (self.cols.max(0) as usize) * (self.rows.max(0) as usize)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.cols).contains(&cell.x) && (0..self.rows).contains(&cell.y)
    }

    /// Neighbor of `cell` in `dir`, wrapping off one edge onto the opposite one
    pub fn neighbor(&self, cell: Cell, dir: Direction) -> Cell {
        let next = cell.as_ivec2() + dir.delta();
        Cell::new(next.x.rem_euclid(self.cols), next.y.rem_euclid(self.rows))
    }

    /// Every cell in row-major order
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        let (cols, rows) = (self.cols, self.rows);
        (0..rows).flat_map(move |y| (0..cols).map(move |x| Cell::new(x, y)))
    }

    /// Shortest signed offset from `a` to `b` along each wrapped axis
    pub fn wrapped_offset(&self, a: Cell, b: Cell) -> IVec2 {
        fn axis(from: i32, to: i32, span: i32) -> i32 {
            let d = (to - from).rem_euclid(span);
            if d > span / 2 { d - span } else { d }
        }
        IVec2::new(axis(a.x, b.x, self.cols), axis(a.y, b.y, self.rows))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(crate::consts::COLS, crate::consts::ROWS)
    }
}
