use std::ops::{Deref, Index};

use arrayvec::ArrayVec;

mod fmt;
mod parse;
pub mod solve;
pub mod term;
pub mod verify;

pub use fmt::Overlay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridError {
    Empty,
    TooLarge { rows: usize, cols: usize },
    OutOfBounds(Location),
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridError::Empty => write!(f, "grid must have at least one row and one column"),
            GridError::TooLarge { rows, cols } => {
                write!(f, "grid of {rows}x{cols} cells is too large")
            }
            GridError::OutOfBounds(loc) => write!(f, "{loc} is outside the grid"),
        }
    }
}

impl std::error::Error for GridError {}

/// A cell coordinate. Ordered by row, then by column.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    pub row: usize,
    pub col: usize,
}

impl Location {
    pub const START: Self = Self { row: 0, col: 0 };

    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The neighbouring coordinate in `dir`, or `None` when it would be negative.
    /// The result is not checked against any grid.
    pub fn step(self, dir: Direction) -> Option<Self> {
        const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];
        let (dr, dc) = DIRECTIONS[dir as usize];
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        Some(Self { row, col })
    }

    pub fn is_adjacent(self, other: Self) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

impl From<(usize, usize)> for Location {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North = 0,
    East,
    South,
    West,
}

impl Direction {
    /// Canonical move order.
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    pub fn reversed(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Open,
    #[default]
    Wall,
}

impl Cell {
    pub fn is_open(self) -> bool {
        self == Cell::Open
    }
}

impl From<bool> for Cell {
    fn from(open: bool) -> Self {
        if open {
            Cell::Open
        } else {
            Cell::Wall
        }
    }
}

/// A rectangular maze. Read-only for the solver and the verifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Box<[Cell]>,
}

impl Index<Location> for Grid {
    type Output = Cell;
    fn index(&self, loc: Location) -> &Self::Output {
        match self.offset(loc) {
            Some(idx) => &self.cells[idx],
            None => panic!(
                "{loc} is outside the {}x{} grid",
                self.rows, self.cols
            ),
        }
    }
}

impl Grid {
    /// A `rows` x `cols` grid filled with walls.
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        Self::from_cells(rows, cols, |_| Cell::Wall)
    }

    /// Builds a grid by asking `cell` for every location in row-major order.
    pub(crate) fn from_cells(
        rows: usize,
        cols: usize,
        cell: impl FnMut(Location) -> Cell,
    ) -> Result<Self, GridError> {
        let len = Self::checked_len(rows, cols)?;
        let cells = (0..len)
            .map(|idx| Location::new(idx / cols, idx % cols))
            .map(cell)
            .collect();
        Ok(Self { rows, cols, cells })
    }

    /// Number of cells in a `rows` x `cols` grid, if such a grid can be stored.
    pub(crate) fn checked_len(rows: usize, cols: usize) -> Result<usize, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty);
        }
        rows.checked_mul(cols)
            .filter(|&len| len <= isize::MAX as usize)
            .ok_or(GridError::TooLarge { rows, cols })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The bottom-right corner.
    pub fn goal(&self) -> Location {
        Location::new(self.rows - 1, self.cols - 1)
    }

    fn offset(&self, loc: Location) -> Option<usize> {
        self.is_within(loc).then(|| loc.row * self.cols + loc.col)
    }

    pub fn is_within(&self, loc: Location) -> bool {
        loc.row < self.rows && loc.col < self.cols
    }

    pub fn get(&self, loc: Location) -> Option<Cell> {
        self.offset(loc).map(|idx| self.cells[idx])
    }

    /// Whether `loc` is inside the grid and passable.
    pub fn is_open(&self, loc: Location) -> bool {
        self.get(loc).map_or(false, Cell::is_open)
    }

    pub fn set(&mut self, loc: Location, cell: impl Into<Cell>) -> Result<(), GridError> {
        let idx = self.offset(loc).ok_or(GridError::OutOfBounds(loc))?;
        self.cells[idx] = cell.into();
        Ok(())
    }

    pub fn cells(&self) -> impl Iterator<Item = (Location, Cell)> + '_ {
        let idx_iter = std::iter::successors(Some(Location::START), |&Location { row, col }| {
            Some(if col + 1 < self.cols {
                Location::new(row, col + 1)
            } else {
                Location::new(row + 1, 0)
            })
        });
        idx_iter.zip(self.cells.iter().copied())
    }

    /// Open in-grid neighbours of `loc`, in north, east, south, west order.
    pub fn valid_moves(&self, loc: Location) -> ArrayVec<Location, 4> {
        Direction::ALL
            .into_iter()
            .filter_map(|dir| loc.step(dir))
            .filter(|&next| self.is_open(next))
            .collect()
    }
}

/// Cells from start to end. The end is the "top" when read as a stack.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Path(Vec<Location>);

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, loc: Location) {
        self.0.push(loc);
    }

    pub fn start(&self) -> Option<Location> {
        self.0.first().copied()
    }

    /// The most recently pushed cell.
    pub fn top(&self) -> Option<Location> {
        self.0.last().copied()
    }

    /// Number of moves, one less than the number of cells.
    pub fn moves(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Cells from the top (end) down to the start.
    pub fn iter_from_top(&self) -> impl Iterator<Item = Location> + '_ {
        self.0.iter().rev().copied()
    }
}

impl Deref for Path {
    type Target = [Location];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Location>> for Path {
    fn from(cells: Vec<Location>) -> Self {
        Self(cells)
    }
}

impl FromIterator<Location> for Path {
    fn from_iter<I: IntoIterator<Item = Location>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
