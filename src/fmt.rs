use std::fmt;

use fxhash::FxHashSet;

use crate::{Cell, Grid, Location, Path};

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.rows, self.cols)?;
        for (loc, cell) in self.cells() {
            write!(f, "{cell}")?;
            if loc.col + 1 == self.cols {
                f.write_str("\n")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Open => f.write_str("-"),
            Cell::Wall => f.write_str("@"),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{},{}>", self.row, self.col)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, loc) in self.iter().enumerate() {
            if i != 0 {
                f.write_str(",")?;
            }
            write!(f, "{loc}")?;
        }
        f.write_str("]")
    }
}

/// Grid rows with the cells of a path drawn as `*`.
pub struct Overlay<'a> {
    grid: &'a Grid,
    marked: FxHashSet<Location>,
}

impl Grid {
    pub fn overlay(&self, path: &Path) -> Overlay<'_> {
        Overlay {
            grid: self,
            marked: path.iter().copied().collect(),
        }
    }
}

impl fmt::Display for Overlay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (loc, cell) in self.grid.cells() {
            if self.marked.contains(&loc) {
                f.write_str("*")?;
            } else {
                write!(f, "{cell}")?;
            }
            if loc.col + 1 == self.grid.cols {
                f.write_str("\n")?;
            }
        }
        Ok(())
    }
}
