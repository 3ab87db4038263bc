//! Terminal animation of the search.

use std::io;
use std::thread;
use std::time::Duration;

use console::{style, Term};

use crate::solve::{Observer, Trail};
use crate::{Grid, Location};

const WALL: char = '█';
const CORRIDOR: char = ' ';
const MARK: char = '*';

/// Border, walls and corridors of `grid`, one string per screen line.
pub fn frame(grid: &Grid) -> Vec<String> {
    let edge = format!("+{}+", "-".repeat(grid.cols()));
    let mut lines = Vec::with_capacity(grid.rows() + 2);
    lines.push(edge.clone());
    let mut line = String::new();
    for (loc, cell) in grid.cells() {
        if loc.col == 0 {
            line.push('|');
        }
        line.push(if cell.is_open() { CORRIDOR } else { WALL });
        if loc.col + 1 == grid.cols() {
            line.push('|');
            lines.push(std::mem::take(&mut line));
        }
    }
    lines.push(edge);
    lines
}

pub struct TermView<'g> {
    term: Term,
    grid: &'g Grid,
    delay: Duration,
}

impl<'g> TermView<'g> {
    pub fn new(term: Term, grid: &'g Grid, delay: Duration) -> Self {
        Self { term, grid, delay }
    }

    pub fn show_grid(&self) -> io::Result<()> {
        self.term.hide_cursor()?;
        self.term.clear_screen()?;
        for line in frame(self.grid) {
            self.term.write_line(&line)?;
        }
        self.term.flush()
    }

    /// Plot `cells`. Unless `stay_on`, they are erased again after the delay.
    pub fn show_path(&self, cells: &[Location], stay_on: bool) -> io::Result<()> {
        self.plot(cells, true)?;
        self.term.flush()?;
        if !stay_on {
            thread::sleep(self.delay);
            self.plot(cells, false)?;
            self.term.flush()?;
        }
        Ok(())
    }

    fn plot(&self, cells: &[Location], on: bool) -> io::Result<()> {
        for &loc in cells.iter().filter(|&&loc| self.grid.is_within(loc)) {
            self.term.move_cursor_to(loc.col + 1, loc.row + 1)?;
            if on {
                self.term.write_str(&style(MARK).yellow().bold().to_string())?;
            } else {
                self.term.write_str(&CORRIDOR.to_string())?;
            }
        }
        Ok(())
    }

    /// Park the cursor below the frame and restore it.
    pub fn finish(&self, message: &str) -> io::Result<()> {
        self.term.move_cursor_to(0, self.grid.rows() + 2)?;
        self.term.write_line(message)?;
        self.term.show_cursor()
    }

    pub fn wait_for_key(&self) -> io::Result<()> {
        self.term.read_key().map(drop)
    }
}

impl Observer for TermView<'_> {
    fn on_explore(&mut self, trail: Trail<'_>) {
        let cells = trail.iter().collect::<Vec<_>>();
        if let Err(err) = self.show_path(&cells, false) {
            log::debug!("Failed to draw path at {}: {err}", trail.head());
        }
    }
}
