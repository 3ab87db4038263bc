use fxhash::FxHashSet;

use crate::{Grid, Location, Path};

/// Whether `path` leads from the top-left corner to the bottom-right one.
///
/// The path is retraced from its top (the goal) down to the start without trusting whoever
/// built it. Each step must be a valid move between open cells and no cell may repeat.
pub fn check(grid: &Grid, path: &Path) -> bool {
    let mut cells = path.iter_from_top();
    let Some(mut current) = cells.next() else {
        return false;
    };
    if current != grid.goal() || !grid.is_open(current) {
        return false;
    }

    let mut seen = FxHashSet::default();
    seen.insert(current);
    for next in cells {
        if !grid.is_open(next) || !grid.valid_moves(current).contains(&next) {
            return false;
        }
        // Loop.
        if !seen.insert(next) {
            return false;
        }
        current = next;
    }

    current == Location::START
}
