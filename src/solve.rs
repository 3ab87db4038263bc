use indexmap::map::Entry;

use crate::{Grid, Location, Path};

type IndexMap<K, V> = indexmap::IndexMap<K, V, fxhash::FxBuildHasher>;

/// Sentinel parent of the start cell.
const ROOT: usize = !0usize;

/// Receives every partial path right before the solver expands it.
pub trait Observer {
    fn on_explore(&mut self, trail: Trail<'_>);
}

impl Observer for () {
    fn on_explore(&mut self, _: Trail<'_>) {}
}

impl<F: FnMut(Trail<'_>)> Observer for F {
    fn on_explore(&mut self, trail: Trail<'_>) {
        self(trail)
    }
}

/// A read-only view of one partial path. Cells are only walked when asked for.
#[derive(Clone, Copy)]
pub struct Trail<'a> {
    parent: &'a IndexMap<Location, usize>,
    head: usize,
}

impl<'a> Trail<'a> {
    /// The frontier cell, i.e. the top of the path.
    pub fn head(&self) -> Location {
        *self.parent.get_index(self.head).unwrap().0
    }

    /// Cells from the head back to the start.
    pub fn iter(&self) -> impl Iterator<Item = Location> + 'a {
        let parent = self.parent;
        std::iter::successors(Some(self.head), move |&i| {
            let p = parent[i];
            (p != ROOT).then_some(p)
        })
        .map(move |i| *parent.get_index(i).unwrap().0)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn to_path(&self) -> Path {
        let mut cells = self.iter().collect::<Vec<_>>();
        cells.reverse();
        cells.into()
    }
}

/// Shortest path from the top-left to the bottom-right corner, if any.
pub fn solve(grid: &Grid) -> Option<Path> {
    bfs(grid, &mut ())
}

/// Number of moves on the shortest path, if any.
pub fn shortest_distance(grid: &Grid) -> Option<usize> {
    solve(grid).map(|path| path.moves())
}

pub fn bfs<O: Observer + ?Sized>(grid: &Grid, observer: &mut O) -> Option<Path> {
    let start = Location::START;
    let goal = grid.goal();
    if !grid.is_open(start) {
        log::debug!("Start cell is a wall, nothing to search");
        return None;
    }
    if start == goal {
        return Some(Path::from(vec![start]));
    }
    log::debug!("Searching {}x{} maze", grid.rows(), grid.cols());

    // Visited cells in discovery order, each mapped to the index of the cell it was reached
    // from. Entries at `cursor..` form the FIFO frontier.
    let mut parent = IndexMap::default();
    parent.insert(start, ROOT);

    let mut cursor = 0;
    let goal_idx = 'bfs: loop {
        #[cfg(feature = "coz")]
        coz::scope!("Expand");

        if cursor >= parent.len() {
            log::debug!("Frontier exhausted after expanding {cursor} cells");
            return None;
        }

        observer.on_explore(Trail {
            parent: &parent,
            head: cursor,
        });

        let (&loc, _) = parent.get_index(cursor).unwrap();
        for next in grid.valid_moves(loc) {
            #[cfg(feature = "coz")]
            coz::progress!("Step");

            if let Entry::Vacant(ent) = parent.entry(next) {
                let idx = ent.index();
                ent.insert(cursor);
                if next == goal {
                    break 'bfs idx;
                }
            }
        }
        cursor += 1;
    };
    log::debug!("Reached the goal after expanding {} cells", cursor + 1);

    let path = Trail {
        parent: &parent,
        head: goal_idx,
    }
    .to_path();
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&str]) -> Grid {
        let text = format!("{} {}\n{}\n", rows.len(), rows[0].len(), rows.join("\n"));
        text.parse().unwrap()
    }

    #[test]
    fn trail_walks_back_to_start() {
        let g = grid(&["---", "@@-", "---"]);
        let mut longest = Path::new();
        let found = bfs(&g, &mut |trail: Trail<'_>| {
            assert_eq!(trail.iter().last(), Some(Location::START));
            assert_eq!(trail.iter().next(), Some(trail.head()));
            assert_eq!(trail.len(), trail.to_path().len());
            if trail.len() > longest.len() {
                longest = trail.to_path();
            }
        })
        .unwrap();
        assert_eq!(found.moves(), 4);
        assert_eq!(longest.top(), Some(Location::new(1, 2)));
    }

    #[test]
    fn start_is_goal() {
        let g = grid(&["-"]);
        let mut calls = 0;
        let path = bfs(&g, &mut |_: Trail<'_>| calls += 1).unwrap();
        assert_eq!(&*path, &[Location::START]);
        assert_eq!(calls, 0);
    }
}
