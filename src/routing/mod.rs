mod bfs;
mod grid;
mod masked_grid;
mod simple;
mod types;

use std::collections::HashSet;

use crate::geometry::Cell;
use crate::layout::GridSize;

use bfs::route_bfs;
use grid::Grid;
use masked_grid::MaskedGrid;

pub use simple::simple_path;
pub use types::{Path, Step};

/// Shortest-path router over a `cols` x `rows` grid of cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathRouter {
    grid: Grid,
}

impl PathRouter {
    pub fn new(cols: u32, rows: u32) -> Self {
        PathRouter {
            grid: Grid::new(cols, rows),
        }
    }

    pub fn for_grid(size: &GridSize) -> Self {
        PathRouter {
            grid: Grid::from(size),
        }
    }

    pub fn cols(&self) -> u32 {
        self.grid.width
    }

    pub fn rows(&self) -> u32 {
        self.grid.height
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.grid.contains(cell)
    }

    /// Minimum-length route from `start` to `end` that never enters `blocked`.
    ///
    /// `start` and `end` are always enterable, even when listed in `blocked`.
    /// Among equally short routes the one through `preferred` cells wins;
    /// an empty `preferred` set means no bias. Returns `None` when `end` is
    /// unreachable or either endpoint lies outside the grid.
    pub fn find_path(
        &self,
        start: Cell,
        end: Cell,
        blocked: &HashSet<Cell>,
        preferred: &HashSet<Cell>,
    ) -> Option<Path> {
        let start_grid_point = self.grid.cell_to_grid_point(start)?;
        let end_grid_point = self.grid.cell_to_grid_point(end)?;

        let masked_grid = MaskedGrid::from_cells(&self.grid, blocked, preferred, &[start, end]);
        let grid_path = route_bfs(&masked_grid, start_grid_point, end_grid_point);

        match grid_path {
            Some(points) => {
                let cells = points
                    .into_iter()
                    .filter_map(|p| self.grid.grid_point_to_cell(p))
                    .collect();
                let path = Path::new(cells);
                tracing::trace!(%start, %end, steps = path.step_count(), "routed");
                Some(path)
            }
            None => {
                tracing::trace!(%start, %end, blocked = blocked.len(), "no route");
                None
            }
        }
    }

    /// Length in steps of the shortest route avoiding `blocked`, if any.
    pub fn shortest_distance(&self, start: Cell, end: Cell, blocked: &HashSet<Cell>) -> Option<usize> {
        self.find_path(start, end, blocked, &HashSet::new())
            .map(|path| path.step_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(cells: &[(i32, i32)]) -> HashSet<Cell> {
        cells.iter().map(|&c| Cell::from(c)).collect()
    }

    #[test]
    fn same_start_and_end_is_single_cell() {
        let router = PathRouter::new(3, 3);
        let c = Cell::new(1, 2);
        let path = router.find_path(c, c, &set(&[(1, 2)]), &HashSet::new()).unwrap();
        assert_eq!(path, Path::single(c));
    }

    #[test]
    fn blocked_end_is_still_reachable() {
        let router = PathRouter::new(3, 3);
        let blocked = set(&[(2, 2), (0, 0)]);
        let path = router
            .find_path(Cell::new(0, 0), Cell::new(2, 2), &blocked, &HashSet::new())
            .unwrap();
        assert_eq!(path.start(), Some(Cell::new(0, 0)));
        assert_eq!(path.end(), Some(Cell::new(2, 2)));
        assert_eq!(path.step_count(), 4);
    }

    #[test]
    fn unreachable_when_walled_off() {
        let router = PathRouter::new(3, 3);
        let blocked = set(&[(1, 0), (1, 1), (1, 2)]);
        assert_eq!(
            router.find_path(Cell::new(0, 0), Cell::new(2, 0), &blocked, &HashSet::new()),
            None
        );
        assert_eq!(router.shortest_distance(Cell::new(0, 0), Cell::new(2, 0), &blocked), None);
    }

    #[test]
    fn out_of_bounds_endpoint() {
        let router = PathRouter::new(2, 2);
        assert_eq!(
            router.find_path(Cell::new(0, 0), Cell::new(2, 0), &HashSet::new(), &HashSet::new()),
            None
        );
    }

    #[test]
    fn preference_keeps_length() {
        let router = PathRouter::new(5, 5);
        let start = Cell::new(0, 0);
        let end = Cell::new(4, 4);
        let preferred = set(&[(0, 1), (0, 2), (0, 3), (0, 4), (1, 4)]);
        let path = router.find_path(start, end, &HashSet::new(), &preferred).unwrap();
        assert_eq!(path.step_count(), 8);
        assert!(path.contains(&Cell::new(0, 4)));
        assert!(path.is_well_formed());
    }
}
