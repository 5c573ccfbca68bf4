use crate::geometry::Cell;

use super::grid::{Grid, GridPoint};

/// A grid with the cells a route may enter and the cells it should favour.
#[derive(Clone)]
pub(crate) struct MaskedGrid<'a> {
    pub(crate) grid: &'a Grid,
    pub(crate) point_mask: Vec<bool>,
    pub(crate) preferred_mask: Vec<bool>,
    pub(crate) has_preferred: bool,
}

impl<'a> MaskedGrid<'a> {
    /// Masks out `blocked`, except for `unremovable` cells which stay open.
    pub fn from_cells<'c>(
        grid: &'a Grid,
        blocked: impl IntoIterator<Item = &'c Cell>,
        preferred: impl IntoIterator<Item = &'c Cell>,
        unremovable: &[Cell],
    ) -> Self {
        let mut point_mask = vec![true; grid.size];
        for cell in blocked {
            if unremovable.contains(cell) {
                continue;
            }
            if let Some(point) = grid.cell_to_grid_point(*cell) {
                point_mask[point] = false;
            }
        }

        let preferred_mask = grid.mask_of(preferred);
        let has_preferred = preferred_mask.iter().any(|p| *p);

        MaskedGrid {
            grid,
            point_mask,
            preferred_mask,
            has_preferred,
        }
    }

    pub fn is_open(&self, point: GridPoint) -> bool {
        self.point_mask[point]
    }

    pub fn is_preferred(&self, point: GridPoint) -> bool {
        self.preferred_mask[point]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: [Cell; 0] = [];

    #[test]
    fn endpoints_survive_blocking() {
        let grid = Grid::new(3, 3);
        let blocked = [Cell::new(1, 1), Cell::new(2, 2)];
        let masked = MaskedGrid::from_cells(&grid, &blocked, &NONE, &[Cell::new(2, 2)]);
        let center = grid.cell_to_grid_point(Cell::new(1, 1)).unwrap();
        let end = grid.cell_to_grid_point(Cell::new(2, 2)).unwrap();
        assert!(!masked.is_open(center));
        assert!(masked.is_open(end));
        assert!(!masked.has_preferred);
    }

    #[test]
    fn out_of_bounds_cells_are_ignored() {
        let grid = Grid::new(2, 2);
        let masked = MaskedGrid::from_cells(&grid, &[Cell::new(5, 5)], &[Cell::new(-1, 0)], &[]);
        assert!(masked.point_mask.iter().all(|open| *open));
        assert!(!masked.has_preferred);
    }
}
