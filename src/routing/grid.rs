use std::ops::{Index, IndexMut};

use crate::geometry::{Cell, Direction};
use crate::layout::GridSize;

/// Bounds of a `width` x `height` cell grid with dense row-major indexing.
#[derive(Clone, Copy, Hash, Debug, PartialEq, Eq)]
pub(crate) struct Grid {
    pub width: u32,
    pub height: u32,
    pub size: usize,
}

#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default, Debug)]
pub(crate) struct GridPoint(pub u32);

impl<T> Index<GridPoint> for Vec<T> {
    type Output = T;

    fn index(&self, index: GridPoint) -> &Self::Output {
        &self[index.0 as usize]
    }
}

impl<T> IndexMut<GridPoint> for Vec<T> {
    fn index_mut(&mut self, index: GridPoint) -> &mut Self::Output {
        &mut self[index.0 as usize]
    }
}

impl Grid {
    pub fn new(width: u32, height: u32) -> Self {
        Grid {
            width,
            height,
            size: width as usize * height as usize,
        }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as u32) < self.width && (cell.y as u32) < self.height
    }

    pub fn cell_to_grid_point(&self, cell: Cell) -> Option<GridPoint> {
        if !self.contains(cell) {
            return None;
        }
        Some(GridPoint(cell.y as u32 * self.width + cell.x as u32))
    }

    pub fn grid_point_to_cell(&self, point: GridPoint) -> Option<Cell> {
        if point.0 as usize >= self.size {
            return None;
        }
        Some(Cell {
            x: (point.0 % self.width) as i32,
            y: (point.0 / self.width) as i32,
        })
    }

    /// Boolean mask over the grid with `cells` set; out-of-bounds cells are ignored.
    pub fn mask_of<'a>(&self, cells: impl IntoIterator<Item = &'a Cell>) -> Vec<bool> {
        let mut mask = vec![false; self.size];
        for cell in cells {
            if let Some(point) = self.cell_to_grid_point(*cell) {
                mask[point] = true;
            }
        }
        mask
    }

    /// In-bounds orthogonal neighbours of `point` in router expansion order.
    pub(crate) fn fill_neighbors(&self, point: GridPoint, neighbors: &mut Vec<(GridPoint, Cell)>) {
        neighbors.clear();

        let Some(cell) = self.grid_point_to_cell(point) else {
            return;
        };

        for direction in Direction::SEARCH_ORDER {
            let next = cell.step(direction);
            if let Some(next_point) = self.cell_to_grid_point(next) {
                neighbors.push((next_point, next));
            }
        }
    }
}

impl From<&GridSize> for Grid {
    fn from(size: &GridSize) -> Self {
        Grid::new(size.cols, size.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trip() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.size, 12);
        for y in 0..3 {
            for x in 0..4 {
                let cell = Cell::new(x, y);
                let point = grid.cell_to_grid_point(cell).unwrap();
                assert_eq!(grid.grid_point_to_cell(point), Some(cell));
            }
        }
        assert_eq!(grid.cell_to_grid_point(Cell::new(4, 0)), None);
        assert_eq!(grid.cell_to_grid_point(Cell::new(0, -1)), None);
        assert_eq!(grid.grid_point_to_cell(GridPoint(12)), None);
    }

    #[test]
    fn corner_neighbors_follow_search_order() {
        let grid = Grid::new(3, 3);
        let mut buf = Vec::new();
        let center = grid.cell_to_grid_point(Cell::new(1, 1)).unwrap();
        grid.fill_neighbors(center, &mut buf);
        let cells: Vec<Cell> = buf.iter().map(|(_, c)| *c).collect();
        assert_eq!(
            cells,
            vec![Cell::new(2, 1), Cell::new(0, 1), Cell::new(1, 2), Cell::new(1, 0)]
        );

        let corner = grid.cell_to_grid_point(Cell::new(0, 0)).unwrap();
        grid.fill_neighbors(corner, &mut buf);
        assert_eq!(buf.len(), 2);
    }
}
