use serde::{Deserialize, Serialize};

use crate::geometry::{Cell, Direction};

/// Ordered, non-repeating sequence of 4-adjacent cells from a start to an end.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path {
    pub cells: Vec<Cell>,
}

/// One unit move along a path.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Step {
    pub from: Cell,
    pub to: Cell,
    pub direction: Direction,
}

impl Path {
    pub fn new(cells: Vec<Cell>) -> Self {
        Path { cells }
    }

    pub fn single(cell: Cell) -> Self {
        Path { cells: vec![cell] }
    }

    pub fn as_slice(&self) -> &[Cell] {
        &self.cells
    }

    pub fn into_inner(self) -> Vec<Cell> {
        self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn start(&self) -> Option<Cell> {
        self.cells.first().copied()
    }

    pub fn end(&self) -> Option<Cell> {
        self.cells.last().copied()
    }

    /// Number of unit moves, `len - 1` for a non-empty path.
    pub fn step_count(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        self.cells.contains(cell)
    }

    /// Cells strictly between the endpoints.
    pub fn interior(&self) -> &[Cell] {
        if self.cells.len() <= 2 {
            return &[];
        }
        &self.cells[1..self.cells.len() - 1]
    }

    /// Unit moves along the path; pairs that are not 4-adjacent are skipped.
    pub fn steps(&self) -> impl Iterator<Item = Step> + '_ {
        self.cells.windows(2).filter_map(|window| {
            let (from, to) = (window[0], window[1]);
            from.direction_to(&to).map(|direction| Step { from, to, direction })
        })
    }

    /// Cells where consecutive moves change direction.
    pub fn corners(&self) -> Vec<Cell> {
        let mut corners = Vec::new();
        let mut prev_dir: Option<Direction> = None;
        for step in self.steps() {
            if let Some(prev) = prev_dir {
                if prev != step.direction {
                    corners.push(step.from);
                }
            }
            prev_dir = Some(step.direction);
        }
        corners
    }

    /// Every consecutive pair is a unit step and no cell repeats.
    pub fn is_well_formed(&self) -> bool {
        if self.cells.is_empty() {
            return false;
        }
        let unit_steps = self
            .cells
            .windows(2)
            .all(|w| w[0].is_orthogonally_adjacent(&w[1]));
        let mut sorted = self.cells.clone();
        sorted.sort_unstable();
        sorted.dedup();
        unit_steps && sorted.len() == self.cells.len()
    }
}

impl From<Vec<Cell>> for Path {
    fn from(cells: Vec<Cell>) -> Self {
        Path { cells }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(points: &[(i32, i32)]) -> Path {
        Path::new(points.iter().map(|&p| Cell::from(p)).collect())
    }

    #[test]
    fn steps_and_corners() {
        let p = path(&[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)]);
        let dirs: Vec<Direction> = p.steps().map(|s| s.direction).collect();
        assert_eq!(
            dirs,
            vec![Direction::Right, Direction::Right, Direction::Down, Direction::Down]
        );
        assert_eq!(p.corners(), vec![Cell::new(2, 0)]);
        assert_eq!(p.step_count(), 4);
        assert_eq!(p.interior(), &[Cell::new(1, 0), Cell::new(2, 0), Cell::new(2, 1)]);
    }

    #[test]
    fn short_paths_have_no_interior() {
        assert!(Path::single(Cell::new(1, 1)).interior().is_empty());
        assert!(path(&[(0, 0), (0, 1)]).interior().is_empty());
    }

    #[test]
    fn well_formedness() {
        assert!(path(&[(0, 0), (0, 1), (1, 1)]).is_well_formed());
        assert!(!path(&[(0, 0), (1, 1)]).is_well_formed());
        assert!(!path(&[(0, 0), (0, 1), (0, 0)]).is_well_formed());
        assert!(!Path::new(Vec::new()).is_well_formed());
    }
}
