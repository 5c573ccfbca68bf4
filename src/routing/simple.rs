use crate::geometry::Cell;

use super::types::Path;

/// L-shaped route: close the horizontal gap first, then the vertical one.
///
/// Never fails and ignores any blocking; only for callers that route without
/// collision avoidance.
pub fn simple_path(start: Cell, end: Cell) -> Path {
    let mut cells = Vec::with_capacity(start.manhattan_distance(&end) as usize + 1);
    let mut cursor = start;
    cells.push(cursor);

    let step_x = (end.x - start.x).signum();
    while cursor.x != end.x {
        cursor = cursor.offset(step_x, 0);
        cells.push(cursor);
    }

    let step_y = (end.y - start.y).signum();
    while cursor.y != end.y {
        cursor = cursor.offset(0, step_y);
        cells.push(cursor);
    }

    Path::new(cells)
}
