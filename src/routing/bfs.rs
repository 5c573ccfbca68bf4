use std::collections::VecDeque;

use super::grid::GridPoint;
use super::masked_grid::MaskedGrid;

/// Breadth-first search from `start_grid_point` to `end_grid_point` over open cells.
///
/// Unvisited neighbours that are preferred are enqueued ahead of the others.
/// Every edge costs one, so this only picks among equally short paths.
pub(crate) fn route_bfs(
    masked_grid: &MaskedGrid,
    start_grid_point: GridPoint,
    end_grid_point: GridPoint,
) -> Option<Vec<GridPoint>> {
    let size = masked_grid.grid.size;
    if start_grid_point.0 as usize >= size || end_grid_point.0 as usize >= size {
        return None;
    }

    if start_grid_point == end_grid_point {
        return Some(vec![start_grid_point]);
    }

    let mut came_from: Vec<Option<GridPoint>> = vec![None; size];
    let mut visited = vec![false; size];
    visited[start_grid_point] = true;

    let mut queue = VecDeque::with_capacity(size);
    queue.push_back(start_grid_point);

    let mut neighbors_buf = Vec::with_capacity(4);

    while let Some(current) = queue.pop_front() {
        if current == end_grid_point {
            break;
        }

        masked_grid.grid.fill_neighbors(current, &mut neighbors_buf);
        neighbors_buf.retain(|(neighbor, _)| masked_grid.is_open(*neighbor) && !visited[*neighbor]);

        if masked_grid.has_preferred {
            // Stable: keeps expansion order within each group.
            neighbors_buf.sort_by_key(|(neighbor, _)| !masked_grid.is_preferred(*neighbor));
        }

        for (neighbor, _) in neighbors_buf.iter().copied() {
            visited[neighbor] = true;
            came_from[neighbor] = Some(current);
            queue.push_back(neighbor);
        }
    }

    if !visited[end_grid_point] {
        return None;
    }

    let mut path = vec![end_grid_point];
    let mut cursor = end_grid_point;
    while let Some(prev) = came_from[cursor] {
        cursor = prev;
        path.push(cursor);
    }
    path.reverse();
    Some(path)
}
