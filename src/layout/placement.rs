use rand::Rng;
use serde::Serialize;

use crate::error::LayoutError;
use crate::geometry::{Cell, Neighborhood};
use crate::node::Node;
use crate::routing::PathRouter;

/// A node together with the cell it was assigned.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlacedNode<P> {
    #[serde(flatten)]
    pub node: Node<P>,
    pub cell: Cell,
}

/// Injective node to cell assignment, in node input order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Placement<P> {
    entries: Vec<PlacedNode<P>>,
}

impl<P> Placement<P> {
    pub fn entries(&self) -> &[PlacedNode<P>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn home(&self) -> Option<&PlacedNode<P>> {
        self.entries.iter().find(|e| e.node.is_home)
    }

    pub fn destinations(&self) -> impl Iterator<Item = &PlacedNode<P>> + '_ {
        self.entries.iter().filter(|e| !e.node.is_home)
    }

    pub fn cell_of(&self, name: &str) -> Option<Cell> {
        self.entries
            .iter()
            .find(|e| e.node.name == name)
            .map(|e| e.cell)
    }

    pub fn node_at(&self, cell: Cell) -> Option<&Node<P>> {
        self.entries
            .iter()
            .find(|e| e.cell == cell)
            .map(|e| &e.node)
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.entries.iter().map(|e| e.cell)
    }
}

/// Assigns every node a distinct random cell on a `cols` x `rows` grid.
///
/// Each node draws up to `max_samples` uniform cells and takes the first one
/// not yet used. With an `exclusion` neighbourhood the cells around each placed
/// node become unusable too. If any node runs out of samples the whole
/// placement fails; nothing partial is returned.
pub fn generate_positions<P: Clone, R: Rng + ?Sized>(
    cols: u32,
    rows: u32,
    nodes: &[Node<P>],
    exclusion: Option<Neighborhood>,
    max_samples: usize,
    rng: &mut R,
) -> Result<Placement<P>, LayoutError> {
    if cols == 0 || rows == 0 {
        return Err(LayoutError::EmptyGrid { cols, rows });
    }

    let bounds = PathRouter::new(cols, rows);
    let mut used = vec![false; cols as usize * rows as usize];
    let index = |cell: Cell| cell.y as usize * cols as usize + cell.x as usize;

    let mut entries = Vec::with_capacity(nodes.len());

    for node in nodes {
        let mut chosen = None;
        for _ in 0..max_samples {
            let cell = Cell::new(rng.gen_range(0..cols) as i32, rng.gen_range(0..rows) as i32);
            if !used[index(cell)] {
                chosen = Some(cell);
                break;
            }
        }

        let Some(cell) = chosen else {
            tracing::debug!(node = %node.name, samples = max_samples, "placement exhausted");
            return Err(LayoutError::placement_exhausted(node.name.clone(), max_samples));
        };

        used[index(cell)] = true;
        if let Some(neighborhood) = exclusion {
            for &(dx, dy) in neighborhood.offsets() {
                let neighbor = cell.offset(dx, dy);
                if bounds.contains(neighbor) {
                    used[index(neighbor)] = true;
                }
            }
        }

        tracing::trace!(node = %node.name, %cell, "placed");
        entries.push(PlacedNode {
            node: node.clone(),
            cell,
        });
    }

    Ok(Placement { entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn nodes(count: usize) -> Vec<Node> {
        (0..count)
            .map(|i| {
                if i == 0 {
                    Node::home("home", ())
                } else {
                    Node::destination(format!("dest{}", i), ())
                }
            })
            .collect()
    }

    #[test]
    fn cells_are_distinct() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let placement = generate_positions(3, 3, &nodes(9), None, 1000, &mut rng).unwrap();
            let mut cells: Vec<Cell> = placement.cells().collect();
            cells.sort();
            cells.dedup();
            assert_eq!(cells.len(), 9);
        }
    }

    #[test]
    fn exclusion_keeps_nodes_apart() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut successes = 0;
        for _ in 0..50 {
            let Ok(placement) = generate_positions(
                10,
                10,
                &nodes(6),
                Some(Neighborhood::Orthogonal),
                100,
                &mut rng,
            ) else {
                continue;
            };
            successes += 1;
            let cells: Vec<Cell> = placement.cells().collect();
            for (i, a) in cells.iter().enumerate() {
                for b in &cells[i + 1..] {
                    assert!(!a.is_orthogonally_adjacent(b), "{} next to {}", a, b);
                }
            }
        }
        assert!(successes > 0);
    }

    #[test]
    fn diagonal_exclusion() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            if let Ok(placement) =
                generate_positions(6, 6, &nodes(4), Some(Neighborhood::Moore), 100, &mut rng)
            {
                let cells: Vec<Cell> = placement.cells().collect();
                for (i, a) in cells.iter().enumerate() {
                    for b in &cells[i + 1..] {
                        assert!(a.x.abs_diff(b.x) > 1 || a.y.abs_diff(b.y) > 1);
                    }
                }
            }
        }
    }

    #[test]
    fn two_by_two_with_exclusion_cannot_fit_four() {
        let mut rng = StdRng::seed_from_u64(0);
        let result = generate_positions(2, 2, &nodes(4), Some(Neighborhood::Orthogonal), 100, &mut rng);
        assert!(matches!(
            result,
            Err(LayoutError::PlacementExhausted { attempts: 100, .. })
        ));
    }

    #[test]
    fn more_nodes_than_cells_fails() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate_positions(1, 1, &nodes(2), None, 100, &mut rng).is_err());
    }

    #[test]
    fn empty_grid_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            generate_positions(0, 3, &nodes(1), None, 100, &mut rng),
            Err(LayoutError::EmptyGrid { cols: 0, rows: 3 })
        ));
    }

    #[test]
    fn payload_and_order_are_preserved() {
        let mut rng = StdRng::seed_from_u64(5);
        let input = vec![Node::home("home", 1u8), Node::destination("blog", 2u8)];
        let placement = generate_positions(4, 4, &input, None, 100, &mut rng).unwrap();
        let names: Vec<&str> = placement.entries().iter().map(|e| e.node.name.as_str()).collect();
        assert_eq!(names, vec!["home", "blog"]);
        assert_eq!(placement.home().unwrap().node.payload, 1);
        assert_eq!(placement.destinations().count(), 1);
        let blog = placement.cell_of("blog").unwrap();
        assert_eq!(placement.node_at(blog).unwrap().payload, 2);
    }

    #[test]
    fn same_seed_same_placement() {
        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            generate_positions(10, 10, &nodes(6), Some(Neighborhood::Orthogonal), 100, &mut rng)
                .map(|p| p.cells().collect::<Vec<_>>())
                .ok()
        };
        assert_eq!(run(42), run(42));
    }
}
