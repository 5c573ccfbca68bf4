//! Per-cell direction masks and the pipe pieces they render as

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::geometry::{Cell, Direction, DirectionMask};
use crate::routing::Path;

/// A bend joining two perpendicular directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Curve {
    UpRight,
    RightDown,
    DownLeft,
    LeftUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Rendering piece for a cell, derived from its direction mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceType {
    /// Stub pointing the one connected direction
    End(Direction),
    Straight(Axis),
    Curve(Curve),
    /// Three-way junction, named by the direction it lacks
    Tee { missing: Direction },
    Cross,
}

impl PieceType {
    /// Piece for a direction mask; `None` for the empty mask.
    pub fn from_mask(mask: DirectionMask) -> Option<PieceType> {
        use Direction::*;

        // bits: up=1, right=2, down=4, left=8
        let piece = match mask.bits() {
            0 => return None,
            1 => PieceType::End(Up),
            2 => PieceType::End(Right),
            4 => PieceType::End(Down),
            8 => PieceType::End(Left),
            5 => PieceType::Straight(Axis::Vertical),
            10 => PieceType::Straight(Axis::Horizontal),
            3 => PieceType::Curve(Curve::UpRight),
            6 => PieceType::Curve(Curve::RightDown),
            12 => PieceType::Curve(Curve::DownLeft),
            9 => PieceType::Curve(Curve::LeftUp),
            14 => PieceType::Tee { missing: Up },
            13 => PieceType::Tee { missing: Right },
            11 => PieceType::Tee { missing: Down },
            7 => PieceType::Tee { missing: Left },
            15 => PieceType::Cross,
            _ => return None,
        };
        Some(piece)
    }

    /// Directions this piece connects.
    pub fn mask(&self) -> DirectionMask {
        use Direction::*;

        match self {
            PieceType::End(d) => DirectionMask::from(*d),
            PieceType::Straight(Axis::Vertical) => Up | Down,
            PieceType::Straight(Axis::Horizontal) => Left | Right,
            PieceType::Curve(Curve::UpRight) => Up | Right,
            PieceType::Curve(Curve::RightDown) => Right | Down,
            PieceType::Curve(Curve::DownLeft) => Down | Left,
            PieceType::Curve(Curve::LeftUp) => Left | Up,
            PieceType::Tee { missing } => DirectionMask::from_bits(DirectionMask::ALL.bits() & !missing.bit()),
            PieceType::Cross => DirectionMask::ALL,
        }
    }

    pub fn is_end(&self) -> bool {
        matches!(self, PieceType::End(_))
    }

    /// Stylesheet class of the artwork tile for this piece.
    pub fn class_name(&self) -> &'static str {
        use Direction::*;

        match self {
            PieceType::End(Up) => "pipe-end-up",
            PieceType::End(Right) => "pipe-end-right",
            PieceType::End(Down) => "pipe-end-down",
            PieceType::End(Left) => "pipe-end-left",
            PieceType::Straight(Axis::Horizontal) => "pipe-straight-h",
            PieceType::Straight(Axis::Vertical) => "pipe-straight-v",
            PieceType::Curve(Curve::RightDown) => "pipe-curve-tr",
            PieceType::Curve(Curve::UpRight) => "pipe-curve-br",
            PieceType::Curve(Curve::DownLeft) => "pipe-curve-tl",
            PieceType::Curve(Curve::LeftUp) => "pipe-curve-bl",
            // tiles are named after the stem opposite the missing arm
            PieceType::Tee { missing: Down } => "pipe-t-up",
            PieceType::Tee { missing: Up } => "pipe-t-down",
            PieceType::Tee { missing: Right } => "pipe-t-left",
            PieceType::Tee { missing: Left } => "pipe-t-right",
            PieceType::Cross => "pipe-cross",
        }
    }
}

/// Direction mask per cell, accumulated over all routes in first-touch order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionMap {
    masks: IndexMap<Cell, DirectionMask>,
}

impl Serialize for ConnectionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_cell_entries(&self.masks, serializer)
    }
}

impl ConnectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// ORs every step of `path` into the cells on both sides of it.
    pub fn add_path(&mut self, path: &Path) {
        for step in path.steps() {
            self.add(step.from, step.direction.into());
            self.add(step.to, step.direction.opposite().into());
        }
    }

    pub fn add(&mut self, cell: Cell, mask: DirectionMask) {
        *self.masks.entry(cell).or_default() |= mask;
    }

    pub fn get(&self, cell: Cell) -> Option<DirectionMask> {
        self.masks.get(&cell).copied()
    }

    pub fn len(&self) -> usize {
        self.masks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Cell, DirectionMask)> + '_ {
        self.masks.iter().map(|(c, m)| (*c, *m))
    }
}

/// Result of analysing a set of routes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConnectionAnalysis {
    pub connections: ConnectionMap,
    /// Pieces for transit cells; route endpoints are left to the node renderer.
    #[serde(serialize_with = "serialize_cell_entries")]
    pub pieces: IndexMap<Cell, PieceType>,
}

/// Cell keys are not strings, so cell maps go out as `[cell, value]` pairs.
fn serialize_cell_entries<V, S>(map: &IndexMap<Cell, V>, serializer: S) -> Result<S::Ok, S::Error>
where
    V: Serialize,
    S: Serializer,
{
    serializer.collect_seq(map.iter())
}

impl ConnectionAnalysis {
    pub fn piece_at(&self, cell: Cell) -> Option<PieceType> {
        self.pieces.get(&cell).copied()
    }

    /// Transit cells that only connect one way.
    pub fn dead_ends(&self) -> impl Iterator<Item = Cell> + '_ {
        self.pieces
            .iter()
            .filter(|(_, piece)| piece.is_end())
            .map(|(cell, _)| *cell)
    }
}

pub fn build_connection_map<'a>(paths: impl IntoIterator<Item = &'a Path>) -> ConnectionMap {
    let mut connections = ConnectionMap::new();
    for path in paths {
        if path.len() < 2 {
            continue;
        }
        connections.add_path(path);
    }
    connections
}

/// Builds the connection map for `paths` and classifies every cell that is
/// not a route endpoint.
pub fn analyze<'a>(paths: impl IntoIterator<Item = &'a Path> + Clone) -> ConnectionAnalysis {
    let endpoints: HashSet<Cell> = paths
        .clone()
        .into_iter()
        .flat_map(|p| p.start().into_iter().chain(p.end()))
        .collect();

    let connections = build_connection_map(paths);

    let mut pieces = IndexMap::new();
    for (cell, mask) in connections.iter() {
        if endpoints.contains(&cell) {
            continue;
        }
        let Some(piece) = PieceType::from_mask(mask) else {
            continue;
        };
        if piece.is_end() {
            tracing::debug!(%cell, class = piece.class_name(), "transit cell ends in a stub");
        }
        pieces.insert(cell, piece);
    }

    ConnectionAnalysis { connections, pieces }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn path(points: &[(i32, i32)]) -> Path {
        Path::new(points.iter().map(|&p| Cell::from(p)).collect())
    }

    #[rstest]
    #[case(1, "pipe-end-up")]
    #[case(2, "pipe-end-right")]
    #[case(4, "pipe-end-down")]
    #[case(8, "pipe-end-left")]
    #[case(10, "pipe-straight-h")]
    #[case(5, "pipe-straight-v")]
    #[case(6, "pipe-curve-tr")]
    #[case(3, "pipe-curve-br")]
    #[case(12, "pipe-curve-tl")]
    #[case(9, "pipe-curve-bl")]
    #[case(11, "pipe-t-up")]
    #[case(14, "pipe-t-down")]
    #[case(13, "pipe-t-left")]
    #[case(7, "pipe-t-right")]
    #[case(15, "pipe-cross")]
    fn mask_to_class(#[case] bits: u8, #[case] class: &str) {
        let piece = PieceType::from_mask(DirectionMask::from_bits(bits)).unwrap();
        assert_eq!(piece.class_name(), class);
        assert_eq!(piece.mask().bits(), bits);
    }

    #[test]
    fn table_is_total() {
        assert_eq!(PieceType::from_mask(DirectionMask::EMPTY), None);
        let pieces: HashSet<PieceType> = (1..16u8)
            .map(|b| PieceType::from_mask(DirectionMask::from_bits(b)).unwrap())
            .collect();
        assert_eq!(pieces.len(), 15);
    }

    #[test]
    fn tee_is_named_by_missing_direction() {
        let piece = PieceType::from_mask(Direction::Up | Direction::Left | Direction::Right).unwrap();
        assert_eq!(piece, PieceType::Tee { missing: Direction::Down });
    }

    #[test]
    fn masks_on_both_sides_of_a_step() {
        let map = build_connection_map([&path(&[(0, 0), (1, 0), (1, 1)])]);
        assert_eq!(map.get(Cell::new(0, 0)), Some(Direction::Right.into()));
        assert_eq!(map.get(Cell::new(1, 0)), Some(Direction::Left | Direction::Down));
        assert_eq!(map.get(Cell::new(1, 1)), Some(Direction::Up.into()));
        assert_eq!(map.get(Cell::new(2, 2)), None);
    }

    #[test]
    fn single_cell_paths_contribute_nothing() {
        let map = build_connection_map([&Path::single(Cell::new(0, 0))]);
        assert!(map.is_empty());
    }

    #[test]
    fn shared_corridor_forms_a_tee() {
        let a = path(&[(0, 1), (1, 1), (2, 1)]);
        let b = path(&[(0, 1), (1, 1), (1, 2)]);
        let analysis = analyze([&a, &b]);
        assert_eq!(
            analysis.piece_at(Cell::new(1, 1)),
            Some(PieceType::Tee { missing: Direction::Up })
        );
        assert_eq!(analysis.pieces.len(), 1);
        assert_eq!(analysis.piece_at(Cell::new(0, 1)), None);
        assert_eq!(analysis.dead_ends().count(), 0);
    }

    #[test]
    fn endpoints_are_not_classified() {
        let p = path(&[(0, 0), (1, 0), (2, 0)]);
        let analysis = analyze([&p]);
        assert_eq!(analysis.connections.len(), 3);
        assert_eq!(
            analysis.pieces.into_iter().collect::<Vec<_>>(),
            vec![(Cell::new(1, 0), PieceType::Straight(Axis::Horizontal))]
        );
    }

    #[test]
    fn dead_ends_lists_stub_pieces() {
        let mut analysis = analyze([&path(&[(0, 0), (1, 0), (2, 0)])]);
        assert_eq!(analysis.dead_ends().count(), 0);

        analysis.pieces.insert(Cell::new(5, 5), PieceType::End(Direction::Left));
        assert_eq!(analysis.dead_ends().collect::<Vec<_>>(), vec![Cell::new(5, 5)]);
    }
}
