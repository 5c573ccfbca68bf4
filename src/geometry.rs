use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// A grid cell addressed by column `x` and row `y`.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Copy, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Cell {
        Cell {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn step(&self, direction: Direction) -> Cell {
        let (dx, dy) = direction.offset();
        self.offset(dx, dy)
    }

    pub fn manhattan_distance(&self, other: &Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    pub fn is_orthogonally_adjacent(&self, other: &Cell) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// Direction of the unit step from `self` to `other`, if they are 4-adjacent.
    pub fn direction_to(&self, other: &Cell) -> Option<Direction> {
        match (other.x - self.x, other.y - self.y) {
            (1, 0) => Some(Direction::Right),
            (-1, 0) => Some(Direction::Left),
            (0, 1) => Some(Direction::Down),
            (0, -1) => Some(Direction::Up),
            _ => None,
        }
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Cell { x, y }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Which ring of cells counts as "next to" a cell.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Neighborhood {
    #[default]
    Orthogonal,
    Moore,
}

impl Neighborhood {
    pub fn offsets(&self) -> &'static [(i32, i32)] {
        const ORTHOGONAL: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
        const MOORE: [(i32, i32); 8] = [
            (1, 0),
            (-1, 0),
            (0, 1),
            (0, -1),
            (1, 1),
            (1, -1),
            (-1, 1),
            (-1, -1),
        ];
        match self {
            Neighborhood::Orthogonal => &ORTHOGONAL,
            Neighborhood::Moore => &MOORE,
        }
    }
}

#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    /// Expansion order used by the router: right, left, down, up.
    pub const SEARCH_ORDER: [Direction; 4] =
        [Direction::Right, Direction::Left, Direction::Down, Direction::Up];

    pub fn offset(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    pub fn bit(&self) -> u8 {
        match self {
            Direction::Up => 1,
            Direction::Right => 2,
            Direction::Down => 4,
            Direction::Left => 8,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        }
    }
}

/// Set of directions packed into the low four bits (up=1, right=2, down=4, left=8).
#[derive(Clone, Copy, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DirectionMask(u8);

impl DirectionMask {
    pub const EMPTY: DirectionMask = DirectionMask(0);
    pub const ALL: DirectionMask = DirectionMask(0b1111);

    /// Builds a mask from raw bits, dropping anything above the low nibble.
    pub const fn from_bits(bits: u8) -> Self {
        DirectionMask(bits & 0b1111)
    }

    pub fn bits(&self) -> u8 {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn contains(&self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    pub fn count(&self) -> u32 {
        self.0.count_ones()
    }

    pub fn insert(&mut self, direction: Direction) {
        self.0 |= direction.bit();
    }

    pub fn directions(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL.into_iter().filter(|d| self.contains(*d))
    }
}

impl From<Direction> for DirectionMask {
    fn from(direction: Direction) -> Self {
        DirectionMask(direction.bit())
    }
}

impl BitOr for DirectionMask {
    type Output = DirectionMask;

    fn bitor(self, other: DirectionMask) -> DirectionMask {
        DirectionMask(self.0 | other.0)
    }
}

impl BitOr<Direction> for DirectionMask {
    type Output = DirectionMask;

    fn bitor(self, other: Direction) -> DirectionMask {
        DirectionMask(self.0 | other.bit())
    }
}

impl BitOr for Direction {
    type Output = DirectionMask;

    fn bitor(self, other: Direction) -> DirectionMask {
        DirectionMask(self.bit() | other.bit())
    }
}

impl BitOrAssign for DirectionMask {
    fn bitor_assign(&mut self, other: DirectionMask) {
        self.0 |= other.0;
    }
}

impl BitOrAssign<Direction> for DirectionMask {
    fn bitor_assign(&mut self, other: Direction) {
        self.0 |= other.bit();
    }
}

impl fmt::Debug for DirectionMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.directions().map(|d| d.name()))
            .finish()
    }
}
