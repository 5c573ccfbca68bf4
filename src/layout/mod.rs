pub mod placement;
pub mod sizing;

pub use placement::{generate_positions, PlacedNode, Placement};
pub use sizing::GridSize;
