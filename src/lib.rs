pub mod config;
pub mod connections;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod lib_tracing;
pub mod node;
pub mod routing;
pub mod search;
mod trace;

use indexmap::IndexMap;
use rand::Rng;
use serde::Serialize;

pub use config::{default_sections, LayoutConfig, LayoutFile, Link, SizeClass, SizingPolicy};
pub use connections::{analyze, build_connection_map, ConnectionAnalysis, ConnectionMap, PieceType};
pub use error::{ConfigError, LayoutError};
pub use geometry::{Cell, Direction, DirectionMask, Neighborhood};
pub use layout::{generate_positions, GridSize, PlacedNode, Placement};
pub use node::Node;
pub use routing::{simple_path, Path, PathRouter};
pub use search::{generate_all_paths, search, Configuration};
pub use trace::TRACE_ENV_VAR;

/// Everything needed to render one layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Layout<P> {
    pub grid: GridSize,
    pub placement: Placement<P>,
    pub paths: IndexMap<String, Path>,
    pub analysis: ConnectionAnalysis,
    /// Search attempt that produced this layout
    pub attempt: usize,
}

impl<P> Layout<P> {
    /// Piece to draw at `cell`, if a route passes through it.
    pub fn piece_at(&self, cell: Cell) -> Option<PieceType> {
        self.analysis.piece_at(cell)
    }
}

/// Sizes the grid for a `width` x `height` container, searches for a
/// configuration and classifies the resulting routes.
pub fn generate_layout<P: Clone, R: Rng + ?Sized>(
    width: f64,
    height: f64,
    size_class: SizeClass,
    nodes: &[Node<P>],
    config: &LayoutConfig,
    rng: &mut R,
) -> Result<Layout<P>, LayoutError> {
    let grid = GridSize::for_container(width, height, size_class, config);
    let found = search(grid.cols, grid.rows, nodes, config, rng)?;
    let analysis = analyze(found.paths.values());

    tracing::info!(
        cols = grid.cols,
        rows = grid.rows,
        attempt = found.attempt,
        pieces = analysis.pieces.len(),
        "generated layout"
    );

    Ok(Layout {
        grid,
        placement: found.placement,
        paths: found.paths,
        analysis,
        attempt: found.attempt,
    })
}
