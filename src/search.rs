//! Generate-and-test search for a placement whose routes all succeed

use std::collections::HashSet;

use indexmap::IndexMap;
use rand::Rng;
use serde::Serialize;

use crate::config::LayoutConfig;
use crate::error::LayoutError;
use crate::geometry::Cell;
use crate::layout::{generate_positions, Placement};
use crate::node::{validate_nodes, Node};
use crate::routing::{simple_path, Path, PathRouter};
use crate::trace::SearchTrace;

/// A placement plus one route per destination, keyed by destination name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Configuration<P> {
    pub placement: Placement<P>,
    pub paths: IndexMap<String, Path>,
    /// 1-based attempt that produced this configuration
    pub attempt: usize,
}

/// Routes every destination from home, in placement order.
///
/// Each route may not cross another destination's cell when
/// `avoid_other_destinations` is set, and is biased toward the cells of the
/// routes before it when `prefer_existing_paths` is set. With both off the
/// L-shaped fallback is used. The first unreachable destination fails the
/// whole call.
pub fn generate_all_paths<P>(
    placement: &Placement<P>,
    router: &PathRouter,
    config: &LayoutConfig,
) -> Result<IndexMap<String, Path>, LayoutError> {
    let mut paths = IndexMap::new();
    route_destinations(placement, router, config, &mut paths)?;
    Ok(paths)
}

/// Like [`generate_all_paths`] but leaves the routes found so far in `paths`.
fn route_destinations<P>(
    placement: &Placement<P>,
    router: &PathRouter,
    config: &LayoutConfig,
    paths: &mut IndexMap<String, Path>,
) -> Result<(), LayoutError> {
    let home = placement.home().ok_or(LayoutError::MissingHome)?.cell;

    let destination_cells: Vec<(&str, Cell)> = placement
        .destinations()
        .map(|d| (d.node.name.as_str(), d.cell))
        .collect();

    let no_cells = HashSet::new();
    let mut preferred: HashSet<Cell> = HashSet::new();

    for &(name, cell) in &destination_cells {
        let path = if config.uses_search_router() {
            let blocked: HashSet<Cell> = if config.avoid_other_destinations {
                destination_cells
                    .iter()
                    .filter(|(other, _)| *other != name)
                    .map(|(_, c)| *c)
                    .collect()
            } else {
                HashSet::new()
            };
            let bias = if config.prefer_existing_paths {
                &preferred
            } else {
                &no_cells
            };
            router
                .find_path(home, cell, &blocked, bias)
                .ok_or_else(|| LayoutError::route_unreachable(name, home, cell))?
        } else {
            simple_path(home, cell)
        };

        if config.prefer_existing_paths {
            preferred.extend(path.as_slice().iter().copied());
        }
        paths.insert(name.to_string(), path);
    }

    Ok(())
}

/// Searches up to `config.max_attempts` random placements for one in which
/// every destination can be routed from home.
///
/// Caller mistakes (see [`LayoutError::is_precondition`]) are reported before
/// any randomness is consumed. Running out of attempts yields
/// [`LayoutError::SearchFailed`] carrying the last attempt's failure.
pub fn search<P: Clone, R: Rng + ?Sized>(
    cols: u32,
    rows: u32,
    nodes: &[Node<P>],
    config: &LayoutConfig,
    rng: &mut R,
) -> Result<Configuration<P>, LayoutError> {
    if cols == 0 || rows == 0 {
        return Err(LayoutError::EmptyGrid { cols, rows });
    }
    validate_nodes(nodes)?;

    let router = PathRouter::new(cols, rows);
    let exclusion = config.exclusion_zone();
    let mut trace = SearchTrace::from_config(config);
    let mut last_failure = None;

    for attempt in 1..=config.max_attempts {
        let placement = match generate_positions(cols, rows, nodes, exclusion, config.placement_attempts, rng) {
            Ok(placement) => placement,
            Err(failure) => {
                tracing::trace!(attempt, %failure, "placement failed");
                trace.record_placement_failure(attempt, &failure);
                last_failure = Some(failure);
                continue;
            }
        };

        let mut paths = IndexMap::new();
        match route_destinations(&placement, &router, config, &mut paths) {
            Ok(()) => {
                trace.record_attempt(attempt, &placement, &paths, None);
                trace.finish(cols, rows, config, true);
                tracing::debug!(attempt, routes = paths.len(), "found configuration");
                return Ok(Configuration {
                    placement,
                    paths,
                    attempt,
                });
            }
            Err(failure) => {
                tracing::trace!(attempt, %failure, "routing failed");
                trace.record_attempt(attempt, &placement, &paths, Some(&failure));
                last_failure = Some(failure);
            }
        }
    }

    trace.finish(cols, rows, config, false);
    tracing::info!(
        attempts = config.max_attempts,
        cols,
        rows,
        nodes = nodes.len(),
        "configuration search exhausted"
    );
    Err(LayoutError::search_failed(config.max_attempts, last_failure))
}
