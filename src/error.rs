//! Error types for layout generation and configuration loading

use std::path::PathBuf;

use thiserror::Error;

use crate::geometry::Cell;

/// Errors that can occur while laying out and routing the grid
#[derive(Debug, Error)]
pub enum LayoutError {
    /// The node list was empty
    #[error("no nodes to place")]
    NoNodes,

    /// None of the nodes is marked as home
    #[error("no home node among the nodes")]
    MissingHome,

    /// More than one node is marked as home
    #[error("more than one home node: {}", names.join(", "))]
    MultipleHomes { names: Vec<String> },

    /// Two nodes share a name
    #[error("duplicate node name '{name}'")]
    DuplicateName { name: String },

    /// Grid with a zero dimension
    #[error("grid must be at least 1x1, got {cols}x{rows}")]
    EmptyGrid { cols: u32, rows: u32 },

    /// A node found no free cell within its sampling budget
    #[error("could not place node '{node}' after {attempts} samples")]
    PlacementExhausted { node: String, attempts: usize },

    /// No route exists from home to a destination under the blocking rules
    #[error("no route to '{destination}' from {from} to {to}")]
    RouteUnreachable {
        destination: String,
        from: Cell,
        to: Cell,
    },

    /// Every attempt of the configuration search failed
    #[error("no valid configuration after {attempts} attempts{}", last_failure_suffix(.last_failure))]
    SearchFailed {
        attempts: usize,
        last_failure: Option<Box<LayoutError>>,
    },
}

fn last_failure_suffix(last: &Option<Box<LayoutError>>) -> String {
    match last {
        Some(err) => format!(" (last failure: {})", err),
        None => String::new(),
    }
}

impl LayoutError {
    pub fn placement_exhausted(node: impl Into<String>, attempts: usize) -> Self {
        Self::PlacementExhausted {
            node: node.into(),
            attempts,
        }
    }

    pub fn route_unreachable(destination: impl Into<String>, from: Cell, to: Cell) -> Self {
        Self::RouteUnreachable {
            destination: destination.into(),
            from,
            to,
        }
    }

    pub fn search_failed(attempts: usize, last_failure: Option<LayoutError>) -> Self {
        Self::SearchFailed {
            attempts,
            last_failure: last_failure.map(Box::new),
        }
    }

    /// True for caller mistakes that no amount of retrying can fix.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::NoNodes
                | Self::MissingHome
                | Self::MultipleHomes { .. }
                | Self::DuplicateName { .. }
                | Self::EmptyGrid { .. }
        )
    }

    /// True for failures the search recovers from by starting a fresh attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::PlacementExhausted { .. } | Self::RouteUnreachable { .. }
        )
    }
}

/// Errors raised while loading a layout configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}
