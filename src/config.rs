//! Configuration for grid sizing, placement, routing and the search loop

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geometry::Neighborhood;
use crate::node::Node;

/// Viewport size class, selecting how many cells the grid gets per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeClass {
    Compact,
    #[default]
    Normal,
}

impl SizeClass {
    /// `Compact` at or below the breakpoint, `Normal` above it.
    pub fn for_viewport_width(width: f64, breakpoint: f64) -> Self {
        if width <= breakpoint {
            SizeClass::Compact
        } else {
            SizeClass::Normal
        }
    }
}

/// How container dimensions turn into a cell count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizingPolicy {
    /// `cells_per_axis` on both axes; cells stretch to the container aspect.
    #[default]
    Square,
    /// `cells_per_axis` on the longer axis, square cells, shorter axis shrinks.
    AspectAware,
}

/// Configuration options for layout generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Cells per axis for the normal size class
    pub cells_per_axis: u32,

    /// Cells per axis for the compact size class
    pub cells_per_axis_compact: u32,

    /// Viewport width (px) at or below which the compact size class applies
    pub compact_breakpoint: f64,

    pub sizing: SizingPolicy,

    /// Upper bound on configuration search attempts
    pub max_attempts: usize,

    /// Random samples a single node may draw before placement gives up
    pub placement_attempts: usize,

    /// Destinations block each other's routes
    pub avoid_other_destinations: bool,

    /// Later routes favour cells used by earlier ones
    pub prefer_existing_paths: bool,

    /// Placement reserves the cells around each placed node
    pub block_adjacent_sections: bool,

    /// The reservation also covers diagonal neighbours
    pub block_diagonal_adjacency: bool,

    /// Write a JSON trace of the search to this file
    pub trace_path: Option<PathBuf>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            cells_per_axis: 10,
            cells_per_axis_compact: 5,
            compact_breakpoint: 768.0,
            sizing: SizingPolicy::Square,
            max_attempts: 50,
            placement_attempts: 100,
            avoid_other_destinations: true,
            prefer_existing_paths: true,
            block_adjacent_sections: true,
            block_diagonal_adjacency: false,
            trace_path: None,
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn cells_for(&self, size_class: SizeClass) -> u32 {
        match size_class {
            SizeClass::Compact => self.cells_per_axis_compact,
            SizeClass::Normal => self.cells_per_axis,
        }
    }

    /// Neighbourhood reserved around placed nodes, or `None` when disabled.
    pub fn exclusion_zone(&self) -> Option<Neighborhood> {
        if !self.block_adjacent_sections {
            None
        } else if self.block_diagonal_adjacency {
            Some(Neighborhood::Moore)
        } else {
            Some(Neighborhood::Orthogonal)
        }
    }

    /// Whether routes go through the search router rather than the L-shaped fallback.
    pub fn uses_search_router(&self) -> bool {
        self.avoid_other_destinations || self.prefer_existing_paths
    }

    pub fn with_cells_per_axis(mut self, cells: u32) -> Self {
        self.cells_per_axis = cells;
        self
    }

    pub fn with_sizing(mut self, sizing: SizingPolicy) -> Self {
        self.sizing = sizing;
        self
    }

    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts;
        self
    }

    pub fn with_placement_attempts(mut self, attempts: usize) -> Self {
        self.placement_attempts = attempts;
        self
    }

    pub fn with_avoid_other_destinations(mut self, avoid: bool) -> Self {
        self.avoid_other_destinations = avoid;
        self
    }

    pub fn with_prefer_existing_paths(mut self, prefer: bool) -> Self {
        self.prefer_existing_paths = prefer;
        self
    }

    pub fn with_block_adjacent_sections(mut self, block: bool) -> Self {
        self.block_adjacent_sections = block;
        self
    }

    pub fn with_block_diagonal_adjacency(mut self, block: bool) -> Self {
        self.block_diagonal_adjacency = block;
        self
    }

    pub fn with_trace_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.trace_path = Some(path.into());
        self
    }
}

/// Link target carried by each node of a layout file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Link {
    #[serde(default)]
    pub url: String,
}

/// A layout file: a `[layout]` table plus the `[[nodes]]` to place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutFile {
    pub layout: LayoutConfig,
    pub nodes: Vec<Node<Link>>,
}

impl Default for LayoutFile {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            nodes: default_sections(),
        }
    }
}

impl LayoutFile {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }
}

/// The site sections laid out when no node list is configured.
pub fn default_sections() -> Vec<Node<Link>> {
    let link = |url: &str| Link {
        url: url.to_string(),
    };
    vec![
        Node::home("home", link("index.html")),
        Node::destination("about", link("about.html")),
        Node::destination("collabs", link("collabs.html")),
        Node::destination("blog", link("blog.html")),
        Node::destination("booking", link("booking.html")),
        Node::destination("training", link("training.html")),
    ]
}
