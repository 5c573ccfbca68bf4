use std::fs;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde_json::json;

use crate::config::LayoutConfig;
use crate::error::LayoutError;
use crate::layout::Placement;
use crate::routing::Path;

/// Environment variable naming a file to receive the search trace.
pub const TRACE_ENV_VAR: &str = "PIPEGRID_TRACE_JSON";

/// Collects one JSON record per search attempt and writes them out at the end.
pub(crate) struct SearchTrace {
    path: Option<PathBuf>,
    attempts: Vec<serde_json::Value>,
}

impl SearchTrace {
    pub fn from_config(config: &LayoutConfig) -> Self {
        let path = config
            .trace_path
            .clone()
            .or_else(|| std::env::var_os(TRACE_ENV_VAR).map(PathBuf::from));
        SearchTrace {
            path,
            attempts: Vec::new(),
        }
    }

    pub fn enabled(&self) -> bool {
        self.path.is_some()
    }

    pub fn record_placement_failure(&mut self, attempt: usize, failure: &LayoutError) {
        if !self.enabled() {
            return;
        }
        self.attempts.push(json!({
            "attempt": attempt,
            "placement": null,
            "routes": {},
            "failure": failure.to_string(),
        }));
    }

    pub fn record_attempt<P>(
        &mut self,
        attempt: usize,
        placement: &Placement<P>,
        routes: &IndexMap<String, Path>,
        failure: Option<&LayoutError>,
    ) {
        if !self.enabled() {
            return;
        }

        let placed: Vec<serde_json::Value> = placement
            .entries()
            .iter()
            .map(|e| {
                json!({
                    "name": e.node.name,
                    "home": e.node.is_home,
                    "x": e.cell.x,
                    "y": e.cell.y,
                })
            })
            .collect();

        let routed: serde_json::Map<String, serde_json::Value> = routes
            .iter()
            .map(|(name, path)| {
                let cells: Vec<serde_json::Value> = path
                    .as_slice()
                    .iter()
                    .map(|c| json!({ "x": c.x, "y": c.y }))
                    .collect();
                (name.clone(), json!(cells))
            })
            .collect();

        self.attempts.push(json!({
            "attempt": attempt,
            "placement": placed,
            "routes": routed,
            "failure": failure.map(|f| f.to_string()),
        }));
    }

    /// Writes the trace file. Failing to write is logged, never propagated.
    pub fn finish(self, cols: u32, rows: u32, config: &LayoutConfig, succeeded: bool) {
        let Some(path) = self.path else {
            return;
        };

        let document = json!({
            "grid": { "cols": cols, "rows": rows },
            "config": config,
            "succeeded": succeeded,
            "attempts": self.attempts,
        });

        let written = serde_json::to_string_pretty(&document)
            .map_err(|e| e.to_string())
            .and_then(|text| fs::write(&path, text).map_err(|e| e.to_string()));

        match written {
            Ok(()) => tracing::debug!(path = %path.display(), "wrote search trace"),
            Err(error) => tracing::warn!(path = %path.display(), %error, "could not write search trace"),
        }
    }
}
