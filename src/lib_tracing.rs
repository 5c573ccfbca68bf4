use std::{fs::File, io, path::Path, sync::Arc};

use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{prelude::*, util::TryInitError};

#[derive(Debug, Error)]
pub enum TracingError {
    #[error("cannot create debug log {path}: {source}")]
    DebugLog {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("a global tracing subscriber is already installed")]
    AlreadyInstalled(#[from] TryInitError),
}

/// Installs the global subscriber: pretty events on stderr at `level`, plus
/// every event at all levels into `debug_log` when one is given.
pub struct LibTracer;

impl LibTracer {
    pub fn init(level: LevelFilter, debug_log: Option<&Path>) -> Result<(), TracingError> {
        let stderr_log = tracing_subscriber::fmt::layer()
            .pretty()
            .with_writer(io::stderr)
            .with_filter(level);

        // A layer that logs events to a file.
        let file_log = match debug_log {
            Some(path) => {
                let file = File::create(path).map_err(|source| TracingError::DebugLog {
                    path: path.display().to_string(),
                    source,
                })?;
                Some(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Arc::new(file)),
                )
            }
            None => None,
        };

        tracing_subscriber::registry()
            .with(stderr_log)
            .with(file_log)
            .try_init()?;
        Ok(())
    }
}
