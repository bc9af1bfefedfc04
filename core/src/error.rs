use std::path::PathBuf;

use thiserror::Error;

/// Failures a refresh cycle can run into.
///
/// None of these are shown to the user: every variant degrades to "no markers
/// change this cycle" at the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Map metadata with a zero scale factor
    #[error("invalid map metadata: size factor {size_factor} must be positive")]
    InvalidMetadata { size_factor: u16 },

    /// Player, job, territory or map could not be resolved
    #[error("missing context: {0}")]
    MissingContext(&'static str),

    /// An id was not present in a static lookup table
    #[error("unresolvable reference: no {table} row {id}")]
    UnresolvableReference { table: &'static str, id: u32 },

    /// Mob location data failed to load or has an unsupported version
    #[error("mob location dataset unavailable")]
    DatasetUnavailable,
}

/// Failures loading static data files
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("no data file found (searched {searched:?})")]
    NotFound { searched: Vec<PathBuf> },

    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported dataset version {found} (supported: {min}..={max})")]
    UnsupportedVersion { found: u32, min: u32, max: u32 },

    #[error("territory {0} appears more than once")]
    DuplicateTerritory(u16),
}
