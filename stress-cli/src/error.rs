//! Error types for undo-stress.

use undo_stress_types::EntropyError;

use crate::build_step::BuildError;
use crate::config::ConfigError;

/// Fatal errors that stop a run before or outside the actor fan-out.
///
/// Actor failures are not here: they are collected into the
/// [`FleetSummary`](undo_stress_types::FleetSummary) instead.
#[derive(Debug, thiserror::Error)]
pub enum StressError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Actor build failed.
    #[error("build failed: {0}")]
    Build(#[from] BuildError),

    /// Document identifier could not be generated.
    #[error("cannot provision document: {0}")]
    Entropy(#[from] EntropyError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Summary report could not be serialized.
    #[error("report serialization failed: {0}")]
    Report(#[from] serde_json::Error),
}

/// Result type alias for undo-stress operations.
pub type Result<T> = std::result::Result<T, StressError>;
