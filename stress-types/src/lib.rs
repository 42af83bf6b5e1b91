//! # undo-stress-types
//!
//! Shared types for the undo/redo stress launcher.
//!
//! This crate provides the data model used by the launcher and its tests:
//! - [`DocumentId`] - The shared document every actor in a run operates on
//! - [`ActorTask`], [`ActorRun`], [`ActorStatus`] - One actor's work and result
//! - [`FleetSummary`], [`RunOutcome`] - Aggregate view of a whole run
//! - [`EntropyError`] - Error types

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod ids;
mod summary;
mod task;

pub use error::{EntropyError, ParseDocumentIdError};
pub use ids::DocumentId;
pub use summary::{FleetSummary, RunOutcome};
pub use task::{ActorRun, ActorStatus, ActorTask};

/// Serialize a [`std::time::Duration`] as fractional seconds.
pub(crate) mod serde_secs {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }
}
