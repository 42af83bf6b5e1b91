//! Actor launch abstraction.
//!
//! An actor is one external process that connects to the shared document
//! and performs scripted undo/redo operations. The launcher only starts it,
//! waits for it, and times it.
//!
//! # Design
//!
//! - [`ActorLauncher::launch`] runs one [`ActorTask`] to completion
//! - [`ProcessLauncher`] spawns the real actor executable
//! - [`MockLauncher`] records tasks and scripts failures for tests

mod mock;
mod process;

pub use mock::MockLauncher;
pub use process::ProcessLauncher;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use undo_stress_types::{ActorRun, ActorStatus, ActorTask};

use crate::build_step::describe_exit;

/// Actor errors.
#[derive(Debug, Error)]
pub enum ActorError {
    /// Actor process could not be started.
    #[error("actor {index}: failed to start: {source}")]
    Spawn {
        /// Actor index.
        index: u32,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Waiting on the actor process failed.
    #[error("actor {index}: wait failed: {source}")]
    Wait {
        /// Actor index.
        index: u32,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Actor process exited non-zero or was killed by a signal.
    #[error("actor {index}: process exited with {}", describe_exit(.exit_code))]
    ProcessFailure {
        /// Actor index.
        index: u32,
        /// Exit code, `None` if terminated by a signal.
        exit_code: Option<i32>,
        /// Time from spawn to exit.
        elapsed: Duration,
    },

    /// Actor exceeded the per-actor timeout and was killed.
    #[error("actor {index}: timed out after {after:?}")]
    Timeout {
        /// Actor index.
        index: u32,
        /// Time from spawn to kill.
        after: Duration,
    },
}

impl ActorError {
    /// Index of the actor this error belongs to.
    pub fn index(&self) -> u32 {
        match self {
            ActorError::Spawn { index, .. }
            | ActorError::Wait { index, .. }
            | ActorError::ProcessFailure { index, .. }
            | ActorError::Timeout { index, .. } => *index,
        }
    }

    /// Convert into a failed [`ActorRun`] for the summary.
    ///
    /// `measured` is used when the error carries no timing of its own.
    pub fn into_run(self, measured: Duration) -> ActorRun {
        let index = self.index();
        let (elapsed, status) = match self {
            ActorError::Spawn { source, .. } => (
                measured,
                ActorStatus::SpawnFailed {
                    reason: source.to_string(),
                },
            ),
            ActorError::Wait { source, .. } => (
                measured,
                ActorStatus::Aborted {
                    reason: format!("wait failed: {source}"),
                },
            ),
            ActorError::ProcessFailure {
                exit_code, elapsed, ..
            } => (elapsed, ActorStatus::Failed { exit_code }),
            ActorError::Timeout { after, .. } => (after, ActorStatus::TimedOut),
        };
        ActorRun {
            index,
            elapsed,
            status,
        }
    }
}

/// Runs one actor to completion.
///
/// Implementations must not retry: one task, one attempt.
#[async_trait]
pub trait ActorLauncher: Send + Sync {
    /// Run the actor for `task` and wait for it to finish.
    ///
    /// Returns `Ok` only if the actor exited 0.
    async fn launch(&self, task: ActorTask) -> Result<ActorRun, ActorError>;
}
