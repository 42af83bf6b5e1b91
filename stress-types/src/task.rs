//! Per-actor work items and results.

use serde::Serialize;
use std::fmt;
use std::time::Duration;

use crate::ids::DocumentId;

/// One actor's assignment: its index in the fleet and the shared document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActorTask {
    /// Index in `[0, actor_count)`, unique within a run.
    pub index: u32,
    /// Document shared by every actor in the run.
    pub document: DocumentId,
}

impl ActorTask {
    /// Create a task for the given actor index.
    pub fn new(index: u32, document: DocumentId) -> Self {
        Self { index, document }
    }

    /// Command-line arguments handed to the actor executable, in order.
    pub fn args(&self) -> [String; 2] {
        [self.index.to_string(), self.document.to_string()]
    }
}

/// How an actor finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ActorStatus {
    /// Process exited 0.
    Succeeded,
    /// Process exited non-zero, or was terminated by a signal (`exit_code: None`).
    Failed {
        /// Exit code, if the process exited normally.
        exit_code: Option<i32>,
    },
    /// Process exceeded the per-actor timeout and was killed.
    TimedOut,
    /// Process could not be started.
    SpawnFailed {
        /// Spawn error message.
        reason: String,
    },
    /// Process started but its exit could not be observed, or the task
    /// running it panicked.
    Aborted {
        /// What went wrong.
        reason: String,
    },
}

impl ActorStatus {
    /// Returns true if the actor exited 0.
    pub fn is_success(&self) -> bool {
        matches!(self, ActorStatus::Succeeded)
    }
}

/// Result of one actor run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActorRun {
    /// Actor index.
    pub index: u32,
    /// Wall-clock time from spawn to exit.
    #[serde(rename = "elapsed_secs", serialize_with = "crate::serde_secs::serialize")]
    pub elapsed: Duration,
    /// Final status.
    #[serde(flatten)]
    pub status: ActorStatus,
}

impl ActorRun {
    /// A successful run.
    pub fn succeeded(index: u32, elapsed: Duration) -> Self {
        Self {
            index,
            elapsed,
            status: ActorStatus::Succeeded,
        }
    }

    /// Returns true if the actor exited 0.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

impl fmt::Display for ActorRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.elapsed.as_secs_f64();
        match &self.status {
            ActorStatus::Succeeded => {
                write!(f, "actor {} completed in {:.3}s", self.index, secs)
            }
            ActorStatus::Failed {
                exit_code: Some(code),
            } => write!(
                f,
                "actor {} failed with exit code {} after {:.3}s",
                self.index, code, secs
            ),
            ActorStatus::Failed { exit_code: None } => write!(
                f,
                "actor {} terminated by signal after {:.3}s",
                self.index, secs
            ),
            ActorStatus::TimedOut => {
                write!(f, "actor {} timed out after {:.3}s", self.index, secs)
            }
            ActorStatus::SpawnFailed { reason } => {
                write!(f, "actor {} failed to start: {}", self.index, reason)
            }
            ActorStatus::Aborted { reason } => write!(
                f,
                "actor {} aborted after {:.3}s: {}",
                self.index, secs, reason
            ),
        }
    }
}
