//! Aggregate results of one fleet run.

use serde::Serialize;
use std::fmt;
use std::time::Duration;

use crate::ids::DocumentId;
use crate::task::ActorRun;

/// Overall result of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// Every actor exited 0.
    Succeeded,
    /// At least one actor failed, timed out, or could not start.
    Failed,
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunOutcome::Succeeded => write!(f, "succeeded"),
            RunOutcome::Failed => write!(f, "FAILED"),
        }
    }
}

/// Summary of a fleet run, built once every actor has reported.
#[derive(Debug, Clone, Serialize)]
pub struct FleetSummary {
    /// Document shared by the fleet.
    pub document: DocumentId,
    /// Number of actors dispatched.
    pub actor_count: u32,
    /// Per-actor results, in completion order.
    pub runs: Vec<ActorRun>,
    /// Total wall-clock span of the run.
    #[serde(rename = "elapsed_secs", serialize_with = "crate::serde_secs::serialize")]
    pub elapsed: Duration,
}

impl FleetSummary {
    /// Overall outcome: `Failed` if any actor did not succeed.
    pub fn outcome(&self) -> RunOutcome {
        if self.runs.iter().all(ActorRun::is_success) {
            RunOutcome::Succeeded
        } else {
            RunOutcome::Failed
        }
    }

    /// Number of actors that exited 0.
    pub fn succeeded(&self) -> usize {
        self.runs.iter().filter(|r| r.is_success()).count()
    }

    /// Runs that did not succeed, in completion order.
    pub fn failures(&self) -> impl Iterator<Item = &ActorRun> {
        self.runs.iter().filter(|r| !r.is_success())
    }

    /// Longest single-actor duration.
    pub fn max_actor_elapsed(&self) -> Duration {
        self.runs
            .iter()
            .map(|r| r.elapsed)
            .max()
            .unwrap_or(Duration::ZERO)
    }
}

impl fmt::Display for FleetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let succeeded = self.succeeded();
        write!(
            f,
            "{}: {} actors ({} succeeded, {} failed) in {:.3}s, document {}",
            self.outcome(),
            self.actor_count,
            succeeded,
            self.runs.len() - succeeded,
            self.elapsed.as_secs_f64(),
            self.document
        )
    }
}
