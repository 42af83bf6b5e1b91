//! Fleet coordinator: one document, N concurrent actors, one barrier.
//!
//! The coordinator provisions the shared document, fires the viewer,
//! starts every actor at once, and waits for all of them. Each actor task
//! reports its [`ActorRun`] over a channel, so results arrive in completion
//! order without any shared counters. A failed actor never cancels its
//! siblings.

use std::io::Write;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{mpsc, Semaphore};
use undo_stress_types::{ActorRun, ActorStatus, ActorTask, DocumentId, FleetSummary};

use crate::actor::ActorLauncher;
use crate::config::{validate_actor_count, ViewerConfig};
use crate::error::Result;
use crate::report;
use crate::viewer;

/// Per-run coordinator settings.
#[derive(Debug, Clone, Default)]
pub struct FleetConfig {
    /// Viewer launch settings.
    pub viewer: ViewerConfig,
    /// Reuse this document instead of provisioning a fresh one.
    pub document: Option<DocumentId>,
}

/// Coordinates one fleet run.
pub struct Fleet {
    config: FleetConfig,
    launcher: Arc<dyn ActorLauncher>,
}

impl Fleet {
    /// Create a coordinator that starts actors through `launcher`.
    pub fn new(config: FleetConfig, launcher: Arc<dyn ActorLauncher>) -> Self {
        Self { config, launcher }
    }

    /// Get the coordinator configuration.
    pub fn config(&self) -> &FleetConfig {
        &self.config
    }

    /// Run `actor_count` actors against one shared document.
    ///
    /// Per-actor lines are written to `out` as actors finish, followed by
    /// one summary line once every actor has reported.
    ///
    /// # Errors
    ///
    /// Fails before launching anything if `actor_count < 1` or no document
    /// can be provisioned. Actor failures are not errors here; they show
    /// up in [`FleetSummary::outcome`].
    pub async fn run<W: Write>(&self, actor_count: i64, out: &mut W) -> Result<FleetSummary> {
        let actor_count = validate_actor_count(actor_count)?;

        let document = match self.config.document {
            Some(document) => document,
            None => DocumentId::provision()?,
        };
        tracing::info!(%document, actor_count, "Starting fleet");

        if self.config.viewer.enabled {
            // Detached: the run never waits on the browser.
            drop(viewer::launch(&self.config.viewer, document));
            let settle = self.config.viewer.settle();
            if !settle.is_zero() {
                tokio::time::sleep(settle).await;
            }
        }

        // Timing covers the actors only, not the viewer settle.
        let start = Instant::now();

        let width = actor_count as usize;
        let semaphore = Arc::new(Semaphore::new(width));
        let (tx, mut rx) = mpsc::channel::<ActorRun>(width);
        let mut handles = Vec::with_capacity(width);

        for index in 0..actor_count {
            let task = ActorTask::new(index, document);
            let launcher = Arc::clone(&self.launcher);
            let semaphore = Arc::clone(&semaphore);
            let tx = tx.clone();

            let handle = tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await;
                let started = Instant::now();
                let run = match launcher.launch(task).await {
                    Ok(run) => run,
                    Err(e) => {
                        tracing::warn!("{}", e);
                        e.into_run(started.elapsed())
                    }
                };
                // Receiver outlives every sender; a send error is unreachable.
                let _ = tx.send(run).await;
            });
            handles.push((index, handle));
        }
        drop(tx);

        // Barrier: the channel closes only when every actor task is done.
        let mut runs = Vec::with_capacity(width);
        while let Some(run) = rx.recv().await {
            tracing::debug!(index = run.index, elapsed = ?run.elapsed, "Actor reported");
            report::emit(out, &run);
            runs.push(run);
        }

        // A panicked actor task never reports; record it as aborted.
        for (index, handle) in handles {
            if let Err(e) = handle.await {
                tracing::warn!(index, "Actor task did not complete: {}", e);
                let run = ActorRun {
                    index,
                    elapsed: start.elapsed(),
                    status: ActorStatus::Aborted {
                        reason: if e.is_panic() {
                            "actor task panicked".to_string()
                        } else {
                            "actor task cancelled".to_string()
                        },
                    },
                };
                report::emit(out, &run);
                runs.push(run);
            }
        }

        let summary = FleetSummary {
            document,
            actor_count,
            runs,
            elapsed: start.elapsed(),
        };
        tracing::info!(
            outcome = %summary.outcome(),
            succeeded = summary.succeeded(),
            elapsed = ?summary.elapsed,
            "Fleet finished"
        );
        report::emit(out, &summary);

        Ok(summary)
    }
}
