//! Actor launcher backed by a real child process.

use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::{Duration, Instant};
use undo_stress_types::{ActorRun, ActorTask};

use super::{ActorError, ActorLauncher};
use crate::config::ActorConfig;

/// Spawns `<binary> [args...] <index> <document>` for each task.
///
/// The actor's stdout is discarded; stderr is inherited so engine
/// diagnostics reach the terminal.
#[derive(Debug, Clone)]
pub struct ProcessLauncher {
    binary: PathBuf,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl ProcessLauncher {
    /// Create a launcher for the given executable, with no timeout.
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            args: Vec::new(),
            timeout: None,
        }
    }

    /// Create a launcher from the `[actor]` config section.
    pub fn from_config(config: &ActorConfig) -> Self {
        Self::new(config.binary.clone())
            .with_args(config.args.clone())
            .with_timeout(config.timeout())
    }

    /// Pass `args` ahead of the index and document.
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    /// Kill actors that run longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Path to the actor executable.
    pub fn binary(&self) -> &std::path::Path {
        &self.binary
    }
}

#[async_trait]
impl ActorLauncher for ProcessLauncher {
    async fn launch(&self, task: ActorTask) -> Result<ActorRun, ActorError> {
        let index = task.index;
        let start = Instant::now();

        let mut child = tokio::process::Command::new(&self.binary)
            .args(&self.args)
            .args(task.args())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ActorError::Spawn { index, source })?;

        tracing::debug!(index, pid = ?child.id(), "Actor started");

        let waited = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, child.wait()).await {
                Ok(waited) => waited,
                Err(_) => {
                    if let Err(e) = child.kill().await {
                        tracing::warn!(index, "Failed to kill hung actor: {}", e);
                    }
                    return Err(ActorError::Timeout {
                        index,
                        after: start.elapsed(),
                    });
                }
            },
            None => child.wait().await,
        };
        let status = waited.map_err(|source| ActorError::Wait { index, source })?;
        let elapsed = start.elapsed();

        if !status.success() {
            return Err(ActorError::ProcessFailure {
                index,
                exit_code: status.code(),
                elapsed,
            });
        }

        tracing::debug!(index, ?elapsed, "Actor finished");
        Ok(ActorRun::succeeded(index, elapsed))
    }
}
