//! Mock launcher for testing.
//!
//! Records every task it receives and lets tests script per-index failures.

use super::{ActorError, ActorLauncher};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use undo_stress_types::{ActorRun, ActorTask};

/// Mock launcher for testing.
#[derive(Debug, Default, Clone)]
pub struct MockLauncher {
    inner: Arc<Mutex<MockLauncherInner>>,
}

#[derive(Debug, Default)]
struct MockLauncherInner {
    launched: Vec<ActorTask>,
    exit_codes: HashMap<u32, i32>,
    delays: HashMap<u32, Duration>,
    default_delay: Duration,
}

impl MockLauncher {
    /// Create a mock where every actor succeeds immediately.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the actor at `index` exit with `exit_code`.
    pub fn fail_actor(&self, index: u32, exit_code: i32) {
        let mut inner = self.inner.lock().unwrap();
        inner.exit_codes.insert(index, exit_code);
    }

    /// Make every actor take `delay` before finishing.
    pub fn set_delay(&self, delay: Duration) {
        let mut inner = self.inner.lock().unwrap();
        inner.default_delay = delay;
    }

    /// Make the actor at `index` take `delay` before finishing.
    pub fn set_actor_delay(&self, index: u32, delay: Duration) {
        let mut inner = self.inner.lock().unwrap();
        inner.delays.insert(index, delay);
    }

    /// Every task launched so far, in launch order.
    pub fn launched(&self) -> Vec<ActorTask> {
        let inner = self.inner.lock().unwrap();
        inner.launched.clone()
    }

    /// Number of tasks launched so far.
    pub fn launch_count(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.launched.len()
    }
}

#[async_trait]
impl ActorLauncher for MockLauncher {
    async fn launch(&self, task: ActorTask) -> Result<ActorRun, ActorError> {
        let start = Instant::now();
        let (delay, exit_code) = {
            let mut inner = self.inner.lock().unwrap();
            inner.launched.push(task);
            let delay = inner
                .delays
                .get(&task.index)
                .copied()
                .unwrap_or(inner.default_delay);
            (delay, inner.exit_codes.get(&task.index).copied())
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match exit_code {
            Some(code) => Err(ActorError::ProcessFailure {
                index: task.index,
                exit_code: Some(code),
                elapsed: start.elapsed(),
            }),
            None => Ok(ActorRun::succeeded(task.index, start.elapsed())),
        }
    }
}
