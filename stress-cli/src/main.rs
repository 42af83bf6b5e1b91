//! # undo-stress
//!
//! Launch N concurrent undo/redo actors against one shared document.
//!
//! ## Example
//!
//! ```bash
//! # Build the actor, open the viewer, run 8 actors
//! undo-stress --num 8
//!
//! # Reuse a prebuilt actor, no browser, kill actors after 60s
//! undo-stress -n 4 --no-build --no-viewer --timeout 60
//!
//! # Settings from a file, summary as JSON
//! undo-stress -c stress.toml -n 16 --report summary.json
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use undo_stress::build_step;
use undo_stress::config::{validate_actor_count, Config};
use undo_stress::report;
use undo_stress::{Fleet, FleetConfig, ProcessLauncher};
use undo_stress_types::{DocumentId, RunOutcome};

/// Stress-test a collaborative undo/redo engine with concurrent actors.
#[derive(Parser, Debug)]
#[command(name = "undo-stress")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Number of actors to run concurrently
    #[arg(long, short = 'n', default_value_t = 1, allow_negative_numbers = true)]
    num: i64,

    /// TOML configuration file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Actor executable (overrides [actor].binary)
    #[arg(long)]
    binary: Option<PathBuf>,

    /// Directory the build command runs in (overrides [build].working_dir)
    #[arg(long)]
    build_dir: Option<PathBuf>,

    /// Skip building the actor executable
    #[arg(long)]
    no_build: bool,

    /// Do not open the viewer
    #[arg(long)]
    no_viewer: bool,

    /// Viewer base URL (overrides [viewer].base_url)
    #[arg(long)]
    viewer_url: Option<String>,

    /// Kill actors running longer than this many seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Use this document instead of provisioning a new one
    #[arg(long)]
    document: Option<DocumentId>,

    /// Write the run summary as JSON to this path
    #[arg(long)]
    report: Option<PathBuf>,
}

impl Cli {
    /// Load the config file (if any) and apply command-line overrides.
    fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        if let Some(binary) = &self.binary {
            config.actor.binary = binary.clone();
        }
        if let Some(dir) = &self.build_dir {
            config.build.working_dir = dir.clone();
        }
        if let Some(url) = &self.viewer_url {
            config.viewer.base_url = url.clone();
        }
        if self.timeout.is_some() {
            config.actor.timeout_secs = self.timeout;
        }
        if self.no_build {
            config.build.enabled = false;
        }
        if self.no_viewer {
            config.viewer.enabled = false;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Reject a bad count before building anything.
    validate_actor_count(cli.num)?;
    let config = cli.load_config()?;

    if config.build.enabled {
        build_step::run_build(&config.build)
            .await
            .context("Failed to build actor executable")?;
    }

    let launcher = Arc::new(ProcessLauncher::from_config(&config.actor));
    let fleet = Fleet::new(
        FleetConfig {
            viewer: config.viewer,
            document: cli.document,
        },
        launcher,
    );

    let mut stdout = std::io::stdout().lock();
    let summary = fleet.run(cli.num, &mut stdout).await?;

    if let Some(path) = &cli.report {
        report::write_json(path, &summary)
            .await
            .context("Failed to write summary report")?;
    }

    if summary.outcome() == RunOutcome::Failed {
        let failed = summary.runs.len() - summary.succeeded();
        anyhow::bail!("{} of {} actors failed", failed, summary.actor_count);
    }

    Ok(())
}
