//! Build the actor executable before a run.
//!
//! Uses `tokio::process::Command` with an explicit working directory, so
//! the launcher's own current directory never changes.

use thiserror::Error;

use crate::config::BuildConfig;

/// Errors from the build step.
#[derive(Debug, Error)]
pub enum BuildError {
    /// No program configured.
    #[error("build command is empty")]
    EmptyCommand,

    /// Build process could not be started.
    #[error("failed to start {program}: {source}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Build process exited non-zero.
    #[error("{program} exited with {}", describe_exit(.exit_code))]
    Failed {
        /// Program that failed.
        program: String,
        /// Exit code, if the process exited normally.
        exit_code: Option<i32>,
    },
}

pub(crate) fn describe_exit(exit_code: &Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("code {code}"),
        None => "a signal".to_string(),
    }
}

/// Run the configured build command and wait for it.
///
/// Build output goes straight to the terminal.
pub async fn run_build(config: &BuildConfig) -> Result<(), BuildError> {
    let (program, args) = config
        .command
        .split_first()
        .ok_or(BuildError::EmptyCommand)?;

    tracing::info!(
        command = %config.command.join(" "),
        dir = %config.working_dir.display(),
        "Building actor executable"
    );

    let status = tokio::process::Command::new(program)
        .args(args)
        .current_dir(&config.working_dir)
        .status()
        .await
        .map_err(|source| BuildError::Spawn {
            program: program.clone(),
            source,
        })?;

    if !status.success() {
        return Err(BuildError::Failed {
            program: program.clone(),
            exit_code: status.code(),
        });
    }

    tracing::info!("Build finished");
    Ok(())
}
