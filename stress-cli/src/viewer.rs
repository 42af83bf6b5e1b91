//! Best-effort viewer launch for human observation of a run.
//!
//! The viewer is an already-running web app. We only ask the host to open
//! `<base>/index.html?file=<document>` in a browser tab. Nothing about the
//! run depends on it, so failures are logged and dropped.

use std::process::Stdio;
use thiserror::Error;
use tokio::task::JoinHandle;
use undo_stress_types::DocumentId;

use crate::config::ViewerConfig;

/// Errors from opening the viewer. Never fatal.
#[derive(Debug, Error)]
pub enum ViewerError {
    /// Opener configured as an empty list.
    #[error("viewer opener command is empty")]
    EmptyOpener,

    /// Opener could not be started (no display, no browser handler).
    #[error("failed to start {program}: {source}")]
    Spawn {
        /// Opener program.
        program: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Opener exited non-zero.
    #[error("{program} exited with {exit_code:?}")]
    Failed {
        /// Opener program.
        program: String,
        /// Exit code, if any.
        exit_code: Option<i32>,
    },
}

/// Viewer URL for a document. The id is embedded verbatim as `file`.
pub fn viewer_url(base_url: &str, document: DocumentId) -> String {
    format!(
        "{}/index.html?file={}",
        base_url.trim_end_matches('/'),
        document
    )
}

/// The host's default URL handler.
pub fn default_opener() -> Vec<String> {
    let parts: &[&str] = if cfg!(target_os = "macos") {
        &["open"]
    } else if cfg!(windows) {
        &["cmd", "/C", "start", ""]
    } else {
        &["xdg-open"]
    };
    parts.iter().map(|s| s.to_string()).collect()
}

/// Run `opener... url` and wait for the opener (not the browser) to exit.
pub async fn open(opener: &[String], url: &str) -> Result<(), ViewerError> {
    let (program, args) = opener.split_first().ok_or(ViewerError::EmptyOpener)?;

    let status = tokio::process::Command::new(program)
        .args(args)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map_err(|source| ViewerError::Spawn {
            program: program.clone(),
            source,
        })?;

    if !status.success() {
        return Err(ViewerError::Failed {
            program: program.clone(),
            exit_code: status.code(),
        });
    }
    Ok(())
}

/// Fire the viewer for `document` on a detached task.
///
/// The returned handle may be dropped; the caller never has to wait on it.
pub fn launch(config: &ViewerConfig, document: DocumentId) -> JoinHandle<()> {
    let url = viewer_url(&config.base_url, document);
    let opener = config.opener.clone().unwrap_or_else(default_opener);

    tokio::spawn(async move {
        match open(&opener, &url).await {
            Ok(()) => tracing::info!(%url, "Viewer opened"),
            Err(e) => tracing::warn!(%url, "Could not open viewer: {}", e),
        }
    })
}
