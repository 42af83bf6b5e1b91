//! Human-readable run output and the optional JSON summary file.

use std::fmt::Display;
use std::io::Write;
use std::path::Path;

use undo_stress_types::FleetSummary;

use crate::error::Result;

/// Write one report line and flush, so lines appear as actors finish.
///
/// Output errors are logged, never returned: losing a line must not
/// abandon the barrier.
pub fn emit<W: Write + ?Sized>(out: &mut W, line: &impl Display) {
    if let Err(e) = writeln!(out, "{line}").and_then(|()| out.flush()) {
        tracing::warn!("Failed to write report line: {}", e);
    }
}

/// Write `summary` as pretty-printed JSON.
pub async fn write_json(path: &Path, summary: &FleetSummary) -> Result<()> {
    let contents = serde_json::to_string_pretty(summary)?;
    tokio::fs::write(path, contents).await?;
    tracing::info!(path = %path.display(), "Summary written");
    Ok(())
}
