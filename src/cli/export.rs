//! CSV export command

use feedback_core::{error::Result, services::EXPORT_FILE_NAME};
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

use super::helpers::CliContext;

/// Handle CSV export
///
/// Writes to stdout when `output` is "-", otherwise to the given file
/// (default `feedback.csv`).
pub async fn handle(ctx: &CliContext, output: Option<String>) -> Result<()> {
    let service = ctx.open_service(false).await?;
    let export = service.export_csv().await?;

    if export.is_empty() {
        eprintln!("No feedback to export.");
        return Ok(());
    }

    match output.as_deref() {
        Some("-") => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(export.content.as_bytes())?;
        }
        other => {
            let path = PathBuf::from(other.unwrap_or(EXPORT_FILE_NAME));
            debug!("Writing CSV export to {}", path.display());
            std::fs::write(&path, export.content.as_bytes())?;
            eprintln!("✓ Exported {} records to {}", export.rows, path.display());
        }
    }
    Ok(())
}
