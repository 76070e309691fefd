//! Database initialization command

use feedback_core::{error::Result, LibsqlStore};
use tracing::debug;

use super::helpers::CliContext;

/// Handle database initialization command
pub async fn handle(ctx: &CliContext, database: Option<String>) -> Result<()> {
    let db_path = database.unwrap_or_else(|| ctx.resolved_db_path());
    debug!("Initializing database at {}", db_path);

    // Creates the file and runs migrations
    let _store = LibsqlStore::from_path(&db_path, true).await?;

    println!("✓ Database initialized: {}", db_path);
    Ok(())
}
