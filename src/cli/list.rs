//! List and search commands

use feedback_core::error::Result;
use tracing::debug;

use super::helpers::{is_json, print_feedback, CliContext};

/// Handle listing all feedback
pub async fn handle_list(ctx: &CliContext, format: &str) -> Result<()> {
    let service = ctx.open_service(false).await?;
    let entries = service.list().await?;
    debug!("Listing {} feedback entries", entries.len());

    if is_json(format) {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else if entries.is_empty() {
        println!("No feedback submitted yet.");
    } else {
        print_feedback(&entries);
    }
    Ok(())
}

/// Handle keyword search
pub async fn handle_search(ctx: &CliContext, keyword: &str, format: &str) -> Result<()> {
    let service = ctx.open_service(false).await?;
    let results = service.search(keyword).await?;

    if is_json(format) {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        println!("Showing results for '{}':", keyword);
        println!();
        print_feedback(&results);
    }
    Ok(())
}
