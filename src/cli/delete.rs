//! Bulk delete command

use feedback_core::{error::Result, FeedbackError};

use super::helpers::CliContext;

/// Handle deletion of all feedback
pub async fn handle(ctx: &CliContext, confirmed: bool) -> Result<()> {
    if !confirmed {
        return Err(FeedbackError::ValidationError(
            "Refusing to delete all feedback without --yes".to_string(),
        ));
    }

    let service = ctx.open_service(false).await?;
    let deleted = service.delete_all().await?;
    println!("⚠ All feedback deleted ({} records).", deleted);
    Ok(())
}
