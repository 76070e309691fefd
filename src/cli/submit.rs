//! Feedback submission command

use feedback_core::{error::Result, FeedbackSubmission};

use super::helpers::CliContext;

/// Handle feedback submission
pub async fn handle(ctx: &CliContext, name: String, text: String) -> Result<()> {
    let service = ctx.open_service(true).await?;
    let stored = service.submit(FeedbackSubmission::new(name, text)).await?;

    println!("✓ Feedback submitted! Sentiment: {}", stored.record.sentiment);
    Ok(())
}
