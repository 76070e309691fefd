//! Sentiment distribution and trend commands

use feedback_core::error::Result;

use super::helpers::{bar, is_json, CliContext};

const BAR_WIDTH: usize = 30;

/// Handle sentiment distribution report
pub async fn handle_distribution(ctx: &CliContext, format: &str) -> Result<()> {
    let service = ctx.open_service(false).await?;
    let distribution = service.distribution().await?;

    if is_json(format) {
        println!("{}", serde_json::to_string_pretty(&distribution)?);
        return Ok(());
    }

    if distribution.is_empty() {
        println!("No feedback data available for sentiment distribution.");
        return Ok(());
    }

    println!("Sentiment Distribution ({} total)", distribution.total);
    for slice in &distribution.slices {
        println!(
            "  {:<9} {:>5}  {:>5.1}%  {}",
            slice.sentiment.as_str(),
            slice.count,
            slice.percentage,
            bar(slice.count, distribution.total, BAR_WIDTH)
        );
    }
    Ok(())
}

/// Handle daily trend report
pub async fn handle_trend(ctx: &CliContext, format: &str) -> Result<()> {
    let service = ctx.open_service(false).await?;
    let trend = service.trend().await?;

    if is_json(format) {
        println!("{}", serde_json::to_string_pretty(&trend)?);
        return Ok(());
    }

    if trend.is_empty() {
        println!("No feedback data available for trend analysis.");
        return Ok(());
    }

    let max = trend.iter().map(|p| p.count).max().unwrap_or(0);
    println!("Feedback Trend Over Time");
    for point in &trend {
        println!("  {}  {:>5}  {}", point.date, point.count, bar(point.count, max, BAR_WIDTH));
    }
    Ok(())
}
