//! HTTP API server command

use feedback_core::{
    api::{ApiServer, ApiServerConfig},
    error::Result,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::debug;

use super::helpers::CliContext;

/// Handle API server startup
pub async fn handle(ctx: &CliContext, addr: Option<String>) -> Result<()> {
    let addr = addr.unwrap_or_else(|| ctx.config.server.addr.clone());
    let socket_addr: SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address '{}': {}", addr, e))?;

    debug!("Starting HTTP API server...");
    let service = Arc::new(ctx.open_service(true).await?);

    println!();
    println!("Feedback Sentiment API");
    println!();
    println!("   Address:  http://{}", socket_addr);
    println!("   Database: {}", ctx.resolved_db_path());
    println!();
    println!("   Endpoints:");
    println!("   • POST   /feedback            - Submit feedback");
    println!("   • GET    /feedback            - List feedback");
    println!("   • DELETE /feedback            - Delete all feedback");
    println!("   • GET    /feedback/search?q=  - Keyword search");
    println!("   • GET    /stats/distribution  - Sentiment distribution");
    println!("   • GET    /stats/trend         - Daily trend");
    println!("   • GET    /export.csv          - CSV export");
    println!("   • GET    /health              - Health check");
    println!();

    ApiServer::new(ApiServerConfig { addr: socket_addr }, service)
        .serve()
        .await?;
    Ok(())
}
