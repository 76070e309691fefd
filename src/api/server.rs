//! HTTP API server

use super::error::ApiError;
use crate::services::{FeedbackService, EXPORT_FILE_NAME};
use crate::types::{FeedbackSubmission, SentimentDistribution, StoredFeedback, TrendPoint};
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info};

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    /// Server address
    pub addr: SocketAddr,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            addr: ([127, 0, 0, 1], 3000).into(),
        }
    }
}

/// API server state
#[derive(Clone)]
struct AppState {
    service: Arc<FeedbackService>,
}

/// API server
pub struct ApiServer {
    config: ApiServerConfig,
    service: Arc<FeedbackService>,
}

impl ApiServer {
    /// Create new API server
    pub fn new(config: ApiServerConfig, service: Arc<FeedbackService>) -> Self {
        Self { config, service }
    }

    /// Configured listen address
    pub fn addr(&self) -> SocketAddr {
        self.config.addr
    }

    /// Build router
    pub fn router(service: Arc<FeedbackService>) -> Router {
        Router::new()
            .route(
                "/feedback",
                get(list_handler).post(submit_handler).delete(delete_all_handler),
            )
            .route("/feedback/search", get(search_handler))
            .route("/stats/distribution", get(distribution_handler))
            .route("/stats/trend", get(trend_handler))
            .route("/export.csv", get(export_handler))
            .route("/health", get(health_handler))
            .with_state(AppState { service })
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
    }

    /// Serve until Ctrl-C
    pub async fn serve(self) -> anyhow::Result<()> {
        let router = Self::router(self.service);
        let listener = tokio::net::TcpListener::bind(self.config.addr).await?;
        info!("API server listening on http://{}", self.config.addr);

        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                info!("Received shutdown signal, stopping API server");
            })
            .await?;

        Ok(())
    }
}

/// Submit handler
async fn submit_handler(
    State(state): State<AppState>,
    payload: Result<Json<FeedbackSubmission>, JsonRejection>,
) -> Result<(StatusCode, Json<StoredFeedback>), ApiError> {
    let Json(submission) = payload?;
    let stored = state.service.submit(submission).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// List handler
async fn list_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<StoredFeedback>>, ApiError> {
    Ok(Json(state.service.list().await?))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub deleted: usize,
}

/// Delete-all handler
async fn delete_all_handler(State(state): State<AppState>) -> Result<Json<DeleteResponse>, ApiError> {
    let deleted = state.service.delete_all().await?;
    Ok(Json(DeleteResponse { deleted }))
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

/// Keyword search handler
async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<StoredFeedback>>, ApiError> {
    debug!("Search request for '{}'", params.q);
    Ok(Json(state.service.search(&params.q).await?))
}

/// Sentiment distribution handler
async fn distribution_handler(
    State(state): State<AppState>,
) -> Result<Json<SentimentDistribution>, ApiError> {
    Ok(Json(state.service.distribution().await?))
}

/// Daily trend handler
async fn trend_handler(State(state): State<AppState>) -> Result<Json<Vec<TrendPoint>>, ApiError> {
    Ok(Json(state.service.trend().await?))
}

/// CSV export handler
async fn export_handler(State(state): State<AppState>) -> Result<Response, ApiError> {
    let export = state.service.export_csv().await?;
    if export.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
            ),
        ],
        export.content,
    )
        .into_response())
}

/// Health check handler
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub records: usize,
}

async fn health_handler(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        records: state.service.count().await?,
    }))
}
