//! HTTP API over the feedback service
//!
//! Provides:
//! - Submission and listing of feedback
//! - Keyword search
//! - Chart data (sentiment distribution, daily trend)
//! - CSV export and bulk delete

pub mod error;
pub mod server;

pub use error::ApiError;
pub use server::{ApiServer, ApiServerConfig};
