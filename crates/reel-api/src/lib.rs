//! Axum HTTP API server.
//!
//! This crate provides:
//! - The job-queue REST surface (generate, upload, build, status, download)
//! - Per-job worker spawning with best-effort cancellation
//! - Prometheus metrics

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
