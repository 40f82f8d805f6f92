//! Service banner and health check handlers.

use axum::Json;
use chrono::Utc;
use serde::Serialize;

/// Banner response for the root route.
#[derive(Serialize)]
pub struct BannerResponse {
    pub status: String,
    pub version: String,
}

/// Service banner at `/`.
pub async fn root() -> Json<BannerResponse> {
    Json(BannerResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Health response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

/// Health check endpoint (liveness probe).
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}
