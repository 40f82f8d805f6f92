//! Script generation handler.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use reel_engine::generate_script;
use reel_models::Scene;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

fn default_style() -> String {
    "cinematic".to_string()
}

#[derive(Debug, Deserialize, Validate)]
pub struct GenerateRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[serde(default = "default_style")]
    pub style: String,
}

#[derive(Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub scenes: Vec<Scene>,
}

/// POST /api/generate — run the script generator and persist the document.
pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> ApiResult<Json<GenerateResponse>> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let scenes = generate_script(
        &state.chat,
        &request.title,
        &request.style,
        &state.engine.script_path(),
    )
    .await?;

    Ok(Json(GenerateResponse {
        success: true,
        scenes,
    }))
}
