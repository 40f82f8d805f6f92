//! Media upload handler.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::metrics::record_upload;
use crate::state::AppState;

#[derive(Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub upload_id: String,
    pub files_count: usize,
}

/// Reject names that could escape the upload directory.
fn validate_filename(name: &str) -> ApiResult<()> {
    if name.is_empty() || name.contains("..") || name.contains('/') || name.contains('\\') {
        return Err(ApiError::bad_request(format!("Invalid file name: {name}")));
    }
    Ok(())
}

/// POST /api/upload — store a batch of media files under a fresh upload id.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    let upload_id = Uuid::new_v4().to_string();
    let dir = state.engine.upload_dir(&upload_id);
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create upload dir: {e}")))?;

    let mut files_count = 0usize;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed multipart body: {e}")))?
    {
        let Some(name) = field.file_name().map(|s| s.to_string()) else {
            continue;
        };
        validate_filename(&name)?;

        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read {name}: {e}")))?;
        tokio::fs::write(dir.join(&name), &bytes)
            .await
            .map_err(|e| ApiError::internal(format!("Failed to store {name}: {e}")))?;
        files_count += 1;
    }

    if files_count == 0 {
        // Don't leave an empty folder behind
        let _ = tokio::fs::remove_dir_all(&dir).await;
        return Err(ApiError::bad_request("No files in upload"));
    }

    record_upload(files_count);
    info!("Upload {}: {} file(s) stored", upload_id, files_count);

    Ok(Json(UploadResponse {
        success: true,
        upload_id,
        files_count,
    }))
}
