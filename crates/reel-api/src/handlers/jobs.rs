//! Build job handlers: enqueue, poll, download, cancel.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::Response;
use axum::Json;
use serde::{Deserialize, Serialize};
use tokio_util::io::ReaderStream;
use tracing::{info, warn};
use validator::Validate;

use reel_engine::BuildRequest;
use reel_models::{EncodingConfig, Job, JobId, JobStatus};

use crate::error::{ApiError, ApiResult};
use crate::metrics::{record_job_cancelled, record_job_enqueued};
use crate::state::AppState;

fn default_style() -> String {
    "cinematic".to_string()
}

#[derive(Debug, Deserialize, Validate)]
pub struct BuildRequestBody {
    #[validate(length(min = 1, message = "upload_id is required"))]
    pub upload_id: String,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    /// Style the script was generated with; recorded for bookkeeping
    #[serde(default = "default_style")]
    pub style: String,
    #[serde(default)]
    pub encoding: EncodingConfig,
}

#[derive(Serialize)]
pub struct BuildResponse {
    pub success: bool,
    pub job_id: JobId,
}

/// POST /api/build — queue one build for an existing upload.
pub async fn build(
    State(state): State<AppState>,
    Json(request): Json<BuildRequestBody>,
) -> ApiResult<Json<BuildResponse>> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let upload_dir = state.engine.upload_dir(&request.upload_id);
    if !upload_dir.is_dir() {
        return Err(ApiError::not_found(format!(
            "Unknown upload: {}",
            request.upload_id
        )));
    }

    let job = Job::new();
    let job_id = job.id.clone();
    state.store.create(job).await?;

    let cancel_rx = state.register_cancel(job_id.clone()).await;
    let build_request = BuildRequest {
        job_id: job_id.clone(),
        title: request.title,
        upload_dir,
        encoding: request.encoding,
    };

    let worker_state = state.clone();
    let worker_id = job_id.clone();
    tokio::spawn(async move {
        worker_state
            .pipeline
            .run_build(build_request, cancel_rx)
            .await;
        worker_state.clear_cancel(&worker_id).await;
    });

    record_job_enqueued();
    info!("Job {} queued (style {})", job_id, request.style);

    Ok(Json(BuildResponse {
        success: true,
        job_id,
    }))
}

/// GET /api/status/:job_id — poll a job's state.
pub async fn status(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> ApiResult<Json<Job>> {
    let job = state
        .store
        .get(JobId::from_string(job_id.clone()))
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Unknown job: {job_id}")))?;
    Ok(Json(job))
}

/// GET /api/video/:job_id — stream the rendered MP4.
pub async fn video(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> ApiResult<Response> {
    let job = state
        .store
        .get(JobId::from_string(job_id.clone()))
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Unknown job: {job_id}")))?;

    if job.status != JobStatus::Done {
        return Err(ApiError::not_ready(format!(
            "Job is {} ({}%)",
            job.status, job.progress
        )));
    }

    let path = job
        .output_path
        .ok_or_else(|| ApiError::internal("Done job has no output path"))?;

    let file = tokio::fs::File::open(&path)
        .await
        .map_err(|_| ApiError::not_found(format!("Video file missing: {}", path.display())))?;
    let len = file
        .metadata()
        .await
        .map_err(|e| ApiError::internal(format!("Failed to stat video: {e}")))?
        .len();

    let body = Body::from_stream(ReaderStream::new(file));
    Response::builder()
        .header(header::CONTENT_TYPE, "video/mp4")
        .header(header::CONTENT_LENGTH, len)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"reel_{job_id}.mp4\""),
        )
        .body(body)
        .map_err(|e| ApiError::internal(format!("Failed to build response: {e}")))
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// DELETE /api/job/:job_id — cancel and remove a job and its artifacts.
pub async fn delete_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let id = JobId::from_string(job_id.clone());
    if !state.store.delete(id.clone()).await? {
        return Err(ApiError::not_found(format!("Unknown job: {job_id}")));
    }

    if state.cancel(&id).await {
        record_job_cancelled();
        info!("Job {} cancelled", job_id);
    }

    // Remove artifacts; the worker may still be winding down, so failures
    // here are logged and ignored
    let workdir = state.engine.job_dir(&job_id);
    if workdir.exists() {
        if let Err(e) = tokio::fs::remove_dir_all(&workdir).await {
            warn!("Failed to remove {}: {}", workdir.display(), e);
        }
    }
    let output = state.engine.output_path(&job_id);
    if output.exists() {
        if let Err(e) = tokio::fs::remove_file(&output).await {
            warn!("Failed to remove {}: {}", output.display(), e);
        }
    }

    Ok(Json(DeleteResponse { success: true }))
}
