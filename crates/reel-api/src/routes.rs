//! API routes.

use axum::middleware;
use axum::routing::{delete, get, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::limit::RequestBodyLimitLayer;

use crate::handlers::{build, delete_job, generate, health, root, status, upload, video};
use crate::metrics::metrics_middleware;
use crate::middleware::{cors_layer, request_logging};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let api_routes = Router::new()
        .route("/generate", post(generate))
        .route("/upload", post(upload))
        .route("/build", post(build))
        .route("/status/:job_id", get(status))
        .route("/video/:job_id", get(video))
        .route("/job/:job_id", delete(delete_job));

    let health_routes = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/healthz", get(health));

    // Metrics endpoint (if enabled)
    let metrics_routes = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use reel_engine::{EngineConfig, EngineResult, SpeechSynthesizer};
    use reel_models::{Emotion, VoiceId};
    use std::sync::Arc;
    use tower::util::ServiceExt;

    struct StubSynth;

    #[async_trait]
    impl SpeechSynthesizer for StubSynth {
        async fn synthesize(
            &self,
            _text: &str,
            _voice: VoiceId,
            _emotion: Emotion,
            output: &std::path::Path,
        ) -> EngineResult<()> {
            tokio::fs::write(output, b"mp3").await?;
            Ok(())
        }
    }

    fn test_router(data_dir: std::path::PathBuf) -> Router {
        let engine = EngineConfig {
            openai_api_key: "test-key".to_string(),
            data_dir,
            ..EngineConfig::default()
        };
        let state =
            AppState::with_synthesizer(ApiConfig::default(), engine, Arc::new(StubSynth)).unwrap();
        create_router(state, None)
    }

    fn json_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_root_banner() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_router(dir.path().to_path_buf());
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_router(dir.path().to_path_buf());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_generate_empty_title_is_400() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_router(dir.path().to_path_buf());
        let response = app
            .oneshot(json_post("/api/generate", r#"{"title": ""}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_build_unknown_upload_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_router(dir.path().to_path_buf());
        let response = app
            .oneshot(json_post(
                "/api/build",
                r#"{"upload_id": "nope", "title": "The Last Light"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_status_unknown_job_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_router(dir.path().to_path_buf());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/status/not-a-job")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_video_unknown_job_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_router(dir.path().to_path_buf());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/video/not-a-job")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_unknown_job_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_router(dir.path().to_path_buf());
        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/job/not-a-job")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
