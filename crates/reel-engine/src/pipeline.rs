//! The end-to-end build pipeline.
//!
//! One worker task owns a job from `Queued` to a terminal state. Progress is
//! recorded at fixed checkpoints (10/30/90/100) so pollers see the same
//! coarse phases regardless of scene count.

use std::path::PathBuf;
use std::sync::Arc;

use metrics::counter;
use tokio::sync::watch;
use tracing::{error, info, warn};

use reel_media::{
    assemble_timeline, compose_scene, ingest_media, media_duration, write_ass_file, FfmpegRunner,
    SceneComposition,
};
use reel_models::{EncodingConfig, JobId, MediaAsset};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::llm::ChatClient;
use crate::music::resolve_music;
use crate::script::load_script;
use crate::selectors;
use crate::store::JobStore;
use crate::tts::SpeechSynthesizer;

/// Inputs for one build.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    pub job_id: JobId,
    /// Title the script was generated for, fed back to the style selectors
    pub title: String,
    /// Directory holding the user's uploaded media; copied into job-scoped
    /// staging before ingestion
    pub upload_dir: PathBuf,
    pub encoding: EncodingConfig,
}

/// Owns everything a build needs; cheap to clone into spawned workers.
#[derive(Clone)]
pub struct Pipeline {
    config: EngineConfig,
    store: Arc<dyn JobStore>,
    chat: ChatClient,
    tts: Arc<dyn SpeechSynthesizer>,
}

impl Pipeline {
    pub fn new(
        config: EngineConfig,
        store: Arc<dyn JobStore>,
        chat: ChatClient,
        tts: Arc<dyn SpeechSynthesizer>,
    ) -> Self {
        Self {
            config,
            store,
            chat,
            tts,
        }
    }

    /// Run one build to a terminal state. Never returns an error: failures
    /// are recorded on the job so pollers see them.
    pub async fn run_build(&self, request: BuildRequest, cancel_rx: watch::Receiver<bool>) {
        let job_id = request.job_id.clone();
        match self.build_inner(&request, cancel_rx).await {
            Ok(output) => {
                counter!("reel_jobs_completed_total").increment(1);
                info!("Job {} complete: {}", job_id, output.display());
                if let Err(e) = self.finish(&job_id, output).await {
                    error!("Failed to record completion for job {}: {}", job_id, e);
                }
            }
            Err(e) => {
                counter!("reel_jobs_failed_total").increment(1);
                error!("Job {} failed: {}", job_id, e);
                if let Err(store_err) = self.fail(&job_id, e.to_string()).await {
                    error!(
                        "Failed to record failure for job {}: {}",
                        job_id, store_err
                    );
                }
            }
        }
    }

    async fn build_inner(
        &self,
        request: &BuildRequest,
        cancel_rx: watch::Receiver<bool>,
    ) -> EngineResult<PathBuf> {
        let job_id = &request.job_id;

        self.checkpoint(job_id, 10, "Analyzing content...").await?;
        ensure_live(&cancel_rx)?;

        let scenes = load_script(&self.config.script_path()).await?;

        let voice = selectors::select_voice(&self.chat, &scenes).await?;
        let subtitle_style = selectors::select_subtitle_style(&self.chat, &request.title, &scenes)
            .await?
            .style();
        let mood = selectors::select_mood(&self.chat, &request.title, &scenes).await?;
        let music = resolve_music(&self.config.music_dir, mood);
        info!(
            "Job {}: voice {}, mood {}, music {}",
            job_id,
            voice,
            mood,
            music
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "none".to_string())
        );

        let workdir = self.config.job_dir(job_id.as_str());
        let staging = workdir.join("media");
        stage_media(&request.upload_dir, &staging).await?;

        let assets = ingest_media(&staging).await?;
        if assets.len() < scenes.len() {
            warn!(
                "Job {}: {} asset(s) for {} scene(s), reusing the last",
                job_id,
                assets.len(),
                scenes.len()
            );
        }

        self.checkpoint(job_id, 30, "Generating voiceovers...")
            .await?;

        let runner = FfmpegRunner::new().with_cancel(cancel_rx.clone());
        let mut composites = Vec::with_capacity(scenes.len());

        for (i, scene) in scenes.iter().enumerate() {
            ensure_live(&cancel_rx)?;

            let asset = asset_for_scene(&assets, i)?;
            let audio = workdir.join(format!("audio_{}.mp3", i));
            self.tts
                .synthesize(&scene.narration, voice, scene.emotion, &audio)
                .await?;
            let duration = media_duration(&audio).await?;

            let ass = workdir.join(format!("scene_{}.ass", i));
            write_ass_file(&ass, &subtitle_style, &scene.narration, duration).await?;

            let composite = workdir.join(format!("scene_{}.mp4", i));
            compose_scene(
                &runner,
                &request.encoding,
                &SceneComposition {
                    asset,
                    narration_audio: &audio,
                    duration,
                    subtitle_file: &ass,
                    output: &composite,
                },
            )
            .await?;
            composites.push(composite);
        }

        self.checkpoint(job_id, 90, "Finalizing video...").await?;
        ensure_live(&cancel_rx)?;

        let rendered = workdir.join("final_video.mp4");
        assemble_timeline(
            &runner,
            &request.encoding,
            &composites,
            music.as_deref(),
            &workdir,
            &rendered,
        )
        .await?;

        let output = self.config.output_path(job_id.as_str());
        if let Some(parent) = output.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        move_file(&rendered, &output).await?;

        Ok(output)
    }

    async fn checkpoint(&self, id: &JobId, progress: u8, message: &str) -> EngineResult<()> {
        if let Some(job) = self.store.get(id.clone()).await? {
            self.store
                .update(job.with_progress(progress, message))
                .await?;
        }
        Ok(())
    }

    async fn finish(&self, id: &JobId, output: PathBuf) -> EngineResult<()> {
        if let Some(job) = self.store.get(id.clone()).await? {
            self.store.update(job.complete(output)).await?;
        }
        Ok(())
    }

    async fn fail(&self, id: &JobId, message: String) -> EngineResult<()> {
        if let Some(job) = self.store.get(id.clone()).await? {
            self.store.update(job.fail(message)).await?;
        }
        Ok(())
    }
}

fn ensure_live(cancel_rx: &watch::Receiver<bool>) -> EngineResult<()> {
    if *cancel_rx.borrow() {
        return Err(EngineError::Cancelled);
    }
    Ok(())
}

/// Pair scene `index` with its asset; when there are fewer assets than
/// scenes the last asset covers the tail.
fn asset_for_scene(assets: &[MediaAsset], index: usize) -> EngineResult<&MediaAsset> {
    assets
        .get(index)
        .or_else(|| assets.last())
        .ok_or_else(|| EngineError::invalid_input("No media assets available"))
}

/// Copy the upload's files into job-scoped staging so concurrent builds
/// never read a shared folder.
async fn stage_media(from: &std::path::Path, to: &std::path::Path) -> EngineResult<()> {
    if !from.is_dir() {
        return Err(EngineError::invalid_input(format!(
            "Upload directory not found: {}",
            from.display()
        )));
    }
    tokio::fs::create_dir_all(to).await?;
    let mut entries = tokio::fs::read_dir(from).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.is_file() {
            if let Some(name) = path.file_name() {
                tokio::fs::copy(&path, to.join(name)).await?;
            }
        }
    }
    Ok(())
}

/// Rename, falling back to copy+remove across filesystems.
async fn move_file(from: &std::path::Path, to: &std::path::Path) -> EngineResult<()> {
    if tokio::fs::rename(from, to).await.is_ok() {
        return Ok(());
    }
    tokio::fs::copy(from, to).await?;
    tokio::fs::remove_file(from).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryJobStore;
    use crate::tts::SpeechSynthesizer;
    use async_trait::async_trait;
    use reel_models::{Emotion, Job, JobStatus, MediaKind, VoiceId};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

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

    fn asset(index: u32) -> MediaAsset {
        MediaAsset {
            path: PathBuf::from(format!("scene_{}.jpg", index)),
            kind: MediaKind::Image,
            scene_index: index,
        }
    }

    #[test]
    fn test_asset_for_scene_reuses_last() {
        let assets = vec![asset(0), asset(1)];
        assert_eq!(asset_for_scene(&assets, 0).unwrap().scene_index, 0);
        assert_eq!(asset_for_scene(&assets, 1).unwrap().scene_index, 1);
        // Scenes beyond the asset count fall back to the last asset
        assert_eq!(asset_for_scene(&assets, 2).unwrap().scene_index, 1);
        assert_eq!(asset_for_scene(&assets, 9).unwrap().scene_index, 1);
    }

    #[test]
    fn test_asset_for_scene_empty_errors() {
        let err = asset_for_scene(&[], 0).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }

    async fn pipeline_with_mock(server: &MockServer, data_dir: PathBuf) -> Pipeline {
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "calm"}}]
            })))
            .mount(server)
            .await;

        let config = EngineConfig {
            openai_api_key: "test-key".to_string(),
            openai_base_url: server.uri(),
            data_dir,
            ..EngineConfig::default()
        };
        let chat = ChatClient::new(&config).unwrap();
        Pipeline::new(config, MemoryJobStore::new(), chat, Arc::new(StubSynth))
    }

    #[tokio::test]
    async fn test_missing_script_fails_job() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let pipeline = pipeline_with_mock(&server, dir.path().to_path_buf()).await;

        let job = Job::new();
        let id = job.id.clone();
        pipeline.store.create(job).await.unwrap();

        let (_tx, rx) = watch::channel(false);
        pipeline
            .run_build(
                BuildRequest {
                    job_id: id.clone(),
                    title: "t".into(),
                    upload_dir: dir.path().to_path_buf(),
                    encoding: EncodingConfig::default(),
                },
                rx,
            )
            .await;

        let job = pipeline.store.get(id).await.unwrap().unwrap();
        assert_eq!(job.status, JobStatus::Error);
        assert!(job.status_message.starts_with("Error: "));
        assert!(job.error.is_some());
    }

    #[tokio::test]
    async fn test_cancelled_before_start_fails_job() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let pipeline = pipeline_with_mock(&server, dir.path().to_path_buf()).await;

        // A valid script so cancellation is what stops the build
        let script = dir.path().join("script.json");
        tokio::fs::write(
            &script,
            r#"{"scenes":[{"narration":"hi","image_prompt":"p","emotion":"neutral"}]}"#,
        )
        .await
        .unwrap();

        let job = Job::new();
        let id = job.id.clone();
        pipeline.store.create(job).await.unwrap();

        let (tx, rx) = watch::channel(false);
        tx.send(true).unwrap();
        pipeline
            .run_build(
                BuildRequest {
                    job_id: id.clone(),
                    title: "t".into(),
                    upload_dir: dir.path().to_path_buf(),
                    encoding: EncodingConfig::default(),
                },
                rx,
            )
            .await;

        let job = pipeline.store.get(id).await.unwrap().unwrap();
        assert_eq!(job.status, JobStatus::Error);
        assert_eq!(job.status_message, "Error: Build cancelled");
    }

    #[tokio::test]
    async fn test_checkpoints_clamp_and_progress() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let pipeline = pipeline_with_mock(&server, dir.path().to_path_buf()).await;

        let job = Job::new();
        let id = job.id.clone();
        pipeline.store.create(job).await.unwrap();

        pipeline
            .checkpoint(&id, 30, "Generating voiceovers...")
            .await
            .unwrap();
        let job = pipeline.store.get(id).await.unwrap().unwrap();
        assert_eq!(job.progress, 30);
        assert_eq!(job.status, JobStatus::Building);
        assert_eq!(job.status_message, "Generating voiceovers...");
    }
}
