//! End-to-end build test.
//!
//! Requires `ffmpeg`/`ffprobe` on PATH, so it is ignored by default:
//!
//! ```text
//! cargo test -p reel-engine --test e2e -- --ignored
//! ```

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;

use reel_engine::{
    BuildRequest, ChatClient, EngineConfig, EngineResult, JobStore, MemoryJobStore, Pipeline,
    SpeechSynthesizer,
};
use reel_media::media_duration;
use reel_models::{Emotion, EncodingConfig, Job, JobStatus, VoiceId};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SCRIPT_JSON: &str = r#"{"scenes":[
    {"narration":"The last light fades","image_prompt":"dusk city","emotion":"mysterious"},
    {"narration":"One window still glows","image_prompt":"lit window","emotion":"dramatic"},
    {"narration":"Dawn always returns","image_prompt":"sunrise","emotion":"cheerful"}
]}"#;

/// Synthesizes 2.0s of silence with ffmpeg instead of calling a TTS service.
struct SilentTts;

#[async_trait]
impl SpeechSynthesizer for SilentTts {
    async fn synthesize(
        &self,
        _text: &str,
        _voice: VoiceId,
        _emotion: Emotion,
        output: &Path,
    ) -> EngineResult<()> {
        let status = tokio::process::Command::new("ffmpeg")
            .args([
                "-y",
                "-f",
                "lavfi",
                "-i",
                "anullsrc=r=44100:cl=mono",
                "-t",
                "2.0",
            ])
            .arg(output)
            .status()
            .await?;
        assert!(status.success(), "silence synthesis failed");
        Ok(())
    }
}

async fn make_test_image(path: &Path) {
    let status = tokio::process::Command::new("ffmpeg")
        .args([
            "-y",
            "-f",
            "lavfi",
            "-i",
            "color=c=gray:s=540x960:d=1",
            "-frames:v",
            "1",
        ])
        .arg(path)
        .status()
        .await
        .unwrap();
    assert!(status.success(), "test image generation failed");
}

#[tokio::test]
#[ignore]
async fn test_three_scene_build_renders_six_seconds() {
    let server = MockServer::start().await;
    // Every selector call gets a valid one-word answer
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "calm"}}]
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("data");
    let upload_dir = dir.path().join("upload");
    tokio::fs::create_dir_all(&data_dir).await.unwrap();
    tokio::fs::create_dir_all(&upload_dir).await.unwrap();

    tokio::fs::write(data_dir.join("script.json"), SCRIPT_JSON)
        .await
        .unwrap();
    for i in 0..3 {
        make_test_image(&upload_dir.join(format!("scene_{}.jpg", i))).await;
    }

    let config = EngineConfig {
        openai_api_key: "test-key".to_string(),
        openai_base_url: server.uri(),
        data_dir: data_dir.clone(),
        // Empty on purpose: the build proceeds without music
        music_dir: dir.path().join("no-music"),
        ..EngineConfig::default()
    };
    let chat = ChatClient::new(&config).unwrap();
    let store = MemoryJobStore::new();
    let job_store: Arc<dyn JobStore> = Arc::clone(&store) as Arc<dyn JobStore>;
    let pipeline = Pipeline::new(config, job_store, chat, Arc::new(SilentTts));

    let job = Job::new();
    let job_id = job.id.clone();
    store.create(job).await.unwrap();

    let (_cancel_tx, cancel_rx) = watch::channel(false);
    pipeline
        .run_build(
            BuildRequest {
                job_id: job_id.clone(),
                title: "The Last Light".to_string(),
                upload_dir,
                encoding: EncodingConfig::default(),
            },
            cancel_rx,
        )
        .await;

    let job = store.get(job_id.clone()).await.unwrap().unwrap();
    assert_eq!(job.status, JobStatus::Done, "job error: {:?}", job.error);
    assert_eq!(job.progress, 100);
    assert_eq!(job.status_message, "Complete!");

    let output = job.output_path.expect("done job has an output path");
    assert!(output.is_file());

    // Three 2.0s scenes concatenate to 6.0s, give or take encoder rounding
    let duration = media_duration(&output).await.unwrap();
    assert!(
        (duration - 6.0).abs() < 0.5,
        "expected ~6.0s, got {duration:.2}s"
    );

    // One subtitle file per scene, each spanning its narration
    let workdir = data_dir.join("jobs").join(job_id.as_str());
    for i in 0..3 {
        let ass = tokio::fs::read_to_string(workdir.join(format!("scene_{}.ass", i)))
            .await
            .unwrap();
        assert!(ass.contains("Dialogue: 0,0:00:00.00,0:00:02"));
    }
}
