//! Narration synthesis via the `edge-tts` CLI.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use reel_models::{Emotion, VoiceId};

use crate::error::{EngineError, EngineResult};

/// Per-scene speech synthesis.
///
/// A trait seam so the pipeline can be driven by a stub in tests without a
/// network-backed TTS binary installed.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` to an mp3 at `output`, applying the voice's prosody
    /// adjusted for the scene emotion.
    async fn synthesize(
        &self,
        text: &str,
        voice: VoiceId,
        emotion: Emotion,
        output: &Path,
    ) -> EngineResult<()>;
}

/// Shells out to `edge-tts`.
#[derive(Debug, Clone)]
pub struct EdgeTts {
    bin: String,
}

impl EdgeTts {
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }

    /// Verify the binary is on PATH.
    pub fn check(&self) -> EngineResult<()> {
        which::which(&self.bin).map_err(|_| {
            EngineError::config(format!("edge-tts binary '{}' not found on PATH", self.bin))
        })?;
        Ok(())
    }
}

#[async_trait]
impl SpeechSynthesizer for EdgeTts {
    async fn synthesize(
        &self,
        text: &str,
        voice: VoiceId,
        emotion: Emotion,
        output: &Path,
    ) -> EngineResult<()> {
        if text.trim().is_empty() {
            return Err(EngineError::synthesis("Narration text is empty"));
        }

        let profile = voice.profile();
        let (rate, pitch) = profile.prosody_for(emotion);

        debug!(
            "Synthesizing {} chars with {} (rate {:+}%, pitch {:+}Hz)",
            text.len(),
            profile.voice,
            rate,
            pitch
        );

        let status = Command::new(&self.bin)
            .arg("--voice")
            .arg(profile.voice)
            .arg("--rate")
            .arg(format!("{:+}%", rate))
            .arg("--pitch")
            .arg(format!("{:+}Hz", pitch))
            .arg("--text")
            .arg(text)
            .arg("--write-media")
            .arg(output)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| EngineError::synthesis(format!("Failed to run {}: {}", self.bin, e)))?;

        if !status.success() {
            return Err(EngineError::synthesis(format!(
                "{} exited with {}",
                self.bin, status
            )));
        }

        // edge-tts can exit zero without writing anything when the service
        // rejects the request.
        let meta = tokio::fs::metadata(output)
            .await
            .map_err(|_| EngineError::synthesis("No audio file was produced"))?;
        if meta.len() == 0 {
            return Err(EngineError::synthesis("Produced audio file is empty"));
        }

        Ok(())
    }
}
