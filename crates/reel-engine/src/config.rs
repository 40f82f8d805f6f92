//! Engine configuration.

use std::path::PathBuf;

/// Build pipeline configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// API key for the chat-completions endpoint
    pub openai_api_key: String,
    /// Base URL of the OpenAI-compatible API (overridable for tests)
    pub openai_base_url: String,
    /// Model used for scripting and the style selectors
    pub openai_model: String,
    /// Root for uploads, job staging and outputs
    pub data_dir: PathBuf,
    /// Folder holding `music_{mood}.mp3` files
    pub music_dir: PathBuf,
    /// Name or path of the edge-tts binary
    pub edge_tts_bin: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            openai_api_key: String::new(),
            openai_base_url: "https://api.openai.com".to_string(),
            openai_model: "gpt-4o-mini".to_string(),
            data_dir: PathBuf::from("data"),
            music_dir: PathBuf::from("music"),
            edge_tts_bin: "edge-tts".to_string(),
        }
    }
}

impl EngineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            openai_api_key: std::env::var("OPENAI_API_KEY").unwrap_or_default(),
            openai_base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or(defaults.openai_base_url),
            openai_model: std::env::var("OPENAI_MODEL").unwrap_or(defaults.openai_model),
            data_dir: std::env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            music_dir: std::env::var("MUSIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.music_dir),
            edge_tts_bin: std::env::var("EDGE_TTS_BIN").unwrap_or(defaults.edge_tts_bin),
        }
    }

    /// Directory holding one upload batch.
    pub fn upload_dir(&self, upload_id: &str) -> PathBuf {
        self.data_dir.join("uploads").join(upload_id)
    }

    /// Job-scoped root; staging, scratch and output live under it so
    /// concurrent builds never share a folder.
    pub fn job_dir(&self, job_id: &str) -> PathBuf {
        self.data_dir.join("jobs").join(job_id)
    }

    /// Durable script document written by the generate step.
    pub fn script_path(&self) -> PathBuf {
        self.data_dir.join("script.json")
    }

    /// Final rendered video for a job.
    pub fn output_path(&self, job_id: &str) -> PathBuf {
        self.data_dir
            .join("outputs")
            .join(format!("{}.mp4", job_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_scoped_dirs_are_distinct() {
        let config = EngineConfig::default();
        let a = config.job_dir("job-a");
        let b = config.job_dir("job-b");
        assert_ne!(a, b);
        assert!(a.starts_with(&config.data_dir));
    }
}
