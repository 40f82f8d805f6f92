//! Build jobs and their lifecycle state.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use uuid::Uuid;

/// Unique identifier for a build job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    /// Generate a new random job ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Coarse build status, polled by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Job is waiting for its worker to start
    #[default]
    Queued,
    /// Pipeline is running
    Building,
    /// Output video is ready
    Done,
    /// Build failed; see the error message
    Error,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Building => "building",
            JobStatus::Done => "done",
            JobStatus::Error => "error",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Done | JobStatus::Error)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One end-to-end build request and its lifecycle state.
///
/// A job is created at build request time and mutated only by the single
/// worker that owns it; every other reader only polls.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Job {
    /// Unique job ID
    pub id: JobId,

    /// Current status
    #[serde(default)]
    pub status: JobStatus,

    /// Progress percentage (0-100), fixed checkpoint values
    #[serde(default)]
    pub progress: u8,

    /// Human-readable status line
    pub status_message: String,

    /// Error message (if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Path of the rendered video (once done)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// Create a freshly queued job.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: JobId::new(),
            status: JobStatus::Queued,
            progress: 0,
            status_message: "Job queued".to_string(),
            error: None,
            output_path: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record a progress checkpoint.
    pub fn with_progress(mut self, progress: u8, message: impl Into<String>) -> Self {
        self.status = JobStatus::Building;
        self.progress = progress.min(100);
        self.status_message = message.into();
        self.updated_at = Utc::now();
        self
    }

    /// Mark the job done with its output artifact.
    pub fn complete(mut self, output_path: PathBuf) -> Self {
        self.status = JobStatus::Done;
        self.progress = 100;
        self.status_message = "Complete!".to_string();
        self.output_path = Some(output_path);
        self.updated_at = Utc::now();
        self
    }

    /// Mark the job failed.
    pub fn fail(mut self, error: impl Into<String>) -> Self {
        let error = error.into();
        self.status = JobStatus::Error;
        self.status_message = format!("Error: {}", error);
        self.error = Some(error);
        self.updated_at = Utc::now();
        self
    }
}

impl Default for Job {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_job_is_queued() {
        let job = Job::new();
        assert_eq!(job.status, JobStatus::Queued);
        assert_eq!(job.progress, 0);
        assert!(job.error.is_none());
        assert!(job.output_path.is_none());
    }

    #[test]
    fn test_progress_checkpoint() {
        let job = Job::new().with_progress(30, "Generating voiceovers...");
        assert_eq!(job.status, JobStatus::Building);
        assert_eq!(job.progress, 30);
        assert_eq!(job.status_message, "Generating voiceovers...");
    }

    #[test]
    fn test_complete_and_fail_are_terminal() {
        let done = Job::new().complete(PathBuf::from("/out/final_video.mp4"));
        assert_eq!(done.status, JobStatus::Done);
        assert_eq!(done.progress, 100);
        assert!(done.status.is_terminal());

        let failed = Job::new().fail("encoder exploded");
        assert_eq!(failed.status, JobStatus::Error);
        assert_eq!(failed.error.as_deref(), Some("encoder exploded"));
        assert_eq!(failed.status_message, "Error: encoder exploded");
        assert!(failed.status.is_terminal());
    }

    #[test]
    fn test_progress_clamped() {
        let job = Job::new().with_progress(150, "overflow");
        assert_eq!(job.progress, 100);
    }
}
