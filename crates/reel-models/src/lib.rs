//! Shared data models for the reelgen backend.
//!
//! This crate provides Serde-serializable types for:
//! - Scenes and the durable script document
//! - Voice, subtitle and music mood catalogs
//! - Media assets and their scene ordering
//! - Jobs and their lifecycle state
//! - Encoding configuration

pub mod encoding;
pub mod job;
pub mod media;
pub mod music;
pub mod scene;
pub mod subtitle;
pub mod voice;

// Re-export common types
pub use encoding::{EncodingConfig, OUTPUT_HEIGHT, OUTPUT_WIDTH};
pub use job::{Job, JobId, JobStatus};
pub use media::{MediaAsset, MediaKind, UNORDERED_SCENE_INDEX};
pub use music::MusicMood;
pub use scene::{Emotion, Prosody, Scene, ScriptDocument, StoryStyle};
pub use subtitle::{SubtitleStyle, SubtitleStyleId};
pub use voice::{VoiceId, VoiceProfile};
