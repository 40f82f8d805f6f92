//! The reelgen build pipeline.
//!
//! One build job runs the whole sequence: load the durable script document,
//! pick voice/subtitle/mood via the language model, synthesize narration per
//! scene, composite scenes against the user's media, assemble the timeline
//! with background music and render the final video.

pub mod config;
pub mod error;
pub mod llm;
pub mod music;
pub mod pipeline;
pub mod script;
pub mod selectors;
pub mod store;
pub mod tts;

pub use config::EngineConfig;
pub use error::{EngineError, EngineResult};
pub use llm::ChatClient;
pub use music::resolve_music;
pub use pipeline::{BuildRequest, Pipeline};
pub use script::generate_script;
pub use store::{JobStore, MemoryJobStore};
pub use tts::{EdgeTts, SpeechSynthesizer};
