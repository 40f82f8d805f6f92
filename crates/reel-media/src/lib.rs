//! FFmpeg CLI wrapper for the reelgen build pipeline.
//!
//! Everything here shells out to `ffmpeg`/`ffprobe` found on PATH; no media
//! is decoded in-process. The layers, bottom up:
//!
//! - [`command`]: multi-input FFmpeg command builder and runner
//! - [`probe`]: ffprobe wrapper for durations and stream info
//! - [`ingest`]: user media discovery and scene ordering
//! - [`subtitle`]: ASS subtitle generation from a subtitle style
//! - [`compose`]: per-scene visual+audio composition
//! - [`timeline`]: concatenation, music mixing and the final render

pub mod command;
pub mod compose;
pub mod error;
pub mod ingest;
pub mod probe;
pub mod subtitle;
pub mod timeline;

pub use command::{check_ffmpeg, check_ffprobe, FfmpegCommand, FfmpegRunner};
pub use compose::{compose_scene, loops_needed, SceneComposition};
pub use error::{MediaError, MediaResult};
pub use ingest::ingest_media;
pub use probe::{media_duration, probe_media, MediaInfo};
pub use subtitle::{identify_keywords, write_ass_file};
pub use timeline::{assemble_timeline, MUSIC_GAIN};
