//! Output encoding configuration.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output frame size (vertical 9:16)
pub const OUTPUT_WIDTH: u32 = 1080;
pub const OUTPUT_HEIGHT: u32 = 1920;

/// Default video codec (H.264)
pub const DEFAULT_VIDEO_CODEC: &str = "libx264";
/// Default audio codec
pub const DEFAULT_AUDIO_CODEC: &str = "aac";
/// Default encoding preset
pub const DEFAULT_PRESET: &str = "medium";
/// Default video bitrate
pub const DEFAULT_VIDEO_BITRATE: &str = "8000k";
/// Output frame rate
pub const DEFAULT_FPS: u32 = 30;
/// Pixel format for player compatibility
pub const DEFAULT_PIX_FMT: &str = "yuv420p";

/// Video encoding configuration for the final render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EncodingConfig {
    /// Video codec (e.g. "libx264")
    #[serde(default = "default_video_codec")]
    pub codec: String,

    /// Encoding preset (e.g. "fast", "medium", "slow")
    #[serde(default = "default_preset")]
    pub preset: String,

    /// Video bitrate (e.g. "8000k")
    #[serde(default = "default_video_bitrate")]
    pub video_bitrate: String,

    /// Audio codec
    #[serde(default = "default_audio_codec")]
    pub audio_codec: String,

    /// Frame rate
    #[serde(default = "default_fps")]
    pub fps: u32,

    /// Pixel format
    #[serde(default = "default_pix_fmt")]
    pub pix_fmt: String,
}

fn default_video_codec() -> String {
    DEFAULT_VIDEO_CODEC.to_string()
}
fn default_preset() -> String {
    DEFAULT_PRESET.to_string()
}
fn default_video_bitrate() -> String {
    DEFAULT_VIDEO_BITRATE.to_string()
}
fn default_audio_codec() -> String {
    DEFAULT_AUDIO_CODEC.to_string()
}
fn default_fps() -> u32 {
    DEFAULT_FPS
}
fn default_pix_fmt() -> String {
    DEFAULT_PIX_FMT.to_string()
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            codec: default_video_codec(),
            preset: default_preset(),
            video_bitrate: default_video_bitrate(),
            audio_codec: default_audio_codec(),
            fps: default_fps(),
            pix_fmt: default_pix_fmt(),
        }
    }
}
