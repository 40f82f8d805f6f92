//! User-supplied media assets and their scene ordering.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Scene index assigned to files with no parseable number; sorts last.
pub const UNORDERED_SCENE_INDEX: u32 = 999;

/// Supported image extensions.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "bmp", "gif"];

/// Supported video extensions. The video set is checked first, so GIFs are
/// handled as (animated) videos rather than stills.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "mkv", "webm", "gif"];

/// Kind of a user-supplied media file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classify a file by extension. Returns None for unsupported files.
    pub fn from_path(path: &Path) -> Option<MediaKind> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Some(MediaKind::Video)
        } else if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Some(MediaKind::Image)
        } else {
            None
        }
    }
}

/// One user-supplied image or video file mapped to a scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MediaAsset {
    pub path: PathBuf,
    pub kind: MediaKind,
    /// Scene index resolved from the filename; ties keep directory order.
    pub scene_index: u32,
}

impl MediaAsset {
    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }
}
