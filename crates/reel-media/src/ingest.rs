//! User media discovery and scene ordering.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::info;

use reel_models::{MediaAsset, MediaKind, UNORDERED_SCENE_INDEX};

use crate::error::{MediaError, MediaResult};

static SCENE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)scene[_\s-]*(\d+)").unwrap());
static ANY_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)").unwrap());

/// Resolve the scene index embedded in a filename.
///
/// `scene` followed by optional separators and digits wins; otherwise the
/// first digit run in the name; otherwise the unordered sentinel, which
/// sorts such files last.
pub fn scene_index_for(filename: &str) -> u32 {
    if let Some(caps) = SCENE_PATTERN.captures(filename) {
        if let Ok(n) = caps[1].parse() {
            return n;
        }
    }
    if let Some(caps) = ANY_NUMBER.captures(filename) {
        if let Ok(n) = caps[1].parse() {
            return n;
        }
    }
    UNORDERED_SCENE_INDEX
}

/// Discover user-supplied media files in `dir`, ordered by scene index.
///
/// Ties keep the directory enumeration order (the sort is stable). Fails if
/// the directory is missing or contains no supported image/video file.
pub async fn ingest_media(dir: impl AsRef<Path>) -> MediaResult<Vec<MediaAsset>> {
    let dir = dir.as_ref();

    if !dir.is_dir() {
        return Err(MediaError::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut assets = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(kind) = MediaKind::from_path(&path) else {
            continue;
        };
        let scene_index = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(scene_index_for)
            .unwrap_or(UNORDERED_SCENE_INDEX);
        assets.push(MediaAsset {
            path,
            kind,
            scene_index,
        });
    }

    if assets.is_empty() {
        return Err(MediaError::NoMediaFiles(dir.to_path_buf()));
    }

    assets.sort_by_key(|a| a.scene_index);

    info!(
        "Found {} media file(s) in {}",
        assets.len(),
        dir.display()
    );

    Ok(assets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn test_scene_index_patterns() {
        assert_eq!(scene_index_for("scene_0.jpg"), 0);
        assert_eq!(scene_index_for("Scene-12.mp4"), 12);
        assert_eq!(scene_index_for("SCENE 3.png"), 3);
        assert_eq!(scene_index_for("scene7.webm"), 7);
        // Falls back to the first digit run
        assert_eq!(scene_index_for("clip_04_final.mov"), 4);
        // No digits at all
        assert_eq!(scene_index_for("intro.jpg"), UNORDERED_SCENE_INDEX);
    }

    #[tokio::test]
    async fn test_ingest_orders_by_scene_index() {
        let dir = tempfile::tempdir().unwrap();
        // Created out of order on purpose
        for name in ["scene_2.jpg", "scene_0.png", "scene_10.mp4", "scene_1.jpg"] {
            File::create(dir.path().join(name)).unwrap();
        }

        let assets = ingest_media(dir.path()).await.unwrap();
        let indices: Vec<u32> = assets.iter().map(|a| a.scene_index).collect();
        assert_eq!(indices, vec![0, 1, 2, 10]);
        assert_eq!(assets[3].kind, MediaKind::Video);
    }

    #[tokio::test]
    async fn test_ingest_skips_unsupported_files() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("scene_0.jpg")).unwrap();
        File::create(dir.path().join("notes.txt")).unwrap();
        File::create(dir.path().join(".DS_Store")).unwrap();

        let assets = ingest_media(dir.path()).await.unwrap();
        assert_eq!(assets.len(), 1);
    }

    #[tokio::test]
    async fn test_ingest_missing_dir() {
        let err = ingest_media("/nonexistent/folder").await.unwrap_err();
        assert!(matches!(err, MediaError::DirectoryNotFound(_)));
    }

    #[tokio::test]
    async fn test_ingest_no_media_files() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("readme.md")).unwrap();

        let err = ingest_media(dir.path()).await.unwrap_err();
        assert!(matches!(err, MediaError::NoMediaFiles(_)));
    }

    #[tokio::test]
    async fn test_unnumbered_files_sort_last() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("cover.jpg")).unwrap();
        File::create(dir.path().join("scene_1.jpg")).unwrap();

        let assets = ingest_media(dir.path()).await.unwrap();
        assert_eq!(assets[0].scene_index, 1);
        assert_eq!(assets[1].scene_index, UNORDERED_SCENE_INDEX);
    }
}
