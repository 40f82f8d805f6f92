//! Background music lookup.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use reel_models::MusicMood;

const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "m4a"];

/// Find a music track for the mood.
///
/// Prefers the conventionally-named `music_{mood}.mp3`; otherwise falls back
/// to any audio file in the directory. Returns `None` when nothing usable
/// exists, in which case the build proceeds without music.
pub fn resolve_music(music_dir: &Path, mood: MusicMood) -> Option<PathBuf> {
    let preferred = music_dir.join(mood.filename());
    if preferred.is_file() {
        debug!("Using mood track {}", preferred.display());
        return Some(preferred);
    }

    let entries = match std::fs::read_dir(music_dir) {
        Ok(entries) => entries,
        Err(_) => {
            warn!(
                "Music directory {} not readable, building without music",
                music_dir.display()
            );
            return None;
        }
    };

    let mut candidates: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .and_then(|e| e.to_str())
                    .map(|e| AUDIO_EXTENSIONS.contains(&e.to_lowercase().as_str()))
                    .unwrap_or(false)
        })
        .collect();
    candidates.sort();

    match candidates.into_iter().next() {
        Some(fallback) => {
            debug!(
                "No track for mood '{}', falling back to {}",
                mood,
                fallback.display()
            );
            Some(fallback)
        }
        None => {
            warn!("No audio files in {}, building without music", music_dir.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_mood_named_track() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("music_dark.mp3"), b"x").unwrap();
        std::fs::write(dir.path().join("other.mp3"), b"x").unwrap();

        let found = resolve_music(dir.path(), MusicMood::Dark).unwrap();
        assert_eq!(found.file_name().unwrap(), "music_dark.mp3");
    }

    #[test]
    fn test_falls_back_to_any_audio() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("theme.wav"), b"x").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"x").unwrap();

        let found = resolve_music(dir.path(), MusicMood::Uplifting).unwrap();
        assert_eq!(found.file_name().unwrap(), "theme.wav");
    }

    #[test]
    fn test_empty_dir_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(resolve_music(dir.path(), MusicMood::Calm).is_none());
    }

    #[test]
    fn test_missing_dir_is_none() {
        assert!(resolve_music(Path::new("/nonexistent/music"), MusicMood::Calm).is_none());
    }
}
