//! Background music mood catalog.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Background music mood, selected once per job.
///
/// Moods resolve to an audio file by naming convention
/// (`music_{mood}.mp3` in the music folder); absence is non-fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum MusicMood {
    Uplifting,
    Dramatic,
    #[default]
    Calm,
    Dark,
    Energetic,
    Emotional,
    Mysterious,
    Adventure,
}

impl MusicMood {
    pub const ALL: &'static [MusicMood] = &[
        MusicMood::Uplifting,
        MusicMood::Dramatic,
        MusicMood::Calm,
        MusicMood::Dark,
        MusicMood::Energetic,
        MusicMood::Emotional,
        MusicMood::Mysterious,
        MusicMood::Adventure,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MusicMood::Uplifting => "uplifting",
            MusicMood::Dramatic => "dramatic",
            MusicMood::Calm => "calm",
            MusicMood::Dark => "dark",
            MusicMood::Energetic => "energetic",
            MusicMood::Emotional => "emotional",
            MusicMood::Mysterious => "mysterious",
            MusicMood::Adventure => "adventure",
        }
    }

    /// Conventional filename for this mood inside the music folder.
    pub fn filename(&self) -> String {
        format!("music_{}.mp3", self.as_str())
    }

    /// Normalize a free-form selector answer, falling back to the default.
    pub fn normalize(s: &str) -> MusicMood {
        s.trim().to_lowercase().parse().unwrap_or_default()
    }
}

impl fmt::Display for MusicMood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MusicMood {
    type Err = UnknownMood;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "uplifting" => Ok(MusicMood::Uplifting),
            "dramatic" => Ok(MusicMood::Dramatic),
            "calm" => Ok(MusicMood::Calm),
            "dark" => Ok(MusicMood::Dark),
            "energetic" => Ok(MusicMood::Energetic),
            "emotional" => Ok(MusicMood::Emotional),
            "mysterious" => Ok(MusicMood::Mysterious),
            "adventure" => Ok(MusicMood::Adventure),
            _ => Err(UnknownMood(s.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown music mood: {0}")]
pub struct UnknownMood(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_parse() {
        assert_eq!("dark".parse::<MusicMood>().unwrap(), MusicMood::Dark);
        assert!("foobar".parse::<MusicMood>().is_err());
    }

    #[test]
    fn test_unknown_mood_normalizes_to_calm() {
        assert_eq!(MusicMood::normalize("foobar"), MusicMood::Calm);
        assert_eq!(MusicMood::normalize(" ADVENTURE "), MusicMood::Adventure);
    }

    #[test]
    fn test_mood_filename() {
        assert_eq!(MusicMood::Energetic.filename(), "music_energetic.mp3");
    }
}
