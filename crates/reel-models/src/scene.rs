//! Scenes, emotions and the durable script document.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Scene-level mood tag driving voice prosody.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    #[default]
    Neutral,
    Excited,
    Dramatic,
    Sad,
    Mysterious,
    Intense,
    Cheerful,
}

/// Rate/pitch deltas applied on top of a voice profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prosody {
    /// Speech rate delta in percent
    pub rate_pct: i32,
    /// Pitch delta in hertz
    pub pitch_hz: i32,
}

impl Emotion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Neutral => "neutral",
            Emotion::Excited => "excited",
            Emotion::Dramatic => "dramatic",
            Emotion::Sad => "sad",
            Emotion::Mysterious => "mysterious",
            Emotion::Intense => "intense",
            Emotion::Cheerful => "cheerful",
        }
    }

    /// Fixed prosody override table. Neutral keeps the profile defaults.
    pub fn prosody(&self) -> Option<Prosody> {
        match self {
            Emotion::Excited | Emotion::Cheerful => Some(Prosody {
                rate_pct: 10,
                pitch_hz: 10,
            }),
            Emotion::Dramatic | Emotion::Intense => Some(Prosody {
                rate_pct: -5,
                pitch_hz: 5,
            }),
            Emotion::Sad => Some(Prosody {
                rate_pct: -15,
                pitch_hz: -10,
            }),
            Emotion::Mysterious => Some(Prosody {
                rate_pct: -10,
                pitch_hz: -5,
            }),
            Emotion::Neutral => None,
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Emotion {
    type Err = UnknownEmotion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "neutral" => Ok(Emotion::Neutral),
            "excited" => Ok(Emotion::Excited),
            "dramatic" => Ok(Emotion::Dramatic),
            "sad" => Ok(Emotion::Sad),
            "mysterious" => Ok(Emotion::Mysterious),
            "intense" => Ok(Emotion::Intense),
            "cheerful" => Ok(Emotion::Cheerful),
            _ => Err(UnknownEmotion(s.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown emotion: {0}")]
pub struct UnknownEmotion(String);

/// One narration+visual unit of the output video.
///
/// Scene order is positional within the script document; the matching media
/// asset is resolved by index at build time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Scene {
    /// Narration text (8-18 words)
    pub narration: String,
    /// Image generation prompt, augmented with style keywords at creation
    pub image_prompt: String,
    /// Emotion tag for voice delivery
    #[serde(default, deserialize_with = "emotion_or_neutral")]
    pub emotion: Emotion,
}

/// Unknown emotion strings from the model collapse to neutral rather than
/// failing the whole script.
fn emotion_or_neutral<'de, D>(deserializer: D) -> Result<Emotion, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(s.parse().unwrap_or_default())
}

/// Durable script document written by the generator and read by the build
/// phase. The build phase fails if this file is absent or malformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct ScriptDocument {
    pub scenes: Vec<Scene>,
}

/// Fixed style-keyword catalog for image prompt augmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoryStyle {
    Cinematic,
    Anime,
    Pixar,
    Cartoon,
    Horror,
    Futuristic,
}

/// Quality/aspect keywords appended to every image prompt.
pub const PROMPT_QUALITY_SUFFIX: &str = "ultra-detailed, vertical 9:16";

impl StoryStyle {
    pub const ALL: &'static [StoryStyle] = &[
        StoryStyle::Cinematic,
        StoryStyle::Anime,
        StoryStyle::Pixar,
        StoryStyle::Cartoon,
        StoryStyle::Horror,
        StoryStyle::Futuristic,
    ];

    pub fn keywords(&self) -> &'static str {
        match self {
            StoryStyle::Cinematic => "cinematic lighting, filmic color grading, dramatic rim light",
            StoryStyle::Anime => "anime style, cel-shaded, expressive faces",
            StoryStyle::Pixar => "pixar 3D render, soft warm lighting",
            StoryStyle::Cartoon => "2D cartoon illustration, bold outlines",
            StoryStyle::Horror => "dark moody lighting, scary shadows",
            StoryStyle::Futuristic => "neon futuristic sci-fi aesthetic",
        }
    }

    /// Look up a catalog style. Arbitrary style text gets no keyword
    /// augmentation, so this returns None rather than erroring.
    pub fn lookup(s: &str) -> Option<StoryStyle> {
        match s.to_lowercase().as_str() {
            "cinematic" => Some(StoryStyle::Cinematic),
            "anime" => Some(StoryStyle::Anime),
            "pixar" => Some(StoryStyle::Pixar),
            "cartoon" => Some(StoryStyle::Cartoon),
            "horror" => Some(StoryStyle::Horror),
            "futuristic" => Some(StoryStyle::Futuristic),
            _ => None,
        }
    }
}

impl Scene {
    /// Append style and quality keywords to the image prompt.
    pub fn augment_prompt(&mut self, style: Option<StoryStyle>) {
        if let Some(style) = style {
            self.image_prompt
                .push_str(&format!(", {}", style.keywords()));
        }
        self.image_prompt
            .push_str(&format!(", {}", PROMPT_QUALITY_SUFFIX));
    }
}
