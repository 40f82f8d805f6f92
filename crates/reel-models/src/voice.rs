//! Voice profile catalog.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::scene::Emotion;

/// Available voice profiles, selected once per job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum VoiceId {
    #[default]
    StorytellerFemale,
    DramaticFemale,
    CalmFemale,
    NarratorMale,
    EnthusiasticMale,
}

/// Catalog entry: an Edge TTS voice with default prosody.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoiceProfile {
    /// Edge TTS voice name
    pub voice: &'static str,
    /// Default speech rate delta in percent
    pub rate_pct: i32,
    /// Default pitch delta in hertz
    pub pitch_hz: i32,
    /// Delivery style hint
    pub delivery_style: &'static str,
}

impl VoiceId {
    pub const ALL: &'static [VoiceId] = &[
        VoiceId::StorytellerFemale,
        VoiceId::DramaticFemale,
        VoiceId::CalmFemale,
        VoiceId::NarratorMale,
        VoiceId::EnthusiasticMale,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VoiceId::StorytellerFemale => "storyteller_female",
            VoiceId::DramaticFemale => "dramatic_female",
            VoiceId::CalmFemale => "calm_female",
            VoiceId::NarratorMale => "narrator_male",
            VoiceId::EnthusiasticMale => "enthusiastic_male",
        }
    }

    pub fn profile(&self) -> VoiceProfile {
        match self {
            VoiceId::StorytellerFemale => VoiceProfile {
                voice: "en-US-AriaNeural",
                rate_pct: 0,
                pitch_hz: 0,
                delivery_style: "newscast-casual",
            },
            VoiceId::DramaticFemale => VoiceProfile {
                voice: "en-US-JennyNeural",
                rate_pct: -5,
                pitch_hz: 5,
                delivery_style: "excited",
            },
            VoiceId::CalmFemale => VoiceProfile {
                voice: "en-GB-SoniaNeural",
                rate_pct: -10,
                pitch_hz: -5,
                delivery_style: "friendly",
            },
            VoiceId::NarratorMale => VoiceProfile {
                voice: "en-US-GuyNeural",
                rate_pct: -5,
                pitch_hz: -10,
                delivery_style: "newscast",
            },
            VoiceId::EnthusiasticMale => VoiceProfile {
                voice: "en-US-DavisNeural",
                rate_pct: 5,
                pitch_hz: 5,
                delivery_style: "chat",
            },
        }
    }

    /// Normalize a free-form selector answer. Anything that is not a catalog
    /// key falls back to the default voice, never errors.
    pub fn normalize(s: &str) -> VoiceId {
        s.trim().to_lowercase().parse().unwrap_or_default()
    }
}

impl VoiceProfile {
    /// Effective prosody for a scene: emotion overrides replace the profile
    /// defaults, neutral keeps them.
    pub fn prosody_for(&self, emotion: Emotion) -> (i32, i32) {
        match emotion.prosody() {
            Some(p) => (p.rate_pct, p.pitch_hz),
            None => (self.rate_pct, self.pitch_hz),
        }
    }
}

impl fmt::Display for VoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VoiceId {
    type Err = UnknownVoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "storyteller_female" => Ok(VoiceId::StorytellerFemale),
            "dramatic_female" => Ok(VoiceId::DramaticFemale),
            "calm_female" => Ok(VoiceId::CalmFemale),
            "narrator_male" => Ok(VoiceId::NarratorMale),
            "enthusiastic_male" => Ok(VoiceId::EnthusiasticMale),
            _ => Err(UnknownVoice(s.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown voice: {0}")]
pub struct UnknownVoice(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_parse() {
        assert_eq!(
            "narrator_male".parse::<VoiceId>().unwrap(),
            VoiceId::NarratorMale
        );
        assert!("foobar".parse::<VoiceId>().is_err());
    }

    #[test]
    fn test_unknown_voice_normalizes_to_default() {
        assert_eq!(VoiceId::normalize("foobar"), VoiceId::StorytellerFemale);
        assert_eq!(VoiceId::normalize("  Calm_Female \n"), VoiceId::CalmFemale);
    }

    #[test]
    fn test_emotion_overrides_profile_prosody() {
        let profile = VoiceId::CalmFemale.profile();
        // Neutral keeps profile defaults
        assert_eq!(profile.prosody_for(Emotion::Neutral), (-10, -5));
        // Emotion replaces them
        assert_eq!(profile.prosody_for(Emotion::Excited), (10, 10));
        assert_eq!(profile.prosody_for(Emotion::Sad), (-15, -10));
    }

    #[test]
    fn test_catalog_voices_are_distinct() {
        let mut names: Vec<&str> = VoiceId::ALL.iter().map(|v| v.profile().voice).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), VoiceId::ALL.len());
    }
}
