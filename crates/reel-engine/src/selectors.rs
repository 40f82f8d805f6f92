//! Style selectors: one constrained classification call each for voice,
//! subtitle style and music mood.
//!
//! Answers are normalized against the fixed catalogs; anything off-catalog
//! falls back to the documented default. Transport failures propagate and
//! are fatal to the build.

use reel_models::{MusicMood, Scene, SubtitleStyleId, VoiceId};

use crate::error::EngineResult;
use crate::llm::ChatClient;

fn joined_narration(scenes: &[Scene]) -> String {
    scenes
        .iter()
        .map(|s| s.narration.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Pick the voice profile best matching the narration.
pub async fn select_voice(client: &ChatClient, scenes: &[Scene]) -> EngineResult<VoiceId> {
    let system = "You are a voice casting director. Analyze the narration and determine the best voice type.\n\
        Respond with ONE of these options: storyteller_female, dramatic_female, calm_female, narrator_male, enthusiastic_male";
    let user = format!(
        "Narration: {}\n\n\
         What voice profile would best suit this narration? Consider:\n\
         - Tone and mood\n\
         - Target audience\n\
         - Content type\n\n\
         Respond with ONE option only.",
        joined_narration(scenes)
    );

    let answer = client.complete(system, &user, 0.3).await?;
    Ok(VoiceId::normalize(&answer))
}

/// Pick the subtitle style best matching the content.
pub async fn select_subtitle_style(
    client: &ChatClient,
    title: &str,
    scenes: &[Scene],
) -> EngineResult<SubtitleStyleId> {
    let system = "You are a social media video expert specializing in viral content.\n\
        Analyze the content and recommend the best subtitle style.\n\
        Respond with ONE of these options: alex_hormozi, mr_beast, modern_minimal, trendy_gradient, bold_contrast";
    let user = format!(
        "Content: Title: {}\n{}\n\n\
         Which viral subtitle style fits best? Consider:\n\
         - Target audience (Gen Z, millennials, business professionals)\n\
         - Content tone (educational, entertaining, dramatic, inspirational)\n\
         - Platform optimization (TikTok/Instagram/YouTube Shorts)\n\n\
         Respond with ONE option only.",
        title,
        joined_narration(scenes)
    );

    let answer = client.complete(system, &user, 0.3).await?;
    Ok(SubtitleStyleId::normalize(&answer))
}

/// Pick the background music mood for the story.
pub async fn select_mood(
    client: &ChatClient,
    title: &str,
    scenes: &[Scene],
) -> EngineResult<MusicMood> {
    let system = "You are a music supervisor for videos. Analyze the story and determine the best background music mood.\n\
        Respond with ONLY ONE WORD from these options: uplifting, dramatic, calm, dark, energetic, emotional, mysterious, adventure";
    let user = format!(
        "Video Title: \"{}\"\nStory: {}\n\n\
         What mood of background music would fit best? Respond with ONE WORD only.",
        title,
        joined_narration(scenes)
    );

    let answer = client.complete(system, &user, 0.3).await?;
    Ok(MusicMood::normalize(&answer))
}
