//! Script generation: title + style into an ordered scene list.

use std::path::Path;

use tracing::info;

use reel_models::{Scene, ScriptDocument, StoryStyle};

use crate::error::{EngineError, EngineResult};
use crate::llm::ChatClient;

const SCRIPT_SYSTEM: &str =
    "You are a professional video scriptwriter. Respond only in JSON.";

fn script_prompt(title: &str, style: &str) -> String {
    format!(
        r#"Title: "{title}"
Style: "{style}"

Output JSON:
{{
  "scenes": [
    {{
      "narration": "8-18 words, engaging and punchy",
      "image_prompt": "highly detailed 12-40 word prompt with camera, lighting, 9:16 aspect",
      "emotion": "one of: neutral, excited, dramatic, sad, mysterious, intense, cheerful"
    }}
  ]
}}

Make narrations viral-worthy with strong hooks and emotional impact.
Include emotion for voice delivery."#
    )
}

/// Locate the outermost `{{...}}` span in a completion that wrapped its JSON
/// in prose or a code fence.
fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

/// Parse the completion into a script document, repairing once via
/// brace-span extraction before giving up.
fn parse_script(raw: &str) -> EngineResult<ScriptDocument> {
    if let Ok(doc) = serde_json::from_str::<ScriptDocument>(raw) {
        return Ok(doc);
    }
    let repaired = extract_json_object(raw)
        .ok_or_else(|| EngineError::external("Script completion contained no JSON object"))?;
    serde_json::from_str(repaired)
        .map_err(|e| EngineError::external(format!("Malformed script JSON: {}", e)))
}

/// Generate scenes for a title and style, persist the script document, and
/// return the scenes.
///
/// The document is written before returning so the build phase can run
/// without re-invoking the generator.
pub async fn generate_script(
    client: &ChatClient,
    title: &str,
    style: &str,
    script_path: &Path,
) -> EngineResult<Vec<Scene>> {
    if title.trim().is_empty() {
        return Err(EngineError::invalid_input("Title is required"));
    }

    let raw = client
        .complete(SCRIPT_SYSTEM, &script_prompt(title, style), 0.7)
        .await?;

    let mut doc = parse_script(&raw)?;
    if doc.scenes.is_empty() {
        return Err(EngineError::external("Script contained no scenes"));
    }

    let story_style = StoryStyle::lookup(style);
    for scene in &mut doc.scenes {
        scene.augment_prompt(story_style);
    }

    if let Some(parent) = script_path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let json = serde_json::to_string_pretty(&doc)?;
    tokio::fs::write(script_path, json).await?;

    info!(
        "Generated {} scene(s) for \"{}\", script saved to {}",
        doc.scenes.len(),
        title,
        script_path.display()
    );

    Ok(doc.scenes)
}

/// Load the durable script document for the build phase.
pub async fn load_script(script_path: &Path) -> EngineResult<Vec<Scene>> {
    let raw = tokio::fs::read_to_string(script_path)
        .await
        .map_err(|_| EngineError::ScriptMissing(script_path.to_path_buf()))?;
    let doc: ScriptDocument = serde_json::from_str(&raw)
        .map_err(|_| EngineError::ScriptMissing(script_path.to_path_buf()))?;
    if doc.scenes.is_empty() {
        return Err(EngineError::ScriptMissing(script_path.to_path_buf()));
    }
    Ok(doc.scenes)
}
