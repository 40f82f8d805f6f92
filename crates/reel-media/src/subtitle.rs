//! ASS subtitle generation.
//!
//! Each scene gets a small ASS file: the full narration as a single block in
//! the lower quarter of the frame, a semi-transparent backing box, and
//! emphasis words recolored with the style's highlight color via inline
//! overrides. Rendering happens inside FFmpeg through the `ass` filter.

use std::path::Path;

use reel_models::SubtitleStyle;

use crate::error::MediaResult;

/// Emphasis lexicon: words that get the highlight color, plus any numeral.
pub const EMPHASIS_WORDS: &[&str] = &[
    "amazing",
    "incredible",
    "best",
    "worst",
    "never",
    "always",
    "first",
    "last",
    "new",
    "now",
    "today",
    "epic",
    "crazy",
    "unbelievable",
    "shocking",
    "secret",
    "revealed",
    "must",
    "you",
    "your",
    "free",
    "easy",
    "simple",
    "powerful",
];

/// Indices of words to emphasize in `text` (whitespace-split, punctuation
/// stripped, case-insensitive; digit runs always count).
pub fn identify_keywords(text: &str) -> Vec<usize> {
    text.split_whitespace()
        .enumerate()
        .filter(|(_, word)| {
            let clean = word
                .trim_matches(|c: char| matches!(c, '.' | ',' | '!' | '?'))
                .to_lowercase();
            !clean.is_empty()
                && (EMPHASIS_WORDS.contains(&clean.as_str())
                    || clean.chars().all(|c| c.is_ascii_digit()))
        })
        .map(|(i, _)| i)
        .collect()
}

/// Convert `#RRGGBB` to the ASS `&HAABBGGRR` form.
///
/// ASS alpha is inverted: 00 is opaque, FF is transparent.
fn ass_color(hex: &str, alpha: u8) -> String {
    let hex = hex.trim_start_matches('#');
    let (r, g, b) = if hex.len() == 6 {
        (
            u8::from_str_radix(&hex[0..2], 16).unwrap_or(0xFF),
            u8::from_str_radix(&hex[2..4], 16).unwrap_or(0xFF),
            u8::from_str_radix(&hex[4..6], 16).unwrap_or(0xFF),
        )
    } else {
        (0xFF, 0xFF, 0xFF)
    };
    format!("&H{:02X}{:02X}{:02X}{:02X}", alpha, b, g, r)
}

/// Format seconds as an ASS timestamp (`H:MM:SS.cc`).
fn ass_time(seconds: f64) -> String {
    let total_cs = (seconds.max(0.0) * 100.0).round() as u64;
    let cs = total_cs % 100;
    let s = (total_cs / 100) % 60;
    let m = (total_cs / 6000) % 60;
    let h = total_cs / 360_000;
    format!("{}:{:02}:{:02}.{:02}", h, m, s, cs)
}

/// Neutralize characters ASS treats specially.
fn escape_ass_text(text: &str) -> String {
    text.replace('{', "(").replace('}', ")").replace('\n', "\\N")
}

/// Build the dialogue text with highlight-color overrides on keywords.
fn emphasized_text(narration: &str, style: &SubtitleStyle) -> String {
    let keywords = identify_keywords(narration);
    let primary = ass_color(style.primary_color, 0x00);
    let highlight = ass_color(style.highlight_color, 0x00);

    narration
        .split_whitespace()
        .enumerate()
        .map(|(i, word)| {
            let word = escape_ass_text(word);
            if keywords.contains(&i) {
                format!("{{\\1c{}}}{}{{\\1c{}}}", highlight, word, primary)
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render the complete ASS document for one scene.
pub fn build_ass(style: &SubtitleStyle, narration: &str, duration: f64) -> String {
    // Inverted alpha: background_opacity 0.7 -> 30% transparent box
    let back_alpha = ((1.0 - style.background_opacity).clamp(0.0, 1.0) * 255.0).round() as u8;

    let mut doc = String::new();
    doc.push_str("[Script Info]\n");
    doc.push_str("ScriptType: v4.00+\n");
    doc.push_str("PlayResX: 1080\n");
    doc.push_str("PlayResY: 1920\n");
    doc.push_str("WrapStyle: 0\n");
    doc.push_str("ScaledBorderAndShadow: yes\n\n");

    doc.push_str("[V4+ Styles]\n");
    doc.push_str(
        "Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, \
         BackColour, Bold, Italic, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, \
         MarginV, Encoding\n",
    );
    // BorderStyle 4 draws a background box behind the line while keeping the
    // outline; Alignment 2 with MarginV 480 lands in the lower quarter.
    doc.push_str(&format!(
        "Style: Narration,{},{},{},{},{},{},-1,0,4,{},0,2,60,60,480,1\n\n",
        style.font,
        style.font_size,
        ass_color(style.primary_color, 0x00),
        ass_color(style.primary_color, 0x00),
        ass_color(style.stroke_color, 0x00),
        ass_color("#000000", back_alpha),
        style.stroke_width,
    ));

    doc.push_str("[Events]\n");
    doc.push_str("Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\n");
    doc.push_str(&format!(
        "Dialogue: 0,{},{},Narration,,0,0,0,,{}\n",
        ass_time(0.0),
        ass_time(duration),
        emphasized_text(narration, style),
    ));

    doc
}

/// Write the scene's ASS file to `path`.
pub async fn write_ass_file(
    path: impl AsRef<Path>,
    style: &SubtitleStyle,
    narration: &str,
    duration: f64,
) -> MediaResult<()> {
    let doc = build_ass(style, narration, duration);
    tokio::fs::write(path.as_ref(), doc).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reel_models::SubtitleStyleId;

    #[test]
    fn test_identify_keywords() {
        let ks = identify_keywords("You will never believe these 3 secrets");
        // "You" (0), "never" (2), "3" (5)
        assert_eq!(ks, vec![0, 2, 5]);
    }

    #[test]
    fn test_identify_keywords_strips_punctuation() {
        let ks = identify_keywords("Amazing! Truly the best, today.");
        assert_eq!(ks, vec![0, 3, 4]);
    }

    #[test]
    fn test_identify_keywords_empty() {
        assert!(identify_keywords("a quiet evening walk").is_empty());
    }

    #[test]
    fn test_ass_color_order_and_alpha() {
        // RGB #FFFF00 (yellow) becomes BGR 00FFFF
        assert_eq!(ass_color("#FFFF00", 0x00), "&H0000FFFF");
        assert_eq!(ass_color("#FF0000", 0x4C), "&H4C0000FF");
    }

    #[test]
    fn test_ass_time_format() {
        assert_eq!(ass_time(0.0), "0:00:00.00");
        assert_eq!(ass_time(2.5), "0:00:02.50");
        assert_eq!(ass_time(61.337), "0:01:01.34");
        assert_eq!(ass_time(3600.0), "1:00:00.00");
    }

    #[test]
    fn test_build_ass_contains_highlight_overrides() {
        let style = SubtitleStyleId::AlexHormozi.style();
        let doc = build_ass(&style, "The best kept secret", 2.0);

        assert!(doc.contains("PlayResX: 1080"));
        assert!(doc.contains("Style: Narration,Impact,80"));
        // highlight #00FFD4 -> &H00D4FF00
        assert!(doc.contains("{\\1c&H00D4FF00}best{\\1c"));
        assert!(doc.contains("Dialogue: 0,0:00:00.00,0:00:02.00,Narration"));
    }

    #[test]
    fn test_build_ass_box_alpha_from_opacity() {
        // ModernMinimal opacity 0.6 -> alpha 0x66 (102)
        let style = SubtitleStyleId::ModernMinimal.style();
        let doc = build_ass(&style, "hello", 1.0);
        assert!(doc.contains("&H66000000"));
    }

    #[test]
    fn test_braces_are_neutralized() {
        let style = SubtitleStyleId::ModernMinimal.style();
        let doc = build_ass(&style, "weird {input} here", 1.0);
        assert!(doc.contains("(input)"));
    }
}
