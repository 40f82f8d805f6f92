//! Subtitle style catalog.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Available subtitle styles, selected once per job and applied uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubtitleStyleId {
    AlexHormozi,
    MrBeast,
    #[default]
    ModernMinimal,
    TrendyGradient,
    BoldContrast,
}

/// Subtitle entrance animation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SubtitleAnimation {
    WordPop,
    Bounce,
    FadeIn,
    SlideUp,
    ScaleIn,
}

/// Catalog entry describing how subtitles are drawn.
///
/// Colors are `#RRGGBB` hex strings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubtitleStyle {
    pub font: &'static str,
    pub font_size: u32,
    pub primary_color: &'static str,
    pub stroke_color: &'static str,
    pub stroke_width: u32,
    pub highlight_color: &'static str,
    /// Backing box opacity, 0.0 (transparent) to 1.0 (opaque)
    pub background_opacity: f64,
    pub animation: SubtitleAnimation,
}

impl SubtitleStyleId {
    pub const ALL: &'static [SubtitleStyleId] = &[
        SubtitleStyleId::AlexHormozi,
        SubtitleStyleId::MrBeast,
        SubtitleStyleId::ModernMinimal,
        SubtitleStyleId::TrendyGradient,
        SubtitleStyleId::BoldContrast,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubtitleStyleId::AlexHormozi => "alex_hormozi",
            SubtitleStyleId::MrBeast => "mr_beast",
            SubtitleStyleId::ModernMinimal => "modern_minimal",
            SubtitleStyleId::TrendyGradient => "trendy_gradient",
            SubtitleStyleId::BoldContrast => "bold_contrast",
        }
    }

    pub fn style(&self) -> SubtitleStyle {
        match self {
            SubtitleStyleId::AlexHormozi => SubtitleStyle {
                font: "Impact",
                font_size: 80,
                primary_color: "#FFFF00",
                stroke_color: "#000000",
                stroke_width: 5,
                highlight_color: "#00FFD4",
                background_opacity: 0.7,
                animation: SubtitleAnimation::WordPop,
            },
            SubtitleStyleId::MrBeast => SubtitleStyle {
                font: "Impact",
                font_size: 85,
                primary_color: "#FFFFFF",
                stroke_color: "#FF0000",
                stroke_width: 6,
                highlight_color: "#FFEA00",
                background_opacity: 0.8,
                animation: SubtitleAnimation::Bounce,
            },
            SubtitleStyleId::ModernMinimal => SubtitleStyle {
                font: "Arial",
                font_size: 70,
                primary_color: "#FFFFFF",
                stroke_color: "#000000",
                stroke_width: 4,
                highlight_color: "#A78BFA",
                background_opacity: 0.6,
                animation: SubtitleAnimation::FadeIn,
            },
            SubtitleStyleId::TrendyGradient => SubtitleStyle {
                font: "Arial",
                font_size: 75,
                primary_color: "#FF6B6B",
                stroke_color: "#000000",
                stroke_width: 5,
                highlight_color: "#00FFD3",
                background_opacity: 0.7,
                animation: SubtitleAnimation::SlideUp,
            },
            SubtitleStyleId::BoldContrast => SubtitleStyle {
                font: "Impact",
                font_size: 90,
                primary_color: "#000000",
                stroke_color: "#FFFFFF",
                stroke_width: 6,
                highlight_color: "#FF00FF",
                background_opacity: 0.9,
                animation: SubtitleAnimation::ScaleIn,
            },
        }
    }

    /// Normalize a free-form selector answer against the catalog, falling
    /// back to the default style.
    pub fn normalize(s: &str) -> SubtitleStyleId {
        s.trim().to_lowercase().parse().unwrap_or_default()
    }
}

impl fmt::Display for SubtitleStyleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SubtitleStyleId {
    type Err = UnknownSubtitleStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "alex_hormozi" => Ok(SubtitleStyleId::AlexHormozi),
            "mr_beast" => Ok(SubtitleStyleId::MrBeast),
            "modern_minimal" => Ok(SubtitleStyleId::ModernMinimal),
            "trendy_gradient" => Ok(SubtitleStyleId::TrendyGradient),
            "bold_contrast" => Ok(SubtitleStyleId::BoldContrast),
            _ => Err(UnknownSubtitleStyle(s.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown subtitle style: {0}")]
pub struct UnknownSubtitleStyle(String);
