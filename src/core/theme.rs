//! Theme and style resolution
//!
//! One authoritative preset table serves both the public render path and
//! the editor preview endpoint, so what the owner previews is exactly what
//! visitors get. Resolution never fails: unknown names fall back to the
//! default preset, missing overrides leave preset values in place.

use serde::Serialize;
use strum::IntoEnumIterator;

use crate::core::types::{BackgroundFit, ButtonAnimation, ButtonStyle, Font, Theme};
use crate::storage::models::Page;

/// Literal color tuple for one named theme
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ThemePreset {
    pub background: &'static str,
    pub text: &'static str,
    pub button: &'static str,
    pub button_text: &'static str,
}

pub fn preset(theme: Theme) -> ThemePreset {
    match theme {
        Theme::Default => ThemePreset {
            background: "#ffffff",
            text: "#000000",
            button: "#000000",
            button_text: "#ffffff",
        },
        Theme::Dark => ThemePreset {
            background: "#121212",
            text: "#f5f5f5",
            button: "#2d2d2d",
            button_text: "#ffffff",
        },
        Theme::Gradient => ThemePreset {
            background: "linear-gradient(135deg, #667eea 0%, #764ba2 100%)",
            text: "#ffffff",
            button: "rgba(255, 255, 255, 0.2)",
            button_text: "#ffffff",
        },
        Theme::Minimal => ThemePreset {
            background: "#fafafa",
            text: "#333333",
            button: "#ffffff",
            button_text: "#333333",
        },
        Theme::Colorful => ThemePreset {
            background: "#fff5e1",
            text: "#2d2d2d",
            button: "#ff6b6b",
            button_text: "#ffffff",
        },
        Theme::Neon => ThemePreset {
            background: "#0d0221",
            text: "#39ff14",
            button: "#ff00ff",
            button_text: "#0d0221",
        },
        Theme::Sunset => ThemePreset {
            background: "linear-gradient(180deg, #ff9a9e 0%, #fecfef 100%)",
            text: "#4a1942",
            button: "#c44569",
            button_text: "#ffffff",
        },
        Theme::Ocean => ThemePreset {
            background: "linear-gradient(180deg, #2193b0 0%, #6dd5ed 100%)",
            text: "#ffffff",
            button: "#0b5d74",
            button_text: "#ffffff",
        },
        Theme::Forest => ThemePreset {
            background: "#1b4332",
            text: "#d8f3dc",
            button: "#2d6a4f",
            button_text: "#d8f3dc",
        },
    }
}

/// All presets keyed by theme name, for the editor's preset picker
pub fn all_presets() -> Vec<(Theme, ThemePreset)> {
    Theme::iter().map(|t| (t, preset(t))).collect()
}

/// CSS rules applied when a background image is set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BackgroundRules {
    pub size: &'static str,
    pub repeat: &'static str,
    pub attachment: &'static str,
    pub position: &'static str,
}

fn background_rules(fit: BackgroundFit) -> BackgroundRules {
    match fit {
        BackgroundFit::Cover => BackgroundRules {
            size: "cover",
            repeat: "no-repeat",
            attachment: "scroll",
            position: "center",
        },
        BackgroundFit::Contain => BackgroundRules {
            size: "contain",
            repeat: "no-repeat",
            attachment: "scroll",
            position: "center",
        },
        BackgroundFit::Repeat => BackgroundRules {
            size: "auto",
            repeat: "repeat",
            attachment: "scroll",
            position: "top left",
        },
        BackgroundFit::Fixed => BackgroundRules {
            size: "cover",
            repeat: "no-repeat",
            attachment: "fixed",
            position: "center",
        },
    }
}

fn font_family(font: Font) -> &'static str {
    match font {
        Font::System => {
            "-apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Helvetica, Arial, sans-serif"
        }
        Font::Inter => "'Inter', sans-serif",
        Font::Roboto => "'Roboto', sans-serif",
        Font::Poppins => "'Poppins', sans-serif",
        Font::Lora => "'Lora', serif",
        Font::Mono => "'JetBrains Mono', 'Fira Code', monospace",
    }
}

/// Final resolved render style for a page surface
#[derive(Debug, Clone, Serialize)]
pub struct RenderStyle {
    /// Solid color or gradient expression for the page surface
    pub background: String,
    /// Takes precedence over `background` when present
    pub background_image: Option<String>,
    pub background_rules: Option<BackgroundRules>,
    pub text_color: String,
    pub button_color: String,
    pub button_text_color: String,
    pub font_family: String,
    pub button_class: String,
}

pub fn resolve_style(page: &Page) -> RenderStyle {
    let preset = preset(page.theme);
    let colors = &page.custom_colors;

    // Custom gradient wins over a plain custom background, which wins over
    // the preset paint
    let background = match (&colors.gradient_start, &colors.gradient_end) {
        (Some(start), Some(end)) => {
            format!("linear-gradient(135deg, {} 0%, {} 100%)", start, end)
        }
        _ => colors
            .background
            .clone()
            .unwrap_or_else(|| preset.background.to_string()),
    };

    let (background_image, background_rules) = match &page.background_image {
        Some(image) if !image.is_empty() => (
            Some(image.clone()),
            Some(background_rules(page.background_fit)),
        ),
        _ => (None, None),
    };

    RenderStyle {
        background,
        background_image,
        background_rules,
        text_color: colors.text.clone().unwrap_or_else(|| preset.text.to_string()),
        button_color: colors
            .button
            .clone()
            .unwrap_or_else(|| preset.button.to_string()),
        button_text_color: colors
            .button_text
            .clone()
            .unwrap_or_else(|| preset.button_text.to_string()),
        font_family: font_family(page.font).to_string(),
        button_class: button_class(page.theme, page.button_style, page.button_animation),
    }
}

/// Compose the button class list: base shape, a forced "outlined" modifier
/// for the minimal theme, and an animation modifier when set
pub fn button_class(theme: Theme, style: ButtonStyle, animation: ButtonAnimation) -> String {
    let mut class = format!("btn-{}", style);

    if theme == Theme::Minimal && style != ButtonStyle::Outlined {
        class.push_str(" btn-outlined");
    }

    if animation != ButtonAnimation::None {
        class.push_str(&format!(" anim-{}", animation));
    }

    class
}
