//! Closed enumerations for page appearance and analytics dimensions
//!
//! All of these are stored as plain strings in the database and parsed once
//! at the storage boundary. Parsing never fails: unrecognized values fall
//! back to the enum's default (or `Icon::Unknown`), so a row written by a
//! newer version still renders.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Parse a stored enum value, falling back to the default on anything
/// unrecognized
pub fn parse_or_default<T>(s: &str) -> T
where
    T: std::str::FromStr + Default,
{
    s.parse().unwrap_or_default()
}

/// Named theme preset selector
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Theme {
    #[default]
    Default,
    Dark,
    Gradient,
    Minimal,
    Colorful,
    Neon,
    Sunset,
    Ocean,
    Forest,
}

/// Base button shape class
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ButtonStyle {
    #[default]
    Rounded,
    Square,
    Pill,
    Outlined,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Font {
    #[default]
    System,
    Inter,
    Roboto,
    Poppins,
    Lora,
    Mono,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ButtonAnimation {
    #[default]
    None,
    Bounce,
    Pulse,
    Shake,
}

/// How a background image fills the page surface
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BackgroundFit {
    #[default]
    Cover,
    Contain,
    Repeat,
    Fixed,
}

/// Vertical bucket a link renders in
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LinkPosition {
    Top,
    #[default]
    Main,
    Bottom,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BlockLayout {
    #[default]
    Full,
    Half,
}

/// Closed icon set resolved once at the storage boundary; anything the
/// render layer doesn't know about becomes `Unknown` and falls back to the
/// generic link glyph
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Icon {
    #[default]
    Link,
    Github,
    Twitter,
    Instagram,
    Facebook,
    Youtube,
    Tiktok,
    Linkedin,
    Twitch,
    Discord,
    Music,
    Video,
    Mail,
    Globe,
    Shop,
    Camera,
    Book,
    Heart,
    Star,
    Unknown,
}

impl Icon {
    /// Resolve a stored icon name; unknown names map to `Unknown`, not to
    /// the default glyph, so the render layer can distinguish the two
    pub fn resolve(s: &str) -> Self {
        s.parse().unwrap_or(Icon::Unknown)
    }
}

/// Coarse visitor device class
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Device {
    Mobile,
    Tablet,
    Desktop,
    #[default]
    Unknown,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EventType {
    View,
    Click,
}

/// Plan entitlement supplied by the payment collaborator
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Plan {
    #[default]
    Free,
    Pro,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_theme_falls_back_to_default() {
        assert_eq!(parse_or_default::<Theme>("vaporwave"), Theme::Default);
        assert_eq!(parse_or_default::<Theme>("DARK"), Theme::Dark);
    }

    #[test]
    fn icon_resolution_keeps_unknown_distinct() {
        assert_eq!(Icon::resolve("github"), Icon::Github);
        assert_eq!(Icon::resolve("flurble"), Icon::Unknown);
        assert_eq!(Icon::resolve(""), Icon::Unknown);
    }

    #[test]
    fn enums_round_trip_as_lowercase() {
        assert_eq!(LinkPosition::Top.to_string(), "top");
        assert_eq!(parse_or_default::<LinkPosition>("bottom"), LinkPosition::Bottom);
        assert_eq!(parse_or_default::<LinkPosition>(""), LinkPosition::Main);
        assert_eq!(Device::Mobile.to_string(), "mobile");
    }
}
