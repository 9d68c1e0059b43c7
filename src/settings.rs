use serde::{Deserialize, Serialize};

use crate::models::{CustomColors, FontSize, Theme, DEFAULT_ACCENT};

/// User preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: Theme,
    pub accent_color: String,
    pub custom_colors: CustomColors,
    pub font_size: FontSize,
    pub animations_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            theme: Theme::Light,
            accent_color: DEFAULT_ACCENT.to_string(),
            custom_colors: CustomColors::default(),
            font_size: FontSize::Medium,
            animations_enabled: true,
        }
    }
}

/// Which color a `SettingsPatch` overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorKey {
    Accent,
    Text,
    Background,
    Card,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsPatch {
    pub theme: Option<Theme>,
    pub font_size: Option<FontSize>,
    pub animations_enabled: Option<bool>,
    pub color: Option<(ColorKey, String)>,
}

impl Settings {
    pub fn apply(&mut self, patch: &SettingsPatch) {
        if let Some(t) = patch.theme { self.theme = t; }
        if let Some(f) = patch.font_size { self.font_size = f; }
        if let Some(a) = patch.animations_enabled { self.animations_enabled = a; }
        if let Some((key, value)) = &patch.color {
            let c = &mut self.custom_colors;
            match key {
                ColorKey::Accent => {
                    c.accent = value.clone();
                    // the accent override also becomes the accent color
                    self.accent_color = value.clone();
                }
                ColorKey::Text => c.text = value.clone(),
                ColorKey::Background => c.background = value.clone(),
                ColorKey::Card => c.card = value.clone(),
            }
        }
    }

    pub fn reset_colors(&mut self) {
        self.custom_colors = CustomColors::default();
        self.accent_color = DEFAULT_ACCENT.to_string();
    }

    /// The accent in effect: the custom accent if set, else `accent_color`.
    pub fn accent(&self) -> &str {
        if self.custom_colors.accent.is_empty() {
            &self.accent_color
        } else {
            &self.custom_colors.accent
        }
    }
}

/// Parses `#rrggbb` into its components.
pub fn parse_hex_color(s: &str) -> Option<(u8, u8, u8)> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accent_override_tracks_accent_color() {
        let mut s = Settings::default();
        s.apply(&SettingsPatch {
            color: Some((ColorKey::Accent, "#ff0000".into())),
            ..SettingsPatch::default()
        });
        assert_eq!(s.accent_color, "#ff0000");
        assert_eq!(s.accent(), "#ff0000");

        s.apply(&SettingsPatch {
            color: Some((ColorKey::Card, "#101010".into())),
            theme: Some(Theme::Dark),
            ..SettingsPatch::default()
        });
        assert_eq!(s.custom_colors.card, "#101010");
        assert_eq!(s.theme, Theme::Dark);

        s.reset_colors();
        assert_eq!(s.accent(), DEFAULT_ACCENT);
        assert!(s.custom_colors.card.is_empty());
        // theme is not a color
        assert_eq!(s.theme, Theme::Dark);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let s: Settings = serde_json::from_str(r#"{"theme":"dark"}"#).unwrap();
        assert_eq!(s.theme, Theme::Dark);
        assert!(s.animations_enabled);
        assert_eq!(s.accent(), DEFAULT_ACCENT);
    }

    #[test]
    fn hex_colors() {
        assert_eq!(parse_hex_color("#6366f1"), Some((0x63, 0x66, 0xf1)));
        assert_eq!(parse_hex_color("6366f1"), None);
        assert_eq!(parse_hex_color("#xyz"), None);
    }
}
