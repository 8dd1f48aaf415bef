//! User preferences: theme and date format.

use serde::{Deserialize, Serialize};
use crate::theme::contrast_ratio;
use crate::Time;

/// How many custom themes are remembered.
pub const MAX_RECENT_THEMES: usize = 5;

/// Minimum contrast ratio considered readable (WCAG AA, normal text).
pub const MIN_READABLE_CONTRAST: f64 = 4.5;

/// Error parsing a preference from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Unknown theme mode
    #[error("unknown theme mode: {0}")]
    ThemeMode(String),

    /// Unknown date format
    #[error("unknown date format: {0}")]
    DateFormat(String),
}

/// User preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Selected theme
    pub theme: ThemeMode,

    /// Date rendering convention
    pub date_format: DateFormat,

    /// Active custom colours, used when `theme` is `Custom`
    #[serde(default)]
    pub custom_theme: Option<CustomTheme>,

    /// Recently used custom themes, most recent first
    #[serde(default)]
    pub recent_themes: Vec<CustomTheme>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: ThemeMode::Light,
            date_format: DateFormat::Us,
            custom_theme: None,
            recent_themes: Vec::new(),
        }
    }
}

impl Settings {
    /// Merge a partial update.
    ///
    /// A supplied custom theme also goes to the front of `recent_themes`. If
    /// the same colour pair is already remembered it is moved rather than
    /// duplicated, and its timestamp refreshed to `now`.
    pub fn apply(&mut self, patch: SettingsPatch, now: Time) {
        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
        if let Some(date_format) = patch.date_format {
            self.date_format = date_format;
        }
        let Some(custom) = patch.custom_theme else {
            return;
        };

        match self.recent_themes.iter().position(|t| t.same_colors(&custom)) {
            Some(index) => {
                let mut existing = self.recent_themes.remove(index);
                existing.timestamp = now.timestamp_millis();
                self.recent_themes.insert(0, existing);
            }
            None => {
                self.recent_themes.insert(0, custom.clone());
                self.recent_themes.truncate(MAX_RECENT_THEMES);
            }
        }
        self.custom_theme = Some(custom);
    }

    /// Theme to render at the given local hour.
    pub fn effective_theme(&self, hour: u32) -> ThemeMode {
        if self.theme == ThemeMode::Custom && self.custom_theme.is_none() {
            return ThemeMode::Light;
        }
        self.theme.resolve(hour)
    }
}

/// Partial settings update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsPatch {
    pub theme: Option<ThemeMode>,
    pub date_format: Option<DateFormat>,
    pub custom_theme: Option<CustomTheme>,
}

/// Theme selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    /// Dark between 21:00 and 09:00, light otherwise
    Auto,
    Custom,
}

impl ThemeMode {
    /// Resolve `Auto` against a local hour (0-23).
    pub fn resolve(self, hour: u32) -> ThemeMode {
        match self {
            ThemeMode::Auto if hour >= 21 || hour < 9 => ThemeMode::Dark,
            ThemeMode::Auto => ThemeMode::Light,
            other => other,
        }
    }

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::Auto => "auto",
            ThemeMode::Custom => "custom",
        }
    }
}

impl std::str::FromStr for ThemeMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            "auto" => Ok(ThemeMode::Auto),
            "custom" => Ok(ThemeMode::Custom),
            _ => Err(ParseError::ThemeMode(s.to_string())),
        }
    }
}

/// Date rendering convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateFormat {
    /// Month first: 03/14/2026, March 14, 2026
    #[serde(rename = "US")]
    Us,
    /// Day first: 14/03/2026, 14 March 2026
    #[serde(rename = "UK")]
    Uk,
}

impl DateFormat {
    fn short_pattern(self) -> &'static str {
        match self {
            DateFormat::Us => "%m/%d/%Y",
            DateFormat::Uk => "%d/%m/%Y",
        }
    }

    fn full_pattern(self) -> &'static str {
        match self {
            DateFormat::Us => "%B %-d, %Y",
            DateFormat::Uk => "%-d %B %Y",
        }
    }

    /// Short numeric form, optionally with a 12-hour time.
    pub fn format<Tz>(self, date: &chrono::DateTime<Tz>, include_time: bool) -> String
    where
        Tz: chrono::TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        Self::render(date, self.short_pattern(), include_time)
    }

    /// Long form with the month spelled out.
    pub fn format_full<Tz>(self, date: &chrono::DateTime<Tz>, include_time: bool) -> String
    where
        Tz: chrono::TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        Self::render(date, self.full_pattern(), include_time)
    }

    /// Short numeric form of a bare calendar day.
    pub fn format_day(self, day: chrono::NaiveDate) -> String {
        day.format(self.short_pattern()).to_string()
    }

    fn render<Tz>(date: &chrono::DateTime<Tz>, pattern: &str, include_time: bool) -> String
    where
        Tz: chrono::TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        if include_time {
            date.format(&format!("{pattern} %-I:%M %p")).to_string()
        } else {
            date.format(pattern).to_string()
        }
    }
}

impl std::str::FromStr for DateFormat {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "US" => Ok(DateFormat::Us),
            "UK" => Ok(DateFormat::Uk),
            _ => Err(ParseError::DateFormat(s.to_string())),
        }
    }
}

/// User-defined colour pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomTheme {
    /// Background colour (`#rrggbb`)
    pub background_color: String,

    /// Text colour (`#rrggbb`)
    pub text_color: String,

    /// Last use, milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl CustomTheme {
    /// Create a theme stamped with `now`.
    pub fn new(
        background_color: impl Into<String>,
        text_color: impl Into<String>,
        now: Time,
    ) -> Self {
        Self {
            background_color: background_color.into(),
            text_color: text_color.into(),
            timestamp: now.timestamp_millis(),
        }
    }

    /// Same colours, ignoring the timestamp.
    pub fn same_colors(&self, other: &CustomTheme) -> bool {
        self.background_color == other.background_color && self.text_color == other.text_color
    }

    /// Contrast between text and background.
    pub fn contrast(&self) -> f64 {
        contrast_ratio(&self.background_color, &self.text_color)
    }

    /// Whether text on this background is comfortably readable.
    pub fn is_readable(&self) -> bool {
        self.contrast() >= MIN_READABLE_CONTRAST
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn pick(bg: &str, text: &str, now: Time) -> SettingsPatch {
        SettingsPatch {
            custom_theme: Some(CustomTheme::new(bg, text, now)),
            ..Default::default()
        }
    }

    #[test]
    fn test_auto_theme_resolution() {
        assert_eq!(ThemeMode::Auto.resolve(8), ThemeMode::Dark);
        assert_eq!(ThemeMode::Auto.resolve(9), ThemeMode::Light);
        assert_eq!(ThemeMode::Auto.resolve(20), ThemeMode::Light);
        assert_eq!(ThemeMode::Auto.resolve(21), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.resolve(12), ThemeMode::Dark);
    }

    #[test]
    fn test_custom_without_colors_falls_back_to_light() {
        let settings = Settings {
            theme: ThemeMode::Custom,
            ..Default::default()
        };
        assert_eq!(settings.effective_theme(12), ThemeMode::Light);
    }

    #[test]
    fn test_new_custom_theme_goes_first() {
        let now = Utc::now();
        let mut settings = Settings::default();
        settings.apply(pick("#000000", "#ffffff", now), now);
        settings.apply(pick("#111111", "#eeeeee", now), now);

        assert_eq!(settings.recent_themes.len(), 2);
        assert_eq!(settings.recent_themes[0].background_color, "#111111");
        assert_eq!(
            settings.custom_theme.as_ref().map(|t| t.background_color.as_str()),
            Some("#111111")
        );
    }

    #[test]
    fn test_recent_themes_capped() {
        let now = Utc::now();
        let mut settings = Settings::default();
        for i in 0..8 {
            let bg = format!("#00000{}", i);
            settings.apply(pick(&bg, "#ffffff", now), now);
        }
        assert_eq!(settings.recent_themes.len(), MAX_RECENT_THEMES);
        assert_eq!(settings.recent_themes[0].background_color, "#000007");
    }

    #[test]
    fn test_reused_theme_moves_to_front_with_new_timestamp() {
        let earlier = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let later = earlier + Duration::hours(5);
        let mut settings = Settings::default();
        settings.apply(pick("#000000", "#ffffff", earlier), earlier);
        settings.apply(pick("#222222", "#dddddd", earlier), earlier);
        settings.apply(pick("#000000", "#ffffff", earlier), later);

        assert_eq!(settings.recent_themes.len(), 2);
        assert_eq!(settings.recent_themes[0].background_color, "#000000");
        assert_eq!(settings.recent_themes[0].timestamp, later.timestamp_millis());
    }

    #[test]
    fn test_patch_without_theme_keeps_recent_list() {
        let now = Utc::now();
        let mut settings = Settings::default();
        settings.apply(pick("#000000", "#ffffff", now), now);
        let patch = SettingsPatch {
            date_format: Some(DateFormat::Uk),
            ..Default::default()
        };
        settings.apply(patch, now);
        assert_eq!(settings.date_format, DateFormat::Uk);
        assert_eq!(settings.recent_themes.len(), 1);
    }

    #[test]
    fn test_date_formats() {
        let date = Utc.with_ymd_and_hms(2026, 3, 4, 15, 7, 0).unwrap();
        assert_eq!(DateFormat::Us.format(&date, false), "03/04/2026");
        assert_eq!(DateFormat::Uk.format(&date, false), "04/03/2026");
        assert_eq!(DateFormat::Us.format(&date, true), "03/04/2026 3:07 PM");
        assert_eq!(DateFormat::Us.format_full(&date, false), "March 4, 2026");
        assert_eq!(DateFormat::Uk.format_full(&date, false), "4 March 2026");
    }

    #[test]
    fn test_parse_preferences() {
        assert_eq!("Dark".parse::<ThemeMode>().unwrap(), ThemeMode::Dark);
        assert_eq!("uk".parse::<DateFormat>().unwrap(), DateFormat::Uk);
        assert!("sepia".parse::<ThemeMode>().is_err());
    }

    #[test]
    fn test_settings_wire_names() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["theme"], "light");
        assert_eq!(json["date_format"], "US");
    }

    #[test]
    fn test_readability() {
        let now = Utc::now();
        assert!(CustomTheme::new("#000000", "#ffffff", now).is_readable());
        assert!(!CustomTheme::new("#777777", "#888888", now).is_readable());
    }
}
