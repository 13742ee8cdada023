//! Theme system for the note wall
//!
//! Provides:
//! - Theme struct with all UI colors
//! - Built-in presets (keep, midnight, nord, gruvbox)
//! - Hex color parsing
//! - [`StyleRegistry`], the resolved styles handed to widgets at construction

use ratatui::style::{Color, Modifier, Style};
use thiserror::Error;

/// Theme colors for the UI
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Card background
    pub card_bg: Color,
    /// Card text
    pub card_fg: Color,
    /// Background of the active card
    pub active_bg: Color,
    /// Text of the active card
    pub active_fg: Color,
    /// Background of selected cards
    pub selected_bg: Color,
    /// Text of selected cards
    pub selected_fg: Color,
    /// Archived/pinned glyphs in the title row
    pub status_fg: Color,
    pub status_bg: Color,
    /// Status bar text
    pub bar_fg: Color,
    /// Refresh errors in the status bar
    pub error_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::keep()
    }
}

impl Theme {
    /// Yellow paper cards, black on white for the active one
    pub fn keep() -> Self {
        Self {
            card_bg: Color::Yellow,
            card_fg: Color::Black,
            active_bg: Color::White,
            active_fg: Color::Black,
            selected_bg: Color::Cyan,
            selected_fg: Color::Black,
            status_fg: Color::Black,
            status_bg: Color::White,
            bar_fg: Color::DarkGray,
            error_fg: Color::Red,
        }
    }

    /// Dark blue wall, pale cards stand out when active
    pub fn midnight() -> Self {
        Self {
            card_bg: Color::Rgb(25, 32, 56),       // #192038
            card_fg: Color::Rgb(208, 214, 230),    // #d0d6e6
            active_bg: Color::Rgb(58, 72, 120),    // #3a4878
            active_fg: Color::Rgb(244, 246, 252),  // #f4f6fc
            selected_bg: Color::Rgb(112, 88, 160), // #7058a0
            selected_fg: Color::Rgb(244, 246, 252),
            status_fg: Color::Rgb(242, 201, 76),   // #f2c94c
            status_bg: Color::Rgb(58, 72, 120),
            bar_fg: Color::Rgb(140, 150, 178),     // #8c96b2
            error_fg: Color::Rgb(235, 87, 87),     // #eb5757
        }
    }

    pub fn nord() -> Self {
        Self {
            card_bg: Color::Rgb(59, 66, 82),       // #3b4252 (nord1)
            card_fg: Color::Rgb(236, 239, 244),    // #eceff4 (nord6)
            active_bg: Color::Rgb(76, 86, 106),    // #4c566a (nord3)
            active_fg: Color::Rgb(236, 239, 244),
            selected_bg: Color::Rgb(94, 129, 172), // #5e81ac (nord10)
            selected_fg: Color::Rgb(236, 239, 244),
            status_fg: Color::Rgb(136, 192, 208),  // #88c0d0 (nord8)
            status_bg: Color::Rgb(76, 86, 106),
            bar_fg: Color::Rgb(216, 222, 233),     // #d8dee9 (nord4)
            error_fg: Color::Rgb(191, 97, 106),    // #bf616a (nord11)
        }
    }

    pub fn gruvbox() -> Self {
        Self {
            card_bg: Color::Rgb(60, 56, 54),       // #3c3836 (bg1)
            card_fg: Color::Rgb(235, 219, 178),    // #ebdbb2 (fg)
            active_bg: Color::Rgb(80, 73, 69),     // #504945 (bg2)
            active_fg: Color::Rgb(251, 241, 199),  // #fbf1c7 (fg0)
            selected_bg: Color::Rgb(102, 92, 84),  // #665c54 (bg3)
            selected_fg: Color::Rgb(251, 241, 199),
            status_fg: Color::Rgb(250, 189, 47),   // #fabd2f (bright yellow)
            status_bg: Color::Rgb(80, 73, 69),
            bar_fg: Color::Rgb(168, 153, 132),     // #a89984 (gray)
            error_fg: Color::Rgb(251, 73, 52),     // #fb4934 (bright red)
        }
    }

    /// Load theme from preset name
    pub fn from_preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "keep" | "default" => Some(Self::keep()),
            "midnight" => Some(Self::midnight()),
            "nord" => Some(Self::nord()),
            "gruvbox" | "gruvbox-dark" | "gruvbox_dark" => Some(Self::gruvbox()),
            _ => None,
        }
    }
}

/// Background treatment of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    Plain,
    Active,
    Selected,
}

impl Highlight {
    /// Selected wins over active
    pub fn from_flags(active: bool, selected: bool) -> Self {
        if selected {
            Highlight::Selected
        } else if active {
            Highlight::Active
        } else {
            Highlight::Plain
        }
    }
}

/// Named styles shared by the whole widget tree
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleRegistry {
    pub plain: Style,
    pub active: Style,
    pub selected: Style,
    /// Archived/pinned glyph pair
    pub status: Style,
    /// Layered over the card background for the title
    pub title: Style,
    pub bar: Style,
    pub error: Style,
}

impl StyleRegistry {
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            plain: Style::default().fg(theme.card_fg).bg(theme.card_bg),
            active: Style::default().fg(theme.active_fg).bg(theme.active_bg),
            selected: Style::default().fg(theme.selected_fg).bg(theme.selected_bg),
            status: Style::default().fg(theme.status_fg).bg(theme.status_bg),
            title: Style::default().add_modifier(Modifier::UNDERLINED),
            bar: Style::default().fg(theme.bar_fg),
            error: Style::default().fg(theme.error_fg).add_modifier(Modifier::BOLD),
        }
    }

    pub fn background(&self, highlight: Highlight) -> Style {
        match highlight {
            Highlight::Plain => self.plain,
            Highlight::Active => self.active,
            Highlight::Selected => self.selected,
        }
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::from_theme(&Theme::default())
    }
}

/// Parse hex color string to Color
/// Supports: #rrggbb, #rgb, rrggbb, rgb, #rrggbbaa (alpha ignored)
pub fn parse_hex_color(s: &str) -> Result<Color, ColorError> {
    let s = s.trim().trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>| {
        s.get(range)
            .and_then(|hex| u8::from_str_radix(hex, 16).ok())
            .ok_or(ColorError::InvalidHex)
    };

    match s.len() {
        3 => Ok(Color::Rgb(channel(0..1)? * 17, channel(1..2)? * 17, channel(2..3)? * 17)),
        6 | 8 => Ok(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        _ => Err(ColorError::InvalidLength),
    }
}

/// Color parsing error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("invalid color length (expected 3, 6, or 8 hex chars)")]
    InvalidLength,
    #[error("invalid hex character")]
    InvalidHex,
}

/// Serde deserializer for optional hex colors
pub mod serde_color {
    use super::*;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<Color>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let opt: Option<String> = Option::deserialize(deserializer)?;
        opt.map(|s| parse_hex_color(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_6() {
        assert_eq!(parse_hex_color("#ff0000"), Ok(Color::Rgb(255, 0, 0)));
        assert_eq!(parse_hex_color("00ff00"), Ok(Color::Rgb(0, 255, 0)));
    }

    #[test]
    fn test_parse_hex_3_and_8() {
        assert_eq!(parse_hex_color("#f00"), Ok(Color::Rgb(255, 0, 0)));
        assert_eq!(parse_hex_color("#0d1116ff"), Ok(Color::Rgb(13, 17, 22)));
    }

    #[test]
    fn test_parse_hex_invalid() {
        assert_eq!(parse_hex_color("#gg0000"), Err(ColorError::InvalidHex));
        assert_eq!(parse_hex_color("#ff00"), Err(ColorError::InvalidLength));
        // multi-byte input must not panic on slicing
        assert!(parse_hex_color("ééé").is_err());
    }

    #[test]
    fn test_presets() {
        assert_eq!(Theme::from_preset("Keep"), Some(Theme::keep()));
        assert_eq!(Theme::from_preset("midnight"), Some(Theme::midnight()));
        assert!(Theme::from_preset("nord").is_some());
        assert!(Theme::from_preset("gruvbox-dark").is_some());
        assert!(Theme::from_preset("nonexistent").is_none());
    }

    #[test]
    fn test_highlight_precedence() {
        assert_eq!(Highlight::from_flags(false, false), Highlight::Plain);
        assert_eq!(Highlight::from_flags(true, false), Highlight::Active);
        assert_eq!(Highlight::from_flags(true, true), Highlight::Selected);
        assert_eq!(Highlight::from_flags(false, true), Highlight::Selected);

        let styles = StyleRegistry::default();
        assert_eq!(styles.background(Highlight::Active).bg, Some(Color::White));
        assert_eq!(styles.background(Highlight::Plain).bg, Some(Color::Yellow));
    }
}
