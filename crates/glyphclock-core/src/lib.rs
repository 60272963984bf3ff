//! Core types shared by the glyphclock crates.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Placeholder clock text used when no display text is available.
pub const DEFAULT_CLOCK_TEXT: &str = "00:00:00:000";

/// Time format for the clock display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeFormat {
    #[default]
    TwentyFourHour,
    TwelveHour,
}

impl TimeFormat {
    /// Toggle between 12-hour and 24-hour format.
    pub fn toggle(self) -> Self {
        match self {
            TimeFormat::TwentyFourHour => TimeFormat::TwelveHour,
            TimeFormat::TwelveHour => TimeFormat::TwentyFourHour,
        }
    }
}

/// Color theme for the clock display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorTheme {
    #[default]
    Cyan,
    Green,
    White,
    Magenta,
    Yellow,
    Red,
    Blue,
}

impl ColorTheme {
    /// Cycle to the next color theme.
    pub fn next(self) -> Self {
        match self {
            ColorTheme::Cyan => ColorTheme::Green,
            ColorTheme::Green => ColorTheme::Magenta,
            ColorTheme::Magenta => ColorTheme::Yellow,
            ColorTheme::Yellow => ColorTheme::Red,
            ColorTheme::Red => ColorTheme::Blue,
            ColorTheme::Blue => ColorTheme::White,
            ColorTheme::White => ColorTheme::Cyan,
        }
    }

    /// Convert theme to a ratatui color.
    pub fn color(self) -> Color {
        match self {
            ColorTheme::Cyan => Color::Cyan,
            ColorTheme::Green => Color::Green,
            ColorTheme::White => Color::White,
            ColorTheme::Magenta => Color::Magenta,
            ColorTheme::Yellow => Color::Yellow,
            ColorTheme::Red => Color::Red,
            ColorTheme::Blue => Color::Blue,
        }
    }
}

/// Background effect drawn behind the clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EffectKind {
    None,
    #[default]
    Matrix,
    Binary,
    Bounce,
    Fire,
    Rain,
    Snow,
    Wave,
    Vortex,
    Space,
    Pulse,
    Lightning,
    Glitch,
    Quantum,
}

impl EffectKind {
    /// Every effect in cycling order.
    pub const ALL: [EffectKind; 14] = [
        EffectKind::None,
        EffectKind::Matrix,
        EffectKind::Binary,
        EffectKind::Bounce,
        EffectKind::Fire,
        EffectKind::Rain,
        EffectKind::Snow,
        EffectKind::Wave,
        EffectKind::Vortex,
        EffectKind::Space,
        EffectKind::Pulse,
        EffectKind::Lightning,
        EffectKind::Glitch,
        EffectKind::Quantum,
    ];

    fn position(self) -> usize {
        Self::ALL.iter().position(|k| *k == self).unwrap_or(0)
    }

    /// Cycle to the next effect.
    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    /// Cycle to the previous effect.
    pub fn prev(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Short display name.
    pub fn name(self) -> &'static str {
        match self {
            EffectKind::None => "none",
            EffectKind::Matrix => "matrix",
            EffectKind::Binary => "binary",
            EffectKind::Bounce => "bounce",
            EffectKind::Fire => "fire",
            EffectKind::Rain => "rain",
            EffectKind::Snow => "snow",
            EffectKind::Wave => "wave",
            EffectKind::Vortex => "vortex",
            EffectKind::Space => "space",
            EffectKind::Pulse => "pulse",
            EffectKind::Lightning => "lightning",
            EffectKind::Glitch => "glitch",
            EffectKind::Quantum => "quantum",
        }
    }

    /// Whether the effect draws the current clock text as particles.
    pub fn uses_clock_text(self) -> bool {
        matches!(self, EffectKind::Bounce | EffectKind::Quantum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_cycle_visits_every_kind() {
        let mut kind = EffectKind::None;
        for _ in 0..EffectKind::ALL.len() {
            kind = kind.next();
        }
        assert_eq!(kind, EffectKind::None);
        assert_eq!(EffectKind::Matrix.prev(), EffectKind::None);
        assert_eq!(EffectKind::None.prev(), EffectKind::Quantum);
    }

    #[test]
    fn test_clock_text_consumers() {
        assert!(EffectKind::Bounce.uses_clock_text());
        assert!(EffectKind::Quantum.uses_clock_text());
        assert!(!EffectKind::Fire.uses_clock_text());
    }

    #[test]
    fn test_time_format_toggle() {
        assert_eq!(TimeFormat::TwentyFourHour.toggle(), TimeFormat::TwelveHour);
        assert_eq!(TimeFormat::TwelveHour.toggle().toggle(), TimeFormat::TwelveHour);
    }
}
