use colored::{Color, Colorize};
use std::path::Path;
use std::str::FromStr;

use crate::core::config::PaletteConfig;
use crate::core::error::ReportError;
use crate::core::severity::Severity;

/// Symbolic color role. The theme decides what each one looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Negative,
    Warning,
    Neutral,
    Base,
    Severity(Severity),
}

const DEFAULT_SEVERITY_COLORS: [Color; 5] = [
    Color::Green,
    Color::Cyan,
    Color::Yellow,
    Color::BrightRed,
    Color::Red,
];

#[derive(Debug, Clone)]
pub struct Theme {
    enabled: bool,
    positive: Color,
    negative: Color,
    warning: Color,
    neutral: Color,
    base: Color,
    severity: [Color; 5],
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            enabled: true,
            positive: Color::Green,
            negative: Color::Red,
            warning: Color::Yellow,
            neutral: Color::BrightBlack,
            base: Color::White,
            severity: DEFAULT_SEVERITY_COLORS,
        }
    }
}

impl Theme {
    /// Theme that emits text without escape codes.
    #[cfg(test)]
    pub fn plain() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn with_color(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Builds a theme from the `palette` section of the config file. Unset
    /// entries keep their defaults.
    pub fn from_palette(palette: &PaletteConfig, source: &Path) -> Result<Self, ReportError> {
        let mut theme = Self::default();
        let parse = |value: &Option<String>, fallback: Color| -> Result<Color, ReportError> {
            match value {
                Some(name) => Color::from_str(name).map_err(|_| ReportError::InvalidConfig {
                    path: source.to_path_buf(),
                    message: format!("unknown color '{name}'"),
                }),
                None => Ok(fallback),
            }
        };

        theme.positive = parse(&palette.positive, theme.positive)?;
        theme.negative = parse(&palette.negative, theme.negative)?;
        theme.warning = parse(&palette.warning, theme.warning)?;
        theme.neutral = parse(&palette.neutral, theme.neutral)?;
        theme.base = parse(&palette.base, theme.base)?;

        let levels = &palette.severity;
        let overrides = [
            &levels.none,
            &levels.low,
            &levels.medium,
            &levels.high,
            &levels.critical,
        ];
        for (slot, value) in theme.severity.iter_mut().zip(overrides) {
            *slot = parse(value, *slot)?;
        }
        Ok(theme)
    }

    pub fn color(&self, tone: Tone) -> Color {
        match tone {
            Tone::Positive => self.positive,
            Tone::Negative => self.negative,
            Tone::Warning => self.warning,
            Tone::Neutral => self.neutral,
            Tone::Base => self.base,
            Tone::Severity(level) => self.severity[level.ordinal() as usize],
        }
    }

    pub fn paint(&self, text: &str, tone: Tone) -> String {
        if !self.enabled {
            return text.to_string();
        }
        text.color(self.color(tone)).to_string()
    }

    pub fn bold(&self, text: &str, tone: Tone) -> String {
        if !self.enabled {
            return text.to_string();
        }
        text.color(self.color(tone)).bold().to_string()
    }
}
