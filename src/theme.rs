use std::fs;
use std::path::Path;

use ratatui::style::Color;
use serde::Deserialize;

use crate::agent::StepKind;
use crate::planner::{Priority, TaskStatus};

pub const DEFAULT_THEME_FILE: &str = "theme.toml";

#[derive(Debug, Clone)]
pub struct Theme {
    pub tab_bar_bg: Color,
    pub body_bg: Color,
    pub panel_bg: Color,
    pub input_bg: Color,
    pub status_bg: Color,
    pub text_fg: Color,
    pub muted_fg: Color,
    pub active_fg: Color,
    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            tab_bar_bg: Color::Rgb(44, 44, 44),
            body_bg: Color::Rgb(54, 54, 54),
            panel_bg: Color::Rgb(48, 48, 48),
            input_bg: Color::Rgb(62, 62, 62),
            status_bg: Color::Rgb(36, 36, 36),
            text_fg: Color::Rgb(225, 225, 225),
            muted_fg: Color::Rgb(185, 185, 185),
            active_fg: Color::Rgb(255, 255, 255),
            accent: Color::Rgb(102, 126, 234),
        }
    }
}

impl Theme {
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path_ref = path.as_ref();
        match fs::read_to_string(path_ref) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(theme) => theme,
                Err(err) => {
                    tracing::warn!(
                        path = %path_ref.display(),
                        error = %err,
                        "failed to parse theme file; using defaults"
                    );
                    Self::default()
                }
            },
            Err(err) => {
                tracing::debug!(
                    path = %path_ref.display(),
                    error = %err,
                    "theme file not readable; using defaults"
                );
                Self::default()
            }
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        let cfg: ThemeToml = toml::from_str(s)?;
        let defaults = Self::default();
        let pick = |value: Option<RgbToml>, fallback: Color| {
            value.map(|rgb| rgb.to_color()).unwrap_or(fallback)
        };
        Ok(Self {
            tab_bar_bg: pick(cfg.colors.tab_bar_bg, defaults.tab_bar_bg),
            body_bg: pick(cfg.colors.body_bg, defaults.body_bg),
            panel_bg: pick(cfg.colors.panel_bg, defaults.panel_bg),
            input_bg: pick(cfg.colors.input_bg, defaults.input_bg),
            status_bg: pick(cfg.colors.status_bg, defaults.status_bg),
            text_fg: pick(cfg.colors.text_fg, defaults.text_fg),
            muted_fg: pick(cfg.colors.muted_fg, defaults.muted_fg),
            active_fg: pick(cfg.colors.active_fg, defaults.active_fg),
            accent: pick(cfg.colors.accent, defaults.accent),
        })
    }

    pub fn step_color(&self, kind: StepKind) -> Color {
        match kind {
            StepKind::Thought => Color::Rgb(245, 190, 60),
            StepKind::Action => Color::Rgb(80, 185, 230),
            StepKind::Response => Color::Rgb(80, 190, 100),
            StepKind::User => self.accent,
            StepKind::Error => Color::Rgb(239, 68, 68),
        }
    }
}

pub fn status_color(status: TaskStatus) -> Color {
    match status {
        TaskStatus::Pending => Color::Rgb(0xfb, 0xbf, 0x24),
        TaskStatus::InProgress => Color::Rgb(0x3b, 0x82, 0xf6),
        TaskStatus::Completed => Color::Rgb(0x10, 0xb9, 0x81),
    }
}

pub fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Rgb(0xef, 0x44, 0x44),
        Priority::Medium => Color::Rgb(0xf5, 0x9e, 0x0b),
        Priority::Low => Color::Rgb(0x6b, 0x72, 0x80),
    }
}

#[derive(Debug, Deserialize)]
struct ThemeToml {
    colors: ThemeColorsToml,
}

#[derive(Debug, Deserialize)]
struct ThemeColorsToml {
    tab_bar_bg: Option<RgbToml>,
    body_bg: Option<RgbToml>,
    panel_bg: Option<RgbToml>,
    input_bg: Option<RgbToml>,
    status_bg: Option<RgbToml>,
    text_fg: Option<RgbToml>,
    muted_fg: Option<RgbToml>,
    active_fg: Option<RgbToml>,
    accent: Option<RgbToml>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct RgbToml {
    r: u8,
    g: u8,
    b: u8,
}

impl RgbToml {
    fn to_color(self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}
