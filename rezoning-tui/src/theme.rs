//! Parrot/neon theme tokens for the rezoning guide TUI.
//!
//! # Color Palette
//! - **Background**: Near-black / deep charcoal (base layer)
//! - **Accent**: Electric cyan (focus, selected tab)
//! - **Positive**: Neon green (success notifications, stages residents can influence)
//! - **Warning**: Neon orange (search highlights, warnings)
//! - **Neutral**: Cool purple (decision tree chrome)
//! - **Muted**: Steel blue (hints, de-emphasized stages)

use ratatui::style::{Color, Modifier, Style};

use rezoning_core::NoticeLevel;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub neutral: Color,
    pub muted: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::parrot_neon()
    }
}

impl Theme {
    pub const fn parrot_neon() -> Self {
        Self {
            background: Color::Rgb(18, 18, 20),
            accent: Color::Rgb(0, 255, 255),
            positive: Color::Rgb(0, 255, 128),
            negative: Color::Rgb(255, 20, 147),
            warning: Color::Rgb(255, 140, 0),
            neutral: Color::Rgb(147, 112, 219),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
            text_secondary: Color::Rgb(170, 170, 170),
        }
    }

    /// Color for a notification by severity.
    pub fn notice_color(&self, level: NoticeLevel) -> Color {
        match level {
            NoticeLevel::Info => self.accent,
            NoticeLevel::Success => self.positive,
            NoticeLevel::Warning => self.warning,
        }
    }

    /// Text color for a timeline stage at `opacity`.
    pub fn stage_color(&self, opacity: f32) -> Color {
        if opacity < 1.0 {
            self.muted
        } else {
            self.text_primary
        }
    }
}

const THEME: Theme = Theme::parrot_neon();

// ── Style helpers ──

pub fn accent() -> Style {
    Style::default().fg(THEME.accent)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(THEME.positive)
}

pub fn warning() -> Style {
    Style::default().fg(THEME.warning)
}

pub fn neutral() -> Style {
    Style::default().fg(THEME.neutral)
}

pub fn muted() -> Style {
    Style::default().fg(THEME.muted)
}

pub fn text() -> Style {
    Style::default().fg(THEME.text_primary)
}

pub fn secondary() -> Style {
    Style::default().fg(THEME.text_secondary)
}

/// Search-highlighted text.
pub fn highlight() -> Style {
    Style::default()
        .fg(THEME.background)
        .bg(THEME.warning)
        .add_modifier(Modifier::BOLD)
}

/// The focused control.
pub fn focused() -> Style {
    Style::default()
        .fg(THEME.background)
        .bg(THEME.accent)
        .add_modifier(Modifier::BOLD)
}

pub fn notice(level: NoticeLevel) -> Style {
    Style::default().fg(THEME.notice_color(level))
}

pub fn stage(opacity: f32) -> Style {
    Style::default().fg(THEME.stage_color(opacity))
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}
