//! Terminal colors for each theme.

use ratatui::style::{Color, Style};

use crate::core::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub accent: Color,
    pub muted: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                background: Color::White,
                foreground: Color::Black,
                accent: Color::Blue,
                muted: Color::DarkGray,
            },
            Theme::Dark => Self {
                background: Color::Black,
                foreground: Color::White,
                accent: Color::LightCyan,
                muted: Color::Gray,
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }
}
