//! # TitleBar Component
//!
//! Top status bar showing the window title and transient status.
//!
//! ## Props-in-Struct Pattern
//!
//! Props are stored as struct fields rather than passed to `render()`, so the
//! bar fits the fixed `Component::render` signature:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(tui.title(), app.theme.current_theme(), status);
//! title_bar.render(frame, area);
//! ```
//!
//! ## Conditional Formatting
//!
//! 1. **Status message**: `"Home - Learning App | navigation to /x was not completed"`
//! 2. **Default**: `"Home - Learning App"`
//!
//! The theme name is right-aligned and dropped first when space runs out.

use crate::core::theme::Theme;
use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

/// Top status bar component.
pub struct TitleBar {
    /// Window title as maintained by the router
    pub title: String,
    /// Theme currently applied to the document
    pub theme: Theme,
    /// Status message (e.g. a failed navigation)
    pub status_message: String,
}

impl TitleBar {
    pub fn new(title: String, theme: Theme, status_message: String) -> Self {
        Self {
            title,
            theme,
            status_message,
        }
    }

    fn title_text(&self) -> String {
        if self.status_message.is_empty() {
            self.title.clone()
        } else {
            format!("{} | {}", self.title, self.status_message)
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let theme_text = format!("{} theme ", self.theme);
        let theme_width = theme_text.chars().count() as u16;

        if area.width <= theme_width + 10 {
            frame.render_widget(Span::raw(self.title_text()), area);
            return;
        }

        let [title_area, theme_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(theme_width)]).areas(area);

        frame.render_widget(
            Span::styled(self.title_text(), Style::default().add_modifier(Modifier::BOLD)),
            title_area,
        );
        frame.render_widget(
            Line::from(Span::styled(theme_text, Style::default().add_modifier(Modifier::DIM))),
            theme_area,
        );
    }
}
