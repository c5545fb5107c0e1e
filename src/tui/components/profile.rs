//! # Profile Page
//!
//! The sample user's details, counters, and preferences.

use log::info;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::core::content::{SAMPLE_USER, UserProfile};
use crate::core::lifecycle::{LifecycleError, LifecycleState};
use crate::tui::component::{Component, Lifecycle};
use crate::tui::components::Page;

pub struct ProfilePage {
    user: UserProfile,
    lifecycle: LifecycleState,
}

impl ProfilePage {
    pub fn new() -> Self {
        Self::with_user(SAMPLE_USER)
    }

    pub fn with_user(user: UserProfile) -> Self {
        Self {
            user,
            lifecycle: LifecycleState::default(),
        }
    }

    /// Up to two uppercase initials, e.g. "JD" for "John Developer".
    pub fn initials(&self) -> String {
        self.user
            .name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }
}

impl Default for ProfilePage {
    fn default() -> Self {
        Self::new()
    }
}

fn field<'a>(label: &'a str, value: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:<14}", label), Style::default().add_modifier(Modifier::DIM)),
        Span::raw(value),
    ])
}

impl Lifecycle for ProfilePage {
    fn start(&mut self) -> Result<(), LifecycleError> {
        self.lifecycle.activate()?;
        info!("Profile initialized");
        Ok(())
    }

    fn stop(&mut self) -> Result<(), LifecycleError> {
        self.lifecycle.deactivate()
    }
}

impl Page for ProfilePage {
    fn route(&self) -> &'static str {
        "/profile"
    }
}

impl Component for ProfilePage {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [header_area, body_area] =
            Layout::vertical([Constraint::Length(5), Constraint::Min(0)]).areas(area);
        let [stats_area, preferences_area] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(body_area);

        let header = Paragraph::new(vec![
            Line::from(vec![
                Span::styled(
                    format!("[{}] ", self.initials()),
                    Style::default().add_modifier(Modifier::REVERSED),
                ),
                Span::styled(self.user.name, Style::default().add_modifier(Modifier::BOLD)),
            ]),
            Line::from(self.user.email),
            Line::from(Span::styled(
                self.user.role,
                Style::default().add_modifier(Modifier::ITALIC),
            )),
        ])
        .block(Block::bordered().title(" Profile "));
        frame.render_widget(header, header_area);

        let stats = Paragraph::new(vec![
            field("Projects", self.user.projects_completed.to_string()),
            field("Tasks", self.user.tasks_completed.to_string()),
            field("Experience", format!("{} XP", self.user.experience_points)),
        ])
        .block(Block::bordered().title(" Statistics "));
        frame.render_widget(stats, stats_area);

        let notifications = if self.user.notifications {
            "Enabled"
        } else {
            "Disabled"
        };
        let preferences = Paragraph::new(vec![
            field("Notifications", notifications.to_string()),
            field("Language", self.user.language.to_string()),
            field("Timezone", self.user.timezone.to_string()),
        ])
        .block(Block::bordered().title(" Preferences "));
        frame.render_widget(preferences, preferences_area);
    }
}
