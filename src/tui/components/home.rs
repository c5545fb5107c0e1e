//! # Home Page
//!
//! Welcome text, the feature list, and a live readout of the current theme.
//! The only page that listens to a store: it subscribes to the `ThemeStore`
//! on `start()` and drops the subscription on `stop()`.

use std::cell::Cell;
use std::rc::Rc;

use log::info;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::core::content::{APP_DESCRIPTION, FEATURES, welcome_message};
use crate::core::lifecycle::{LifecycleError, LifecycleState};
use crate::core::observable::Subscription;
use crate::core::theme::{Theme, ThemeStore};
use crate::tui::component::{Component, Lifecycle};
use crate::tui::components::Page;

pub struct HomePage {
    theme: Rc<ThemeStore>,
    current_theme: Rc<Cell<Theme>>,
    subscription: Option<Subscription>,
    lifecycle: LifecycleState,
    /// Local hour used for the greeting
    hour: u32,
}

impl HomePage {
    pub fn new(theme: Rc<ThemeStore>, hour: u32) -> Self {
        Self {
            theme,
            current_theme: Rc::new(Cell::new(Theme::Light)),
            subscription: None,
            lifecycle: LifecycleState::default(),
            hour,
        }
    }

    pub fn current_theme(&self) -> Theme {
        self.current_theme.get()
    }

    pub fn welcome_message(&self) -> String {
        welcome_message(self.hour)
    }

    pub fn theme_status(&self) -> String {
        format!("Currently using {} theme", self.current_theme())
    }
}

impl Lifecycle for HomePage {
    fn start(&mut self) -> Result<(), LifecycleError> {
        self.lifecycle.activate()?;
        let current_theme = Rc::clone(&self.current_theme);
        self.subscription = Some(self.theme.subscribe(move |theme| current_theme.set(theme)));
        info!("Home page initialized");
        Ok(())
    }

    fn stop(&mut self) -> Result<(), LifecycleError> {
        self.lifecycle.deactivate()?;
        if let Some(mut subscription) = self.subscription.take() {
            subscription.dispose();
        }
        Ok(())
    }
}

impl Page for HomePage {
    fn route(&self) -> &'static str {
        "/home"
    }
}

impl Component for HomePage {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [hero_area, features_area] =
            Layout::vertical([Constraint::Length(6), Constraint::Min(0)]).areas(area);

        let hero = Paragraph::new(vec![
            Line::from(Span::styled(
                self.welcome_message(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(APP_DESCRIPTION),
            Line::from(""),
            Line::from(Span::styled(
                self.theme_status(),
                Style::default().add_modifier(Modifier::ITALIC),
            )),
        ])
        .block(Block::bordered().title(" Welcome "))
        .wrap(Wrap { trim: true });
        frame.render_widget(hero, hero_area);

        let mut lines = Vec::with_capacity(FEATURES.len() * 2 + 2);
        for feature in FEATURES {
            lines.push(Line::from(vec![
                Span::raw(format!("{} ", feature.icon)),
                Span::styled(feature.title, Style::default().add_modifier(Modifier::BOLD)),
            ]));
            lines.push(Line::from(Span::styled(
                format!("   {}", feature.description),
                Style::default().add_modifier(Modifier::DIM),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(
            "Get started: press 2 for the Dashboard or 3 for your Profile.",
        ));

        let features = Paragraph::new(lines)
            .block(Block::bordered().title(" Features "))
            .wrap(Wrap { trim: false });
        frame.render_widget(features, features_area);
    }
}
