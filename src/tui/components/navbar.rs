//! # Navbar Component
//!
//! The top navigation bar: menu items, a theme toggle, and a loading hint.
//!
//! ## Store Bindings
//!
//! ```text
//!   ThemeStore ──subscribe──┐
//!                           ├──► mirror (Rc<RefCell<NavbarMirror>>) ──► render
//!   NavigationStore ────────┘
//!        ▲      subscribe_route / subscribe_navigating
//!        │
//!        └── on_navigation_item_click / on_back / on_toggle_theme
//! ```
//!
//! The navbar never writes store state itself. It forwards user intent and
//! mirrors whatever the stores publish back.
//!
//! ## Lifecycle
//!
//! `start()` takes the menu snapshot and acquires three subscriptions (theme,
//! in-flight flag, route). `stop()` disposes all three; nothing the stores do
//! afterwards reaches this navbar.

use std::cell::RefCell;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use log::{debug, info};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::core::lifecycle::{LifecycleError, LifecycleState};
use crate::core::navigation::{NavigateOptions, NavigationError, NavigationItem, NavigationStore};
use crate::core::observable::Subscription;
use crate::core::theme::{Theme, ThemeStore};
use crate::tui::component::{Component, Lifecycle};
use crate::tui::palette::Palette;

/// Last values published by the stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavbarMirror {
    pub current_theme: Theme,
    pub is_navigating: bool,
    pub current_route: String,
}

impl Default for NavbarMirror {
    fn default() -> Self {
        Self {
            current_theme: Theme::Light,
            is_navigating: false,
            current_route: String::from("/"),
        }
    }
}

pub struct Navbar {
    theme: Rc<ThemeStore>,
    navigation: Rc<NavigationStore>,
    navigation_items: Vec<NavigationItem>,
    mirror: Rc<RefCell<NavbarMirror>>,
    subscriptions: Vec<Subscription>,
    lifecycle: LifecycleState,
    focused: usize,
}

impl Navbar {
    pub fn new(theme: Rc<ThemeStore>, navigation: Rc<NavigationStore>) -> Self {
        Self {
            theme,
            navigation,
            navigation_items: Vec::new(),
            mirror: Rc::new(RefCell::new(NavbarMirror::default())),
            subscriptions: Vec::new(),
            lifecycle: LifecycleState::default(),
            focused: 0,
        }
    }

    pub fn navigation_items(&self) -> &[NavigationItem] {
        &self.navigation_items
    }

    pub fn mirror(&self) -> NavbarMirror {
        self.mirror.borrow().clone()
    }

    pub fn current_theme(&self) -> Theme {
        self.mirror.borrow().current_theme
    }

    pub fn is_navigating(&self) -> bool {
        self.mirror.borrow().is_navigating
    }

    pub fn lifecycle(&self) -> LifecycleState {
        self.lifecycle
    }

    pub fn on_toggle_theme(&self) {
        self.theme.toggle_theme();
    }

    /// Navigate to `item`. The returned future owns everything it needs, so
    /// the caller may spawn it and keep handling input.
    pub fn on_navigation_item_click(
        &self,
        item: &NavigationItem,
    ) -> LocalBoxFuture<'static, Result<(), NavigationError>> {
        debug!("Navbar click: {}", item.path);
        let navigation = Rc::clone(&self.navigation);
        let path = item.path.clone();
        async move {
            navigation
                .navigate_to(&path, NavigateOptions::default())
                .await
        }
        .boxed_local()
    }

    pub fn on_back(&self) -> LocalBoxFuture<'static, Result<bool, NavigationError>> {
        let navigation = Rc::clone(&self.navigation);
        async move { navigation.go_back().await }.boxed_local()
    }

    pub fn is_route_active(&self, path: &str) -> bool {
        self.navigation.is_route_active(path)
    }

    /// Icon for the theme the toggle would switch to.
    pub fn theme_icon(&self) -> &'static str {
        match self.current_theme() {
            Theme::Dark => "☀️",
            Theme::Light => "🌙",
        }
    }

    pub fn theme_label(&self) -> &'static str {
        match self.current_theme() {
            Theme::Dark => "Light Mode",
            Theme::Light => "Dark Mode",
        }
    }

    /// Stable identity for list rendering: the item's path.
    pub fn track_by_path<'a>(&self, _index: usize, item: &'a NavigationItem) -> &'a str {
        &item.path
    }

    pub fn focused_index(&self) -> usize {
        self.focused
    }

    pub fn focused_item(&self) -> Option<&NavigationItem> {
        self.navigation_items.get(self.focused)
    }

    pub fn focus_next(&mut self) {
        if !self.navigation_items.is_empty() {
            self.focused = (self.focused + 1) % self.navigation_items.len();
        }
    }

    pub fn focus_previous(&mut self) {
        if !self.navigation_items.is_empty() {
            let len = self.navigation_items.len();
            self.focused = (self.focused + len - 1) % len;
        }
    }

    /// Focus the item at `index`. Returns false when there is no such item.
    pub fn focus(&mut self, index: usize) -> bool {
        if index < self.navigation_items.len() {
            self.focused = index;
            true
        } else {
            false
        }
    }

    fn item_spans(&self, mirror: &NavbarMirror, palette: &Palette) -> Vec<Span<'static>> {
        let mut spans = Vec::with_capacity(self.navigation_items.len() * 2);
        for (index, item) in self.navigation_items.iter().enumerate() {
            let text = match &item.icon {
                Some(icon) => format!(" {} {} ", icon, item.label),
                None => format!(" {} ", item.label),
            };

            let mut style = Style::default();
            if item.path == mirror.current_route {
                style = style.fg(palette.accent).add_modifier(Modifier::BOLD);
            }
            if index == self.focused {
                style = style.add_modifier(Modifier::REVERSED);
            }

            spans.push(Span::styled(text, style));
            spans.push(Span::raw(" "));
        }
        spans
    }
}

impl Lifecycle for Navbar {
    fn start(&mut self) -> Result<(), LifecycleError> {
        self.lifecycle.activate()?;
        self.navigation_items = self.navigation.navigation_items();

        let mirror = Rc::clone(&self.mirror);
        self.subscriptions.push(self.theme.subscribe(move |theme| {
            mirror.borrow_mut().current_theme = theme;
        }));

        let mirror = Rc::clone(&self.mirror);
        self.subscriptions
            .push(self.navigation.subscribe_navigating(move |navigating| {
                mirror.borrow_mut().is_navigating = navigating;
            }));

        let mirror = Rc::clone(&self.mirror);
        self.subscriptions
            .push(self.navigation.subscribe_route(move |route| {
                mirror.borrow_mut().current_route = route.to_string();
            }));

        if let Some(index) = self
            .navigation_items
            .iter()
            .position(|item| item.path == self.mirror.borrow().current_route)
        {
            self.focused = index;
        }

        info!("Navbar started with {} items", self.navigation_items.len());
        Ok(())
    }

    fn stop(&mut self) -> Result<(), LifecycleError> {
        self.lifecycle.deactivate()?;
        for mut subscription in self.subscriptions.drain(..) {
            subscription.dispose();
        }
        info!("Navbar stopped");
        Ok(())
    }
}

impl Component for Navbar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mirror = self.mirror();
        let palette = Palette::for_theme(mirror.current_theme);

        let block = Block::bordered()
            .title(" 🔦 Beacon ")
            .border_style(Style::default().fg(palette.muted));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut toggle = Vec::new();
        if mirror.is_navigating {
            toggle.push(Span::styled(
                "Loading... ",
                Style::default()
                    .fg(palette.muted)
                    .add_modifier(Modifier::ITALIC),
            ));
        }
        toggle.push(Span::styled(
            format!("[{} {}]", self.theme_icon(), self.theme_label()),
            Style::default().fg(palette.accent),
        ));
        let toggle = Line::from(toggle);
        let toggle_width = toggle.width() as u16;

        let [items_area, toggle_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(toggle_width)])
                .areas(inner);

        frame.render_widget(
            Paragraph::new(Line::from(self.item_spans(&mirror, &palette))),
            items_area,
        );
        frame.render_widget(Paragraph::new(toggle), toggle_area);
    }
}
