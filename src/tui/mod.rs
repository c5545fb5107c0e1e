//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! turns keyboard events into calls on the navbar.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! ```text
//!   sync_page ──► draw_ui ──► drain events ──► TuiState::handle_event ──► Navbar
//!       ▲                                                                   │
//!       │                                                  spawn_local(navigation)
//!       │                                                                   │
//!   sleep(80ms) ◄── stores publish ◄─────────────────────────────────────────┘
//! ```
//!
//! Everything runs on one thread inside a `LocalSet`. Events are polled
//! without blocking; the loop then sleeps on the tokio timer, which is where
//! spawned navigations make progress. The frame is redrawn every tick;
//! ratatui only writes cells that changed.

pub mod component;
pub mod components;
pub mod event;
pub mod palette;
mod ui;

use std::cell::RefCell;
use std::future::Future;
use std::io::stdout;
use std::rc::Rc;
use std::time::Duration;

use chrono::Timelike;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use log::{error, info, warn};

use crate::core::lifecycle::LifecycleError;
use crate::core::navigation::NavigationStore;
use crate::core::observable::Subscription;
use crate::core::state::App;
use crate::core::theme::ThemeStore;
use crate::tui::component::Lifecycle;
use crate::tui::components::{Navbar, Page, page_for_route};
use crate::tui::event::{TuiEvent, poll_event_immediate};

const TICK: Duration = Duration::from_millis(80);

/// TUI-specific presentation state (not part of the stores)
pub struct TuiState {
    pub navbar: Navbar,
    /// Page for the current route; `None` until the first navigation lands
    pub page: Option<Box<dyn Page>>,
    status: Rc<RefCell<String>>,
    /// Window title as last published by the router
    title: Rc<RefCell<String>>,
    title_subscription: Subscription,
    theme: Rc<ThemeStore>,
    navigation: Rc<NavigationStore>,
}

impl TuiState {
    pub fn new(app: &App) -> Result<Self, LifecycleError> {
        let mut navbar = Navbar::new(app.theme.clone(), app.navigation.clone());
        navbar.start()?;

        let title = Rc::new(RefCell::new(String::new()));
        let title_subscription = {
            let title = Rc::clone(&title);
            app.router
                .subscribe_title(move |latest| *title.borrow_mut() = latest.clone())
        };

        Ok(Self {
            navbar,
            page: None,
            status: Rc::new(RefCell::new(String::new())),
            title,
            title_subscription,
            theme: app.theme.clone(),
            navigation: app.navigation.clone(),
        })
    }

    pub fn status_message(&self) -> String {
        self.status.borrow().clone()
    }

    pub fn title(&self) -> String {
        self.title.borrow().clone()
    }

    /// Swap the page when the current route has moved on.
    pub fn sync_page(&mut self, hour: u32) {
        let route = self.navigation.current_route();
        if self.page.as_ref().is_some_and(|page| page.route() == route) {
            return;
        }

        if let Some(mut previous) = self.page.take()
            && let Err(e) = previous.stop()
        {
            warn!("Failed to stop page {}: {}", previous.route(), e);
        }

        self.page = page_for_route(&route, &self.theme, hour);
        if let Some(page) = self.page.as_mut()
            && let Err(e) = page.start()
        {
            warn!("Failed to start page {}: {}", route, e);
        }
    }

    /// Apply one input event. Returns true when the app should quit.
    pub fn handle_event(&mut self, event: TuiEvent) -> bool {
        match event {
            TuiEvent::Quit => return true,
            TuiEvent::Resize => {}
            TuiEvent::FocusNext => self.navbar.focus_next(),
            TuiEvent::FocusPrevious => self.navbar.focus_previous(),
            TuiEvent::ToggleTheme => self.navbar.on_toggle_theme(),
            TuiEvent::Activate => self.open_focused(),
            TuiEvent::Jump(index) => {
                if self.navbar.focus(index) {
                    self.open_focused();
                }
            }
            TuiEvent::Back => {
                let back = self.navbar.on_back();
                self.spawn_with_status(async move {
                    match back.await {
                        Ok(true) => None,
                        Ok(false) => Some("Nothing to go back to".to_string()),
                        Err(e) => Some(e.to_string()),
                    }
                });
            }
        }
        false
    }

    /// Stop the page and navbar, releasing every store subscription.
    pub fn shutdown(&mut self) {
        if let Some(mut page) = self.page.take()
            && let Err(e) = page.stop()
        {
            warn!("Failed to stop page {}: {}", page.route(), e);
        }
        if let Err(e) = self.navbar.stop() {
            warn!("Failed to stop navbar: {}", e);
        }
        self.title_subscription.dispose();
    }

    fn open_focused(&self) {
        let Some(item) = self.navbar.focused_item() else {
            return;
        };
        let navigation = self.navbar.on_navigation_item_click(item);
        self.spawn_with_status(async move { navigation.await.err().map(|e| e.to_string()) });
    }

    /// Run `task` on the local set; its output replaces the status line.
    fn spawn_with_status(&self, task: impl Future<Output = Option<String>> + 'static) {
        let status = Rc::clone(&self.status);
        tokio::task::spawn_local(async move {
            let message = task.await;
            *status.borrow_mut() = message.unwrap_or_default();
        });
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Unsupported terminals ignore the keyboard protocol; it lets Esc arrive without delay
        execute!(
            stdout(),
            Hide,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        info!("Terminal modes enabled (hidden cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), PopKeyboardEnhancementFlags, Show);
    }
}

fn local_hour() -> u32 {
    chrono::Local::now().hour()
}

/// Run the terminal UI until the user quits. Must be called inside a `LocalSet`.
pub async fn run(app: Rc<App>) -> std::io::Result<()> {
    let mut tui = TuiState::new(&app).map_err(std::io::Error::other)?;

    let bootstrap_app = Rc::clone(&app);
    tokio::task::spawn_local(async move {
        match bootstrap_app.bootstrap().await {
            Ok(true) => {}
            Ok(false) => warn!("Initial navigation did not complete"),
            Err(e) => error!("Initial navigation failed: {}", e),
        }
    });

    let mut terminal = ratatui::init();
    let result = match TerminalModeGuard::new() {
        Ok(_guard) => event_loop(&mut terminal, &app, &mut tui).await,
        Err(e) => Err(e),
    };

    tui.shutdown();
    ratatui::restore();
    info!("TUI stopped");
    result
}

async fn event_loop(
    terminal: &mut ratatui::DefaultTerminal,
    app: &App,
    tui: &mut TuiState,
) -> std::io::Result<()> {
    loop {
        tui.sync_page(local_hour());
        terminal.draw(|f| ui::draw_ui(f, app, tui))?;

        // Drain ALL pending events before the next draw
        while let Some(event) = poll_event_immediate()? {
            if tui.handle_event(event) {
                info!("Quit requested");
                return Ok(());
            }
        }

        tokio::time::sleep(TICK).await;
    }
}
