//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: window title, theme and status line
//!
//! ### Store-Bound Components (Lifecycle)
//!
//! Components that subscribe to stores between `start()` and `stop()`:
//! - `Navbar`: menu, theme toggle, loading hint
//! - `HomePage`: greeting plus a live theme readout
//! - `DashboardPage`, `ProfilePage`: static content, lifecycle only
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file, Page trait and page_for_route)
//! ├── title_bar.rs     (Top status bar)
//! ├── navbar.rs        (Navigation bar)
//! ├── home.rs          (/home)
//! ├── dashboard.rs     (/dashboard)
//! └── profile.rs       (/profile)
//! ```

use std::rc::Rc;

use crate::core::theme::ThemeStore;
use crate::tui::component::{Component, Lifecycle};

mod dashboard;
mod home;
mod navbar;
mod profile;
mod title_bar;

pub use dashboard::DashboardPage;
pub use home::HomePage;
pub use navbar::{Navbar, NavbarMirror};
pub use profile::ProfilePage;
pub use title_bar::TitleBar;

/// A routed page: rendered in the main area while its route is current.
pub trait Page: Component + Lifecycle {
    fn route(&self) -> &'static str;
}

/// Build the page for a landed route, or `None` when no page owns it.
pub fn page_for_route(route: &str, theme: &Rc<ThemeStore>, hour: u32) -> Option<Box<dyn Page>> {
    match route {
        "/home" => Some(Box::new(HomePage::new(Rc::clone(theme), hour))),
        "/dashboard" => Some(Box::new(DashboardPage::new())),
        "/profile" => Some(Box::new(ProfilePage::new())),
        _ => None,
    }
}
