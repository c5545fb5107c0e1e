//! # Theme Store
//!
//! Process-wide light/dark state.
//!
//! ```text
//! construction:  storage["app-theme"] ──┐
//!                      (absent)         ├──► set_theme(resolved)
//!                system preference ─────┘
//!
//! set_theme(t):  held state = t
//!                presentation.apply_theme(t)
//!                storage["app-theme"] = t
//!                notify subscribers (in order, before returning)
//! ```
//!
//! Storage failures never escape: they are logged and the store carries on
//! with in-memory state only.

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use clap::ValueEnum;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::core::observable::{Observable, Subscription};
use crate::core::preference::ColorSchemePreference;
use crate::core::presentation::PresentationContext;
use crate::core::storage::KeyValueStore;

/// Storage key holding `"light"` or `"dark"`.
pub const THEME_STORAGE_KEY: &str = "app-theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark(is_dark: bool) -> Self {
        if is_dark { Theme::Dark } else { Theme::Light }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn opposite(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Marker class applied to the document root.
    pub fn css_class(self) -> &'static str {
        match self {
            Theme::Light => "light-theme",
            Theme::Dark => "dark-theme",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTheme(pub String);

impl fmt::Display for UnknownTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown theme '{}' (expected 'light' or 'dark')", self.0)
    }
}

impl std::error::Error for UnknownTheme {}

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

pub struct ThemeStore {
    is_dark_mode: Observable<bool>,
    storage: Rc<dyn KeyValueStore>,
    presentation: Rc<dyn PresentationContext>,
}

impl ThemeStore {
    /// Build the store and apply the initial theme right away, so the first
    /// frame is already drawn in the right colors.
    pub fn new(
        storage: Rc<dyn KeyValueStore>,
        preference: &dyn ColorSchemePreference,
        presentation: Rc<dyn PresentationContext>,
    ) -> Self {
        let saved = match storage.get(THEME_STORAGE_KEY) {
            Ok(saved) => saved,
            Err(e) => {
                warn!("Failed to read saved theme, falling back to system preference: {}", e);
                None
            }
        };

        let theme = match saved.as_deref().map(<Theme as FromStr>::from_str) {
            Some(Ok(theme)) => {
                info!("Restored saved theme: {}", theme);
                theme
            }
            Some(Err(e)) => {
                warn!("Ignoring saved theme: {}", e);
                Theme::from_dark(preference.prefers_dark())
            }
            None => {
                let theme = Theme::from_dark(preference.prefers_dark());
                info!("No saved theme, using system preference: {}", theme);
                theme
            }
        };

        let store = Self {
            is_dark_mode: Observable::new(theme.is_dark()),
            storage,
            presentation,
        };
        store.set_theme(theme);
        store
    }

    pub fn current_theme(&self) -> Theme {
        Theme::from_dark(self.is_dark_mode.get())
    }

    pub fn is_dark_mode(&self) -> bool {
        self.is_dark_mode.get()
    }

    pub fn set_theme(&self, theme: Theme) {
        self.is_dark_mode.replace(theme.is_dark());
        self.presentation.apply_theme(theme);
        if let Err(e) = self.storage.set(THEME_STORAGE_KEY, theme.as_str()) {
            warn!("Failed to persist theme, keeping it in memory only: {}", e);
        }
        info!("Theme set to {}", theme);
        self.is_dark_mode.notify();
    }

    pub fn toggle_theme(&self) {
        self.set_theme(self.current_theme().opposite());
    }

    /// Replay-latest subscription to theme changes.
    pub fn subscribe(&self, on_change: impl Fn(Theme) + 'static) -> Subscription {
        self.is_dark_mode
            .subscribe(move |is_dark: &bool| on_change(Theme::from_dark(*is_dark)))
    }

    pub fn listener_count(&self) -> usize {
        self.is_dark_mode.listener_count()
    }
}
