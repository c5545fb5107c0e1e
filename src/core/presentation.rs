//! # Presentation Context
//!
//! The global surface a theme is applied to: a set of marker classes plus
//! named style variables on the document root. The TUI reads its palette
//! from here instead of from the ThemeStore, so the store's side effect is
//! what actually drives rendering.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::core::theme::Theme;

/// Style variable holding the active theme name.
pub const THEME_VARIABLE: &str = "--current-theme";

pub trait PresentationContext {
    fn apply_theme(&self, theme: Theme);
}

#[derive(Debug, Default)]
pub struct DocumentRoot {
    classes: RefCell<BTreeSet<String>>,
    variables: RefCell<BTreeMap<String, String>>,
}

impl DocumentRoot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().contains(class)
    }

    pub fn classes(&self) -> Vec<String> {
        self.classes.borrow().iter().cloned().collect()
    }

    pub fn variable(&self, name: &str) -> Option<String> {
        self.variables.borrow().get(name).cloned()
    }

    /// The theme currently applied; light until something is applied.
    pub fn theme(&self) -> Theme {
        if self.has_class(Theme::Dark.css_class()) {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

impl PresentationContext for DocumentRoot {
    fn apply_theme(&self, theme: Theme) {
        {
            let mut classes = self.classes.borrow_mut();
            classes.remove(Theme::Light.css_class());
            classes.remove(Theme::Dark.css_class());
            classes.insert(theme.css_class().to_string());
        }
        self.variables
            .borrow_mut()
            .insert(THEME_VARIABLE.to_string(), theme.as_str().to_string());
        debug!("Applied {} to document root", theme.css_class());
    }
}
