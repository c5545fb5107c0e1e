//! System light/dark preference.
//!
//! Only consulted when nothing is persisted yet. Terminals advertise their
//! colors through `COLORFGBG` (`"fg;bg"`, sometimes `"fg;default;bg"`); a
//! background from the dark half of the 16-color palette means dark.

use log::debug;

pub trait ColorSchemePreference {
    fn prefers_dark(&self) -> bool;
}

/// A fixed answer, from config or tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedPreference(pub bool);

impl ColorSchemePreference for FixedPreference {
    fn prefers_dark(&self) -> bool {
        self.0
    }
}

/// Reads `COLORFGBG` from the environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvPreference;

impl ColorSchemePreference for EnvPreference {
    fn prefers_dark(&self) -> bool {
        let detected = std::env::var("COLORFGBG")
            .ok()
            .and_then(|value| parse_colorfgbg(&value));
        debug!("COLORFGBG dark preference: {:?}", detected);
        detected.unwrap_or(false)
    }
}

/// `Some(true)` when the background color index is dark, `None` when the
/// value can't be read.
pub fn parse_colorfgbg(value: &str) -> Option<bool> {
    let background: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    Some(matches!(background, 0..=6 | 8))
}
