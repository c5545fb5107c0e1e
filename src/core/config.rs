//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.beacon/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::core::storage::default_storage_path;
use crate::core::theme::Theme;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BeaconConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub initial_route: Option<String>,
    pub navigation_delay_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ThemeConfig {
    /// Overrides terminal detection of the system light/dark preference.
    pub system_preference: Option<Theme>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    pub path: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_INITIAL_ROUTE: &str = "/";
pub const DEFAULT_NAVIGATION_DELAY_MS: u64 = 150;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub initial_route: String,
    pub navigation_delay: Duration,
    pub system_preference: Option<Theme>,
    /// `None` when no home directory is available; storage is then in-memory.
    pub storage_path: Option<PathBuf>,
    /// Theme forced from the command line, applied through the store at startup.
    pub startup_theme: Option<Theme>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            initial_route: DEFAULT_INITIAL_ROUTE.to_string(),
            navigation_delay: Duration::from_millis(DEFAULT_NAVIGATION_DELAY_MS),
            system_preference: None,
            storage_path: None,
            startup_theme: None,
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.beacon/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".beacon").join("config.toml"))
}

/// Load config from `~/.beacon/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `BeaconConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<BeaconConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(BeaconConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(BeaconConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: BeaconConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Beacon Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# initial_route = "/"                # "/" redirects to /home
# navigation_delay_ms = 150          # Simulated page load time

# [theme]
# system_preference = "dark"         # Skip terminal detection: "light" or "dark"

# [storage]
# path = "/home/me/.beacon/storage.json"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_route` and `cli_theme` are from CLI flags (None = not specified).
pub fn resolve(config: &BeaconConfig, cli_route: Option<&str>, cli_theme: Option<Theme>) -> ResolvedConfig {
    // Initial route: CLI → env → config → default
    let initial_route = cli_route
        .map(|s| s.to_string())
        .or_else(|| std::env::var("BEACON_INITIAL_ROUTE").ok())
        .or_else(|| config.general.initial_route.clone())
        .unwrap_or_else(|| DEFAULT_INITIAL_ROUTE.to_string());

    // Navigation delay: env → config → default
    let navigation_delay_ms = std::env::var("BEACON_NAVIGATION_DELAY_MS")
        .ok()
        .and_then(|v| match v.parse::<u64>() {
            Ok(ms) => Some(ms),
            Err(e) => {
                warn!("Ignoring BEACON_NAVIGATION_DELAY_MS={}: {}", v, e);
                None
            }
        })
        .or(config.general.navigation_delay_ms)
        .unwrap_or(DEFAULT_NAVIGATION_DELAY_MS);

    // System preference override: env → config → detect at runtime
    let system_preference = std::env::var("BEACON_SYSTEM_THEME")
        .ok()
        .and_then(|v| match v.parse::<Theme>() {
            Ok(theme) => Some(theme),
            Err(e) => {
                warn!("Ignoring BEACON_SYSTEM_THEME: {}", e);
                None
            }
        })
        .or(config.theme.system_preference);

    // Storage path: env → config → ~/.beacon/storage.json
    let storage_path = std::env::var("BEACON_STORAGE_PATH")
        .ok()
        .or_else(|| config.storage.path.clone())
        .map(PathBuf::from)
        .or_else(default_storage_path);

    ResolvedConfig {
        initial_route,
        navigation_delay: Duration::from_millis(navigation_delay_ms),
        system_preference,
        storage_path,
        startup_theme: cli_theme,
    }
}
