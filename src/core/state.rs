//! # Application State
//!
//! The composition root. Every process-wide store is built exactly once
//! here and handed to components by `Rc`; nothing looks stores up globally.
//!
//! ```text
//! App
//! ├── config: ResolvedConfig
//! ├── document: Rc<DocumentRoot>         // presentation context
//! ├── router: Rc<Router>                 // routing host
//! ├── theme: Rc<ThemeStore>              // light/dark + persistence
//! └── navigation: Rc<NavigationStore>    // current route + in-flight flag
//! ```

use std::rc::Rc;

use log::{info, warn};

use crate::core::config::ResolvedConfig;
use crate::core::navigation::{HostError, NavigateOptions, NavigationStore, RouterHost};
use crate::core::preference::{ColorSchemePreference, EnvPreference, FixedPreference};
use crate::core::presentation::DocumentRoot;
use crate::core::router::Router;
use crate::core::storage::{FileStore, KeyValueStore, MemoryStore};
use crate::core::theme::ThemeStore;

pub struct App {
    pub config: ResolvedConfig,
    pub document: Rc<DocumentRoot>,
    pub router: Rc<Router>,
    pub theme: Rc<ThemeStore>,
    pub navigation: Rc<NavigationStore>,
}

impl App {
    pub fn new(
        config: ResolvedConfig,
        storage: Rc<dyn KeyValueStore>,
        preference: &dyn ColorSchemePreference,
    ) -> Self {
        let document = Rc::new(DocumentRoot::new());
        let router = Rc::new(Router::with_app_routes(config.navigation_delay));
        let theme = Rc::new(ThemeStore::new(storage, preference, document.clone()));
        let navigation = Rc::new(NavigationStore::new(router.clone()));

        if let Some(forced) = config.startup_theme {
            info!("Applying theme from command line: {}", forced);
            theme.set_theme(forced);
        }

        info!("App composed (theme: {})", theme.current_theme());
        Self {
            config,
            document,
            router,
            theme,
            navigation,
        }
    }

    /// Build the app with the storage and preference sources named by `config`.
    pub fn from_config(config: ResolvedConfig) -> Self {
        let storage: Rc<dyn KeyValueStore> = match &config.storage_path {
            Some(path) => Rc::new(FileStore::open(path)),
            None => {
                warn!("No storage path available, theme will not persist");
                Rc::new(MemoryStore::new())
            }
        };
        let preference: Box<dyn ColorSchemePreference> = match config.system_preference {
            Some(theme) => Box::new(FixedPreference(theme.is_dark())),
            None => Box::new(EnvPreference),
        };
        Self::new(config, storage, preference.as_ref())
    }

    /// The router's initial navigation. Runs through the host directly, the
    /// same way a route change from outside the app would.
    pub async fn bootstrap(&self) -> Result<bool, HostError> {
        let route = self.config.initial_route.clone();
        info!("Initial navigation to {}", route);
        self.router.navigate(&route, &NavigateOptions::default()).await
    }
}
