use std::rc::Rc;
use std::time::Duration;

use beacon::core::config::ResolvedConfig;
use beacon::core::navigation::{HostError, NavigateOptions, NavigationError};
use beacon::core::preference::FixedPreference;
use beacon::core::presentation::THEME_VARIABLE;
use beacon::core::state::App;
use beacon::core::storage::{FileStore, KeyValueStore, MemoryStore};
use beacon::core::theme::{THEME_STORAGE_KEY, Theme};
use beacon::tui::component::Lifecycle;
use beacon::tui::components::Navbar;
use tokio_test::{assert_err, assert_ok};

// ============================================================================
// Helper Functions
// ============================================================================

fn config_with_delay(delay: Duration) -> ResolvedConfig {
    ResolvedConfig {
        navigation_delay: delay,
        ..Default::default()
    }
}

/// An app on an instant router with in-memory storage, light system preference.
fn instant_app() -> App {
    App::new(
        config_with_delay(Duration::ZERO),
        Rc::new(MemoryStore::new()),
        &FixedPreference(false),
    )
}

async fn bootstrapped_app() -> App {
    let app = instant_app();
    assert!(assert_ok!(app.bootstrap().await));
    app
}

// ============================================================================
// Routing
// ============================================================================

#[tokio::test]
async fn test_bootstrap_redirects_root_to_home() {
    let app = bootstrapped_app().await;

    assert_eq!(app.navigation.current_route(), "/home");
    assert!(!app.navigation.is_navigation_loading());
    assert_eq!(app.router.title(), "Home - Learning App");
    assert_eq!(app.router.history(), vec!["/home".to_string()]);
}

#[tokio::test]
async fn test_navbar_click_reaches_dashboard() {
    let app = bootstrapped_app().await;
    let mut navbar = Navbar::new(app.theme.clone(), app.navigation.clone());
    navbar.start().unwrap();

    let dashboard = navbar.navigation_items()[1].clone();
    assert_ok!(navbar.on_navigation_item_click(&dashboard).await);

    assert_eq!(app.navigation.current_route(), "/dashboard");
    assert!(navbar.is_route_active("/dashboard"));
    assert!(!navbar.is_navigating());
    assert_eq!(app.router.title(), "Dashboard - Learning App");

    navbar.stop().unwrap();
    assert_eq!(app.navigation.listener_count(), 0);
}

#[tokio::test]
async fn test_relative_url_fails_and_clears_loading() {
    let app = bootstrapped_app().await;

    let error = assert_err!(
        app.navigation
            .navigate_to("dashboard", NavigateOptions::default())
            .await
    );

    assert!(matches!(
        error,
        NavigationError::Failed(HostError::InvalidUrl(_))
    ));
    assert!(!app.navigation.is_navigation_loading());
    assert_eq!(app.navigation.current_route(), "/home");
}

#[tokio::test]
async fn test_unknown_route_lands_on_home() {
    let app = bootstrapped_app().await;
    assert_ok!(
        app.navigation
            .navigate_to("/profile", NavigateOptions::default())
            .await
    );

    assert_ok!(
        app.navigation
            .navigate_to("/settings", NavigateOptions::default())
            .await
    );

    assert_eq!(app.navigation.current_route(), "/home");
    assert!(!app.navigation.is_navigation_loading());
}

#[tokio::test]
async fn test_go_back_returns_to_previous_page() {
    let app = bootstrapped_app().await;
    for path in ["/dashboard", "/profile"] {
        assert_ok!(
            app.navigation
                .navigate_to(path, NavigateOptions::default())
                .await
        );
    }

    assert!(assert_ok!(app.navigation.go_back().await));

    assert_eq!(app.navigation.current_route(), "/dashboard");
    assert_eq!(
        app.router.history(),
        vec!["/home".to_string(), "/dashboard".to_string()]
    );
}

#[tokio::test]
async fn test_replace_url_keeps_history_short() {
    let app = bootstrapped_app().await;
    let replace = NavigateOptions {
        replace_url: true,
        ..Default::default()
    };

    assert_ok!(app.navigation.navigate_to("/profile", replace).await);

    assert_eq!(app.router.history(), vec!["/profile".to_string()]);
    assert!(!assert_ok!(app.navigation.go_back().await));
}

#[tokio::test]
async fn test_newer_navigation_supersedes_older() {
    let app = App::new(
        config_with_delay(Duration::from_millis(20)),
        Rc::new(MemoryStore::new()),
        &FixedPreference(false),
    );
    assert_ok!(app.bootstrap().await);

    let (first, second) = tokio::join!(
        app.navigation
            .navigate_to("/dashboard", NavigateOptions::default()),
        app.navigation
            .navigate_to("/profile", NavigateOptions::default()),
    );

    assert!(matches!(first, Err(NavigationError::Rejected { .. })));
    assert_ok!(second);
    assert_eq!(app.navigation.current_route(), "/profile");
    assert!(!app.navigation.is_navigation_loading());
}

#[tokio::test]
async fn test_superseded_navigation_clears_flag_before_newer_lands() {
    let app = App::new(
        config_with_delay(Duration::from_millis(20)),
        Rc::new(MemoryStore::new()),
        &FixedPreference(false),
    );
    assert_ok!(app.bootstrap().await);
    let navigation = &app.navigation;

    let ((first, loading, route), second) = tokio::join!(
        async {
            let result = navigation
                .navigate_to("/dashboard", NavigateOptions::default())
                .await;
            (
                result,
                navigation.is_navigation_loading(),
                navigation.current_route(),
            )
        },
        navigation.navigate_to("/profile", NavigateOptions::default()),
    );

    // The newer navigation is still pending when the older one is rejected
    assert_err!(first);
    assert!(!loading);
    assert_eq!(route, "/home");

    assert_ok!(second);
    assert_eq!(navigation.current_route(), "/profile");
}

// ============================================================================
// Theme
// ============================================================================

#[test]
fn test_theme_persists_across_apps() {
    let storage = Rc::new(MemoryStore::new());

    let first = App::new(
        config_with_delay(Duration::ZERO),
        storage.clone(),
        &FixedPreference(false),
    );
    first.theme.toggle_theme();
    assert_eq!(
        assert_ok!(storage.get(THEME_STORAGE_KEY)),
        Some("dark".to_string())
    );

    // Saved value wins over the system preference
    let second = App::new(
        config_with_delay(Duration::ZERO),
        storage.clone(),
        &FixedPreference(false),
    );
    assert_eq!(second.theme.current_theme(), Theme::Dark);
    assert!(second.document.has_class("dark-theme"));
    assert_eq!(
        second.document.variable(THEME_VARIABLE),
        Some("dark".to_string())
    );
}

#[test]
fn test_theme_persists_in_file_store() {
    let dir = std::env::temp_dir().join(format!(
        "beacon-flow-{}-{}",
        std::process::id(),
        chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
    ));
    let path = dir.join("storage.json");

    let first = App::new(
        config_with_delay(Duration::ZERO),
        Rc::new(FileStore::open(&path)),
        &FixedPreference(true),
    );
    assert_eq!(first.theme.current_theme(), Theme::Dark);
    first.theme.set_theme(Theme::Light);

    let second = App::new(
        config_with_delay(Duration::ZERO),
        Rc::new(FileStore::open(&path)),
        &FixedPreference(true),
    );
    assert_eq!(second.theme.current_theme(), Theme::Light);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_startup_theme_overrides_saved_value() {
    let storage = Rc::new(MemoryStore::new());
    assert_ok!(storage.set(THEME_STORAGE_KEY, "light"));

    let config = ResolvedConfig {
        startup_theme: Some(Theme::Dark),
        ..config_with_delay(Duration::ZERO)
    };
    let app = App::new(config, storage, &FixedPreference(false));

    assert!(app.theme.is_dark_mode());
}
