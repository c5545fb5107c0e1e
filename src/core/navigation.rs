//! # Navigation Store
//!
//! Tracks where the app is and whether a navigation is in flight.
//!
//! ```text
//!              navigate_to(path)                  RouterHost
//!  caller ───────────────────────► store ───────────────────────► navigate()
//!                                   │ is_navigating = true             │
//!                                   │                                  │ NavigationEnd
//!                                   ◄──────────────────────────────────┘
//!                                     current_route = url_after_redirects
//!                                     is_navigating = false
//! ```
//!
//! The completion handler is the single source of truth: it reconciles every
//! navigation, whether it came from `navigate_to`, `go_back`, or the host on
//! its own. `navigate_to` only clears the flag itself when the host fails or
//! refuses.
//!
//! Overlapping calls share one flag ("at least one navigation outstanding");
//! the next completion event clears it no matter which call started it.

use std::fmt;
use std::rc::Rc;

use async_trait::async_trait;
use log::{debug, error, info, warn};
use serde::Serialize;

use crate::core::observable::{Observable, Subscription};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationItem {
    pub path: String,
    pub label: String,
    pub icon: Option<String>,
    pub description: Option<String>,
}

impl NavigationItem {
    fn new(path: &str, label: &str, icon: &str, description: &str) -> Self {
        Self {
            path: path.to_string(),
            label: label.to_string(),
            icon: Some(icon.to_string()),
            description: Some(description.to_string()),
        }
    }
}

/// The main menu. Paths are unique.
pub fn default_navigation_items() -> Vec<NavigationItem> {
    vec![
        NavigationItem::new("/home", "Home", "🏠", "Welcome page with app overview"),
        NavigationItem::new(
            "/dashboard",
            "Dashboard",
            "📊",
            "Data visualization and analytics",
        ),
        NavigationItem::new("/profile", "Profile", "👤", "User profile and settings"),
    ]
}

/// Extra instructions passed through to the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigateOptions {
    /// Replace the current history entry instead of pushing a new one.
    pub replace_url: bool,
    /// Navigate without recording a history entry at all.
    pub skip_location_change: bool,
}

/// Emitted by the host once a navigation has fully resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEnd {
    pub id: u64,
    /// The URL that was requested.
    pub url: String,
    /// The URL actually landed on.
    pub url_after_redirects: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The URL could not be parsed as an absolute path.
    InvalidUrl(String),
    /// Redirects did not settle on a page.
    RedirectLoop(String),
    /// The host cannot take requests right now.
    Unavailable(String),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::InvalidUrl(url) => write!(f, "invalid URL '{url}'"),
            HostError::RedirectLoop(url) => write!(f, "redirect loop resolving '{url}'"),
            HostError::Unavailable(msg) => write!(f, "router unavailable: {msg}"),
        }
    }
}

impl std::error::Error for HostError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// The host completed the request with a negative result
    /// (e.g. superseded by a newer navigation).
    Rejected { path: String },
    /// The host failed while performing the transition.
    Failed(HostError),
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationError::Rejected { path } => {
                write!(f, "navigation to {path} was not completed")
            }
            NavigationError::Failed(e) => write!(f, "navigation failed: {e}"),
        }
    }
}

impl std::error::Error for NavigationError {}

/// The routing framework as seen by the store: a source of completion events
/// and a sink for navigation requests.
#[async_trait(?Send)]
pub trait RouterHost {
    fn on_navigation_completed(&self, callback: Box<dyn Fn(&NavigationEnd)>) -> Subscription;

    async fn navigate(&self, path: &str, options: &NavigateOptions) -> Result<bool, HostError>;

    /// Step back one history entry. `Ok(false)` when there is nothing to go back to.
    async fn back(&self) -> Result<bool, HostError>;
}

pub struct NavigationStore {
    host: Rc<dyn RouterHost>,
    items: Vec<NavigationItem>,
    current_route: Rc<Observable<String>>,
    is_navigating: Rc<Observable<bool>>,
    _route_events: Subscription,
}

impl NavigationStore {
    pub fn new(host: Rc<dyn RouterHost>) -> Self {
        let current_route = Rc::new(Observable::new(String::from("/")));
        let is_navigating = Rc::new(Observable::new(false));

        let route_events = {
            let current_route = Rc::clone(&current_route);
            let is_navigating = Rc::clone(&is_navigating);
            host.on_navigation_completed(Box::new(move |event: &NavigationEnd| {
                debug!(
                    "Navigation {} completed: {} -> {}",
                    event.id, event.url, event.url_after_redirects
                );
                current_route.set(event.url_after_redirects.clone());
                is_navigating.set(false);
            }))
        };

        info!("NavigationStore tracking router events");
        Self {
            host,
            items: default_navigation_items(),
            current_route,
            is_navigating,
            _route_events: route_events,
        }
    }

    /// A copy of the menu; changing it does not affect the store.
    pub fn navigation_items(&self) -> Vec<NavigationItem> {
        self.items.clone()
    }

    pub fn current_route(&self) -> String {
        self.current_route.get()
    }

    pub fn is_route_active(&self, path: &str) -> bool {
        self.current_route() == path
    }

    /// Display label for `path`, or the path itself when it isn't in the menu.
    pub fn route_label(&self, path: &str) -> String {
        self.find(path)
            .map(|item| item.label.clone())
            .unwrap_or_else(|| path.to_string())
    }

    /// Icon for `path`, or an empty string.
    pub fn route_icon(&self, path: &str) -> String {
        self.find(path)
            .and_then(|item| item.icon.clone())
            .unwrap_or_default()
    }

    pub fn is_navigation_loading(&self) -> bool {
        self.is_navigating.get()
    }

    /// Ask the host to navigate to `path`.
    ///
    /// On success the in-flight flag stays set until the completion event
    /// arrives. A request for the route that is already current never reaches
    /// the host and succeeds immediately without touching the flag.
    pub async fn navigate_to(
        &self,
        path: &str,
        options: NavigateOptions,
    ) -> Result<(), NavigationError> {
        if self.is_route_active(path) {
            debug!("Already on {}, skipping navigation", path);
            return Ok(());
        }

        self.is_navigating.set(true);
        match self.host.navigate(path, &options).await {
            Ok(true) => Ok(()),
            Ok(false) => {
                warn!("Navigation to {} was not completed", path);
                self.is_navigating.set(false);
                Err(NavigationError::Rejected {
                    path: path.to_string(),
                })
            }
            Err(e) => {
                error!("Navigation error: {}", e);
                self.is_navigating.set(false);
                Err(NavigationError::Failed(e))
            }
        }
    }

    /// Go back one history entry. State is reconciled by the completion event.
    pub async fn go_back(&self) -> Result<bool, NavigationError> {
        self.host.back().await.map_err(|e| {
            error!("Back navigation error: {}", e);
            NavigationError::Failed(e)
        })
    }

    /// Replay-latest subscription to the current route.
    pub fn subscribe_route(&self, on_route_change: impl Fn(&str) + 'static) -> Subscription {
        self.current_route
            .subscribe(move |route: &String| on_route_change(route))
    }

    /// Replay-latest subscription to the in-flight flag.
    pub fn subscribe_navigating(
        &self,
        on_navigating_change: impl Fn(bool) + 'static,
    ) -> Subscription {
        self.is_navigating
            .subscribe(move |navigating: &bool| on_navigating_change(*navigating))
    }

    pub fn listener_count(&self) -> usize {
        self.current_route.listener_count() + self.is_navigating.listener_count()
    }

    fn find(&self, path: &str) -> Option<&NavigationItem> {
        self.items.iter().find(|item| item.path == path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ScriptedHost, ScriptedOutcome};
    use std::cell::RefCell;

    fn store() -> (NavigationStore, Rc<ScriptedHost>) {
        let host = Rc::new(ScriptedHost::new());
        (NavigationStore::new(host.clone()), host)
    }

    #[test]
    fn test_initial_state() {
        let (store, _host) = store();
        assert_eq!(store.current_route(), "/");
        assert!(!store.is_navigation_loading());
        assert!(store.is_route_active("/"));
    }

    #[test]
    fn test_navigation_items_are_a_defensive_copy() {
        let (store, _host) = store();
        let mut items = store.navigation_items();
        let paths: Vec<&str> = items.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["/home", "/dashboard", "/profile"]);

        items.clear();
        items.push(NavigationItem::new("/evil", "Evil", "", ""));
        assert_eq!(store.navigation_items().len(), 3);
        assert_eq!(store.navigation_items()[0].path, "/home");
    }

    #[test]
    fn test_route_label_and_icon_lookup() {
        let (store, _host) = store();
        assert_eq!(store.route_label("/dashboard"), "Dashboard");
        assert_eq!(store.route_icon("/dashboard"), "📊");
        assert_eq!(store.route_label("/settings"), "/settings");
        assert_eq!(store.route_icon("/settings"), "");
        // Exact match only
        assert_eq!(store.route_label("/dashboard/"), "/dashboard/");
    }

    #[tokio::test]
    async fn test_successful_navigation_reconciled_by_completion_event() {
        let (store, host) = store();

        store
            .navigate_to("/profile", NavigateOptions::default())
            .await
            .unwrap();
        assert!(store.is_navigation_loading(), "flag waits for completion event");
        assert_eq!(host.calls(), vec!["/profile".to_string()]);

        host.complete("/profile");
        assert_eq!(store.current_route(), "/profile");
        assert!(!store.is_navigation_loading());
        assert!(store.is_route_active("/profile"));
    }

    #[tokio::test]
    async fn test_host_error_clears_flag_and_fails() {
        let (store, host) = store();
        host.set_outcome(ScriptedOutcome::Fail);

        let result = store.navigate_to("/profile", NavigateOptions::default()).await;
        assert!(matches!(result, Err(NavigationError::Failed(_))));
        assert!(!store.is_navigation_loading());
        assert_eq!(store.current_route(), "/");
    }

    #[tokio::test]
    async fn test_rejected_navigation_clears_flag() {
        let (store, host) = store();
        host.set_outcome(ScriptedOutcome::Reject);

        let result = store.navigate_to("/dashboard", NavigateOptions::default()).await;
        assert_eq!(
            result,
            Err(NavigationError::Rejected {
                path: "/dashboard".to_string()
            })
        );
        assert!(!store.is_navigation_loading());
        assert_eq!(
            result.unwrap_err().to_string(),
            "navigation to /dashboard was not completed"
        );
    }

    #[tokio::test]
    async fn test_same_route_navigation_short_circuits() {
        let (store, host) = store();
        host.complete("/home");

        store
            .navigate_to("/home", NavigateOptions::default())
            .await
            .unwrap();
        assert!(host.calls().is_empty());
        assert!(!store.is_navigation_loading());
    }

    #[tokio::test]
    async fn test_overlapping_navigations_cleared_by_next_completion() {
        let (store, host) = store();

        store.navigate_to("/dashboard", NavigateOptions::default()).await.unwrap();
        store.navigate_to("/profile", NavigateOptions::default()).await.unwrap();
        assert!(store.is_navigation_loading());

        // Completion for the first request clears the shared flag
        host.complete("/dashboard");
        assert!(!store.is_navigation_loading());
        assert_eq!(store.current_route(), "/dashboard");
    }

    #[test]
    fn test_external_navigation_updates_route() {
        let (store, host) = store();
        host.complete_with_redirect("/", "/home");
        assert_eq!(store.current_route(), "/home");
    }

    #[test]
    fn test_route_subscription_replays_and_follows() {
        let (store, host) = store();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        let mut sub = store.subscribe_route(move |route| sink.borrow_mut().push(route.to_string()));
        host.complete("/dashboard");
        sub.dispose();
        host.complete("/profile");

        assert_eq!(*seen.borrow(), vec!["/".to_string(), "/dashboard".to_string()]);
    }

    #[tokio::test]
    async fn test_navigating_subscription_sees_flag_transitions() {
        let (store, host) = store();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        let _sub = store.subscribe_navigating(move |flag| sink.borrow_mut().push(flag));
        store.navigate_to("/profile", NavigateOptions::default()).await.unwrap();
        host.complete("/profile");

        assert_eq!(*seen.borrow(), vec![false, true, false]);
    }

    #[tokio::test]
    async fn test_go_back_delegates_to_host() {
        let (store, host) = store();
        assert_eq!(store.go_back().await, Ok(true));
        assert_eq!(host.back_calls(), 1);
        // Flag is left to the completion event
        assert!(!store.is_navigation_loading());
    }
}
