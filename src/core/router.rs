//! # Router
//!
//! The routing host Beacon runs on. It owns the route table, the history
//! stack and the page title, and talks to the rest of the app only through
//! its event stream.
//!
//! ## Route table
//!
//! ```text
//! ''           → redirect /home
//! 'home'       → "Home - Learning App"
//! 'dashboard'  → "Dashboard - Learning App"
//! 'profile'    → "Profile - Learning App"
//! '**'         → redirect /home
//! ```
//!
//! ## Event sequence
//!
//! ```text
//! NavigationStart ──(lazy load)──┬──► NavigationEnd        (landed)
//!                                └──► NavigationCancel     (superseded)
//! NavigationSkipped                                        (already there)
//! ```
//!
//! Only one navigation can win: each request takes a fresh id, and a request
//! that wakes up from its lazy load to find a newer id cancels itself.

use std::cell::{Cell, RefCell};
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};

use crate::core::navigation::{HostError, NavigateOptions, NavigationEnd, RouterHost};
use crate::core::observable::{Observable, Publisher, Subscription};

pub const APP_TITLE: &str = "Beacon Learning App";

/// Redirect chains longer than this are treated as loops.
const MAX_REDIRECTS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget {
    Page { title: &'static str },
    Redirect(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Path without the leading slash. `""` is the root, `"**"` matches anything.
    pub path: &'static str,
    pub target: RouteTarget,
}

pub fn app_routes() -> Vec<Route> {
    vec![
        Route {
            path: "",
            target: RouteTarget::Redirect("/home"),
        },
        Route {
            path: "home",
            target: RouteTarget::Page {
                title: "Home - Learning App",
            },
        },
        Route {
            path: "dashboard",
            target: RouteTarget::Page {
                title: "Dashboard - Learning App",
            },
        },
        Route {
            path: "profile",
            target: RouteTarget::Page {
                title: "Profile - Learning App",
            },
        },
        Route {
            path: "**",
            target: RouteTarget::Redirect("/home"),
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterEvent {
    NavigationStart { id: u64, url: String },
    NavigationEnd(NavigationEnd),
    NavigationCancel { id: u64, url: String, reason: String },
    NavigationSkipped { id: u64, url: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistoryUpdate {
    Push,
    Replace,
    Keep,
}

impl From<&NavigateOptions> for HistoryUpdate {
    fn from(options: &NavigateOptions) -> Self {
        if options.skip_location_change {
            HistoryUpdate::Keep
        } else if options.replace_url {
            HistoryUpdate::Replace
        } else {
            HistoryUpdate::Push
        }
    }
}

pub struct Router {
    routes: Vec<Route>,
    lazy_load_delay: Duration,
    events: Publisher<RouterEvent>,
    title: Observable<String>,
    /// Last landed URL (after redirects). Empty before the first navigation.
    url: RefCell<String>,
    history: RefCell<Vec<String>>,
    navigation_id: Cell<u64>,
}

impl Router {
    pub fn new(routes: Vec<Route>, lazy_load_delay: Duration) -> Self {
        Self {
            routes,
            lazy_load_delay,
            events: Publisher::new(),
            title: Observable::new(APP_TITLE.to_string()),
            url: RefCell::new(String::new()),
            history: RefCell::new(Vec::new()),
            navigation_id: Cell::new(0),
        }
    }

    pub fn with_app_routes(lazy_load_delay: Duration) -> Self {
        Self::new(app_routes(), lazy_load_delay)
    }

    /// All router events, without replay.
    pub fn events(&self, listener: impl Fn(&RouterEvent) + 'static) -> Subscription {
        self.events.subscribe(listener)
    }

    pub fn url(&self) -> String {
        self.url.borrow().clone()
    }

    pub fn history(&self) -> Vec<String> {
        self.history.borrow().clone()
    }

    pub fn title(&self) -> String {
        self.title.get()
    }

    pub fn subscribe_title(&self, listener: impl Fn(&String) + 'static) -> Subscription {
        self.title.subscribe(listener)
    }

    /// Resolve `url` to the page it lands on: `(url_after_redirects, title)`.
    pub fn resolve(&self, url: &str) -> Result<(String, &'static str), HostError> {
        let mut current = url.to_string();
        for _ in 0..=MAX_REDIRECTS {
            let segment = current.trim_start_matches('/');
            let route = self
                .routes
                .iter()
                .find(|route| route.path == segment)
                .or_else(|| self.routes.iter().find(|route| route.path == "**"))
                .ok_or_else(|| HostError::InvalidUrl(url.to_string()))?;

            match &route.target {
                RouteTarget::Page { title } => return Ok((format!("/{}", route.path), *title)),
                RouteTarget::Redirect(to) => {
                    debug!("Redirecting {} -> {}", current, to);
                    current = to.to_string();
                }
            }
        }
        Err(HostError::RedirectLoop(url.to_string()))
    }

    fn next_id(&self) -> u64 {
        let id = self.navigation_id.get() + 1;
        self.navigation_id.set(id);
        id
    }

    async fn run_navigation(&self, url: &str, update: HistoryUpdate) -> Result<bool, HostError> {
        let id = self.next_id();
        let (target, title) = self.resolve(url)?;

        self.events.emit(&RouterEvent::NavigationStart {
            id,
            url: url.to_string(),
        });

        if !self.lazy_load_delay.is_zero() {
            tokio::time::sleep(self.lazy_load_delay).await;
        }

        if self.navigation_id.get() != id {
            debug!("Navigation {} to {} superseded", id, url);
            self.events.emit(&RouterEvent::NavigationCancel {
                id,
                url: url.to_string(),
                reason: "superseded by a newer navigation".to_string(),
            });
            return Ok(false);
        }

        *self.url.borrow_mut() = target.clone();
        {
            let mut history = self.history.borrow_mut();
            match update {
                HistoryUpdate::Push => history.push(target.clone()),
                HistoryUpdate::Replace => {
                    history.pop();
                    history.push(target.clone());
                }
                HistoryUpdate::Keep => {}
            }
        }
        self.title.set(title.to_string());

        info!("Navigated to {} (requested {})", target, url);
        self.events.emit(&RouterEvent::NavigationEnd(NavigationEnd {
            id,
            url: url.to_string(),
            url_after_redirects: target,
        }));
        Ok(true)
    }
}

#[async_trait(?Send)]
impl RouterHost for Router {
    fn on_navigation_completed(&self, callback: Box<dyn Fn(&NavigationEnd)>) -> Subscription {
        self.events.subscribe(move |event| {
            if let RouterEvent::NavigationEnd(end) = event {
                callback(end);
            }
        })
    }

    async fn navigate(&self, path: &str, options: &NavigateOptions) -> Result<bool, HostError> {
        if !path.starts_with('/') {
            return Err(HostError::InvalidUrl(path.to_string()));
        }

        if *self.url.borrow() == path {
            let id = self.next_id();
            debug!("Navigation {} to current URL {} skipped", id, path);
            self.events.emit(&RouterEvent::NavigationSkipped {
                id,
                url: path.to_string(),
            });
            return Ok(true);
        }

        self.run_navigation(path, HistoryUpdate::from(options)).await
    }

    async fn back(&self) -> Result<bool, HostError> {
        let previous = {
            let mut history = self.history.borrow_mut();
            if history.len() < 2 {
                return Ok(false);
            }
            history.pop();
            history.last().cloned()
        };

        match previous {
            Some(url) => self.run_navigation(&url, HistoryUpdate::Keep).await,
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn router() -> Router {
        Router::with_app_routes(Duration::ZERO)
    }

    fn record(router: &Router) -> (Rc<RefCell<Vec<RouterEvent>>>, Subscription) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let sub = router.events(move |event| sink.borrow_mut().push(event.clone()));
        (seen, sub)
    }

    #[test]
    fn test_resolve_pages_and_redirects() {
        let router = router();
        assert_eq!(
            router.resolve("/dashboard").unwrap(),
            ("/dashboard".to_string(), "Dashboard - Learning App")
        );
        assert_eq!(router.resolve("/").unwrap().0, "/home");
        assert_eq!(router.resolve("").unwrap().0, "/home");
        assert_eq!(router.resolve("/nowhere").unwrap().0, "/home");
    }

    #[test]
    fn test_resolve_detects_redirect_loop() {
        let router = Router::new(
            vec![
                Route {
                    path: "a",
                    target: RouteTarget::Redirect("/b"),
                },
                Route {
                    path: "b",
                    target: RouteTarget::Redirect("/a"),
                },
            ],
            Duration::ZERO,
        );
        assert_eq!(router.resolve("/a"), Err(HostError::RedirectLoop("/a".to_string())));
    }

    #[test]
    fn test_resolve_without_wildcard_rejects_unknown() {
        let router = Router::new(Vec::new(), Duration::ZERO);
        assert!(matches!(router.resolve("/x"), Err(HostError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_navigate_emits_start_then_end() {
        let router = router();
        let (seen, _sub) = record(&router);

        let landed = router.navigate("/", &NavigateOptions::default()).await;
        assert_eq!(landed, Ok(true));
        assert_eq!(router.url(), "/home");
        assert_eq!(router.title(), "Home - Learning App");

        let events = seen.borrow();
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], RouterEvent::NavigationStart { url, .. } if url == "/"));
        assert!(matches!(
            &events[1],
            RouterEvent::NavigationEnd(end) if end.url == "/" && end.url_after_redirects == "/home"
        ));
    }

    #[tokio::test]
    async fn test_relative_url_is_rejected() {
        let router = router();
        let result = router.navigate("home", &NavigateOptions::default()).await;
        assert_eq!(result, Err(HostError::InvalidUrl("home".to_string())));
        assert_eq!(router.url(), "");
    }

    #[tokio::test]
    async fn test_same_url_is_skipped() {
        let router = router();
        router.navigate("/home", &NavigateOptions::default()).await.unwrap();
        let (seen, _sub) = record(&router);

        assert_eq!(router.navigate("/home", &NavigateOptions::default()).await, Ok(true));
        assert!(matches!(
            seen.borrow().as_slice(),
            [RouterEvent::NavigationSkipped { .. }]
        ));
        assert_eq!(router.history(), vec!["/home".to_string()]);
    }

    #[tokio::test]
    async fn test_history_options() {
        let router = router();
        let push = NavigateOptions::default();
        router.navigate("/home", &push).await.unwrap();
        router.navigate("/dashboard", &push).await.unwrap();

        let replace = NavigateOptions {
            replace_url: true,
            ..Default::default()
        };
        router.navigate("/profile", &replace).await.unwrap();
        assert_eq!(router.history(), vec!["/home".to_string(), "/profile".to_string()]);

        let skip = NavigateOptions {
            skip_location_change: true,
            ..Default::default()
        };
        router.navigate("/dashboard", &skip).await.unwrap();
        assert_eq!(router.history(), vec!["/home".to_string(), "/profile".to_string()]);
        assert_eq!(router.url(), "/dashboard");
    }

    #[tokio::test]
    async fn test_back_walks_history() {
        let router = router();
        assert_eq!(router.back().await, Ok(false));

        router.navigate("/home", &NavigateOptions::default()).await.unwrap();
        router.navigate("/profile", &NavigateOptions::default()).await.unwrap();

        assert_eq!(router.back().await, Ok(true));
        assert_eq!(router.url(), "/home");
        assert_eq!(router.history(), vec!["/home".to_string()]);
        assert_eq!(router.back().await, Ok(false));
    }

    #[tokio::test]
    async fn test_superseded_navigation_is_cancelled() {
        let router = Router::with_app_routes(Duration::from_millis(20));
        let (seen, _sub) = record(&router);
        let options = NavigateOptions::default();

        let (first, second) = tokio::join!(
            router.navigate("/dashboard", &options),
            router.navigate("/profile", &options)
        );

        assert_eq!(first, Ok(false));
        assert_eq!(second, Ok(true));
        assert_eq!(router.url(), "/profile");
        assert!(seen.borrow().iter().any(|event| matches!(
            event,
            RouterEvent::NavigationCancel { url, .. } if url == "/dashboard"
        )));
    }

    #[tokio::test]
    async fn test_completion_callback_only_sees_navigation_end() {
        let router = router();
        let ends = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&ends);
        let _sub = router.on_navigation_completed(Box::new(move |end| {
            sink.borrow_mut().push(end.url_after_redirects.clone())
        }));

        router.navigate("/dashboard", &NavigateOptions::default()).await.unwrap();
        router.navigate("/dashboard", &NavigateOptions::default()).await.unwrap();
        let _ = router.navigate("bad", &NavigateOptions::default()).await;

        assert_eq!(*ends.borrow(), vec!["/dashboard".to_string()]);
    }
}
