//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;

use crate::core::navigation::{HostError, NavigateOptions, NavigationEnd, NavigationStore, RouterHost};
use crate::core::observable::{Publisher, Subscription};
use crate::core::preference::FixedPreference;
use crate::core::presentation::DocumentRoot;
use crate::core::storage::{KeyValueStore, MemoryStore, StorageError};
use crate::core::theme::ThemeStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptedOutcome {
    Succeed,
    Reject,
    Fail,
}

/// A router host whose answers are chosen by the test. Completion events are
/// only fired when the test calls `complete()`.
pub struct ScriptedHost {
    completed: Publisher<NavigationEnd>,
    outcome: Cell<ScriptedOutcome>,
    calls: RefCell<Vec<String>>,
    back_calls: Cell<usize>,
    next_id: Cell<u64>,
}

impl ScriptedHost {
    pub fn new() -> Self {
        Self {
            completed: Publisher::new(),
            outcome: Cell::new(ScriptedOutcome::Succeed),
            calls: RefCell::new(Vec::new()),
            back_calls: Cell::new(0),
            next_id: Cell::new(1),
        }
    }

    pub fn set_outcome(&self, outcome: ScriptedOutcome) {
        self.outcome.set(outcome);
    }

    /// Paths passed to `navigate`, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn back_calls(&self) -> usize {
        self.back_calls.get()
    }

    /// Simulate the router finishing a navigation to `url`.
    pub fn complete(&self, url: &str) {
        self.complete_with_redirect(url, url);
    }

    pub fn complete_with_redirect(&self, url: &str, url_after_redirects: &str) {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.completed.emit(&NavigationEnd {
            id,
            url: url.to_string(),
            url_after_redirects: url_after_redirects.to_string(),
        });
    }

    fn answer(&self) -> Result<bool, HostError> {
        match self.outcome.get() {
            ScriptedOutcome::Succeed => Ok(true),
            ScriptedOutcome::Reject => Ok(false),
            ScriptedOutcome::Fail => Err(HostError::Unavailable("scripted failure".to_string())),
        }
    }
}

#[async_trait(?Send)]
impl RouterHost for ScriptedHost {
    fn on_navigation_completed(&self, callback: Box<dyn Fn(&NavigationEnd)>) -> Subscription {
        self.completed.subscribe(move |event| callback(event))
    }

    async fn navigate(&self, path: &str, _options: &NavigateOptions) -> Result<bool, HostError> {
        self.calls.borrow_mut().push(path.to_string());
        self.answer()
    }

    async fn back(&self) -> Result<bool, HostError> {
        self.back_calls.set(self.back_calls.get() + 1);
        self.answer()
    }
}

/// A store where every operation fails.
pub struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("storage disabled".to_string()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage disabled".to_string()))
    }
}

/// Stores wired to in-memory doubles, as components see them.
pub struct TestStores {
    pub theme: Rc<ThemeStore>,
    pub navigation: Rc<NavigationStore>,
    pub host: Rc<ScriptedHost>,
    pub root: Rc<DocumentRoot>,
    pub storage: Rc<MemoryStore>,
}

/// Creates stores starting in the light theme at route `/`.
pub fn test_stores() -> TestStores {
    let storage = Rc::new(MemoryStore::new());
    let root = Rc::new(DocumentRoot::new());
    let host = Rc::new(ScriptedHost::new());
    let theme = Rc::new(ThemeStore::new(
        storage.clone(),
        &FixedPreference(false),
        root.clone(),
    ));
    let navigation = Rc::new(NavigationStore::new(host.clone()));
    TestStores {
        theme,
        navigation,
        host,
        root,
        storage,
    }
}
