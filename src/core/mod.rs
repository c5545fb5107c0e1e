//! # Core Application Logic
//!
//! The stores and everything they need. This module knows nothing about
//! any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • ThemeStore           │
//!                    │  • NavigationStore      │
//!                    │  • Router (host)        │
//!                    │                         │
//!                    │  No rendering. No I/O   │
//!                    │  beyond one JSON file.  │
//!                    └───────────┬─────────────┘
//!                                │ Rc<Store> + Subscription
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │   Navbar   │      │   Pages    │      │  TitleBar  │
//!     │ (ratatui)  │      │ (ratatui)  │      │ (ratatui)  │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`observable`]: `Publisher`, `Observable` and `Subscription`
//! - [`theme`]: the `ThemeStore`
//! - [`navigation`]: the `NavigationStore` and the `RouterHost` seam
//! - [`router`]: the routing host Beacon runs on
//! - [`state`]: the `App` composition root

pub mod config;
pub mod content;
pub mod lifecycle;
pub mod navigation;
pub mod observable;
pub mod preference;
pub mod presentation;
pub mod router;
pub mod state;
pub mod storage;
pub mod theme;
