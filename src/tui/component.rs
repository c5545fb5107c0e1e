use ratatui::layout::Rect;
use ratatui::Frame;

use crate::core::lifecycle::LifecycleError;

/// A reusable UI component.
///
/// Components in this architecture follow the React pattern:
/// - They receive data via props (struct fields).
/// - They may hold internal state (via `&mut State` fields).
/// - They render to a `Frame` within a given `Rect`.
///
/// # Mutability
///
/// The `render` method takes `&mut self` to allow components to update
/// internal presentation state during rendering.
pub trait Component {
    /// Render the component into the given area.
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component bound to stores for part of its life.
///
/// `start` acquires subscriptions, `stop` disposes every one of them. Each is
/// called once, by whoever owns the component; a stopped component is never
/// restarted.
pub trait Lifecycle {
    fn start(&mut self) -> Result<(), LifecycleError>;
    fn stop(&mut self) -> Result<(), LifecycleError>;
}
