use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

/// TUI-specific input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiEvent {
    Quit,
    FocusNext,
    FocusPrevious,
    /// Open the focused navigation item
    Activate,
    /// Open the navigation item at this index
    Jump(usize),
    ToggleTheme,
    Back,
    Resize,
}

/// Poll for an event without blocking (returns immediately).
///
/// Terminal events with no TUI meaning are consumed and skipped.
pub fn poll_event_immediate() -> std::io::Result<Option<TuiEvent>> {
    while event::poll(Duration::ZERO)? {
        if let Some(tui_event) = translate(&event::read()?) {
            return Ok(Some(tui_event));
        }
    }
    Ok(None)
}

/// Map a terminal event to a TUI event. Key releases and repeats are ignored.
pub fn translate(event: &Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => {
            if key_event.kind != KeyEventKind::Press {
                return None;
            }
            log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
            match (key_event.modifiers, key_event.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::Quit),
                (_, KeyCode::Char('q')) | (_, KeyCode::Esc) => Some(TuiEvent::Quit),
                (_, KeyCode::Right) | (_, KeyCode::Tab) | (_, KeyCode::Char('l')) => {
                    Some(TuiEvent::FocusNext)
                }
                (_, KeyCode::Left) | (_, KeyCode::BackTab) | (_, KeyCode::Char('h')) => {
                    Some(TuiEvent::FocusPrevious)
                }
                (_, KeyCode::Enter) => Some(TuiEvent::Activate),
                (_, KeyCode::Char(c @ '1'..='9')) => {
                    c.to_digit(10).map(|d| TuiEvent::Jump(d as usize - 1))
                }
                (_, KeyCode::Char('t')) => Some(TuiEvent::ToggleTheme),
                (_, KeyCode::Backspace) | (_, KeyCode::Char('b')) => Some(TuiEvent::Back),
                _ => None,
            }
        }
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}
