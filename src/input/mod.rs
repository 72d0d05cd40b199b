//! Input Module - Event conversion and polling
//!
//! Bridges crossterm's event system with the keyboard and pointer modules.
//! Provides event polling, conversion, and routing.
//!
//! # API
//!
//! - `convert_key_event` - Convert crossterm KeyEvent to our KeyboardEvent
//! - `convert_pointer_event` - Convert crossterm MouseEvent to our PointerEvent
//! - `poll_event` - Non-blocking event check with timeout
//! - `read_event` - Blocking event read
//! - `route_event` - Dispatch event to the appropriate handler
//! - `enable_pointer` / `disable_pointer` - Control mouse capture

use std::io::stdout;
use std::time::Duration;

use crossterm::event::{
    poll, read, DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent, KeyCode,
    KeyEvent as CrosstermKeyEvent, KeyModifiers, MouseEvent as CrosstermMouseEvent,
    MouseEventKind,
};
use crossterm::execute;

use crate::state::keyboard::{self, Key, KeyState, KeyboardEvent, Modifiers};
use crate::state::pointer::{self, PointerAction, PointerEvent};

// =============================================================================
// INPUT EVENT ENUM
// =============================================================================

/// Unified event type for the page shell.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Keyboard event (key press, release, etc.)
    Key(KeyboardEvent),
    /// Pointer event (click, move, wheel)
    Pointer(PointerEvent),
    /// Terminal resize event (new width, height)
    Resize(u16, u16),
    /// No event or unhandled event type
    None,
}

// =============================================================================
// KEY EVENT CONVERSION
// =============================================================================

/// Convert crossterm KeyEvent to our KeyboardEvent
pub fn convert_key_event(event: CrosstermKeyEvent) -> KeyboardEvent {
    let key = match event.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Tab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Left => Key::ArrowLeft,
        KeyCode::Right => Key::ArrowRight,
        KeyCode::Up => Key::ArrowUp,
        KeyCode::Down => Key::ArrowDown,
        _ => Key::Other,
    };

    let state = match event.kind {
        crossterm::event::KeyEventKind::Press => KeyState::Press,
        crossterm::event::KeyEventKind::Repeat => KeyState::Repeat,
        crossterm::event::KeyEventKind::Release => KeyState::Release,
    };

    KeyboardEvent {
        key,
        modifiers: convert_modifiers(event.modifiers),
        state,
    }
}

/// Convert crossterm KeyModifiers to our Modifiers
fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    Modifiers {
        ctrl: mods.contains(KeyModifiers::CONTROL),
        alt: mods.contains(KeyModifiers::ALT),
        shift: mods.contains(KeyModifiers::SHIFT),
    }
}

// =============================================================================
// POINTER EVENT CONVERSION
// =============================================================================

/// Convert crossterm MouseEvent to our PointerEvent.
///
/// Only the left button clicks; wheel deltas are one row per notch,
/// positive scrolling the page down. Drags fold into plain moves - the
/// page has nothing draggable.
pub fn convert_pointer_event(event: CrosstermMouseEvent) -> PointerEvent {
    let (action, wheel) = match event.kind {
        MouseEventKind::Down(_) => (PointerAction::Down, None),
        MouseEventKind::Up(_) => (PointerAction::Up, None),
        MouseEventKind::Moved | MouseEventKind::Drag(_) => (PointerAction::Move, None),
        MouseEventKind::ScrollDown => (PointerAction::Wheel, Some(1)),
        MouseEventKind::ScrollUp => (PointerAction::Wheel, Some(-1)),
        // Horizontal wheel has nothing to scroll on a vertical page.
        MouseEventKind::ScrollLeft | MouseEventKind::ScrollRight => {
            (PointerAction::Wheel, Some(0))
        }
    };

    PointerEvent {
        action,
        x: event.column,
        y: event.row,
        wheel,
        target: None, // Filled by dispatch
    }
}

// =============================================================================
// EVENT POLLING
// =============================================================================

/// Poll for an event with timeout.
/// Returns None if no event within timeout.
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<InputEvent>> {
    if poll(timeout)? {
        Ok(Some(read_event()?))
    } else {
        Ok(None)
    }
}

/// Read the next event (blocking).
pub fn read_event() -> std::io::Result<InputEvent> {
    match read()? {
        CrosstermEvent::Key(key) => Ok(InputEvent::Key(convert_key_event(key))),
        CrosstermEvent::Mouse(mouse) => Ok(InputEvent::Pointer(convert_pointer_event(mouse))),
        CrosstermEvent::Resize(w, h) => Ok(InputEvent::Resize(w, h)),
        _ => Ok(InputEvent::None),
    }
}

// =============================================================================
// EVENT ROUTING
// =============================================================================

/// Route an event to the appropriate dispatcher.
/// Returns true if any handler consumed the event.
///
/// This only feeds the handler registries; a page shell that also wants
/// command resolution routes through `Page::handle_event` instead, which
/// calls this first.
pub fn route_event(event: InputEvent) -> bool {
    match event {
        InputEvent::Key(key) => keyboard::dispatch(key),
        InputEvent::Pointer(ptr) => pointer::dispatch(ptr),
        InputEvent::Resize(w, h) => {
            pointer::resize_hit_map(w, h);
            false
        }
        InputEvent::None => false,
    }
}

// =============================================================================
// MOUSE CAPTURE
// =============================================================================

/// Enable terminal mouse capture.
pub fn enable_pointer() -> std::io::Result<()> {
    execute!(stdout(), EnableMouseCapture)
}

/// Disable terminal mouse capture.
pub fn disable_pointer() -> std::io::Result<()> {
    execute!(stdout(), DisableMouseCapture)
}

// =============================================================================
// TESTS
// =============================================================================
