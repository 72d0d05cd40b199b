//! Keyboard Module - Keyboard event state and handler registry
//!
//! State and handler registry for keyboard events.
//! Does NOT own stdin (that is the input module).
//!
//! Keys are a discriminated [`Key`] enum rather than strings, so dispatch
//! is a table lookup and a typo in a key name is a compile error.
//!
//! # API
//!
//! - `last_event` - Get last keyboard event
//! - `last_key` - Get last key pressed
//! - `on(handler)` - Subscribe to all keyboard events
//! - `on_key(key, fn)` - Subscribe to a specific key
//! - `on_keys(keys, fn)` - Subscribe to several keys at once
//!
//! # Example
//!
//! ```ignore
//! use vitrine_tui::state::keyboard::{self, Key};
//!
//! // Subscribe to a specific key
//! let cleanup = keyboard::on_key(Key::ArrowRight, || {
//!     println!("next slide");
//!     true // Consume
//! });
//! ```

use std::cell::RefCell;
use std::collections::HashMap;

use spark_signals::{signal, Signal};

// =============================================================================
// TYPES
// =============================================================================

/// Key identity.
///
/// Only the keys the page reacts to get their own variant; everything else
/// arrives as `Char` or `Other` and falls through dispatch untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Enter,
    Escape,
    Tab,
    Backspace,
    Char(char),
    Other,
}

/// Keyboard modifier state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn ctrl() -> Self {
        Self { ctrl: true, ..Self::default() }
    }

    pub fn shift() -> Self {
        Self { shift: true, ..Self::default() }
    }
}

/// Key event state (press, repeat, release)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyState {
    #[default]
    Press,
    Repeat,
    Release,
}

/// Keyboard event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyboardEvent {
    pub key: Key,
    pub modifiers: Modifiers,
    pub state: KeyState,
}

impl KeyboardEvent {
    /// Create a simple key press event
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
            state: KeyState::Press,
        }
    }

    /// Create a key press with modifiers
    pub fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self {
            key,
            modifiers,
            state: KeyState::Press,
        }
    }

    /// Check if this is a press event
    pub fn is_press(&self) -> bool {
        self.state == KeyState::Press
    }
}

/// Handler for keyboard events. Return true to consume the event.
pub type KeyHandler = Box<dyn Fn(&KeyboardEvent) -> bool>;

/// Handler for a specific key. Return true to consume the event.
pub type KeySpecificHandler = Box<dyn Fn() -> bool>;

// =============================================================================
// STATE
// =============================================================================

thread_local! {
    static LAST_EVENT: Signal<Option<KeyboardEvent>> = signal(None);
}

/// Get the last keyboard event
pub fn last_event() -> Option<KeyboardEvent> {
    LAST_EVENT.with(|s| s.get())
}

/// Get the last key pressed
pub fn last_key() -> Option<Key> {
    last_event().map(|e| e.key)
}

// =============================================================================
// HANDLER REGISTRY
// =============================================================================

struct HandlerRegistry {
    global_handlers: Vec<(usize, KeyHandler)>,
    key_handlers: HashMap<Key, Vec<(usize, KeySpecificHandler)>>,
    next_id: usize,
}

impl HandlerRegistry {
    fn new() -> Self {
        Self {
            global_handlers: Vec::new(),
            key_handlers: HashMap::new(),
            next_id: 0,
        }
    }

    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

thread_local! {
    static REGISTRY: RefCell<HandlerRegistry> = RefCell::new(HandlerRegistry::new());
}

// =============================================================================
// EVENT DISPATCH
// =============================================================================

/// Dispatch a keyboard event to all registered handlers.
/// Returns true if any handler consumed the event.
///
/// Key-specific handlers run before global handlers. Only press events
/// reach handlers; repeats and releases only update the last-event state.
pub fn dispatch(event: KeyboardEvent) -> bool {
    // Always update reactive state
    LAST_EVENT.with(|s| s.set(Some(event)));

    if event.state != KeyState::Press {
        return false;
    }

    REGISTRY.with(|reg| {
        let reg = reg.borrow();

        if let Some(handlers) = reg.key_handlers.get(&event.key) {
            for (_, handler) in handlers {
                if handler() {
                    return true;
                }
            }
        }

        for (_, handler) in &reg.global_handlers {
            if handler(&event) {
                return true;
            }
        }

        false
    })
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Subscribe to all keyboard events.
/// Return true from handler to consume the event.
/// Returns cleanup function.
pub fn on<F>(handler: F) -> impl FnOnce()
where
    F: Fn(&KeyboardEvent) -> bool + 'static,
{
    let id = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id();
        reg.global_handlers.push((id, Box::new(handler)));
        id
    });

    move || {
        REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            reg.global_handlers.retain(|(handler_id, _)| *handler_id != id);
        });
    }
}

/// Subscribe to a specific key.
/// Handler receives no arguments - check last_event if needed.
/// Return true to consume the event.
/// Returns cleanup function.
pub fn on_key<F>(key: Key, handler: F) -> impl FnOnce()
where
    F: Fn() -> bool + 'static,
{
    let id = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id();
        reg.key_handlers.entry(key).or_default().push((id, Box::new(handler)));
        id
    });

    move || {
        REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            if let Some(handlers) = reg.key_handlers.get_mut(&key) {
                handlers.retain(|(handler_id, _)| *handler_id != id);
                if handlers.is_empty() {
                    reg.key_handlers.remove(&key);
                }
            }
        });
    }
}

/// Subscribe to multiple keys with the same handler.
/// Returns cleanup function.
pub fn on_keys<F>(keys: &[Key], handler: F) -> impl FnOnce()
where
    F: Fn() -> bool + Clone + 'static,
{
    let ids: Vec<(Key, usize)> = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        keys.iter()
            .map(|&key| {
                let id = reg.next_id();
                reg.key_handlers
                    .entry(key)
                    .or_default()
                    .push((id, Box::new(handler.clone())));
                (key, id)
            })
            .collect()
    });

    move || {
        REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            for (key, id) in &ids {
                if let Some(handlers) = reg.key_handlers.get_mut(key) {
                    handlers.retain(|(handler_id, _)| *handler_id != *id);
                    if handlers.is_empty() {
                        reg.key_handlers.remove(key);
                    }
                }
            }
        });
    }
}

/// Clear all state and handlers.
pub fn cleanup() {
    REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        reg.global_handlers.clear();
        reg.key_handlers.clear();
    });
    LAST_EVENT.with(|s| s.set(None));
}

/// Reset keyboard state (for testing)
pub fn reset_keyboard_state() {
    cleanup();
    REGISTRY.with(|reg| {
        reg.borrow_mut().next_id = 0;
    });
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn setup() {
        reset_keyboard_state();
    }

    #[test]
    fn test_initial_state() {
        setup();
        assert!(last_event().is_none());
        assert_eq!(last_key(), None);
    }

    #[test]
    fn test_dispatch_updates_state() {
        setup();

        dispatch(KeyboardEvent::new(Key::ArrowRight));
        assert_eq!(last_key(), Some(Key::ArrowRight));

        dispatch(KeyboardEvent::new(Key::Char('a')));
        assert_eq!(last_key(), Some(Key::Char('a')));
    }

    #[test]
    fn test_global_handler() {
        setup();

        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();

        let cleanup = on(move |_event| {
            count_clone.set(count_clone.get() + 1);
            false
        });

        dispatch(KeyboardEvent::new(Key::ArrowLeft));
        assert_eq!(count.get(), 1);

        dispatch(KeyboardEvent::new(Key::ArrowRight));
        assert_eq!(count.get(), 2);

        cleanup();

        dispatch(KeyboardEvent::new(Key::Escape));
        assert_eq!(count.get(), 2); // No more increments
    }

    #[test]
    fn test_key_specific_handler() {
        setup();

        let escape_count = Rc::new(Cell::new(0));
        let escape_clone = escape_count.clone();

        let cleanup = on_key(Key::Escape, move || {
            escape_clone.set(escape_clone.get() + 1);
            true
        });

        dispatch(KeyboardEvent::new(Key::Char('a')));
        assert_eq!(escape_count.get(), 0);

        dispatch(KeyboardEvent::new(Key::Escape));
        assert_eq!(escape_count.get(), 1);

        cleanup();

        dispatch(KeyboardEvent::new(Key::Escape));
        assert_eq!(escape_count.get(), 1);
    }

    #[test]
    fn test_on_keys_both_arrows() {
        setup();

        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();

        let cleanup = on_keys(&[Key::ArrowLeft, Key::ArrowRight], move || {
            count_clone.set(count_clone.get() + 1);
            true
        });

        dispatch(KeyboardEvent::new(Key::ArrowLeft));
        dispatch(KeyboardEvent::new(Key::ArrowRight));
        assert_eq!(count.get(), 2);

        // Unrelated key ignored
        dispatch(KeyboardEvent::new(Key::Enter));
        assert_eq!(count.get(), 2);

        cleanup();

        dispatch(KeyboardEvent::new(Key::ArrowLeft));
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_handler_consumption() {
        setup();

        // First handler consumes
        let _c1 = on_key(Key::Escape, move || true);

        let reached = Rc::new(Cell::new(false));
        let reached_clone = reached.clone();

        // Global handler should not be called if key handler consumes
        let _c2 = on(move |_| {
            reached_clone.set(true);
            false
        });

        let result = dispatch(KeyboardEvent::new(Key::Escape));
        assert!(result);
        assert!(!reached.get());
    }

    #[test]
    fn test_only_press_dispatched() {
        setup();

        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();

        let _cleanup = on(move |_| {
            count_clone.set(count_clone.get() + 1);
            false
        });

        dispatch(KeyboardEvent::new(Key::ArrowRight));
        assert_eq!(count.get(), 1);

        dispatch(KeyboardEvent {
            key: Key::ArrowRight,
            modifiers: Modifiers::default(),
            state: KeyState::Repeat,
        });
        assert_eq!(count.get(), 1);

        dispatch(KeyboardEvent {
            key: Key::ArrowRight,
            modifiers: Modifiers::default(),
            state: KeyState::Release,
        });
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_modifiers() {
        setup();

        let seen = Rc::new(Cell::new(false));
        let seen_clone = seen.clone();

        let _cleanup = on(move |event| {
            if event.modifiers.ctrl && event.key == Key::Char('c') {
                seen_clone.set(true);
            }
            false
        });

        dispatch(KeyboardEvent::with_modifiers(Key::Char('c'), Modifiers::ctrl()));
        assert!(seen.get());
    }
}
