//! Viewport Module - Visibility observation for page elements
//!
//! Terminal analog of the browser's IntersectionObserver. Observable
//! elements register a rectangle (row offset and height in page
//! coordinates); the module holds the scroll offset and viewport height
//! and recomputes every observer's intersection whenever either changes.
//!
//! Callbacks fire only on intersection-state *transitions* (and once at
//! `observe` time to report the initial state), so scrolling within a
//! section does not spam handlers. Observers created with `once` remove
//! themselves after their first intersecting entry.
//!
//! Callbacks run after the registry borrow is released, so they are free
//! to observe, unobserve, or move the viewport themselves.
//!
//! # API
//!
//! - `set_element_rect(element, y, height)` - Register element geometry
//! - `set_viewport(scroll_y, height)` - Move the viewport, firing observers
//! - `observe(element, options, fn)` - Watch an element, returns cleanup
//! - `observer_count` / `reset_viewport_state` - Test support

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::types::Element;

// =============================================================================
// TYPES
// =============================================================================

/// Observation parameters, mirroring IntersectionObserver options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    /// Fraction of the element that must be visible to count as
    /// intersecting. Zero means any overlap counts.
    pub threshold: f32,
    /// Rows added to each end of the viewport before testing. Negative
    /// values shrink the effective viewport (the sticky nav's
    /// `-navHeight`).
    pub root_margin: i16,
    /// Unobserve after the first intersecting entry.
    pub once: bool,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self { threshold: 0.0, root_margin: 0, once: false }
    }
}

/// What an observer callback receives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry {
    pub element: Element,
    /// Visible fraction of the element, in [0, 1].
    pub ratio: f32,
    pub is_intersecting: bool,
}

type ObserverCallback = Rc<dyn Fn(&Entry)>;

struct Observer {
    id: usize,
    element: Element,
    options: ObserverOptions,
    callback: ObserverCallback,
    last_intersecting: Option<bool>,
}

// =============================================================================
// STATE
// =============================================================================

struct ViewportState {
    scroll_y: u16,
    height: u16,
    rects: HashMap<Element, (u16, u16)>,
    observers: Vec<Observer>,
    next_id: usize,
}

impl ViewportState {
    fn new() -> Self {
        Self {
            scroll_y: 0,
            height: 24,
            rects: HashMap::new(),
            observers: Vec::new(),
            next_id: 0,
        }
    }
}

thread_local! {
    static STATE: RefCell<ViewportState> = RefCell::new(ViewportState::new());
}

// =============================================================================
// INTERSECTION MATH
// =============================================================================

/// Intersection of an element rect with the (margin-adjusted) viewport.
fn intersect(
    y: u16,
    height: u16,
    scroll_y: u16,
    viewport_height: u16,
    options: &ObserverOptions,
) -> (f32, bool) {
    // A negative margin shrinks the root from both ends.
    let root_top = scroll_y as i32 - options.root_margin as i32;
    let root_bottom = scroll_y as i32 + viewport_height as i32 + options.root_margin as i32;

    let top = y as i32;
    let bottom = top + height as i32;

    let overlap = (bottom.min(root_bottom) - top.max(root_top)).max(0);
    let ratio = if height == 0 { 0.0 } else { overlap as f32 / height as f32 };

    let is_intersecting = if options.threshold <= 0.0 {
        overlap > 0
    } else {
        ratio >= options.threshold
    };

    (ratio, is_intersecting)
}

/// Re-evaluate every observer and fire callbacks on transitions.
///
/// Due entries are collected under the registry borrow, then fired after
/// it drops. `once` observers that just intersected are removed before
/// their callback runs, so a callback can safely re-enter this module.
fn evaluate() {
    let due: Vec<(ObserverCallback, Entry)> = STATE.with(|state| {
        let mut state = state.borrow_mut();
        let scroll_y = state.scroll_y;
        let height = state.height;
        let rects = state.rects.clone();

        let mut due = Vec::new();
        let mut done: Vec<usize> = Vec::new();

        for observer in &mut state.observers {
            let Some(&(y, h)) = rects.get(&observer.element) else {
                continue; // No geometry yet; nothing to report.
            };

            let (ratio, is_intersecting) = intersect(y, h, scroll_y, height, &observer.options);

            if observer.last_intersecting != Some(is_intersecting) {
                observer.last_intersecting = Some(is_intersecting);
                let entry = Entry { element: observer.element, ratio, is_intersecting };
                due.push((observer.callback.clone(), entry));
            }

            if observer.options.once && is_intersecting {
                done.push(observer.id);
            }
        }

        state.observers.retain(|o| !done.contains(&o.id));
        due
    });

    for (callback, entry) in due {
        callback(&entry);
    }
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Register (or move) an element's rectangle in page coordinates.
pub fn set_element_rect(element: Element, y: u16, height: u16) {
    STATE.with(|state| {
        state.borrow_mut().rects.insert(element, (y, height));
    });
    evaluate();
}

/// Move the viewport. Fires observers whose intersection state changed.
pub fn set_viewport(scroll_y: u16, height: u16) {
    STATE.with(|state| {
        let mut state = state.borrow_mut();
        state.scroll_y = scroll_y;
        state.height = height;
    });
    evaluate();
}

/// The current (scroll_y, height) of the viewport.
pub fn viewport() -> (u16, u16) {
    STATE.with(|state| {
        let state = state.borrow();
        (state.scroll_y, state.height)
    })
}

/// Watch an element. The callback fires immediately with the current
/// state, then on every intersection transition. Returns a cleanup
/// function; `once` observers also clean themselves up after first
/// intersecting.
pub fn observe<F>(element: Element, options: ObserverOptions, callback: F) -> impl FnOnce()
where
    F: Fn(&Entry) + 'static,
{
    let id = STATE.with(|state| {
        let mut state = state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        state.observers.push(Observer {
            id,
            element,
            options,
            callback: Rc::new(callback),
            last_intersecting: None,
        });
        id
    });
    evaluate();

    move || {
        STATE.with(|state| {
            state.borrow_mut().observers.retain(|o| o.id != id);
        });
    }
}

/// Stop observing an element entirely.
pub fn unobserve(element: Element) {
    STATE.with(|state| {
        state.borrow_mut().observers.retain(|o| o.element != element);
    });
}

/// Number of live observers (for tests).
pub fn observer_count() -> usize {
    STATE.with(|state| state.borrow().observers.len())
}

/// Reset all viewport state (for testing).
pub fn reset_viewport_state() {
    STATE.with(|state| {
        *state.borrow_mut() = ViewportState::new();
    });
}

// =============================================================================
// TESTS
// =============================================================================
