//! Pointer Module - Pointer event state and target registry
//!
//! The page's clickable and hoverable regions (nav links, slider buttons,
//! dots, tabs, the overlay) are registered as rectangles carrying a
//! discriminated [`Target`]. A [`HitMap`] gives O(1) position-to-target
//! lookup, so dispatch never has to guess what was under the pointer from
//! class names or positions of its own.
//!
//! The renderer owns the rectangles: it clears and refills the target map
//! whenever it lays the chrome out. This module only resolves positions,
//! tracks hover transitions, and dispatches to handlers.
//!
//! # API
//!
//! - `last_event` - Get last pointer event
//! - `hovered_target` - Get the target currently under the cursor
//! - `dispatch(event)` - Resolve the target and fire handlers
//! - `on_click(fn)` - Global click handler
//! - `on_hover(fn)` - Hover enter/leave handler
//! - `on_wheel(fn)` - Scroll wheel handler

use std::cell::RefCell;

use spark_signals::{signal, Signal};

use crate::types::SectionId;

// =============================================================================
// TYPES
// =============================================================================

/// A logical page target a pointer event can land on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    /// The slider's back button.
    SliderPrev,
    /// The slider's forward button.
    SliderNext,
    /// A dot indicator. Carries the raw slide-index payload exactly as the
    /// markup would; parsing happens at command resolution, nowhere else.
    Dot { raw: String },
    /// A "show modal" button.
    ModalOpen,
    /// The modal's close button.
    ModalClose,
    /// The dimmed overlay behind the modal.
    Overlay,
    /// A tab button, by tab index.
    TabButton(usize),
    /// A nav link addressing a section.
    NavLink(SectionId),
    /// The "learn more" call-to-action that scrolls to a section.
    ScrollCta(SectionId),
    /// The nav logo. Fades with the menu but triggers nothing.
    Logo,
}

/// Pointer action type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    Down,
    Up,
    Move,
    Wheel,
}

/// Pointer event
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub action: PointerAction,
    /// Column (0-indexed)
    pub x: u16,
    /// Row (0-indexed)
    pub y: u16,
    /// Wheel delta in rows; positive scrolls the page down.
    pub wheel: Option<i32>,
    /// Target at this position (filled by dispatch)
    pub target: Option<Target>,
}

impl PointerEvent {
    pub fn down(x: u16, y: u16) -> Self {
        Self { action: PointerAction::Down, x, y, wheel: None, target: None }
    }

    pub fn move_to(x: u16, y: u16) -> Self {
        Self { action: PointerAction::Move, x, y, wheel: None, target: None }
    }

    pub fn wheel(x: u16, y: u16, delta: i32) -> Self {
        Self { action: PointerAction::Wheel, x, y, wheel: Some(delta), target: None }
    }
}

/// A rectangle in screen cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }
}

// =============================================================================
// HIT MAP - O(1) Position to Target Lookup
// =============================================================================

/// Grid mapping screen cells to registered targets.
///
/// Cells store an index into the target table; `u32::MAX` marks an empty
/// cell. Later registrations win overlaps, matching paint order.
pub struct HitMap {
    width: u16,
    height: u16,
    cells: Vec<u32>,
    targets: Vec<Target>,
}

impl HitMap {
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![u32::MAX; size],
            targets: Vec::new(),
        }
    }

    /// Resize the map, clearing all contents.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells = vec![u32::MAX; width as usize * height as usize];
        self.targets.clear();
    }

    /// Remove all registered targets.
    pub fn clear(&mut self) {
        self.cells.fill(u32::MAX);
        self.targets.clear();
    }

    /// Register a target over a rectangle.
    pub fn add(&mut self, rect: Rect, target: Target) {
        let slot = self.targets.len() as u32;
        self.targets.push(target);

        for dy in 0..rect.height {
            let cy = rect.y + dy;
            if cy >= self.height {
                break;
            }
            for dx in 0..rect.width {
                let cx = rect.x + dx;
                if cx >= self.width {
                    break;
                }
                let idx = cy as usize * self.width as usize + cx as usize;
                self.cells[idx] = slot;
            }
        }
    }

    /// Look up the target at a position.
    pub fn get(&self, x: u16, y: u16) -> Option<&Target> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y as usize * self.width as usize + x as usize;
        let slot = self.cells.get(idx).copied()?;
        self.targets.get(slot as usize)
    }
}

// =============================================================================
// GLOBAL HIT MAP
// =============================================================================

thread_local! {
    static HIT_MAP: RefCell<HitMap> = RefCell::new(HitMap::new(80, 24));
}

/// Resize the global hit map (on terminal resize).
pub fn resize_hit_map(width: u16, height: u16) {
    HIT_MAP.with(|m| m.borrow_mut().resize(width, height));
}

/// Remove all targets from the global hit map.
pub fn clear_targets() {
    HIT_MAP.with(|m| m.borrow_mut().clear());
}

/// Register a target rectangle in the global hit map.
pub fn add_target(rect: Rect, target: Target) {
    HIT_MAP.with(|m| m.borrow_mut().add(rect, target));
}

/// Get the target at a position from the global hit map.
pub fn hit_test(x: u16, y: u16) -> Option<Target> {
    HIT_MAP.with(|m| m.borrow().get(x, y).cloned())
}

// =============================================================================
// REACTIVE STATE
// =============================================================================

thread_local! {
    static LAST_EVENT: Signal<Option<PointerEvent>> = signal(None);
    static POINTER_X: Signal<u16> = signal(0);
    static POINTER_Y: Signal<u16> = signal(0);
    static HOVERED: Signal<Option<Target>> = signal(None);
}

/// Get the last pointer event
pub fn last_event() -> Option<PointerEvent> {
    LAST_EVENT.with(|s| s.get())
}

/// Get current pointer position
pub fn pointer_position() -> (u16, u16) {
    (POINTER_X.with(|s| s.get()), POINTER_Y.with(|s| s.get()))
}

/// Get the target currently under the cursor
pub fn hovered_target() -> Option<Target> {
    HOVERED.with(|s| s.get())
}

// =============================================================================
// HANDLER REGISTRY
// =============================================================================

/// Handler for click events. Return true to consume the event.
pub type ClickHandler = Box<dyn Fn(&PointerEvent) -> bool>;

/// Handler for hover transitions: (left, entered).
pub type HoverHandler = Box<dyn Fn(Option<&Target>, Option<&Target>)>;

/// Handler for wheel events. Return true to consume the event.
pub type WheelHandler = Box<dyn Fn(i32) -> bool>;

struct HandlerRegistry {
    click_handlers: Vec<(usize, ClickHandler)>,
    hover_handlers: Vec<(usize, HoverHandler)>,
    wheel_handlers: Vec<(usize, WheelHandler)>,
    next_id: usize,
}

impl HandlerRegistry {
    fn new() -> Self {
        Self {
            click_handlers: Vec::new(),
            hover_handlers: Vec::new(),
            wheel_handlers: Vec::new(),
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

/// Register a global click handler. Returns cleanup function.
pub fn on_click<F>(handler: F) -> impl FnOnce()
where
    F: Fn(&PointerEvent) -> bool + 'static,
{
    let id = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id();
        reg.click_handlers.push((id, Box::new(handler)));
        id
    });

    move || {
        REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            reg.click_handlers.retain(|(handler_id, _)| *handler_id != id);
        });
    }
}

/// Register a hover transition handler. Returns cleanup function.
///
/// Fires whenever the target under the cursor changes, with the target
/// being left and the target being entered (either may be `None`).
pub fn on_hover<F>(handler: F) -> impl FnOnce()
where
    F: Fn(Option<&Target>, Option<&Target>) + 'static,
{
    let id = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id();
        reg.hover_handlers.push((id, Box::new(handler)));
        id
    });

    move || {
        REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            reg.hover_handlers.retain(|(handler_id, _)| *handler_id != id);
        });
    }
}

/// Register a wheel handler. Returns cleanup function.
pub fn on_wheel<F>(handler: F) -> impl FnOnce()
where
    F: Fn(i32) -> bool + 'static,
{
    let id = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id();
        reg.wheel_handlers.push((id, Box::new(handler)));
        id
    });

    move || {
        REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            reg.wheel_handlers.retain(|(handler_id, _)| *handler_id != id);
        });
    }
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Dispatch a pointer event.
/// Returns true if any handler consumed the event.
///
/// Every event updates position and hover state; `Down` events additionally
/// reach click handlers and `Wheel` events reach wheel handlers.
pub fn dispatch(mut event: PointerEvent) -> bool {
    event.target = hit_test(event.x, event.y);

    POINTER_X.with(|s| s.set(event.x));
    POINTER_Y.with(|s| s.set(event.y));
    LAST_EVENT.with(|s| s.set(Some(event.clone())));

    // Hover transition
    let prev = HOVERED.with(|s| s.get());
    if prev != event.target {
        HOVERED.with(|s| s.set(event.target.clone()));
        REGISTRY.with(|reg| {
            let reg = reg.borrow();
            for (_, handler) in &reg.hover_handlers {
                handler(prev.as_ref(), event.target.as_ref());
            }
        });
    }

    match event.action {
        PointerAction::Down => REGISTRY.with(|reg| {
            let reg = reg.borrow();
            for (_, handler) in &reg.click_handlers {
                if handler(&event) {
                    return true;
                }
            }
            false
        }),
        PointerAction::Wheel => {
            let delta = event.wheel.unwrap_or(0);
            REGISTRY.with(|reg| {
                let reg = reg.borrow();
                for (_, handler) in &reg.wheel_handlers {
                    if handler(delta) {
                        return true;
                    }
                }
                false
            })
        }
        PointerAction::Up | PointerAction::Move => false,
    }
}

/// Clear all state, handlers, and targets.
pub fn cleanup() {
    REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        reg.click_handlers.clear();
        reg.hover_handlers.clear();
        reg.wheel_handlers.clear();
    });
    HIT_MAP.with(|m| m.borrow_mut().clear());
    LAST_EVENT.with(|s| s.set(None));
    HOVERED.with(|s| s.set(None));
    POINTER_X.with(|s| s.set(0));
    POINTER_Y.with(|s| s.set(0));
}

/// Reset pointer state (for testing)
pub fn reset_pointer_state() {
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
        reset_pointer_state();
        resize_hit_map(80, 24);
    }

    #[test]
    fn test_hit_map_lookup() {
        setup();

        add_target(Rect::new(10, 5, 4, 1), Target::SliderNext);

        assert_eq!(hit_test(10, 5), Some(Target::SliderNext));
        assert_eq!(hit_test(13, 5), Some(Target::SliderNext));
        assert_eq!(hit_test(14, 5), None);
        assert_eq!(hit_test(10, 6), None);
    }

    #[test]
    fn test_hit_map_paint_order() {
        setup();

        // Overlay covers everything, modal close button painted on top
        add_target(Rect::new(0, 0, 80, 24), Target::Overlay);
        add_target(Rect::new(60, 2, 1, 1), Target::ModalClose);

        assert_eq!(hit_test(5, 5), Some(Target::Overlay));
        assert_eq!(hit_test(60, 2), Some(Target::ModalClose));
    }

    #[test]
    fn test_hit_map_out_of_bounds() {
        setup();

        add_target(Rect::new(0, 0, 80, 24), Target::Overlay);
        assert_eq!(hit_test(80, 0), None);
        assert_eq!(hit_test(0, 24), None);
    }

    #[test]
    fn test_hit_map_rect_clipped_to_grid() {
        setup();

        // Rect extends past the right edge; must not wrap to the next row
        add_target(Rect::new(78, 0, 10, 1), Target::SliderPrev);
        assert_eq!(hit_test(79, 0), Some(Target::SliderPrev));
        assert_eq!(hit_test(0, 1), None);
    }

    #[test]
    fn test_rect_at_coordinate_limit() {
        setup();

        // An origin outside the grid registers nothing, even at the
        // numeric limit of the coordinate space.
        add_target(Rect::new(u16::MAX, u16::MAX, 8, 8), Target::SliderNext);
        assert_eq!(hit_test(79, 23), None);
    }

    #[test]
    fn test_dispatch_fills_target() {
        setup();

        add_target(Rect::new(0, 0, 5, 1), Target::ModalOpen);
        dispatch(PointerEvent::down(2, 0));

        let event = last_event().unwrap();
        assert_eq!(event.target, Some(Target::ModalOpen));
    }

    #[test]
    fn test_click_handler_consumes() {
        setup();

        add_target(Rect::new(0, 0, 5, 1), Target::ModalOpen);

        let clicks = Rc::new(Cell::new(0));
        let clicks_clone = clicks.clone();
        let cleanup = on_click(move |event| {
            assert_eq!(event.target, Some(Target::ModalOpen));
            clicks_clone.set(clicks_clone.get() + 1);
            true
        });

        assert!(dispatch(PointerEvent::down(1, 0)));
        assert_eq!(clicks.get(), 1);

        cleanup();
        assert!(!dispatch(PointerEvent::down(1, 0)));
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn test_hover_transitions() {
        setup();

        add_target(Rect::new(0, 0, 5, 1), Target::NavLink(SectionId(1)));

        let transitions = Rc::new(Cell::new(0));
        let transitions_clone = transitions.clone();
        let _cleanup = on_hover(move |_left, _entered| {
            transitions_clone.set(transitions_clone.get() + 1);
        });

        // Enter the link
        dispatch(PointerEvent::move_to(2, 0));
        assert_eq!(hovered_target(), Some(Target::NavLink(SectionId(1))));
        assert_eq!(transitions.get(), 1);

        // Moving within the same target is not a transition
        dispatch(PointerEvent::move_to(3, 0));
        assert_eq!(transitions.get(), 1);

        // Leave it
        dispatch(PointerEvent::move_to(10, 10));
        assert_eq!(hovered_target(), None);
        assert_eq!(transitions.get(), 2);
    }

    #[test]
    fn test_wheel_handler() {
        setup();

        let total = Rc::new(Cell::new(0));
        let total_clone = total.clone();
        let _cleanup = on_wheel(move |delta| {
            total_clone.set(total_clone.get() + delta);
            true
        });

        assert!(dispatch(PointerEvent::wheel(0, 0, 3)));
        assert!(dispatch(PointerEvent::wheel(0, 0, -1)));
        assert_eq!(total.get(), 2);
    }

    #[test]
    fn test_dot_payload_stays_raw() {
        setup();

        // The hit map does not interpret payloads; a nonsense payload is
        // carried through untouched and rejected later at resolution.
        add_target(Rect::new(0, 0, 1, 1), Target::Dot { raw: "banana".into() });
        assert_eq!(hit_test(0, 0), Some(Target::Dot { raw: "banana".into() }));
    }
}
