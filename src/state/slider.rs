//! Slider Module - Carousel state and dot indicators
//!
//! The slider owns the current slide index and keeps three things in sync
//! on every change: each panel's horizontal offset, the active dot marker,
//! and any derived UI reading the current-slide signal.
//!
//! Navigation arrives from three independent sources - the forward/back
//! buttons, the arrow keys, and direct dot selection - and all of them
//! funnel into the same two primitives: `go_to` and the stepping
//! operations. The index wraps at both ends; there is no invalid state to
//! reach, so no operation returns an error.
//!
//! # Example
//!
//! ```ignore
//! use vitrine_tui::state::slider::Slider;
//!
//! let slider = Slider::new(5)?;
//! slider.next();
//! assert_eq!(slider.current(), 1);
//! slider.previous();
//! slider.previous();
//! assert_eq!(slider.current(), 4); // wrapped
//! ```

use spark_signals::{signal, Signal};

use crate::error::PageError;
use crate::types::ClassFlags;

// =============================================================================
// DOT INDICATOR
// =============================================================================

/// One indicator per slide, created once at construction.
///
/// Each dot carries its slide index as data, like a `data-slide`
/// attribute on markup. Exactly one dot is ACTIVE at any time.
#[derive(Debug)]
pub struct Dot {
    slide: usize,
    classes: Signal<ClassFlags>,
}

impl Dot {
    /// The slide this dot represents.
    pub fn slide(&self) -> usize {
        self.slide
    }

    /// The index payload the dot carries into pointer events.
    pub fn payload(&self) -> String {
        self.slide.to_string()
    }

    /// Whether this dot is the active one.
    pub fn is_active(&self) -> bool {
        self.classes.get().contains(ClassFlags::ACTIVE)
    }

    /// The dot's presentation flags signal (for renderers).
    pub fn classes(&self) -> Signal<ClassFlags> {
        self.classes.clone()
    }
}

// =============================================================================
// SLIDER
// =============================================================================

/// Carousel controller.
///
/// The panel set is fixed at construction; only the per-panel horizontal
/// offsets mutate afterwards. The current index is always in
/// `0..slide_count` - stepping wraps instead of overflowing.
#[derive(Debug)]
pub struct Slider {
    current: Signal<usize>,
    offsets: Vec<Signal<i32>>,
    dots: Vec<Dot>,
}

impl Slider {
    /// Create a slider for `slide_count` panels.
    ///
    /// This is the one-time initialization: it creates one dot per slide,
    /// positions the panels for slide 0, and marks dot 0 active. A slider
    /// with zero slides has no valid index, so that configuration is
    /// rejected up front instead of wrapping through `len - 1`.
    pub fn new(slide_count: usize) -> Result<Self, PageError> {
        if slide_count == 0 {
            return Err(PageError::NoSlides);
        }

        let slider = Self {
            current: signal(0),
            offsets: (0..slide_count).map(|_| signal(0)).collect(),
            dots: (0..slide_count)
                .map(|slide| Dot { slide, classes: signal(ClassFlags::empty()) })
                .collect(),
        };

        slider.render_at(0);
        slider.activate_indicator(0);
        Ok(slider)
    }

    /// Number of slides.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Always false; construction rejects zero slides.
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    fn max_slide(&self) -> usize {
        self.len() - 1
    }

    /// The current slide index.
    pub fn current(&self) -> usize {
        self.current.get()
    }

    /// The current-slide signal, for derived UI.
    pub fn current_signal(&self) -> Signal<usize> {
        self.current.clone()
    }

    /// Horizontal offset of a panel, in percent of panel width.
    pub fn offset(&self, panel: usize) -> Option<i32> {
        self.offsets.get(panel).map(|s| s.get())
    }

    /// All panel offsets, in panel order.
    pub fn offsets(&self) -> Vec<i32> {
        self.offsets.iter().map(|s| s.get()).collect()
    }

    /// The dot indicators, in slide order.
    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    /// The slide index of the active dot.
    pub fn active_dot(&self) -> Option<usize> {
        self.dots.iter().find(|d| d.is_active()).map(|d| d.slide)
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Position every panel relative to `index`.
    ///
    /// Panel `i` sits at `100 * (i - index)` percent: the shown panel at 0,
    /// earlier panels off-screen left, later panels off-screen right. This
    /// is the sole rendering rule; any slide transition effect is the
    /// renderer's declarative concern.
    pub fn render_at(&self, index: usize) {
        for (i, offset) in self.offsets.iter().enumerate() {
            offset.set(100 * (i as i32 - index as i32));
        }
    }

    /// Mark the dot for `index` active and every other dot inactive.
    ///
    /// Idempotent and O(N).
    pub fn activate_indicator(&self, index: usize) {
        for dot in &self.dots {
            let mut classes = dot.classes.get();
            classes.set(ClassFlags::ACTIVE, dot.slide == index);
            dot.classes.set(classes);
        }
    }

    fn go_to(&self, index: usize) {
        self.current.set(index);
        self.render_at(index);
        self.activate_indicator(index);
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Step forward, wrapping from the last slide to the first.
    pub fn next(&self) {
        let current = self.current.get();
        let next = if current == self.max_slide() { 0 } else { current + 1 };
        self.go_to(next);
    }

    /// Step back, wrapping from the first slide to the last.
    pub fn previous(&self) {
        let current = self.current.get();
        let previous = if current == 0 { self.max_slide() } else { current - 1 };
        self.go_to(previous);
    }

    /// Jump directly to a slide. Out-of-range indices are ignored.
    ///
    /// Returns whether the jump happened.
    pub fn jump_to(&self, index: usize) -> bool {
        if index > self.max_slide() {
            tracing::debug!(index, slides = self.len(), "ignoring out-of-range slide jump");
            return false;
        }
        self.go_to(index);
        true
    }

    /// Jump to the slide named by a raw index payload (from a dot click).
    ///
    /// The payload is parsed and range-checked explicitly; anything
    /// malformed or out of range is ignored. Returns whether the jump
    /// happened.
    pub fn jump_to_raw(&self, raw: &str) -> bool {
        match parse_slide_index(raw, self.len()) {
            Some(index) => {
                self.go_to(index);
                true
            }
            None => {
                tracing::debug!(raw, "ignoring malformed slide index payload");
                false
            }
        }
    }
}

// =============================================================================
// INDEX PARSING
// =============================================================================

/// Parse a raw slide-index payload into a bounded index.
///
/// Returns `None` for anything that is not a decimal integer in
/// `0..slide_count`. Negative numbers, fractions, and surrounding garbage
/// all fail; only leading/trailing whitespace is forgiven.
pub fn parse_slide_index(raw: &str, slide_count: usize) -> Option<usize> {
    let index = raw.trim().parse::<usize>().ok()?;
    (index < slide_count).then_some(index)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_slides_rejected() {
        assert_eq!(Slider::new(0).unwrap_err(), PageError::NoSlides);
    }

    #[test]
    fn test_initial_state() {
        let slider = Slider::new(3).unwrap();

        assert_eq!(slider.current(), 0);
        assert_eq!(slider.offsets(), vec![0, 100, 200]);
        assert_eq!(slider.active_dot(), Some(0));
        assert_eq!(slider.dots().len(), 3);
    }

    #[test]
    fn test_dot_payloads() {
        let slider = Slider::new(3).unwrap();
        let payloads: Vec<String> = slider.dots().iter().map(|d| d.payload()).collect();
        assert_eq!(payloads, vec!["0", "1", "2"]);
    }

    #[test]
    fn test_next_advances_and_wraps() {
        let slider = Slider::new(5).unwrap();

        slider.jump_to(4);
        slider.next();
        assert_eq!(slider.current(), 0);

        slider.next();
        assert_eq!(slider.current(), 1);
    }

    #[test]
    fn test_previous_steps_back_and_wraps() {
        let slider = Slider::new(5).unwrap();

        slider.previous();
        assert_eq!(slider.current(), 4);

        slider.previous();
        assert_eq!(slider.current(), 3);
    }

    #[test]
    fn test_index_stays_in_range() {
        // Any mix of stepping operations keeps the index valid.
        let slider = Slider::new(4).unwrap();

        for step in 0..25 {
            if step % 3 == 0 {
                slider.previous();
            } else {
                slider.next();
            }
            assert!(slider.current() < 4);
            assert_eq!(slider.active_dot(), Some(slider.current()));
        }
    }

    #[test]
    fn test_render_at_is_idempotent() {
        let slider = Slider::new(3).unwrap();

        slider.render_at(1);
        let first = slider.offsets();
        slider.render_at(1);
        assert_eq!(slider.offsets(), first);
        assert_eq!(first, vec![-100, 0, 100]);
    }

    #[test]
    fn test_jump_to_offsets() {
        let slider = Slider::new(5).unwrap();

        slider.jump_to(4);
        assert!(slider.jump_to(2));
        assert_eq!(slider.current(), 2);
        assert_eq!(slider.offset(2), Some(0));
        assert_eq!(slider.offset(0), Some(-200));
        assert_eq!(slider.offset(4), Some(200));
    }

    #[test]
    fn test_jump_to_out_of_range_ignored() {
        let slider = Slider::new(3).unwrap();

        slider.jump_to(1);
        assert!(!slider.jump_to(3));
        assert_eq!(slider.current(), 1);
        assert_eq!(slider.active_dot(), Some(1));
    }

    #[test]
    fn test_exactly_one_dot_active() {
        let slider = Slider::new(5).unwrap();

        for _ in 0..7 {
            slider.next();
            let active: Vec<usize> = slider
                .dots()
                .iter()
                .filter(|d| d.is_active())
                .map(|d| d.slide())
                .collect();
            assert_eq!(active, vec![slider.current()]);
        }
    }

    #[test]
    fn test_activate_indicator_idempotent() {
        let slider = Slider::new(3).unwrap();

        slider.activate_indicator(2);
        slider.activate_indicator(2);
        assert_eq!(slider.active_dot(), Some(2));
    }

    #[test]
    fn test_single_slide_is_fixed_point() {
        let slider = Slider::new(1).unwrap();

        slider.next();
        assert_eq!(slider.current(), 0);
        slider.previous();
        assert_eq!(slider.current(), 0);
        assert_eq!(slider.offsets(), vec![0]);
        assert_eq!(slider.active_dot(), Some(0));
    }

    #[test]
    fn test_jump_to_raw_parses_payload() {
        let slider = Slider::new(5).unwrap();

        assert!(slider.jump_to_raw("3"));
        assert_eq!(slider.current(), 3);

        assert!(slider.jump_to_raw(" 1 "));
        assert_eq!(slider.current(), 1);
    }

    #[test]
    fn test_jump_to_raw_rejects_garbage() {
        let slider = Slider::new(5).unwrap();
        slider.jump_to(2);

        for raw in ["", "banana", "-1", "1.5", "5", "99", "2x"] {
            assert!(!slider.jump_to_raw(raw), "payload {raw:?} should be rejected");
            assert_eq!(slider.current(), 2);
            assert_eq!(slider.active_dot(), Some(2));
        }
    }

    #[test]
    fn test_parse_slide_index_bounds() {
        assert_eq!(parse_slide_index("0", 5), Some(0));
        assert_eq!(parse_slide_index("4", 5), Some(4));
        assert_eq!(parse_slide_index("5", 5), None);
        assert_eq!(parse_slide_index("0", 0), None);
    }

    #[test]
    fn test_current_signal_tracks_navigation() {
        let slider = Slider::new(3).unwrap();
        let current = slider.current_signal();

        slider.next();
        assert_eq!(current.get(), 1);
        slider.jump_to(2);
        assert_eq!(current.get(), 2);
    }
}
