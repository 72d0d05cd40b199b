//! Sticky Module - Pin the nav when the header scrolls away
//!
//! The nav becomes sticky exactly when the header has left the viewport.
//! "Left" is measured against a viewport shrunk by the nav's own height
//! (a negative root margin), so the nav pins at the moment it would start
//! covering content rather than when the header's last row disappears.

use spark_signals::Signal;

use crate::state::viewport::{self, ObserverOptions};
use crate::types::{ClassFlags, Element};

/// Observe the header and drive STICKY on the nav's class signal.
///
/// Returns a cleanup function that stops the observation.
pub fn setup_sticky(nav_classes: Signal<ClassFlags>, nav_height: u16) -> impl FnOnce() {
    let options = ObserverOptions {
        threshold: 0.0,
        root_margin: -(nav_height as i16),
        once: false,
    };

    viewport::observe(Element::Header, options, move |entry| {
        let mut classes = nav_classes.get();
        classes.set(ClassFlags::STICKY, !entry.is_intersecting);
        nav_classes.set(classes);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::viewport::{reset_viewport_state, set_element_rect, set_viewport};
    use spark_signals::signal;

    fn setup() {
        reset_viewport_state();
    }

    #[test]
    fn test_nav_pins_when_header_leaves() {
        setup();

        set_element_rect(Element::Header, 0, 30);
        set_viewport(0, 24);

        let nav_classes = signal(ClassFlags::empty());
        let _cleanup = setup_sticky(nav_classes.clone(), 3);

        // Header on screen: not sticky
        assert!(!nav_classes.get().contains(ClassFlags::STICKY));

        // Scroll well past the header
        set_viewport(60, 24);
        assert!(nav_classes.get().contains(ClassFlags::STICKY));

        // Back to the top
        set_viewport(0, 24);
        assert!(!nav_classes.get().contains(ClassFlags::STICKY));
    }

    #[test]
    fn test_margin_pins_before_header_fully_gone() {
        setup();

        // Header rows 0..30, nav height 3. At scroll 28 two header rows
        // are still on screen, but both sit inside the margin band.
        set_element_rect(Element::Header, 0, 30);
        set_viewport(0, 24);

        let nav_classes = signal(ClassFlags::empty());
        let _cleanup = setup_sticky(nav_classes.clone(), 3);

        set_viewport(28, 24);
        assert!(nav_classes.get().contains(ClassFlags::STICKY));
    }

    #[test]
    fn test_cleanup_stops_updates() {
        setup();

        set_element_rect(Element::Header, 0, 30);
        set_viewport(0, 24);

        let nav_classes = signal(ClassFlags::empty());
        let cleanup = setup_sticky(nav_classes.clone(), 3);
        cleanup();

        set_viewport(60, 24);
        assert!(!nav_classes.get().contains(ClassFlags::STICKY));
    }
}
