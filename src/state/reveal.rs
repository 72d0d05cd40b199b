//! Reveal Module - Scroll-triggered section reveals and lazy images
//!
//! Sections start hidden and reveal themselves the first time 15% of them
//! enters the viewport; revealing is one-way, so the observer unobserves
//! itself afterwards. Images start on a low-resolution placeholder and
//! swap to their full source the first time any part of them is visible.

use spark_signals::{signal, Signal};

use crate::state::viewport::{self, ObserverOptions};
use crate::types::{ClassFlags, Element};

/// Fraction of a section that must be visible before it reveals.
pub const REVEAL_THRESHOLD: f32 = 0.15;

// =============================================================================
// SECTION REVEAL
// =============================================================================

/// Hide a section and reveal it on its first qualifying intersection.
///
/// Returns a cleanup function (the observer also removes itself after
/// revealing).
pub fn setup_section_reveal(
    element: Element,
    classes: Signal<ClassFlags>,
) -> impl FnOnce() {
    // Hidden from setup until first reveal, like the class added on load.
    let mut initial = classes.get();
    initial.set(ClassFlags::SECTION_HIDDEN, true);
    classes.set(initial);

    let options = ObserverOptions {
        threshold: REVEAL_THRESHOLD,
        root_margin: 0,
        once: true,
    };

    viewport::observe(element, options, move |entry| {
        if !entry.is_intersecting {
            return;
        }
        let mut flags = classes.get();
        flags.set(ClassFlags::SECTION_HIDDEN, false);
        classes.set(flags);
    })
}

// =============================================================================
// LAZY IMAGES
// =============================================================================

/// An image that starts on a placeholder source.
#[derive(Debug)]
pub struct ImageSlot {
    src: Signal<String>,
    full_src: String,
    classes: Signal<ClassFlags>,
}

impl ImageSlot {
    pub fn new(placeholder: impl Into<String>, full_src: impl Into<String>) -> Self {
        Self {
            src: signal(placeholder.into()),
            full_src: full_src.into(),
            classes: signal(ClassFlags::LAZY_IMG),
        }
    }

    /// The source currently shown.
    pub fn src(&self) -> String {
        self.src.get()
    }

    /// The source signal (for renderers).
    pub fn src_signal(&self) -> Signal<String> {
        self.src.clone()
    }

    /// The full-resolution source this slot will load.
    pub fn full_src(&self) -> &str {
        &self.full_src
    }

    pub fn is_loaded(&self) -> bool {
        !self.classes.get().contains(ClassFlags::LAZY_IMG)
    }

    /// The image's presentation flags signal.
    pub fn classes(&self) -> Signal<ClassFlags> {
        self.classes.clone()
    }

    /// Swap in the full-resolution source.
    pub fn load(&self) {
        self.src.set(self.full_src.clone());
        // A terminal source swap has no async decode, so the un-blur that
        // a browser defers to the load event happens right away.
        self.mark_loaded();
    }

    /// Drop the LAZY_IMG flag. Split out from [`load`](Self::load) so a
    /// renderer with genuinely async decoding can call it separately.
    pub fn mark_loaded(&self) {
        let mut flags = self.classes.get();
        flags.set(ClassFlags::LAZY_IMG, false);
        self.classes.set(flags);
    }
}

/// Load an image slot the first time it becomes visible.
///
/// Returns a cleanup function (the observer also removes itself after
/// loading).
pub fn setup_lazy_image(element: Element, slot: &ImageSlot) -> impl FnOnce() + use<> {
    let src = slot.src.clone();
    let full_src = slot.full_src.clone();
    let classes = slot.classes.clone();

    let options = ObserverOptions { threshold: 0.0, root_margin: 0, once: true };

    viewport::observe(element, options, move |entry| {
        if !entry.is_intersecting {
            return;
        }
        src.set(full_src.clone());
        let mut flags = classes.get();
        flags.set(ClassFlags::LAZY_IMG, false);
        classes.set(flags);
    })
}

// =============================================================================
// TESTS
// =============================================================================
