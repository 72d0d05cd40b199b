//! Page Module - The assembled page shell
//!
//! [`Page::mount`] builds every controller exactly once from a
//! [`PageConfig`], computes the column layout, seeds the viewport module
//! with element geometry, and registers the sticky/reveal/lazy observers.
//! After that, everything is event-driven: the embedding event loop feeds
//! [`InputEvent`]s to [`Page::handle_event`], which resolves them through
//! the command table and executes against the owned controllers.
//!
//! Handler priority on keys matches the usual chain: application handlers
//! registered through the keyboard module get the event first; the page's
//! own command resolution only runs if none of them consumed it.
//!
//! The renderer owns screen coordinates. It tells the page where the
//! clickable chrome is via [`Page::set_targets`] whenever it lays the
//! frame out; the page never invents rectangles.
//!
//! # Example
//!
//! ```ignore
//! use vitrine_tui::page::{Page, PageConfig};
//! use vitrine_tui::input::{poll_event, InputEvent};
//! use std::time::Duration;
//!
//! let mut page = Page::mount(PageConfig::default())?;
//! loop {
//!     if let Ok(Some(event)) = poll_event(Duration::from_millis(16)) {
//!         page.handle_event(event);
//!     }
//! }
//! ```

use spark_signals::{signal, Signal};

use crate::commands::{self, Command};
use crate::error::PageError;
use crate::input::InputEvent;
use crate::layout::{compute_page_layout, ImageSpec, PageLayout, SectionSpec};
use crate::state::keyboard;
use crate::state::modal::Modal;
use crate::state::nav::{NavMenu, DEFAULT_FADE_LEVEL};
use crate::state::pointer::{self, PointerAction, Rect, Target};
use crate::state::reveal::{setup_lazy_image, setup_section_reveal, ImageSlot};
use crate::state::slider::Slider;
use crate::state::sticky::setup_sticky;
use crate::state::tabs::Tabs;
use crate::state::viewport;
use crate::types::{ClassFlags, Element, SectionId};

// =============================================================================
// CONFIG
// =============================================================================

/// Everything needed to assemble a page.
#[derive(Debug, Clone)]
pub struct PageConfig {
    /// Number of slides in the carousel.
    pub slide_count: usize,
    /// Number of tabs in the tabbed panel.
    pub tab_count: usize,
    /// Sections the nav links point at, in menu order.
    pub nav_links: Vec<SectionId>,
    /// The content sections, top to bottom.
    pub sections: Vec<SectionSpec>,
    /// Header height in rows.
    pub header_height: u16,
    /// Footer height in rows.
    pub footer_height: u16,
    /// Nav bar height in rows (also the sticky margin).
    pub nav_height: u16,
    /// Page width in columns.
    pub width: u16,
    /// Viewport height in rows.
    pub viewport_height: u16,
    /// Opacity of non-hovered nav links while one is hovered.
    pub fade_level: f32,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            slide_count: 3,
            tab_count: 3,
            nav_links: vec![SectionId(1), SectionId(2), SectionId(3)],
            sections: vec![
                SectionSpec::with_images(
                    SectionId(1),
                    40,
                    vec![ImageSpec {
                        placeholder: "digital-lazy.jpg".into(),
                        src: "digital.jpg".into(),
                        offset: 10,
                        height: 8,
                    }],
                ),
                SectionSpec::new(SectionId(2), 45),
                SectionSpec::new(SectionId(3), 40),
            ],
            header_height: 30,
            footer_height: 12,
            nav_height: 3,
            width: 80,
            viewport_height: 24,
            fade_level: DEFAULT_FADE_LEVEL,
        }
    }
}

// =============================================================================
// SECTIONS
// =============================================================================

/// Runtime state of one content section.
#[derive(Debug)]
pub struct PageSection {
    id: SectionId,
    classes: Signal<ClassFlags>,
}

impl PageSection {
    pub fn id(&self) -> SectionId {
        self.id
    }

    pub fn classes(&self) -> Signal<ClassFlags> {
        self.classes.clone()
    }

    pub fn is_revealed(&self) -> bool {
        !self.classes.get().contains(ClassFlags::SECTION_HIDDEN)
    }
}

// =============================================================================
// PAGE
// =============================================================================

/// The mounted page: owns every controller plus the scroll position.
pub struct Page {
    slider: Slider,
    modal: Modal,
    tabs: Tabs,
    nav: NavMenu,
    sections: Vec<PageSection>,
    images: Vec<ImageSlot>,
    layout: PageLayout,
    scroll: Signal<u16>,
    viewport_height: Signal<u16>,
    cleanups: Vec<Box<dyn FnOnce()>>,
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("slider", &self.slider)
            .field("modal", &self.modal)
            .field("tabs", &self.tabs)
            .field("nav", &self.nav)
            .field("sections", &self.sections)
            .field("images", &self.images)
            .field("layout", &self.layout)
            .field("scroll", &self.scroll)
            .field("viewport_height", &self.viewport_height)
            .finish_non_exhaustive()
    }
}

impl Page {
    /// Assemble and wire the page. Runs exactly once per page lifetime;
    /// configuration problems fail here, before any event is handled.
    pub fn mount(config: PageConfig) -> Result<Self, PageError> {
        for link in &config.nav_links {
            if !config.sections.iter().any(|s| s.id == *link) {
                return Err(PageError::UnknownSection(*link));
            }
        }

        let slider = Slider::new(config.slide_count)?;
        let tabs = Tabs::new(config.tab_count)?;
        let modal = Modal::new();
        let nav = NavMenu::with_fade_level(config.nav_links.iter().copied(), config.fade_level);

        let layout = compute_page_layout(
            config.header_height,
            &config.sections,
            config.footer_height,
            config.width,
        )?;

        // Seed the viewport module before any observer registers, so the
        // initial entries see real geometry.
        for (element, geometry) in layout.blocks() {
            viewport::set_element_rect(element, geometry.y, geometry.height);
        }
        viewport::set_viewport(0, config.viewport_height);

        let sections: Vec<PageSection> = config
            .sections
            .iter()
            .map(|spec| PageSection { id: spec.id, classes: signal(ClassFlags::empty()) })
            .collect();

        let images: Vec<ImageSlot> = config
            .sections
            .iter()
            .flat_map(|spec| spec.images.iter())
            .map(|image| ImageSlot::new(image.placeholder.clone(), image.src.clone()))
            .collect();

        let mut cleanups: Vec<Box<dyn FnOnce()>> = Vec::new();
        cleanups.push(Box::new(setup_sticky(nav.classes(), config.nav_height)));
        for section in &sections {
            cleanups.push(Box::new(setup_section_reveal(
                Element::Section(section.id),
                section.classes(),
            )));
        }
        for (index, slot) in images.iter().enumerate() {
            cleanups.push(Box::new(setup_lazy_image(Element::Image(index), slot)));
        }

        tracing::debug!(
            sections = sections.len(),
            slides = config.slide_count,
            content_height = layout.content_height,
            "page mounted"
        );

        Ok(Self {
            slider,
            modal,
            tabs,
            nav,
            sections,
            images,
            layout,
            scroll: signal(0),
            viewport_height: signal(config.viewport_height),
            cleanups,
        })
    }

    /// Drop all observer registrations.
    pub fn unmount(mut self) {
        for cleanup in self.cleanups.drain(..) {
            cleanup();
        }
    }

    // -------------------------------------------------------------------------
    // Event handling
    // -------------------------------------------------------------------------

    /// Handle one input event. Returns true if the event did something.
    pub fn handle_event(&self, event: InputEvent) -> bool {
        match event {
            InputEvent::Key(key_event) => {
                // Application handlers first, page commands second.
                if keyboard::dispatch(key_event) {
                    return true;
                }
                match commands::resolve_key(&key_event) {
                    Some(command) => self.execute(command),
                    None => false,
                }
            }
            InputEvent::Pointer(pointer_event) => {
                let consumed = pointer::dispatch(pointer_event.clone());
                self.sync_nav_fade();
                if consumed {
                    return true;
                }
                match pointer_event.action {
                    PointerAction::Down => {
                        match pointer::hit_test(pointer_event.x, pointer_event.y)
                            .as_ref()
                            .and_then(|t| commands::resolve_target(t, self.slider.len()))
                        {
                            Some(command) => self.execute(command),
                            None => false,
                        }
                    }
                    PointerAction::Wheel => {
                        self.scroll_by(pointer_event.wheel.unwrap_or(0))
                    }
                    PointerAction::Up | PointerAction::Move => false,
                }
            }
            InputEvent::Resize(width, height) => {
                self.viewport_height.set(height);
                pointer::resize_hit_map(width, height);
                // The scroll range depends on the viewport height; re-clamp.
                self.set_scroll(self.scroll.get());
                false
            }
            InputEvent::None => false,
        }
    }

    /// Execute one command. Returns true if it changed anything.
    pub fn execute(&self, command: Command) -> bool {
        tracing::trace!(?command, "executing");
        match command {
            Command::NextSlide => {
                self.slider.next();
                true
            }
            Command::PreviousSlide => {
                self.slider.previous();
                true
            }
            Command::JumpToSlide(index) => self.slider.jump_to(index),
            Command::OpenModal => {
                self.modal.open();
                true
            }
            Command::CloseModal => {
                if self.modal.is_open() {
                    self.modal.close();
                    true
                } else {
                    false
                }
            }
            Command::SelectTab(tab) => self.tabs.select(tab),
            Command::ScrollTo(section) => self.scroll_to(section),
        }
    }

    /// Mirror the hover state into the nav fade.
    fn sync_nav_fade(&self) {
        match pointer::hovered_target() {
            Some(Target::NavLink(section)) => self.nav.fade_except(section),
            _ => self.nav.clear_fade(),
        }
    }

    // -------------------------------------------------------------------------
    // Scrolling
    // -------------------------------------------------------------------------

    /// Scroll so a section's top row is at the top of the viewport.
    /// Unknown sections are ignored. Returns whether scrolling happened.
    pub fn scroll_to(&self, section: SectionId) -> bool {
        let Some(geometry) = self.layout.block(Element::Section(section)) else {
            tracing::debug!(?section, "ignoring scroll to unknown section");
            return false;
        };
        self.set_scroll(geometry.y);
        true
    }

    /// Scroll by a delta, clamped to the page.
    /// Returns false when already at the boundary.
    pub fn scroll_by(&self, delta: i32) -> bool {
        let current = self.scroll.get();
        let next = (current as i32 + delta).clamp(0, self.max_scroll() as i32) as u16;
        if next == current {
            return false;
        }
        self.set_scroll(next);
        true
    }

    /// Set the scroll offset, clamped, and refresh visibility observers.
    pub fn set_scroll(&self, y: u16) {
        let clamped = y.min(self.max_scroll());
        self.scroll.set(clamped);
        viewport::set_viewport(clamped, self.viewport_height.get());
    }

    // -------------------------------------------------------------------------
    // Targets
    // -------------------------------------------------------------------------

    /// Replace the clickable chrome. Called by the renderer per layout.
    pub fn set_targets(&self, targets: &[(Rect, Target)]) {
        pointer::clear_targets();
        for (rect, target) in targets {
            pointer::add_target(*rect, target.clone());
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn slider(&self) -> &Slider {
        &self.slider
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn tabs(&self) -> &Tabs {
        &self.tabs
    }

    pub fn nav(&self) -> &NavMenu {
        &self.nav
    }

    pub fn sections(&self) -> &[PageSection] {
        &self.sections
    }

    pub fn section(&self, id: SectionId) -> Option<&PageSection> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn images(&self) -> &[ImageSlot] {
        &self.images
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn scroll(&self) -> u16 {
        self.scroll.get()
    }

    pub fn scroll_signal(&self) -> Signal<u16> {
        self.scroll.clone()
    }

    /// Largest valid scroll offset for the current viewport height.
    pub fn max_scroll(&self) -> u16 {
        self.layout.content_height.saturating_sub(self.viewport_height.get())
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        for cleanup in self.cleanups.drain(..) {
            cleanup();
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
