//! Nav Module - Navigation menu fade and link resolution
//!
//! Hovering a nav link fades every *other* link and the logo to the
//! configured level; leaving the menu restores full opacity. The link
//! itself never fades. Links carry a typed [`SectionId`] rather than an
//! href string, so resolving a click needs no string matching.
//!
//! The STICKY flag on the menu is driven by the sticky module, not here.

use spark_signals::{signal, Signal};

use crate::types::{ClassFlags, SectionId};

/// Opacity links and logo rest at.
pub const FULL_OPACITY: f32 = 1.0;

/// Default opacity of non-hovered links while one is hovered.
pub const DEFAULT_FADE_LEVEL: f32 = 0.5;

/// One navigation link.
#[derive(Debug)]
pub struct NavLink {
    section: SectionId,
    opacity: Signal<f32>,
}

impl NavLink {
    /// The section this link scrolls to.
    pub fn section(&self) -> SectionId {
        self.section
    }

    pub fn opacity(&self) -> f32 {
        self.opacity.get()
    }

    /// The link's opacity signal (for renderers).
    pub fn opacity_signal(&self) -> Signal<f32> {
        self.opacity.clone()
    }
}

/// Navigation menu state.
#[derive(Debug)]
pub struct NavMenu {
    links: Vec<NavLink>,
    logo_opacity: Signal<f32>,
    classes: Signal<ClassFlags>,
    fade_level: f32,
}

impl NavMenu {
    pub fn new(sections: impl IntoIterator<Item = SectionId>) -> Self {
        Self::with_fade_level(sections, DEFAULT_FADE_LEVEL)
    }

    pub fn with_fade_level(
        sections: impl IntoIterator<Item = SectionId>,
        fade_level: f32,
    ) -> Self {
        Self {
            links: sections
                .into_iter()
                .map(|section| NavLink { section, opacity: signal(FULL_OPACITY) })
                .collect(),
            logo_opacity: signal(FULL_OPACITY),
            classes: signal(ClassFlags::empty()),
            fade_level,
        }
    }

    /// The links, in menu order.
    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    /// Find the link for a section.
    pub fn link_for(&self, section: SectionId) -> Option<&NavLink> {
        self.links.iter().find(|l| l.section == section)
    }

    pub fn logo_opacity(&self) -> f32 {
        self.logo_opacity.get()
    }

    /// The menu's presentation flags signal (carries STICKY).
    pub fn classes(&self) -> Signal<ClassFlags> {
        self.classes.clone()
    }

    pub fn is_sticky(&self) -> bool {
        self.classes.get().contains(ClassFlags::STICKY)
    }

    /// Fade every link except the hovered one, and the logo, to the
    /// configured level. Hovering a section with no link is a no-op.
    pub fn fade_except(&self, hovered: SectionId) {
        if self.link_for(hovered).is_none() {
            return;
        }
        for link in &self.links {
            let level = if link.section == hovered { FULL_OPACITY } else { self.fade_level };
            link.opacity.set(level);
        }
        self.logo_opacity.set(self.fade_level);
    }

    /// Restore every link and the logo to full opacity.
    pub fn clear_fade(&self) {
        for link in &self.links {
            link.opacity.set(FULL_OPACITY);
        }
        self.logo_opacity.set(FULL_OPACITY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu() -> NavMenu {
        NavMenu::new([SectionId(1), SectionId(2), SectionId(3)])
    }

    #[test]
    fn test_starts_at_full_opacity() {
        let nav = menu();
        assert!(nav.links().iter().all(|l| l.opacity() == FULL_OPACITY));
        assert_eq!(nav.logo_opacity(), FULL_OPACITY);
        assert!(!nav.is_sticky());
    }

    #[test]
    fn test_fade_spares_hovered_link() {
        let nav = menu();

        nav.fade_except(SectionId(2));
        for link in nav.links() {
            if link.section() == SectionId(2) {
                assert_eq!(link.opacity(), FULL_OPACITY);
            } else {
                assert_eq!(link.opacity(), DEFAULT_FADE_LEVEL);
            }
        }
        assert_eq!(nav.logo_opacity(), DEFAULT_FADE_LEVEL);
    }

    #[test]
    fn test_clear_fade_restores_all() {
        let nav = menu();

        nav.fade_except(SectionId(1));
        nav.clear_fade();
        assert!(nav.links().iter().all(|l| l.opacity() == FULL_OPACITY));
        assert_eq!(nav.logo_opacity(), FULL_OPACITY);
    }

    #[test]
    fn test_fade_unknown_section_is_noop() {
        let nav = menu();

        nav.fade_except(SectionId(9));
        assert!(nav.links().iter().all(|l| l.opacity() == FULL_OPACITY));
        assert_eq!(nav.logo_opacity(), FULL_OPACITY);
    }

    #[test]
    fn test_custom_fade_level() {
        let nav = NavMenu::with_fade_level([SectionId(1), SectionId(2)], 0.25);

        nav.fade_except(SectionId(1));
        assert_eq!(nav.link_for(SectionId(2)).unwrap().opacity(), 0.25);
    }

    #[test]
    fn test_link_lookup() {
        let nav = menu();
        assert!(nav.link_for(SectionId(3)).is_some());
        assert!(nav.link_for(SectionId(4)).is_none());
    }
}
