//! Core types for vitrine-tui.
//!
//! These types define the vocabulary the rest of the crate speaks:
//! class flags (the terminal analog of a DOM class list), section
//! identities, and the discriminated identity of observable page elements.

// =============================================================================
// Class Flags
// =============================================================================

bitflags::bitflags! {
    /// Presentation flags carried by page elements.
    ///
    /// The terminal analog of toggling CSS classes on elements: the same
    /// toggles are bits, so a renderer can test them without string
    /// comparisons and state modules can flip them atomically.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ClassFlags: u8 {
        /// Element is not displayed (modal, overlay).
        const HIDDEN = 1 << 0;
        /// Element is the single active one of its group (dot, tab).
        const ACTIVE = 1 << 1;
        /// Nav is pinned to the top of the viewport.
        const STICKY = 1 << 2;
        /// Section has not been revealed yet.
        const SECTION_HIDDEN = 1 << 3;
        /// Image still shows its low-resolution placeholder.
        const LAZY_IMG = 1 << 4;
    }
}

// =============================================================================
// Section Identity
// =============================================================================

/// Identity of a page section.
///
/// Nav links address sections through anchors of the form `#section--N`.
/// Parsing is explicit: a malformed anchor yields `None`, never a default
/// section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionId(pub u16);

impl SectionId {
    /// Parse a `#section--N` anchor into a section identity.
    pub fn from_anchor(anchor: &str) -> Option<Self> {
        let number = anchor.strip_prefix('#')?.strip_prefix("section--")?;
        number.parse::<u16>().ok().map(SectionId)
    }

    /// The anchor string this section answers to.
    pub fn anchor(&self) -> String {
        format!("#section--{}", self.0)
    }
}

// =============================================================================
// Element Identity
// =============================================================================

/// Identity of an element whose viewport visibility can be observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    /// The page header (observed for the sticky nav).
    Header,
    /// A content section (observed for reveal-on-scroll).
    Section(SectionId),
    /// A lazily loaded image, identified by its slot index.
    Image(usize),
    /// The page footer. Laid out but never observed.
    Footer,
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_flags_toggle() {
        let mut classes = ClassFlags::HIDDEN;
        assert!(classes.contains(ClassFlags::HIDDEN));

        classes.set(ClassFlags::HIDDEN, false);
        classes.set(ClassFlags::ACTIVE, true);
        assert_eq!(classes, ClassFlags::ACTIVE);
    }

    #[test]
    fn test_section_anchor_roundtrip() {
        let id = SectionId(2);
        assert_eq!(id.anchor(), "#section--2");
        assert_eq!(SectionId::from_anchor("#section--2"), Some(id));
    }

    #[test]
    fn test_section_anchor_rejects_malformed() {
        assert_eq!(SectionId::from_anchor("section--1"), None); // missing '#'
        assert_eq!(SectionId::from_anchor("#section-1"), None);
        assert_eq!(SectionId::from_anchor("#section--"), None);
        assert_eq!(SectionId::from_anchor("#section--abc"), None);
        assert_eq!(SectionId::from_anchor(""), None);
    }

    #[test]
    fn test_element_identity() {
        assert_ne!(Element::Header, Element::Section(SectionId(1)));
        assert_ne!(Element::Image(0), Element::Image(1));
    }
}
