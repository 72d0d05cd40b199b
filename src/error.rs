//! Configuration errors.
//!
//! Only configuration problems surface as errors: a page that cannot be
//! assembled must fail at mount time rather than compute undefined offsets
//! later. Runtime input problems (a malformed dot payload, an out-of-range
//! index) are guard clauses that ignore the event, never errors.

use thiserror::Error;

use crate::types::SectionId;

/// Errors raised while assembling a page.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PageError {
    /// The slider was configured with zero slides. With no slides there is
    /// no valid index and the wraparound arithmetic is undefined.
    #[error("slider requires at least one slide")]
    NoSlides,

    /// The tab panel was configured with zero tabs.
    #[error("tab panel requires at least one tab")]
    NoTabs,

    /// The page has no sections to lay out.
    #[error("page has no sections")]
    EmptyPage,

    /// A nav link points at a section the page does not contain.
    #[error("no section {0:?} on this page")]
    UnknownSection(SectionId),
}
