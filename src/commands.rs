//! Commands - The page's dispatch table
//!
//! Every input funnels into one discriminated [`Command`] before anything
//! mutates: a key or a resolved pointer [`Target`] maps to a command
//! through one table, and [`crate::page::Page::execute`] is the only place
//! commands take effect. No listener inspects raw input on its own.
//!
//! Resolution is where index payloads get normalized: a dot carries its
//! slide index as a raw string, and `resolve_target` parses and
//! range-checks it exactly once. Anything malformed resolves to no command.

use crate::state::keyboard::{Key, KeyboardEvent};
use crate::state::pointer::Target;
use crate::state::slider::parse_slide_index;
use crate::types::SectionId;

/// A page mutation, ready to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    NextSlide,
    PreviousSlide,
    JumpToSlide(usize),
    OpenModal,
    CloseModal,
    SelectTab(usize),
    ScrollTo(SectionId),
}

/// Resolve a keyboard event to a command.
///
/// Only three keys mean anything to the page: the arrow keys step the
/// slider and Escape closes the modal. Everything else - and every
/// non-press event - resolves to nothing.
pub fn resolve_key(event: &KeyboardEvent) -> Option<Command> {
    if !event.is_press() {
        return None;
    }
    match event.key {
        Key::ArrowLeft => Some(Command::PreviousSlide),
        Key::ArrowRight => Some(Command::NextSlide),
        Key::Escape => Some(Command::CloseModal),
        _ => None,
    }
}

/// Resolve a clicked target to a command.
///
/// `slide_count` bounds the dot payload check; an out-of-range or
/// malformed payload is dropped here, before it can reach the slider.
pub fn resolve_target(target: &Target, slide_count: usize) -> Option<Command> {
    match target {
        Target::SliderPrev => Some(Command::PreviousSlide),
        Target::SliderNext => Some(Command::NextSlide),
        Target::Dot { raw } => match parse_slide_index(raw, slide_count) {
            Some(index) => Some(Command::JumpToSlide(index)),
            None => {
                tracing::debug!(raw, "ignoring dot click with invalid slide payload");
                None
            }
        },
        Target::ModalOpen => Some(Command::OpenModal),
        Target::ModalClose | Target::Overlay => Some(Command::CloseModal),
        Target::TabButton(tab) => Some(Command::SelectTab(*tab)),
        Target::NavLink(section) => Some(Command::ScrollTo(*section)),
        Target::ScrollCta(section) => Some(Command::ScrollTo(*section)),
        Target::Logo => None,
    }
}
