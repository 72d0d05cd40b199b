//! # vitrine-tui
//!
//! Terminal rendition of a single-page marketing site's interactivity.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! fine-grained reactivity: every piece of presentation state (slide offsets,
//! active indicators, visibility flags, nav opacity) is a signal a renderer
//! can subscribe to.
//!
//! ## Architecture
//!
//! A [`page::Page`] owns one instance of each controller. Input flows in one
//! direction:
//! ```text
//! crossterm event → InputEvent → Command resolution → controller → signals
//! ```
//! Raw input (pointer payloads, key codes) is parsed and validated exactly
//! once, at the command boundary; controllers only ever see typed values.
//! Scroll-dependent behavior (sticky nav, section reveals, lazy images) runs
//! through the viewport module's observers rather than polling.
//!
//! ## Modules
//!
//! - [`types`] - Core types (ClassFlags, SectionId, Element)
//! - [`state`] - The controllers (slider, modal, tabs, nav) plus keyboard,
//!   pointer, and viewport dispatch
//! - [`commands`] - Typed commands and input-to-command resolution
//! - [`layout`] - Taffy column layout for the page's blocks
//! - [`input`] - Crossterm event bridge
//! - [`page`] - The assembled page shell

pub mod commands;
pub mod error;
pub mod input;
pub mod layout;
pub mod page;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use error::PageError;

pub use commands::{resolve_key, resolve_target, Command};

pub use state::{
    Key, KeyState, KeyboardEvent, Modifiers, Modal, NavLink, NavMenu, Dot, Slider,
    Tabs, ImageSlot, PointerAction, PointerEvent, Rect, Target, Entry,
    ObserverOptions, parse_slide_index, setup_lazy_image, setup_section_reveal,
    setup_sticky,
};

pub use layout::{
    compute_page_layout, BlockGeometry, ImageSpec, PageLayout, SectionSpec,
};

pub use input::{
    convert_key_event, convert_pointer_event, disable_pointer, enable_pointer,
    poll_event, read_event, route_event, InputEvent,
};

pub use page::{Page, PageConfig, PageSection};
