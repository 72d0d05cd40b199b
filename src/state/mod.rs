//! State Module - Runtime state systems for the page
//!
//! The reactive state systems behind every page interaction:
//!
//! - **Keyboard** - Event types, dispatch, handler registry
//! - **Pointer** - Target table, hit map, hover tracking, click dispatch
//! - **Slider** - Carousel index, panel offsets, dot indicators
//! - **Modal** - Dialog and overlay visibility
//! - **Tabs** - Tabbed panel active markers
//! - **Nav** - Menu fade and link resolution
//! - **Viewport** - Visibility observation (IntersectionObserver analog)
//! - **Sticky** - Pin the nav when the header scrolls away
//! - **Reveal** - Section reveals and lazy images

pub mod keyboard;
pub mod modal;
pub mod nav;
pub mod pointer;
pub mod reveal;
pub mod slider;
pub mod sticky;
pub mod tabs;
pub mod viewport;

pub use keyboard::{Key, KeyboardEvent, KeyState, Modifiers};
pub use modal::Modal;
pub use nav::{NavLink, NavMenu};
pub use pointer::{HitMap, PointerAction, PointerEvent, Rect, Target};
pub use reveal::{setup_lazy_image, setup_section_reveal, ImageSlot, REVEAL_THRESHOLD};
pub use slider::{parse_slide_index, Dot, Slider};
pub use sticky::setup_sticky;
pub use tabs::Tabs;
pub use viewport::{Entry, ObserverOptions};
