//! Tabs Module - Tabbed panel state
//!
//! One button and one content pane per tab; selecting a tab moves the
//! ACTIVE marker on both groups so exactly one of each is active at any
//! time - the same exactly-one invariant the slider dots keep. Clicks that
//! land outside any tab button never reach [`Tabs::select`]; the target
//! table has nothing to resolve them to.

use spark_signals::{signal, Signal};

use crate::error::PageError;
use crate::types::ClassFlags;

/// Tabbed panel controller. Tab 0 starts active.
#[derive(Debug)]
pub struct Tabs {
    active: Signal<usize>,
    buttons: Vec<Signal<ClassFlags>>,
    contents: Vec<Signal<ClassFlags>>,
}

impl Tabs {
    /// Create a panel with `tab_count` tabs. Zero tabs is a configuration
    /// error: there would be nothing to activate.
    pub fn new(tab_count: usize) -> Result<Self, PageError> {
        if tab_count == 0 {
            return Err(PageError::NoTabs);
        }

        let tabs = Self {
            active: signal(0),
            buttons: (0..tab_count).map(|_| signal(ClassFlags::empty())).collect(),
            contents: (0..tab_count).map(|_| signal(ClassFlags::empty())).collect(),
        };
        tabs.activate(0);
        Ok(tabs)
    }

    /// Number of tabs.
    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    /// Always false; construction rejects zero tabs.
    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    /// The active tab index.
    pub fn active(&self) -> usize {
        self.active.get()
    }

    /// The active-tab signal, for derived UI.
    pub fn active_signal(&self) -> Signal<usize> {
        self.active.clone()
    }

    /// Presentation flags signal of a tab button.
    pub fn button_classes(&self, tab: usize) -> Option<Signal<ClassFlags>> {
        self.buttons.get(tab).cloned()
    }

    /// Presentation flags signal of a content pane.
    pub fn content_classes(&self, tab: usize) -> Option<Signal<ClassFlags>> {
        self.contents.get(tab).cloned()
    }

    /// Select a tab. Out-of-range indices are ignored.
    ///
    /// Returns whether the selection happened.
    pub fn select(&self, tab: usize) -> bool {
        if tab >= self.len() {
            tracing::debug!(tab, tabs = self.len(), "ignoring out-of-range tab selection");
            return false;
        }
        self.active.set(tab);
        self.activate(tab);
        true
    }

    /// Move the ACTIVE marker to `tab` on both groups. Idempotent, O(N).
    fn activate(&self, tab: usize) {
        for group in [&self.buttons, &self.contents] {
            for (i, classes) in group.iter().enumerate() {
                let mut flags = classes.get();
                flags.set(ClassFlags::ACTIVE, i == tab);
                classes.set(flags);
            }
        }
    }

    fn active_in(group: &[Signal<ClassFlags>]) -> Vec<usize> {
        group
            .iter()
            .enumerate()
            .filter(|(_, c)| c.get().contains(ClassFlags::ACTIVE))
            .map(|(i, _)| i)
            .collect()
    }

    /// Indices of active buttons (for invariant checks).
    pub fn active_buttons(&self) -> Vec<usize> {
        Self::active_in(&self.buttons)
    }

    /// Indices of active content panes (for invariant checks).
    pub fn active_contents(&self) -> Vec<usize> {
        Self::active_in(&self.contents)
    }
}
