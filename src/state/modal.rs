//! Modal Module - Modal dialog and overlay visibility
//!
//! The modal and its dimmed overlay are shown and hidden together: opening
//! clears HIDDEN on both, closing sets it on both. Escape and overlay
//! clicks close an open modal; a closed modal ignores them (the command
//! layer guards on [`Modal::is_open`]).

use spark_signals::{signal, Signal};

use crate::types::ClassFlags;

/// Modal dialog state. Starts hidden.
#[derive(Debug)]
pub struct Modal {
    modal: Signal<ClassFlags>,
    overlay: Signal<ClassFlags>,
}

impl Default for Modal {
    fn default() -> Self {
        Self::new()
    }
}

impl Modal {
    pub fn new() -> Self {
        Self {
            modal: signal(ClassFlags::HIDDEN),
            overlay: signal(ClassFlags::HIDDEN),
        }
    }

    /// Show the modal and its overlay.
    pub fn open(&self) {
        self.set_hidden(false);
    }

    /// Hide the modal and its overlay.
    pub fn close(&self) {
        self.set_hidden(true);
    }

    pub fn is_open(&self) -> bool {
        !self.modal.get().contains(ClassFlags::HIDDEN)
    }

    /// The modal window's presentation flags signal.
    pub fn modal_classes(&self) -> Signal<ClassFlags> {
        self.modal.clone()
    }

    /// The overlay's presentation flags signal.
    pub fn overlay_classes(&self) -> Signal<ClassFlags> {
        self.overlay.clone()
    }

    fn set_hidden(&self, hidden: bool) {
        for classes in [&self.modal, &self.overlay] {
            let mut flags = classes.get();
            flags.set(ClassFlags::HIDDEN, hidden);
            classes.set(flags);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_hidden() {
        let modal = Modal::new();
        assert!(!modal.is_open());
        assert!(modal.modal_classes().get().contains(ClassFlags::HIDDEN));
        assert!(modal.overlay_classes().get().contains(ClassFlags::HIDDEN));
    }

    #[test]
    fn test_open_shows_both() {
        let modal = Modal::new();

        modal.open();
        assert!(modal.is_open());
        assert!(!modal.modal_classes().get().contains(ClassFlags::HIDDEN));
        assert!(!modal.overlay_classes().get().contains(ClassFlags::HIDDEN));
    }

    #[test]
    fn test_close_hides_both() {
        let modal = Modal::new();

        modal.open();
        modal.close();
        assert!(!modal.is_open());
        assert!(modal.overlay_classes().get().contains(ClassFlags::HIDDEN));
    }

    #[test]
    fn test_open_is_idempotent() {
        let modal = Modal::new();

        modal.open();
        modal.open();
        assert!(modal.is_open());
        modal.close();
        modal.close();
        assert!(!modal.is_open());
    }
}
