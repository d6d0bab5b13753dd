//! Consultation modal.

use super::{ClassDelta, ScrollLock};
use crate::config::ModalConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalUpdate {
    pub modal: ClassDelta,
    pub scroll: ScrollLock,
    /// Opening starts from a clean form with no leftover success message.
    pub reset_form: bool,
}

#[must_use]
pub fn modal_update(open: bool, cfg: &ModalConfig) -> ModalUpdate {
    let hidden = std::slice::from_ref(&cfg.hidden_class);
    if open {
        ModalUpdate {
            modal: ClassDelta::removing(hidden),
            scroll: ScrollLock::Locked,
            reset_form: true,
        }
    } else {
        ModalUpdate {
            modal: ClassDelta::adding(hidden),
            scroll: ScrollLock::Unlocked,
            reset_form: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_locks_scroll_and_resets() {
        let cfg = ModalConfig::default();
        let update = modal_update(true, &cfg);
        assert_eq!(update.modal.remove.as_slice(), ["hidden"]);
        assert_eq!(update.scroll, ScrollLock::Locked);
        assert!(update.reset_form);

        let update = modal_update(false, &cfg);
        assert_eq!(update.modal.add.as_slice(), ["hidden"]);
        assert_eq!(update.scroll, ScrollLock::Unlocked);
        assert!(!update.reset_form);
    }
}
