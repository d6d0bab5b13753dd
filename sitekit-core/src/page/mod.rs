//! Page interaction layer.
//!
//! Each submodule is a small state model for one behavior. They compute the
//! class changes to make; the web crate performs them.

pub mod header;
pub mod menu;
pub mod modal;
pub mod reveal;
pub mod slider;
pub mod submit;

use smallvec::SmallVec;

pub use header::{HeaderMode, header_classes};
pub use menu::{Disclosure, MenuUpdate, SubmenuUpdate, menu_update, submenu_update};
pub use modal::{ModalUpdate, modal_update};
pub use reveal::{RevealOutcome, RevealTracker};
pub use slider::{SlideChange, SlideRotation};
pub use submit::{
    FormOrigin, ManualTimeline, SubmitEffect, SubmitEffects, SubmitError, SubmitMachine,
    SubmitPhase, SubmitTimer,
};

pub type ClassList = SmallVec<[String; 4]>;

/// Classes to add and remove on one element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassDelta {
    pub add: ClassList,
    pub remove: ClassList,
}

impl ClassDelta {
    #[must_use]
    pub fn adding(classes: &[String]) -> Self {
        Self {
            add: classes.iter().cloned().collect(),
            remove: ClassList::new(),
        }
    }

    #[must_use]
    pub fn removing(classes: &[String]) -> Self {
        Self {
            add: ClassList::new(),
            remove: classes.iter().cloned().collect(),
        }
    }

    #[must_use]
    pub fn swap(add: &[String], remove: &[String]) -> Self {
        Self {
            add: add.iter().cloned().collect(),
            remove: remove.iter().cloned().collect(),
        }
    }

    /// Apply to a modelled class list.
    pub fn apply_to(&self, classes: &mut std::collections::BTreeSet<String>) {
        for class in &self.remove {
            classes.remove(class);
        }
        for class in &self.add {
            classes.insert(class.clone());
        }
    }
}

/// Page scrolling state, driven by the menu and modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollLock {
    Locked,
    Unlocked,
}

impl ScrollLock {
    /// Value for the body's `overflow` style.
    #[must_use]
    pub const fn overflow_css(self) -> &'static str {
        match self {
            Self::Locked => "hidden",
            Self::Unlocked => "",
        }
    }
}
