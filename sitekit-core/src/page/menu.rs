//! Mobile menu and submenu disclosure.
//!
//! The DOM is the only source of truth here: callers read whether the closed
//! marker class is present, and these helpers say what to change.

use super::{ClassDelta, ScrollLock};
use crate::config::MenuConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disclosure {
    Open,
    Closed,
}

impl Disclosure {
    /// Open iff the element lacks its closed marker class.
    #[must_use]
    pub const fn from_marker(has_closed_class: bool) -> Self {
        if has_closed_class { Self::Closed } else { Self::Open }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Open => Self::Closed,
            Self::Closed => Self::Open,
        }
    }

    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuUpdate {
    pub menu: ClassDelta,
    pub overlay: ClassDelta,
    pub scroll: ScrollLock,
}

/// Changes that bring the mobile menu to `next`.
#[must_use]
pub fn menu_update(next: Disclosure, cfg: &MenuConfig) -> MenuUpdate {
    let closed = std::slice::from_ref(&cfg.closed_class);
    let hidden = std::slice::from_ref(&cfg.hidden_class);
    match next {
        Disclosure::Open => MenuUpdate {
            menu: ClassDelta::removing(closed),
            overlay: ClassDelta::removing(hidden),
            scroll: ScrollLock::Locked,
        },
        Disclosure::Closed => MenuUpdate {
            menu: ClassDelta::adding(closed),
            overlay: ClassDelta::adding(hidden),
            scroll: ScrollLock::Unlocked,
        },
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmenuUpdate {
    pub panel: ClassDelta,
    pub icon: ClassDelta,
}

/// Changes that bring a submenu to `next`; the icon shows minus while open.
#[must_use]
pub fn submenu_update(next: Disclosure, cfg: &MenuConfig) -> SubmenuUpdate {
    let hidden = std::slice::from_ref(&cfg.hidden_class);
    let open_icon = std::slice::from_ref(&cfg.icon_open_class);
    let closed_icon = std::slice::from_ref(&cfg.icon_closed_class);
    match next {
        Disclosure::Open => SubmenuUpdate {
            panel: ClassDelta::removing(hidden),
            icon: ClassDelta::swap(open_icon, closed_icon),
        },
        Disclosure::Closed => SubmenuUpdate {
            panel: ClassDelta::adding(hidden),
            icon: ClassDelta::swap(closed_icon, open_icon),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn menu_round_trip_restores_classes() {
        let cfg = MenuConfig::default();
        let mut menu: BTreeSet<String> = ["translate-x-full".to_string()].into();
        let state = Disclosure::from_marker(menu.contains(&cfg.closed_class));
        assert_eq!(state, Disclosure::Closed);

        let open = menu_update(state.toggled(), &cfg);
        open.menu.apply_to(&mut menu);
        assert!(menu.is_empty());
        assert_eq!(open.scroll, ScrollLock::Locked);

        let state = Disclosure::from_marker(menu.contains(&cfg.closed_class));
        assert!(state.is_open());
        let closed = menu_update(state.toggled(), &cfg);
        closed.menu.apply_to(&mut menu);
        assert!(menu.contains("translate-x-full"));
        assert_eq!(closed.scroll.overflow_css(), "");
    }

    #[test]
    fn submenu_swaps_icon() {
        let cfg = MenuConfig::default();
        let mut icon: BTreeSet<String> = ["fas".to_string(), "fa-plus".to_string()].into();
        submenu_update(Disclosure::Open, &cfg).icon.apply_to(&mut icon);
        assert!(icon.contains("fa-minus"));
        assert!(!icon.contains("fa-plus"));
        submenu_update(Disclosure::Closed, &cfg).icon.apply_to(&mut icon);
        assert!(icon.contains("fa-plus"));
        assert!(icon.contains("fas"));
    }
}
