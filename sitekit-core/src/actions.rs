//! Toolbar control registry.
//!
//! Every toolbar button is looked up here by element id and turned into a
//! [`ToolbarAction`], so the web layer registers a single click handler for
//! the whole toolbar instead of one closure per button.

use crate::constants::{
    CONTROL_FONT_DOWN, CONTROL_FONT_UP, CONTROL_PANEL_CLOSE, CONTROL_PANEL_TOGGLE, CONTROL_RESET,
};
use crate::prefs::PreferenceField;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolbarAction {
    IncreaseFont,
    DecreaseFont,
    Toggle(PreferenceField),
    Reset,
    OpenPanel,
    ClosePanel,
}

impl ToolbarAction {
    /// Whether the action changes the preference record.
    #[must_use]
    pub const fn mutates_preferences(self) -> bool {
        !matches!(self, Self::OpenPanel | Self::ClosePanel)
    }
}

/// Ordered id → action table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlRegistry {
    entries: Vec<(&'static str, ToolbarAction)>,
}

impl Default for ControlRegistry {
    fn default() -> Self {
        let mut entries = vec![
            (CONTROL_FONT_UP, ToolbarAction::IncreaseFont),
            (CONTROL_FONT_DOWN, ToolbarAction::DecreaseFont),
        ];
        entries.extend(
            PreferenceField::ALL
                .iter()
                .map(|field| (field.control_id(), ToolbarAction::Toggle(*field))),
        );
        entries.push((CONTROL_RESET, ToolbarAction::Reset));
        entries.push((CONTROL_PANEL_TOGGLE, ToolbarAction::OpenPanel));
        entries.push((CONTROL_PANEL_CLOSE, ToolbarAction::ClosePanel));
        Self { entries }
    }
}

impl ControlRegistry {
    #[must_use]
    pub fn resolve(&self, control_id: &str) -> Option<ToolbarAction> {
        self.entries
            .iter()
            .find(|(id, _)| *id == control_id)
            .map(|(_, action)| *action)
    }

    /// Control ids whose actions edit preferences, in toolbar order.
    pub fn preference_controls(&self) -> impl Iterator<Item = (&'static str, ToolbarAction)> + '_ {
        self.entries
            .iter()
            .copied()
            .filter(|(_, action)| action.mutates_preferences())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Open/closed state of the sliding toolbar panel. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PanelState {
    Open,
    #[default]
    Closed,
}

impl PanelState {
    #[must_use]
    pub const fn after(self, action: ToolbarAction) -> Self {
        match action {
            ToolbarAction::OpenPanel => Self::Open,
            ToolbarAction::ClosePanel => Self::Closed,
            _ => self,
        }
    }

    /// `Escape` closes the panel from anywhere on the page.
    #[must_use]
    pub fn after_key(self, key: &str) -> Self {
        if key == "Escape" { Self::Closed } else { self }
    }

    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{CONTROL_CONTRAST, CONTROL_LINKS, CONTROL_READABLE_FONT};

    #[test]
    fn every_toolbar_button_resolves() {
        let registry = ControlRegistry::default();
        assert_eq!(registry.len(), 9);
        assert_eq!(
            registry.resolve(CONTROL_CONTRAST),
            Some(ToolbarAction::Toggle(PreferenceField::HighContrast))
        );
        assert_eq!(
            registry.resolve(CONTROL_LINKS),
            Some(ToolbarAction::Toggle(PreferenceField::HighlightLinks))
        );
        assert_eq!(
            registry.resolve(CONTROL_READABLE_FONT),
            Some(ToolbarAction::Toggle(PreferenceField::ReadableFont))
        );
        assert_eq!(registry.resolve(CONTROL_RESET), Some(ToolbarAction::Reset));
        assert_eq!(registry.resolve("acc-unknown"), None);
    }

    #[test]
    fn preference_controls_skip_panel_buttons() {
        let registry = ControlRegistry::default();
        let ids: Vec<_> = registry.preference_controls().map(|(id, _)| id).collect();
        assert_eq!(ids.len(), 7);
        assert!(!ids.contains(&CONTROL_PANEL_TOGGLE));
        assert!(!ids.contains(&CONTROL_PANEL_CLOSE));
    }

    #[test]
    fn panel_closes_on_escape_only() {
        let open = PanelState::Closed.after(ToolbarAction::OpenPanel);
        assert!(open.is_open());
        assert!(open.after_key("Enter").is_open());
        assert!(!open.after_key("Escape").is_open());
        assert!(open.after(ToolbarAction::Reset).is_open());
        assert!(!open.after(ToolbarAction::ClosePanel).is_open());
    }
}
