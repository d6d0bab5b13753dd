//! Preference controller: the one place the record is mutated, applied and
//! persisted.

use std::collections::BTreeSet;

use crate::actions::ToolbarAction;
use crate::constants::PREFS_STORAGE_KEY;
use crate::prefs::{AccessibilityPreferences, PreferenceField, Presentation};
use crate::storage::PreferenceStore;

/// Receives the page state derived from a record.
///
/// Implementations must be idempotent: presenting the same snapshot twice
/// leaves the page unchanged.
pub trait PresentationSink {
    fn present(&mut self, presentation: &Presentation);
}

/// Read the persisted record, substituting defaults on any failure.
#[must_use]
pub fn load<S: PreferenceStore>(store: &S, key: &str) -> AccessibilityPreferences {
    match store.read(key) {
        Ok(Some(raw)) => AccessibilityPreferences::from_json_or_default(&raw),
        Ok(None) => AccessibilityPreferences::default(),
        Err(err) => {
            log::warn!("accessibility preferences unavailable, using defaults: {err}");
            AccessibilityPreferences::default()
        }
    }
}

/// Overwrite the persisted record. Failures are logged and dropped.
pub fn save<S: PreferenceStore>(store: &S, key: &str, prefs: &AccessibilityPreferences) {
    let encoded = match prefs.to_json() {
        Ok(encoded) => encoded,
        Err(err) => {
            log::warn!("failed to encode accessibility preferences: {err}");
            return;
        }
    };
    if let Err(err) = store.write(key, &encoded) {
        log::warn!("failed to persist accessibility preferences: {err}");
    }
}

pub struct PreferenceController<S, P>
where
    S: PreferenceStore,
    P: PresentationSink,
{
    prefs: AccessibilityPreferences,
    store: S,
    sink: P,
    key: String,
}

impl<S, P> PreferenceController<S, P>
where
    S: PreferenceStore,
    P: PresentationSink,
{
    /// Load the saved record and apply it to the page.
    pub fn restore(store: S, sink: P) -> Self {
        Self::restore_with_key(store, sink, PREFS_STORAGE_KEY)
    }

    pub fn restore_with_key(store: S, sink: P, key: &str) -> Self {
        let prefs = load(&store, key);
        let mut controller = Self {
            prefs,
            store,
            sink,
            key: key.to_string(),
        };
        controller.apply();
        controller
    }

    #[must_use]
    pub const fn preferences(&self) -> AccessibilityPreferences {
        self.prefs
    }

    #[must_use]
    pub const fn sink(&self) -> &P {
        &self.sink
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Push the current record to the page without persisting it.
    pub fn apply(&mut self) {
        self.sink.present(&self.prefs.presentation());
    }

    pub fn save(&self) {
        save(&self.store, &self.key, &self.prefs);
    }

    pub fn toggle(&mut self, field: PreferenceField) -> AccessibilityPreferences {
        self.commit(self.prefs.toggled(field))
    }

    pub fn increment_font(&mut self) -> AccessibilityPreferences {
        self.commit(self.prefs.with_font_increased())
    }

    pub fn decrement_font(&mut self) -> AccessibilityPreferences {
        self.commit(self.prefs.with_font_decreased())
    }

    pub fn reset(&mut self) -> AccessibilityPreferences {
        self.commit(AccessibilityPreferences::default())
    }

    /// Run a toolbar action. Panel actions leave the record untouched and
    /// return `None`.
    pub fn dispatch(&mut self, action: ToolbarAction) -> Option<AccessibilityPreferences> {
        match action {
            ToolbarAction::IncreaseFont => Some(self.increment_font()),
            ToolbarAction::DecreaseFont => Some(self.decrement_font()),
            ToolbarAction::Toggle(field) => Some(self.toggle(field)),
            ToolbarAction::Reset => Some(self.reset()),
            ToolbarAction::OpenPanel | ToolbarAction::ClosePanel => None,
        }
    }

    // Apply and save always run as a pair.
    fn commit(&mut self, next: AccessibilityPreferences) -> AccessibilityPreferences {
        self.prefs = next;
        self.apply();
        self.save();
        log::debug!("accessibility preferences now {:?}", self.prefs);
        self.prefs
    }
}

/// Model of the document body's font size and class list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodySnapshot {
    pub font_size: Option<String>,
    pub classes: BTreeSet<String>,
    pub presented: usize,
}

impl BodySnapshot {
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }
}

impl PresentationSink for BodySnapshot {
    fn present(&mut self, presentation: &Presentation) {
        self.font_size = Some(presentation.font_size_css());
        for (field, on) in presentation.modes {
            if on {
                self.classes.insert(field.class_name().to_string());
            } else {
                self.classes.remove(field.class_name());
            }
        }
        self.presented += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, StorageError};

    struct BrokenStore;

    impl PreferenceStore for BrokenStore {
        fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("private mode".into()))
        }

        fn write(&self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write {
                key: key.into(),
                reason: "quota".into(),
            })
        }
    }

    #[test]
    fn restore_applies_saved_record() {
        let store = MemoryStore::with_entry(
            PREFS_STORAGE_KEY,
            r#"{"fontSize":130,"contrast":false,"grayscale":true,"links":false,"readableFont":false}"#,
        );
        let controller = PreferenceController::restore(store, BodySnapshot::default());
        assert_eq!(controller.preferences().font_scale_percent, 130);
        assert_eq!(controller.sink().font_size.as_deref(), Some("130%"));
        assert!(controller.sink().has_class("acc-grayscale"));
        assert_eq!(controller.sink().presented, 1);
    }

    #[test]
    fn toggle_applies_and_persists_together() {
        let mut controller =
            PreferenceController::restore(MemoryStore::new(), BodySnapshot::default());
        controller.toggle(PreferenceField::HighContrast);
        assert!(controller.sink().has_class("acc-high-contrast"));
        let saved = controller.store().get(PREFS_STORAGE_KEY).unwrap();
        assert_eq!(
            saved,
            r#"{"fontSize":100,"contrast":true,"grayscale":false,"links":false,"readableFont":false}"#
        );
    }

    #[test]
    fn broken_store_is_silent() {
        let mut controller = PreferenceController::restore(BrokenStore, BodySnapshot::default());
        assert_eq!(controller.preferences(), AccessibilityPreferences::default());
        let prefs = controller.decrement_font();
        assert_eq!(prefs.font_scale_percent, 90);
        assert_eq!(controller.sink().font_size.as_deref(), Some("90%"));
    }

    #[test]
    fn panel_actions_do_not_touch_record() {
        let mut controller =
            PreferenceController::restore(MemoryStore::new(), BodySnapshot::default());
        assert_eq!(controller.dispatch(ToolbarAction::OpenPanel), None);
        assert_eq!(controller.dispatch(ToolbarAction::ClosePanel), None);
        assert_eq!(controller.store().get(PREFS_STORAGE_KEY), None);
        assert_eq!(controller.sink().presented, 1);
    }

    #[test]
    fn apply_is_idempotent() {
        let mut controller =
            PreferenceController::restore(MemoryStore::new(), BodySnapshot::default());
        controller.toggle(PreferenceField::ReadableFont);
        let first = controller.sink().clone();
        controller.apply();
        let second = controller.sink();
        assert_eq!(first.classes, second.classes);
        assert_eq!(first.font_size, second.font_size);
    }
}
