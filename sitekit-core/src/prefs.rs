//! The accessibility preference record.
//!
//! All mutation helpers are pure: they take the current record by value and
//! hand back the next one. Persistence and DOM application are layered on top
//! by [`PreferenceController`](crate::controller::PreferenceController).

use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{
    CLASS_GRAYSCALE, CLASS_HIGH_CONTRAST, CLASS_HIGHLIGHT_LINKS, CLASS_READABLE_FONT,
    CONTROL_CONTRAST, CONTROL_GRAYSCALE, CONTROL_LINKS, CONTROL_READABLE_FONT, FONT_SCALE_DEFAULT,
    FONT_SCALE_FLOOR, FONT_SCALE_STEP,
};

/// One of the four on/off display modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PreferenceField {
    HighContrast,
    Grayscale,
    HighlightLinks,
    ReadableFont,
}

impl PreferenceField {
    pub const ALL: [Self; 4] = [
        Self::HighContrast,
        Self::Grayscale,
        Self::HighlightLinks,
        Self::ReadableFont,
    ];

    /// Body class that switches the mode on.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::HighContrast => CLASS_HIGH_CONTRAST,
            Self::Grayscale => CLASS_GRAYSCALE,
            Self::HighlightLinks => CLASS_HIGHLIGHT_LINKS,
            Self::ReadableFont => CLASS_READABLE_FONT,
        }
    }

    /// Toolbar control that flips the mode.
    #[must_use]
    pub const fn control_id(self) -> &'static str {
        match self {
            Self::HighContrast => CONTROL_CONTRAST,
            Self::Grayscale => CONTROL_GRAYSCALE,
            Self::HighlightLinks => CONTROL_LINKS,
            Self::ReadableFont => CONTROL_READABLE_FONT,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::HighContrast => "High Contrast",
            Self::Grayscale => "Grayscale",
            Self::HighlightLinks => "Highlight Links",
            Self::ReadableFont => "Readable Font",
        }
    }
}

/// The persisted accessibility record.
///
/// Serialized field names follow the storage format already written by
/// deployed pages (`fontSize`, `contrast`, `links`, ...), so records saved by
/// earlier toolbar builds keep loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessibilityPreferences {
    #[serde(rename = "fontSize", deserialize_with = "font_scale_or_default")]
    pub font_scale_percent: u32,
    #[serde(rename = "contrast")]
    pub high_contrast: bool,
    pub grayscale: bool,
    #[serde(rename = "links")]
    pub highlight_links: bool,
    #[serde(rename = "readableFont")]
    pub readable_font: bool,
}

// Older toolbar builds could store `0` or `null`; both mean "never set".
fn font_scale_or_default<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<u32>::deserialize(deserializer)? {
        None | Some(0) => FONT_SCALE_DEFAULT,
        Some(scale) => scale,
    })
}

impl Default for AccessibilityPreferences {
    fn default() -> Self {
        Self {
            font_scale_percent: FONT_SCALE_DEFAULT,
            high_contrast: false,
            grayscale: false,
            highlight_links: false,
            readable_font: false,
        }
    }
}

impl AccessibilityPreferences {
    /// Parse a stored record, falling back to defaults on any failure.
    ///
    /// Missing fields take their defaults and a font scale under the floor is
    /// raised to it.
    #[must_use]
    pub fn from_json_or_default(raw: &str) -> Self {
        match serde_json::from_str::<Self>(raw) {
            Ok(prefs) => prefs.normalized(),
            Err(err) => {
                log::warn!("discarding malformed accessibility record: {err}");
                Self::default()
            }
        }
    }

    /// Serialize the full record.
    ///
    /// # Errors
    ///
    /// Returns an error if `serde_json` cannot encode the record.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.font_scale_percent = self.font_scale_percent.max(FONT_SCALE_FLOOR);
        self
    }

    #[must_use]
    pub const fn get(&self, field: PreferenceField) -> bool {
        match field {
            PreferenceField::HighContrast => self.high_contrast,
            PreferenceField::Grayscale => self.grayscale,
            PreferenceField::HighlightLinks => self.highlight_links,
            PreferenceField::ReadableFont => self.readable_font,
        }
    }

    pub const fn set(&mut self, field: PreferenceField, enabled: bool) {
        match field {
            PreferenceField::HighContrast => self.high_contrast = enabled,
            PreferenceField::Grayscale => self.grayscale = enabled,
            PreferenceField::HighlightLinks => self.highlight_links = enabled,
            PreferenceField::ReadableFont => self.readable_font = enabled,
        }
    }

    #[must_use]
    pub const fn toggled(mut self, field: PreferenceField) -> Self {
        let current = self.get(field);
        self.set(field, !current);
        self
    }

    #[must_use]
    pub const fn with_font_increased(mut self) -> Self {
        self.font_scale_percent = self.font_scale_percent.saturating_add(FONT_SCALE_STEP);
        self
    }

    /// Step the font scale down, stopping at the floor.
    #[must_use]
    pub const fn with_font_decreased(mut self) -> Self {
        if self.font_scale_percent > FONT_SCALE_FLOOR {
            let lowered = self.font_scale_percent.saturating_sub(FONT_SCALE_STEP);
            self.font_scale_percent = if lowered < FONT_SCALE_FLOOR {
                FONT_SCALE_FLOOR
            } else {
                lowered
            };
        }
        self
    }

    /// Snapshot of what the page should look like for this record.
    #[must_use]
    pub fn presentation(&self) -> Presentation {
        Presentation {
            font_scale_percent: self.font_scale_percent,
            modes: PreferenceField::ALL.map(|field| (field, self.get(field))),
        }
    }
}

/// Everything `apply` writes to the page, derived from a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presentation {
    pub font_scale_percent: u32,
    pub modes: [(PreferenceField, bool); 4],
}

impl Presentation {
    /// CSS value for the body's `font-size`.
    #[must_use]
    pub fn font_size_css(&self) -> String {
        format!("{}%", self.font_scale_percent)
    }

    /// Body classes that must be present.
    pub fn enabled_classes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.modes
            .iter()
            .filter(|(_, on)| *on)
            .map(|(field, _)| field.class_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_off_at_full_scale() {
        let prefs = AccessibilityPreferences::default();
        assert_eq!(prefs.font_scale_percent, 100);
        assert!(PreferenceField::ALL.iter().all(|f| !prefs.get(*f)));
    }

    #[test]
    fn toggle_flips_only_the_named_field() {
        let prefs = AccessibilityPreferences::default().toggled(PreferenceField::Grayscale);
        assert!(prefs.grayscale);
        assert!(!prefs.high_contrast);
        assert!(!prefs.highlight_links);
        assert!(!prefs.readable_font);
        assert!(!prefs.toggled(PreferenceField::Grayscale).grayscale);
    }

    #[test]
    fn decrease_stops_at_floor() {
        let mut prefs = AccessibilityPreferences::default();
        for _ in 0..20 {
            prefs = prefs.with_font_decreased();
        }
        assert_eq!(prefs.font_scale_percent, FONT_SCALE_FLOOR);
    }

    #[test]
    fn increase_has_no_ceiling() {
        let mut prefs = AccessibilityPreferences::default();
        for _ in 0..50 {
            prefs = prefs.with_font_increased();
        }
        assert_eq!(prefs.font_scale_percent, 600);
    }

    #[test]
    fn stored_shape_uses_legacy_keys() {
        let prefs = AccessibilityPreferences::default().toggled(PreferenceField::HighContrast);
        let json = prefs.to_json().unwrap();
        assert_eq!(
            json,
            r#"{"fontSize":100,"contrast":true,"grayscale":false,"links":false,"readableFont":false}"#
        );
    }

    #[test]
    fn malformed_json_loads_defaults() {
        for raw in ["", "{", "null", "[1,2]", r#"{"fontSize":"big"}"#, "not json"] {
            assert_eq!(
                AccessibilityPreferences::from_json_or_default(raw),
                AccessibilityPreferences::default(),
                "input {raw:?}"
            );
        }
    }

    #[test]
    fn partial_record_fills_defaults_and_clamps_scale() {
        let prefs = AccessibilityPreferences::from_json_or_default(r#"{"links":true,"fontSize":20}"#);
        assert!(prefs.highlight_links);
        assert!(!prefs.grayscale);
        assert_eq!(prefs.font_scale_percent, FONT_SCALE_FLOOR);
    }

    #[test]
    fn unset_font_scale_keeps_other_fields() {
        for raw in [r#"{"fontSize":0,"contrast":true}"#, r#"{"fontSize":null,"contrast":true}"#] {
            let prefs = AccessibilityPreferences::from_json_or_default(raw);
            assert_eq!(prefs.font_scale_percent, FONT_SCALE_DEFAULT, "input {raw}");
            assert!(prefs.high_contrast, "input {raw}");
        }
    }

    #[test]
    fn presentation_lists_enabled_classes() {
        let prefs = AccessibilityPreferences::default()
            .toggled(PreferenceField::HighlightLinks)
            .toggled(PreferenceField::ReadableFont)
            .with_font_increased();
        let view = prefs.presentation();
        assert_eq!(view.font_size_css(), "110%");
        let classes: Vec<_> = view.enabled_classes().collect();
        assert_eq!(classes, vec![CLASS_HIGHLIGHT_LINKS, CLASS_READABLE_FONT]);
    }
}
