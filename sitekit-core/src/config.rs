//! Site configuration: element ids, class lists and timings.
//!
//! Pages can override any subset by embedding a JSON object; omitted fields
//! keep the defaults below.

use serde::{Deserialize, Serialize};

use crate::constants::{
    HEADER_COMPACT_OFFSET_PX, PREFS_STORAGE_KEY, REVEAL_ROOT_MARGIN, REVEAL_THRESHOLD,
    SLIDE_INTERVAL_MS, SUBMIT_SENDING_MS, SUBMIT_SUCCESS_VISIBLE_MS,
};

/// Id of the inline `<script type="application/json">` block read at start-up.
pub const CONFIG_ELEMENT_ID: &str = "sitekit-config";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub storage_key: String,
    pub header: HeaderConfig,
    pub menu: MenuConfig,
    pub modal: ModalConfig,
    pub submit: SubmitConfig,
    pub slider: SliderConfig,
    pub reveal: RevealConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            storage_key: PREFS_STORAGE_KEY.to_string(),
            header: HeaderConfig::default(),
            menu: MenuConfig::default(),
            modal: ModalConfig::default(),
            submit: SubmitConfig::default(),
            slider: SliderConfig::default(),
            reveal: RevealConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Parse an override block; anything unreadable yields the defaults.
    #[must_use]
    pub fn from_json_or_default(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_else(|err| {
            log::warn!("ignoring invalid site config: {err}");
            Self::default()
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub element_id: String,
    pub compact_offset_px: f64,
    pub compact_classes: Vec<String>,
    pub expanded_classes: Vec<String>,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            element_id: "main-header".into(),
            compact_offset_px: HEADER_COMPACT_OFFSET_PX,
            compact_classes: vec!["py-0".into(), "bg-brand-dark/95".into(), "shadow-lg".into()],
            expanded_classes: vec!["bg-brand-dark/85".into()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    pub menu_id: String,
    pub overlay_id: String,
    pub toggle_selector: String,
    /// Present on the menu while it is off-canvas.
    pub closed_class: String,
    pub hidden_class: String,
    pub submenu_toggle_attr: String,
    pub icon_open_class: String,
    pub icon_closed_class: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            menu_id: "mobile-menu".into(),
            overlay_id: "mobile-menu-overlay".into(),
            toggle_selector: "[data-menu-toggle]".into(),
            closed_class: "translate-x-full".into(),
            hidden_class: "hidden".into(),
            submenu_toggle_attr: "data-submenu".into(),
            icon_open_class: "fa-minus".into(),
            icon_closed_class: "fa-plus".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalConfig {
    pub modal_id: String,
    pub form_id: String,
    pub open_selector: String,
    pub close_selector: String,
    pub hidden_class: String,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            modal_id: "consultModal".into(),
            form_id: "modalForm".into(),
            open_selector: "[data-modal-open]".into(),
            close_selector: "[data-modal-close]".into(),
            hidden_class: "hidden".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmitConfig {
    pub form_selector: String,
    pub sending_ms: u32,
    pub success_visible_ms: u32,
    pub sending_label: String,
    /// Appended to a form's id to find its success indicator.
    pub success_suffix: String,
    pub hidden_class: String,
}

impl SubmitConfig {
    #[must_use]
    pub fn success_id(&self, form_id: &str) -> String {
        format!("{form_id}{}", self.success_suffix)
    }
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            form_selector: "form[data-simulated-submit]".into(),
            sending_ms: SUBMIT_SENDING_MS,
            success_visible_ms: SUBMIT_SUCCESS_VISIBLE_MS,
            sending_label: "Sending...".into(),
            success_suffix: "Success".into(),
            hidden_class: "hidden".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    pub image_selector: String,
    pub interval_ms: u32,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            image_selector: "#hero-slider img".into(),
            interval_ms: SLIDE_INTERVAL_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub selector: String,
    pub revealed_class: String,
    pub threshold: f64,
    pub root_margin: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            selector: ".reveal".into(),
            revealed_class: "active".into(),
            threshold: REVEAL_THRESHOLD,
            root_margin: REVEAL_ROOT_MARGIN.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_override_keeps_other_defaults() {
        let cfg = SiteConfig::from_json_or_default(
            r#"{"slider":{"interval_ms":2500},"storage_key":"coin.acc"}"#,
        );
        assert_eq!(cfg.slider.interval_ms, 2_500);
        assert_eq!(cfg.slider.image_selector, "#hero-slider img");
        assert_eq!(cfg.storage_key, "coin.acc");
        assert_eq!(cfg.submit.sending_ms, 1_500);
        assert_eq!(cfg.submit.success_visible_ms, 3_000);
    }

    #[test]
    fn success_indicator_id_follows_form_id() {
        let cfg = SubmitConfig::default();
        assert_eq!(cfg.success_id("modalForm"), "modalFormSuccess");
    }

    #[test]
    fn invalid_override_falls_back() {
        assert_eq!(SiteConfig::from_json_or_default("{oops"), SiteConfig::default());
    }
}
