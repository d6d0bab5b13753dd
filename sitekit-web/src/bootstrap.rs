//! Page start-up: config, toolbar, interaction layer.

use sitekit_core::{CONFIG_ELEMENT_ID, SiteConfig};
use wasm_bindgen::JsValue;

use crate::components::toolbar::{AccessibilityToolbar, Props as ToolbarProps};

/// Site configuration from the page's inline JSON block, or the defaults.
#[must_use]
pub fn read_config() -> SiteConfig {
    crate::dom::element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
        .map_or_else(SiteConfig::default, |raw| {
            SiteConfig::from_json_or_default(&raw)
        })
}

/// Inject the toolbar, restore saved preferences and wire the page.
///
/// # Errors
/// Returns an error if the document is unavailable or refuses the toolbar or
/// a listener.
pub fn boot() -> Result<(), JsValue> {
    let config = read_config();
    crate::a11y::inject_styles()?;
    let mount = crate::a11y::mount_point()?;
    let props = ToolbarProps {
        storage_key: config.storage_key.clone().into(),
    };
    yew::Renderer::<AccessibilityToolbar>::with_root_and_props(mount, props).render();
    crate::page::install(config)?;
    log::debug!("sitekit ready");
    Ok(())
}
