// Accessibility helpers

use sitekit_core::{Presentation, PresentationSink};
use wasm_bindgen::JsValue;

/// Stylesheet for the toolbar and the four presentation classes.
pub const TOOLBAR_CSS: &str = include_str!("../static/toolbar.css");

const STYLE_ELEMENT_ID: &str = "sitekit-toolbar-css";
const MOUNT_ID: &str = "sitekit-toolbar-root";

/// Writes font scale and presentation classes onto `<body>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BodyPresenter;

impl PresentationSink for BodyPresenter {
    #[cfg(target_arch = "wasm32")]
    fn present(&mut self, presentation: &Presentation) {
        let Some(body) = crate::dom::body() else {
            log::warn!("no <body> to apply accessibility preferences to");
            return;
        };
        let _ = body
            .style()
            .set_property("font-size", &presentation.font_size_css());
        let classes = body.class_list();
        for (field, enabled) in presentation.modes {
            let _ = classes.toggle_with_force(field.class_name(), enabled);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn present(&mut self, _presentation: &Presentation) {}
}

/// Add the toolbar stylesheet to `<head>` once.
///
/// # Errors
/// Returns an error if the document is unavailable or rejects the element.
pub fn inject_styles() -> Result<(), JsValue> {
    let doc = crate::dom::document()?;
    if doc.get_element_by_id(STYLE_ELEMENT_ID).is_some() {
        return Ok(());
    }
    let style = doc.create_element("style")?;
    style.set_id(STYLE_ELEMENT_ID);
    style.set_text_content(Some(TOOLBAR_CSS));
    let head = doc
        .head()
        .ok_or_else(|| JsValue::from_str("document has no <head>"))?;
    head.append_child(&style)?;
    Ok(())
}

/// Element the toolbar component renders into, created on first use.
///
/// # Errors
/// Returns an error if the document has no body or rejects the element.
pub fn mount_point() -> Result<web_sys::Element, JsValue> {
    let doc = crate::dom::document()?;
    if let Some(existing) = doc.get_element_by_id(MOUNT_ID) {
        return Ok(existing);
    }
    let root = doc.create_element("div")?;
    root.set_id(MOUNT_ID);
    root.set_class_name("acc-ignore");
    doc.body()
        .ok_or_else(|| JsValue::from_str("document has no <body>"))?
        .append_child(&root)?;
    Ok(root)
}
