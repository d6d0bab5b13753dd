use std::rc::Rc;

use sitekit_core::MenuConfig;
use sitekit_core::page::{Disclosure, menu_update, submenu_update};
use wasm_bindgen::JsValue;
use web_sys::Element;

use super::PageContext;
use crate::dom;

/// Open the mobile menu if it is closed, close it otherwise.
pub fn toggle_menu(cfg: &MenuConfig) {
    let (Some(menu), Some(overlay)) = (
        dom::element_by_id(&cfg.menu_id),
        dom::element_by_id(&cfg.overlay_id),
    ) else {
        log::warn!("mobile menu markup missing (#{}, #{})", cfg.menu_id, cfg.overlay_id);
        return;
    };
    let current = Disclosure::from_marker(menu.class_list().contains(&cfg.closed_class));
    let update = menu_update(current.toggled(), cfg);
    dom::apply_class_delta(&menu, &update.menu);
    dom::apply_class_delta(&overlay, &update.overlay);
    dom::set_scroll_lock(update.scroll);
}

/// Flip the submenu with element id `id` and its `+`/`-` icon, which lives in
/// the button of the element just before it.
pub fn toggle_submenu(id: &str, cfg: &MenuConfig) {
    let Some(submenu) = dom::element_by_id(id) else {
        log::warn!("no submenu #{id}");
        return;
    };
    let current = Disclosure::from_marker(submenu.class_list().contains(&cfg.hidden_class));
    let update = submenu_update(current.toggled(), cfg);
    dom::apply_class_delta(&submenu, &update.panel);
    if let Some(icon) = submenu
        .previous_element_sibling()
        .and_then(|heading| heading.query_selector("button i").ok().flatten())
    {
        dom::apply_class_delta(&icon, &update.icon);
    }
}

pub(super) fn install(ctx: &Rc<PageContext>) -> Result<(), JsValue> {
    let cfg = &ctx.config().menu;
    for toggle in dom::query_all::<Element>(&cfg.toggle_selector) {
        let cfg = cfg.clone();
        dom::listen_forever(&toggle, "click", move |_| toggle_menu(&cfg))?;
    }
    let submenu_selector = format!("[{}]", cfg.submenu_toggle_attr);
    for toggle in dom::query_all::<Element>(&submenu_selector) {
        let Some(target) = toggle.get_attribute(&cfg.submenu_toggle_attr) else {
            continue;
        };
        let cfg = cfg.clone();
        dom::listen_forever(&toggle, "click", move |_| toggle_submenu(&target, &cfg))?;
    }
    Ok(())
}
