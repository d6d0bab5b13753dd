use std::rc::Rc;

use sitekit_core::page::{HeaderMode, header_classes};
use wasm_bindgen::JsValue;

use super::PageContext;
use crate::dom;

pub(super) fn install(ctx: &Rc<PageContext>) -> Result<(), JsValue> {
    let cfg = ctx.config().header.clone();
    let Some(header) = dom::element_by_id(&cfg.element_id) else {
        log::debug!("no #{} on this page, sticky header disabled", cfg.element_id);
        return Ok(());
    };
    let win = dom::window()?;
    let update = {
        let win = win.clone();
        move || {
            let offset = win.scroll_y().unwrap_or(0.0);
            let mode = HeaderMode::for_offset(offset, cfg.compact_offset_px);
            dom::apply_class_delta(&header, &header_classes(mode, &cfg));
        }
    };
    update();
    dom::listen_forever(&win, "scroll", move |_| update())
}
