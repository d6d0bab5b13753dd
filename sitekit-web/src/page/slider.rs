use std::rc::Rc;

use sitekit_core::page::SlideRotation;
use wasm_bindgen::JsValue;
use web_sys::HtmlElement;

use super::PageContext;
use crate::dom;

fn set_opacity(slides: &[HtmlElement], index: usize, value: &str) {
    if let Some(slide) = slides.get(index) {
        let _ = slide.style().set_property("opacity", value);
    }
}

pub(super) fn install(ctx: &Rc<PageContext>) -> Result<(), JsValue> {
    let cfg = &ctx.config().slider;
    let slides = dom::query_all::<HtmlElement>(&cfg.image_selector);
    let Some(mut rotation) = SlideRotation::new(slides.len()) else {
        return Ok(());
    };
    dom::set_interval_forever(cfg.interval_ms, move || {
        let change = rotation.advance();
        set_opacity(&slides, change.hidden, "0");
        set_opacity(&slides, change.shown, "1");
    })?;
    Ok(())
}
