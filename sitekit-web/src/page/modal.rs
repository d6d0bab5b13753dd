use std::rc::Rc;

use sitekit_core::page::modal_update;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlFormElement};

use super::PageContext;
use crate::dom;

/// Show or hide the consultation modal.
///
/// Opening abandons any submission still running for the modal form, hides
/// its success message and clears the fields.
pub fn set_modal_open(ctx: &PageContext, open: bool) {
    let cfg = &ctx.config().modal;
    let Some(modal) = dom::element_by_id(&cfg.modal_id) else {
        log::warn!("no modal #{}", cfg.modal_id);
        return;
    };
    let update = modal_update(open, cfg);
    if update.reset_form {
        if let Some(submission) = ctx.form(&cfg.form_id) {
            submission.cancel();
        }
        let success_id = ctx.config().submit.success_id(&cfg.form_id);
        if let Some(success) = dom::element_by_id(&success_id) {
            let _ = success.class_list().add_1(&ctx.config().submit.hidden_class);
        }
        if let Some(form) = dom::element_by_id(&cfg.form_id)
            .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
        {
            form.reset();
        }
    }
    dom::apply_class_delta(&modal, &update.modal);
    dom::set_scroll_lock(update.scroll);
}

pub(super) fn install(ctx: &Rc<PageContext>) -> Result<(), JsValue> {
    let cfg = &ctx.config().modal;
    for (selector, open) in [(&cfg.open_selector, true), (&cfg.close_selector, false)] {
        for trigger in dom::query_all::<Element>(selector) {
            let ctx = Rc::clone(ctx);
            dom::listen_forever(&trigger, "click", move |event| {
                event.prevent_default();
                set_modal_open(&ctx, open);
            })?;
        }
    }
    Ok(())
}
