//! Simulated form submission: runs a `SubmitMachine` per form and performs
//! the effects it asks for.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use sitekit_core::page::{
    FormOrigin, SubmitEffect, SubmitEffects, SubmitMachine, SubmitPhase, SubmitTimer,
};
use sitekit_core::SubmitConfig;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlButtonElement, HtmlFormElement};

use super::PageContext;
use crate::dom;

pub struct FormSubmission {
    form_id: String,
    form: HtmlFormElement,
    button: Option<HtmlButtonElement>,
    success: Option<Element>,
    cfg: SubmitConfig,
    machine: RefCell<SubmitMachine>,
    // Dropping the timeout clears it. A fired timeout stays here until the
    // next schedule or cancel replaces it.
    pending: RefCell<Option<dom::Timeout>>,
    saved_label: RefCell<Option<String>>,
    page: Weak<PageContext>,
}

impl FormSubmission {
    fn new(form: HtmlFormElement, ctx: &Rc<PageContext>) -> Rc<Self> {
        let cfg = ctx.config().submit.clone();
        let form_id = form.id();
        let origin = FormOrigin::for_form(&form_id, &ctx.config().modal.form_id);
        let button = form
            .query_selector("button[type=\"submit\"]")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());
        let success = dom::element_by_id(&cfg.success_id(&form_id));
        Rc::new(Self {
            machine: RefCell::new(SubmitMachine::new(origin, &cfg)),
            form_id,
            form,
            button,
            success,
            cfg,
            pending: RefCell::new(None),
            saved_label: RefCell::new(None),
            page: Rc::downgrade(ctx),
        })
    }

    #[must_use]
    pub fn form_id(&self) -> &str {
        &self.form_id
    }

    #[must_use]
    pub fn phase(&self) -> SubmitPhase {
        self.machine.borrow().phase()
    }

    pub fn submit(self: &Rc<Self>) {
        let started = self.machine.borrow_mut().submit();
        match started {
            Ok(effects) => self.run(effects),
            Err(err) => log::debug!("#{}: {err}", self.form_id),
        }
    }

    pub fn cancel(self: &Rc<Self>) {
        let effects = self.machine.borrow_mut().cancel();
        self.run(effects);
    }

    fn run(self: &Rc<Self>, effects: SubmitEffects) {
        for effect in effects {
            match effect {
                SubmitEffect::DisableSubmit => self.show_sending(),
                SubmitEffect::RestoreSubmit => self.restore_button(),
                SubmitEffect::ShowSuccess => self.set_success_visible(true),
                SubmitEffect::HideSuccess => self.set_success_visible(false),
                SubmitEffect::ResetForm => self.form.reset(),
                SubmitEffect::CloseModal => {
                    if let Some(page) = self.page.upgrade() {
                        super::set_modal_open(&page, false);
                    }
                }
                SubmitEffect::Schedule { timer, delay_ms } => self.schedule(timer, delay_ms),
                SubmitEffect::CancelPending => drop(self.pending.take()),
            }
        }
    }

    fn schedule(self: &Rc<Self>, timer: SubmitTimer, delay_ms: u32) {
        let weak = Rc::downgrade(self);
        let scheduled = dom::Timeout::new(delay_ms, move || {
            let Some(this) = weak.upgrade() else {
                return;
            };
            let effects = this.machine.borrow_mut().on_timer(timer);
            this.run(effects);
        });
        match scheduled {
            Ok(timeout) => *self.pending.borrow_mut() = Some(timeout),
            Err(err) => log::warn!(
                "#{}: could not schedule {timer:?}: {}",
                self.form_id,
                dom::js_error_message(&err)
            ),
        }
    }

    fn show_sending(&self) {
        let Some(button) = self.button.as_ref() else {
            return;
        };
        *self.saved_label.borrow_mut() = Some(button.inner_html());
        button.set_text_content(Some(&format!(" {}", self.cfg.sending_label)));
        if let Ok(doc) = dom::document()
            && let Ok(spinner) = doc.create_element("i")
        {
            spinner.set_class_name("fas fa-spinner fa-spin");
            let _ = button.prepend_with_node_1(&spinner);
        }
        button.set_disabled(true);
    }

    fn restore_button(&self) {
        let Some(button) = self.button.as_ref() else {
            return;
        };
        if let Some(label) = self.saved_label.take() {
            button.set_inner_html(&label);
        }
        button.set_disabled(false);
    }

    fn set_success_visible(&self, visible: bool) {
        let Some(success) = self.success.as_ref() else {
            return;
        };
        let classes = success.class_list();
        let _ = if visible {
            classes.remove_1(&self.cfg.hidden_class)
        } else {
            classes.add_1(&self.cfg.hidden_class)
        };
    }
}

/// Submission for `form_id`, wired on first use when the form was not picked
/// up at start-up.
pub(super) fn find_or_register(ctx: &Rc<PageContext>, form_id: &str) -> Option<Rc<FormSubmission>> {
    if let Some(existing) = ctx.form(form_id) {
        return Some(existing);
    }
    let form = dom::element_by_id(form_id)?
        .dyn_into::<HtmlFormElement>()
        .ok()?;
    let submission = FormSubmission::new(form, ctx);
    ctx.forms.borrow_mut().push(Rc::clone(&submission));
    log::debug!("registered #{form_id} on first submit");
    Some(submission)
}

pub(super) fn install(ctx: &Rc<PageContext>) -> Result<(), JsValue> {
    let mut forms = dom::query_all::<HtmlFormElement>(&ctx.config().submit.form_selector);
    let modal_form_id = &ctx.config().modal.form_id;
    if !forms.iter().any(|form| &form.id() == modal_form_id)
        && let Some(modal_form) =
            dom::element_by_id(modal_form_id).and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
    {
        forms.push(modal_form);
    }
    for form in forms {
        let submission = FormSubmission::new(form.clone(), ctx);
        ctx.forms.borrow_mut().push(Rc::clone(&submission));
        dom::listen_forever(&form, "submit", move |event| {
            event.prevent_default();
            submission.submit();
        })?;
    }
    Ok(())
}
