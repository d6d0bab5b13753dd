//! DOM wiring for the page interaction layer.
//!
//! Each submodule attaches listeners for one behavior and performs the class
//! changes computed by `sitekit_core::page`. Missing elements disable the
//! behavior for that page rather than failing start-up.

mod header;
mod menu;
mod modal;
mod reveal;
mod slider;
mod submit;

use std::cell::RefCell;
use std::rc::Rc;

use sitekit_core::SiteConfig;
use wasm_bindgen::JsValue;

pub use menu::{toggle_menu, toggle_submenu};
pub use modal::set_modal_open;
pub use submit::FormSubmission;

thread_local! {
    static PAGE: RefCell<Option<Rc<PageContext>>> = const { RefCell::new(None) };
}

pub struct PageContext {
    config: SiteConfig,
    forms: RefCell<Vec<Rc<FormSubmission>>>,
}

impl PageContext {
    #[must_use]
    pub const fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Simulated submission wired to the form with `form_id`.
    #[must_use]
    pub fn form(&self, form_id: &str) -> Option<Rc<FormSubmission>> {
        self.forms
            .borrow()
            .iter()
            .find(|form| form.form_id() == form_id)
            .cloned()
    }
}

/// Wire every page behavior and remember the context for the exported
/// JavaScript entry points.
///
/// # Errors
/// Returns an error if the browser window is unavailable or refuses a
/// listener.
pub fn install(config: SiteConfig) -> Result<Rc<PageContext>, JsValue> {
    let ctx = Rc::new(PageContext {
        config,
        forms: RefCell::new(Vec::new()),
    });
    header::install(&ctx)?;
    menu::install(&ctx)?;
    submit::install(&ctx)?;
    modal::install(&ctx)?;
    slider::install(&ctx)?;
    reveal::install(&ctx)?;
    PAGE.with(|slot| *slot.borrow_mut() = Some(Rc::clone(&ctx)));
    Ok(ctx)
}

/// Simulate submitting `form_id` from an inline `onsubmit` handler. The
/// browser's own submission is always suppressed, even for unknown forms.
pub fn handle_form_submit(ctx: &Rc<PageContext>, event: &web_sys::Event, form_id: &str) {
    event.prevent_default();
    match submit::find_or_register(ctx, form_id) {
        Some(submission) => submission.submit(),
        None => log::warn!("no form #{form_id} to submit"),
    }
}

#[must_use]
pub fn current() -> Option<Rc<PageContext>> {
    PAGE.with(|slot| slot.borrow().clone())
}

// Inline `onclick="toggleMenu()"`-style handlers in existing markup call
// these.
#[cfg(target_arch = "wasm32")]
mod exports {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen(js_name = toggleMenu)]
    pub fn toggle_menu() {
        if let Some(ctx) = super::current() {
            super::toggle_menu(&ctx.config().menu);
        }
    }

    #[wasm_bindgen(js_name = toggleSubmenu)]
    pub fn toggle_submenu(id: &str) {
        if let Some(ctx) = super::current() {
            super::toggle_submenu(id, &ctx.config().menu);
        }
    }

    #[wasm_bindgen(js_name = openModal)]
    pub fn open_modal() {
        if let Some(ctx) = super::current() {
            super::set_modal_open(&ctx, true);
        }
    }

    #[wasm_bindgen(js_name = handleFormSubmit)]
    pub fn handle_form_submit(event: web_sys::Event, form_id: &str) {
        match super::current() {
            Some(ctx) => super::handle_form_submit(&ctx, &event, form_id),
            None => event.prevent_default(),
        }
    }

    #[wasm_bindgen(js_name = closeModal)]
    pub fn close_modal() {
        if let Some(ctx) = super::current() {
            super::set_modal_open(&ctx, false);
        }
    }
}
