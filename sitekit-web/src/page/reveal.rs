use std::cell::RefCell;
use std::rc::Rc;

use sitekit_core::page::{RevealOutcome, RevealTracker};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use super::PageContext;
use crate::dom;

const KEY_ATTR: &str = "data-reveal-key";

pub(super) fn install(ctx: &Rc<PageContext>) -> Result<(), JsValue> {
    let cfg = ctx.config().reveal.clone();
    let targets = dom::query_all::<Element>(&cfg.selector);
    if targets.is_empty() {
        return Ok(());
    }
    let tracker = Rc::new(RefCell::new(RevealTracker::<u32>::new()));

    let callback = {
        let tracker = Rc::clone(&tracker);
        let revealed_class = cfg.revealed_class.clone();
        Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    let target = entry.target();
                    let Some(key) = target
                        .get_attribute(KEY_ATTR)
                        .and_then(|raw| raw.parse::<u32>().ok())
                    else {
                        continue;
                    };
                    let outcome = tracker
                        .borrow_mut()
                        .on_intersection(&key, entry.is_intersecting());
                    match outcome {
                        RevealOutcome::Reveal => {
                            let _ = target.class_list().add_1(&revealed_class);
                            observer.unobserve(&target);
                        }
                        RevealOutcome::Ignored => observer.unobserve(&target),
                        RevealOutcome::Pending => {}
                    }
                }
            },
        )
    };

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(cfg.threshold));
    options.set_root_margin(&cfg.root_margin);
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    callback.forget();

    for (idx, target) in targets.iter().enumerate() {
        let key = u32::try_from(idx).unwrap_or(u32::MAX);
        if tracker.borrow_mut().observe(key) {
            target.set_attribute(KEY_ATTR, &key.to_string())?;
            observer.observe(target);
        }
    }
    Ok(())
}
