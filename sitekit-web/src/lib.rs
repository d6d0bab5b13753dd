#![forbid(unsafe_code)]
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod a11y;
pub mod bootstrap;
pub mod components;
pub mod dom;
pub mod page;
pub mod storage;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    if let Err(err) = bootstrap::boot() {
        dom::console_error(&format!(
            "sitekit failed to start: {}",
            dom::js_error_message(&err)
        ));
    }
}
