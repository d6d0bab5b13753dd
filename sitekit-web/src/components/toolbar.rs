//! The floating accessibility toolbar.
//!
//! All buttons share one click handler on the toolbar root; the control's
//! element id is resolved through [`ControlRegistry`] and the resulting action
//! goes to the panel reducer and the preference controller.

use std::rc::Rc;

use sitekit_core::constants::{
    CLASS_CONTROL_ACTIVE, CONTROL_FONT_DOWN, CONTROL_FONT_UP, CONTROL_PANEL_CLOSE,
    CONTROL_PANEL_TOGGLE, CONTROL_RESET, PREFS_STORAGE_KEY, TOOLBAR_ID, TOOLBAR_OPEN_CLASS,
};
use sitekit_core::{
    AccessibilityPreferences, ControlRegistry, PanelState, PreferenceController, PreferenceField,
    ToolbarAction,
};
use wasm_bindgen::JsCast;
use yew::prelude::*;

use crate::a11y::BodyPresenter;
use crate::storage::LocalStore;

pub type WebController = PreferenceController<LocalStore, BodyPresenter>;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    #[prop_or_else(default_storage_key)]
    pub storage_key: AttrValue,
}

fn default_storage_key() -> AttrValue {
    AttrValue::from(PREFS_STORAGE_KEY)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Panel(PanelState);

enum PanelEvent {
    Control(ToolbarAction),
    Key(String),
}

impl Reducible for Panel {
    type Action = PanelEvent;

    fn reduce(self: Rc<Self>, event: Self::Action) -> Rc<Self> {
        let next = match event {
            PanelEvent::Control(action) => self.0.after(action),
            PanelEvent::Key(key) => self.0.after_key(&key),
        };
        if next == self.0 { self } else { Rc::new(Self(next)) }
    }
}

/// Id of the toolbar button an event came from, if any.
fn control_id(event: &MouseEvent) -> Option<String> {
    let target = event.target()?.dyn_into::<web_sys::Element>().ok()?;
    let button = target.closest("button").ok()??;
    Some(button.id())
}

fn font_status(prefs: &AccessibilityPreferences) -> String {
    format!("Font size {}%", prefs.font_scale_percent)
}

fn control_button(
    id: &'static str,
    icon: &'static str,
    label: &'static str,
    pressed: Option<bool>,
    full_width: bool,
) -> Html {
    let class = classes!(
        "acc-btn",
        "acc-ignore",
        full_width.then_some("acc-btn-full"),
        pressed.unwrap_or(false).then_some(CLASS_CONTROL_ACTIVE),
    );
    html! {
        <button type="button" {id} {class} aria-pressed={pressed.map(|on| on.to_string())}>
            <i class={classes!("fas", icon, "acc-ignore")} aria-hidden="true"></i>
            <span class="acc-ignore">{ label }</span>
        </button>
    }
}

const fn field_icon(field: PreferenceField) -> &'static str {
    match field {
        PreferenceField::HighContrast => "fa-adjust",
        PreferenceField::Grayscale => "fa-tint-slash",
        PreferenceField::HighlightLinks => "fa-link",
        PreferenceField::ReadableFont => "fa-eye",
    }
}

#[function_component(AccessibilityToolbar)]
pub fn accessibility_toolbar(props: &Props) -> Html {
    let controller = {
        let key = props.storage_key.clone();
        use_mut_ref(move || WebController::restore_with_key(LocalStore, BodyPresenter, &key))
    };
    let prefs = {
        let controller = controller.clone();
        use_state(move || controller.borrow().preferences())
    };
    let panel = use_reducer(Panel::default);
    let registry = use_memo((), |()| ControlRegistry::default());

    {
        let panel = panel.dispatcher();
        use_effect_with((), move |()| {
            let listener = crate::dom::window().ok().and_then(|win| {
                crate::dom::EventListener::new(&win, "keydown", move |event: Event| {
                    if let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) {
                        panel.dispatch(PanelEvent::Key(key));
                    }
                })
                .ok()
            });
            move || drop(listener)
        });
    }

    let onclick = {
        let controller = controller.clone();
        let prefs = prefs.clone();
        let panel = panel.dispatcher();
        Callback::from(move |event: MouseEvent| {
            let Some(action) = control_id(&event).and_then(|id| registry.resolve(&id)) else {
                return;
            };
            panel.dispatch(PanelEvent::Control(action));
            if let Some(next) = controller.borrow_mut().dispatch(action) {
                prefs.set(next);
            }
        })
    };

    let open = panel.0.is_open();
    html! {
        <div class="acc-ignore" {onclick}>
            <button
                type="button"
                id={CONTROL_PANEL_TOGGLE}
                class="acc-ignore"
                title="Accessibility Toolbar"
                aria-controls={TOOLBAR_ID}
                aria-expanded={open.to_string()}
            >
                <i class="fas fa-universal-access fa-2x acc-ignore" aria-hidden="true"></i>
            </button>
            <div
                id={TOOLBAR_ID}
                class={classes!("acc-ignore", open.then_some(TOOLBAR_OPEN_CLASS))}
                role="dialog"
                aria-label="Accessibility"
                aria-hidden={(!open).to_string()}
            >
                <div class="acc-header acc-ignore">
                    <h3 class="acc-ignore">{ "Accessibility" }</h3>
                    <button type="button" id={CONTROL_PANEL_CLOSE} class="acc-close acc-ignore" aria-label="Close">
                        <i class="fas fa-times acc-ignore" aria-hidden="true"></i>
                    </button>
                </div>
                <div class="acc-grid acc-ignore">
                    { control_button(CONTROL_FONT_UP, "fa-font", "Font Size +", None, false) }
                    { control_button(CONTROL_FONT_DOWN, "fa-font", "Font Size -", None, false) }
                    { for PreferenceField::ALL.iter().map(|field| control_button(
                        field.control_id(),
                        field_icon(*field),
                        field.label(),
                        Some(prefs.get(*field)),
                        false,
                    )) }
                    { control_button(CONTROL_RESET, "fa-undo", "Reset Settings", None, true) }
                </div>
                <p class="sr-only" aria-live="polite">{ font_status(&prefs) }</p>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    fn render() -> String {
        let props = Props {
            storage_key: AttrValue::from("acc-settings"),
        };
        block_on(LocalServerRenderer::<AccessibilityToolbar>::with_props(props).render())
    }

    #[test]
    fn renders_every_registered_control() {
        let html = render();
        for (id, _) in ControlRegistry::default().preference_controls() {
            assert!(html.contains(&format!("id=\"{id}\"")), "missing {id}");
        }
        assert!(html.contains(CONTROL_PANEL_TOGGLE));
        assert!(html.contains(CONTROL_PANEL_CLOSE));
    }

    #[test]
    fn starts_closed_with_default_scale() {
        let html = render();
        assert!(html.contains("aria-expanded=\"false\""));
        assert!(html.contains("Font size 100%"));
        assert!(!html.contains("acc-btn-full active"));
    }

    #[test]
    fn panel_reducer_handles_escape() {
        let open = Rc::new(Panel(PanelState::Open));
        let same = Rc::clone(&open).reduce(PanelEvent::Key("a".into()));
        assert!(same.0.is_open());
        let closed = open.reduce(PanelEvent::Key("Escape".into()));
        assert_eq!(closed.0, PanelState::Closed);
    }
}
