//! sitekit core
//!
//! Platform-agnostic logic behind the site's accessibility toolbar and page
//! interactions. Nothing here touches the DOM: the web crate supplies a
//! [`PreferenceStore`] and a [`PresentationSink`] and performs the class
//! changes the page models compute.

pub mod actions;
pub mod config;
pub mod constants;
pub mod controller;
pub mod page;
pub mod prefs;
pub mod storage;

pub use actions::{ControlRegistry, PanelState, ToolbarAction};
pub use config::{
    CONFIG_ELEMENT_ID, HeaderConfig, MenuConfig, ModalConfig, RevealConfig, SiteConfig,
    SliderConfig, SubmitConfig,
};
pub use controller::{BodySnapshot, PreferenceController, PresentationSink, load, save};
pub use page::{ClassDelta, ScrollLock};
pub use prefs::{AccessibilityPreferences, PreferenceField, Presentation};
pub use storage::{MemoryStore, PreferenceStore, StorageError};
