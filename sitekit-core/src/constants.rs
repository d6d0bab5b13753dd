//! Fixed values shared by the preference controller and the page layer.
//!
//! Anything a deployment may reasonably want to change lives in
//! [`SiteConfig`](crate::config::SiteConfig) instead; these are the defaults
//! it starts from and the limits the record enforces.

// Preference record -------------------------------------------------------
pub const FONT_SCALE_DEFAULT: u32 = 100;
pub const FONT_SCALE_STEP: u32 = 10;
pub const FONT_SCALE_FLOOR: u32 = 50;
pub const PREFS_STORAGE_KEY: &str = "acc-settings";

// Presentation classes ----------------------------------------------------
pub const CLASS_HIGH_CONTRAST: &str = "acc-high-contrast";
pub const CLASS_GRAYSCALE: &str = "acc-grayscale";
pub const CLASS_HIGHLIGHT_LINKS: &str = "acc-highlight-links";
pub const CLASS_READABLE_FONT: &str = "acc-readable-font";
pub const CLASS_CONTROL_ACTIVE: &str = "active";

// Toolbar controls --------------------------------------------------------
pub const CONTROL_FONT_UP: &str = "acc-font-up";
pub const CONTROL_FONT_DOWN: &str = "acc-font-down";
pub const CONTROL_CONTRAST: &str = "acc-contrast";
pub const CONTROL_GRAYSCALE: &str = "acc-grayscale";
pub const CONTROL_LINKS: &str = "acc-links";
pub const CONTROL_READABLE_FONT: &str = "acc-font-readable";
pub const CONTROL_RESET: &str = "acc-reset";
pub const CONTROL_PANEL_TOGGLE: &str = "accessibility-toolbar-toggle";
pub const CONTROL_PANEL_CLOSE: &str = "acc-close";
pub const TOOLBAR_ID: &str = "accessibility-toolbar";
pub const TOOLBAR_OPEN_CLASS: &str = "open";

// Page interaction timing -------------------------------------------------
pub const HEADER_COMPACT_OFFSET_PX: f64 = 50.0;
pub const SUBMIT_SENDING_MS: u32 = 1_500;
pub const SUBMIT_SUCCESS_VISIBLE_MS: u32 = 3_000;
pub const SLIDE_INTERVAL_MS: u32 = 4_000;
pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";
