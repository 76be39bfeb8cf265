#![forbid(unsafe_code)]

//! Page configuration: markup hooks, class names, timings and thresholds.
//!
//! Every field has a default matching the festival site's markup, so an
//! empty JSON object (`{}`) is a complete configuration. Hosts may override
//! any subset.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// CSS selectors and attribute names the controller relies on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub nav_icon: String,
    pub nav_container: String,
    pub scroll_top_button: String,
    pub reveal_item: String,
    pub contact_dropdown: String,
    pub contact_toggle: String,
    pub contact_form: String,
    /// Fields inside the contact form whose focus pins it open.
    pub contact_fields: String,
    pub artist_card: String,
    /// Attribute holding the artist's display name.
    pub artist_name_attribute: String,
    pub search_input: String,
    pub no_results_message: String,
    pub search_form: String,
    pub header: String,
    pub signup_form: String,
    /// Element ids of the injected alert (ids, not selectors).
    pub alert_overlay_id: String,
    pub alert_box_id: String,
    pub alert_message_id: String,
    pub alert_close_id: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            nav_icon: ".hamburger-menu".into(),
            nav_container: ".header-right".into(),
            scroll_top_button: "#scrollTopBtn".into(),
            reveal_item: ".animate-init".into(),
            contact_dropdown: ".footer-contact-dropdown".into(),
            contact_toggle: "#contactToggleBtn".into(),
            contact_form: "#contactForm".into(),
            contact_fields: "input, textarea".into(),
            artist_card: ".artist-card".into(),
            artist_name_attribute: "data-artist-name".into(),
            search_input: "#artistSearchInput".into(),
            no_results_message: "#noResultsMessage".into(),
            search_form: ".artist-search-form".into(),
            header: ".main-header".into(),
            signup_form: ".signup-form".into(),
            alert_overlay_id: "custom-alert-overlay".into(),
            alert_box_id: "custom-alert-box".into(),
            alert_message_id: "custom-alert-message".into(),
            alert_close_id: "custom-alert-close".into(),
        }
    }
}

impl Selectors {
    fn fields(&self) -> [(&'static str, &str); 19] {
        [
            ("nav_icon", &self.nav_icon),
            ("nav_container", &self.nav_container),
            ("scroll_top_button", &self.scroll_top_button),
            ("reveal_item", &self.reveal_item),
            ("contact_dropdown", &self.contact_dropdown),
            ("contact_toggle", &self.contact_toggle),
            ("contact_form", &self.contact_form),
            ("contact_fields", &self.contact_fields),
            ("artist_card", &self.artist_card),
            ("artist_name_attribute", &self.artist_name_attribute),
            ("search_input", &self.search_input),
            ("no_results_message", &self.no_results_message),
            ("search_form", &self.search_form),
            ("header", &self.header),
            ("signup_form", &self.signup_form),
            ("alert_overlay_id", &self.alert_overlay_id),
            ("alert_box_id", &self.alert_box_id),
            ("alert_message_id", &self.alert_message_id),
            ("alert_close_id", &self.alert_close_id),
        ]
    }
}

/// Presentation class names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassNames {
    pub active: String,
    pub mobile_menu_active: String,
    pub show: String,
    pub animate_init: String,
    pub hover_active: String,
    pub highlight: String,
    pub no_match: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            active: "active".into(),
            mobile_menu_active: "mobile-menu-active".into(),
            show: "show".into(),
            animate_init: "animate-init".into(),
            hover_active: "hover-active".into(),
            highlight: "highlight".into(),
            no_match: "no-match".into(),
        }
    }
}

impl ClassNames {
    fn fields(&self) -> [(&'static str, &str); 7] {
        [
            ("active", &self.active),
            ("mobile_menu_active", &self.mobile_menu_active),
            ("show", &self.show),
            ("animate_init", &self.animate_init),
            ("hover_active", &self.hover_active),
            ("highlight", &self.highlight),
            ("no_match", &self.no_match),
        ]
    }
}

/// Animation durations in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    pub dropdown_slide_ms: u32,
    pub no_results_slide_ms: u32,
    pub alert_fade_ms: u32,
    pub submit_scroll_ms: u32,
    pub scroll_top_ms: u32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            dropdown_slide_ms: 500,
            no_results_slide_ms: 200,
            alert_fade_ms: 300,
            submit_scroll_ms: 500,
            // jQuery's default speed; the markup asks for "smooth", which
            // jQuery does not recognise.
            scroll_top_ms: 400,
        }
    }
}

/// Full page configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub selectors: Selectors,
    pub classes: ClassNames,
    pub timings: Timings,
    /// Scroll offset above which the scroll-to-top control is shown.
    pub scroll_top_threshold: f64,
    /// Header height used when the header cannot be measured.
    pub header_fallback_height: f64,
    /// Extra space left above a scrolled-to artist card.
    pub scroll_gutter: f64,
    pub confirmation_message: String,
    /// Record handled events as JSON lines for replay.
    pub record_trace: bool,
    /// Recording stops after this many events; later events are counted
    /// but not kept.
    pub trace_max_events: usize,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            selectors: Selectors::default(),
            classes: ClassNames::default(),
            timings: Timings::default(),
            scroll_top_threshold: 200.0,
            header_fallback_height: 100.0,
            scroll_gutter: 20.0,
            confirmation_message: "Your request has been submitted!".into(),
            record_trace: false,
            trace_max_events: crate::trace::DEFAULT_MAX_EVENTS,
        }
    }
}

impl PageConfig {
    /// Parse and validate a (possibly partial) JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the scroll-to-top threshold (builder).
    #[must_use]
    pub fn with_scroll_top_threshold(mut self, threshold: f64) -> Self {
        self.scroll_top_threshold = threshold;
        self
    }

    /// Set the confirmation message (builder).
    #[must_use]
    pub fn with_confirmation_message(mut self, message: impl Into<String>) -> Self {
        self.confirmation_message = message.into();
        self
    }

    /// Enable event recording (builder).
    #[must_use]
    pub fn with_trace(mut self, enabled: bool) -> Self {
        self.record_trace = enabled;
        self
    }

    /// Cap the number of recorded events (builder).
    #[must_use]
    pub fn with_trace_limit(mut self, max_events: usize) -> Self {
        self.trace_max_events = max_events;
        self
    }

    /// Check that every hook and class is named and every number is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some((field, _)) = self
            .selectors
            .fields()
            .into_iter()
            .find(|(_, value)| value.trim().is_empty())
        {
            return Err(ConfigError::EmptySelector(field));
        }
        if let Some((field, _)) = self
            .classes
            .fields()
            .into_iter()
            .find(|(_, value)| value.trim().is_empty())
        {
            return Err(ConfigError::EmptyClassName(field));
        }
        for (field, value) in [
            ("scroll_top_threshold", self.scroll_top_threshold),
            ("header_fallback_height", self.header_fallback_height),
            ("scroll_gutter", self.scroll_gutter),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidNumber { field, value });
            }
        }
        if self.confirmation_message.trim().is_empty() {
            return Err(ConfigError::EmptyMessage);
        }
        Ok(())
    }
}
