#![forbid(unsafe_code)]

//! Host-to-controller events.
//!
//! The host normalizes DOM events into [`PageEvent`]s. Everything the
//! controller needs is carried in the event (input values, measurements,
//! click zones), so a recorded event stream replays identically.

use serde::{Deserialize, Serialize};

use crate::forms::FormKind;
use crate::geometry::{Rect, Viewport};
use crate::search::ClickZone;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageEvent {
    /// Hamburger icon activated.
    NavToggle,
    /// Window scrolled.
    Scroll { scroll_top: f64 },
    /// Scroll-to-top control activated.
    ScrollTopClick,
    /// Intersection notification for one reveal item.
    RevealIntersection { item: usize, intersecting: bool },
    /// Measured reveal item boxes, for hosts without an intersection observer.
    RevealScan { viewport: Viewport, rects: Vec<Rect> },
    /// Pointer entered the contact dropdown region.
    DropdownEnter,
    /// Pointer left the contact dropdown region.
    DropdownLeave,
    /// Contact toggle activated.
    ContactToggle,
    /// Focus entered an input or textarea inside the contact form.
    ContactFieldFocus,
    /// Search input changed (keyup or input).
    SearchInput { value: String },
    /// Search form submitted.
    SearchSubmit {
        value: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        header_height: Option<f64>,
    },
    /// Click anywhere in the document.
    DocumentClick { zone: ClickZone },
    /// Alert close control activated.
    AlertClose,
    /// Click on the alert overlay.
    AlertOverlayClick,
    /// A form was submitted.
    FormSubmit { form: FormKind },
    /// Script asked for the alert with `message`.
    ShowAlert { message: String },
    /// Script asked to dismiss the alert.
    CloseAlert,
    /// Script ran the artist filter for `query`.
    FilterArtists { query: String },
}

impl PageEvent {
    /// Stable name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::NavToggle => "nav_toggle",
            Self::Scroll { .. } => "scroll",
            Self::ScrollTopClick => "scroll_top_click",
            Self::RevealIntersection { .. } => "reveal_intersection",
            Self::RevealScan { .. } => "reveal_scan",
            Self::DropdownEnter => "dropdown_enter",
            Self::DropdownLeave => "dropdown_leave",
            Self::ContactToggle => "contact_toggle",
            Self::ContactFieldFocus => "contact_field_focus",
            Self::SearchInput { .. } => "search_input",
            Self::SearchSubmit { .. } => "search_submit",
            Self::DocumentClick { .. } => "document_click",
            Self::AlertClose => "alert_close",
            Self::AlertOverlayClick => "alert_overlay_click",
            Self::FormSubmit { .. } => "form_submit",
            Self::ShowAlert { .. } => "show_alert",
            Self::CloseAlert => "close_alert",
            Self::FilterArtists { .. } => "filter_artists",
        }
    }

    /// Encode as a single-line JSON object.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decode a previously encoded event.
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_events_encode_as_kind_only() {
        assert_eq!(
            PageEvent::NavToggle.to_json_string().expect("serialize"),
            r#"{"kind":"nav_toggle"}"#
        );
    }

    #[test]
    fn name_matches_json_kind() {
        let events = [
            PageEvent::Scroll { scroll_top: 12.0 },
            PageEvent::SearchSubmit {
                value: "eel".into(),
                header_height: None,
            },
            PageEvent::DocumentClick {
                zone: ClickZone {
                    in_search_form: false,
                    card: Some(3),
                },
            },
            PageEvent::FormSubmit {
                form: FormKind::Contact,
            },
            PageEvent::ShowAlert {
                message: "Gates open at 6".into(),
            },
            PageEvent::CloseAlert,
            PageEvent::FilterArtists {
                query: "eel".into(),
            },
        ];
        for event in events {
            let json = event.to_json_string().expect("serialize");
            let value: serde_json::Value = serde_json::from_str(&json).expect("json");
            assert_eq!(value["kind"], event.name());
            assert_eq!(PageEvent::from_json_str(&json).expect("deserialize"), event);
        }
    }

    #[test]
    fn missing_header_height_defaults_to_none() {
        let event = PageEvent::from_json_str(r#"{"kind":"search_submit","value":"x"}"#)
            .expect("deserialize");
        assert_eq!(
            event,
            PageEvent::SearchSubmit {
                value: "x".into(),
                header_height: None
            }
        );
    }
}
