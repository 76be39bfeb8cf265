#![forbid(unsafe_code)]

//! Host-side decisions that need no DOM.
//!
//! The wasm modules measure the page and hand the measurements here, so
//! these rules run (and are tested) on native targets too.

use eelfest_core::search::ClickZone;

/// Start value for a show/hide track, or `None` to skip it.
///
/// Follows jQuery's `:visible` gating: showing an element that already
/// renders, or hiding one that does not, is a no-op unless a track on the
/// same channel is in flight (which must be retargeted, not left running).
/// A displayed element starts fully shown, a hidden one from zero.
#[must_use]
pub fn toggle_start(in_flight: bool, displayed: bool, showing: bool) -> Option<f64> {
    if !in_flight && displayed == showing {
        return None;
    }
    Some(if displayed { 1.0 } else { 0.0 })
}

/// Whether `display: block` must be forced before a track starts.
#[must_use]
pub const fn needs_display(showing: bool, displayed: bool) -> bool {
    showing && !displayed
}

/// Document scroll offset that puts an element `offset` below the viewport
/// top. `rect_top` is viewport-relative, as `getBoundingClientRect` gives it.
#[must_use]
pub fn element_scroll_top(rect_top: f64, scroll_y: f64, offset: f64) -> f64 {
    (rect_top + scroll_y - offset).max(0.0)
}

/// Classify a document click from the closest search form and card
/// ancestors of its target.
#[must_use]
pub fn click_zone<E: PartialEq>(
    cards: &[E],
    in_search_form: bool,
    card: Option<&E>,
) -> ClickZone {
    ClickZone {
        in_search_form,
        card: card.and_then(|card| cards.iter().position(|c| c == card)),
    }
}
