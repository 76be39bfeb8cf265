#![forbid(unsafe_code)]

//! DOM lookup and mutation helpers.
//!
//! # Event listener lifetime
//!
//! A `Closure` must outlive the listener it backs. [`EventListener`] owns
//! both and removes the listener on drop, so dropping the shell detaches
//! everything it wired. The shell lives for the whole page, so in practice
//! listeners are never dropped.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement};

use crate::error::WebError;

/// A DOM event listener that removes itself when dropped.
pub struct EventListener {
    target: EventTarget,
    event_name: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    /// Attach `callback` to `target` for `event_name`.
    pub fn new(
        target: &EventTarget,
        event_name: &'static str,
        callback: impl FnMut(Event) + 'static,
    ) -> Result<Self, WebError> {
        let callback: Closure<dyn FnMut(Event)> = Closure::wrap(Box::new(callback));
        target.add_event_listener_with_callback(event_name, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event_name,
            callback,
        })
    }

    /// Attach a passive listener (never calls `preventDefault`), for
    /// high-frequency events such as `scroll`.
    pub fn passive(
        target: &EventTarget,
        event_name: &'static str,
        callback: impl FnMut(Event) + 'static,
    ) -> Result<Self, WebError> {
        let callback: Closure<dyn FnMut(Event)> = Closure::wrap(Box::new(callback));
        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            event_name,
            callback.as_ref().unchecked_ref(),
            &options,
        )?;
        Ok(Self {
            target: target.clone(),
            event_name,
            callback,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback(
            self.event_name,
            self.callback.as_ref().unchecked_ref(),
        );
    }
}

/// All elements matching `selector`, in document order.
pub fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, WebError> {
    let list = document.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// First element matching `selector`.
pub fn query_one(document: &Document, selector: &str) -> Result<Option<Element>, WebError> {
    Ok(document.query_selector(selector)?)
}

/// Add or remove a class.
pub fn set_class(element: &Element, class: &str, on: bool) {
    if let Err(err) = element.class_list().toggle_with_force(class, on) {
        tracing::warn!(class, error = ?err, "class toggle failed");
    }
}

/// Nearest ancestor-or-self of an event target matching `selector`.
pub fn closest(target: Option<EventTarget>, selector: &str) -> Option<Element> {
    let target = target?;
    let element = match target.dyn_into::<Element>() {
        Ok(element) => element,
        // Text nodes and other non-element targets: start from the parent.
        Err(target) => target.dyn_into::<web_sys::Node>().ok()?.parent_element()?,
    };
    element.closest(selector).ok().flatten()
}

/// Whether the event's own target matches `selector`.
pub fn target_matches(event: &Event, selector: &str) -> bool {
    event
        .target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .is_some_and(|el| el.matches(selector).unwrap_or(false))
}

pub fn as_html(element: &Element) -> Option<&HtmlElement> {
    element.dyn_ref::<HtmlElement>()
}

/// Set an inline style property, logging failures.
pub fn set_style(element: &Element, property: &str, value: &str) {
    if let Some(html) = as_html(element)
        && let Err(err) = html.style().set_property(property, value)
    {
        tracing::warn!(property, error = ?err, "style update failed");
    }
}

pub fn clear_style(element: &Element, property: &str) {
    if let Some(html) = as_html(element) {
        let _ = html.style().remove_property(property);
    }
}

/// Whether the element currently renders (not `display: none`).
pub fn is_displayed(element: &Element) -> bool {
    element.get_client_rects().length() > 0
}

/// Outer height in pixels, `None` when unmeasurable or zero.
pub fn outer_height(element: &Element) -> Option<f64> {
    as_html(element)
        .map(|html| f64::from(html.offset_height()))
        .filter(|h| *h > 0.0)
}
