#![forbid(unsafe_code)]

//! Reveal-on-scroll plumbing: an `IntersectionObserver` where the browser has
//! one, and geometry measurement for the scroll-scan fallback.

use eelfest_core::geometry::{Rect, Viewport};
use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, Window};

use crate::elements::Elements;
use crate::error::WebError;

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// Observes reveal items and reports `(index, intersecting)` per entry.
pub struct RevealObserver {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

impl RevealObserver {
    /// Fails when the browser lacks `IntersectionObserver`.
    pub fn new(mut on_entry: impl FnMut(usize, bool) + 'static) -> Result<Self, WebError> {
        let callback: ObserverCallback =
            Closure::wrap(Box::new(move |entries: Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if let Some(index) = Elements::reveal_index(&entry.target()) {
                        on_entry(index, entry.is_intersecting());
                    }
                }
            }));
        let observer = IntersectionObserver::new(callback.as_ref().unchecked_ref())?;
        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    pub fn observe(&self, element: &Element) {
        self.observer.observe(element);
    }

    pub fn unobserve(&self, element: &Element) {
        self.observer.unobserve(element);
    }
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Viewport band and document-space boxes of every reveal item.
pub fn measure(window: &Window, items: &[Element]) -> (Viewport, Vec<Rect>) {
    let scroll_y = window.scroll_y().unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0);
    let rects = items
        .iter()
        .map(|item| {
            let r = item.get_bounding_client_rect();
            Rect::new(r.left(), r.top() + scroll_y, r.width(), r.height())
        })
        .collect();
    (Viewport::new(scroll_y, height), rects)
}
