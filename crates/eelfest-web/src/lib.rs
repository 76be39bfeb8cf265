#![forbid(unsafe_code)]

//! Browser shell for the Elektrik Eel festival site.
//!
//! All interaction logic lives in `eelfest-core`; this crate only wires DOM
//! events into a [`eelfest_core::PageController`] and applies the commands it
//! returns. On load it:
//! - reads optional JSON configuration from
//!   `<script type="application/json" id="eelfest-config">`,
//! - injects the alert dialog markup and stylesheet,
//! - attaches listeners for the controls present on the page,
//! - drives show/hide/scroll animations from `requestAnimationFrame`.
//!
//! Scripts reach the booted page through `EelfestPage.current()`.

pub mod error;
pub mod logging;
pub mod plan;

#[cfg(target_arch = "wasm32")]
mod animate;
#[cfg(target_arch = "wasm32")]
mod boot;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod elements;
#[cfg(target_arch = "wasm32")]
mod observer;
#[cfg(target_arch = "wasm32")]
mod shell;

#[cfg(target_arch = "wasm32")]
pub use boot::EelfestPage;

pub use error::WebError;

/// Id of the optional JSON configuration element.
pub const CONFIG_SCRIPT_ID: &str = "eelfest-config";

/// Native builds compile this crate as a stub so `cargo check --workspace` stays
/// green on non-wasm targets. The stub drives a bare controller so the JS API
/// can be exercised without a browser.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct EelfestPage {
    controller: eelfest_core::PageController,
}

#[cfg(not(target_arch = "wasm32"))]
impl EelfestPage {
    pub fn new(
        config: eelfest_core::PageConfig,
        inventory: eelfest_core::PageInventory,
    ) -> Self {
        Self {
            controller: eelfest_core::PageController::new(config, inventory),
        }
    }

    pub fn show_alert(&mut self, message: &str) {
        self.controller.show_alert(message);
    }

    pub fn close_alert(&mut self) {
        self.controller.close_alert();
    }

    pub fn filter_artists(&mut self, query: &str) -> u32 {
        self.controller
            .filter_artists(query)
            .map_or(0, |(outcome, _)| {
                u32::try_from(outcome.count).unwrap_or(u32::MAX)
            })
    }

    pub fn trace_jsonl(&self) -> Option<String> {
        self.controller.trace_jsonl()
    }

    pub fn controller(&self) -> &eelfest_core::PageController {
        &self.controller
    }
}
