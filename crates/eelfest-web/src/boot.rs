#![forbid(unsafe_code)]

use std::cell::RefCell;
use std::rc::Rc;

use eelfest_core::alert::{markup, stylesheet};
use eelfest_core::config::Selectors;
use eelfest_core::{Command, PageConfig, PageController};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Document;

use crate::CONFIG_SCRIPT_ID;
use crate::elements::Elements;
use crate::error::WebError;
use crate::logging::init_console_logging;
use crate::shell::{self, SharedShell, Shell};

thread_local! {
    static PAGE: RefCell<Option<SharedShell>> = const { RefCell::new(None) };
}

/// Module entry point: boot once the DOM is parsed.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    init_console_logging();
    let window = web_sys::window().ok_or(WebError::NoWindow)?;
    let document = window.document().ok_or(WebError::NoDocument)?;

    if document.ready_state() == "loading" {
        let on_ready: Closure<dyn FnMut()> = Closure::once(|| {
            if let Err(err) = boot() {
                tracing::error!(error = %err, "page boot failed");
            }
        });
        document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())?;
        // Fires exactly once for the page's lifetime.
        on_ready.forget();
        return Ok(());
    }
    boot().map_err(Into::into)
}

fn boot() -> Result<(), WebError> {
    if PAGE.with(|page| page.borrow().is_some()) {
        tracing::warn!("page already booted");
        return Ok(());
    }
    let window = web_sys::window().ok_or(WebError::NoWindow)?;
    let document = window.document().ok_or(WebError::NoDocument)?;

    let config = read_config(&document);
    inject_alert(&document, &config.selectors)?;
    let elements = Elements::collect(&document, &config.selectors)?;
    let inventory = elements.inventory(&config.selectors);
    let controller = PageController::new(config, inventory);

    let shell = Rc::new(RefCell::new(Shell::new(window, controller, elements)));
    shell::wire(&shell, &document)?;
    PAGE.with(|page| *page.borrow_mut() = Some(shell));
    tracing::info!("eelfest page ready");
    Ok(())
}

/// Embedded JSON config, or defaults when absent or invalid.
fn read_config(document: &Document) -> PageConfig {
    let Some(script) = document.get_element_by_id(CONFIG_SCRIPT_ID) else {
        return PageConfig::default();
    };
    let json = script.text_content().unwrap_or_default();
    match PageConfig::from_json_str(&json) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(error = %err, "invalid page config; using defaults");
            PageConfig::default()
        }
    }
}

fn inject_alert(document: &Document, selectors: &Selectors) -> Result<(), WebError> {
    if document.get_element_by_id(&selectors.alert_overlay_id).is_some() {
        return Ok(());
    }
    if let Some(body) = document.body() {
        body.insert_adjacent_html("beforeend", &markup(selectors))?;
    }
    if let Some(head) = document.head() {
        head.insert_adjacent_html(
            "beforeend",
            &format!("<style>{}</style>", stylesheet(selectors)),
        )?;
    }
    Ok(())
}

/// JS handle to the booted page.
#[wasm_bindgen]
pub struct EelfestPage {
    shell: SharedShell,
}

#[wasm_bindgen]
impl EelfestPage {
    /// The booted page, or `undefined` before boot completes.
    pub fn current() -> Option<EelfestPage> {
        PAGE.with(|page| page.borrow().clone())
            .map(|shell| Self { shell })
    }

    /// Show the alert with `message`, replacing any message already shown.
    #[wasm_bindgen(js_name = showAlert)]
    pub fn show_alert(&self, message: &str) {
        self.run(|controller| controller.show_alert(message));
    }

    #[wasm_bindgen(js_name = closeAlert)]
    pub fn close_alert(&self) {
        self.run(PageController::close_alert);
    }

    /// Filter the artist cards; returns how many match (every card for an
    /// empty query, zero when the page has no search).
    #[wasm_bindgen(js_name = filterArtists)]
    pub fn filter_artists(&self, query: &str) -> u32 {
        let mut count = 0;
        self.run(|controller| match controller.filter_artists(query) {
            Some((outcome, commands)) => {
                count = outcome.count;
                commands
            }
            None => Vec::new(),
        });
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Recorded events as JSON lines, when `record_trace` is enabled.
    #[wasm_bindgen(js_name = traceJsonl)]
    pub fn trace_jsonl(&self) -> Option<String> {
        self.shell
            .try_borrow()
            .ok()
            .and_then(|shell| shell.controller().trace_jsonl())
    }
}

impl EelfestPage {
    fn run(&self, f: impl FnOnce(&mut PageController) -> Vec<Command>) {
        let commands = match self.shell.try_borrow_mut() {
            Ok(mut shell) => f(shell.controller_mut()),
            Err(_) => {
                tracing::debug!("page busy; API call dropped");
                return;
            }
        };
        shell::apply_external(&self.shell, &commands);
    }
}
