#![forbid(unsafe_code)]

//! The page shell: owns the controller, the cached elements and the
//! animation driver, turns DOM events into [`PageEvent`]s and applies the
//! resulting commands.
//!
//! # Re-entrancy
//!
//! Every DOM callback goes through [`dispatch`], which takes a mutable borrow
//! of the shared shell. Applying commands can synchronously fire further DOM
//! events (resetting a form, for one); those find the shell already borrowed
//! and are dropped with a debug log rather than panicking.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use eelfest_core::forms::FormKind;
use eelfest_core::search::ClickZone;
use eelfest_core::{Command, PageController, PageEvent, Reaction, Target};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, HtmlInputElement, Window};

use crate::animate::Effects;
use crate::dom::{EventListener, closest, outer_height, set_class, target_matches};
use crate::elements::Elements;
use crate::error::WebError;
use crate::observer::{RevealObserver, measure};
use crate::plan::click_zone;

pub type SharedShell = Rc<RefCell<Shell>>;

pub struct Shell {
    window: Window,
    controller: PageController,
    elements: Elements,
    effects: Effects,
    observer: Option<RevealObserver>,
    listeners: Vec<EventListener>,
    frame_callback: Option<Closure<dyn FnMut(f64)>>,
    frame_pending: bool,
}

impl Shell {
    pub fn new(window: Window, controller: PageController, elements: Elements) -> Self {
        Self {
            window,
            controller,
            elements,
            effects: Effects::default(),
            observer: None,
            listeners: Vec::new(),
            frame_callback: None,
            frame_pending: false,
        }
    }

    pub fn controller(&self) -> &PageController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PageController {
        &mut self.controller
    }

    /// Apply commands to the DOM, starting animations as needed.
    pub fn apply(&mut self, commands: &[Command]) {
        let class_names = &self.controller.config().classes;
        for command in commands {
            match command {
                Command::SetClass { target, class, on } => {
                    let name = class.name(class_names);
                    for element in self.elements.resolve(*target) {
                        set_class(&element, name, *on);
                    }
                }
                Command::Show { .. }
                | Command::Hide { .. }
                | Command::ScrollTo { .. }
                | Command::ScrollToElement { .. } => {
                    self.effects.begin(command, &self.elements, &self.window);
                }
                Command::SetText { target, text } => {
                    for element in self.elements.resolve(*target) {
                        element.set_text_content(Some(text.as_str()));
                    }
                }
                Command::SetValue { target, value } => self.set_value(*target, value),
                Command::ClearValue { target } => self.set_value(*target, ""),
                Command::ResetForm { target } => self.elements.reset_forms(*target),
                Command::Unobserve { target } => {
                    if let Some(observer) = &self.observer {
                        for element in self.elements.resolve(*target) {
                            observer.unobserve(&element);
                        }
                    }
                }
            }
        }
    }

    fn set_value(&self, target: Target, value: &str) {
        for element in self.elements.resolve(target) {
            if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
                input.set_value(value);
            }
        }
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn header_height(&self) -> Option<f64> {
        self.elements.header.as_ref().and_then(outer_height)
    }

    fn click_zone(&self, event: &Event) -> ClickZone {
        let selectors = &self.controller.config().selectors;
        click_zone(
            &self.elements.artist_cards,
            closest(event.target(), &selectors.search_form).is_some(),
            closest(event.target(), &selectors.artist_card).as_ref(),
        )
    }

    /// Reveal scan for hosts without an intersection observer.
    fn scan_event(&self) -> Option<PageEvent> {
        if self.observer.is_some() || self.controller.reveal().is_done() {
            return None;
        }
        let (viewport, rects) = measure(&self.window, &self.elements.reveal_items);
        Some(PageEvent::RevealScan { viewport, rects })
    }
}

/// Route one event through the controller and apply its reaction.
pub fn dispatch(shell: &SharedShell, event: PageEvent, dom_event: Option<&Event>) {
    let Ok(mut guard) = shell.try_borrow_mut() else {
        tracing::debug!(event = event.name(), "re-entrant event dropped");
        return;
    };
    let reaction = guard.controller.handle(event);
    finish(&mut guard, &reaction, dom_event);
    drop(guard);
    request_frame(shell);
}

/// Apply commands produced outside [`dispatch`] (the JS API).
pub fn apply_external(shell: &SharedShell, commands: &[Command]) {
    if let Ok(mut guard) = shell.try_borrow_mut() {
        guard.apply(commands);
    }
    request_frame(shell);
}

fn finish(shell: &mut Shell, reaction: &Reaction, dom_event: Option<&Event>) {
    if reaction.prevent_default
        && let Some(event) = dom_event
    {
        event.prevent_default();
    }
    shell.apply(&reaction.commands);
}

fn request_frame(shell: &SharedShell) {
    let Ok(mut guard) = shell.try_borrow_mut() else {
        return;
    };
    if guard.frame_pending || guard.effects.is_idle() {
        return;
    }
    if guard.frame_callback.is_none() {
        let weak = Rc::downgrade(shell);
        guard.frame_callback = Some(Closure::wrap(Box::new(move |timestamp: f64| {
            if let Some(shell) = weak.upgrade() {
                on_frame(&shell, timestamp);
            }
        })));
    }
    let Some(callback) = guard.frame_callback.as_ref() else {
        return;
    };
    match guard
        .window
        .request_animation_frame(callback.as_ref().unchecked_ref())
    {
        Ok(_) => guard.frame_pending = true,
        Err(err) => tracing::warn!(error = ?err, "requestAnimationFrame failed"),
    }
}

fn on_frame(shell: &SharedShell, timestamp: f64) {
    {
        let Ok(mut guard) = shell.try_borrow_mut() else {
            return;
        };
        let guard = &mut *guard;
        guard.frame_pending = false;
        guard
            .effects
            .step(timestamp, &guard.elements, &guard.window);
    }
    request_frame(shell);
}

/// Build a listener callback holding only a weak reference to the shell.
fn handler(
    shell: &SharedShell,
    f: impl Fn(&SharedShell, &Event) + 'static,
) -> impl FnMut(Event) + 'static {
    let weak: Weak<RefCell<Shell>> = Rc::downgrade(shell);
    move |event: Event| {
        if let Some(shell) = weak.upgrade() {
            f(&shell, &event);
        }
    }
}

/// Event built from a read-only view of the shell, then dispatched.
fn dispatch_with(shell: &SharedShell, dom_event: &Event, f: impl FnOnce(&Shell) -> Option<PageEvent>) {
    let event = match shell.try_borrow() {
        Ok(guard) => f(&guard),
        Err(_) => return,
    };
    if let Some(event) = event {
        dispatch(shell, event, Some(dom_event));
    }
}

fn on_each(
    listeners: &mut Vec<EventListener>,
    targets: &[Element],
    event_name: &'static str,
    mut make: impl FnMut() -> Box<dyn FnMut(Event)>,
) -> Result<(), WebError> {
    for target in targets {
        listeners.push(EventListener::new(target, event_name, make())?);
    }
    Ok(())
}

fn simple(shell: &SharedShell, event: PageEvent) -> Box<dyn FnMut(Event)> {
    Box::new(handler(shell, move |shell, dom_event| {
        dispatch(shell, event.clone(), Some(dom_event));
    }))
}

/// Attach every listener the page's markup supports, start observing reveal
/// items, and sync initial state.
pub fn wire(shell: &SharedShell, document: &Document) -> Result<(), WebError> {
    let mut listeners = Vec::new();
    let (window, elements_snapshot, field_selector) = {
        let guard = shell.borrow();
        (
            guard.window.clone(),
            ElementsView::of(&guard.elements),
            guard.controller.config().selectors.contact_fields.clone(),
        )
    };
    let window_target: &EventTarget = window.as_ref();

    on_each(&mut listeners, &elements_snapshot.nav_icons, "click", || {
        simple(shell, PageEvent::NavToggle)
    })?;

    listeners.push(EventListener::passive(
        window_target,
        "scroll",
        handler(shell, |shell, dom_event| {
            dispatch_with(shell, dom_event, |s| {
                Some(PageEvent::Scroll {
                    scroll_top: s.scroll_y(),
                })
            });
            dispatch_with(shell, dom_event, Shell::scan_event);
        }),
    )?);
    listeners.push(EventListener::passive(
        window_target,
        "resize",
        handler(shell, |shell, dom_event| {
            dispatch_with(shell, dom_event, Shell::scan_event);
        }),
    )?);

    if let Some(button) = &elements_snapshot.scroll_top_button {
        listeners.push(EventListener::new(
            button,
            "click",
            simple(shell, PageEvent::ScrollTopClick),
        )?);
    }

    if let Some(dropdown) = &elements_snapshot.contact_dropdown {
        listeners.push(EventListener::new(
            dropdown,
            "mouseenter",
            simple(shell, PageEvent::DropdownEnter),
        )?);
        listeners.push(EventListener::new(
            dropdown,
            "mouseleave",
            simple(shell, PageEvent::DropdownLeave),
        )?);
    }
    if let Some(toggle) = &elements_snapshot.contact_toggle {
        listeners.push(EventListener::new(
            toggle,
            "click",
            simple(shell, PageEvent::ContactToggle),
        )?);
    }
    if let Some(form) = &elements_snapshot.contact_form {
        listeners.push(EventListener::new(
            form,
            "focusin",
            handler(shell, move |shell, dom_event| {
                if target_matches(dom_event, &field_selector) {
                    dispatch(shell, PageEvent::ContactFieldFocus, Some(dom_event));
                }
            }),
        )?);
        listeners.push(EventListener::new(
            form,
            "submit",
            simple(shell, PageEvent::FormSubmit {
                form: FormKind::Contact,
            }),
        )?);
    }

    if let Some(input) = &elements_snapshot.search_input {
        for event_name in ["keyup", "input"] {
            listeners.push(EventListener::new(
                input,
                event_name,
                handler(shell, |shell, dom_event| {
                    dispatch_with(shell, dom_event, |s| {
                        Some(PageEvent::SearchInput {
                            value: s.elements.search_value(),
                        })
                    });
                }),
            )?);
        }
        on_each(&mut listeners, &elements_snapshot.search_forms, "submit", || {
            Box::new(handler(shell, |shell, dom_event| {
                dispatch_with(shell, dom_event, |s| {
                    Some(PageEvent::SearchSubmit {
                        value: s.elements.search_value(),
                        header_height: s.header_height(),
                    })
                });
            }))
        })?;
        let document_target: &EventTarget = document.as_ref();
        listeners.push(EventListener::new(
            document_target,
            "click",
            handler(shell, |shell, dom_event| {
                dispatch_with(shell, dom_event, |s| {
                    Some(PageEvent::DocumentClick {
                        zone: s.click_zone(dom_event),
                    })
                });
            }),
        )?);
    }

    on_each(&mut listeners, &elements_snapshot.signup_forms, "submit", || {
        simple(shell, PageEvent::FormSubmit {
            form: FormKind::Signup,
        })
    })?;

    if let Some(close) = &elements_snapshot.alert_close {
        listeners.push(EventListener::new(close, "click", simple(shell, PageEvent::AlertClose))?);
    }
    if let Some(overlay) = &elements_snapshot.alert_overlay {
        listeners.push(EventListener::new(
            overlay,
            "click",
            simple(shell, PageEvent::AlertOverlayClick),
        )?);
    }

    let observer = start_observer(shell, &elements_snapshot.reveal_items);
    {
        let mut guard = shell.borrow_mut();
        tracing::debug!(
            listeners = listeners.len(),
            observer = observer.is_some(),
            "page shell wired"
        );
        guard.listeners = listeners;
        guard.observer = observer;
    }

    // Initial sync: the page may load already scrolled.
    let initial_scroll = PageEvent::Scroll {
        scroll_top: shell.borrow().scroll_y(),
    };
    dispatch(shell, initial_scroll, None);
    let scan = shell.borrow().scan_event();
    if let Some(scan) = scan {
        dispatch(shell, scan, None);
    }
    Ok(())
}

fn start_observer(shell: &SharedShell, items: &[Element]) -> Option<RevealObserver> {
    if items.is_empty() {
        return None;
    }
    let weak = Rc::downgrade(shell);
    let observer = RevealObserver::new(move |item, intersecting| {
        if let Some(shell) = weak.upgrade() {
            dispatch(&shell, PageEvent::RevealIntersection { item, intersecting }, None);
        }
    });
    match observer {
        Ok(observer) => {
            for item in items {
                observer.observe(item);
            }
            Some(observer)
        }
        Err(err) => {
            tracing::info!(error = %err, "IntersectionObserver unavailable; scanning on scroll");
            None
        }
    }
}

/// Clones of the listener targets, so wiring does not hold a shell borrow.
struct ElementsView {
    nav_icons: Vec<Element>,
    scroll_top_button: Option<Element>,
    reveal_items: Vec<Element>,
    contact_dropdown: Option<Element>,
    contact_toggle: Option<Element>,
    contact_form: Option<Element>,
    search_input: Option<Element>,
    search_forms: Vec<Element>,
    signup_forms: Vec<Element>,
    alert_close: Option<Element>,
    alert_overlay: Option<Element>,
}

impl ElementsView {
    fn of(elements: &Elements) -> Self {
        Self {
            nav_icons: elements.nav_icons.clone(),
            scroll_top_button: elements.scroll_top_button.clone(),
            reveal_items: elements.reveal_items.clone(),
            contact_dropdown: elements.contact_dropdown.clone(),
            contact_toggle: elements.contact_toggle.clone(),
            contact_form: elements.contact_form.clone(),
            search_input: elements.resolve(Target::SearchInput).into_iter().next(),
            search_forms: elements.search_forms.clone(),
            signup_forms: elements.signup_forms.clone(),
            alert_close: elements.alert_close.clone(),
            alert_overlay: elements.alert_overlay.clone(),
        }
    }
}
