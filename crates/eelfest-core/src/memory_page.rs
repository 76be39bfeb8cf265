#![forbid(unsafe_code)]

//! In-memory page model for tests.
//!
//! Applies [`Command`]s to a map of element state and jumps every animation
//! straight to its end value, so tests can assert what a visitor would see
//! once transitions settle.

use std::collections::{BTreeMap, BTreeSet};

use crate::command::{Class, Command, Reaction, Target};
use crate::controller::PageInventory;

#[derive(Debug, Default, Clone)]
pub struct MemoryPage {
    classes: BTreeMap<Target, BTreeSet<Class>>,
    visible: BTreeSet<Target>,
    text: BTreeMap<Target, String>,
    fields: BTreeMap<Target, BTreeMap<String, String>>,
    observed: BTreeSet<Target>,
    scroll_top: f64,
    scrolled_to: Option<(Target, f64)>,
    prevented: usize,
}

impl MemoryPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Page state at load time for `inventory`: every reveal item carries the
    /// marker class and is observed; dropdown form, panel and alert are hidden.
    #[must_use]
    pub fn for_inventory(inventory: &PageInventory) -> Self {
        let mut page = Self::new();
        for item in 0..inventory.reveal_items {
            let target = Target::RevealItem(item);
            page.add_class(target, Class::AnimateInit);
            page.observed.insert(target);
        }
        page
    }

    pub fn add_class(&mut self, target: Target, class: Class) {
        self.classes.entry(target).or_default().insert(class);
    }

    /// Type into a field (`name`) of a form or input.
    pub fn set_field(&mut self, target: Target, name: &str, value: &str) {
        self.fields
            .entry(target)
            .or_default()
            .insert(name.to_owned(), value.to_owned());
    }

    pub fn set_scroll_top(&mut self, scroll_top: f64) {
        self.scroll_top = scroll_top;
    }

    pub fn apply(&mut self, reaction: &Reaction) {
        if reaction.prevent_default {
            self.prevented += 1;
        }
        for command in &reaction.commands {
            self.apply_command(command);
        }
    }

    pub fn apply_command(&mut self, command: &Command) {
        match command {
            Command::SetClass { target, class, on } => {
                let set = self.classes.entry(*target).or_default();
                if *on {
                    set.insert(*class);
                } else {
                    set.remove(class);
                }
            }
            Command::Show { target, .. } => {
                self.visible.insert(*target);
            }
            Command::Hide { target, .. } => {
                self.visible.remove(target);
            }
            Command::SetText { target, text } => {
                self.text.insert(*target, text.clone());
            }
            Command::SetValue { target, value } => {
                self.set_field(*target, "value", value);
            }
            Command::ClearValue { target } | Command::ResetForm { target } => {
                if let Some(fields) = self.fields.get_mut(target) {
                    fields.values_mut().for_each(String::clear);
                }
            }
            Command::ScrollTo { top, .. } => {
                self.scroll_top = *top;
            }
            Command::ScrollToElement { target, offset, .. } => {
                self.scrolled_to = Some((*target, *offset));
            }
            Command::Unobserve { target } => {
                self.observed.remove(target);
            }
        }
    }

    #[must_use]
    pub fn has_class(&self, target: Target, class: Class) -> bool {
        self.classes
            .get(&target)
            .is_some_and(|set| set.contains(&class))
    }

    /// Classes currently on `target`.
    #[must_use]
    pub fn classes(&self, target: Target) -> BTreeSet<Class> {
        self.classes.get(&target).cloned().unwrap_or_default()
    }

    #[must_use]
    pub fn is_visible(&self, target: Target) -> bool {
        self.visible.contains(&target)
    }

    #[must_use]
    pub fn text(&self, target: Target) -> Option<&str> {
        self.text.get(&target).map(String::as_str)
    }

    #[must_use]
    pub fn field(&self, target: Target, name: &str) -> Option<&str> {
        self.fields
            .get(&target)
            .and_then(|fields| fields.get(name))
            .map(String::as_str)
    }

    /// Whether every field of `target` is empty.
    #[must_use]
    pub fn fields_empty(&self, target: Target) -> bool {
        self.fields
            .get(&target)
            .is_none_or(|fields| fields.values().all(String::is_empty))
    }

    #[must_use]
    pub fn is_observed(&self, target: Target) -> bool {
        self.observed.contains(&target)
    }

    #[must_use]
    pub const fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    /// Last element scrolled into view and its offset.
    #[must_use]
    pub const fn scrolled_to(&self) -> Option<(Target, f64)> {
        self.scrolled_to
    }

    /// How many reactions suppressed the browser default.
    #[must_use]
    pub const fn prevented_defaults(&self) -> usize {
        self.prevented
    }
}
