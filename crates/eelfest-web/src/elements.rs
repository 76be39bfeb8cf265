#![forbid(unsafe_code)]

//! Cached element references, resolved once at boot.
//!
//! The card and reveal sets are fixed for the page's lifetime, so indices
//! into these vectors are stable identities for [`Target::ArtistCard`] and
//! [`Target::RevealItem`].

use eelfest_core::config::Selectors;
use eelfest_core::{PageInventory, Target};
use web_sys::{Document, Element, HtmlFormElement, HtmlInputElement};
use wasm_bindgen::JsCast;

use crate::dom::{query_all, query_one};
use crate::error::WebError;

/// Attribute stamped on reveal items so observer entries map back to an index.
pub const REVEAL_INDEX_ATTR: &str = "data-eelfest-reveal";

pub struct Elements {
    pub nav_icons: Vec<Element>,
    pub nav_containers: Vec<Element>,
    pub scroll_top_button: Option<Element>,
    pub reveal_items: Vec<Element>,
    pub contact_dropdown: Option<Element>,
    pub contact_toggle: Option<Element>,
    pub contact_form: Option<Element>,
    pub artist_cards: Vec<Element>,
    pub search_input: Option<HtmlInputElement>,
    pub no_results: Option<Element>,
    pub search_forms: Vec<Element>,
    pub header: Option<Element>,
    pub signup_forms: Vec<Element>,
    pub alert_overlay: Option<Element>,
    pub alert_box: Option<Element>,
    pub alert_message: Option<Element>,
    pub alert_close: Option<Element>,
}

impl Elements {
    /// Resolve every hook. The alert must already be injected.
    pub fn collect(document: &Document, selectors: &Selectors) -> Result<Self, WebError> {
        let by_id = |id: &str| document.get_element_by_id(id);
        let search_input = query_one(document, &selectors.search_input)?
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());
        let reveal_items = query_all(document, &selectors.reveal_item)?;
        for (index, item) in reveal_items.iter().enumerate() {
            item.set_attribute(REVEAL_INDEX_ATTR, &index.to_string())?;
        }

        Ok(Self {
            nav_icons: query_all(document, &selectors.nav_icon)?,
            nav_containers: query_all(document, &selectors.nav_container)?,
            scroll_top_button: query_one(document, &selectors.scroll_top_button)?,
            reveal_items,
            contact_dropdown: query_one(document, &selectors.contact_dropdown)?,
            contact_toggle: query_one(document, &selectors.contact_toggle)?,
            contact_form: query_one(document, &selectors.contact_form)?,
            // Cards only matter when the search input exists.
            artist_cards: if search_input.is_some() {
                query_all(document, &selectors.artist_card)?
            } else {
                Vec::new()
            },
            search_input,
            no_results: query_one(document, &selectors.no_results_message)?,
            search_forms: query_all(document, &selectors.search_form)?,
            header: query_one(document, &selectors.header)?,
            signup_forms: query_all(document, &selectors.signup_form)?,
            alert_overlay: by_id(&selectors.alert_overlay_id),
            alert_box: by_id(&selectors.alert_box_id),
            alert_message: by_id(&selectors.alert_message_id),
            alert_close: by_id(&selectors.alert_close_id),
        })
    }

    /// What the controller should expect to exist.
    pub fn inventory(&self, selectors: &Selectors) -> PageInventory {
        PageInventory {
            has_nav: !self.nav_icons.is_empty(),
            has_scroll_top: self.scroll_top_button.is_some(),
            reveal_items: self.reveal_items.len(),
            has_contact_dropdown: self.contact_dropdown.is_some()
                && self.contact_toggle.is_some()
                && self.contact_form.is_some(),
            artist_names: self.search_input.as_ref().map(|_| {
                self.artist_cards
                    .iter()
                    .map(|card| {
                        card.get_attribute(&selectors.artist_name_attribute)
                            .unwrap_or_default()
                    })
                    .collect()
            }),
            has_signup_form: !self.signup_forms.is_empty(),
            has_contact_form: self.contact_form.is_some(),
        }
    }

    /// Elements addressed by `target`.
    pub fn resolve(&self, target: Target) -> Vec<Element> {
        let one = |el: &Option<Element>| el.iter().cloned().collect::<Vec<_>>();
        match target {
            Target::NavIcon => self.nav_icons.clone(),
            Target::NavContainer => self.nav_containers.clone(),
            Target::ScrollTopButton => one(&self.scroll_top_button),
            Target::ContactToggle => one(&self.contact_toggle),
            Target::ContactForm => one(&self.contact_form),
            Target::SearchInput => self
                .search_input
                .iter()
                .map(|input| input.clone().unchecked_into::<Element>())
                .collect(),
            Target::NoResultsMessage => one(&self.no_results),
            Target::SignupForm => self.signup_forms.clone(),
            Target::AlertOverlay => one(&self.alert_overlay),
            Target::AlertBox => one(&self.alert_box),
            Target::AlertMessage => one(&self.alert_message),
            Target::ArtistCard(i) => self.artist_cards.get(i).cloned().into_iter().collect(),
            Target::RevealItem(i) => self.reveal_items.get(i).cloned().into_iter().collect(),
        }
    }

    /// Reveal index stamped on `element` at boot.
    pub fn reveal_index(element: &Element) -> Option<usize> {
        element
            .get_attribute(REVEAL_INDEX_ATTR)
            .and_then(|raw| raw.parse().ok())
    }

    /// Current search input value (empty when absent).
    pub fn search_value(&self) -> String {
        self.search_input
            .as_ref()
            .map(HtmlInputElement::value)
            .unwrap_or_default()
    }

    /// Reset the forms addressed by `target`.
    pub fn reset_forms(&self, target: Target) {
        for element in self.resolve(target) {
            if let Some(form) = element.dyn_ref::<HtmlFormElement>() {
                form.reset();
            }
        }
    }
}
