//! End-to-end page flows against the in-memory page.
//!
//! Each test drives a [`PageController`] with host events, applies the
//! reactions to a [`MemoryPage`], and checks what a visitor would see.

use eelfest_core::forms::FormKind;
use eelfest_core::geometry::{Rect, Viewport};
use eelfest_core::memory_page::MemoryPage;
use eelfest_core::search::ClickZone;
use eelfest_core::{Class, PageConfig, PageController, PageEvent, PageInventory, Target};
use pretty_assertions::assert_eq;

const LINEUP: [&str; 4] = ["Neon Wave", "Voltage Drift", "Eel Collective", "Static Bloom"];

struct Harness {
    controller: PageController,
    page: MemoryPage,
}

impl Harness {
    fn new() -> Self {
        Self::with_inventory(PageInventory::full(LINEUP, 3))
    }

    fn with_inventory(inventory: PageInventory) -> Self {
        let page = MemoryPage::for_inventory(&inventory);
        Self {
            controller: PageController::new(PageConfig::default(), inventory),
            page,
        }
    }

    fn send(&mut self, event: PageEvent) -> bool {
        let reaction = self.controller.handle(event);
        self.page.apply(&reaction);
        reaction.prevent_default
    }

    fn type_query(&mut self, value: &str) {
        self.page.set_field(Target::SearchInput, "value", value);
        self.send(PageEvent::SearchInput {
            value: value.to_owned(),
        });
    }

    fn highlighted(&self) -> Vec<usize> {
        (0..LINEUP.len())
            .filter(|&i| self.page.has_class(Target::ArtistCard(i), Class::Highlight))
            .collect()
    }

    fn unmatched(&self) -> Vec<usize> {
        (0..LINEUP.len())
            .filter(|&i| self.page.has_class(Target::ArtistCard(i), Class::NoMatch))
            .collect()
    }
}

#[test]
fn nav_toggle_twice_restores_classes() {
    let mut h = Harness::new();
    let icon = h.page.classes(Target::NavIcon);
    let container = h.page.classes(Target::NavContainer);

    h.send(PageEvent::NavToggle);
    assert!(h.page.has_class(Target::NavIcon, Class::Active));
    assert!(h.page.has_class(Target::NavContainer, Class::MobileMenuActive));

    h.send(PageEvent::NavToggle);
    assert_eq!(h.page.classes(Target::NavIcon), icon);
    assert_eq!(h.page.classes(Target::NavContainer), container);
}

#[test]
fn scroll_button_boundary() {
    let mut h = Harness::new();
    h.send(PageEvent::Scroll { scroll_top: 200.0 });
    assert!(!h.page.has_class(Target::ScrollTopButton, Class::Show));
    h.send(PageEvent::Scroll { scroll_top: 201.0 });
    assert!(h.page.has_class(Target::ScrollTopButton, Class::Show));
    h.send(PageEvent::Scroll { scroll_top: 12.0 });
    assert!(!h.page.has_class(Target::ScrollTopButton, Class::Show));
}

#[test]
fn scroll_button_returns_to_top() {
    let mut h = Harness::new();
    h.page.set_scroll_top(1800.0);
    h.send(PageEvent::Scroll { scroll_top: 1800.0 });
    h.send(PageEvent::ScrollTopClick);
    assert_eq!(h.page.scroll_top(), 0.0);
}

#[test]
fn reveal_via_observer_is_permanent() {
    let mut h = Harness::new();
    h.send(PageEvent::RevealIntersection {
        item: 2,
        intersecting: true,
    });
    assert!(!h.page.has_class(Target::RevealItem(2), Class::AnimateInit));
    assert!(!h.page.is_observed(Target::RevealItem(2)));
    assert!(h.page.has_class(Target::RevealItem(0), Class::AnimateInit));

    h.send(PageEvent::RevealIntersection {
        item: 2,
        intersecting: false,
    });
    assert!(!h.page.has_class(Target::RevealItem(2), Class::AnimateInit));
}

#[test]
fn reveal_via_scan_fallback() {
    let mut h = Harness::new();
    let rects = vec![
        Rect::new(0.0, 100.0, 300.0, 200.0),
        Rect::new(0.0, 900.0, 300.0, 200.0),
        Rect::new(0.0, 2400.0, 300.0, 200.0),
    ];
    h.send(PageEvent::RevealScan {
        viewport: Viewport::new(0.0, 900.0),
        rects: rects.clone(),
    });
    assert!(!h.page.has_class(Target::RevealItem(0), Class::AnimateInit));
    assert!(!h.page.has_class(Target::RevealItem(1), Class::AnimateInit));
    assert!(h.page.has_class(Target::RevealItem(2), Class::AnimateInit));

    h.send(PageEvent::RevealScan {
        viewport: Viewport::new(0.0, 900.0),
        rects,
    });
    assert_eq!(h.controller.reveal().pending_count(), 1);
}

#[test]
fn empty_query_restores_every_card() {
    let mut h = Harness::new();
    h.type_query("eel");
    assert_eq!(h.highlighted(), vec![2]);
    h.type_query("");
    assert_eq!(h.highlighted(), Vec::<usize>::new());
    assert_eq!(h.unmatched(), Vec::<usize>::new());
    let (outcome, _) = h.controller.filter_artists("").expect("search present");
    assert_eq!(outcome.count, LINEUP.len());
}

#[test]
fn no_results_panel_tracks_match_count() {
    let mut h = Harness::new();
    h.type_query("polka");
    assert!(h.page.is_visible(Target::NoResultsMessage));
    assert_eq!(h.unmatched(), vec![0, 1, 2, 3]);

    h.type_query("STATIC");
    assert!(!h.page.is_visible(Target::NoResultsMessage));
    assert_eq!(h.highlighted(), vec![3]);
}

#[test]
fn filter_is_case_insensitive_substring() {
    let mut h = Harness::new();
    for query in ["neon", "WAVE", "on wa"] {
        h.type_query(query);
        assert_eq!(h.highlighted(), vec![0], "query {query:?}");
    }
}

#[test]
fn submit_scrolls_first_match_below_header() {
    let mut h = Harness::new();
    h.page.set_field(Target::SearchInput, "value", "t");
    let prevented = h.send(PageEvent::SearchSubmit {
        value: "t".into(),
        header_height: None,
    });
    assert!(prevented);
    // "Voltage Drift" is the first card containing "t".
    assert_eq!(h.page.scrolled_to(), Some((Target::ArtistCard(1), 120.0)));
}

#[test]
fn submit_empty_query_does_not_scroll() {
    let mut h = Harness::new();
    assert!(h.send(PageEvent::SearchSubmit {
        value: "   ".into(),
        header_height: Some(90.0),
    }));
    assert_eq!(h.page.scrolled_to(), None);
}

#[test]
fn click_on_highlighted_card_keeps_query() {
    let mut h = Harness::new();
    h.type_query("drift");
    h.send(PageEvent::DocumentClick {
        zone: ClickZone {
            in_search_form: false,
            card: Some(1),
        },
    });
    assert_eq!(h.page.field(Target::SearchInput, "value"), Some("drift"));
    assert_eq!(h.highlighted(), vec![1]);
}

#[test]
fn click_inside_search_form_keeps_query() {
    let mut h = Harness::new();
    h.type_query("drift");
    h.send(PageEvent::DocumentClick {
        zone: ClickZone {
            in_search_form: true,
            card: None,
        },
    });
    assert_eq!(h.page.field(Target::SearchInput, "value"), Some("drift"));
}

#[test]
fn click_outside_resets_search() {
    let mut h = Harness::new();
    h.type_query("polka");
    h.send(PageEvent::DocumentClick {
        zone: ClickZone {
            in_search_form: false,
            card: Some(0),
        },
    });
    assert_eq!(h.page.field(Target::SearchInput, "value"), Some(""));
    assert!(!h.page.is_visible(Target::NoResultsMessage));
    assert_eq!(h.unmatched(), Vec::<usize>::new());
}

#[test]
fn scripted_filter_keeps_input_in_sync() {
    let mut h = Harness::new();
    let (outcome, cmds) = h.controller.filter_artists("bloom").expect("search present");
    h.page.apply(&eelfest_core::Reaction::with(cmds));
    assert_eq!(outcome.count, 1);
    assert_eq!(h.page.field(Target::SearchInput, "value"), Some("bloom"));
    assert_eq!(h.highlighted(), vec![3]);

    // An outside click clears what the visitor can see, not a hidden query.
    h.send(PageEvent::DocumentClick {
        zone: ClickZone::default(),
    });
    assert_eq!(h.page.field(Target::SearchInput, "value"), Some(""));
    assert_eq!(h.highlighted(), Vec::<usize>::new());
}

#[test]
fn dropdown_pin_unpin_closes_regardless_of_hover() {
    let mut h = Harness::new();
    h.send(PageEvent::ContactToggle);
    assert!(h.page.is_visible(Target::ContactForm));
    h.send(PageEvent::DropdownEnter);
    h.send(PageEvent::DropdownLeave);
    h.send(PageEvent::DropdownEnter);
    h.send(PageEvent::ContactToggle);
    assert!(!h.page.is_visible(Target::ContactForm));
    assert!(!h.page.has_class(Target::ContactToggle, Class::HoverActive));
    assert!(!h.page.has_class(Target::ContactToggle, Class::Active));
}

#[test]
fn focusing_a_field_keeps_form_open() {
    let mut h = Harness::new();
    h.send(PageEvent::DropdownEnter);
    h.send(PageEvent::ContactFieldFocus);
    h.send(PageEvent::DropdownLeave);
    assert!(h.page.is_visible(Target::ContactForm));
    assert!(h.page.has_class(Target::ContactToggle, Class::Active));
    assert!(h.page.has_class(Target::ContactToggle, Class::HoverActive));
}

#[test]
fn signup_submission_confirms_and_clears() {
    let mut h = Harness::new();
    h.page.set_field(Target::SignupForm, "name", "Ada");
    h.page.set_field(Target::SignupForm, "email", "ada@example.org");
    h.page.set_field(Target::SignupForm, "tickets", "4");

    let prevented = h.send(PageEvent::FormSubmit {
        form: FormKind::Signup,
    });

    assert!(prevented);
    assert_eq!(
        h.page.text(Target::AlertMessage),
        Some("Your request has been submitted!")
    );
    assert!(h.page.is_visible(Target::AlertOverlay));
    assert!(h.page.is_visible(Target::AlertBox));
    assert!(h.page.fields_empty(Target::SignupForm));
}

#[test]
fn contact_submission_confirms_and_clears() {
    let mut h = Harness::new();
    h.page.set_field(Target::ContactForm, "message", "See you at the lake stage");
    h.send(PageEvent::FormSubmit {
        form: FormKind::Contact,
    });
    assert!(h.page.fields_empty(Target::ContactForm));
    assert_eq!(
        h.page.text(Target::AlertMessage),
        Some("Your request has been submitted!")
    );
}

#[test]
fn alert_dismissed_by_close_or_overlay() {
    let mut h = Harness::new();
    h.send(PageEvent::FormSubmit {
        form: FormKind::Signup,
    });
    h.send(PageEvent::AlertClose);
    assert!(!h.page.is_visible(Target::AlertBox));
    assert!(!h.page.is_visible(Target::AlertOverlay));

    h.send(PageEvent::FormSubmit {
        form: FormKind::Contact,
    });
    h.send(PageEvent::AlertOverlayClick);
    assert!(!h.page.is_visible(Target::AlertBox));
}

#[test]
fn page_without_search_still_intercepts_forms() {
    let inventory = PageInventory {
        artist_names: None,
        ..PageInventory::full(LINEUP, 0)
    };
    let mut h = Harness::with_inventory(inventory);
    h.send(PageEvent::DocumentClick {
        zone: ClickZone::default(),
    });
    assert!(h.send(PageEvent::FormSubmit {
        form: FormKind::Signup,
    }));
    assert_eq!(h.page.prevented_defaults(), 1);
}
