#![forbid(unsafe_code)]

//! The page controller: one owner for every control's state.
//!
//! Constructed once when the page is ready and kept for the page's lifetime.
//! Features whose markup is missing are simply absent; their events are
//! ignored rather than reported.

use serde::{Deserialize, Serialize};

use crate::alert::AlertModal;
use crate::command::{Command, Reaction, Target};
use crate::config::PageConfig;
use crate::dropdown::ContactDropdown;
use crate::event::PageEvent;
use crate::forms::{self, FormKind};
use crate::nav::NavMenu;
use crate::reveal::RevealTracker;
use crate::scroll_top::ScrollTopButton;
use crate::search::{self, ArtistSearch, FilterOutcome};
use crate::trace::SessionRecorder;

/// Which markup hooks exist on the current page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageInventory {
    pub has_nav: bool,
    pub has_scroll_top: bool,
    /// Number of elements carrying the reveal marker class.
    pub reveal_items: usize,
    /// The dropdown region, its toggle and the contact form all exist.
    pub has_contact_dropdown: bool,
    /// Artist names in document order; `None` when there is no search input.
    pub artist_names: Option<Vec<String>>,
    pub has_signup_form: bool,
    pub has_contact_form: bool,
}

impl PageInventory {
    /// A page carrying every hook, with the given artist line-up.
    #[must_use]
    pub fn full<I, S>(artist_names: I, reveal_items: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            has_nav: true,
            has_scroll_top: true,
            reveal_items,
            has_contact_dropdown: true,
            artist_names: Some(artist_names.into_iter().map(Into::into).collect()),
            has_signup_form: true,
            has_contact_form: true,
        }
    }

    fn has_form(&self, form: FormKind) -> bool {
        match form {
            FormKind::Signup => self.has_signup_form,
            FormKind::Contact => self.has_contact_form,
        }
    }
}

#[derive(Debug)]
pub struct PageController {
    config: PageConfig,
    inventory: PageInventory,
    nav: Option<NavMenu>,
    scroll_top: Option<ScrollTopButton>,
    reveal: RevealTracker,
    dropdown: Option<ContactDropdown>,
    search: Option<ArtistSearch>,
    alert: AlertModal,
    recorder: Option<SessionRecorder>,
}

impl PageController {
    /// Build the controller for a page.
    ///
    /// `config` is assumed validated (see [`PageConfig::validate`]).
    #[must_use]
    pub fn new(config: PageConfig, inventory: PageInventory) -> Self {
        let timings = config.timings;
        let nav = inventory.has_nav.then(NavMenu::default);
        let scroll_top = inventory
            .has_scroll_top
            .then(|| ScrollTopButton::new(config.scroll_top_threshold));
        let dropdown = inventory
            .has_contact_dropdown
            .then(|| ContactDropdown::new(timings.dropdown_slide_ms));
        let search = inventory
            .artist_names
            .as_ref()
            .map(|names| ArtistSearch::new(names, timings.no_results_slide_ms));
        let recorder = config
            .record_trace
            .then(|| SessionRecorder::with_limit(config.trace_max_events));

        crate::info!(
            reveal_items = inventory.reveal_items,
            artists = search.as_ref().map_or(0, ArtistSearch::card_count),
            search = search.is_some(),
            dropdown = dropdown.is_some(),
            "page controller ready"
        );

        Self {
            reveal: RevealTracker::new(inventory.reveal_items),
            alert: AlertModal::new(timings.alert_fade_ms),
            config,
            inventory,
            nav,
            scroll_top,
            dropdown,
            search,
            recorder,
        }
    }

    /// Handle one host event.
    pub fn handle(&mut self, event: PageEvent) -> Reaction {
        self.record(&event);
        self.react(event)
    }

    fn record(&mut self, event: &PageEvent) {
        if let Some(recorder) = self.recorder.as_mut() {
            recorder.record(event);
        }
        crate::trace!(event = event.name(), "page event");
    }

    fn react(&mut self, event: PageEvent) -> Reaction {
        let timings = self.config.timings;
        match event {
            PageEvent::NavToggle => match self.nav.as_mut() {
                Some(nav) => Reaction::with(nav.toggle().into()),
                None => Reaction::none(),
            },
            PageEvent::Scroll { scroll_top } => Reaction::with(
                self.scroll_top
                    .as_mut()
                    .and_then(|button| button.on_scroll(scroll_top))
                    .into_iter()
                    .collect(),
            ),
            PageEvent::ScrollTopClick => match self.scroll_top.as_ref() {
                Some(button) => Reaction::with(vec![button.activate(timings.scroll_top_ms)]),
                None => Reaction::none(),
            },
            PageEvent::RevealIntersection { item, intersecting } => {
                Reaction::with(self.reveal.on_intersection(item, intersecting))
            }
            PageEvent::RevealScan { viewport, rects } => {
                Reaction::with(self.reveal.scan(viewport, &rects))
            }
            PageEvent::DropdownEnter => self.with_dropdown(ContactDropdown::pointer_enter),
            PageEvent::DropdownLeave => self.with_dropdown(ContactDropdown::pointer_leave),
            PageEvent::ContactToggle => self.with_dropdown(ContactDropdown::toggle),
            PageEvent::ContactFieldFocus => self.with_dropdown(ContactDropdown::focus_field),
            PageEvent::SearchInput { value } => match self.search.as_mut() {
                Some(search) => Reaction::with(search.filter(&value).1),
                None => Reaction::none(),
            },
            PageEvent::SearchSubmit {
                value,
                header_height,
            } => {
                let offset = search::scroll_offset(
                    header_height,
                    self.config.header_fallback_height,
                    self.config.scroll_gutter,
                );
                match self.search.as_mut() {
                    Some(search) => {
                        let (_, cmds) = search.submit(&value, offset, timings.submit_scroll_ms);
                        Reaction::with(cmds).prevent_default()
                    }
                    None => Reaction::none(),
                }
            }
            PageEvent::DocumentClick { zone } => match self.search.as_mut() {
                Some(search) if search.should_reset(zone) => {
                    crate::debug!("click outside search; clearing query");
                    Reaction::with(search.reset())
                }
                _ => Reaction::none(),
            },
            PageEvent::AlertClose | PageEvent::AlertOverlayClick => {
                Reaction::with(self.alert.close())
            }
            PageEvent::FormSubmit { form } => {
                if !self.inventory.has_form(form) {
                    return Reaction::none();
                }
                Reaction::with(forms::intercept(
                    form,
                    &mut self.alert,
                    &self.config.confirmation_message,
                ))
                .prevent_default()
            }
            PageEvent::ShowAlert { message } => Reaction::with(self.alert.show(&message)),
            PageEvent::CloseAlert => Reaction::with(self.alert.close()),
            PageEvent::FilterArtists { query } => Reaction::with(
                self.scripted_filter(&query)
                    .map(|(_, cmds)| cmds)
                    .unwrap_or_default(),
            ),
        }
    }

    /// Show the alert with an arbitrary message.
    pub fn show_alert(&mut self, message: &str) -> Vec<Command> {
        self.handle(PageEvent::ShowAlert {
            message: message.to_owned(),
        })
        .commands
    }

    /// Close the alert if it is open.
    pub fn close_alert(&mut self) -> Vec<Command> {
        self.handle(PageEvent::CloseAlert).commands
    }

    /// Run the artist filter from script. `None` when the page has no search.
    ///
    /// The search input is set to `query` first so the next keystroke or
    /// outside click starts from what the visitor now sees.
    pub fn filter_artists(&mut self, query: &str) -> Option<(FilterOutcome, Vec<Command>)> {
        self.record(&PageEvent::FilterArtists {
            query: query.to_owned(),
        });
        self.scripted_filter(query)
    }

    fn scripted_filter(&mut self, query: &str) -> Option<(FilterOutcome, Vec<Command>)> {
        let search = self.search.as_mut()?;
        let mut cmds = vec![Command::SetValue {
            target: Target::SearchInput,
            value: query.to_owned(),
        }];
        let (outcome, filter_cmds) = search.filter(query);
        cmds.extend(filter_cmds);
        Some((outcome, cmds))
    }

    fn with_dropdown(&mut self, f: impl FnOnce(&mut ContactDropdown) -> Vec<Command>) -> Reaction {
        match self.dropdown.as_mut() {
            Some(dropdown) => Reaction::with(f(dropdown)),
            None => Reaction::none(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    #[must_use]
    pub fn inventory(&self) -> &PageInventory {
        &self.inventory
    }

    #[must_use]
    pub fn nav(&self) -> Option<&NavMenu> {
        self.nav.as_ref()
    }

    #[must_use]
    pub fn scroll_top(&self) -> Option<&ScrollTopButton> {
        self.scroll_top.as_ref()
    }

    #[must_use]
    pub fn reveal(&self) -> &RevealTracker {
        &self.reveal
    }

    #[must_use]
    pub fn dropdown(&self) -> Option<&ContactDropdown> {
        self.dropdown.as_ref()
    }

    #[must_use]
    pub fn search(&self) -> Option<&ArtistSearch> {
        self.search.as_ref()
    }

    #[must_use]
    pub fn alert(&self) -> &AlertModal {
        &self.alert
    }

    #[must_use]
    pub fn recorder(&self) -> Option<&SessionRecorder> {
        self.recorder.as_ref()
    }

    /// Recorded events as JSON lines, when recording is enabled.
    #[must_use]
    pub fn trace_jsonl(&self) -> Option<String> {
        self.recorder.as_ref().map(SessionRecorder::to_jsonl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{Class, Target};
    use crate::search::ClickZone;

    fn controller() -> PageController {
        PageController::new(
            PageConfig::default(),
            PageInventory::full(["Neon Wave", "Voltage Drift"], 2),
        )
    }

    #[test]
    fn missing_search_ignores_search_events() {
        let inventory = PageInventory {
            artist_names: None,
            ..PageInventory::full(Vec::<String>::new(), 0)
        };
        let mut page = PageController::new(PageConfig::default(), inventory);
        assert!(
            page.handle(PageEvent::SearchInput {
                value: "neon".into()
            })
            .is_empty()
        );
        // Without the search feature the form's default action is untouched.
        let reaction = page.handle(PageEvent::SearchSubmit {
            value: "neon".into(),
            header_height: None,
        });
        assert!(!reaction.prevent_default);
        assert!(page.filter_artists("neon").is_none());
    }

    #[test]
    fn missing_nav_is_noop() {
        let inventory = PageInventory {
            has_nav: false,
            ..PageInventory::full(["A"], 0)
        };
        let mut page = PageController::new(PageConfig::default(), inventory);
        assert!(page.handle(PageEvent::NavToggle).is_empty());
        assert!(page.nav().is_none());
    }

    #[test]
    fn submit_uses_header_height_and_gutter() {
        let mut page = controller();
        let reaction = page.handle(PageEvent::SearchSubmit {
            value: "volt".into(),
            header_height: Some(64.0),
        });
        assert!(reaction.prevent_default);
        assert_eq!(
            reaction.commands.last(),
            Some(&Command::ScrollToElement {
                target: Target::ArtistCard(1),
                offset: 84.0,
                duration_ms: 500,
            })
        );
    }

    #[test]
    fn click_on_highlighted_card_keeps_query() {
        let mut page = controller();
        page.handle(PageEvent::SearchInput {
            value: "neon".into(),
        });
        let reaction = page.handle(PageEvent::DocumentClick {
            zone: ClickZone {
                in_search_form: false,
                card: Some(0),
            },
        });
        assert!(reaction.is_empty());
        assert_eq!(page.search().map(ArtistSearch::query), Some("neon"));
    }

    #[test]
    fn click_elsewhere_clears_query() {
        let mut page = controller();
        page.handle(PageEvent::SearchInput {
            value: "neon".into(),
        });
        let reaction = page.handle(PageEvent::DocumentClick {
            zone: ClickZone::default(),
        });
        assert_eq!(
            reaction.commands.first(),
            Some(&Command::ClearValue {
                target: Target::SearchInput
            })
        );
        assert_eq!(page.search().map(ArtistSearch::query), Some(""));
    }

    #[test]
    fn form_submit_prevents_default_and_confirms() {
        let mut page = controller();
        let reaction = page.handle(PageEvent::FormSubmit {
            form: FormKind::Signup,
        });
        assert!(reaction.prevent_default);
        assert!(page.alert().is_visible());
        assert_eq!(page.alert().message(), "Your request has been submitted!");

        let reaction = page.handle(PageEvent::AlertOverlayClick);
        assert_eq!(reaction.commands.len(), 2);
        assert!(!page.alert().is_visible());
    }

    #[test]
    fn absent_form_is_not_intercepted() {
        let inventory = PageInventory {
            has_signup_form: false,
            ..PageInventory::full(["A"], 0)
        };
        let mut page = PageController::new(PageConfig::default(), inventory);
        let reaction = page.handle(PageEvent::FormSubmit {
            form: FormKind::Signup,
        });
        assert!(!reaction.prevent_default);
        assert!(!page.alert().is_visible());
    }

    #[test]
    fn scroll_threshold_comes_from_config() {
        let config = PageConfig::default().with_scroll_top_threshold(50.0);
        let mut page = PageController::new(config, PageInventory::full(["A"], 0));
        let reaction = page.handle(PageEvent::Scroll { scroll_top: 51.0 });
        assert_eq!(
            reaction.commands,
            vec![Command::set_class(Target::ScrollTopButton, Class::Show, true)]
        );
    }

    #[test]
    fn scripted_filter_sets_the_input_first() {
        let mut page = controller();
        let (outcome, cmds) = page.filter_artists("volt").expect("search present");
        assert_eq!(outcome.count, 1);
        assert_eq!(
            cmds.first(),
            Some(&Command::SetValue {
                target: Target::SearchInput,
                value: "volt".into(),
            })
        );
        assert_eq!(page.search().map(ArtistSearch::query), Some("volt"));

        // Same path through `handle`, as replay drives it.
        let reaction = page.handle(PageEvent::FilterArtists {
            query: "neon".into(),
        });
        assert_eq!(
            reaction.commands.first(),
            Some(&Command::SetValue {
                target: Target::SearchInput,
                value: "neon".into(),
            })
        );
    }

    #[test]
    fn scripted_alert_goes_through_handle() {
        let mut page = PageController::new(
            PageConfig::default().with_trace(true),
            PageInventory::full(["Neon Wave"], 0),
        );
        assert_eq!(page.show_alert("Doors at 7").len(), 3);
        assert_eq!(page.close_alert().len(), 2);
        assert!(page.close_alert().is_empty());
        assert_eq!(page.recorder().map(SessionRecorder::len), Some(3));
    }

    #[test]
    fn trace_disabled_by_default() {
        let mut page = controller();
        page.handle(PageEvent::NavToggle);
        assert_eq!(page.trace_jsonl(), None);
    }
}
