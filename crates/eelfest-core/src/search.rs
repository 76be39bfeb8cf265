#![forbid(unsafe_code)]

//! Artist search: case-insensitive substring filter over a fixed card set.
//!
//! The card set is captured once at startup and never grows or shrinks. Each
//! filter pass marks every card as highlighted, unmatched, or neutral (empty
//! query) and toggles the "no results" panel when nothing matches.

use serde::{Deserialize, Serialize};

use crate::command::{Class, Command, Target, Transition};

/// Presentation mark of one card.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardMark {
    /// No active query.
    #[default]
    Neutral,
    Highlight,
    NoMatch,
}

impl CardMark {
    fn classes(self) -> [(Class, bool); 2] {
        match self {
            Self::Neutral => [(Class::Highlight, false), (Class::NoMatch, false)],
            Self::Highlight => [(Class::Highlight, true), (Class::NoMatch, false)],
            Self::NoMatch => [(Class::Highlight, false), (Class::NoMatch, true)],
        }
    }
}

#[derive(Debug, Clone)]
struct ArtistCard {
    /// Lowercased display name.
    key: String,
    mark: CardMark,
}

/// Result of one filter pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Matching cards, or every card when the query is empty.
    pub count: usize,
    pub no_results_visible: bool,
}

/// Where a document click landed, relative to the search exclusion zones.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickZone {
    /// The click target is inside the search form.
    pub in_search_form: bool,
    /// The click target is inside this artist card.
    pub card: Option<usize>,
}

/// ECMAScript `WhiteSpace` and `LineTerminator` code points, the set a
/// browser's `String.prototype.trim` strips.
///
/// Differs from [`char::is_whitespace`]: U+FEFF is included, U+0085 is
/// not.
#[must_use]
pub const fn is_js_whitespace(c: char) -> bool {
    matches!(
        c,
        '\u{0009}'..='\u{000D}'
            | '\u{0020}'
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Trim the way the browser trims input values.
#[must_use]
pub fn trim_js(raw: &str) -> &str {
    raw.trim_matches(is_js_whitespace)
}

/// Normalize a raw query: trim surrounding whitespace, then lowercase.
#[must_use]
pub fn normalize_query(raw: &str) -> String {
    trim_js(raw).to_lowercase()
}

#[derive(Debug, Clone)]
pub struct ArtistSearch {
    cards: Vec<ArtistCard>,
    /// Last raw input value seen.
    query: String,
    no_results_visible: bool,
    slide_ms: u32,
}

impl ArtistSearch {
    /// Capture the card set from the artists' display names, in document order.
    pub fn new<I, S>(names: I, slide_ms: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let cards = names
            .into_iter()
            .map(|name| ArtistCard {
                key: name.as_ref().to_lowercase(),
                mark: CardMark::Neutral,
            })
            .collect();
        Self {
            cards,
            query: String::new(),
            no_results_visible: false,
            slide_ms,
        }
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// The last raw query.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn mark(&self, card: usize) -> Option<CardMark> {
        self.cards.get(card).map(|c| c.mark)
    }

    #[must_use]
    pub fn is_highlighted(&self, card: usize) -> bool {
        self.mark(card) == Some(CardMark::Highlight)
    }

    /// Index of the first highlighted card in document order.
    #[must_use]
    pub fn first_match(&self) -> Option<usize> {
        self.cards
            .iter()
            .position(|card| card.mark == CardMark::Highlight)
    }

    #[must_use]
    pub const fn no_results_visible(&self) -> bool {
        self.no_results_visible
    }

    /// Re-run the filter for `raw_query`.
    ///
    /// Commands cover only cards whose mark changed, plus the "no results"
    /// panel when its visibility flips.
    pub fn filter(&mut self, raw_query: &str) -> (FilterOutcome, Vec<Command>) {
        self.query = raw_query.to_owned();
        let needle = normalize_query(raw_query);
        let mut cmds = Vec::new();

        let mut count = 0;
        for (index, card) in self.cards.iter_mut().enumerate() {
            let mark = if needle.is_empty() {
                CardMark::Neutral
            } else if card.key.contains(&needle) {
                CardMark::Highlight
            } else {
                CardMark::NoMatch
            };
            if mark != CardMark::NoMatch {
                count += 1;
            }
            if mark != card.mark {
                card.mark = mark;
                let target = Target::ArtistCard(index);
                cmds.extend(
                    mark.classes()
                        .into_iter()
                        .map(|(class, on)| Command::set_class(target, class, on)),
                );
            }
        }

        let no_results_visible = count == 0;
        if no_results_visible != self.no_results_visible {
            self.no_results_visible = no_results_visible;
            let target = Target::NoResultsMessage;
            let transition = Transition::Slide;
            let duration_ms = self.slide_ms;
            cmds.push(if no_results_visible {
                Command::Show {
                    target,
                    transition,
                    duration_ms,
                }
            } else {
                Command::Hide {
                    target,
                    transition,
                    duration_ms,
                }
            });
        }

        crate::debug!(query = %needle, count, "artist filter");
        (
            FilterOutcome {
                count,
                no_results_visible,
            },
            cmds,
        )
    }

    /// Handle an explicit submission (Enter).
    ///
    /// Re-filters and, for a non-empty query with at least one match, scrolls
    /// the first match to `scroll_offset` below the viewport top.
    pub fn submit(
        &mut self,
        raw_query: &str,
        scroll_offset: f64,
        duration_ms: u32,
    ) -> (FilterOutcome, Vec<Command>) {
        let (outcome, mut cmds) = self.filter(raw_query);
        if outcome.count > 0
            && !trim_js(raw_query).is_empty()
            && let Some(first) = self.first_match()
        {
            cmds.push(Command::ScrollToElement {
                target: Target::ArtistCard(first),
                offset: scroll_offset,
                duration_ms,
            });
        }
        (outcome, cmds)
    }

    /// Whether a document click should clear the search.
    ///
    /// Clicks inside the search form or on a highlighted card are exclusion
    /// zones; an already-empty query never resets.
    #[must_use]
    pub fn should_reset(&self, click: ClickZone) -> bool {
        if trim_js(&self.query).is_empty() || click.in_search_form {
            return false;
        }
        !click.card.is_some_and(|card| self.is_highlighted(card))
    }

    /// Clear the input and restore the unfiltered card set.
    pub fn reset(&mut self) -> Vec<Command> {
        let mut cmds = vec![Command::ClearValue {
            target: Target::SearchInput,
        }];
        let (_, filter_cmds) = self.filter("");
        cmds.extend(filter_cmds);
        cmds
    }
}

/// Offset above a scrolled-to card: measured header height (or `fallback`
/// when unmeasured or zero) plus `gutter`.
#[must_use]
pub fn scroll_offset(header_height: Option<f64>, fallback: f64, gutter: f64) -> f64 {
    let header = header_height
        .filter(|h| h.is_finite() && *h > 0.0)
        .unwrap_or(fallback);
    header + gutter
}
