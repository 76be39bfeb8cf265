#![forbid(unsafe_code)]

//! Scroll-triggered reveal of elements carrying the marker class.
//!
//! Items start pending. An item is revealed the first time any part of it
//! intersects the viewport, which removes the marker class for good; there is
//! no re-hiding when it scrolls away.
//!
//! Two feeds are supported:
//! - [`RevealTracker::on_intersection`]: per-element notifications from the
//!   host's `IntersectionObserver`. O(1) per notification.
//! - [`RevealTracker::scan`]: a linear pass over measured rectangles for hosts
//!   without an observer. O(pending) per scroll or resize tick.

use std::collections::BTreeSet;

use crate::command::{Class, Command, Target};
use crate::geometry::{Rect, Viewport};

#[derive(Debug, Clone, Default)]
pub struct RevealTracker {
    pending: BTreeSet<usize>,
}

impl RevealTracker {
    /// Track `count` items, all initially unrevealed.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            pending: (0..count).collect(),
        }
    }

    #[must_use]
    pub fn is_pending(&self, item: usize) -> bool {
        self.pending.contains(&item)
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Whether every item has been revealed.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.pending.is_empty()
    }

    /// Handle an intersection notification for one item.
    pub fn on_intersection(&mut self, item: usize, intersecting: bool) -> Vec<Command> {
        if !intersecting {
            return Vec::new();
        }
        self.reveal(item)
    }

    /// Reveal every pending item whose rectangle overlaps the viewport.
    ///
    /// `rects[i]` is the document-space box of item `i`; items without a
    /// measurement are skipped.
    pub fn scan(&mut self, viewport: Viewport, rects: &[Rect]) -> Vec<Command> {
        let visible: Vec<usize> = self
            .pending
            .iter()
            .copied()
            .filter(|&item| {
                rects
                    .get(item)
                    .is_some_and(|rect| rect.overlaps_viewport(&viewport))
            })
            .collect();
        visible
            .into_iter()
            .flat_map(|item| self.reveal(item))
            .collect()
    }

    fn reveal(&mut self, item: usize) -> Vec<Command> {
        if !self.pending.remove(&item) {
            return Vec::new();
        }
        crate::debug!(item, remaining = self.pending.len(), "revealed");
        let target = Target::RevealItem(item);
        vec![
            Command::set_class(target, Class::AnimateInit, false),
            Command::Unobserve { target },
        ]
    }
}
