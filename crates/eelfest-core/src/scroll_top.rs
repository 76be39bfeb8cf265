#![forbid(unsafe_code)]

//! Scroll-to-top control.

use crate::command::{Class, Command, Target};

/// Visibility of the scroll-to-top button.
///
/// The button is shown strictly above the threshold; exactly at the
/// threshold it stays hidden.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTopButton {
    threshold: f64,
    visible: bool,
}

impl ScrollTopButton {
    #[must_use]
    pub const fn new(threshold: f64) -> Self {
        Self {
            threshold,
            visible: false,
        }
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Re-evaluate visibility for a scroll offset.
    ///
    /// Returns a class command only when visibility changes.
    pub fn on_scroll(&mut self, scroll_top: f64) -> Option<Command> {
        let visible = scroll_top > self.threshold;
        if visible == self.visible {
            return None;
        }
        self.visible = visible;
        crate::trace!(scroll_top, visible, "scroll-to-top visibility");
        Some(Command::set_class(Target::ScrollTopButton, Class::Show, visible))
    }

    /// Animate the document back to the top.
    #[must_use]
    pub fn activate(&self, duration_ms: u32) -> Command {
        Command::ScrollTo {
            top: 0.0,
            duration_ms,
        }
    }
}
