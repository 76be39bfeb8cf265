#![forbid(unsafe_code)]

//! Footer contact dropdown: hover to peek, click to pin, focus to keep open.
//!
//! State is three named booleans; every class and visibility change is
//! derived from a before/after comparison of that state.
//!
//! # Invariants
//!
//! 1. `pinned ⇒ open`: a pinned form is always visible.
//! 2. `open ⇒ pinned ∨ hovered`: no transition leaves the form open once
//!    the pointer has left and the pin is released.
//! 3. The toggle's hover indicator mirrors `open`.

use crate::command::{Class, Command, Target, Transition};

/// Snapshot of the dropdown's state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DropdownState {
    /// Pointer is inside the dropdown region.
    pub hovered: bool,
    /// Pinned open by the toggle or by focusing a field.
    pub pinned: bool,
    /// Form is (being animated) visible.
    pub open: bool,
}

impl DropdownState {
    /// Whether both documented invariants hold.
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        (!self.pinned || self.open) && (!self.open || self.pinned || self.hovered)
    }
}

#[derive(Debug, Clone)]
pub struct ContactDropdown {
    state: DropdownState,
    slide_ms: u32,
}

impl ContactDropdown {
    #[must_use]
    pub fn new(slide_ms: u32) -> Self {
        Self {
            state: DropdownState::default(),
            slide_ms,
        }
    }

    #[must_use]
    pub const fn state(&self) -> DropdownState {
        self.state
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.state.open
    }

    #[must_use]
    pub const fn is_pinned(&self) -> bool {
        self.state.pinned
    }

    /// Pointer entered the dropdown region.
    pub fn pointer_enter(&mut self) -> Vec<Command> {
        self.transition(|s| {
            s.hovered = true;
            s.open = true;
        })
    }

    /// Pointer left the dropdown region.
    pub fn pointer_leave(&mut self) -> Vec<Command> {
        self.transition(|s| {
            s.hovered = false;
            if !s.pinned {
                s.open = false;
            }
        })
    }

    /// The toggle control was activated.
    ///
    /// Unpinning closes the form even while the pointer is still inside.
    pub fn toggle(&mut self) -> Vec<Command> {
        self.transition(|s| {
            s.pinned = !s.pinned;
            s.open = s.pinned;
        })
    }

    /// Focus entered a field inside the form.
    pub fn focus_field(&mut self) -> Vec<Command> {
        self.transition(|s| {
            s.pinned = true;
            s.open = true;
        })
    }

    /// Classes and visibility for the current state, without animation.
    #[must_use]
    pub fn presentation(&self) -> [Command; 2] {
        [
            Command::set_class(Target::ContactToggle, Class::Active, self.state.pinned),
            Command::set_class(Target::ContactToggle, Class::HoverActive, self.state.open),
        ]
    }

    fn transition(&mut self, apply: impl FnOnce(&mut DropdownState)) -> Vec<Command> {
        let before = self.state;
        apply(&mut self.state);
        debug_assert!(
            self.state.is_consistent(),
            "dropdown invariant broken: {:?}",
            self.state
        );
        let after = self.state;
        if before != after {
            crate::debug!(?before, ?after, "contact dropdown transition");
        }

        let mut cmds = Vec::new();
        if before.open != after.open {
            let target = Target::ContactForm;
            let transition = Transition::Slide;
            let duration_ms = self.slide_ms;
            cmds.push(if after.open {
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
            cmds.push(Command::set_class(
                Target::ContactToggle,
                Class::HoverActive,
                after.open,
            ));
        }
        if before.pinned != after.pinned {
            cmds.push(Command::set_class(
                Target::ContactToggle,
                Class::Active,
                after.pinned,
            ));
        }
        cmds
    }
}
