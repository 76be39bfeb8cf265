#![forbid(unsafe_code)]

//! Presentation commands emitted by the controller.
//!
//! A [`Command`] names *what* should change on the page; the host decides
//! *how* (class lists, inline styles, `scrollTo`). Every command is derived
//! from controller state, never read back from the DOM.

use serde::{Deserialize, Serialize};

use crate::config::ClassNames;

/// A markup hook the controller can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    NavIcon,
    NavContainer,
    ScrollTopButton,
    ContactToggle,
    ContactForm,
    SearchInput,
    NoResultsMessage,
    SignupForm,
    AlertOverlay,
    AlertBox,
    AlertMessage,
    /// Artist card by document order.
    ArtistCard(usize),
    /// Element carrying the reveal marker class, by document order.
    RevealItem(usize),
}

/// Presentation classes toggled by the controller.
///
/// Names resolve through [`ClassNames`] so the markup can rename them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Class {
    Active,
    MobileMenuActive,
    Show,
    AnimateInit,
    HoverActive,
    Highlight,
    NoMatch,
}

impl Class {
    /// Resolve the configured CSS class name.
    #[must_use]
    pub fn name<'a>(self, classes: &'a ClassNames) -> &'a str {
        match self {
            Self::Active => &classes.active,
            Self::MobileMenuActive => &classes.mobile_menu_active,
            Self::Show => &classes.show,
            Self::AnimateInit => &classes.animate_init,
            Self::HoverActive => &classes.hover_active,
            Self::Highlight => &classes.highlight,
            Self::NoMatch => &classes.no_match,
        }
    }
}

/// Visual transition used to show or hide an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    /// Height grows from zero (jQuery `slideDown` / `slideUp`).
    Slide,
    /// Opacity ramps (jQuery `fadeIn` / `fadeOut`).
    Fade,
}

/// One presentation change for the host to apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    SetClass {
        target: Target,
        class: Class,
        on: bool,
    },
    Show {
        target: Target,
        transition: Transition,
        duration_ms: u32,
    },
    Hide {
        target: Target,
        transition: Transition,
        duration_ms: u32,
    },
    SetText {
        target: Target,
        text: String,
    },
    /// Overwrite the value of a text input.
    SetValue { target: Target, value: String },
    /// Clear the value of a text input.
    ClearValue { target: Target },
    /// Reset every field of a form to its initial value.
    ResetForm { target: Target },
    /// Animate the document's vertical scroll offset.
    ScrollTo { top: f64, duration_ms: u32 },
    /// Scroll so that `target` sits `offset` units below the viewport top.
    ScrollToElement {
        target: Target,
        offset: f64,
        duration_ms: u32,
    },
    /// Stop watching an element for viewport intersection.
    Unobserve { target: Target },
}

impl Command {
    #[must_use]
    pub const fn set_class(target: Target, class: Class, on: bool) -> Self {
        Self::SetClass { target, class, on }
    }

    /// The element this command mutates, if any.
    #[must_use]
    pub const fn target(&self) -> Option<Target> {
        match self {
            Self::SetClass { target, .. }
            | Self::Show { target, .. }
            | Self::Hide { target, .. }
            | Self::SetText { target, .. }
            | Self::SetValue { target, .. }
            | Self::ClearValue { target }
            | Self::ResetForm { target }
            | Self::ScrollToElement { target, .. }
            | Self::Unobserve { target } => Some(*target),
            Self::ScrollTo { .. } => None,
        }
    }
}

/// The controller's answer to one event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    pub commands: Vec<Command>,
    /// Suppress the browser's default action (form navigation).
    pub prevent_default: bool,
}

impl Reaction {
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(commands: Vec<Command>) -> Self {
        Self {
            commands,
            prevent_default: false,
        }
    }

    #[must_use]
    pub fn prevent_default(mut self) -> Self {
        self.prevent_default = true;
        self
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn extend(&mut self, commands: impl IntoIterator<Item = Command>) {
        self.commands.extend(commands);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && !self.prevent_default
    }
}
