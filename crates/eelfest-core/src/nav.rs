#![forbid(unsafe_code)]

//! Hamburger navigation toggle.

use crate::command::{Class, Command, Target};

/// Open/closed state of the mobile navigation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Flip the menu and return the presentation for the new state.
    pub fn toggle(&mut self) -> [Command; 2] {
        self.open = !self.open;
        crate::debug!(open = self.open, "nav toggled");
        self.presentation()
    }

    /// Icon and container classes derived from the current state.
    #[must_use]
    pub fn presentation(&self) -> [Command; 2] {
        [
            Command::set_class(Target::NavIcon, Class::Active, self.open),
            Command::set_class(Target::NavContainer, Class::MobileMenuActive, self.open),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_opens_both_icon_and_container() {
        let mut nav = NavMenu::default();
        let cmds = nav.toggle();
        assert!(nav.is_open());
        assert_eq!(
            cmds,
            [
                Command::set_class(Target::NavIcon, Class::Active, true),
                Command::set_class(Target::NavContainer, Class::MobileMenuActive, true),
            ]
        );
    }

    #[test]
    fn double_toggle_is_identity() {
        let mut nav = NavMenu::default();
        let before = nav.presentation();
        nav.toggle();
        let after = nav.toggle();
        assert_eq!(before, after);
        assert!(!nav.is_open());
    }
}
