#![forbid(unsafe_code)]

//! Front-end-only form submission: confirm, then clear.
//!
//! No request is sent. Submitting either form shows the confirmation alert
//! and resets the form's fields.

use serde::{Deserialize, Serialize};

use crate::alert::AlertModal;
use crate::command::{Command, Target};

/// Forms whose submission is intercepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    Signup,
    Contact,
}

impl FormKind {
    #[must_use]
    pub const fn target(self) -> Target {
        match self {
            Self::Signup => Target::SignupForm,
            Self::Contact => Target::ContactForm,
        }
    }
}

/// Commands for an intercepted submission of `form`.
pub fn intercept(form: FormKind, alert: &mut AlertModal, confirmation: &str) -> Vec<Command> {
    crate::info!(?form, "form submission intercepted");
    let mut cmds = alert.show(confirmation);
    cmds.push(Command::ResetForm {
        target: form.target(),
    });
    cmds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_alerts_then_resets() {
        let mut alert = AlertModal::new(300);
        let cmds = intercept(FormKind::Signup, &mut alert, "Thanks!");
        assert_eq!(
            cmds.first(),
            Some(&Command::SetText {
                target: Target::AlertMessage,
                text: "Thanks!".into()
            })
        );
        assert_eq!(
            cmds.last(),
            Some(&Command::ResetForm {
                target: Target::SignupForm
            })
        );
        assert!(alert.is_visible());
    }

    #[test]
    fn contact_form_resets_contact_target() {
        let mut alert = AlertModal::new(300);
        let cmds = intercept(FormKind::Contact, &mut alert, "ok");
        assert!(cmds.contains(&Command::ResetForm {
            target: Target::ContactForm
        }));
    }
}
