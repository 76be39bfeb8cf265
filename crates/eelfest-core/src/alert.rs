#![forbid(unsafe_code)]

//! Singleton confirmation alert (overlay + dialog box).
//!
//! The markup and stylesheet are injected once at startup. A second
//! [`AlertModal::show`] while the alert is open overwrites the message.

use crate::command::{Command, Target, Transition};
use crate::config::Selectors;

/// Fallback for `--bg-light` when the theme does not define it.
pub const BG_FALLBACK: &str = "#0a0a0a";
/// Fallback for `--text-primary`.
pub const TEXT_FALLBACK: &str = "#fff";
/// Fallback for `--gradient-neon`.
pub const GRADIENT_FALLBACK: &str = "linear-gradient(90deg, #ff003c, #00e5ff)";

#[derive(Debug, Clone)]
pub struct AlertModal {
    message: String,
    visible: bool,
    fade_ms: u32,
}

impl AlertModal {
    #[must_use]
    pub fn new(fade_ms: u32) -> Self {
        Self {
            message: String::new(),
            visible: false,
            fade_ms,
        }
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// The message currently displayed (or last displayed).
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Set the message and fade the overlay and box in.
    pub fn show(&mut self, message: &str) -> Vec<Command> {
        if self.visible {
            crate::warn!(
                previous = %self.message,
                next = %message,
                "alert already open; replacing message"
            );
        }
        self.message = message.to_owned();
        self.visible = true;
        vec![
            Command::SetText {
                target: Target::AlertMessage,
                text: self.message.clone(),
            },
            self.fade(Target::AlertOverlay, true),
            self.fade(Target::AlertBox, true),
        ]
    }

    /// Fade the overlay and box out. No-op when already closed.
    pub fn close(&mut self) -> Vec<Command> {
        if !self.visible {
            return Vec::new();
        }
        self.visible = false;
        vec![
            self.fade(Target::AlertOverlay, false),
            self.fade(Target::AlertBox, false),
        ]
    }

    fn fade(&self, target: Target, show: bool) -> Command {
        let transition = Transition::Fade;
        let duration_ms = self.fade_ms;
        if show {
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
        }
    }
}

/// Alert markup appended to `<body>`.
#[must_use]
pub fn markup(selectors: &Selectors) -> String {
    format!(
        concat!(
            r#"<div id="{overlay}"></div>"#,
            r#"<div id="{dialog}" role="alertdialog" aria-modal="true">"#,
            r#"<p id="{message}"></p>"#,
            r#"<button id="{close}" class="btn btn-primary" type="button">OK</button>"#,
            "</div>"
        ),
        overlay = escape_attr(&selectors.alert_overlay_id),
        dialog = escape_attr(&selectors.alert_box_id),
        message = escape_attr(&selectors.alert_message_id),
        close = escape_attr(&selectors.alert_close_id),
    )
}

/// Alert stylesheet appended to `<head>`.
#[must_use]
pub fn stylesheet(selectors: &Selectors) -> String {
    let overlay = css_ident(&selectors.alert_overlay_id);
    let dialog = css_ident(&selectors.alert_box_id);
    let message = css_ident(&selectors.alert_message_id);
    let close = css_ident(&selectors.alert_close_id);
    format!(
        "#{overlay} {{
    display: none;
    position: fixed;
    top: 0; left: 0;
    width: 100%; height: 100%;
    background: rgba(0, 0, 0, 0.7);
    backdrop-filter: blur(5px);
    z-index: 2000;
}}
#{dialog} {{
    display: none;
    position: fixed;
    top: 50%; left: 50%;
    transform: translate(-50%, -50%);
    background: var(--bg-light, {BG_FALLBACK});
    border: 1px solid rgba(255, 255, 255, 0.1);
    border-radius: 10px;
    padding: 30px 40px;
    z-index: 2001;
    text-align: center;
    box-shadow: 0 0 30px rgba(255, 0, 60, 0.5);
}}
#{message} {{
    font-size: 1.2rem;
    color: var(--text-primary, {TEXT_FALLBACK});
    margin-bottom: 25px;
    line-height: 1.6;
}}
#{close} {{
    background-image: var(--gradient-neon, {GRADIENT_FALLBACK});
    padding: 10px 30px;
}}
"
    )
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    out
}

// Ids go into `#id` selectors; anything outside [A-Za-z0-9_-] is escaped.
fn css_ident(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
            out.push(ch);
        } else {
            out.push_str(&format!("\\{:x} ", u32::from(ch)));
        }
    }
    out
}
