#![forbid(unsafe_code)]

//! Drives the core [`Animator`] from `requestAnimationFrame` timestamps and
//! applies its frames to inline styles and the window scroll offset.
//!
//! Show/hide follow jQuery's visible semantics: showing an element that is
//! already displayed (and not mid-animation) does nothing, likewise hiding a
//! hidden one.

use std::time::Duration;

use eelfest_core::animation::{Frame, TrackPlan};
use eelfest_core::{Animator, Channel, Command};
use web_sys::{Element, Window};

use crate::dom::{clear_style, is_displayed, set_style};
use crate::elements::Elements;
use crate::plan::{element_scroll_top, needs_display, toggle_start};

#[derive(Default)]
pub struct Effects {
    animator: Animator,
    last_frame: Option<f64>,
}

impl Effects {
    pub fn is_idle(&self) -> bool {
        self.animator.is_idle()
    }

    /// Start whatever animation `command` implies. Non-animating commands are
    /// ignored.
    pub fn begin(&mut self, command: &Command, elements: &Elements, window: &Window) {
        match *command {
            Command::Show { target, .. } | Command::Hide { target, .. } => {
                let Some(plan) = TrackPlan::for_command(command) else {
                    return;
                };
                let els = elements.resolve(target);
                if els.is_empty() {
                    return;
                }
                let showing = plan.to > 0.5;
                let in_flight = self.animator.is_animating(plan.channel);
                let displayed = els.iter().all(is_displayed);
                let Some(from) = toggle_start(in_flight, displayed, showing) else {
                    return;
                };
                for el in &els {
                    prepare(el, plan.channel, showing);
                }
                self.animator.start(plan, from);
            }
            Command::ScrollTo { .. } => {
                if let Some(plan) = TrackPlan::for_command(command) {
                    self.animator.start(plan, scroll_y(window));
                }
            }
            Command::ScrollToElement {
                target,
                offset,
                duration_ms,
            } => {
                let Some(el) = elements.resolve(target).into_iter().next() else {
                    return;
                };
                let current = scroll_y(window);
                let top = element_scroll_top(el.get_bounding_client_rect().top(), current, offset);
                self.animator.animate(
                    Channel::Scroll,
                    current,
                    top,
                    Duration::from_millis(u64::from(duration_ms)),
                );
            }
            _ => {}
        }
    }

    /// Advance to `timestamp` (ms, from `requestAnimationFrame`) and apply
    /// frames. Returns whether another frame is needed.
    pub fn step(&mut self, timestamp: f64, elements: &Elements, window: &Window) -> bool {
        let dt_ms = self
            .last_frame
            .map_or(0.0, |last| (timestamp - last).max(0.0));
        self.last_frame = Some(timestamp);

        for frame in self.animator.tick(Duration::from_secs_f64(dt_ms / 1000.0)) {
            apply_frame(&frame, elements, window);
        }

        if self.animator.is_idle() {
            self.last_frame = None;
            return false;
        }
        true
    }
}

fn scroll_y(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

fn prepare(el: &Element, channel: Channel, showing: bool) {
    if needs_display(showing, is_displayed(el)) {
        if let Channel::Opacity(_) = channel {
            set_style(el, "opacity", "0");
        } else {
            set_style(el, "height", "0px");
        }
        set_style(el, "display", "block");
    }
    if let Channel::Reveal(_) = channel {
        set_style(el, "overflow", "hidden");
    }
}

fn apply_frame(frame: &Frame, elements: &Elements, window: &Window) {
    match frame.channel {
        Channel::Opacity(target) => {
            for el in elements.resolve(target) {
                set_style(&el, "opacity", &format!("{:.3}", frame.value));
                if frame.done {
                    clear_style(&el, "opacity");
                    settle_display(&el, frame.value);
                }
            }
        }
        Channel::Reveal(target) => {
            for el in elements.resolve(target) {
                let natural = f64::from(el.scroll_height());
                set_style(&el, "height", &format!("{:.1}px", natural * frame.value));
                if frame.done {
                    clear_style(&el, "height");
                    clear_style(&el, "overflow");
                    settle_display(&el, frame.value);
                }
            }
        }
        Channel::Scroll => {
            window.scroll_to_with_x_and_y(window.scroll_x().unwrap_or(0.0), frame.value);
        }
    }
}

fn settle_display(el: &Element, value: f64) {
    if value <= 0.0 {
        set_style(el, "display", "none");
    }
}
