#![forbid(unsafe_code)]

//! Tween primitives and a per-channel animator.
//!
//! Replaces the jQuery effects queue. The host advances time explicitly via
//! [`Animator::tick`] (usually from `requestAnimationFrame`) and applies the
//! returned [`Frame`]s; nothing here reads a clock.
//!
//! # Invariants
//!
//! 1. At most one track runs per [`Channel`].
//! 2. Starting a track on a busy channel retargets from the current value
//!    instead of queueing, so rapid hover in/out never replays stale slides.
//! 3. Every track emits exactly one frame with `done == true`, carrying the
//!    exact target value, and is then dropped.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::command::{Command, Target, Transition};

// ---------------------------------------------------------------------------
// Easing functions
// ---------------------------------------------------------------------------

/// Easing function signature: maps `t` in [0, 1] to output in [0, 1].
pub type EasingFn = fn(f64) -> f64;

/// Identity easing (constant velocity).
#[inline]
pub fn linear(t: f64) -> f64 {
    t.clamp(0.0, 1.0)
}

/// jQuery's default `swing` easing: half a cosine period.
#[inline]
pub fn swing(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    0.5 - (t * std::f64::consts::PI).cos() / 2.0
}

/// Quadratic ease-out (slow end).
#[inline]
pub fn ease_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Quadratic ease-in-out (slow start and end).
#[inline]
pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

// ---------------------------------------------------------------------------
// Animation trait
// ---------------------------------------------------------------------------

/// A time-based animation producing progress values in [0.0, 1.0].
pub trait Animation {
    /// Advance the animation by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end.
    fn is_complete(&self) -> bool;

    /// Current eased progress, clamped to [0.0, 1.0].
    fn value(&self) -> f64;

    /// Reset the animation to its initial state.
    fn reset(&mut self);
}

// ---------------------------------------------------------------------------
// Tween
// ---------------------------------------------------------------------------

/// Interpolates an `f64` between `from` and `to` over a duration.
///
/// [`Animation::value`] returns the eased progress; use [`Tween::current`]
/// for the interpolated value.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    from: f64,
    to: f64,
    elapsed: Duration,
    duration: Duration,
    easing: EasingFn,
}

impl Tween {
    /// Create a tween from `from` to `to` over `duration` with `swing` easing.
    pub fn new(from: f64, to: f64, duration: Duration) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            duration: if duration.is_zero() {
                Duration::from_nanos(1)
            } else {
                duration
            },
            easing: swing,
        }
    }

    /// Set the easing function (builder).
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    fn progress(&self) -> f64 {
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Current interpolated value. Exactly `to` once complete.
    pub fn current(&self) -> f64 {
        if self.is_complete() {
            return self.to;
        }
        self.from + (self.to - self.from) * self.value()
    }

    /// The value this tween ends on.
    pub const fn target(&self) -> f64 {
        self.to
    }
}

impl Animation for Tween {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f64 {
        (self.easing)(self.progress())
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}

// ---------------------------------------------------------------------------
// Animator
// ---------------------------------------------------------------------------

/// What an animation track drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Element opacity, 0.0 hidden to 1.0 shown.
    Opacity(Target),
    /// Element height as a fraction of its natural height.
    Reveal(Target),
    /// Document vertical scroll offset in pixels.
    Scroll,
}

impl Channel {
    /// The element this channel drives, if any.
    #[must_use]
    pub const fn target(self) -> Option<Target> {
        match self {
            Self::Opacity(target) | Self::Reveal(target) => Some(target),
            Self::Scroll => None,
        }
    }
}

/// One sampled value for the host to apply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub channel: Channel,
    pub value: f64,
    /// Last frame of the track.
    pub done: bool,
}

/// The track a command asks for, before the host supplies a start value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackPlan {
    pub channel: Channel,
    pub to: f64,
    pub duration: Duration,
}

impl TrackPlan {
    /// Map a command onto an animation track.
    ///
    /// Returns `None` for commands that do not animate, and for
    /// [`Command::ScrollToElement`], whose destination only the host can
    /// measure.
    #[must_use]
    pub fn for_command(command: &Command) -> Option<Self> {
        let ms = |duration_ms: u32| Duration::from_millis(u64::from(duration_ms));
        match *command {
            Command::Show {
                target,
                transition,
                duration_ms,
            } => Some(Self {
                channel: channel_for(target, transition),
                to: 1.0,
                duration: ms(duration_ms),
            }),
            Command::Hide {
                target,
                transition,
                duration_ms,
            } => Some(Self {
                channel: channel_for(target, transition),
                to: 0.0,
                duration: ms(duration_ms),
            }),
            Command::ScrollTo { top, duration_ms } => Some(Self {
                channel: Channel::Scroll,
                to: top.max(0.0),
                duration: ms(duration_ms),
            }),
            _ => None,
        }
    }
}

fn channel_for(target: Target, transition: Transition) -> Channel {
    match transition {
        Transition::Fade => Channel::Opacity(target),
        Transition::Slide => Channel::Reveal(target),
    }
}

/// Runs at most one [`Tween`] per [`Channel`].
#[derive(Debug, Default)]
pub struct Animator {
    tracks: BTreeMap<Channel, Tween>,
}

impl Animator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start animating `channel` towards `to`.
    ///
    /// `from` is the host's measured resting value; it is ignored when the
    /// channel is already mid-flight, in which case the new track starts from
    /// the in-flight value.
    pub fn animate(&mut self, channel: Channel, from: f64, to: f64, duration: Duration) {
        let start = self.current(channel).unwrap_or(from);
        crate::trace!(?channel, start, to, ms = duration.as_millis() as u64, "animate");
        self.tracks.insert(channel, Tween::new(start, to, duration));
    }

    /// Start the track described by `plan`.
    pub fn start(&mut self, plan: TrackPlan, from: f64) {
        self.animate(plan.channel, from, plan.to, plan.duration);
    }

    /// Current in-flight value of `channel`, if it is animating.
    #[must_use]
    pub fn current(&self, channel: Channel) -> Option<f64> {
        self.tracks.get(&channel).map(Tween::current)
    }

    /// Drop the track on `channel` without emitting a final frame.
    pub fn cancel(&mut self, channel: Channel) {
        self.tracks.remove(&channel);
    }

    #[must_use]
    pub fn is_animating(&self, channel: Channel) -> bool {
        self.tracks.contains_key(&channel)
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Advance every track by `dt` and sample it.
    ///
    /// Completed tracks emit a final `done` frame and are removed.
    pub fn tick(&mut self, dt: Duration) -> Vec<Frame> {
        let mut frames = Vec::with_capacity(self.tracks.len());
        for (channel, tween) in &mut self.tracks {
            tween.tick(dt);
            frames.push(Frame {
                channel: *channel,
                value: tween.current(),
                done: tween.is_complete(),
            });
        }
        self.tracks.retain(|_, tween| !tween.is_complete());
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_100: Duration = Duration::from_millis(100);

    #[test]
    fn easing_endpoints() {
        let easings: [EasingFn; 4] = [linear, swing, ease_out, ease_in_out];
        for easing in easings {
            assert!((easing(0.0)).abs() < 1e-9);
            assert!((easing(1.0) - 1.0).abs() < 1e-9);
        }
        assert!((swing(0.5) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn easing_clamps_out_of_range() {
        assert_eq!(linear(-1.0), 0.0);
        assert_eq!(linear(2.0), 1.0);
    }

    #[test]
    fn tween_reaches_target_exactly() {
        let mut tween = Tween::new(0.0, 250.0, MS_100).easing(linear);
        tween.tick(Duration::from_millis(50));
        assert!((tween.current() - 125.0).abs() < 1e-9);
        tween.tick(Duration::from_millis(60));
        assert!(tween.is_complete());
        assert_eq!(tween.current(), 250.0);
    }

    #[test]
    fn zero_duration_completes_on_first_tick() {
        let mut tween = Tween::new(1.0, 0.0, Duration::ZERO);
        assert!(!tween.is_complete());
        tween.tick(Duration::from_nanos(1));
        assert!(tween.is_complete());
    }

    #[test]
    fn tween_reset_restarts() {
        let mut tween = Tween::new(0.0, 1.0, MS_100);
        tween.tick(MS_100);
        tween.reset();
        assert!(!tween.is_complete());
        assert_eq!(tween.current(), 0.0);
    }

    #[test]
    fn animator_emits_final_frame_then_idles() {
        let mut animator = Animator::new();
        let channel = Channel::Opacity(Target::AlertBox);
        animator.animate(channel, 0.0, 1.0, MS_100);

        let frames = animator.tick(Duration::from_millis(40));
        assert_eq!(frames.len(), 1);
        assert!(!frames[0].done);

        let frames = animator.tick(Duration::from_millis(80));
        assert_eq!(
            frames,
            vec![Frame {
                channel,
                value: 1.0,
                done: true
            }]
        );
        assert!(animator.is_idle());
        assert!(animator.tick(MS_100).is_empty());
    }

    #[test]
    fn retarget_starts_from_in_flight_value() {
        let mut animator = Animator::new();
        let channel = Channel::Reveal(Target::ContactForm);
        animator.animate(channel, 0.0, 1.0, MS_100);
        animator.tick(Duration::from_millis(50));
        let mid = animator.current(channel).expect("in flight");
        assert!(mid > 0.0 && mid < 1.0);

        // Host claims the element rests at 1.0; in-flight value wins.
        animator.animate(channel, 1.0, 0.0, MS_100);
        assert_eq!(animator.current(channel), Some(mid));
    }

    #[test]
    fn channels_are_independent() {
        let mut animator = Animator::new();
        animator.animate(Channel::Opacity(Target::AlertBox), 0.0, 1.0, MS_100);
        animator.animate(Channel::Opacity(Target::AlertOverlay), 0.0, 1.0, MS_100);
        animator.animate(Channel::Scroll, 900.0, 0.0, Duration::from_millis(400));
        assert_eq!(animator.tick(MS_100).len(), 3);
        assert!(animator.is_animating(Channel::Scroll));
        assert!(!animator.is_animating(Channel::Opacity(Target::AlertBox)));
        animator.cancel(Channel::Scroll);
        assert!(animator.is_idle());
    }

    #[test]
    fn plans_follow_commands() {
        let show = Command::Show {
            target: Target::ContactForm,
            transition: Transition::Slide,
            duration_ms: 500,
        };
        assert_eq!(
            TrackPlan::for_command(&show),
            Some(TrackPlan {
                channel: Channel::Reveal(Target::ContactForm),
                to: 1.0,
                duration: Duration::from_millis(500),
            })
        );

        let hide = Command::Hide {
            target: Target::AlertOverlay,
            transition: Transition::Fade,
            duration_ms: 300,
        };
        let plan = TrackPlan::for_command(&hide).expect("plan");
        assert_eq!(plan.channel, Channel::Opacity(Target::AlertOverlay));
        assert_eq!(plan.to, 0.0);

        let scroll = Command::ScrollTo {
            top: -5.0,
            duration_ms: 400,
        };
        assert_eq!(TrackPlan::for_command(&scroll).map(|p| p.to), Some(0.0));

        let class = Command::set_class(Target::NavIcon, crate::Class::Active, true);
        assert_eq!(TrackPlan::for_command(&class), None);
    }
}
