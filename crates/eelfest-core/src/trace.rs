#![forbid(unsafe_code)]

//! Event recording and deterministic replay.
//!
//! A trace is JSON lines, one [`PageEvent`] per line. Replaying a trace
//! against the same configuration and inventory reproduces the exact
//! reactions of the recorded session, DOM events and script API calls alike.
//!
//! # Bounds
//!
//! A `Scroll` or `RevealScan` identical to the previous line is not kept:
//! repeating one never changes state or emits commands. Past
//! `max_events` the recorder keeps the prefix it has and only counts what
//! it drops, so a truncated trace still replays exactly up to its end.

use crate::command::Reaction;
use crate::config::PageConfig;
use crate::controller::{PageController, PageInventory};
use crate::error::TraceError;
use crate::event::PageEvent;

/// Default cap on recorded events.
pub const DEFAULT_MAX_EVENTS: usize = 50_000;

/// Accumulates handled events as JSON lines.
#[derive(Debug, Clone)]
pub struct SessionRecorder {
    lines: Vec<String>,
    max_events: usize,
    dropped: usize,
}

impl Default for SessionRecorder {
    fn default() -> Self {
        Self::with_limit(DEFAULT_MAX_EVENTS)
    }
}

impl SessionRecorder {
    #[must_use]
    pub fn with_limit(max_events: usize) -> Self {
        Self {
            lines: Vec::new(),
            max_events,
            dropped: 0,
        }
    }

    pub fn record(&mut self, event: &PageEvent) {
        let line = match event.to_json_string() {
            Ok(line) => line,
            Err(err) => {
                crate::warn!(event = event.name(), %err, "event not recorded");
                return;
            }
        };
        let repeatable = matches!(
            event,
            PageEvent::Scroll { .. } | PageEvent::RevealScan { .. }
        );
        if repeatable && self.lines.last() == Some(&line) {
            return;
        }
        if self.lines.len() >= self.max_events {
            if self.dropped == 0 {
                crate::warn!(max_events = self.max_events, "trace full; recording stopped");
            }
            self.dropped += 1;
            return;
        }
        self.lines.push(line);
    }

    /// Events seen after the trace filled up.
    #[must_use]
    pub const fn dropped(&self) -> usize {
        self.dropped
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// All recorded events, newline-terminated.
    #[must_use]
    pub fn to_jsonl(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

/// Decode a JSON-lines trace. Blank lines are skipped.
pub fn parse_jsonl(jsonl: &str) -> Result<Vec<PageEvent>, TraceError> {
    jsonl
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            PageEvent::from_json_str(line).map_err(|source| TraceError {
                line: index + 1,
                source,
            })
        })
        .collect()
}

/// Rebuild a controller and re-run every event of `jsonl` through it.
pub fn replay(
    config: PageConfig,
    inventory: PageInventory,
    jsonl: &str,
) -> Result<(PageController, Vec<Reaction>), TraceError> {
    let events = parse_jsonl(jsonl)?;
    let mut controller = PageController::new(config, inventory);
    let reactions = events
        .into_iter()
        .map(|event| controller.handle(event))
        .collect();
    Ok((controller, reactions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::ClickZone;

    #[test]
    fn recorder_writes_one_line_per_event() {
        let mut recorder = SessionRecorder::default();
        recorder.record(&PageEvent::NavToggle);
        recorder.record(&PageEvent::Scroll { scroll_top: 250.0 });
        assert_eq!(recorder.len(), 2);
        assert_eq!(
            recorder.to_jsonl(),
            "{\"kind\":\"nav_toggle\"}\n{\"kind\":\"scroll\",\"scroll_top\":250.0}\n"
        );
    }

    #[test]
    fn repeated_scroll_is_kept_once() {
        let mut recorder = SessionRecorder::default();
        for scroll_top in [250.0, 250.0, 250.0, 300.0, 250.0] {
            recorder.record(&PageEvent::Scroll { scroll_top });
        }
        assert_eq!(recorder.len(), 4);

        // Only scroll-like events collapse.
        recorder.record(&PageEvent::NavToggle);
        recorder.record(&PageEvent::NavToggle);
        assert_eq!(recorder.len(), 6);
    }

    #[test]
    fn limit_keeps_prefix_and_counts_the_rest() {
        let mut recorder = SessionRecorder::with_limit(2);
        recorder.record(&PageEvent::NavToggle);
        recorder.record(&PageEvent::ContactToggle);
        recorder.record(&PageEvent::DropdownLeave);
        recorder.record(&PageEvent::NavToggle);
        assert_eq!(recorder.len(), 2);
        assert_eq!(recorder.dropped(), 2);
        assert_eq!(
            recorder.to_jsonl(),
            "{\"kind\":\"nav_toggle\"}\n{\"kind\":\"contact_toggle\"}\n"
        );
    }

    #[test]
    fn config_limit_reaches_controller() {
        let config = PageConfig::default().with_trace(true).with_trace_limit(1);
        let mut page = PageController::new(config, PageInventory::full(["Neon Wave"], 0));
        page.handle(PageEvent::NavToggle);
        page.handle(PageEvent::NavToggle);
        assert_eq!(page.trace_jsonl().as_deref(), Some("{\"kind\":\"nav_toggle\"}\n"));
        assert_eq!(page.recorder().map(SessionRecorder::dropped), Some(1));
    }

    #[test]
    fn replay_includes_script_api_calls() {
        let inventory = PageInventory::full(["Neon Wave", "Voltage Drift"], 0);
        let config = PageConfig::default().with_trace(true);
        let mut live = PageController::new(config.clone(), inventory.clone());

        let mut live_reactions = Vec::new();
        live_reactions.push(Reaction::with(live.show_alert("Tickets are live!")));
        live_reactions.push(live.handle(PageEvent::AlertClose));
        let (_, filter_cmds) = live.filter_artists("neon").expect("search present");
        live_reactions.push(Reaction::with(filter_cmds));
        live_reactions.push(live.handle(PageEvent::DocumentClick {
            zone: ClickZone::default(),
        }));
        live_reactions.push(Reaction::with(live.close_alert()));

        // Closing an open alert and clearing an active filter both act.
        assert_eq!(live_reactions[1].commands.len(), 2);
        assert!(!live_reactions[3].commands.is_empty());

        let jsonl = live.trace_jsonl().expect("recording enabled");
        let (replayed, reactions) = replay(config, inventory, &jsonl).expect("replay");
        assert_eq!(reactions, live_reactions);
        assert_eq!(replayed.alert().message(), "Tickets are live!");
        assert_eq!(replayed.search().map(|s| s.query()), Some(""));
    }

    #[test]
    fn parse_reports_bad_line_number() {
        let err = parse_jsonl("{\"kind\":\"nav_toggle\"}\n\n{\"kind\":\"bogus\"}\n")
            .expect_err("bogus kind");
        assert_eq!(err.line, 3);
        assert!(err.to_string().starts_with("trace line 3:"));
    }

    #[test]
    fn replay_reproduces_state() {
        let inventory = PageInventory::full(["Neon Wave"], 0);
        let config = PageConfig::default().with_trace(true);
        let mut live = PageController::new(config.clone(), inventory.clone());
        let events = [
            PageEvent::NavToggle,
            PageEvent::SearchInput {
                value: "zzz".into(),
            },
            PageEvent::ContactToggle,
        ];
        let live_reactions: Vec<Reaction> =
            events.iter().cloned().map(|e| live.handle(e)).collect();

        let jsonl = live.trace_jsonl().expect("recording enabled");
        let (replayed, reactions) = replay(config, inventory, &jsonl).expect("replay");
        assert_eq!(reactions, live_reactions);
        assert_eq!(replayed.nav().map(|n| n.is_open()), Some(true));
        assert_eq!(replayed.dropdown().map(|d| d.is_pinned()), Some(true));
    }
}
