//! Lint pass over run documents: id/timestamp shapes, unknown event types,
//! episode numbering gaps, malformed JSON. Findings are advisory except
//! `Error`, which makes `check` exit non-zero.

use std::fmt;

use nuzlog_types::{Event, EventKind, RunMeta, timeline};
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug)]
pub struct Finding {
    pub severity: Severity,
    pub run_id: String,
    pub message: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.run_id, self.message)
    }
}

pub struct Checker {
    run_id_re: Regex,
    timestamp_re: Regex,
}

impl Checker {
    pub fn new() -> Self {
        Self {
            // Lower-case ids keep storage keys and URLs unambiguous.
            run_id_re: Regex::new(r"^[a-z0-9][a-z0-9_-]*$").unwrap(),
            // YYYY-MM-DD with optional HH:MM[:SS].
            timestamp_re: Regex::new(r"^\d{4}-\d{2}-\d{2}([ T]\d{2}:\d{2}(:\d{2})?)?$").unwrap(),
        }
    }

    pub fn check_run_id(&self, run_id: &str) -> Vec<Finding> {
        if self.run_id_re.is_match(run_id) {
            return Vec::new();
        }
        vec![Finding {
            severity: Severity::Error,
            run_id: run_id.to_string(),
            message: "run id must match [a-z0-9][a-z0-9_-]* (used in URLs and storage keys)"
                .to_string(),
        }]
    }

    /// Lint one run's normalized events.
    pub fn check_events(&self, run_id: &str, events: &[Event]) -> Vec<Finding> {
        let mut findings = Vec::new();
        let finding = |severity, message: String| Finding {
            severity,
            run_id: run_id.to_string(),
            message,
        };

        if events.is_empty() {
            findings.push(finding(
                Severity::Warning,
                "no events; the page will show the empty state".to_string(),
            ));
            return findings;
        }

        for (i, ev) in events.iter().enumerate() {
            if let EventKind::Other(kind) = &ev.kind {
                let shown = if kind.is_empty() { "<missing>" } else { kind };
                findings.push(finding(
                    Severity::Warning,
                    format!("event #{i}: unknown type \"{shown}\" renders as a generic card"),
                ));
            }
            if !ev.timestamp.is_empty() && !self.timestamp_re.is_match(&ev.timestamp) {
                findings.push(finding(
                    Severity::Warning,
                    format!(
                        "event #{i}: timestamp \"{}\" is not YYYY-MM-DD[ HH:MM[:SS]]; \
                         ordering falls back to plain string comparison",
                        ev.timestamp
                    ),
                ));
            }
            if ev.episode == 0 {
                findings.push(finding(
                    Severity::Warning,
                    format!("event #{i}: missing episode number, grouped under episode 0"),
                ));
            }
        }

        // Numbering gaps read like missing sessions in the rendered timeline.
        let sections = timeline::group_episodes(events);
        for pair in sections.windows(2) {
            if pair[1].episode > pair[0].episode + 1 {
                findings.push(finding(
                    Severity::Warning,
                    format!(
                        "episode gap: {} jumps to {}",
                        pair[0].episode, pair[1].episode
                    ),
                ));
            }
        }

        let run_end_count = events.iter().filter(|e| e.is_run_end()).count();
        if run_end_count > 1 {
            findings.push(finding(
                Severity::Error,
                format!("{run_end_count} run-end markers; a run ends at most once"),
            ));
        }

        findings
    }

    pub fn check_meta(&self, run_id: &str, meta: &RunMeta, events: &[Event]) -> Vec<Finding> {
        let mut findings = Vec::new();
        if let Some(ended) = &meta.ended {
            let has_end_event = events.iter().any(|e| e.is_run_end());
            if !has_end_event {
                findings.push(Finding {
                    severity: Severity::Warning,
                    run_id: run_id.to_string(),
                    message: "meta says the run ended but events carry no run-end marker"
                        .to_string(),
                });
            }
            if let Some(ep) = ended.episode {
                let known = events.iter().any(|e| e.episode == ep);
                if !known {
                    findings.push(Finding {
                        severity: Severity::Warning,
                        run_id: run_id.to_string(),
                        message: format!("meta.ended.episode {ep} has no events"),
                    });
                }
            }
        }
        findings
    }
}

impl Default for Checker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn events(v: serde_json::Value) -> Vec<Event> {
        Event::from_document(&v)
    }

    fn has_error(findings: &[Finding]) -> bool {
        findings.iter().any(|f| f.severity == Severity::Error)
    }

    // ── run ids ──────────────────────────────────────────────────────

    #[test]
    fn test_run_id_shapes() {
        let c = Checker::new();
        assert!(c.check_run_id("run-01").is_empty());
        assert!(c.check_run_id("kanto_2024").is_empty());
        assert!(has_error(&c.check_run_id("Run 01")));
        assert!(has_error(&c.check_run_id("-leading")));
        assert!(has_error(&c.check_run_id("")));
    }

    // ── events ───────────────────────────────────────────────────────

    #[test]
    fn test_clean_events_have_no_findings() {
        let c = Checker::new();
        let evs = events(json!([
            { "episode": 1, "type": "caught", "timestamp": "2024-01-05 19:00" },
            { "episode": 2, "type": "badge", "timestamp": "2024-01-06", "badge": "Zephyr" }
        ]));
        assert!(c.check_events("run-01", &evs).is_empty());
    }

    #[test]
    fn test_unknown_type_and_bad_timestamp_warn() {
        let c = Checker::new();
        let evs = events(json!([
            { "episode": 1, "type": "trade", "timestamp": "yesterday" }
        ]));
        let findings = c.check_events("run-01", &evs);
        assert_eq!(findings.len(), 2);
        assert!(findings.iter().all(|f| f.severity == Severity::Warning));
    }

    #[test]
    fn test_episode_gap_warns() {
        let c = Checker::new();
        let evs = events(json!([
            { "episode": 1, "type": "caught" },
            { "episode": 4, "type": "caught" }
        ]));
        let findings = c.check_events("run-01", &evs);
        assert!(findings.iter().any(|f| f.message.contains("gap")));
    }

    #[test]
    fn test_multiple_run_ends_error() {
        let c = Checker::new();
        let evs = events(json!([
            { "episode": 1, "type": "end" },
            { "episode": 2, "type": "run_end" }
        ]));
        assert!(has_error(&c.check_events("run-01", &evs)));
    }

    #[test]
    fn test_empty_events_warn() {
        let c = Checker::new();
        let findings = c.check_events("run-01", &[]);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
    }

    // ── meta ─────────────────────────────────────────────────────────

    #[test]
    fn test_meta_ended_without_marker_warns() {
        let c = Checker::new();
        let meta: RunMeta = serde_json::from_value(json!({
            "ended": { "episode": 3, "date": "2024-02-01" }
        }))
        .unwrap();
        let evs = events(json!([ { "episode": 3, "type": "fainted" } ]));
        let findings = c.check_meta("run-01", &meta, &evs);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("run-end marker"));
    }
}
