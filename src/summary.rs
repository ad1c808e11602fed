//! Per-run stdout inventory: episode span, event counts by kind, ended
//! status. Counting is pure so the report shape is testable; printing is a
//! thin pass over the counts.

use std::collections::BTreeMap;

use nuzlog_types::{Event, RunMeta, timeline};

#[derive(Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub run_id: String,
    pub episodes: usize,
    pub first_episode: Option<u32>,
    pub last_episode: Option<u32>,
    /// Ordinary event count per canonical kind (run-end markers excluded).
    pub kind_counts: BTreeMap<String, usize>,
    pub ended: Option<String>,
}

pub fn summarize(run_id: &str, events: &[Event], meta: Option<&RunMeta>) -> RunSummary {
    let sections = timeline::group_episodes(events);

    let mut kind_counts: BTreeMap<String, usize> = BTreeMap::new();
    for ev in events.iter().filter(|e| !e.is_run_end()) {
        *kind_counts.entry(ev.kind.as_str().to_string()).or_default() += 1;
    }

    let ended = meta.and_then(|m| m.ended.as_ref()).map(|e| {
        let mut parts = Vec::new();
        if let Some(ep) = e.episode {
            parts.push(format!("episode {ep}"));
        }
        if let Some(date) = &e.date {
            parts.push(date.clone());
        }
        if parts.is_empty() {
            "ended".to_string()
        } else {
            parts.join(", ")
        }
    });

    RunSummary {
        run_id: run_id.to_string(),
        episodes: sections.len(),
        first_episode: sections.first().map(|s| s.episode),
        last_episode: sections.last().map(|s| s.episode),
        kind_counts,
        ended,
    }
}

/// Format one summary line block, `run_timeline`-style.
pub fn render(summary: &RunSummary) -> String {
    let mut out = String::new();

    let span = match (summary.first_episode, summary.last_episode) {
        (Some(a), Some(b)) if a != b => format!("episodes {a}\u{2013}{b}"),
        (Some(a), _) => format!("episode {a}"),
        _ => "no episodes".to_string(),
    };
    out.push_str(&format!(
        "{}: {} ({} sections)\n",
        summary.run_id, span, summary.episodes
    ));

    for (kind, count) in &summary.kind_counts {
        out.push_str(&format!("  {kind}: {count}\n"));
    }
    if let Some(ended) = &summary.ended {
        out.push_str(&format!("  ended: {ended}\n"));
    }
    out
}
