//! Episode grouping and ordering.
//!
//! Events arrive in arbitrary order; the timeline always shows episodes
//! ascending, and events inside an episode ascending by timestamp using a
//! numeric-aware string comparison (so `"ep9" < "ep10"` and plain ISO
//! datetimes compare naturally).

use std::cmp::Ordering;

use crate::event::Event;

/// One collapsible timeline section: an episode number plus its events in
/// display order. `date` is the first event's date, used as the banner label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeSection {
    pub episode: u32,
    pub date: Option<String>,
    pub events: Vec<Event>,
}

impl EpisodeSection {
    /// Count of ordinary events, excluding run-end banner markers.
    pub fn ordinary_len(&self) -> usize {
        self.events.iter().filter(|e| !e.is_run_end()).count()
    }

    pub fn run_end(&self) -> Option<&Event> {
        self.events.iter().find(|e| e.is_run_end())
    }
}

/// Compare two timestamps chunk-wise: digit runs compare as numbers, other
/// runs compare lexicographically. Ties on equal numeric value fall back to
/// the raw string so the sort stays total.
pub fn compare_timestamps(a: &str, b: &str) -> Ordering {
    let mut ca = a.chars().peekable();
    let mut cb = b.chars().peekable();

    loop {
        match (ca.peek().copied(), cb.peek().copied()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                if x.is_ascii_digit() && y.is_ascii_digit() {
                    let na = take_digits(&mut ca);
                    let nb = take_digits(&mut cb);
                    // Strip leading zeros, then compare by length then value.
                    let na = na.trim_start_matches('0');
                    let nb = nb.trim_start_matches('0');
                    let ord = na.len().cmp(&nb.len()).then_with(|| na.cmp(nb));
                    if ord != Ordering::Equal {
                        return ord;
                    }
                } else {
                    if x != y {
                        return x.cmp(&y);
                    }
                    ca.next();
                    cb.next();
                }
            }
        }
    }
}

fn take_digits(it: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut s = String::new();
    while let Some(c) = it.peek().copied() {
        if !c.is_ascii_digit() {
            break;
        }
        s.push(c);
        it.next();
    }
    s
}

/// Stable-sort by `(episode, timestamp)` and group contiguously. Input order
/// is otherwise preserved (ties keep their relative positions).
pub fn group_episodes(events: &[Event]) -> Vec<EpisodeSection> {
    let mut sorted: Vec<&Event> = events.iter().collect();
    sorted.sort_by(|a, b| {
        a.episode
            .cmp(&b.episode)
            .then_with(|| compare_timestamps(&a.timestamp, &b.timestamp))
    });

    let mut sections: Vec<EpisodeSection> = Vec::new();
    for ev in sorted {
        match sections.last_mut() {
            Some(section) if section.episode == ev.episode => {
                if section.date.is_none() {
                    section.date = ev.date.clone();
                }
                section.events.push(ev.clone());
            }
            _ => sections.push(EpisodeSection {
                episode: ev.episode,
                date: ev.date.clone(),
                events: vec![ev.clone()],
            }),
        }
    }
    sections
}

/// Highest episode number present, for the spoiler-safe collapse default.
pub fn last_episode(sections: &[EpisodeSection]) -> Option<u32> {
    sections.iter().map(|s| s.episode).max()
}
