//! Type filter and free-text search over normalized events.

use crate::event::Event;

/// Case-insensitive substring match across the searchable text fields:
/// species, nickname, notes, kind, place, and badge name.
pub fn matches_search(event: &Event, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }

    let haystacks = [
        event.species(),
        event.nickname(),
        event.notes.as_deref(),
        Some(event.kind.as_str()),
        event.place.as_deref(),
        event.badge.as_deref(),
    ];

    haystacks
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&query))
}

/// Exact-match type filter (canonical kind string) plus substring search.
/// `type_filter` of `None` or `"all"` disables the type filter.
pub fn apply(events: &[Event], type_filter: Option<&str>, query: &str) -> Vec<Event> {
    events
        .iter()
        .filter(|ev| match type_filter {
            None | Some("all") | Some("") => true,
            Some(kind) => ev.kind.as_str() == kind,
        })
        .filter(|ev| matches_search(ev, query))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{RawEvent, RawPokemon};

    fn ev(kind: &str, notes: Option<&str>, species: Option<&str>) -> Event {
        Event::from_raw(RawEvent {
            episode: Some(1),
            kind: Some(kind.to_string()),
            notes: notes.map(String::from),
            pokemon: species.map(|s| RawPokemon {
                species: Some(s.to_string()),
                ..Default::default()
            }),
            ..Default::default()
        })
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let e = ev("caught", None, Some("Gyarados"));
        assert!(matches_search(&e, "gyara"));
        assert!(matches_search(&e, "GYARA"));
        assert!(!matches_search(&e, "magikarp"));
    }

    #[test]
    fn test_search_covers_notes_and_kind() {
        let e = ev("fainted", Some("crit from Whitney's Miltank"), None);
        assert!(matches_search(&e, "miltank"));
        assert!(matches_search(&e, "fainted"));
    }

    #[test]
    fn test_empty_query_matches_everything() {
        assert!(matches_search(&ev("caught", None, None), ""));
        assert!(matches_search(&ev("caught", None, None), "   "));
    }

    #[test]
    fn test_notes_search_isolates_single_event() {
        let events = vec![
            ev("caught", Some("first encounter"), Some("Pidgey")),
            ev("caught", Some("lucky crit"), Some("Geodude")),
            ev("fainted", None, Some("Pidgey")),
        ];
        let hits = apply(&events, None, "lucky");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].species(), Some("Geodude"));
    }

    #[test]
    fn test_type_filter_is_exact() {
        let events = vec![
            ev("caught", None, None),
            ev("fainted", None, None),
            ev("badge", None, None),
        ];
        let hits = apply(&events, Some("fainted"), "");
        assert_eq!(hits.len(), 1);
        assert_eq!(apply(&events, Some("all"), "").len(), 3);
        assert_eq!(apply(&events, None, "").len(), 3);
    }

    #[test]
    fn test_filter_and_search_combine() {
        let events = vec![
            ev("caught", Some("river"), Some("Totodile")),
            ev("fainted", Some("river crossing"), Some("Totodile")),
        ];
        let hits = apply(&events, Some("caught"), "river");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].kind.as_str(), "caught");
    }
}
