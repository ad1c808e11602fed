//! Declarative event-card description.
//!
//! [`EventCard::from_event`] is a pure projection from a normalized event to
//! what should appear on screen: header text, optional ribbon, sprite
//! references with placeholder labels, and the text lines. The frontend (or
//! any other adapter) renders the description without re-deriving any of
//! these rules.

use crate::assets;
use crate::event::{Event, EventKind, Side};

/// An image slot: a derived URL when the name produced a valid slug, and
/// the short label the placeholder shows when there is no URL or the image
/// fails to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    pub url: Option<String>,
    pub placeholder: String,
}

impl Sprite {
    fn species(name: &str) -> Self {
        Sprite {
            url: assets::sprite_url(name),
            placeholder: assets::placeholder_label(name),
        }
    }

    fn badge(name: &str) -> Self {
        Sprite {
            url: assets::badge_url(name),
            placeholder: assets::placeholder_label(name),
        }
    }
}

/// The location line under the header, e.g. `Died at: Route 32`, optionally
/// hyperlinked to a video timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceLine {
    pub label: &'static str,
    pub text: String,
    pub video_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventCard {
    pub header: String,
    /// Ribbon annotation; special > failed > illegal.
    pub ribbon: Option<String>,
    /// Zero, one, or (for evolutions) two sprites joined by an arrow.
    pub sprites: Vec<Sprite>,
    /// Species + nickname line, omitted when there is no pokemon.
    pub name_line: Option<String>,
    pub place_line: Option<PlaceLine>,
    pub notes: Option<String>,
    pub side: Side,
    /// Lower-case kind string for CSS class derivation.
    pub css_kind: String,
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn header_for(event: &Event) -> String {
    let level = event.pokemon.as_ref().and_then(|p| p.level);
    match &event.kind {
        EventKind::Caught if event.flags.failed => match level {
            Some(n) => format!("Failed to catch (Level {n})"),
            None => "Failed to catch".to_string(),
        },
        EventKind::Caught => match level {
            Some(n) => format!("Caught at Level {n}"),
            None => "Caught".to_string(),
        },
        EventKind::Fainted => "Fainted".to_string(),
        EventKind::Evolved => {
            let (from, to) = evolution_pair(event);
            match event.nickname() {
                Some(nick) => format!("{nick} evolved: {from} \u{2192} {to}"),
                None => format!("{from} \u{2192} {to}"),
            }
        }
        EventKind::Badge => "Badge earned".to_string(),
        EventKind::RunEnd => "Run ended".to_string(),
        EventKind::Other(kind) if kind.is_empty() => "Event".to_string(),
        EventKind::Other(kind) => capitalize(kind),
    }
}

fn evolution_pair(event: &Event) -> (String, String) {
    let p = event.pokemon.as_ref();
    let from = p
        .and_then(|p| p.evolved_from.clone())
        .or_else(|| event.species().map(String::from))
        .unwrap_or_else(|| "?".to_string());
    let to = p
        .and_then(|p| p.evolved_to.clone())
        .unwrap_or_else(|| "?".to_string());
    (from, to)
}

fn ribbon_for(event: &Event) -> Option<String> {
    if let Some(label) = &event.flags.special {
        // A special flag without its own label names the mon it honours.
        let text = match label {
            Some(explicit) => explicit.clone(),
            None => match event.nickname() {
                Some(nick) => format!("Named after {nick}"),
                None => "Special".to_string(),
            },
        };
        return Some(text);
    }
    if event.flags.failed {
        return Some("Failed".to_string());
    }
    if event.flags.illegal {
        return Some("Illegal".to_string());
    }
    None
}

fn gender_mark(gender: &str) -> &str {
    match gender.trim().to_ascii_lowercase().as_str() {
        "f" | "female" => "\u{2640}",
        "m" | "male" => "\u{2642}",
        _ => gender,
    }
}

fn name_line_for(event: &Event) -> Option<String> {
    let species = event.species();
    let nickname = event.nickname();
    let gender = event
        .pokemon
        .as_ref()
        .and_then(|p| p.gender.as_deref())
        .map(gender_mark);
    match (species, nickname, gender) {
        (Some(s), Some(n), Some(g)) => Some(format!("{n} ({s}, {g})")),
        (Some(s), Some(n), None) => Some(format!("{n} ({s})")),
        (Some(s), None, Some(g)) => Some(format!("{s} ({g})")),
        (Some(s), None, None) => Some(s.to_string()),
        (None, Some(n), Some(g)) => Some(format!("{n} ({g})")),
        (None, Some(n), None) => Some(n.to_string()),
        (None, None, _) => None,
    }
}

fn place_line_for(event: &Event) -> Option<PlaceLine> {
    let text = event.place.clone()?;
    let label = match event.kind {
        EventKind::Fainted => "Died at:",
        EventKind::RunEnd => "Final location:",
        _ => "Obtained via:",
    };
    Some(PlaceLine {
        label,
        text,
        video_url: event.video_url.clone(),
    })
}

impl EventCard {
    pub fn from_event(event: &Event) -> Self {
        let sprites = match &event.kind {
            EventKind::Evolved => {
                let (from, to) = evolution_pair(event);
                vec![Sprite::species(&from), Sprite::species(&to)]
            }
            EventKind::Badge => event
                .badge
                .as_deref()
                .map(|b| vec![Sprite::badge(b)])
                .unwrap_or_default(),
            EventKind::RunEnd => Vec::new(),
            _ => event
                .species()
                .map(|s| vec![Sprite::species(s)])
                .unwrap_or_default(),
        };

        EventCard {
            header: header_for(event),
            ribbon: ribbon_for(event),
            sprites,
            name_line: name_line_for(event),
            place_line: place_line_for(event),
            notes: event.notes.clone(),
            side: event.side,
            css_kind: event.kind.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn card(v: serde_json::Value) -> EventCard {
        let raw: crate::event::RawEvent = serde_json::from_value(v).unwrap();
        EventCard::from_event(&Event::from_raw(raw))
    }

    // ── headers ──────────────────────────────────────────────────────

    #[test]
    fn test_caught_header_with_level() {
        let c = card(json!({ "type": "caught", "pokemon": { "species": "Abra", "level": 9 } }));
        assert_eq!(c.header, "Caught at Level 9");
    }

    #[test]
    fn test_caught_header_without_level() {
        let c = card(json!({ "type": "caught", "pokemon": { "species": "Abra" } }));
        assert_eq!(c.header, "Caught");
    }

    #[test]
    fn test_failed_catch_header() {
        let c = card(json!({
            "type": "caught", "failed": true,
            "pokemon": { "species": "Abra", "level": 9 }
        }));
        assert_eq!(c.header, "Failed to catch (Level 9)");
        assert_eq!(c.ribbon.as_deref(), Some("Failed"));
    }

    #[test]
    fn test_fainted_header_and_place_label() {
        let c = card(json!({ "type": "fainted", "location": "Union Cave" }));
        assert_eq!(c.header, "Fainted");
        let place = c.place_line.unwrap();
        assert_eq!(place.label, "Died at:");
        assert_eq!(place.text, "Union Cave");
    }

    #[test]
    fn test_evolved_sprites_and_text() {
        let c = card(json!({
            "type": "evolution",
            "pokemon": { "from": "Pidgey", "to": "Pidgeotto", "nickname": "Gale" }
        }));
        assert_eq!(c.header, "Gale evolved: Pidgey \u{2192} Pidgeotto");
        assert_eq!(c.sprites.len(), 2);
        assert_eq!(c.sprites[0].url.as_deref(), Some("assets/sprites/pidgey.png"));
        assert_eq!(c.sprites[1].placeholder, "PID");
    }

    #[test]
    fn test_badge_card() {
        let c = card(json!({ "type": "badge", "badge": "Zephyr" }));
        assert_eq!(c.header, "Badge earned");
        assert_eq!(c.sprites.len(), 1);
        assert_eq!(c.sprites[0].url.as_deref(), Some("assets/badges/zephyr.png"));
    }

    #[test]
    fn test_unknown_type_header_is_capitalized() {
        assert_eq!(card(json!({ "type": "trade" })).header, "Trade");
        assert_eq!(card(json!({})).header, "Event");
    }

    // ── ribbons ──────────────────────────────────────────────────────

    #[test]
    fn test_failed_outranks_illegal() {
        let c = card(json!({ "type": "caught", "failed": true, "illegal": true }));
        assert_eq!(c.ribbon.as_deref(), Some("Failed"));
        let c = card(json!({ "type": "caught", "illegal": true }));
        assert_eq!(c.ribbon.as_deref(), Some("Illegal"));
    }

    #[test]
    fn test_special_overrides_all() {
        let c = card(json!({
            "type": "caught", "failed": true, "illegal": true, "special": "Shiny!"
        }));
        assert_eq!(c.ribbon.as_deref(), Some("Shiny!"));
    }

    #[test]
    fn test_special_default_label_uses_nickname() {
        let c = card(json!({
            "type": "caught", "special": true,
            "pokemon": { "species": "Abra", "nickname": "Sabrina" }
        }));
        assert_eq!(c.ribbon.as_deref(), Some("Named after Sabrina"));
        let c = card(json!({ "type": "caught", "special": true }));
        assert_eq!(c.ribbon.as_deref(), Some("Special"));
    }

    // ── name line ────────────────────────────────────────────────────

    #[test]
    fn test_name_line_includes_gender() {
        let c = card(json!({
            "type": "caught",
            "pokemon": { "species": "Nidoran", "nickname": "Pins", "gender": "female" }
        }));
        assert_eq!(c.name_line.as_deref(), Some("Pins (Nidoran, \u{2640})"));

        let c = card(json!({
            "type": "caught",
            "pokemon": { "species": "Machop", "gender": "M" }
        }));
        assert_eq!(c.name_line.as_deref(), Some("Machop (\u{2642})"));
    }

    #[test]
    fn test_name_line_unknown_gender_shown_verbatim() {
        let c = card(json!({
            "type": "caught",
            "pokemon": { "species": "Magnemite", "gender": "genderless" }
        }));
        assert_eq!(c.name_line.as_deref(), Some("Magnemite (genderless)"));
    }

    // ── lines omitted when empty ─────────────────────────────────────

    #[test]
    fn test_empty_fields_produce_no_lines() {
        let c = card(json!({ "type": "caught" }));
        assert!(c.name_line.is_none());
        assert!(c.place_line.is_none());
        assert!(c.notes.is_none());
        assert!(c.sprites.is_empty());
    }

    #[test]
    fn test_video_link_carried_on_place_line() {
        let c = card(json!({
            "type": "fainted", "location": "Gym",
            "video": { "url": "https://example.com/v?t=120" }
        }));
        assert_eq!(
            c.place_line.unwrap().video_url.as_deref(),
            Some("https://example.com/v?t=120")
        );
    }

    #[test]
    fn test_run_end_has_no_sprites() {
        let c = card(json!({ "type": "run_end", "location": "Victory Road" }));
        assert_eq!(c.header, "Run ended");
        assert!(c.sprites.is_empty());
        assert_eq!(c.place_line.unwrap().label, "Final location:");
    }
}
