//! The canonical event structure and the one-time normalization from the
//! loosely-shaped wire records.
//!
//! Source data comes from hand-edited JSON: field names drifted across runs
//! (`location` vs `obtained` vs `obtainedVia`, `from` vs `before`, string
//! episode numbers, `special` as bool/string/object). All of that is folded
//! into [`Event`] exactly once, in [`Event::from_raw`]; rendering and
//! filtering only ever see the canonical shape.

use serde::{Deserialize, Deserializer, Serialize};

// ── wire shape ───────────────────────────────────────────────────────────

/// A run event as it appears on disk. Every field is optional and several
/// concepts have accumulated alias names; see [`Event::from_raw`] for the
/// folding rules.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawEvent {
    #[serde(deserialize_with = "de_opt_u32_lenient")]
    pub episode: Option<u32>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "de_opt_string_lenient")]
    pub timestamp: Option<String>,
    pub date: Option<String>,

    // Place aliases, first non-empty wins in declaration order.
    pub location: Option<String>,
    pub obtained: Option<String>,
    #[serde(rename = "obtainedVia")]
    pub obtained_via: Option<String>,
    pub method: Option<String>,
    #[serde(rename = "fromLocation")]
    pub from_location: Option<String>,

    pub pokemon: Option<RawPokemon>,
    pub notes: Option<String>,
    pub video: Option<RawVideo>,
    pub side: Option<String>,

    // Badge name aliases.
    pub badge: Option<String>,
    #[serde(rename = "badgeName")]
    pub badge_name: Option<String>,
    pub name: Option<String>,

    pub failed: Option<bool>,
    pub illegal: Option<bool>,
    pub special: Option<RawSpecial>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawPokemon {
    pub species: Option<String>,
    pub nickname: Option<String>,
    #[serde(deserialize_with = "de_opt_u32_lenient")]
    pub level: Option<u32>,
    pub gender: Option<String>,
    // Evolution aliases: from/before and to/after.
    pub from: Option<String>,
    pub before: Option<String>,
    pub to: Option<String>,
    pub after: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawVideo {
    pub url: Option<String>,
}

/// The `special` flag appears as `true`, `"some label"`, or `{"label": …}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawSpecial {
    Flag(bool),
    Label(String),
    Tagged {
        #[serde(default)]
        label: Option<String>,
    },
}

/// Accept integers, floats, and numeric strings for numeric fields.
fn de_opt_u32_lenient<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
    let v = Option::<serde_json::Value>::deserialize(d)?;
    Ok(v.and_then(|v| match v {
        serde_json::Value::Number(n) => n.as_u64().map(|n| n as u32),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }))
}

/// Accept strings or numbers; numbers are rendered back to their literal.
fn de_opt_string_lenient<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let v = Option::<serde_json::Value>::deserialize(d)?;
    Ok(v.and_then(|v| match v {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}

// ── canonical shape ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// A capture attempt (successful unless the `failed` flag is set).
    Caught,
    /// A party member died.
    Fainted,
    /// Evolution; before/after species live on [`Pokemon`].
    Evolved,
    /// Gym badge earned.
    Badge,
    /// Run-end marker; rendered as a full-width banner, never a card.
    RunEnd,
    /// Anything unrecognized, preserving the original type string.
    Other(String),
}

impl EventKind {
    /// Map a wire `type` string onto the canonical kind.
    pub fn parse(raw: Option<&str>) -> Self {
        let raw = raw.map(str::trim).unwrap_or("");
        match raw.to_ascii_lowercase().as_str() {
            "caught" => Self::Caught,
            "fainted" => Self::Fainted,
            "evolved" | "evolution" => Self::Evolved,
            "badge" => Self::Badge,
            "end" | "run_end" | "run-end" | "runend" => Self::RunEnd,
            "" => Self::Other(String::new()),
            _ => Self::Other(raw.to_string()),
        }
    }

    /// Stable lower-case name, used for type filtering and CSS classes.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Caught => "caught",
            Self::Fainted => "fainted",
            Self::Evolved => "evolved",
            Self::Badge => "badge",
            Self::RunEnd => "end",
            Self::Other(s) => s,
        }
    }
}

// Serialized as its canonical string so normalized output stays flat.
impl Serialize for EventKind {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventKind {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        Ok(EventKind::parse(Some(&s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pokemon {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evolved_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evolved_to: Option<String>,
}

/// Ribbon flags; `special` overrides `failed`, which overrides `illegal`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EventFlags {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub failed: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub illegal: bool,
    /// `Some(None)` means the flag was set without an explicit label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special: Option<Option<String>>,
}

/// One normalized run event. Every downstream consumer (grouping,
/// filtering, rendering, the CLI) works on this shape only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub episode: u32,
    pub kind: EventKind,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// First non-empty of location/obtained/obtainedVia/method/fromLocation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pokemon: Option<Pokemon>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default)]
    pub side: Side,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(default, skip_serializing_if = "EventFlags::is_empty")]
    pub flags: EventFlags,
}

impl EventFlags {
    pub fn is_empty(&self) -> bool {
        !self.failed && !self.illegal && self.special.is_none()
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// First non-empty string among the candidates.
fn first_non_empty(candidates: Vec<Option<String>>) -> Option<String> {
    candidates.into_iter().find_map(non_empty)
}

impl Event {
    pub fn from_raw(raw: RawEvent) -> Self {
        let kind = EventKind::parse(raw.kind.as_deref());

        let place = first_non_empty(vec![
            raw.location,
            raw.obtained,
            raw.obtained_via,
            raw.method,
            raw.from_location,
        ]);

        let pokemon = raw.pokemon.map(|p| Pokemon {
            species: non_empty(p.species),
            nickname: non_empty(p.nickname),
            level: p.level,
            gender: non_empty(p.gender),
            evolved_from: first_non_empty(vec![p.from, p.before]),
            evolved_to: first_non_empty(vec![p.to, p.after]),
        });

        let badge = first_non_empty(vec![raw.badge, raw.badge_name, raw.name]);

        let side = match raw.side.as_deref().map(str::trim) {
            Some(s) if s.eq_ignore_ascii_case("right") => Side::Right,
            _ => Side::Left,
        };

        let special = match raw.special {
            Some(RawSpecial::Flag(true)) => Some(None),
            Some(RawSpecial::Flag(false)) | None => None,
            Some(RawSpecial::Label(s)) => Some(non_empty(Some(s))),
            Some(RawSpecial::Tagged { label }) => Some(non_empty(label)),
        };

        Event {
            episode: raw.episode.unwrap_or(0),
            kind,
            timestamp: raw.timestamp.unwrap_or_default(),
            date: non_empty(raw.date),
            place,
            pokemon,
            notes: non_empty(raw.notes),
            video_url: raw.video.and_then(|v| non_empty(v.url)),
            side,
            badge,
            flags: EventFlags {
                failed: raw.failed.unwrap_or(false),
                illegal: raw.illegal.unwrap_or(false),
                special,
            },
        }
    }

    /// Normalize a whole wire document. Anything that is not a JSON array
    /// of objects is treated as empty; non-object entries are skipped.
    pub fn from_document(doc: &serde_json::Value) -> Vec<Event> {
        let Some(items) = doc.as_array() else {
            return Vec::new();
        };
        items
            .iter()
            .filter(|item| item.is_object())
            .filter_map(|item| serde_json::from_value::<RawEvent>(item.clone()).ok())
            .map(Event::from_raw)
            .collect()
    }

    pub fn species(&self) -> Option<&str> {
        self.pokemon.as_ref().and_then(|p| p.species.as_deref())
    }

    pub fn nickname(&self) -> Option<&str> {
        self.pokemon.as_ref().and_then(|p| p.nickname.as_deref())
    }

    pub fn is_run_end(&self) -> bool {
        self.kind == EventKind::RunEnd
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalize(v: serde_json::Value) -> Event {
        Event::from_raw(serde_json::from_value(v).unwrap())
    }

    // ── kind parsing ─────────────────────────────────────────────────

    #[test]
    fn test_kind_aliases() {
        assert_eq!(EventKind::parse(Some("Caught")), EventKind::Caught);
        assert_eq!(EventKind::parse(Some("evolution")), EventKind::Evolved);
        assert_eq!(EventKind::parse(Some("evolved")), EventKind::Evolved);
        assert_eq!(EventKind::parse(Some("run_end")), EventKind::RunEnd);
        assert_eq!(EventKind::parse(Some("end")), EventKind::RunEnd);
        assert_eq!(
            EventKind::parse(Some("trade")),
            EventKind::Other("trade".into())
        );
        assert_eq!(EventKind::parse(None), EventKind::Other(String::new()));
    }

    // ── alias folding ────────────────────────────────────────────────

    #[test]
    fn test_place_fallback_chain() {
        let ev = normalize(json!({
            "episode": 3,
            "type": "caught",
            "obtainedVia": "Route 32",
            "method": "ignored, obtainedVia wins"
        }));
        assert_eq!(ev.place.as_deref(), Some("Route 32"));

        let ev = normalize(json!({ "type": "caught", "location": "  " , "method": "Gift"}));
        assert_eq!(ev.place.as_deref(), Some("Gift"));
    }

    #[test]
    fn test_evolution_aliases() {
        let ev = normalize(json!({
            "type": "evolution",
            "pokemon": { "before": "Pidgey", "after": "Pidgeotto", "nickname": "Gale" }
        }));
        let p = ev.pokemon.unwrap();
        assert_eq!(p.evolved_from.as_deref(), Some("Pidgey"));
        assert_eq!(p.evolved_to.as_deref(), Some("Pidgeotto"));
    }

    #[test]
    fn test_badge_name_aliases() {
        let ev = normalize(json!({ "type": "badge", "badgeName": "Zephyr" }));
        assert_eq!(ev.badge.as_deref(), Some("Zephyr"));
        let ev = normalize(json!({ "type": "badge", "name": "Hive" }));
        assert_eq!(ev.badge.as_deref(), Some("Hive"));
    }

    #[test]
    fn test_episode_defaults_and_lenient_numbers() {
        let ev = normalize(json!({ "type": "caught" }));
        assert_eq!(ev.episode, 0);
        let ev = normalize(json!({ "episode": "12", "type": "caught" }));
        assert_eq!(ev.episode, 12);
        let ev = normalize(json!({ "episode": 7, "timestamp": 20240115, "type": "caught" }));
        assert_eq!(ev.timestamp, "20240115");
    }

    // ── special flag shapes ──────────────────────────────────────────

    #[test]
    fn test_special_flag_variants() {
        let ev = normalize(json!({ "type": "caught", "special": true }));
        assert_eq!(ev.flags.special, Some(None));

        let ev = normalize(json!({ "type": "caught", "special": false }));
        assert_eq!(ev.flags.special, None);

        let ev = normalize(json!({ "type": "caught", "special": "Shiny!" }));
        assert_eq!(ev.flags.special, Some(Some("Shiny!".into())));

        let ev = normalize(json!({ "type": "caught", "special": { "label": "Gift mon" } }));
        assert_eq!(ev.flags.special, Some(Some("Gift mon".into())));

        let ev = normalize(json!({ "type": "caught", "special": {} }));
        assert_eq!(ev.flags.special, Some(None));
    }

    #[test]
    fn test_side_parsing() {
        assert_eq!(normalize(json!({ "side": "right" })).side, Side::Right);
        assert_eq!(normalize(json!({ "side": "RIGHT " })).side, Side::Right);
        assert_eq!(normalize(json!({ "side": "middle" })).side, Side::Left);
        assert_eq!(normalize(json!({})).side, Side::Left);
    }

    // ── document-level tolerance ─────────────────────────────────────

    #[test]
    fn test_from_document_non_array_is_empty() {
        assert!(Event::from_document(&json!({ "oops": 1 })).is_empty());
        assert!(Event::from_document(&json!("nope")).is_empty());
        assert!(Event::from_document(&serde_json::Value::Null).is_empty());
    }

    #[test]
    fn test_from_document_skips_non_objects() {
        let evs = Event::from_document(&json!([
            { "episode": 1, "type": "caught" },
            42,
            "junk",
            { "episode": 2, "type": "fainted" }
        ]));
        assert_eq!(evs.len(), 2);
        assert_eq!(evs[1].kind, EventKind::Fainted);
    }
}
