//! Shared data model and pure logic for the nuzlog run tracker.
//!
//! Everything environment-independent lives here: the canonical event
//! structure (normalized once from the loosely-shaped wire JSON), episode
//! grouping, the persisted collapse-state policy, permalink parsing,
//! search/filter, asset filename derivation, and the declarative event-card
//! description the frontend projects into views.

pub mod assets;
pub mod card;
pub mod collapse;
pub mod event;
pub mod filter;
pub mod permalink;
pub mod timeline;

pub use card::{EventCard, PlaceLine, Sprite};
pub use collapse::{CollapseStore, MemoryStorage, StoragePort};
pub use event::{Event, EventFlags, EventKind, Pokemon, RawEvent, Side};
pub use permalink::Permalink;
pub use timeline::EpisodeSection;

use serde::{Deserialize, Serialize};

/// Run id used when no index document exists and no `run` parameter is set.
pub const DEFAULT_RUN_ID: &str = "run-01";

// ── runs.json index ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunIndex {
    #[serde(default)]
    pub runs: Vec<RunRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl RunRef {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.id)
    }
}

/// Single-run fallback used when the index is missing, empty, or malformed.
pub fn fallback_run_index() -> Vec<RunRef> {
    vec![RunRef {
        id: DEFAULT_RUN_ID.to_string(),
        title: Some("Run 1".to_string()),
    }]
}

// ── meta.json ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player: Option<Trainer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rival: Option<Trainer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended: Option<RunEnded>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trainer {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunEnded {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}
