//! Per-run persisted collapse state.
//!
//! The set of collapsed episode numbers for each run lives in a key-value
//! store behind [`StoragePort`], so the frontend can back it with browser
//! localStorage while tests and the CLI use [`MemoryStorage`]. Values are
//! JSON arrays under `nuzlog.collapsed.<run_id>`.
//!
//! Seeding rule: the first time a run is ever rendered (key entirely
//! absent, as opposed to persisted-but-empty) the highest episode is
//! collapsed so the latest session is not spoiled on load.

use std::collections::BTreeSet;

/// Minimal key-value port. Implementations must never fail loudly: `set`
/// swallows write errors (quota and the like) and `get` returns `None` for
/// anything unreadable.
pub trait StoragePort {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

const KEY_PREFIX: &str = "nuzlog.collapsed.";

pub struct CollapseStore<P: StoragePort> {
    port: P,
}

impl<P: StoragePort> CollapseStore<P> {
    pub fn new(port: P) -> Self {
        Self { port }
    }

    fn key(run_id: &str) -> String {
        format!("{KEY_PREFIX}{run_id}")
    }

    /// Load the collapsed set; missing or malformed storage yields empty.
    pub fn load(&self, run_id: &str) -> BTreeSet<u32> {
        self.port
            .get(&Self::key(run_id))
            .and_then(|raw| serde_json::from_str::<Vec<u32>>(&raw).ok())
            .map(|v| v.into_iter().collect())
            .unwrap_or_default()
    }

    /// Load, seeding the spoiler-safe default exactly once: only when no
    /// value has ever been persisted for this run is `last_episode`
    /// collapsed and written back. A stored empty list is respected as-is.
    pub fn load_or_seed(&self, run_id: &str, last_episode: Option<u32>) -> BTreeSet<u32> {
        if self.port.get(&Self::key(run_id)).is_some() {
            return self.load(run_id);
        }
        let mut set = BTreeSet::new();
        if let Some(last) = last_episode {
            set.insert(last);
        }
        self.save(run_id, &set);
        set
    }

    pub fn save(&self, run_id: &str, set: &BTreeSet<u32>) {
        let list: Vec<u32> = set.iter().copied().collect();
        if let Ok(raw) = serde_json::to_string(&list) {
            self.port.set(&Self::key(run_id), &raw);
        }
    }

    pub fn clear(&self, run_id: &str) {
        self.port.remove(&Self::key(run_id));
    }

    /// Flip (or force, with `Some(expand)`) one episode's state and persist
    /// the result in a single read-modify-write. Returns the new set.
    pub fn toggle(
        &self,
        run_id: &str,
        episode: u32,
        force_expand: Option<bool>,
    ) -> BTreeSet<u32> {
        let mut set = self.load(run_id);
        let collapse = match force_expand {
            Some(expand) => !expand,
            None => !set.contains(&episode),
        };
        if collapse {
            set.insert(episode);
        } else {
            set.remove(&episode);
        }
        self.save(run_id, &set);
        set
    }

    /// Collapse or expand every listed episode in one batch
    /// read-modify-write. Episodes not listed (e.g. filtered out of the
    /// current render) keep their persisted membership.
    pub fn set_all(&self, run_id: &str, episodes: &[u32], collapsed: bool) -> BTreeSet<u32> {
        let mut set = self.load(run_id);
        for episode in episodes {
            if collapsed {
                set.insert(*episode);
            } else {
                set.remove(episode);
            }
        }
        self.save(run_id, &set);
        set
    }
}

// ── in-memory port ───────────────────────────────────────────────────────

/// In-memory [`StoragePort`], used by tests and the CLI.
#[derive(Default)]
pub struct MemoryStorage {
    map: std::cell::RefCell<std::collections::HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StoragePort for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.map.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.map.borrow_mut().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.map.borrow_mut().remove(key);
    }
}
