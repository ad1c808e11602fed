//! Data fetcher: static JSON over HTTP, failure mapped to "absent".
//!
//! Any transport error, non-success status, or parse error is logged and
//! collapsed into `None`/empty. Callers never see an error value; a run
//! with no reachable data renders the natural empty state.

use leptos::logging::warn;
use nuzlog_types::{Event, RunIndex, RunMeta, RunRef, fallback_run_index};
use serde::de::DeserializeOwned;

async fn fetch_json<T: DeserializeOwned>(path: &str) -> Option<T> {
    let resp = match gloo_net::http::Request::get(path).send().await {
        Ok(resp) => resp,
        Err(e) => {
            warn!("fetch {path}: {e}");
            return None;
        }
    };
    if !resp.ok() {
        warn!("fetch {path}: HTTP {}", resp.status());
        return None;
    }
    match resp.json::<T>().await {
        Ok(doc) => Some(doc),
        Err(e) => {
            warn!("fetch {path}: parse error: {e}");
            None
        }
    }
}

/// The run index, or the single-run fallback when missing/empty/malformed.
pub async fn load_runs_list() -> Vec<RunRef> {
    let runs = fetch_json::<RunIndex>("data/runs.json")
        .await
        .map(|index| index.runs)
        .unwrap_or_default();
    if runs.is_empty() {
        fallback_run_index()
    } else {
        runs
    }
}

/// Events for one run; missing or non-array documents are empty.
pub async fn fetch_run_events(run_id: &str) -> Vec<Event> {
    let path = format!("data/runs/{run_id}/events.json");
    match fetch_json::<serde_json::Value>(&path).await {
        Some(doc) => Event::from_document(&doc),
        None => Vec::new(),
    }
}

pub async fn fetch_run_meta(run_id: &str) -> Option<RunMeta> {
    let path = format!("data/runs/{run_id}/meta.json");
    fetch_json::<RunMeta>(&path).await
}
