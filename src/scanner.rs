use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// One run's documents discovered on disk.
///
/// Expected data layout:
///   {data}/runs.json                  – run index
///   {data}/runs/{run_id}/events.json  – event list
///   {data}/runs/{run_id}/meta.json    – optional metadata
#[derive(Debug)]
pub struct RunDir {
    pub id: String,
    pub events_path: PathBuf,
    pub meta_path: Option<PathBuf>,
}

pub fn index_path(data: &Path) -> PathBuf {
    data.join("runs.json")
}

/// Discover run directories under `{data}/runs/`. Directories without an
/// events.json are skipped (nothing to render or lint). Results are sorted
/// by id so reports are stable.
pub fn scan_runs(data: &Path) -> Vec<RunDir> {
    let runs_root = data.join("runs");
    let mut results = Vec::new();

    for entry in WalkDir::new(&runs_root)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let dir = entry.path();
        if !dir.is_dir() {
            continue;
        }
        let Some(id) = dir.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        let events_path = dir.join("events.json");
        if !events_path.is_file() {
            continue;
        }

        let meta_path = Some(dir.join("meta.json")).filter(|p| p.is_file());

        results.push(RunDir {
            id: id.to_string(),
            events_path,
            meta_path,
        });
    }

    results.sort_by(|a, b| a.id.cmp(&b.id));
    results
}
