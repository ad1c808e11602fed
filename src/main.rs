mod check;
mod scanner;
mod summary;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use nuzlog_types::{Event, RunIndex, RunMeta};

const OUTPUT_DIR: &str = "output";

#[derive(Parser)]
#[command(name = "nuzlog", about = "Nuzlocke run data tooling")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Lint run documents: ids, timestamps, episode gaps, unknown types
    Check {
        /// Path to the data directory
        #[arg(default_value = "data")]
        data: PathBuf,
    },
    /// Print per-run inventory (episode span, event counts, ended status)
    Summary {
        #[arg(default_value = "data")]
        data: PathBuf,
    },
    /// Write canonical normalized events to output/<run_id>.events.json
    Normalize {
        #[arg(default_value = "data")]
        data: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Check { data }) => run_check(&data),
        Some(Command::Summary { data }) => run_summary(&data),
        Some(Command::Normalize { data }) => run_normalize(&data),
        // Default: lint the conventional data directory.
        None => run_check(Path::new("data")),
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  DOCUMENT HELPERS
// ═══════════════════════════════════════════════════════════════════════

/// Read and parse one JSON document; per-run degradation means a bad file
/// is reported and skipped, never fatal to the whole pass.
fn read_document(path: &Path) -> Option<serde_json::Value> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("  cannot read {}: {e}", path.display());
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(doc) => Some(doc),
        Err(e) => {
            eprintln!("  cannot parse {}: {e}", path.display());
            None
        }
    }
}

fn load_index(data: &Path) -> Option<RunIndex> {
    let doc = read_document(&scanner::index_path(data))?;
    serde_json::from_value(doc).ok()
}

fn load_events(run: &scanner::RunDir) -> Vec<Event> {
    read_document(&run.events_path)
        .map(|doc| Event::from_document(&doc))
        .unwrap_or_default()
}

fn load_meta(run: &scanner::RunDir) -> Option<RunMeta> {
    let path = run.meta_path.as_ref()?;
    let doc = read_document(path)?;
    serde_json::from_value(doc).ok()
}

fn write_json<T: serde::Serialize>(name: &str, data: &T) {
    let path = Path::new(OUTPUT_DIR).join(name);
    let json = serde_json::to_string_pretty(data).expect("JSON serialization failed");
    if let Err(e) = std::fs::create_dir_all(OUTPUT_DIR) {
        eprintln!("cannot create {OUTPUT_DIR}/: {e}");
        return;
    }
    match std::fs::write(&path, &json) {
        Ok(()) => eprintln!("  {} ({} bytes)", path.display(), json.len()),
        Err(e) => eprintln!("  cannot write {}: {e}", path.display()),
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  CHECK MODE
// ═══════════════════════════════════════════════════════════════════════

fn run_check(data: &Path) -> ExitCode {
    let runs = scanner::scan_runs(data);
    if runs.is_empty() {
        eprintln!("no runs found under {}/runs/", data.display());
        return ExitCode::FAILURE;
    }

    let checker = check::Checker::new();
    let mut findings = Vec::new();

    // Index entries that point at directories that do not exist.
    if let Some(index) = load_index(data) {
        for run_ref in &index.runs {
            findings.extend(checker.check_run_id(&run_ref.id));
            if !runs.iter().any(|r| r.id == run_ref.id) {
                findings.push(check::Finding {
                    severity: check::Severity::Error,
                    run_id: run_ref.id.clone(),
                    message: "listed in runs.json but has no events.json".to_string(),
                });
            }
        }
    } else {
        eprintln!("note: no readable runs.json; the page falls back to a single default run");
    }

    for run in &runs {
        findings.extend(checker.check_run_id(&run.id));
        let events = load_events(run);
        findings.extend(checker.check_events(&run.id, &events));
        if let Some(meta) = load_meta(run) {
            findings.extend(checker.check_meta(&run.id, &meta, &events));
        }
    }

    for finding in &findings {
        println!("{finding}");
    }
    let errors = findings
        .iter()
        .filter(|f| f.severity == check::Severity::Error)
        .count();
    eprintln!(
        "\n{} runs checked, {} findings ({} errors)",
        runs.len(),
        findings.len(),
        errors
    );

    if errors > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  SUMMARY MODE
// ═══════════════════════════════════════════════════════════════════════

fn run_summary(data: &Path) -> ExitCode {
    let runs = scanner::scan_runs(data);
    if runs.is_empty() {
        eprintln!("no runs found under {}/runs/", data.display());
        return ExitCode::FAILURE;
    }

    for run in &runs {
        let events = load_events(run);
        let meta = load_meta(run);
        let s = summary::summarize(&run.id, &events, meta.as_ref());
        print!("{}", summary::render(&s));
    }
    ExitCode::SUCCESS
}

// ═══════════════════════════════════════════════════════════════════════
//  NORMALIZE MODE
// ═══════════════════════════════════════════════════════════════════════

fn run_normalize(data: &Path) -> ExitCode {
    let runs = scanner::scan_runs(data);
    if runs.is_empty() {
        eprintln!("no runs found under {}/runs/", data.display());
        return ExitCode::FAILURE;
    }

    eprintln!("normalizing {} runs:", runs.len());
    for run in &runs {
        let events = load_events(run);
        // Canonical output is sorted the way the timeline renders it.
        let sections = nuzlog_types::timeline::group_episodes(&events);
        let ordered: Vec<&Event> = sections.iter().flat_map(|s| s.events.iter()).collect();
        write_json(&format!("{}.events.json", run.id), &ordered);
    }
    ExitCode::SUCCESS
}
