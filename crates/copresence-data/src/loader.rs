//! Timeline loading with per-file error isolation.
//!
//! Reads a file, parses it as JSON, selects a format adapter, applies the
//! year filter and returns a chronologically sorted [`Timeline`]. Every
//! failure is attributable to its specific file; callers skip the file and
//! continue the run.

use std::path::{Path, PathBuf};

use copresence_core::error::{CopresenceError, Result};
use copresence_core::models::{Timeline, YearFilter};
use tracing::{debug, info};

use crate::adapters;

/// Load one timeline file.
///
/// Sorting ascending by timestamp is part of the contract: the matcher
/// assumes it and does not re-sort.
pub fn load_timeline(path: &Path, filter: &YearFilter) -> Result<Timeline> {
    let raw = std::fs::read_to_string(path).map_err(|source| CopresenceError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let doc: serde_json::Value =
        serde_json::from_str(&raw).map_err(|source| CopresenceError::JsonParse {
            path: path.to_path_buf(),
            source,
        })?;

    let adapter = adapters::select(&doc)
        .ok_or_else(|| CopresenceError::UnrecognizedSchema(path.to_path_buf()))?;
    debug!("{}: using {} adapter", path.display(), adapter.name());

    let mut events = adapter.extract(&doc);
    events.retain(|event| filter.contains(event.timestamp));
    if events.is_empty() {
        return Err(CopresenceError::EmptyScope(path.to_path_buf()));
    }
    events.sort_by_key(|event| event.timestamp);

    info!("{}: {} events in scope", path.display(), events.len());

    let label = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(Timeline { label, events })
}

/// Load every file, isolating failures per file.
///
/// Failed files never abort the run: their errors are collected alongside
/// the timelines that did load, and the caller decides whether enough
/// survive to compare.
pub fn load_all(paths: &[PathBuf], filter: &YearFilter) -> (Vec<Timeline>, Vec<CopresenceError>) {
    let mut timelines = Vec::new();
    let mut failures = Vec::new();
    for path in paths {
        match load_timeline(path, filter) {
            Ok(timeline) => timelines.push(timeline),
            Err(err) => failures.push(err),
        }
    }
    (timelines, failures)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
