//! Usage-file discovery and loading.
//!
//! Each usage file is one JSON object summarising a log-parsing run. Paths
//! given on the command line may also be directories, which are scanned for
//! `.json` files.

use std::path::{Path, PathBuf};

use cost_core::error::{CostError, Result};
use cost_core::models::UsageRecord;
use tracing::{debug, warn};

/// Read and validate a single usage file.
///
/// Fails with [`CostError::FileRead`] or [`CostError::JsonParse`] when the
/// file cannot be read or parsed, and with [`CostError::MissingField`] or
/// [`CostError::InvalidField`] when a required counter is absent or malformed.
pub fn load_record(path: &Path) -> Result<UsageRecord> {
    let content = std::fs::read_to_string(path).map_err(|source| CostError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let value: serde_json::Value =
        serde_json::from_str(&content).map_err(|source| CostError::JsonParse {
            path: path.to_path_buf(),
            source,
        })?;

    let record = UsageRecord::from_value(path, &value)?;
    debug!(
        "Loaded {}: {} requests, {} bytes",
        path.display(),
        record.counters.billable_requests(),
        record.counters.billable_bytes()
    );
    Ok(record)
}

/// Find all `.json` files recursively under `dir`, sorted by path.
pub fn find_json_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext == "json")
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Expand command-line inputs into the ordered list of files to merge.
///
/// Plain paths are kept as given (even if they do not exist, so the load
/// step reports the error). Directories are replaced in place by the
/// `.json` files found beneath them.
pub fn expand_inputs(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::with_capacity(inputs.len());
    for input in inputs {
        if input.is_dir() {
            let found = find_json_files(input);
            if found.is_empty() {
                warn!("No JSON files found in {}", input.display());
            } else {
                debug!("Found {} JSON files in {}", found.len(), input.display());
            }
            files.extend(found);
        } else {
            files.push(input.clone());
        }
    }
    files
}
