use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::warn;

use crate::error::{CostError, Result};

/// The counters every usage file must carry, in the order they are reported.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "OnCampus",
    "OnCampusBytes",
    "Total",
    "TotalBytes",
    "OffCampus",
    "OffCampusBytes",
];

/// Key of the optional per-network tracking map inside a usage file.
pub const TRACKED_FIELD: &str = "Tracked";

/// The six request and byte counters shared by a single usage file and the
/// running totals.
///
/// Stored as `f64`: the log parser may emit fractional values, and sums of
/// large byte counts must never overflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UsageCounters {
    /// Requests originating on the campus network.
    pub on_campus: f64,
    /// Bytes served to on-campus requests.
    pub on_campus_bytes: f64,
    /// All requests seen by the log parser.
    pub total: f64,
    /// All bytes seen by the log parser.
    pub total_bytes: f64,
    /// Requests originating off campus.
    pub off_campus: f64,
    /// Bytes served to off-campus requests.
    pub off_campus_bytes: f64,
}

impl UsageCounters {
    /// Requests that would be served by the CDN (on + off campus).
    pub fn billable_requests(&self) -> f64 {
        self.on_campus + self.off_campus
    }

    /// Bytes that would be served by the CDN (on + off campus).
    pub fn billable_bytes(&self) -> f64 {
        self.on_campus_bytes + self.off_campus_bytes
    }

    /// Add another set of counters field by field.
    pub fn add(&mut self, other: &UsageCounters) {
        self.on_campus += other.on_campus;
        self.on_campus_bytes += other.on_campus_bytes;
        self.total += other.total;
        self.total_bytes += other.total_bytes;
        self.off_campus += other.off_campus;
        self.off_campus_bytes += other.off_campus_bytes;
    }

    /// Counters paired with their JSON field names, in [`REQUIRED_FIELDS`] order.
    pub fn fields(&self) -> [(&'static str, f64); 6] {
        [
            (REQUIRED_FIELDS[0], self.on_campus),
            (REQUIRED_FIELDS[1], self.on_campus_bytes),
            (REQUIRED_FIELDS[2], self.total),
            (REQUIRED_FIELDS[3], self.total_bytes),
            (REQUIRED_FIELDS[4], self.off_campus),
            (REQUIRED_FIELDS[5], self.off_campus_bytes),
        ]
    }
}

/// One validated usage file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsageRecord {
    pub counters: UsageCounters,
    /// Keys of the file's `Tracked` map, if it had one.
    pub tracked: BTreeSet<String>,
}

impl UsageRecord {
    /// Validate a parsed JSON document and extract the usage counters.
    ///
    /// Every field in [`REQUIRED_FIELDS`] must be present and hold a finite,
    /// non-negative number.
    /// Extra fields are ignored. `path` is only used for error context.
    pub fn from_value(path: &Path, value: &Value) -> Result<Self> {
        let Value::Object(obj) = value else {
            return Err(CostError::NotAnObject {
                path: path.to_path_buf(),
            });
        };

        let counters = UsageCounters {
            on_campus: read_counter(obj, path, REQUIRED_FIELDS[0])?,
            on_campus_bytes: read_counter(obj, path, REQUIRED_FIELDS[1])?,
            total: read_counter(obj, path, REQUIRED_FIELDS[2])?,
            total_bytes: read_counter(obj, path, REQUIRED_FIELDS[3])?,
            off_campus: read_counter(obj, path, REQUIRED_FIELDS[4])?,
            off_campus_bytes: read_counter(obj, path, REQUIRED_FIELDS[5])?,
        };

        let tracked = match obj.get(TRACKED_FIELD) {
            None | Some(Value::Null) => BTreeSet::new(),
            Some(Value::Object(map)) => map.keys().cloned().collect(),
            Some(_) => {
                warn!(
                    "Ignoring non-object {} value in {}",
                    TRACKED_FIELD,
                    path.display()
                );
                BTreeSet::new()
            }
        };

        Ok(Self { counters, tracked })
    }
}

/// Counters summed across every merged usage file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccumulatedTotals {
    pub counters: UsageCounters,
    /// Number of usage files merged into `counters`.
    pub files_merged: usize,
    /// Union of tracked keys across all merged files.
    pub tracked: BTreeSet<String>,
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn read_counter(obj: &Map<String, Value>, path: &Path, field: &'static str) -> Result<f64> {
    let value = obj.get(field).ok_or_else(|| CostError::MissingField {
        path: path.to_path_buf(),
        field,
    })?;

    as_count(value).ok_or_else(|| CostError::InvalidField {
        path: path.to_path_buf(),
        field,
        value: value.to_string(),
    })
}

/// Interpret a JSON value as a non-negative counter.
fn as_count(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .filter(|f| f.is_finite() && *f >= 0.0)
}
