//! Running totals across usage files.

use std::path::Path;

use cost_core::error::{CostError, Result};
use cost_core::models::{AccumulatedTotals, UsageRecord};
use tracing::info;

use crate::reader::load_record;

// ── UsageAccumulator ──────────────────────────────────────────────────────────

/// Sums the usage counters of every file added to it.
///
/// The accumulator starts empty; the first merged record initialises the
/// totals and every later record adds to them. A file that fails to load or
/// validate leaves the totals untouched.
#[derive(Debug, Default)]
pub struct UsageAccumulator {
    totals: Option<AccumulatedTotals>,
}

impl UsageAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one validated record into the running totals.
    pub fn merge(&mut self, record: UsageRecord) {
        match self.totals.as_mut() {
            None => {
                self.totals = Some(AccumulatedTotals {
                    counters: record.counters,
                    files_merged: 1,
                    tracked: record.tracked,
                });
            }
            Some(totals) => {
                totals.counters.add(&record.counters);
                totals.files_merged += 1;
                totals.tracked.extend(record.tracked);
            }
        }
    }

    /// Load the usage file at `path` and merge it.
    ///
    /// The file is fully validated before anything is merged, so on error
    /// the accumulator is unchanged.
    pub fn add_file(&mut self, path: &Path) -> Result<()> {
        let record = load_record(path)?;
        self.merge(record);
        info!("Merged {}", path.display());
        Ok(())
    }

    /// Current totals, or `None` before the first merge.
    pub fn totals(&self) -> Option<&AccumulatedTotals> {
        self.totals.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_none()
    }

    /// Freeze the accumulator and hand over its totals.
    ///
    /// Fails with [`CostError::NoInput`] if nothing was merged.
    pub fn finish(self) -> Result<AccumulatedTotals> {
        self.totals.ok_or(CostError::NoInput)
    }
}
