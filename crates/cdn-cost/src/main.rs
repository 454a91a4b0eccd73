mod bootstrap;
mod report;

use std::io::Write;

use anyhow::Result;
use cost_core::pricing::estimate;
use cost_core::settings::Settings;
use cost_data::accumulator::UsageAccumulator;
use cost_data::reader::expand_inputs;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;
    tracing::info!("cdn-cost v{} starting", env!("CARGO_PKG_VERSION"));

    let stdout = std::io::stdout();
    run(&settings, &mut stdout.lock())
}

/// Load every input in order, then price the combined totals.
///
/// Any file that fails to load aborts the run; nothing is estimated from a
/// partial set of inputs.
fn run<W: Write>(settings: &Settings, out: &mut W) -> Result<()> {
    let files = expand_inputs(&settings.files);
    tracing::debug!("{} usage files to merge", files.len());

    let mut accumulator = UsageAccumulator::new();
    for path in &files {
        writeln!(out, "adding file {}", path.display())?;
        accumulator.add_file(path)?;
    }

    let totals = accumulator.finish()?;
    writeln!(out)?;
    writeln!(out, "done loading files - now calculating results")?;

    if settings.dump {
        report::render_totals(out, &totals)?;
    }

    let cost = estimate(&totals.counters);
    tracing::info!(
        "Estimated ${:.2} / month for {} requests over {} files",
        cost.total_price,
        cost.total_requests,
        totals.files_merged
    );
    report::render_estimate(out, &cost)?;
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
