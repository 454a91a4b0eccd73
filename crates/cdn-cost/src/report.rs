//! Plain-text rendering of accumulated totals and cost estimates.

use std::io::{self, Write};

use cost_core::formatting::{format_count, format_currency};
use cost_core::models::AccumulatedTotals;
use cost_core::pricing::{CostReport, TierCharge, BANDWIDTH_TIERS};

/// Write the per-tier breakdown, request and edge-protection charges and the
/// grand total.
pub fn render_estimate<W: Write>(out: &mut W, report: &CostReport) -> io::Result<()> {
    for charge in &report.tier_charges {
        writeln!(out, "  {}", tier_line(charge))?;
    }
    writeln!(
        out,
        "total bandwidth {:.2} terabytes cost = {} / month",
        report.total_terabytes,
        format_currency(report.bandwidth_cost)
    )?;

    writeln!(
        out,
        "request cost (billed at the HTTPS rate): {} requests = {} / month",
        format_count(report.total_requests),
        format_currency(report.request_cost)
    )?;

    writeln!(out)?;
    writeln!(
        out,
        "edge protection per million requests: {} requests = {} / month",
        format_count(report.total_requests),
        format_currency(report.edge_protection_cost)
    )?;

    writeln!(out)?;
    writeln!(out, "total / month cost = {}", format_currency(report.total_price))?;
    Ok(())
}

/// Write each accumulated counter plus file and tracked-entry counts.
pub fn render_totals<W: Write>(out: &mut W, totals: &AccumulatedTotals) -> io::Result<()> {
    for (name, value) in totals.counters.fields() {
        writeln!(out, "{} = {}", name, format_count(value))?;
    }
    writeln!(out, "merged {} files", totals.files_merged)?;
    writeln!(out, "tracked {} vhosts", totals.tracked.len())?;
    writeln!(out)?;
    Ok(())
}

fn tier_line(charge: &TierCharge) -> String {
    let bracket = if charge.tier.floor_tb > 0.0 {
        format!("over {:.1}", charge.tier.floor_tb)
    } else {
        format!("under {:.1}", base_tier_cap())
    };
    format!(
        "{:.2} terabytes {} adds {} / month",
        charge.terabytes,
        bracket,
        format_currency(charge.cost)
    )
}

/// Lowest non-zero tier floor, i.e. the upper bound of the base tier.
fn base_tier_cap() -> f64 {
    BANDWIDTH_TIERS
        .iter()
        .map(|t| t.floor_tb)
        .filter(|f| *f > 0.0)
        .fold(f64::INFINITY, f64::min)
}
