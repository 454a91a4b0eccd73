use crate::models::UsageCounters;

/// Fixed per-request overhead added to the transfer volume, in kilobytes.
pub const REQUEST_OVERHEAD_KB: f64 = 2.0;

/// Divisor applied to the kilobyte volume to obtain "terabytes".
///
/// This is `1024^3`, which is one factor of 1024 short of a real KB to TB
/// conversion. Published estimates were produced with this divisor, so it is
/// kept as-is.
pub const KB_PER_TB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Requests per request-handling billing block.
pub const REQUESTS_PER_BLOCK: f64 = 10_000.0;
/// USD per request-handling block (HTTPS rate).
pub const REQUEST_BLOCK_PRICE: f64 = 0.01;

/// Requests per edge-protection (WAF) billing block.
pub const REQUESTS_PER_EDGE_BLOCK: f64 = 1_000_000.0;
/// USD per edge-protection block.
pub const EDGE_BLOCK_PRICE: f64 = 0.60;

/// A progressive bandwidth bracket: volume above `floor_tb` is billed at
/// `price_per_tb`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandwidthTier {
    pub floor_tb: f64,
    pub price_per_tb: f64,
}

/// Bandwidth brackets ordered from the highest floor down.
pub const BANDWIDTH_TIERS: [BandwidthTier; 3] = [
    BandwidthTier {
        floor_tb: 50.0,
        price_per_tb: 60.0,
    },
    BandwidthTier {
        floor_tb: 10.0,
        price_per_tb: 80.0,
    },
    BandwidthTier {
        floor_tb: 0.0,
        price_per_tb: 85.0,
    },
];

/// The share of the bandwidth billed within one tier.
#[derive(Debug, Clone, PartialEq)]
pub struct TierCharge {
    pub tier: BandwidthTier,
    /// Terabytes billed at this tier's rate.
    pub terabytes: f64,
    /// `terabytes * tier.price_per_tb`.
    pub cost: f64,
}

/// Structured result of a cost estimate. All amounts are USD per month.
#[derive(Debug, Clone, PartialEq)]
pub struct CostReport {
    /// Charges in evaluation order (highest tier first). The lowest tier is
    /// always present; upper tiers only when the volume reaches them.
    pub tier_charges: Vec<TierCharge>,
    pub total_terabytes: f64,
    pub bandwidth_cost: f64,
    pub total_requests: f64,
    pub request_blocks: u64,
    pub request_cost: f64,
    pub edge_blocks: u64,
    pub edge_protection_cost: f64,
    /// Bandwidth, request and edge-protection costs combined.
    pub total_price: f64,
}

/// Smallest whole number `>= value`, for non-negative `value`.
///
/// ```
/// use cost_core::pricing::ceiling;
///
/// assert_eq!(ceiling(0.0), 0);
/// assert_eq!(ceiling(3.5), 4);
/// ```
pub fn ceiling(value: f64) -> u64 {
    if value <= 0.0 {
        return 0;
    }
    value.ceil() as u64
}

/// Volume in (quirk-scaled) terabytes for the given counters, including the
/// per-request overhead.
pub fn billable_terabytes(counters: &UsageCounters) -> f64 {
    let mut total_kb = counters.billable_bytes() / 1024.0;
    total_kb += counters.billable_requests() * REQUEST_OVERHEAD_KB;
    total_kb / KB_PER_TB
}

/// Split `terabytes` across [`BANDWIDTH_TIERS`], top-down.
///
/// Returns the individual charges and their summed cost.
pub fn price_bandwidth(terabytes: f64) -> (Vec<TierCharge>, f64) {
    let mut remaining = terabytes;
    let mut charges = Vec::with_capacity(BANDWIDTH_TIERS.len());
    let mut cost = 0.0;

    for tier in BANDWIDTH_TIERS {
        let is_base = tier.floor_tb == 0.0;
        if !is_base && remaining <= tier.floor_tb {
            continue;
        }
        let billed = remaining - tier.floor_tb;
        let charge = billed * tier.price_per_tb;
        cost += charge;
        charges.push(TierCharge {
            tier,
            terabytes: billed,
            cost: charge,
        });
        remaining = tier.floor_tb;
    }

    (charges, cost)
}

/// Estimate the monthly CDN bill for the accumulated counters.
pub fn estimate(counters: &UsageCounters) -> CostReport {
    let total_requests = counters.billable_requests();
    let total_terabytes = billable_terabytes(counters);

    let (tier_charges, bandwidth_cost) = price_bandwidth(total_terabytes);

    let request_blocks = ceiling(total_requests / REQUESTS_PER_BLOCK);
    let request_cost = request_blocks as f64 * REQUEST_BLOCK_PRICE;

    let edge_blocks = ceiling(total_requests / REQUESTS_PER_EDGE_BLOCK);
    let edge_protection_cost = edge_blocks as f64 * EDGE_BLOCK_PRICE;

    let total_price = bandwidth_cost + request_cost + edge_protection_cost;

    CostReport {
        tier_charges,
        total_terabytes,
        bandwidth_cost,
        total_requests,
        request_blocks,
        request_cost,
        edge_blocks,
        edge_protection_cost,
        total_price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    /// Counters with no requests and exactly `tb` quirk-terabytes of traffic.
    fn counters_for_terabytes(tb: f64) -> UsageCounters {
        UsageCounters {
            on_campus_bytes: tb * 1024.0 * KB_PER_TB,
            ..Default::default()
        }
    }

    fn requests(on: f64, off: f64) -> UsageCounters {
        UsageCounters {
            on_campus: on,
            off_campus: off,
            total: on + off,
            ..Default::default()
        }
    }

    // ── ceiling ──────────────────────────────────────────────────────────────

    #[test]
    fn test_ceiling_values() {
        assert_eq!(ceiling(0.0), 0);
        assert_eq!(ceiling(0.0001), 1);
        assert_eq!(ceiling(3.0), 3);
        assert_eq!(ceiling(3.5), 4);
    }

    // ── price_bandwidth ──────────────────────────────────────────────────────

    #[test]
    fn test_bandwidth_base_tier_only() {
        let (charges, cost) = price_bandwidth(5.0);
        assert!(approx(cost, 425.0), "cost = {cost}");
        assert_eq!(charges.len(), 1);
        assert_eq!(charges[0].tier.price_per_tb, 85.0);
        assert!(approx(charges[0].terabytes, 5.0));
    }

    #[test]
    fn test_bandwidth_two_tiers() {
        let (charges, cost) = price_bandwidth(15.0);
        assert!(approx(cost, 1250.0), "cost = {cost}");
        assert_eq!(charges.len(), 2);
        assert!(approx(charges[0].terabytes, 5.0));
        assert!(approx(charges[0].cost, 400.0));
        assert!(approx(charges[1].cost, 850.0));
    }

    #[test]
    fn test_bandwidth_three_tiers() {
        let (charges, cost) = price_bandwidth(60.0);
        assert!(approx(cost, 4650.0), "cost = {cost}");
        let costs: Vec<f64> = charges.iter().map(|c| c.cost).collect();
        assert_eq!(costs, vec![600.0, 3200.0, 850.0]);
        let tbs: Vec<f64> = charges.iter().map(|c| c.terabytes).collect();
        assert_eq!(tbs, vec![10.0, 40.0, 10.0]);
    }

    #[test]
    fn test_bandwidth_exact_boundary_stays_in_lower_tier() {
        let (charges, cost) = price_bandwidth(10.0);
        assert_eq!(charges.len(), 1);
        assert!(approx(cost, 850.0));

        let (charges, _) = price_bandwidth(50.0);
        assert_eq!(charges.len(), 2);
        assert!(approx(charges[0].terabytes, 40.0));
    }

    #[test]
    fn test_bandwidth_zero() {
        let (charges, cost) = price_bandwidth(0.0);
        assert_eq!(charges.len(), 1);
        assert_eq!(cost, 0.0);
    }

    // ── billable_terabytes ───────────────────────────────────────────────────

    #[test]
    fn test_terabytes_from_bytes() {
        assert!(approx(billable_terabytes(&counters_for_terabytes(5.0)), 5.0));
    }

    #[test]
    fn test_terabytes_include_request_overhead() {
        // 2 KB per request; 1024^3 / 2 requests make one "terabyte".
        let counters = requests(1024.0 * 1024.0 * 512.0, 0.0);
        assert!(approx(billable_terabytes(&counters), 1.0));
    }

    #[test]
    fn test_terabytes_ignore_total_fields() {
        let counters = UsageCounters {
            total: 1_000_000.0,
            total_bytes: (1u64 << 50) as f64,
            ..Default::default()
        };
        assert_eq!(billable_terabytes(&counters), 0.0);
    }

    // ── estimate ─────────────────────────────────────────────────────────────

    #[test]
    fn test_estimate_bandwidth_tiers() {
        assert!(approx(estimate(&counters_for_terabytes(5.0)).bandwidth_cost, 425.0));
        assert!(approx(estimate(&counters_for_terabytes(15.0)).bandwidth_cost, 1250.0));
        assert!(approx(estimate(&counters_for_terabytes(60.0)).bandwidth_cost, 4650.0));
    }

    #[test]
    fn test_estimate_request_blocks() {
        let report = estimate(&requests(10_000.0, 0.0));
        assert_eq!(report.request_blocks, 1);
        assert!(approx(report.request_cost, 0.01));

        let report = estimate(&requests(10_000.0, 1.0));
        assert_eq!(report.total_requests, 10_001.0);
        assert_eq!(report.request_blocks, 2);
        assert!(approx(report.request_cost, 0.02));
    }

    #[test]
    fn test_estimate_edge_protection() {
        let report = estimate(&requests(1_000_000.0, 1_000_000.0));
        assert_eq!(report.edge_blocks, 2);
        assert!(approx(report.edge_protection_cost, 1.20));
    }

    #[test]
    fn test_estimate_no_traffic_is_free() {
        let report = estimate(&UsageCounters::default());
        assert_eq!(report.total_requests, 0.0);
        assert_eq!(report.request_blocks, 0);
        assert_eq!(report.edge_blocks, 0);
        assert_eq!(report.total_price, 0.0);
    }

    #[test]
    fn test_estimate_total_is_sum_of_parts() {
        let counters = UsageCounters {
            on_campus: 10_000.0,
            off_campus: 10_000.0,
            total: 20_000.0,
            ..Default::default()
        };
        let report = estimate(&counters);

        let expected_tb = 40_000.0 / KB_PER_TB;
        assert!(approx(report.total_terabytes, expected_tb));
        assert!(approx(report.bandwidth_cost, expected_tb * 85.0));
        assert_eq!(report.request_blocks, 2);
        assert_eq!(report.edge_blocks, 1);
        assert!(approx(
            report.total_price,
            expected_tb * 85.0 + 0.02 + 0.60
        ));
    }

    #[test]
    fn test_estimate_huge_byte_counts() {
        let counters = UsageCounters {
            on_campus_bytes: 1e19,
            off_campus_bytes: 1e19,
            ..Default::default()
        };
        let report = estimate(&counters);
        assert!(report.total_price.is_finite());
        assert_eq!(report.tier_charges.len(), 3);
        let expected_tb = 2e19 / 1024.0 / KB_PER_TB;
        assert!((report.total_terabytes / expected_tb - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_estimate_fractional_requests_round_up() {
        let report = estimate(&requests(0.5, 0.0));
        assert_eq!(report.request_blocks, 1);
        assert_eq!(report.edge_blocks, 1);
    }
}
